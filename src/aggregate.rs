//! Collapses repeated trials into one row per configuration.

use average::{Estimate, Mean};
use errors::*;
use record::{Column, Record, is_key, is_metric};
use std::collections::BTreeMap;

/// Arithmetic mean of `samples`.
fn mean<I: Iterator<Item = f64>>(samples: I) -> f64 {
    let mut m = Mean::new();
    for s in samples {
        m.add(s);
    }
    m.mean()
}

fn key_tuple<R: Record>(row: &R, keys: &[Column]) -> Vec<u64> {
    // keys were validated against R::KEYS, so every lookup succeeds
    keys.iter().filter_map(|&c| row.key(c)).collect()
}

/// Groups `rows` by the values of `keys` and replaces every group with one
/// row whose metrics are the column-wise means of the group. Key values are
/// copied unchanged. Rows come out in ascending key-tuple order.
///
/// All key columns of `R` must be grouped: they are integers and cannot be
/// averaged.
pub fn aggregate<R: Record>(rows: &[R], keys: &[Column]) -> Result<Vec<R>> {
    if keys.is_empty() {
        bail!(ErrorKind::InvalidColumn(
            R::KEYS.first().cloned().unwrap_or(Column::DictSize),
            "at least one grouping key is required",
        ));
    }
    for &column in keys {
        if !is_key::<R>(column) {
            bail!(ErrorKind::InvalidColumn(column, "not a key column"));
        }
    }
    for &column in R::KEYS {
        if !keys.contains(&column) {
            bail!(ErrorKind::InvalidColumn(column, "key column must be grouped"));
        }
    }

    let mut groups: BTreeMap<Vec<u64>, Vec<&R>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(key_tuple(row, keys))
            .or_insert_with(Vec::new)
            .push(row);
    }

    let aggregated = groups
        .into_iter()
        .map(|(key, group)| {
            trace!("averaging {} trials of {:?}", group.len(), key);
            let mut out = group[0].clone();
            for &column in R::METRICS {
                let m = mean(group.iter().filter_map(|r| r.metric(column)));
                if let Some(v) = out.metric_mut(column) {
                    *v = m;
                }
            }
            out
        })
        .collect::<Vec<R>>();

    info!(
        "Averaged {} rows into {} configurations",
        rows.len(),
        aggregated.len()
    );
    Ok(aggregated)
}

/// Writes into `target` the running mean of `source` over the rows seen so
/// far, in row order. With a `partition` key every distinct key value keeps
/// its own running mean.
pub fn cumulative_mean<R: Record>(
    rows: &[R],
    source: Column,
    target: Column,
    partition: Option<Column>,
) -> Result<Vec<R>> {
    for &column in &[source, target] {
        if !is_metric::<R>(column) {
            bail!(ErrorKind::InvalidColumn(column, "not a metric column"));
        }
    }
    if let Some(column) = partition {
        if !is_key::<R>(column) {
            bail!(ErrorKind::InvalidColumn(column, "not a key column"));
        }
    }

    let mut running: BTreeMap<Option<u64>, Mean> = BTreeMap::new();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let part = partition.and_then(|c| row.key(c));
        let m = running.entry(part).or_insert_with(Mean::new);
        if let Some(v) = row.metric(source) {
            m.add(v);
        }

        let mut row = row.clone();
        if let Some(v) = row.metric_mut(target) {
            *v = m.mean();
        }
        out.push(row);
    }
    Ok(out)
}
