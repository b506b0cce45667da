//! Projection of normalized rows into the (x, y) series of a chart.

use errors::*;
use itertools::Itertools;
use normalize::Normalized;
use record::{Column, Record, is_key, is_metric};

/// A named line of a chart. Points are sorted by strictly ascending x.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend entry.
    pub label: String,

    /// `(x, y)` pairs.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a series without points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest y-value, `None` for an empty series.
    pub fn y_max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.1).fold(None, |acc, y| match acc {
            Some(m) if m >= y => Some(m),
            _ => Some(y),
        })
    }
}

/// Sorted distinct values of the key column `x` over every row.
pub fn domain<R: Record>(table: &Normalized<R>, x: Column) -> Vec<u64> {
    table
        .rows()
        .iter()
        .filter_map(|r| r.key(x))
        .sorted()
        .dedup()
        .collect()
}

/// Describes which series to extract.
#[derive(Debug, Clone)]
pub struct SeriesSpec {
    x: Column,
    y: Column,
    split: Option<Column>,
    only: Option<Vec<u64>>,
    label: String,
}

impl SeriesSpec {
    /// One series of `y` against `x`, labeled with `y`'s column name.
    pub fn new(x: Column, y: Column) -> Self {
        SeriesSpec {
            x: x,
            y: y,
            split: None,
            only: None,
            label: y.name().to_string(),
        }
    }

    /// Label of the series when it is not split.
    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Emit one series per distinct value of the key column `column`.
    pub fn split_by(mut self, column: Column) -> Self {
        self.split = Some(column);
        self
    }

    /// Restrict a split to `values`, in that order. Values absent from the
    /// data are skipped.
    pub fn only(mut self, values: &[u64]) -> Self {
        self.only = Some(values.to_vec());
        self
    }

    fn validate<R: Record>(&self) -> Result<()> {
        if !is_key::<R>(self.x) {
            bail!(ErrorKind::InvalidColumn(self.x, "x-axis must be a key column"));
        }
        if !is_metric::<R>(self.y) {
            bail!(ErrorKind::InvalidColumn(self.y, "y-axis must be a metric column"));
        }
        if let Some(split) = self.split {
            if split == self.x || !is_key::<R>(split) {
                bail!(ErrorKind::InvalidColumn(split, "series must be split by another key column"));
            }
        }
        Ok(())
    }

    /// Builds the series. Every series must have exactly one point per value
    /// of the table's x-domain.
    pub fn extract<R: Record>(&self, table: &Normalized<R>) -> Result<Vec<Series>> {
        self.validate::<R>()?;
        let domain = domain(table, self.x);

        let series = match self.split {
            None => vec![self.project(table.rows().iter(), self.label.clone())?],
            Some(split) => {
                let present = table
                    .rows()
                    .iter()
                    .filter_map(|r| r.key(split))
                    .sorted()
                    .dedup()
                    .collect::<Vec<u64>>();
                let values = match self.only {
                    Some(ref only) => only.iter()
                        .cloned()
                        .filter(|v| present.contains(v))
                        .collect::<Vec<u64>>(),
                    None => present,
                };

                let mut series = Vec::with_capacity(values.len());
                for v in values {
                    let rows = table.rows().iter().filter(|r| r.key(split) == Some(v));
                    series.push(self.project(rows, split.series_label(v))?);
                }
                series
            }
        };

        for s in &series {
            if s.len() != domain.len() {
                bail!(ErrorKind::CoverageMismatch(
                    s.label.clone(),
                    s.len(),
                    domain.len(),
                ));
            }
        }
        Ok(series)
    }

    fn project<'a, R: Record + 'a, I>(&self, rows: I, label: String) -> Result<Series>
    where
        I: Iterator<Item = &'a R>,
    {
        let mut keyed = rows.filter_map(|r| match (r.key(self.x), r.metric(self.y)) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }).collect::<Vec<(u64, f64)>>();
        keyed.sort_by_key(|p| p.0);

        for w in keyed.windows(2) {
            if w[0].0 == w[1].0 {
                bail!(ErrorKind::DuplicateKey(label, w[0].0));
            }
        }

        Ok(Series {
            label: label,
            points: keyed.into_iter().map(|(x, y)| (x as f64, y)).collect(),
        })
    }
}
