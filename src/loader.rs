//! Reads benchmark logs (CSV) into typed rows and merges them.
//!
//! The benchmark harness writes rows as `a, b, c, ` so every field is trimmed
//! and the blank column produced by the trailing separator is ignored.
use csv;
use errors::*;
use record::Record;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Rows of a single input, together with the columns its header declared.
#[derive(Clone, Debug)]
pub struct Table<R> {
    /// Where the rows came from (file path or a test label).
    pub source: String,

    /// Non-blank header names.
    pub columns: BTreeSet<String>,

    /// Rows in file order.
    pub rows: Vec<R>,
}

fn joined(columns: &BTreeSet<String>) -> String {
    columns.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Parses one table. The header must name exactly the columns of `R`,
/// including the ones `R` drops.
pub fn read_table<R: Record, Rd: Read>(source: &str, rdr: Rd) -> Result<Table<R>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let columns = reader
        .headers()?
        .iter()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_string())
        .collect::<BTreeSet<String>>();

    let expected = R::HEADER
        .iter()
        .map(|c| c.name().to_string())
        .collect::<BTreeSet<String>>();
    if columns != expected {
        bail!(ErrorKind::SchemaMismatch(
            source.to_string(),
            joined(&expected),
            joined(&columns),
        ));
    }

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let record: R = record.chain_err(|| format!("malformed row in {}", source))?;
        rows.push(record);
    }
    trace!("read {} rows from {}", rows.len(), source);

    Ok(Table {
        source: source.to_string(),
        columns: columns,
        rows: rows,
    })
}

/// Concatenates tables in order. Every table must declare the same column set
/// as the first one.
pub fn merge<R>(tables: Vec<Table<R>>) -> Result<Vec<R>> {
    let mut tables = tables.into_iter();
    let first = match tables.next() {
        Some(t) => t,
        None => bail!(ErrorKind::NoInput),
    };

    let columns = first.columns;
    let mut rows = first.rows;
    for table in tables {
        if table.columns != columns {
            bail!(ErrorKind::SchemaMismatch(
                table.source,
                joined(&columns),
                joined(&table.columns),
            ));
        }
        rows.extend(table.rows);
    }
    Ok(rows)
}

/// Loads every file in `paths` and merges them, preserving file order and
/// then row order within each file.
pub fn load<R: Record, P: AsRef<Path>>(paths: &[P]) -> Result<Vec<R>> {
    info!(
        "Reading CSV files: {:?} ...",
        paths.iter().map(|p| p.as_ref()).collect::<Vec<_>>()
    );
    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let file = File::open(path).chain_err(|| format!("no input file {}", path.display()))?;
        tables.push(read_table::<R, _>(&path.display().to_string(), file)?);
    }
    merge(tables)
}
