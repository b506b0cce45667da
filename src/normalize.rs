//! Unit conversion of metric columns.

use errors::*;
use record::{Column, Record, is_metric};

/// Bytes to kilobytes.
pub const BYTES_PER_KB: f64 = 1024.0;
/// Microseconds to milliseconds.
pub const USEC_PER_MSEC: f64 = 1000.0;
/// Microseconds to seconds.
pub const USEC_PER_SEC: f64 = 1_000_000.0;
/// Milliseconds to seconds.
pub const MSEC_PER_SEC: f64 = 1000.0;

/// Divide every value of `column` by `divisor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Metric column to convert.
    pub column: Column,

    /// Every value is divided by this.
    pub divisor: f64,
}

impl Scale {
    /// Scales `column` by `1 / divisor`.
    pub fn new(column: Column, divisor: f64) -> Self {
        Scale {
            column: column,
            divisor: divisor,
        }
    }
}

/// Rows whose units have been converted. The only way to obtain one is
/// `normalize`, which consumes the raw rows, so a row set cannot be scaled
/// twice.
#[derive(Debug, Clone)]
pub struct Normalized<R> {
    rows: Vec<R>,
}

impl<R> Normalized<R> {
    /// The converted rows.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Applies every scale to `rows`. Each scaled column must be a metric and may
/// appear only once.
pub fn normalize<R: Record>(rows: Vec<R>, scales: &[Scale]) -> Result<Normalized<R>> {
    for (i, scale) in scales.iter().enumerate() {
        if !is_metric::<R>(scale.column) {
            bail!(ErrorKind::InvalidColumn(scale.column, "only metric columns can be scaled"));
        }
        if scales[..i].iter().any(|s| s.column == scale.column) {
            bail!(ErrorKind::InvalidColumn(scale.column, "scaled more than once"));
        }
        debug!("scaling {} by 1/{}", scale.column, scale.divisor);
    }

    let rows = rows.into_iter()
        .map(|mut row| {
            for scale in scales {
                if let Some(v) = row.metric_mut(scale.column) {
                    *v /= scale.divisor;
                }
            }
            row
        })
        .collect::<Vec<R>>();

    for row in &rows {
        debug!("{:?}", row);
    }
    Ok(Normalized { rows: rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use record::{AppendOnlyProofRecord, MembershipProofRecord};

    #[test]
    fn test_bytes_to_kb() {
        let rows = vec![
            AppendOnlyProofRecord {
                new_dict_size: 8,
                proof_bytes: 2048.0,
                verify_usec: 1500.0,
            },
        ];
        let n = normalize(
            rows,
            &[
                Scale::new(Column::ProofBytes, BYTES_PER_KB),
                Scale::new(Column::VerifyUsec, USEC_PER_MSEC),
            ],
        ).unwrap();
        assert_eq!(n.rows()[0].proof_bytes, 2.0);
        assert_eq!(n.rows()[0].verify_usec, 1.5);
        assert_eq!(n.rows()[0].new_dict_size, 8);
    }

    #[test]
    fn test_unscaled_columns_untouched() {
        let rows = vec![
            MembershipProofRecord {
                dict_size: 4,
                num_values: 1,
                forest_bytes: 10.0,
                frontier_bytes: 20.0,
                total_bytes: 4096.0,
                verify_usec: 3000.0,
            },
        ];
        let n = normalize(rows, &[Scale::new(Column::TotalBytes, BYTES_PER_KB)]).unwrap();
        assert_eq!(n.rows()[0].total_bytes, 4.0);
        assert_eq!(n.rows()[0].forest_bytes, 10.0);
        assert_eq!(n.rows()[0].verify_usec, 3000.0);
    }

    #[test]
    fn test_rejects_key_and_repeated_columns() {
        let row = AppendOnlyProofRecord {
            new_dict_size: 8,
            proof_bytes: 2048.0,
            verify_usec: 1500.0,
        };
        assert!(normalize(vec![row.clone()], &[Scale::new(Column::NewDictSize, 2.0)]).is_err());
        assert!(
            normalize(
                vec![row],
                &[
                    Scale::new(Column::ProofBytes, BYTES_PER_KB),
                    Scale::new(Column::ProofBytes, BYTES_PER_KB),
                ],
            ).is_err()
        );
    }
}
