//! Typed rows of the benchmark logs.
//!
//! Each dataset variant has a fixed header. Key columns hold unsigned
//! integers (dictionary sizes, number of values, batch sizes) and are never
//! averaged; metric columns hold `f64` measurements.

use serde::de::DeserializeOwned;
use std::fmt::{self, Debug};

/// Every column that appears in a benchmark log, plus the derived
/// cumulative average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// Number of key-value pairs in the dictionary.
    DictSize,
    /// Size before an append-only proof (read and dropped).
    OldDictSize,
    /// Size after an append-only proof.
    NewDictSize,
    /// Number of values per key in a membership proof.
    NumValues,
    /// Number of keys appended at once.
    BatchSize,
    /// Append-only proof size.
    ProofBytes,
    /// Forest part of a membership proof.
    ForestBytes,
    /// Frontier part of a membership proof.
    FrontierBytes,
    /// Whole membership proof.
    TotalBytes,
    /// Proof verification time.
    VerifyUsec,
    /// Time taken by a single append.
    AppendTimeMillisec,
    /// Running mean of `AppendTimeMillisec`. Never read from a file.
    CumulativeAvgMillisec,
}

impl Column {
    /// The column name as spelled in the log header.
    pub fn name(&self) -> &'static str {
        match *self {
            Column::DictSize => "dictSize",
            Column::OldDictSize => "oldDictSize",
            Column::NewDictSize => "newDictSize",
            Column::NumValues => "numValues",
            Column::BatchSize => "batchSize",
            Column::ProofBytes => "proofBytes",
            Column::ForestBytes => "forestBytes",
            Column::FrontierBytes => "frontierBytes",
            Column::TotalBytes => "totalBytes",
            Column::VerifyUsec => "verifyUsec",
            Column::AppendTimeMillisec => "appendTimeMillisec",
            Column::CumulativeAvgMillisec => "cumulativeAvgMillisec",
        }
    }

    /// Legend label of the series holding rows where this column equals
    /// `value`.
    pub fn series_label(&self, value: u64) -> String {
        match *self {
            Column::NumValues => format!("{} values", value),
            Column::BatchSize => format!("batch size {}", value),
            _ => format!("{} {}", self.name(), value),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A row of one dataset variant.
pub trait Record: DeserializeOwned + Clone + Debug {
    /// Columns expected in the file header, in file order.
    const HEADER: &'static [Column];

    /// Integer columns identifying a configuration.
    const KEYS: &'static [Column];

    /// Measured (or derived) columns, averaged during aggregation.
    const METRICS: &'static [Column];

    /// Value of a key column, `None` if `column` is not a key of this record.
    fn key(&self, column: Column) -> Option<u64>;

    /// Value of a metric column, `None` if `column` is not a metric.
    fn metric(&self, column: Column) -> Option<f64>;

    /// Mutable access to a metric column.
    fn metric_mut(&mut self, column: Column) -> Option<&mut f64>;

    /// Value of any column as a plotting coordinate.
    fn value(&self, column: Column) -> Option<f64> {
        self.key(column)
            .map(|k| k as f64)
            .or_else(|| self.metric(column))
    }
}

/// Checks that `column` is one of `R`'s keys.
pub fn is_key<R: Record>(column: Column) -> bool {
    R::KEYS.contains(&column)
}

/// Checks that `column` is one of `R`'s metrics.
pub fn is_metric<R: Record>(column: Column) -> bool {
    R::METRICS.contains(&column)
}

/// One append-only proof between two dictionary snapshots.
///
/// ```ignore
/// oldDictSize,newDictSize,proofBytes,verifyUsec
/// 511, 1023, 23592, 11240
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppendOnlyProofRecord {
    /// Dictionary size after the appends.
    pub new_dict_size: u64,
    /// Proof size in bytes.
    pub proof_bytes: f64,
    /// Verification time in microseconds.
    pub verify_usec: f64,
}

impl Record for AppendOnlyProofRecord {
    const HEADER: &'static [Column] = &[
        Column::OldDictSize,
        Column::NewDictSize,
        Column::ProofBytes,
        Column::VerifyUsec,
    ];
    const KEYS: &'static [Column] = &[Column::NewDictSize];
    const METRICS: &'static [Column] = &[Column::ProofBytes, Column::VerifyUsec];

    fn key(&self, column: Column) -> Option<u64> {
        match column {
            Column::NewDictSize => Some(self.new_dict_size),
            _ => None,
        }
    }

    fn metric(&self, column: Column) -> Option<f64> {
        match column {
            Column::ProofBytes => Some(self.proof_bytes),
            Column::VerifyUsec => Some(self.verify_usec),
            _ => None,
        }
    }

    fn metric_mut(&mut self, column: Column) -> Option<&mut f64> {
        match column {
            Column::ProofBytes => Some(&mut self.proof_bytes),
            Column::VerifyUsec => Some(&mut self.verify_usec),
            _ => None,
        }
    }
}

/// One membership proof for a key with `num_values` values.
///
/// ```ignore
/// dictSize,numValues,forestBytes,frontierBytes,totalBytes,verifyUsec,
/// 1024, 4, 5632, 2880, 8512, 3120441,
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MembershipProofRecord {
    /// Number of key-value pairs.
    pub dict_size: u64,
    /// Values stored under the proved key.
    pub num_values: u64,
    /// Forest part of the proof, in bytes.
    pub forest_bytes: f64,
    /// Frontier part of the proof, in bytes.
    pub frontier_bytes: f64,
    /// Whole proof, in bytes.
    pub total_bytes: f64,
    /// Verification time in microseconds.
    pub verify_usec: f64,
}

impl Record for MembershipProofRecord {
    const HEADER: &'static [Column] = &[
        Column::DictSize,
        Column::NumValues,
        Column::ForestBytes,
        Column::FrontierBytes,
        Column::TotalBytes,
        Column::VerifyUsec,
    ];
    const KEYS: &'static [Column] = &[Column::DictSize, Column::NumValues];
    const METRICS: &'static [Column] = &[
        Column::ForestBytes,
        Column::FrontierBytes,
        Column::TotalBytes,
        Column::VerifyUsec,
    ];

    fn key(&self, column: Column) -> Option<u64> {
        match column {
            Column::DictSize => Some(self.dict_size),
            Column::NumValues => Some(self.num_values),
            _ => None,
        }
    }

    fn metric(&self, column: Column) -> Option<f64> {
        match column {
            Column::ForestBytes => Some(self.forest_bytes),
            Column::FrontierBytes => Some(self.frontier_bytes),
            Column::TotalBytes => Some(self.total_bytes),
            Column::VerifyUsec => Some(self.verify_usec),
            _ => None,
        }
    }

    fn metric_mut(&mut self, column: Column) -> Option<&mut f64> {
        match column {
            Column::ForestBytes => Some(&mut self.forest_bytes),
            Column::FrontierBytes => Some(&mut self.frontier_bytes),
            Column::TotalBytes => Some(&mut self.total_bytes),
            Column::VerifyUsec => Some(&mut self.verify_usec),
            _ => None,
        }
    }
}

/// One append of `batch_size` keys that grew the dictionary to `dict_size`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppendRecord {
    /// Dictionary size after the append.
    pub dict_size: u64,
    /// Keys appended at once.
    pub batch_size: u64,
    /// Duration of this append.
    pub append_time_millisec: f64,

    /// Filled in by `cumulative_mean`.
    #[serde(skip)]
    pub cumulative_avg_millisec: f64,
}

impl Record for AppendRecord {
    const HEADER: &'static [Column] = &[
        Column::DictSize,
        Column::BatchSize,
        Column::AppendTimeMillisec,
    ];
    const KEYS: &'static [Column] = &[Column::DictSize, Column::BatchSize];
    const METRICS: &'static [Column] = &[
        Column::AppendTimeMillisec,
        Column::CumulativeAvgMillisec,
    ];

    fn key(&self, column: Column) -> Option<u64> {
        match column {
            Column::DictSize => Some(self.dict_size),
            Column::BatchSize => Some(self.batch_size),
            _ => None,
        }
    }

    fn metric(&self, column: Column) -> Option<f64> {
        match column {
            Column::AppendTimeMillisec => Some(self.append_time_millisec),
            Column::CumulativeAvgMillisec => Some(self.cumulative_avg_millisec),
            _ => None,
        }
    }

    fn metric_mut(&mut self, column: Column) -> Option<&mut f64> {
        match column {
            Column::AppendTimeMillisec => Some(&mut self.append_time_millisec),
            Column::CumulativeAvgMillisec => Some(&mut self.cumulative_avg_millisec),
            _ => None,
        }
    }
}
