//! The five charts: load, aggregate, normalize and extract series.

use aggregate::{aggregate, cumulative_mean};
use axis::AxisScale;
use chart::{Chart, Legend, LegendPosition, Marker, Plot, XScale};
use errors::*;
use loader::load;
use normalize::{BYTES_PER_KB, MSEC_PER_SEC, Normalized, Scale, USEC_PER_MSEC, USEC_PER_SEC,
                normalize};
use record::{AppendOnlyProofRecord, AppendRecord, Column, MembershipProofRecord, Record};
use series::{SeriesSpec, domain};
use std::path::Path;

/// `numValues` drawn by the twin membership-proof chart.
pub const TWINPLOT_NUM_VALUES: &[u64] = &[0, 1, 4, 8, 32];

/// Log scale chosen from the x-domain of `table`.
fn log_scale<R: Record>(table: &Normalized<R>, x: Column) -> XScale {
    XScale::Log(AxisScale::select(&domain(table, x)))
}

/// Membership-proof rows averaged per (dictSize, numValues), sizes in KB
/// and verification time in seconds.
pub fn membership_table<P: AsRef<Path>>(inputs: &[P]) -> Result<Normalized<MembershipProofRecord>> {
    let rows = load::<MembershipProofRecord, _>(inputs)?;
    let rows = aggregate(&rows, &[Column::DictSize, Column::NumValues])?;
    normalize(
        rows,
        &[
            Scale::new(Column::ForestBytes, BYTES_PER_KB),
            Scale::new(Column::FrontierBytes, BYTES_PER_KB),
            Scale::new(Column::TotalBytes, BYTES_PER_KB),
            Scale::new(Column::VerifyUsec, USEC_PER_SEC),
        ],
    )
}

/// Append-only proof size (KB) and verification time (ms) on twin y-axes.
pub fn append_only_proof<P: AsRef<Path>>(inputs: &[P]) -> Result<Chart> {
    let rows = load::<AppendOnlyProofRecord, _>(inputs)?;
    let rows = aggregate(&rows, &[Column::NewDictSize])?;
    let table = normalize(
        rows,
        &[
            Scale::new(Column::ProofBytes, BYTES_PER_KB),
            Scale::new(Column::VerifyUsec, USEC_PER_MSEC),
        ],
    )?;

    let size = SeriesSpec::new(Column::NewDictSize, Column::ProofBytes)
        .label("Proof size")
        .extract(&table)?;
    let time = SeriesSpec::new(Column::NewDictSize, Column::VerifyUsec)
        .label("Verification time")
        .extract(&table)?;

    Ok(Chart {
        title: None,
        x_desc: None,
        x_scale: log_scale(&table, Column::NewDictSize),
        figsize: (12.0, 7.5),
        primary: Plot::new("Proof size (in KB)", size)
            .marker(Marker::Circle)
            .legend(Legend::at(LegendPosition::UpperLeft)),
        secondary: Some(
            Plot::new("Verification time (in millisecs)", time).marker(Marker::Cross),
        ),
    })
}

/// Appends with repeated trials averaged, then the running mean of each
/// batch size over growing dictionary sizes. Times in seconds.
fn append_table<P: AsRef<Path>>(inputs: &[P]) -> Result<Normalized<AppendRecord>> {
    let rows = load::<AppendRecord, _>(inputs)?;
    // aggregated rows come out by ascending (dictSize, batchSize)
    let rows = aggregate(&rows, &[Column::DictSize, Column::BatchSize])?;
    let rows = cumulative_mean(
        &rows,
        Column::AppendTimeMillisec,
        Column::CumulativeAvgMillisec,
        Some(Column::BatchSize),
    )?;
    normalize(
        rows,
        &[
            Scale::new(Column::AppendTimeMillisec, MSEC_PER_SEC),
            Scale::new(Column::CumulativeAvgMillisec, MSEC_PER_SEC),
        ],
    )
}

/// Cumulative average append time of a single batch size. With `all`, the
/// time of every individual append is drawn as well.
pub fn append_times<P: AsRef<Path>>(inputs: &[P], batch_size: &str, all: bool) -> Result<Chart> {
    if all {
        info!("Plotting append times for each individual append...");
    }
    let table = append_table(inputs)?;

    let mut series = SeriesSpec::new(Column::DictSize, Column::CumulativeAvgMillisec)
        .label("Cumulative average")
        .extract(&table)?;
    let mut title = format!("AAD cumulative average append time (batch size = {})", batch_size);
    let mut primary_legend = None;
    if all {
        series.extend(
            SeriesSpec::new(Column::DictSize, Column::AppendTimeMillisec)
                .label("Last append")
                .extract(&table)?,
        );
        title = format!("AAD append time (batch size = {})", batch_size);
        primary_legend = Some(Legend::at(LegendPosition::UpperLeft));
    }

    let mut primary = Plot::new("Append time (secs)", series);
    primary.legend = primary_legend;
    Ok(Chart {
        title: Some(title),
        x_desc: Some("Number of key-value pairs".to_string()),
        x_scale: XScale::Linear,
        figsize: (12.0, 9.0),
        primary: primary,
        secondary: None,
    })
}

/// Cumulative average append time, one line per batch size.
pub fn batched_appends<P: AsRef<Path>>(inputs: &[P]) -> Result<Chart> {
    let table = append_table(inputs)?;
    let series = SeriesSpec::new(Column::DictSize, Column::CumulativeAvgMillisec)
        .split_by(Column::BatchSize)
        .extract(&table)?;
    for s in &series {
        info!("Plotting {} ...", s.label);
    }

    Ok(Chart {
        title: None,
        x_desc: None,
        x_scale: log_scale(&table, Column::DictSize),
        figsize: (12.0, 7.0),
        primary: Plot::new("Cumulative average append time (secs)", series)
            .legend(Legend::at(LegendPosition::UpperLeft)),
        secondary: None,
    })
}

/// Total membership proof size, one line per number of values.
pub fn membership_proof<P: AsRef<Path>>(inputs: &[P], title: Option<&str>) -> Result<Chart> {
    let table = membership_table(inputs)?;
    let series = SeriesSpec::new(Column::DictSize, Column::TotalBytes)
        .split_by(Column::NumValues)
        .extract(&table)?;

    let legend = Legend {
        position: LegendPosition::UpperLeft,
        font_size: Some(17),
    };
    Ok(Chart {
        title: title.map(|t| t.to_string()),
        x_desc: None,
        x_scale: log_scale(&table, Column::DictSize),
        figsize: (10.5, 6.0),
        primary: Plot::new("Proof size (in KB)", series)
            .marker(Marker::Circle)
            .legend(legend),
        secondary: None,
    })
}

/// Membership proof size (KB) and verification time (s) for a few numbers of
/// values, on twin y-axes.
pub fn membership_twinplot<P: AsRef<Path>>(inputs: &[P]) -> Result<Chart> {
    let table = membership_table(inputs)?;
    let sizes = SeriesSpec::new(Column::DictSize, Column::TotalBytes)
        .split_by(Column::NumValues)
        .only(TWINPLOT_NUM_VALUES)
        .extract(&table)?;
    let times = SeriesSpec::new(Column::DictSize, Column::VerifyUsec)
        .split_by(Column::NumValues)
        .only(TWINPLOT_NUM_VALUES)
        .extract(&table)?;

    Ok(Chart {
        title: Some("AAD complete membership proofs".to_string()),
        x_desc: Some("Number of key-value pairs".to_string()),
        x_scale: log_scale(&table, Column::DictSize),
        figsize: (15.0, 9.0),
        primary: Plot::new("Proof size (in KB)", sizes).legend(Legend::at(LegendPosition::UpperLeft)),
        secondary: Some(
            Plot::new("Verification time (in secs)", times)
                .marker(Marker::Cross)
                .legend(Legend::at(LegendPosition::LowerLeft)),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", contents).unwrap();
        f
    }

    const MEMB_HEADER: &str = "dictSize,numValues,forestBytes,frontierBytes,totalBytes,verifyUsec,\n";

    #[test]
    fn test_membership_two_files() {
        let a = write_csv(&format!("{}4, 1, 512, 512, 1024, 2000,\n", MEMB_HEADER));
        let b = write_csv(&format!("{}4, 1, 1536, 1536, 3072, 4000,\n", MEMB_HEADER));

        let table = membership_table(&[a.path(), b.path()]).unwrap();
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!((row.dict_size, row.num_values), (4, 1));
        assert_eq!(row.total_bytes, 2.0);
        assert_eq!(row.forest_bytes, 1.0);
        assert!((row.verify_usec - 0.003).abs() < 1e-12);

        let series = SeriesSpec::new(Column::DictSize, Column::TotalBytes)
            .split_by(Column::NumValues)
            .only(&[1])
            .extract(&table)
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "1 values");
        assert_eq!(series[0].points, vec![(4.0, 2.0)]);
    }

    #[test]
    fn test_twinplot_filters_num_values() {
        let f = write_csv(&format!(
            "{}8, 1, 0, 0, 1024, 1000000,\n8, 2, 0, 0, 2048, 2000000,\n8, 4, 0, 0, 4096, 3000000,\n\
             16, 1, 0, 0, 1024, 1000000,\n16, 2, 0, 0, 2048, 2000000,\n16, 4, 0, 0, 4096, 3000000,\n",
            MEMB_HEADER
        ));
        let chart = membership_twinplot(&[f.path()]).unwrap();
        let labels = chart.primary
            .series
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["1 values", "4 values"]);
        assert_eq!(chart.x_scale, XScale::Log(AxisScale::Log2));

        let secondary = chart.secondary.unwrap();
        assert_eq!(secondary.series[1].points, vec![(8.0, 3.0), (16.0, 3.0)]);
    }

    #[test]
    fn test_membership_missing_trials() {
        let f = write_csv(&format!(
            "{}10, 1, 0, 0, 1024, 1,\n10, 2, 0, 0, 1024, 1,\n100, 1, 0, 0, 1024, 1,\n",
            MEMB_HEADER
        ));
        let err = membership_proof(&[f.path()], None).unwrap_err();
        assert!(match *err.kind() {
            ErrorKind::CoverageMismatch(..) => true,
            _ => false,
        });
    }

    #[test]
    fn test_append_only_proof() {
        let f = write_csv(
            "oldDictSize,newDictSize,proofBytes,verifyUsec\n\
             5, 10, 1024, 1000\n5, 10, 3072, 3000\n50, 100, 4096, 8000\n",
        );
        let chart = append_only_proof(&[f.path()]).unwrap();
        assert_eq!(chart.x_scale, XScale::Log(AxisScale::Log10));
        assert!(chart.primary.legend.is_some());
        assert_eq!(chart.primary.series[0].points, vec![(10.0, 2.0), (100.0, 4.0)]);
        let secondary = chart.secondary.unwrap();
        // listed in the primary legend
        assert!(secondary.legend.is_none());
        assert_eq!(secondary.series[0].label, "Verification time");
        assert_eq!(secondary.series[0].points, vec![(10.0, 2.0), (100.0, 8.0)]);
    }

    const APPEND_HEADER: &str = "dictSize,batchSize,appendTimeMillisec,\n";

    #[test]
    fn test_append_times() {
        let f = write_csv(&format!("{}1, 1, 1000,\n2, 1, 3000,\n3, 1, 2000,\n", APPEND_HEADER));

        let chart = append_times(&[f.path()], "1", false).unwrap();
        assert_eq!(chart.x_scale, XScale::Linear);
        assert!(chart.primary.legend.is_none());
        assert_eq!(chart.primary.series.len(), 1);
        assert_eq!(chart.primary.series[0].points, vec![(1.0, 1.0), (2.0, 2.0), (3.0, 2.0)]);
        assert!(chart.title.unwrap().contains("cumulative average"));

        let chart = append_times(&[f.path()], "1", true).unwrap();
        assert!(chart.primary.legend.is_some());
        assert_eq!(chart.primary.series[1].label, "Last append");
        assert_eq!(chart.primary.series[1].points, vec![(1.0, 1.0), (2.0, 3.0), (3.0, 2.0)]);
        assert_eq!(chart.title.unwrap(), "AAD append time (batch size = 1)");
    }

    #[test]
    fn test_repeated_trials_keep_append_curve() {
        let trial = format!("{}1, 1, 1000,\n2, 1, 3000,\n", APPEND_HEADER);
        let a = write_csv(&trial);
        let b = write_csv(&trial);

        let once = append_times(&[a.path()], "1", true).unwrap();
        let twice = append_times(&[a.path(), b.path()], "1", true).unwrap();
        assert_eq!(once.primary.series[0].points, vec![(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(twice.primary.series, once.primary.series);

        let once = batched_appends(&[a.path()]).unwrap();
        let twice = batched_appends(&[a.path(), b.path()]).unwrap();
        assert_eq!(twice.primary.series[0].points, vec![(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(twice.primary.series, once.primary.series);
    }

    #[test]
    fn test_cumulative_average_over_averaged_trials() {
        // trials disagree; the running mean is taken over the per-size means
        let a = write_csv(&format!("{}1, 1, 1000,\n2, 1, 2000,\n", APPEND_HEADER));
        let b = write_csv(&format!("{}1, 1, 3000,\n2, 1, 6000,\n", APPEND_HEADER));
        let chart = append_times(&[a.path(), b.path()], "1", false).unwrap();
        assert_eq!(chart.primary.series[0].points, vec![(1.0, 2.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_batched_appends() {
        let f = write_csv(&format!(
            "{}2, 2, 4000,\n1, 1, 1000,\n4, 2, 2000,\n2, 1, 3000,\n",
            APPEND_HEADER
        ));
        let err = batched_appends(&[f.path()]).unwrap_err();
        // batch size 2 has no point at dictSize 1
        assert!(match *err.kind() {
            ErrorKind::CoverageMismatch(..) => true,
            _ => false,
        });

        let f = write_csv(&format!(
            "{}1, 1, 1000,\n2, 1, 3000,\n1, 2, 4000,\n2, 2, 2000,\n",
            APPEND_HEADER
        ));
        let chart = batched_appends(&[f.path()]).unwrap();
        let labels = chart.primary
            .series
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["batch size 1", "batch size 2"]);
        assert_eq!(chart.primary.series[1].points, vec![(1.0, 4.0), (2.0, 3.0)]);
    }
}
