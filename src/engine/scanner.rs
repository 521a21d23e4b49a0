use {
    crate::{
        analysis::{HeadAndShouldersDetector, check_for_downward_trend, trend_horizon_end},
        chart::render_pattern_chart,
        config::{PatternConfig, constants::patterns::SCAN_TAIL, pattern_plot_path, trend_report_path},
        data::{OutcomeCounts, TrendReport, load_series},
        models::{Detection, PriceSeries, SeriesError},
    },
    anyhow::{Result, anyhow},
    rayon::prelude::*,
    std::{fs, path::PathBuf},
};

/// Files produced by one detection run.
#[derive(Debug, Clone)]
pub struct DetectionRun {
    pub detections: Vec<Detection>,
    pub counts: Option<OutcomeCounts>,
    pub report_path: PathBuf,
    pub plot_path: PathBuf,
}

/// Runs the detector on every suffix `series[i..]` for `i in 0..len-3` and
/// returns all matches in offset order, indices rebased to the full series.
/// Overlapping matches from neighbouring offsets are all kept.
pub fn scan_series(series: &PriceSeries, config: &PatternConfig) -> Result<Vec<Detection>, SeriesError> {
    let prices = &series.close_prices;
    let volumes = &series.volumes;
    if prices.len() != volumes.len() {
        return Err(SeriesError::LengthMismatch {
            prices: prices.len(),
            volumes: volumes.len(),
        });
    }

    let detector = HeadAndShouldersDetector::new(config.order, config.trough_tolerance);
    let len = prices.len();

    // 1. Detect per offset (Rayon). collect() keeps offset order.
    let found: Vec<(usize, _)> = (0..len.saturating_sub(SCAN_TAIL))
        .into_par_iter()
        .map(|offset| {
            detector
                .detect(&prices[offset..], &volumes[offset..])
                .map(|hit| hit.map(|p| (offset, p.rebased(offset))))
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();

    // 2. Follow-up decline after each right shoulder
    let detections = found
        .into_iter()
        .map(|(offset, pattern)| {
            let rs = pattern.right_shoulder;
            let horizon_end = trend_horizon_end(len, rs, config.trend_horizon);
            Detection {
                offset,
                pattern,
                right_shoulder_time: series.timestamps[rs],
                horizon_end,
                downtrend: check_for_downward_trend(prices, rs, horizon_end, config.decline_threshold),
            }
        })
        .collect();

    Ok(detections)
}

/// Report pipeline for one run: detection lines, plot, dedup, summary. The header
/// is already in `report`. Line, dedup and summary steps are guarded: a failed step
/// is logged and the next one still runs. A plot error ends the run.
pub fn write_report<F>(report: &TrendReport, detections: &[Detection], plot: F) -> Result<Option<OutcomeCounts>>
where
    F: FnOnce() -> Result<()>,
{
    let path = report.path().display();

    for d in detections {
        match report.append_detection(&d.right_shoulder_time, d.downtrend) {
            Ok(()) => log::info!("Trend detection result appended to {}", path),
            Err(e) => log::error!("Failed to write trend detection result to file: {:#}", e),
        }
    }

    plot()?;

    match report.deduplicate() {
        Ok(removed) => log::info!("Removed {} duplicate lines from {}", removed, path),
        Err(e) => log::error!("Failed to remove duplicate lines from file: {:#}", e),
    }

    match report.append_summary() {
        Ok(counts) => {
            log::info!("Trend statistics appended to {}", path);
            Ok(Some(counts))
        }
        Err(e) => {
            log::error!("Failed to append trend statistics to file: {:#}", e);
            Ok(None)
        }
    }
}

/// Load, scan, report and plot.
pub fn run_detection(config: &PatternConfig) -> Result<DetectionRun> {
    let series = load_series(&config.source(), &config.symbol)?;
    series.ensure_not_empty()?;

    fs::create_dir_all(&config.output_dir)?;
    let report_path = trend_report_path(&config.output_dir, &config.symbol);
    let plot_path = pattern_plot_path(&config.output_dir, &config.symbol);

    let report = TrendReport::create(&report_path)?;

    let detections = scan_series(&series, config)?;
    log::info!(
        "{}: {} head and shoulders matches over {} rows (order {})",
        series.symbol,
        detections.len(),
        series.len(),
        config.order
    );

    let counts = write_report(&report, &detections, || {
        render_pattern_chart(&plot_path, &series, &detections).map_err(|e| anyhow!("{e}"))
    })?;

    Ok(DetectionRun {
        detections,
        counts,
        report_path,
        plot_path,
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{data::REPORT_HEADER, domain::PriceBar, models::HeadAndShoulders},
        chrono::NaiveDate,
    };

    fn series(prices: &[f64], volumes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2010, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bars = prices
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&p, &v))| PriceBar::new(start + chrono::Duration::days(i as i64), p, v))
            .collect();
        PriceSeries::from_bars("TEST", bars)
    }

    fn config() -> PatternConfig {
        PatternConfig {
            order: 1,
            ..Default::default()
        }
    }

    // Shoulders at 1, 5, 9; troughs at 3, 7; steep drop afterwards
    const PRICES: [f64; 14] = [
        50.0, 100.0, 60.0, 40.0, 70.0, 110.0, 70.0, 41.0, 60.0, 95.0, 50.0, 45.0, 44.0, 43.0,
    ];
    const VOLUMES: [f64; 14] = [
        500.0, 1200.0, 500.0, 500.0, 500.0, 1000.0, 500.0, 500.0, 500.0, 800.0, 500.0, 500.0, 500.0, 500.0,
    ];

    #[test]
    fn first_offset_match_is_rebased_and_trend_checked() {
        let s = series(&PRICES, &VOLUMES);
        let found = scan_series(&s, &config()).unwrap();

        let first = &found[0];
        assert_eq!(first.offset, 0);
        assert_eq!(first.pattern.left_shoulder, 1);
        assert_eq!(first.pattern.head, 5);
        assert_eq!(first.pattern.right_shoulder, 9);
        assert_eq!(first.pattern.neckline, 40.5);
        assert_eq!(first.horizon_end, 13);
        assert!(first.downtrend);
        assert_eq!(first.right_shoulder_time, s.timestamps[9]);
    }

    #[test]
    fn left_shoulder_at_slice_edge_is_lost() {
        // From offset 1 on the left shoulder is the first point of the slice
        let s = series(&PRICES, &VOLUMES);
        let found = scan_series(&s, &config()).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn repeated_formations_are_found_at_each_offset() {
        let mut prices = PRICES.to_vec();
        let mut volumes = VOLUMES.to_vec();
        prices.extend_from_slice(&PRICES);
        volumes.extend_from_slice(&VOLUMES);
        let s = series(&prices, &volumes);

        let found = scan_series(&s, &config()).unwrap();
        assert!(found.windows(2).all(|w| w[0].offset < w[1].offset));
        assert_eq!(found.first().map(|d| d.pattern.head), Some(5));
        assert_eq!(found.last().map(|d| d.pattern.head), Some(19));
    }

    #[test]
    fn short_series_yields_nothing() {
        let s = series(&[1.0, 2.0, 1.0], &[1.0, 1.0, 1.0]);
        assert!(scan_series(&s, &config()).unwrap().is_empty());
        assert!(scan_series(&PriceSeries::default(), &config()).unwrap().is_empty());
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let mut s = series(&PRICES, &VOLUMES);
        s.volumes.pop();
        assert!(matches!(
            scan_series(&s, &config()),
            Err(SeriesError::LengthMismatch { .. })
        ));
    }

    fn detection(day: u32, downtrend: bool) -> Detection {
        Detection {
            offset: 0,
            pattern: HeadAndShoulders {
                left_shoulder: 1,
                head: 5,
                right_shoulder: 9,
                neckline: 40.5,
            },
            right_shoulder_time: NaiveDate::from_ymd_opt(2010, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            horizon_end: 13,
            downtrend,
        }
    }

    const LINE_10_YES: &str = "Head and Shoulders detected at: 2010-01-10 00:00:00, downtrend afterwards: Yes";
    const LINE_20_NO: &str = "Head and Shoulders detected at: 2010-01-20 00:00:00, downtrend afterwards: No";

    #[test]
    fn report_steps_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let report = TrendReport::create(dir.path().join("trend.txt")).unwrap();
        let detections = [detection(10, true), detection(20, false), detection(10, true)];

        let mut at_plot = String::new();
        let counts = write_report(&report, &detections, || {
            at_plot = fs::read_to_string(report.path())?;
            Ok(())
        })
        .unwrap();

        // Lines are written before the plot, dedup and summary after it
        assert_eq!(
            at_plot,
            format!("{REPORT_HEADER}\n{LINE_10_YES}\n{LINE_20_NO}\n{LINE_10_YES}\n")
        );
        assert_eq!(
            fs::read_to_string(report.path()).unwrap(),
            format!(
                "{REPORT_HEADER}\n{LINE_10_YES}\n{LINE_20_NO}\n\n\
                 Summary: 2 head and shoulders patterns detected, 1 followed by a downtrend, 1 not as expected\n"
            )
        );
        assert_eq!(
            counts,
            Some(OutcomeCounts {
                total: 2,
                downtrend: 1,
                no_downtrend: 1
            })
        );
    }

    #[test]
    fn failed_detection_lines_do_not_stop_later_steps() {
        let dir = tempfile::tempdir().unwrap();
        let report = TrendReport::create(dir.path().join("trend.txt")).unwrap();
        fs::remove_file(report.path()).unwrap();

        let mut plotted = false;
        let counts = write_report(&report, &[detection(10, true)], || {
            plotted = true;
            fs::write(report.path(), format!("{REPORT_HEADER}\n{LINE_20_NO}\n{LINE_20_NO}\n"))?;
            Ok(())
        })
        .unwrap();

        assert!(plotted);
        assert_eq!(counts.map(|c| c.no_downtrend), Some(1));
        let content = fs::read_to_string(report.path()).unwrap();
        assert!(content.starts_with(&format!("{REPORT_HEADER}\n{LINE_20_NO}\n\nSummary: 1 ")));
    }

    #[test]
    fn failed_dedup_and_summary_are_logged_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let report = TrendReport::create(dir.path().join("trend.txt")).unwrap();

        let counts = write_report(&report, &[detection(10, true)], || {
            fs::remove_file(report.path())?;
            Ok(())
        })
        .unwrap();

        assert_eq!(counts, None);
    }

    #[test]
    fn plot_failure_ends_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let report = TrendReport::create(dir.path().join("trend.txt")).unwrap();

        let result = write_report(&report, &[detection(10, true)], || Err(anyhow!("no backend")));

        assert!(result.is_err());
        assert_eq!(
            fs::read_to_string(report.path()).unwrap(),
            format!("{REPORT_HEADER}\n{LINE_10_YES}\n")
        );
    }
}
