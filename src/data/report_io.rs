use {
    crate::utils::TimeUtils,
    anyhow::{Context, Result},
    chrono::NaiveDateTime,
    itertools::Itertools,
    serde::Serialize,
    std::{
        fs::{self, File, OpenOptions},
        io::{BufWriter, Write},
        path::{Path, PathBuf},
    },
    tabled::Tabled,
};

pub const REPORT_HEADER: &str = "Report of Head and Shoulders Pattern Detection:";

const DETECTION_PREFIX: &str = "Head and Shoulders detected at: ";
const DOWNTREND_YES: &str = "downtrend afterwards: Yes";
const DOWNTREND_NO: &str = "downtrend afterwards: No";

/// Outcome tally of a detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Tabled)]
pub struct OutcomeCounts {
    #[tabled(rename = "Patterns")]
    pub total: usize,
    #[tabled(rename = "Downtrend")]
    pub downtrend: usize,
    #[tabled(rename = "No Downtrend")]
    pub no_downtrend: usize,
}

impl OutcomeCounts {
    /// Counts Yes/No detection lines. Callers pass deduplicated lines.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = Self::default();
        for line in lines {
            if line.contains(DOWNTREND_YES) {
                counts.downtrend += 1;
            } else if line.contains(DOWNTREND_NO) {
                counts.no_downtrend += 1;
            }
        }
        counts.total = counts.downtrend + counts.no_downtrend;
        counts
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Summary: {} head and shoulders patterns detected, {} followed by a downtrend, {} not as expected",
            self.total, self.downtrend, self.no_downtrend
        )
    }
}

pub fn detection_line(right_shoulder_time: &NaiveDateTime, downtrend: bool) -> String {
    format!(
        "{}{}, {}",
        DETECTION_PREFIX,
        TimeUtils::format_datetime(right_shoulder_time),
        if downtrend { DOWNTREND_YES } else { DOWNTREND_NO }
    )
}

/// Line-oriented text report. Every operation reopens the file, so a failed
/// step leaves the earlier content in place.
#[derive(Debug, Clone)]
pub struct TrendReport {
    path: PathBuf,
}

impl TrendReport {
    /// Creates or truncates the file and writes the header line.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        writeln!(file, "{}", REPORT_HEADER)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_detection(&self, right_shoulder_time: &NaiveDateTime, downtrend: bool) -> Result<()> {
        self.append_line(&detection_line(right_shoulder_time, downtrend))
    }

    /// Rewrites the file keeping only the first occurrence of every line.
    /// Returns how many lines were dropped.
    pub fn deduplicate(&self) -> Result<usize> {
        let content = self.read()?;
        let before = content.lines().count();
        let unique: Vec<&str> = content.lines().unique().collect();
        let removed = before - unique.len();

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to rewrite report {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        for line in &unique {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;

        Ok(removed)
    }

    /// Appends a blank line and the tally of the file's distinct detection lines.
    pub fn append_summary(&self) -> Result<OutcomeCounts> {
        let content = self.read()?;
        let counts = OutcomeCounts::from_lines(content.lines().unique());
        self.append_line("")?;
        self.append_line(&counts.summary_line())?;
        Ok(counts)
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read report {}", self.path.display()))
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open report {}", self.path.display()))?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 3, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn line_format() {
        assert_eq!(
            detection_line(&at(5), true),
            "Head and Shoulders detected at: 2020-03-05 00:00:00, downtrend afterwards: Yes"
        );
        assert!(detection_line(&at(5), false).ends_with("downtrend afterwards: No"));
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let dir = tempfile::tempdir().unwrap();
        let report = TrendReport::create(dir.path().join("r.txt")).unwrap();
        report.append_detection(&at(2), true).unwrap();
        report.append_detection(&at(1), false).unwrap();
        report.append_detection(&at(2), true).unwrap();

        assert_eq!(report.deduplicate().unwrap(), 1);

        let content = fs::read_to_string(report.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                REPORT_HEADER,
                "Head and Shoulders detected at: 2020-03-02 00:00:00, downtrend afterwards: Yes",
                "Head and Shoulders detected at: 2020-03-01 00:00:00, downtrend afterwards: No",
            ]
        );
    }

    #[test]
    fn summary_counts_distinct_lines() {
        let dir = tempfile::tempdir().unwrap();
        let report = TrendReport::create(dir.path().join("r.txt")).unwrap();
        report.append_detection(&at(2), true).unwrap();
        report.append_detection(&at(2), true).unwrap();
        report.append_detection(&at(3), false).unwrap();
        report.append_detection(&at(4), true).unwrap();

        let counts = report.append_summary().unwrap();
        assert_eq!(
            counts,
            OutcomeCounts {
                total: 3,
                downtrend: 2,
                no_downtrend: 1
            }
        );

        let content = fs::read_to_string(report.path()).unwrap();
        assert!(content.ends_with(
            "\n\nSummary: 3 head and shoulders patterns detected, 2 followed by a downtrend, 1 not as expected\n"
        ));
    }

    #[test]
    fn create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.txt");
        fs::write(&path, "stale\nstale\n").unwrap();
        TrendReport::create(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", REPORT_HEADER));
    }
}
