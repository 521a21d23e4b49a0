//! Output file naming

use std::path::{Path, PathBuf};

/// Suffixes appended to the symbol to build artifact names
pub struct ArtifactNames {
    pub trend_report_suffix: &'static str,
    pub pattern_plot_suffix: &'static str,
    pub backtest_plot_suffix: &'static str,
}

pub const PERSISTENCE: ArtifactNames = ArtifactNames {
    trend_report_suffix: "_trend_report.txt",
    pattern_plot_suffix: "_head_and_shoulders_plot.png",
    backtest_plot_suffix: "_backtest_plot.png",
};

/// Example: "GOLD_trend_report.txt"
pub fn trend_report_path(dir: &Path, symbol: &str) -> PathBuf {
    dir.join(format!("{}{}", symbol, PERSISTENCE.trend_report_suffix))
}

/// Example: "GOLD_head_and_shoulders_plot.png"
pub fn pattern_plot_path(dir: &Path, symbol: &str) -> PathBuf {
    dir.join(format!("{}{}", symbol, PERSISTENCE.pattern_plot_suffix))
}

pub fn backtest_plot_path(symbol: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", symbol, PERSISTENCE.backtest_plot_suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_symbol() {
        let dir = Path::new("out");
        assert_eq!(
            trend_report_path(dir, "GOLD"),
            PathBuf::from("out/GOLD_trend_report.txt")
        );
        assert_eq!(
            pattern_plot_path(dir, "GOLD"),
            PathBuf::from("out/GOLD_head_and_shoulders_plot.png")
        );
        assert_eq!(
            backtest_plot_path("002568"),
            PathBuf::from("002568_backtest_plot.png")
        );
    }
}
