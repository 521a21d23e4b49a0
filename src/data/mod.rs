mod ledger_io;
mod news_io;
mod page_source;
mod report_io;
mod series_loader;

pub use {
    ledger_io::{save_ledger, write_ledger},
    news_io::save_matches,
    page_source::{HttpSource, PageSource, WebDriverSource, page_source_from_config},
    report_io::{OutcomeCounts, REPORT_HEADER, TrendReport, detection_line},
    series_loader::{SeriesSource, load_series, read_series},
};
