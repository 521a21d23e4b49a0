use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Timestamp formats accepted in CSV date columns, tried in order.
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

    /// Parses a date or date-time cell. Offsets (RFC 3339, `+00:00` suffixes) are
    /// dropped, keeping the wall-clock time as written.
    pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
            return Some(dt.naive_local());
        }

        for fmt in Self::DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }
        for fmt in Self::DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
                return Some(d.and_time(NaiveTime::MIN));
            }
        }
        None
    }

    pub fn format_date(ts: &NaiveDateTime) -> String {
        ts.format(Self::STANDARD_DATE_FORMAT).to_string()
    }

    pub fn format_datetime(ts: &NaiveDateTime) -> String {
        ts.format(Self::STANDARD_TIME_FORMAT).to_string()
    }
}

/// Builds a date from a `(year, month, day)` constant.
pub fn ymd((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_plain_dates() {
        assert_eq!(TimeUtils::parse_timestamp("2021-01-04"), Some(at(2021, 1, 4, 0, 0, 0)));
        assert_eq!(TimeUtils::parse_timestamp("20210104"), Some(at(2021, 1, 4, 0, 0, 0)));
    }

    #[test]
    fn parses_datetimes_with_and_without_offset() {
        assert_eq!(
            TimeUtils::parse_timestamp("2020-03-02 15:30:00"),
            Some(at(2020, 3, 2, 15, 30, 0))
        );
        assert_eq!(
            TimeUtils::parse_timestamp("2020-03-02 00:00:00+00:00"),
            Some(at(2020, 3, 2, 0, 0, 0))
        );
        assert_eq!(
            TimeUtils::parse_timestamp("2020-03-02T09:00:00-05:00"),
            Some(at(2020, 3, 2, 9, 0, 0))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(TimeUtils::parse_timestamp(""), None);
        assert_eq!(TimeUtils::parse_timestamp("yesterday"), None);
    }

    #[test]
    fn formats() {
        let ts = at(2024, 12, 31, 23, 59, 1);
        assert_eq!(TimeUtils::format_date(&ts), "2024-12-31");
        assert_eq!(TimeUtils::format_datetime(&ts), "2024-12-31 23:59:01");
    }
}
