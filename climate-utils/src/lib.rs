//! Shared utility functions for climate crates.

/// Date utility functions
pub mod dates {
    use chrono::{Days, NaiveDate};

    /// Canonical date format used by the measurement table.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Length of the "recent observations" window, in days.
    pub const RECENT_WINDOW_DAYS: u64 = 366;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
    }

    /// Parse a date that must already be in canonical "YYYY-MM-DD" form.
    ///
    /// chrono accepts unpadded fields ("2017-1-1") and signed years, which
    /// would break the string comparisons done in SQL. Those inputs are
    /// rejected here by requiring the input to round-trip unchanged.
    pub fn parse_date_strict(s: &str) -> anyhow::Result<NaiveDate> {
        let date = parse_date(s)?;
        if format_date(&date) != s {
            anyhow::bail!("date '{}' is not in YYYY-MM-DD form", s);
        }
        Ok(date)
    }

    /// Lower bound (inclusive) of the recent window ending at `max_date`.
    pub fn window_start(max_date: &NaiveDate) -> anyhow::Result<NaiveDate> {
        max_date
            .checked_sub_days(Days::new(RECENT_WINDOW_DAYS))
            .ok_or_else(|| anyhow::anyhow!("window start before {} is out of range", max_date))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2017-08-23");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_date_strict_rejects_malformed() {
            assert!(parse_date_strict("2017/08/23").is_err());
            assert!(parse_date_strict("not-a-date").is_err());
            assert!(parse_date_strict("2017-02-30").is_err());
            assert!(parse_date_strict("2017-13-01").is_err());
            assert!(parse_date_strict("").is_err());
        }

        #[test]
        fn test_parse_date_strict_rejects_non_canonical() {
            assert!(parse_date_strict("2017-1-1").is_err());
            assert!(parse_date_strict(" 2017-01-01").is_err());
            assert!(parse_date_strict("2017-01-01 ").is_err());
        }

        #[test]
        fn test_parse_date_strict_accepts_leap_day() {
            let date = parse_date_strict("2016-02-29").unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2016, 2, 29).unwrap());
        }

        #[test]
        fn test_window_start() {
            let max = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
            // 2016 is a leap year, so 366 days back lands on the same calendar day
            assert_eq!(
                window_start(&max).unwrap(),
                NaiveDate::from_ymd_opt(2016, 8, 22).unwrap()
            );

            let max = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
            assert_eq!(
                window_start(&max).unwrap(),
                NaiveDate::from_ymd_opt(2017, 12, 31).unwrap()
            );
        }
    }
}
