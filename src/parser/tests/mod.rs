//! Tests for the report parser
//!
//! Covers field extraction against realistic reports, memoization of the
//! field cache, and construction from source payloads.


use chrono::NaiveDate;

/// Reference date used by most tests (October 2024)
pub fn october_2024() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 16).unwrap()
}
