use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Storage and display format for bill dates.
pub(crate) const BILL_DATE_FORMAT: &str = "%m-%d-%Y";

static YEAR_FIRST: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").ok());

/// Convert `YYYY-MM-DD` into `MM-DD-YYYY`. Anything else is returned as-is
/// (trimmed), on the assumption it is already month-first.
pub(crate) fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let is_year_first = YEAR_FIRST
        .as_ref()
        .is_some_and(|re| re.is_match(trimmed));

    if is_year_first {
        let mut parts = trimmed.splitn(3, '-');
        if let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) {
            return format!("{month}-{day}-{year}");
        }
    }
    trimmed.to_string()
}

/// Parse a bill date in either accepted form.
pub(crate) fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&normalize_date(raw), BILL_DATE_FORMAT).ok()
}

/// Today's date in bill format.
pub(crate) fn today() -> String {
    Local::now().format(BILL_DATE_FORMAT).to_string()
}
