use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::dates::{normalize_date, parse_bill_date};
use crate::models::Bill;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"₹1,234,567.89"` with `symbol = "₹"`
pub(crate) fn format_amount(val: Decimal, symbol: &str) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Format a bill's raw amount text, or show it verbatim when it does not parse.
pub(crate) fn format_bill_amount(bill: &Bill, symbol: &str) -> String {
    match bill.parsed_amount() {
        Some(amount) => format_amount(amount, symbol),
        None => format!("{} (invalid)", bill.amount),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Points for the spending-over-time chart: bills ordered by date, one
/// `(x, amount)` point each, plus the `MM-DD-YYYY` label for every point.
/// Bills with unparseable dates go last in their original order; bills with
/// malformed amounts are left out.
pub(crate) fn spending_series(bills: &[&Bill]) -> (Vec<(f64, f64)>, Vec<String>) {
    let mut dated: Vec<&Bill> = bills.to_vec();
    // Stable sort; `None` dates compare greater than any date.
    dated.sort_by_key(|b| {
        let date = parse_bill_date(&b.date);
        (date.is_none(), date)
    });

    let mut points = Vec::new();
    let mut labels = Vec::new();
    for bill in dated {
        let Some(amount) = bill.parsed_amount().and_then(|a| a.to_f64()) else {
            continue;
        };
        points.push((points.len() as f64, amount));
        labels.push(normalize_date(&bill.date));
    }
    (points, labels)
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Keep a cursor inside a list that may have shrunk.
pub(crate) fn clamp_cursor(index: &mut usize, scroll: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
    if *scroll > *index {
        *scroll = *index;
    }
}
