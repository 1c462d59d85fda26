use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use crate::dates::normalize_date;
use crate::models::Bill;

/// Column positions of the bill fields within a CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvLayout {
    pub(crate) id_column: Option<usize>,
    pub(crate) description_column: usize,
    pub(crate) category_column: usize,
    pub(crate) amount_column: usize,
    pub(crate) date_column: usize,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            id_column: None,
            description_column: 0,
            category_column: 1,
            amount_column: 2,
            date_column: 3,
        }
    }
}

impl CsvLayout {
    /// Map columns by header name. Returns `None` unless description,
    /// category, amount and date are all present.
    pub(crate) fn from_headers(headers: &[String]) -> Option<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };

        Some(Self {
            id_column: find(&["id"]),
            description_column: find(&["description", "desc", "name"])?,
            category_column: find(&["category", "cat"])?,
            amount_column: find(&["amount", "amt"])?,
            date_column: find(&["date", "due", "due date"])?,
        })
    }
}

pub(crate) struct BillCsv;

impl BillCsv {
    /// Read bills from a CSV file. Amounts are kept as written so that bad
    /// values surface as malformed bills rather than load failures.
    pub(crate) fn load(path: &Path) -> Result<Vec<Bill>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if rows.is_empty() {
            anyhow::bail!("CSV file is empty: {}", path.display());
        }

        let layout = match CsvLayout::from_headers(&rows[0]) {
            Some(layout) => {
                rows.remove(0);
                layout
            }
            None => CsvLayout::default(),
        };

        let bills = Self::parse(&rows, &layout)?;
        tracing::info!(path = %path.display(), count = bills.len(), "loaded bills from CSV");
        Ok(bills)
    }

    /// Build bills from raw rows. Blank rows are skipped; rows without an id
    /// column get sequential ids starting at 1.
    pub(crate) fn parse(rows: &[Vec<String>], layout: &CsvLayout) -> Result<Vec<Bill>> {
        let mut bills = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut next_id: i64 = 1;

        for (i, row) in rows.iter().enumerate() {
            if row.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            // Category and amount cells are kept exactly as written.
            let raw = |col: usize| row.get(col).cloned().unwrap_or_default();
            let field = |col: usize| raw(col).trim().to_string();

            let id = match layout.id_column {
                Some(col) => {
                    let id_text = field(col);
                    id_text
                        .parse::<i64>()
                        .with_context(|| format!("Row {}: invalid id '{id_text}'", i + 1))?
                }
                None => {
                    let id = next_id;
                    next_id += 1;
                    id
                }
            };

            if !seen_ids.insert(id) {
                anyhow::bail!("Row {}: duplicate bill id {id}", i + 1);
            }

            let description = field(layout.description_column);
            if description.is_empty() {
                anyhow::bail!("Row {}: missing description", i + 1);
            }

            bills.push(Bill {
                id,
                description,
                category: raw(layout.category_column),
                amount: raw(layout.amount_column),
                date: normalize_date(&field(layout.date_column)),
            });
        }

        Ok(bills)
    }

    /// Write bills with a header row, in the column order `load` expects.
    pub(crate) fn write<W: Write>(writer: W, bills: &[Bill]) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["id", "description", "category", "amount", "date"])?;
        for bill in bills {
            wtr.write_record([
                bill.id.to_string().as_str(),
                bill.description.as_str(),
                bill.category.as_str(),
                bill.amount.as_str(),
                bill.date.as_str(),
            ])?;
        }
        wtr.flush().context("Failed to write CSV")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
