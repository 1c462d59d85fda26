use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::dates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub id: i64,
    pub description: String,
    pub category: String,
    /// Amount exactly as entered; see [`Bill::parsed_amount`].
    pub amount: String,
    /// Format: "MM-DD-YYYY"
    pub date: String,
}

impl Bill {
    pub fn new(id: i64, draft: BillDraft) -> Self {
        Self {
            id,
            description: draft.description,
            category: draft.category,
            amount: draft.amount,
            date: draft.date,
        }
    }

    /// The amount as a non-negative decimal, or `None` when the stored text
    /// is not a usable amount.
    pub fn parsed_amount(&self) -> Option<Decimal> {
        parse_amount(&self.amount)
    }

    /// Overwrite every field except `id`.
    pub fn apply(&mut self, draft: BillDraft) {
        self.description = draft.description;
        self.category = draft.category;
        self.amount = draft.amount;
        self.date = draft.date;
    }
}

/// Parse amount text. Accepts plain decimals and scientific notation;
/// rejects empty text, garbage and negative values.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;
    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }
    Some(value)
}

/// A bill without an id, as produced by the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillDraft {
    pub description: String,
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl BillDraft {
    /// Parse the command-bar form `description | category | amount | date`.
    /// The date may be omitted, in which case today's date is used.
    pub fn parse_form(input: &str) -> Result<Self> {
        let fields: Vec<&str> = input.split('|').map(str::trim).collect();
        if fields.len() < 3 || fields.len() > 4 {
            anyhow::bail!("Expected: description | category | amount [| date]");
        }

        let description = fields[0];
        let category = fields[1];
        let amount = fields[2];
        if description.is_empty() {
            anyhow::bail!("Description is required");
        }
        if category.is_empty() {
            anyhow::bail!("Category is required");
        }
        if parse_amount(amount).is_none() {
            anyhow::bail!("Invalid amount: '{amount}'");
        }

        let date = match fields.get(3).filter(|d| !d.is_empty()) {
            Some(raw) => {
                let normalized = dates::normalize_date(raw);
                dates::parse_bill_date(&normalized)
                    .with_context(|| format!("Invalid date: '{raw}' (use MM-DD-YYYY)"))?;
                normalized
            }
            None => dates::today(),
        };

        Ok(Self {
            description: description.to_string(),
            category: category.to_string(),
            amount: amount.to_string(),
            date,
        })
    }

    /// Render back into the form syntax accepted by [`BillDraft::parse_form`].
    pub fn to_form(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.description, self.category, self.amount, self.date
        )
    }
}

impl From<&Bill> for BillDraft {
    fn from(bill: &Bill) -> Self {
        Self {
            description: bill.description.clone(),
            category: bill.category.clone(),
            amount: bill.amount.clone(),
            date: bill.date.clone(),
        }
    }
}

impl std::fmt::Display for Bill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.amount)
    }
}
