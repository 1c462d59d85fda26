use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::models::{Bill, BillDraft};

pub(crate) const DEFAULT_MONTHLY_BUDGET: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

/// In-memory owner of the bill list, the active category filter and the
/// monthly budget.
#[derive(Debug, Clone)]
pub(crate) struct BillStore {
    bills: Vec<Bill>,
    selected_category: Option<String>,
    monthly_budget: Decimal,
    last_id: i64,
}

impl BillStore {
    pub(crate) fn new(bills: Vec<Bill>, monthly_budget: Decimal) -> Self {
        let last_id = bills.iter().map(|b| b.id).max().unwrap_or(0);
        Self {
            bills,
            selected_category: None,
            monthly_budget,
            last_id,
        }
    }

    /// Store seeded with the demo bills shown on first launch.
    pub(crate) fn with_sample_bills(monthly_budget: Decimal) -> Self {
        Self::new(sample_bills(), monthly_budget)
    }

    pub(crate) fn len(&self) -> usize {
        self.bills.len()
    }

    pub(crate) fn get(&self, id: i64) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    /// Append a new bill and return its id.
    pub(crate) fn add_bill(&mut self, draft: BillDraft) -> i64 {
        let id = self.next_id(chrono::Utc::now().timestamp_millis());
        tracing::info!(id, description = %draft.description, "bill added");
        self.bills.push(Bill::new(id, draft));
        id
    }

    /// Overwrite a bill in place. Returns false when no bill has `id`.
    pub(crate) fn edit_bill(&mut self, id: i64, draft: BillDraft) -> bool {
        match self.bills.iter_mut().find(|b| b.id == id) {
            Some(bill) => {
                bill.apply(draft);
                tracing::info!(id, "bill edited");
                true
            }
            None => {
                tracing::warn!(id, "edit of unknown bill ignored");
                false
            }
        }
    }

    pub(crate) fn remove_bill(&mut self, id: i64) -> bool {
        let Some(pos) = self.bills.iter().position(|b| b.id == id) else {
            tracing::warn!(id, "remove of unknown bill ignored");
            return false;
        };
        let bill = self.bills.remove(pos);
        tracing::info!(id, %bill, "bill removed");
        true
    }

    pub(crate) fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub(crate) fn set_selected_category(&mut self, category: Option<String>) {
        self.selected_category = category;
    }

    pub(crate) fn monthly_budget(&self) -> Decimal {
        self.monthly_budget
    }

    pub(crate) fn set_monthly_budget(&mut self, budget: Decimal) {
        self.monthly_budget = budget;
    }

    /// Distinct categories in order of first appearance. Raw strings are
    /// compared as-is, so "Food" and "food" are different categories.
    pub(crate) fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for bill in &self.bills {
            if !seen.contains(&bill.category.as_str()) {
                seen.push(&bill.category);
            }
        }
        seen
    }

    /// Bills in the active category, or every bill when no filter is set.
    pub(crate) fn filtered_bills(&self) -> Vec<&Bill> {
        match &self.selected_category {
            Some(cat) => self.bills.iter().filter(|b| &b.category == cat).collect(),
            None => self.bills.iter().collect(),
        }
    }

    /// Sum of the filtered bills whose amount parses.
    pub(crate) fn total_amount(&self) -> Decimal {
        self.filtered_bills()
            .iter()
            .filter_map(|b| b.parsed_amount())
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// (category, bill count, total) for every category.
    pub(crate) fn category_totals(&self) -> Vec<(String, usize, Decimal)> {
        self.categories()
            .into_iter()
            .map(|cat| {
                let in_cat = self.bills.iter().filter(|b| b.category == cat);
                let (count, total) = in_cat.fold((0, Decimal::ZERO), |(n, sum), b| {
                    let amount = b.parsed_amount().unwrap_or(Decimal::ZERO);
                    (n + 1, sum.saturating_add(amount))
                });
                (cat.to_string(), count, total)
            })
            .collect()
    }

    /// Millisecond timestamp ids, bumped past the last issued id so that
    /// two bills created within the same millisecond stay unique. Once
    /// `i64::MAX` is taken, the smallest unused positive id is reused.
    fn next_id(&mut self, now_millis: i64) -> i64 {
        let id = match self.last_id.checked_add(1) {
            Some(bumped) => now_millis.max(bumped),
            None => self.smallest_free_id(),
        };
        self.last_id = self.last_id.max(id);
        id
    }

    fn smallest_free_id(&self) -> i64 {
        let taken: HashSet<i64> = self.bills.iter().map(|b| b.id).collect();
        (1..=i64::MAX)
            .find(|id| !taken.contains(id))
            .unwrap_or(i64::MIN)
    }
}

fn sample_bills() -> Vec<Bill> {
    let seed = [
        (1, "Dominoes", "FoodNDining", "430", "01-02-2020"),
        (2, "Car wash", "utility", "500", "01-06-2020"),
        (3, "Amazon", "shopping", "2030", "01-07-2020"),
        (4, "House rent", "Food & Dining", "35900", "01-03-2020"),
        (5, "Tuition", "education", "2200", "01-12-2020"),
        (6, "Laundry", "Personal Care", "320", "01-14-2020"),
        (7, "Vacation", "Travel", "3430", "01-18-2020"),
    ];
    seed.into_iter()
        .map(|(id, description, category, amount, date)| Bill {
            id,
            description: description.into(),
            category: category.into(),
            amount: amount.into(),
            date: date.into(),
        })
        .collect()
}

#[cfg(test)]
mod tests;
