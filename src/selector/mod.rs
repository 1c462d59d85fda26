//! Budget-constrained bill selection.
//!
//! Bills are taken cheapest first and kept while the running total stays
//! within the budget. This maximizes the *count* of bills greedily; it is not
//! a maximum-value knapsack and a different combination may spend closer to
//! the budget.

use rust_decimal::Decimal;

use crate::models::Bill;

/// Bills chosen by [`select_within_budget`], in the ascending-amount order
/// they were considered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) bills: Vec<Bill>,
    pub(crate) total: Decimal,
    /// Bills excluded because their amount text was not a usable number.
    pub(crate) rejected_malformed: usize,
}

impl Selection {
    pub(crate) fn len(&self) -> usize {
        self.bills.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    pub(crate) fn contains(&self, id: i64) -> bool {
        self.bills.iter().any(|b| b.id == id)
    }

    pub(crate) fn ids(&self) -> Vec<i64> {
        self.bills.iter().map(|b| b.id).collect()
    }

    /// Budget left over after paying every selected bill.
    pub(crate) fn remaining(&self, budget: Decimal) -> Decimal {
        budget - self.total
    }
}

pub(crate) fn select_within_budget(bills: &[Bill], budget: Decimal) -> Selection {
    let mut selection = Selection::default();

    let mut candidates: Vec<(Decimal, &Bill)> = Vec::with_capacity(bills.len());
    for bill in bills {
        match bill.parsed_amount() {
            Some(amount) => candidates.push((amount, bill)),
            None => selection.rejected_malformed += 1,
        }
    }

    if budget <= Decimal::ZERO {
        return selection;
    }

    // Stable: equal amounts keep their input order.
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    // Scan every candidate instead of stopping at the first one that does not fit.
    for (amount, bill) in candidates {
        let Some(next) = selection.total.checked_add(amount) else {
            continue;
        };
        if next <= budget {
            selection.total = next;
            selection.bills.push(bill.clone());
        }
    }

    selection
}

/// Last computed selection. The owner clears it whenever the bill list,
/// the category filter or the budget changes.
#[derive(Debug, Default)]
pub(crate) struct SelectionCache {
    current: Option<Selection>,
}

impl SelectionCache {
    pub(crate) fn store(&mut self, selection: Selection) {
        self.current = Some(selection);
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
    }

    pub(crate) fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub(crate) fn is_selected(&self, id: i64) -> bool {
        self.current.as_ref().is_some_and(|s| s.contains(id))
    }
}
