#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn draft(description: &str, category: &str, amount: &str) -> BillDraft {
    BillDraft {
        description: description.into(),
        category: category.into(),
        amount: amount.into(),
        date: "02-01-2020".into(),
    }
}

// ── Seed data ─────────────────────────────────────────────────

#[test]
fn test_sample_bills_seeded() {
    let store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    assert_eq!(store.len(), 7);
    assert_eq!(store.monthly_budget(), dec!(50000));
    assert!(store.selected_category().is_none());
    assert_eq!(store.get(6).unwrap().description, "Laundry");
}

#[test]
fn test_sample_total() {
    let store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    assert_eq!(store.total_amount(), dec!(44810));
}

// ── Add / edit / remove ───────────────────────────────────────

#[test]
fn test_add_assigns_fresh_id() {
    let mut store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    let id = store.add_bill(draft("Netflix", "Entertainment", "649"));
    assert!(id > 7);
    assert_eq!(store.len(), 8);
    assert_eq!(store.filtered_bills().last().unwrap().id, id);
}

#[test]
fn test_add_ids_unique_within_same_millisecond() {
    let mut store = BillStore::new(Vec::new(), dec!(100));
    let a = store.next_id(1_700_000_000_000);
    let b = store.next_id(1_700_000_000_000);
    let c = store.next_id(1_699_999_999_999);
    assert_eq!(a, 1_700_000_000_000);
    assert_eq!(b, a + 1);
    assert_eq!(c, b + 1);
}

#[test]
fn test_many_adds_never_collide() {
    let mut store = BillStore::new(Vec::new(), dec!(100));
    let ids: Vec<i64> = (0..50).map(|_| store.add_bill(draft("x", "y", "1"))).collect();
    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[test]
fn test_ids_continue_after_loaded_bills() {
    let loaded = vec![Bill::new(i64::MAX - 1, draft("a", "b", "1"))];
    let mut store = BillStore::new(loaded, dec!(100));
    assert_eq!(store.next_id(5), i64::MAX);
}

#[test]
fn test_add_after_max_id_reuses_free_id() {
    let loaded = vec![
        Bill::new(i64::MAX, draft("a", "b", "1")),
        Bill::new(1, draft("c", "d", "2")),
    ];
    let mut store = BillStore::new(loaded, dec!(100));

    let first = store.add_bill(draft("Netflix", "Entertainment", "649"));
    let second = store.add_bill(draft("Spotify", "Entertainment", "119"));
    assert_eq!(first, 2);
    assert_eq!(second, 3);

    let mut ids: Vec<i64> = store.filtered_bills().iter().map(|b| b.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), store.len());

    assert!(store.remove_bill(first));
    assert_eq!(store.get(i64::MAX).unwrap().description, "a");
}

#[test]
fn test_edit_in_place() {
    let mut store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    assert!(store.edit_bill(2, draft("Car wash deluxe", "utility", "650")));
    let bill = store.get(2).unwrap();
    assert_eq!(bill.description, "Car wash deluxe");
    assert_eq!(bill.amount, "650");
    // Position is preserved
    assert_eq!(store.filtered_bills()[1].id, 2);
    assert_eq!(store.len(), 7);
}

#[test]
fn test_edit_unknown_is_noop() {
    let mut store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    let before: Vec<Bill> = store.filtered_bills().into_iter().cloned().collect();
    assert!(!store.edit_bill(999, draft("x", "y", "1")));
    let after: Vec<Bill> = store.filtered_bills().into_iter().cloned().collect();
    assert_eq!(after, before);
}

#[test]
fn test_remove() {
    let mut store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    assert!(store.remove_bill(4));
    assert!(store.get(4).is_none());
    assert_eq!(store.len(), 6);
    assert!(!store.remove_bill(4));
}

// ── Categories and filtering ──────────────────────────────────

#[test]
fn test_categories_first_appearance_order() {
    let store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    assert_eq!(
        store.categories(),
        [
            "FoodNDining",
            "utility",
            "shopping",
            "Food & Dining",
            "education",
            "Personal Care",
            "Travel"
        ]
    );
}

#[test]
fn test_categories_are_case_sensitive() {
    let mut store = BillStore::new(Vec::new(), dec!(100));
    store.add_bill(draft("a", "Food", "1"));
    store.add_bill(draft("b", "food", "1"));
    store.add_bill(draft("c", "Food", "1"));
    assert_eq!(store.categories(), ["Food", "food"]);
}

#[test]
fn test_filter_exact_match() {
    let mut store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    store.set_selected_category(Some("utility".into()));
    let ids: Vec<i64> = store.filtered_bills().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2]);
    assert_eq!(store.total_amount(), dec!(500));

    store.set_selected_category(Some("Utility".into()));
    assert!(store.filtered_bills().is_empty());
    assert_eq!(store.total_amount(), Decimal::ZERO);
}

#[test]
fn test_clear_filter() {
    let mut store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    store.set_selected_category(Some("Travel".into()));
    store.set_selected_category(None);
    assert_eq!(store.filtered_bills().len(), 7);
}

#[test]
fn test_filter_survives_removing_last_bill() {
    let mut store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    store.set_selected_category(Some("Travel".into()));
    store.remove_bill(7);
    assert_eq!(store.selected_category(), Some("Travel"));
    assert!(store.filtered_bills().is_empty());
    assert!(!store.categories().contains(&"Travel"));
}

#[test]
fn test_total_skips_malformed() {
    let mut store = BillStore::new(Vec::new(), dec!(100));
    store.add_bill(draft("a", "x", "10"));
    store.add_bill(draft("b", "x", "oops"));
    store.add_bill(draft("c", "x", "2.5"));
    assert_eq!(store.total_amount(), dec!(12.5));
}

#[test]
fn test_category_totals() {
    let mut store = BillStore::new(Vec::new(), dec!(100));
    store.add_bill(draft("a", "Food", "10"));
    store.add_bill(draft("b", "Rent", "500"));
    store.add_bill(draft("c", "Food", "5.5"));
    assert_eq!(
        store.category_totals(),
        vec![
            ("Food".to_string(), 2, dec!(15.5)),
            ("Rent".to_string(), 1, dec!(500)),
        ]
    );
}

#[test]
fn test_set_budget() {
    let mut store = BillStore::with_sample_bills(DEFAULT_MONTHLY_BUDGET);
    store.set_monthly_budget(dec!(1000));
    assert_eq!(store.monthly_budget(), dec!(1000));
}
