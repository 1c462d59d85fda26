#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::config::Settings;
use crate::store::BillStore;

fn sample_app() -> App {
    let settings = Settings::default();
    App::new(BillStore::with_sample_bills(settings.monthly_budget), &settings)
}

// ── Registry ──────────────────────────────────────────────────

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("", ""), 0);
    assert_eq!(levenshtein("optimze", "optimize"), 1);
    assert_eq!(levenshtein("kitten", "sitting"), 3);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let mut app = sample_app();
    handle_command("optimze", &mut app);
    assert_eq!(
        app.status_message,
        "Unknown command: :optimze. Did you mean :optimize?"
    );
}

#[test]
fn test_navigation_commands() {
    let mut app = sample_app();
    handle_command("b", &mut app);
    assert_eq!(app.screen, Screen::Bills);
    handle_command("categories", &mut app);
    assert_eq!(app.screen, Screen::Categories);
    handle_command("d", &mut app);
    assert_eq!(app.screen, Screen::Dashboard);
    handle_command("help", &mut app);
    assert!(app.show_help);
    handle_command("q", &mut app);
    assert!(!app.running);
}

// ── Bill commands ─────────────────────────────────────────────

#[test]
fn test_add_command() {
    let mut app = sample_app();
    handle_command("add Netflix | Entertainment | 649 | 2024-03-05", &mut app);
    assert_eq!(app.store().len(), 8);
    assert_eq!(app.status_message, "Added bill: Netflix");
    let added = *app.store().filtered_bills().last().unwrap();
    assert_eq!(added.date, "03-05-2024");
    assert_eq!(added.amount, "649");
}

#[test]
fn test_add_command_rejects_bad_form() {
    let mut app = sample_app();
    handle_command("add Netflix | Entertainment | lots", &mut app);
    assert_eq!(app.store().len(), 7);
    assert!(app.status_message.starts_with("Error: Invalid amount"));
}

#[test]
fn test_add_without_args_shows_usage() {
    let mut app = sample_app();
    handle_command("add", &mut app);
    assert_eq!(app.store().len(), 7);
    assert!(app.status_message.starts_with("Usage: :add"));
}

#[test]
fn test_edit_command() {
    let mut app = sample_app();
    handle_command("edit 3 Amazon | shopping | 2100 | 01-07-2020", &mut app);
    assert_eq!(app.store().get(3).unwrap().amount, "2100");
    assert_eq!(app.status_message, "Updated bill: Amazon");
}

#[test]
fn test_edit_unknown_id() {
    let mut app = sample_app();
    handle_command("edit 42 Ghost | misc | 1", &mut app);
    assert_eq!(app.status_message, "No bill with id 42");
}

#[test]
fn test_delete_command_asks_for_confirmation() {
    let mut app = sample_app();
    handle_command("delete 4", &mut app);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(
        app.pending_action,
        Some(PendingAction::DeleteBill {
            id: 4,
            description: "House rent".into()
        })
    );
    assert_eq!(app.store().len(), 7);
}

#[test]
fn test_delete_command_bad_id() {
    let mut app = sample_app();
    handle_command("delete four", &mut app);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.status_message.starts_with("Error: Invalid bill id"));
}

// ── Filter / budget ───────────────────────────────────────────

#[test]
fn test_filter_command() {
    let mut app = sample_app();
    handle_command("filter Personal Care", &mut app);
    assert_eq!(app.store().selected_category(), Some("Personal Care"));
    assert_eq!(app.screen, Screen::Bills);

    handle_command("filter", &mut app);
    assert_eq!(app.store().selected_category(), None);
}

#[test]
fn test_filter_unknown_category() {
    let mut app = sample_app();
    handle_command("filter Groceries", &mut app);
    assert_eq!(app.store().selected_category(), None);
    assert!(app.status_message.starts_with("Unknown category 'Groceries'"));
}

#[test]
fn test_budget_command_accepts_currency_symbol() {
    let mut app = sample_app();
    handle_command("budget ₹1200.50", &mut app);
    assert_eq!(app.store().monthly_budget(), dec!(1200.50));
}

#[test]
fn test_budget_command_invalid() {
    let mut app = sample_app();
    handle_command("budget plenty", &mut app);
    assert_eq!(app.store().monthly_budget(), dec!(50000));
    assert!(app.status_message.starts_with("Error: Invalid amount"));
}

#[test]
fn test_optimize_and_clear_commands() {
    let mut app = sample_app();
    handle_command("budget 3000", &mut app);
    handle_command("o", &mut app);
    assert_eq!(app.selection().unwrap().ids(), vec![6, 1, 2]);
    handle_command("clear", &mut app);
    assert!(app.selection().is_none());
}

#[test]
fn test_theme_command() {
    let mut app = sample_app();
    handle_command("theme", &mut app);
    assert!(!app.dark_mode);
}
