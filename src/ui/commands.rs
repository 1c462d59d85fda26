use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::models::BillDraft;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("b", "Go to Bills", cmd_bills, r);
    register_command!("bills", "Go to Bills", cmd_bills, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add bill (e.g. :add Netflix | Entertainment | 649 | 03-05-2024)",
        cmd_add,
        r
    );
    register_command!(
        "edit",
        "Edit bill (e.g. :edit 3 Amazon | shopping | 2100 | 01-07-2020)",
        cmd_edit,
        r
    );
    register_command!(
        "delete",
        "Delete selected bill (or :delete <id>)",
        cmd_delete,
        r
    );
    register_command!(
        "filter",
        "Filter by category (e.g. :filter Travel; no argument shows all)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter by category", cmd_filter, r);
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 1000)",
        cmd_budget,
        r
    );
    register_command!(
        "optimize",
        "Calculate optimal bills within the monthly budget",
        cmd_optimize,
        r
    );
    register_command!("o", "Calculate optimal bills", cmd_optimize, r);
    register_command!("clear", "Clear the optimal bill selection", cmd_clear, r);
    register_command!("theme", "Toggle dark/light theme", cmd_theme, r);

    r
});

/// Run a command-bar line. Failures are reported in the status bar.
pub(crate) fn handle_command(input: &str, app: &mut App) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app) {
            tracing::warn!(command = cmd_name, error = %e, "command failed");
            app.set_status(format!("Error: {e}"));
        }
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_bills(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Bills;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <description> | <category> | <amount> [| <MM-DD-YYYY>]");
        return Ok(());
    }

    let draft = BillDraft::parse_form(args)?;
    let description = draft.description.clone();
    app.add_bill(draft);
    app.set_status(format!("Added bill: {description}"));
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App) -> anyhow::Result<()> {
    let (id_str, form) = args.split_once(' ').unwrap_or((args, ""));
    let Ok(id) = id_str.parse::<i64>() else {
        app.set_status("Usage: :edit <id> <description> | <category> | <amount> | <date>");
        return Ok(());
    };

    if app.store().get(id).is_none() {
        app.set_status(format!("No bill with id {id}"));
        return Ok(());
    }

    let draft = BillDraft::parse_form(form)?;
    let description = draft.description.clone();
    app.edit_bill(id, draft);
    app.set_status(format!("Updated bill: {description}"));
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App) -> anyhow::Result<()> {
    let target = if args.is_empty() {
        app.cursor_bill()
    } else {
        let id: i64 = args
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid bill id: {args}"))?;
        app.store().get(id)
    };

    let Some(bill) = target else {
        app.set_status("Select a bill on the Bills screen first");
        return Ok(());
    };

    let (id, description) = (bill.id, bill.description.clone());
    app.confirm_message = format!("Delete '{description}'?");
    app.pending_action = Some(PendingAction::DeleteBill { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_category_filter(None);
        app.set_status("Showing all categories");
        return Ok(());
    }

    if !app.store().categories().contains(&args) {
        let known = app.store().categories().join(", ");
        app.set_status(format!("Unknown category '{args}'. Categories: {known}"));
        return Ok(());
    }

    app.set_category_filter(Some(args.to_string()));
    app.screen = Screen::Bills;
    app.set_status(format!("Filtered by category: {args}"));
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        let current = app.money(app.store().monthly_budget());
        app.set_status(format!("Monthly budget: {current}. Usage: :budget <amount>"));
        return Ok(());
    }

    let amount = Decimal::from_str(args.trim_start_matches(&app.currency_symbol[..]).trim())
        .map_err(|_| anyhow::anyhow!("Invalid amount: {args}"))?;
    app.set_monthly_budget(amount);
    app.set_status(format!("Monthly budget set to {}", app.money(amount)));
    Ok(())
}

fn cmd_optimize(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.calculate_optimal_bills();
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.clear_selection();
    app.set_status("Selection cleared");
    Ok(())
}

fn cmd_theme(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.toggle_theme();
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
