use rust_decimal::Decimal;

use crate::config::Settings;
use crate::models::{Bill, BillDraft};
use crate::selector::{select_within_budget, Selection, SelectionCache};
use crate::store::BillStore;
use crate::ui::theme::Palette;
use crate::ui::util::{clamp_cursor, format_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Bills,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Bills, Self::Categories]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Bills => write!(f, "Bills"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteBill { id: i64, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) dark_mode: bool,
    pub(crate) currency_symbol: String,

    // Owned bill data; mutations go through the methods below so the
    // selection is cleared whenever it could go stale.
    store: BillStore,
    selection: SelectionCache,

    // Bills table
    pub(crate) bill_index: usize,
    pub(crate) bill_scroll: usize,

    // Categories list; row 0 is "All categories"
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(store: BillStore, settings: &Settings) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            dark_mode: settings.dark_mode,
            currency_symbol: settings.currency_symbol.clone(),

            store,
            selection: SelectionCache::default(),

            bill_index: 0,
            bill_scroll: 0,

            category_index: 0,
            category_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn store(&self) -> &BillStore {
        &self.store
    }

    pub(crate) fn palette(&self) -> &'static Palette {
        Palette::for_mode(self.dark_mode)
    }

    pub(crate) fn money(&self, amount: Decimal) -> String {
        format_amount(amount, &self.currency_symbol)
    }

    /// Bills shown in the table, honoring the category filter.
    pub(crate) fn visible_bills(&self) -> Vec<&Bill> {
        self.store.filtered_bills()
    }

    /// Bill under the table cursor.
    pub(crate) fn cursor_bill(&self) -> Option<&Bill> {
        self.visible_bills().get(self.bill_index).copied()
    }

    /// Category filter behind a Categories row. Row 0 clears the filter.
    pub(crate) fn category_at(&self, row: usize) -> Option<&str> {
        row.checked_sub(1)
            .and_then(|i| self.store.categories().get(i).copied())
    }

    pub(crate) fn category_rows(&self) -> usize {
        self.store.categories().len() + 1
    }

    /// Rows of the table body that fit on screen.
    pub(crate) fn page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn selection(&self) -> Option<&Selection> {
        self.selection.current()
    }

    pub(crate) fn is_selected(&self, id: i64) -> bool {
        self.selection.is_selected(id)
    }

    // ── Mutations ────────────────────────────────────────────

    pub(crate) fn add_bill(&mut self, draft: BillDraft) -> i64 {
        let id = self.store.add_bill(draft);
        self.invalidate();
        id
    }

    pub(crate) fn edit_bill(&mut self, id: i64, draft: BillDraft) -> bool {
        let edited = self.store.edit_bill(id, draft);
        if edited {
            self.invalidate();
        }
        edited
    }

    pub(crate) fn remove_bill(&mut self, id: i64) -> bool {
        let removed = self.store.remove_bill(id);
        if removed {
            self.invalidate();
        }
        removed
    }

    pub(crate) fn set_category_filter(&mut self, category: Option<String>) {
        tracing::debug!(?category, "category filter changed");
        self.store.set_selected_category(category);
        self.bill_index = 0;
        self.bill_scroll = 0;
        self.invalidate();
    }

    pub(crate) fn set_monthly_budget(&mut self, budget: Decimal) {
        self.store.set_monthly_budget(budget);
        self.invalidate();
    }

    /// Run the optimizer over the visible bills against the monthly budget
    /// and keep the result for highlighting.
    pub(crate) fn calculate_optimal_bills(&mut self) {
        let bills: Vec<Bill> = self.visible_bills().into_iter().cloned().collect();
        let budget = self.store.monthly_budget();
        let selection = select_within_budget(&bills, budget);

        tracing::info!(
            considered = bills.len(),
            selected = selection.len(),
            rejected_malformed = selection.rejected_malformed,
            total = %selection.total,
            %budget,
            "optimal bills calculated"
        );
        tracing::debug!(ids = ?selection.ids(), "selected bill ids");

        let mut msg = format!(
            "Selected {} of {} bills: {} of {} ({} left)",
            selection.len(),
            bills.len(),
            self.money(selection.total),
            self.money(budget),
            self.money(selection.remaining(budget)),
        );
        if selection.rejected_malformed > 0 {
            msg.push_str(&format!(
                ". Skipped {} with invalid amounts",
                selection.rejected_malformed
            ));
        }
        self.selection.store(selection);
        self.set_status(msg);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        let name = if self.dark_mode { "dark" } else { "light" };
        self.set_status(format!("Theme: {name}"));
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// The displayed selection is stale once bills, filter or budget change.
    fn invalidate(&mut self) {
        self.selection.clear();
        let len = self.visible_bills().len();
        clamp_cursor(&mut self.bill_index, &mut self.bill_scroll, len);
        let rows = self.category_rows();
        clamp_cursor(&mut self.category_index, &mut self.category_scroll, rows);
    }
}
