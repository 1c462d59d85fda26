use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Settings;
use crate::models::BillDraft;
use crate::store::BillStore;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: BillStore, settings: &Settings) -> Result<()> {
    tracing::info!(bills = store.len(), "starting tui");
    let mut app = App::new(store, settings);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Everything except the tab, status and command bars
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            handle_key(key, app);
        }
    }
    Ok(())
}

fn handle_key(key: KeyEvent, app: &mut App) {
    if app.show_help {
        app.show_help = false;
        return;
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app),
        InputMode::Command => handle_command_input(key, app),
        InputMode::Confirm => handle_confirm_input(key, app),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => switch_screen(app, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, Screen::Bills),
        KeyCode::Char('3') => switch_screen(app, Screen::Categories),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('o') => app.calculate_optimal_bills(),
        KeyCode::Char('x') => {
            app.clear_selection();
            app.set_status("Selection cleared");
        }
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('e') if app.screen == Screen::Bills => {
            if let Some(bill) = app.cursor_bill() {
                let prefill = format!("edit {} {}", bill.id, BillDraft::from(bill).to_form());
                app.command_input = prefill;
                app.input_mode = InputMode::Command;
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Bills => {
            commands::handle_command("delete", app);
        }
        KeyCode::Enter if app.screen == Screen::Categories => {
            let category = app.category_at(app.category_index).map(str::to_string);
            let label = category.clone().unwrap_or_else(|| "all categories".into());
            app.set_category_filter(category);
            app.screen = Screen::Bills;
            app.set_status(format!("Showing {label}"));
        }
        KeyCode::Char('a') if app.screen == Screen::Categories => {
            app.set_category_filter(None);
            app.set_status("Showing all categories");
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
}

fn handle_command_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteBill { id, description } => {
                        if app.remove_bill(id) {
                            app.set_status(format!("Deleted: {description}"));
                        } else {
                            app.set_status(format!("Bill already gone: {description}"));
                        }
                    }
                }
            }
        }
        _ => {
            app.pending_action = None;
            app.set_status("Cancelled");
        }
    }
    app.confirm_message.clear();
    app.input_mode = InputMode::Normal;
}

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    let page = app.page();
    match app.screen {
        Screen::Bills => {
            let len = app.visible_bills().len();
            scroll_down(&mut app.bill_index, &mut app.bill_scroll, len, page);
        }
        Screen::Categories => {
            let len = app.category_rows();
            scroll_down(&mut app.category_index, &mut app.category_scroll, len, page);
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Bills => scroll_up(&mut app.bill_index, &mut app.bill_scroll),
        Screen::Categories => scroll_up(&mut app.category_index, &mut app.category_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Bills => scroll_to_top(&mut app.bill_index, &mut app.bill_scroll),
        Screen::Categories => scroll_to_top(&mut app.category_index, &mut app.category_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.page();
    match app.screen {
        Screen::Bills => {
            let len = app.visible_bills().len();
            scroll_to_bottom(&mut app.bill_index, &mut app.bill_scroll, len, page);
        }
        Screen::Categories => {
            let len = app.category_rows();
            scroll_to_bottom(&mut app.category_index, &mut app.category_scroll, len, page);
        }
        Screen::Dashboard => {}
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), app);
    }

    fn sample_app() -> App {
        let settings = Settings::default();
        App::new(BillStore::with_sample_bills(settings.monthly_budget), &settings)
    }

    #[test]
    fn test_optimize_then_clear_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('o'));
        assert!(app.selection().is_some());
        press(&mut app, KeyCode::Char('x'));
        assert!(app.selection().is_none());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('D'));
        assert_eq!(app.input_mode, InputMode::Confirm);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store().len(), 7);

        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store().len(), 6);
        assert!(app.store().get(1).is_none());
    }

    #[test]
    fn test_edit_key_prefills_command_bar() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.input_mode, InputMode::Command);
        assert_eq!(
            app.command_input,
            "edit 2 Car wash | utility | 500 | 01-06-2020"
        );
    }

    #[test]
    fn test_category_enter_applies_filter() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store().selected_category(), Some("FoodNDining"));
        assert_eq!(app.screen, Screen::Bills);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.store().selected_category(), None);
    }

    #[test]
    fn test_command_mode_round_trip() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char(':'));
        for c in "budget 1000".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store().monthly_budget(), rust_decimal::Decimal::from(1000));
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('o'));
        assert!(!app.show_help);
        assert!(app.selection().is_none());
    }
}
