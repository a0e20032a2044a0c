mod app;
mod ui;

use anyhow::Result;
use app::{App, Mode};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crate::client::SortKey;
use crate::query::Operator;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

pub fn run(base: String, initial_query: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal to prevent any artifacts from previous content
    terminal.clear()?;

    let mut app = App::new(base, initial_query);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        // Check for background lookup completion (non-blocking)
        app.poll_fetch();

        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for events with timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            // Only handle key press events, not release or repeat
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global keybindings
                match (key.modifiers, key.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),
                    (KeyModifiers::CONTROL, KeyCode::Char('q')) => return Ok(()),
                    _ => {}
                }

                match app.mode {
                    Mode::Help => {
                        // Any key closes help
                        app.hide_help();
                    }
                    Mode::Edit => {
                        if handle_edit_key(app, key.modifiers, key.code) {
                            return Ok(());
                        }
                    }
                    Mode::Results => handle_results_key(app, key.modifiers, key.code),
                }
            }
        }
    }
}

/// Handle a key in edit mode. Returns true when the app should quit.
fn handle_edit_key(app: &mut App, modifiers: KeyModifiers, code: KeyCode) -> bool {
    match (modifiers, code) {
        // Operator keys: append the literal token, space-joined
        (KeyModifiers::ALT, KeyCode::Char('a')) => app.append_operator(Operator::And.as_str()),
        (KeyModifiers::ALT, KeyCode::Char('o')) => app.append_operator(Operator::Or.as_str()),
        (KeyModifiers::ALT, KeyCode::Char('n')) => app.append_operator(Operator::Not.as_str()),
        (KeyModifiers::ALT, KeyCode::Char('9')) => app.append_operator(Operator::OpenParen.as_str()),
        (KeyModifiers::ALT, KeyCode::Char('0')) => app.append_operator(Operator::CloseParen.as_str()),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => app.reset(),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.editor.delete_word(),
        // Ctrl+h - backspace (terminal standard)
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.editor.pop(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc => {
                if app.chip_cursor.is_some() {
                    app.chip_cursor = None;
                } else if app.editor.is_empty() {
                    return true;
                } else {
                    app.reset();
                }
            }
            KeyCode::Enter => app.commit_input(),
            KeyCode::Tab => app.chip_next(),
            KeyCode::BackTab => app.chip_prev(),
            KeyCode::Delete => app.remove_selected_chip(),
            KeyCode::Down => {
                if !app.rows.is_empty() {
                    app.mode = Mode::Results;
                }
            }
            KeyCode::Backspace => app.editor.pop(),
            KeyCode::F(1) => app.show_help(),
            KeyCode::Char(c) => {
                app.chip_cursor = None;
                app.editor.push(c);
            }
            _ => {}
        },
        _ => {}
    }
    false
}

fn handle_results_key(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc | KeyCode::Char('q') => app.mode = Mode::Edit,
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Left | KeyCode::Char('h') => app.page_prev(),
            KeyCode::Right | KeyCode::Char('l') => app.page_next(),
            KeyCode::Home => app.page_first(),
            KeyCode::End => app.page_last(),
            KeyCode::Char('s') => app.cycle_sort_key(),
            KeyCode::Char('r') => app.toggle_sort_dir(),
            KeyCode::Char('y') => app.set_sort(SortKey::Year),
            KeyCode::Char('t') => app.set_sort(SortKey::Title),
            KeyCode::Enter | KeyCode::Char('o') => app.open_selected(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            _ => {}
        },
        _ => {}
    }
}
