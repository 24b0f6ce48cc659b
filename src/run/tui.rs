use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::ui::app::{App, InputMode};
use crate::ui::commands;

pub(crate) fn as_tui(config: &Config) -> Result<()> {
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => app.category_index = 0,
        KeyCode::Char('G') => {
            app.category_index = app.plan.categories().len().saturating_sub(1);
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => app.adjust_selected(1),
        KeyCode::Char('-') | KeyCode::Left => app.adjust_selected(-1),
        KeyCode::Enter => {
            if let Some(cat) = app.selected_category() {
                app.command_input = format!("pct {} ", cat.id);
                app.input_mode = InputMode::Command;
            }
        }
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            if let Err(e) = commands::handle_command(&input, app) {
                app.set_status(format!("Error: {e}"));
            }
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
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crossterm::event::KeyEvent;
    use rust_decimal_macros::dec;
    use tripbudget::models::Currency;

    use super::*;

    fn test_app() -> App {
        App::new(&Config {
            total_budget: dec!(1000),
            duration: 7,
            currency: Currency::Usd,
            export_dir: std::env::temp_dir(),
        })
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = test_app();
        handle_normal_input(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
        )
        .unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = test_app();
        handle_normal_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE), &mut app)
            .unwrap();
        assert!(app.running);
    }
}
