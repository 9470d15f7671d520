use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tracing::{debug, info};

use crate::tui::{
    session::{Action, ChatSession, Outcome},
    theme::ThemeMode,
    ui::{render_view, HitMap},
    view::compose,
};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// How long to wait for input before checking the stores again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Map a key press to a session action
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('f') if ctrl => Some(Action::ToggleSearch),
        KeyCode::Char('t') if ctrl => Some(Action::ToggleTheme),
        KeyCode::Char('u') if ctrl => Some(Action::EditDraft(String::new())),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Action::InsertChar(c)),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => Some(Action::Newline),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Run the TUI application
pub async fn run(theme: ThemeMode) -> Result<()> {
    install_panic_hook();

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = ChatSession::new(theme);
    info!(?theme, messages = session.chat().len(), "session started");

    let result = run_app(&mut terminal, &mut session).await;

    // Restore terminal
    restore()?;
    terminal.show_cursor()?;

    info!(messages = session.chat().len(), "session ended");
    result
}

fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Put the terminal back before the default hook prints the panic
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

fn draw(terminal: &mut Tui, session: &ChatSession) -> Result<HitMap> {
    let view = compose(session.chat(), session.ui());
    let mut hits = HitMap::default();
    terminal.draw(|f| hits = render_view(f, &view))?;
    Ok(hits)
}

/// Main application loop. Redraws only when a store reports a change.
async fn run_app(terminal: &mut Tui, session: &mut ChatSession) -> Result<()> {
    let mut watch = session.watch();
    let mut hits = draw(terminal, session)?;

    loop {
        if event::poll(POLL_INTERVAL)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => action_for_key(key),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    hits.action_at(mouse.column, mouse.row)
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    hits = draw(terminal, session)?;
                    None
                }
                _ => None,
            };

            if let Some(action) = action {
                if session.dispatch(action) == Outcome::Quit {
                    return Ok(());
                }
            }
        }

        if watch.changed() {
            hits = draw(terminal, session)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_typing_keys() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(Action::InsertChar('a'))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Action::InsertChar('A'))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Action::Backspace)
        );
    }

    #[test]
    fn test_enter_submits_alt_enter_breaks_line() {
        assert_eq!(
            action_for_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Submit)
        );
        assert_eq!(
            action_for_key(key(KeyCode::Enter, KeyModifiers::ALT)),
            Some(Action::Newline)
        );
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('f'), KeyModifiers::CONTROL)),
            Some(Action::ToggleSearch)
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('t'), KeyModifiers::CONTROL)),
            Some(Action::ToggleTheme)
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(Action::EditDraft(String::new()))
        );
        assert_eq!(action_for_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(
            action_for_key(key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(action_for_key(key(KeyCode::Tab, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_clicks_drive_the_session() -> Result<()> {
        let mut session = ChatSession::new(ThemeMode::Light);
        let view = compose(session.chat(), session.ui());
        let (_, hits) = crate::tui::ui::render_to_lines(&view, 80, 30)?;

        let search = hits.region_of(&Action::ToggleSearch).expect("search icon");
        if let Some(action) = hits.action_at(search.x + 1, search.y) {
            session.dispatch(action);
        }
        assert!(session.ui().search_visible);

        session.dispatch(Action::EditDraft("clicked".into()));
        let submit = hits.region_of(&Action::Submit).expect("submit button");
        if let Some(action) = hits.action_at(submit.x, submit.y) {
            session.dispatch(action);
        }
        assert_eq!(session.ui().draft, "");
        assert_eq!(session.chat().len(), 5);
        Ok(())
    }
}
