//! Terminal chat client.
//!
//! Owns one [`ChatSession`] for the lifetime of the process. Requests run on a
//! spawned task and report back over a channel so the screen keeps redrawing
//! (typing indicator) while a reply is pending.

pub mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::{settle_outcome, ChatSession, ChatTransport};
use crate::domain::ReplyOutcome;

type ChatTerminal = Terminal<CrosstermBackend<io::Stdout>>;

const TICK: Duration = Duration::from_millis(250);

/// Run the interactive client until the user quits.
pub async fn run(transport: Arc<dyn ChatTransport>) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, transport).await;
    restore_terminal(&mut terminal)?;
    result
}

fn init_terminal() -> Result<ChatTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut ChatTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

enum KeyAction {
    Quit,
    Submit,
    Edit,
    Ignore,
}

fn handle_key(session: &mut ChatSession, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Backspace => {
            session.pop_char();
            KeyAction::Edit
        }
        KeyCode::Char(c) => {
            session.push_char(c);
            KeyAction::Edit
        }
        _ => KeyAction::Ignore,
    }
}

async fn event_loop(terminal: &mut ChatTerminal, transport: Arc<dyn ChatTransport>) -> Result<()> {
    let mut session = ChatSession::new();
    let mut events = EventStream::new();
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<ReplyOutcome>(1);
    let mut ticker = tokio::time::interval(TICK);
    let mut tick: usize = 0;

    info!("Chat client started");

    loop {
        terminal.draw(|frame| view::render(frame, &session, tick))?;

        tokio::select! {
            _ = ticker.tick() => {
                tick = tick.wrapping_add(1);
            }
            Some(outcome) = outcome_rx.recv() => {
                session.resolve(&outcome);
            }
            event = events.next() => {
                let Some(event) = event else { break };
                let Event::Key(key) = event? else { continue };

                match handle_key(&mut session, key) {
                    KeyAction::Quit => break,
                    KeyAction::Submit => {
                        if let Some(text) = session.submit() {
                            let transport = Arc::clone(&transport);
                            let outcome_tx = outcome_tx.clone();
                            tokio::spawn(async move {
                                let outcome = settle_outcome(transport.send_message(&text).await);
                                // The receiver only goes away when the client is quitting.
                                let _ = outcome_tx.send(outcome).await;
                            });
                        }
                    }
                    KeyAction::Edit | KeyAction::Ignore => {}
                }
            }
        }
    }

    debug!("Chat client exiting with {} messages", session.transcript().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_edits_input() {
        let mut session = ChatSession::new();

        handle_key(&mut session, press(KeyCode::Char('h')));
        handle_key(&mut session, press(KeyCode::Char('i')));
        handle_key(&mut session, press(KeyCode::Char('!')));
        handle_key(&mut session, press(KeyCode::Backspace));

        assert_eq!(session.input(), "hi");
    }

    #[test]
    fn quit_keys() {
        let mut session = ChatSession::new();

        assert!(matches!(handle_key(&mut session, press(KeyCode::Esc)), KeyAction::Quit));
        assert!(matches!(
            handle_key(
                &mut session,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            KeyAction::Quit
        ));
        assert_eq!(session.input(), "");
    }

    #[test]
    fn enter_requests_submit() {
        let mut session = ChatSession::new();
        assert!(matches!(handle_key(&mut session, press(KeyCode::Enter)), KeyAction::Submit));
    }
}
