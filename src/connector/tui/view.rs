use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::ChatSession;
use crate::domain::Message;

const TYPING_FRAMES: [&str; 3] = ["●○○", "○●○", "○○●"];

/// Bubbles never take more than this share of the transcript width.
const BUBBLE_WIDTH_PERCENT: usize = 70;

pub fn render(frame: &mut Frame, session: &ChatSession, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_transcript(frame, chunks[1], session, tick);
    render_input(frame, chunks[2], session);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Chat Assistant",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Always here to help",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_transcript(frame: &mut Frame, area: Rect, session: &ChatSession, tick: usize) {
    let bubble_width = (area.width as usize * BUBBLE_WIDTH_PERCENT / 100).max(10);
    let mut lines = transcript_lines(session.transcript(), bubble_width);

    if session.is_awaiting_reply() {
        lines.push(Line::from(Span::styled(
            TYPING_FRAMES[tick % TYPING_FRAMES.len()],
            Style::default().fg(Color::Gray),
        )));
    }

    // Pin the view to the newest message.
    let offset = lines.len().saturating_sub(area.height as usize);
    let transcript = Paragraph::new(lines).scroll((offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(transcript, area);
}

fn render_input(frame: &mut Frame, area: Rect, session: &ChatSession) {
    let (text, style) = if !session.is_input_enabled() {
        ("Waiting for reply...", Style::default().fg(Color::DarkGray))
    } else if session.input().is_empty() {
        ("Type your message...", Style::default().fg(Color::DarkGray))
    } else {
        (session.input(), Style::default())
    };

    let input = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Enter to send · Esc to quit "),
    );
    frame.render_widget(input, area);

    if session.is_input_enabled() {
        let typed = u16::try_from(session.input().width()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(typed)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// Lines for the whole transcript: user messages right-aligned, bot
/// messages left-aligned, each followed by its time label and a spacer.
pub fn transcript_lines(messages: &[Message], bubble_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for message in messages {
        let (alignment, style) = if message.sender().is_user() {
            (Alignment::Right, Style::default().fg(Color::Magenta))
        } else {
            (Alignment::Left, Style::default())
        };

        for row in wrap_text(message.text(), bubble_width) {
            lines.push(Line::from(Span::styled(row, style)).alignment(alignment));
        }
        lines.push(
            Line::from(Span::styled(
                message.time_label(),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(alignment),
        );
        lines.push(Line::default());
    }

    lines
}

/// Greedy word wrap by terminal column width. Words wider than `width` are
/// split between characters.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if current_width > 0 && current_width + 1 + word_width > width {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width > width {
                for c in word.chars() {
                    let char_width = c.width().unwrap_or(0);
                    if current_width > 0 && current_width + char_width > width {
                        rows.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(c);
                    current_width += char_width;
                }
                continue;
            }

            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        rows.push(current);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::GREETING;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick".to_string(), "brown fox".to_string()]
        );
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        assert_eq!(
            wrap_text("abcdefghij", 4),
            vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()]
        );
    }

    #[test]
    fn test_wrap_text_measures_wide_chars_by_columns() {
        let text = "甲乙丙丁戊己庚辛壬癸子丑寅卯辰巳午未申酉";
        let rows = wrap_text(text, 14);

        assert_eq!(
            rows,
            vec![
                "甲乙丙丁戊己庚".to_string(),
                "辛壬癸子丑寅卯".to_string(),
                "辰巳午未申酉".to_string(),
            ]
        );
        assert!(rows.iter().all(|row| row.width() <= 14));
    }

    #[test]
    fn test_wrap_text_mixes_wide_and_narrow_words() {
        let rows = wrap_text("hi 你好世界 ok", 8);

        assert_eq!(rows, vec!["hi".to_string(), "你好世界".to_string(), "ok".to_string()]);
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        assert_eq!(
            wrap_text("one\n\ntwo", 20),
            vec!["one".to_string(), String::new(), "two".to_string()]
        );
    }

    #[test]
    fn test_transcript_lines_per_message() {
        let messages = vec![Message::bot("hello"), Message::user("hi")];
        let lines = transcript_lines(&messages, 40);

        // text + time label + spacer for each message
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0].alignment, Some(Alignment::Left));
        assert_eq!(lines[3].alignment, Some(Alignment::Right));
    }

    #[test]
    fn test_render_shows_greeting() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let session = ChatSession::new();

        terminal.draw(|f| render(f, &session, 0)).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains(GREETING));
        assert!(screen.contains("Type your message..."));
    }

    #[test]
    fn test_render_pins_newest_message() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut session = ChatSession::new();
        for i in 0..10 {
            session.set_input(format!("message {i}"));
            session.submit();
            session.resolve(&crate::domain::ReplyOutcome::Reply(format!("reply {i}")));
        }

        terminal.draw(|f| render(f, &session, 0)).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("reply 9"));
        assert!(!screen.contains(GREETING));
    }

    #[test]
    fn test_render_shows_every_wide_char() {
        let text = "甲乙丙丁戊己庚辛壬癸子丑寅卯辰巳午未申酉";
        let mut terminal = Terminal::new(TestBackend::new(20, 24)).unwrap();
        let mut session = ChatSession::new();
        session.set_input("hi");
        session.submit();
        session.resolve(&crate::domain::ReplyOutcome::Reply(text.to_string()));

        terminal.draw(|f| render(f, &session, 0)).unwrap();

        let screen = screen_text(&terminal);
        let missing: Vec<char> = text.chars().filter(|c| !screen.contains(*c)).collect();
        assert!(missing.is_empty(), "not rendered: {missing:?}");
    }

    #[test]
    fn test_render_long_input_keeps_cursor_in_box() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut session = ChatSession::new();
        session.set_input("x".repeat(70_000));

        terminal.draw(|f| render(f, &session, 0)).unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x <= 58);
        assert_eq!(cursor.y, 10);
    }

    #[test]
    fn test_render_shows_waiting_state() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut session = ChatSession::new();
        session.set_input("Hello");
        session.submit();

        terminal.draw(|f| render(f, &session, 1)).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Waiting for reply..."));
        assert!(screen.contains(TYPING_FRAMES[1]));
    }
}
