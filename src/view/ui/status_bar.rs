//! Status bar and prompt/message line rendering

use crate::model::buffer::{LineEnding, Position};
use crate::primitives::highlighter::Language;
use crate::view::prompt::Prompt;
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// What the status bar shows about the current buffer
#[derive(Debug, Clone)]
pub struct StatusInfo<'a> {
    pub display_name: &'a str,
    pub modified: bool,
    pub cursor: Position,
    pub language: Language,
    pub line_ending: LineEnding,
}

impl StatusInfo<'_> {
    /// Left-hand status text: `name [●] | Line L, Col C | Language`, one-based
    pub fn left_text(&self) -> String {
        let modified = if self.modified { " [●]" } else { "" };
        format!(
            "{}{} | Line {}, Col {} | {}",
            self.display_name,
            modified,
            self.cursor.line + 1,
            self.cursor.column + 1,
            self.language.name()
        )
    }
}

/// Renders the status bar and prompt/minibuffer
pub struct StatusBarRenderer;

impl StatusBarRenderer {
    /// Render the status bar: buffer summary on the left, line ending on the right
    pub fn render_status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo<'_>, theme: &Theme) {
        let style = Style::default()
            .fg(theme.status_bar_fg)
            .bg(theme.status_bar_bg);
        let available_width = area.width as usize;

        let left = info.left_text();
        let right = format!(" {} ", info.line_ending.display_name());

        let mut spans = Vec::new();
        let left_width = left.width();
        if left_width + right.len() < available_width {
            spans.push(Span::styled(left, style));
            spans.push(Span::styled(
                " ".repeat(available_width - left_width - right.len()),
                style,
            ));
            spans.push(Span::styled(right, style));
        } else {
            spans.push(Span::styled(truncate(&left, available_width), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
    }

    /// Render the prompt/minibuffer and place the terminal cursor after the input
    pub fn render_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt, theme: &Theme) {
        let base_style = Style::default().fg(theme.prompt_fg).bg(theme.prompt_bg);
        let line = Line::from(vec![
            Span::styled(prompt.message.clone(), base_style),
            Span::styled(prompt.input.clone(), base_style),
        ]);
        frame.render_widget(Paragraph::new(line).style(base_style), area);

        let cursor_x = prompt.display_text().width() as u16;
        if cursor_x < area.width {
            frame.set_cursor_position((area.x + cursor_x, area.y));
        }
    }

    /// Render a status message (or an empty line)
    pub fn render_message(frame: &mut Frame, area: Rect, message: Option<&str>, theme: &Theme) {
        let style = Style::default().fg(theme.message_fg).bg(theme.editor_bg);
        let text = truncate(message.unwrap_or_default(), area.width as usize);
        frame.render_widget(Paragraph::new(text).style(style), area);
    }
}

/// Cut `text` to `max_width` display columns, marking the cut with "..."
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    if max_width >= 3 {
        out.push_str("...");
    }
    out
}
