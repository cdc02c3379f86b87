//! Text area rendering: gutter, syntax colors, selection and search matches

use crate::model::buffer::{Buffer, Position};
use crate::model::cursor::Cursor;
use crate::model::search::{SearchMatch, SearchState};
use crate::primitives::highlighter::{HighlightSpan, LineHighlightCache};
use crate::view::theme::Theme;
use crate::view::viewport::{char_display_width, Viewport};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Minimum width of the line-number column
const LINE_NUMBER_MIN_DIGITS: usize = 3;

/// Everything the text area needs for one frame
pub struct BufferRenderInput<'a> {
    pub buffer: &'a Buffer,
    pub cursor: &'a Cursor,
    pub search: &'a SearchState,
    pub highlights: &'a LineHighlightCache,
    pub viewport: &'a Viewport,
    pub theme: &'a Theme,
    pub tab_size: usize,
    pub line_numbers: bool,
}

/// Width of the gutter: current-line marker, right-aligned number, one space
pub fn gutter_width(buffer: &Buffer, line_numbers: bool) -> usize {
    if !line_numbers {
        return 0;
    }
    let digits = buffer.line_count().to_string().len();
    1 + digits.max(LINE_NUMBER_MIN_DIGITS) + 1
}

/// Renders the visible part of the buffer
pub struct BufferRenderer;

impl BufferRenderer {
    /// Draw the text area into `area` and return the cursor's screen position
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        input: &BufferRenderInput<'_>,
    ) -> Option<(u16, u16)> {
        let theme = input.theme;
        let gutter = gutter_width(input.buffer, input.line_numbers);
        let base = Style::default().fg(theme.editor_fg).bg(theme.editor_bg);

        let lines: Vec<Line<'static>> = input
            .viewport
            .visible_range(input.buffer)
            .map(|line| {
                let mut spans = Self::gutter_spans(input, line, gutter);
                spans.extend(Self::line_spans(input, line));
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).style(base), area);

        input
            .viewport
            .cursor_screen_position(input.buffer, input.cursor, input.tab_size)
            .map(|(x, y)| (area.x + gutter as u16 + x, area.y + y))
            .filter(|(x, y)| *x < area.x + area.width && *y < area.y + area.height)
    }

    fn gutter_spans(input: &BufferRenderInput<'_>, line: usize, gutter: usize) -> Vec<Span<'static>> {
        if gutter == 0 {
            return Vec::new();
        }
        let theme = input.theme;
        let is_current = line == input.cursor.position.line;
        let marker = if is_current { '>' } else { ' ' };
        let fg = if is_current {
            theme.current_line_number_fg
        } else {
            theme.line_number_fg
        };
        let digits = gutter - 2;
        vec![Span::styled(
            format!("{marker}{:>digits$} ", line + 1),
            Style::default().fg(fg).bg(theme.editor_bg),
        )]
    }

    /// Styled spans for the visible columns of one buffer line
    fn line_spans(input: &BufferRenderInput<'_>, line: usize) -> Vec<Span<'static>> {
        let text = input.buffer.line_text(line).unwrap_or_default();
        let left = input.viewport.left_column;
        let right = left + input.viewport.width as usize;
        let syntax = input.highlights.spans(line).unwrap_or_default();
        let matches = matches_on_line(input.search.matches(), line);
        let current = input.search.current_match();
        let selection = input.cursor.selection();

        let mut chars = Vec::new();
        let mut display_col = 0;
        for (column, ch) in text.chars().enumerate() {
            if display_col >= right {
                break;
            }
            let width = char_display_width(ch, display_col, input.tab_size);
            let style = Self::char_style(
                input.theme,
                Position::new(line, column),
                syntax,
                matches,
                current,
                selection,
            );

            if width == 0 {
                // Zero-width marks stay attached to the previous cell
                if display_col >= left && !chars.is_empty() {
                    chars.push((ch, style));
                }
            } else if ch != '\t' && display_col >= left && display_col + width <= right {
                chars.push((ch, style));
            } else {
                // Tabs and wide chars cut by the viewport edge become blanks
                let visible = (display_col.max(left)..(display_col + width).min(right)).len();
                chars.extend(std::iter::repeat((' ', style)).take(visible));
            }
            display_col += width;
        }

        compress_chars(chars)
    }

    fn char_style(
        theme: &Theme,
        pos: Position,
        syntax: &[HighlightSpan],
        matches: &[SearchMatch],
        current: Option<SearchMatch>,
        selection: Option<(Position, Position)>,
    ) -> Style {
        let mut style = Style::default().fg(theme.editor_fg).bg(theme.editor_bg);

        if let Some(span) = syntax
            .iter()
            .find(|s| s.start <= pos.column && pos.column < s.end)
        {
            style = style.fg(span.category.color(theme));
        }

        if let Some(m) = matches
            .iter()
            .find(|m| m.column <= pos.column && pos.column < m.column + m.len)
        {
            let bg: Color = if Some(*m) == current {
                theme.current_match_bg
            } else {
                theme.search_match_bg
            };
            style = style.fg(theme.search_match_fg).bg(bg);
        }

        if let Some((start, end)) = selection {
            if start <= pos && pos < end {
                style = style.bg(theme.selection_bg);
            }
        }

        style
    }
}

/// The matches on `line`, found by binary search in the sorted match list
fn matches_on_line(matches: &[SearchMatch], line: usize) -> &[SearchMatch] {
    let start = matches.partition_point(|m| m.line < line);
    let end = matches.partition_point(|m| m.line <= line);
    &matches[start..end]
}

/// Merge runs of equally styled characters into spans
fn compress_chars(chars: Vec<(char, Style)>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut iter = chars.into_iter();
    let Some((first, mut current_style)) = iter.next() else {
        return spans;
    };
    let mut current_text = String::from(first);

    for (ch, style) in iter {
        if style == current_style {
            current_text.push(ch);
        } else {
            spans.push(Span::styled(std::mem::take(&mut current_text), current_style));
            current_text.push(ch);
            current_style = style;
        }
    }

    spans.push(Span::styled(current_text, current_style));
    spans
}
