use anyhow::Result;
use ratatui::{
    backend::TestBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::{
    session::Action,
    theme::Palette,
    view::{AppBar, MessageForm, MessageRow, Node, RowAlignment, Segment, View},
};

pub const WINDOW_TITLE: &str = "Chat App";

/// Most draft lines the input box grows to before scrolling
const MAX_INPUT_LINES: u16 = 4;

/// Screen regions that react to a mouse click
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Action)>,
}

impl HitMap {
    fn push(&mut self, area: Rect, action: Action) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, action));
        }
    }

    /// The action under a terminal cell, if any
    pub fn action_at(&self, column: u16, row: u16) -> Option<Action> {
        self.regions
            .iter()
            .find(|(area, _)| {
                column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
            })
            .map(|(_, action)| action.clone())
    }

    /// Where a given action can be clicked
    #[cfg(test)]
    pub fn region_of(&self, action: &Action) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, a)| a == action)
            .map(|(area, _)| *area)
    }
}

/// Draw the whole view and report the clickable regions
pub fn render_view(f: &mut Frame, view: &View) -> HitMap {
    let palette = view.theme.palette();
    let base = Style::default().fg(palette.foreground).bg(palette.background);
    let mut hits = HitMap::default();

    let area = f.size();
    f.render_widget(Block::default().style(base), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // App bar
            Constraint::Min(0),    // Body
        ])
        .split(area);

    render_app_bar(f, &view.app_bar, &palette, chunks[0], &mut hits);

    let body = Rect {
        x: chunks[1].x.saturating_add(1),
        width: chunks[1].width.saturating_sub(2),
        ..chunks[1]
    };
    render_body(f, view, &palette, body, &mut hits);

    hits
}

fn render_app_bar(f: &mut Frame, bar: &AppBar, palette: &Palette, area: Rect, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {WINDOW_TITLE} "))
        .style(Style::default().fg(palette.foreground).bg(palette.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(bar.leading, Style::default().fg(palette.seed)),
        Span::raw(" "),
        Span::styled(bar.title, Style::default().add_modifier(Modifier::BOLD)),
    ]));
    f.render_widget(title, inner);

    // Icon buttons sit at the right edge, theme toggle last
    let button_width = 3;
    let theme_area = Rect {
        x: inner.right().saturating_sub(button_width + 1),
        width: button_width.min(inner.width),
        ..inner
    };
    let search_area = Rect {
        x: theme_area.x.saturating_sub(button_width + 1),
        width: button_width.min(inner.width),
        ..inner
    };

    let icon_style = Style::default().fg(palette.seed).add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Span::styled(format!("[{}]", bar.search_icon), icon_style)),
        search_area,
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("[{}]", bar.theme_icon.glyph()),
            icon_style,
        )),
        theme_area,
    );

    hits.push(search_area, Action::ToggleSearch);
    hits.push(theme_area, Action::ToggleTheme);
}

fn render_body(f: &mut Frame, view: &View, palette: &Palette, area: Rect, hits: &mut HitMap) {
    let mut sections: Vec<(&Node, Constraint)> = Vec::new();
    for node in &view.body {
        let constraint = match node {
            Node::SearchBar { visible, .. } => Constraint::Length(if *visible { 3 } else { 0 }),
            Node::Title(_) => Constraint::Length(2),
            Node::Form(form) => Constraint::Length(input_height(form, area.width) + 1),
            Node::Divider => Constraint::Length(1),
            Node::Row(_) => continue,
        };
        sections.push((node, constraint));
    }

    let mut constraints: Vec<Constraint> = sections.iter().map(|(_, c)| *c).collect();
    constraints.push(Constraint::Min(0)); // Messages

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for ((node, _), chunk) in sections.iter().zip(chunks.iter()) {
        match node {
            Node::SearchBar { hint, visible } => {
                if *visible {
                    render_search_bar(f, hint, palette, *chunk);
                }
            }
            Node::Title(text) => {
                let title = Paragraph::new(*text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(palette.seed).add_modifier(Modifier::BOLD));
                f.render_widget(title, *chunk);
            }
            Node::Form(form) => render_form(f, form, palette, *chunk, hits),
            Node::Divider => {
                let rule = "─".repeat(chunk.width as usize);
                f.render_widget(
                    Paragraph::new(rule).style(Style::default().fg(palette.muted)),
                    *chunk,
                );
            }
            Node::Row(_) => {}
        }
    }

    if let Some(messages_area) = chunks.last() {
        let rows: Vec<&MessageRow> = view.rows().collect();
        render_rows(f, &rows, palette, *messages_area);
    }
}

fn render_search_bar(f: &mut Frame, hint: &str, palette: &Palette, area: Rect) {
    let bar = Paragraph::new(Span::styled(
        hint.to_string(),
        Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(palette.surface)),
    );
    f.render_widget(bar, area);
}

fn input_height(form: &MessageForm, width: u16) -> u16 {
    let rows = DraftLayout::new(&form.value, width.saturating_sub(2)).rows();
    rows.clamp(1, MAX_INPUT_LINES) + 2
}

/// A draft broken into box-width lines, with the cursor after the last char
struct DraftLayout {
    lines: Vec<String>,
    cursor: (u16, u16),
}

impl DraftLayout {
    fn new(draft: &str, width: u16) -> Self {
        let lines: Vec<String> = wrap_pieces(&[Piece::new(draft, Style::default())], width)
            .into_iter()
            .map(|line| line.into_iter().map(|(text, _)| text).collect())
            .collect();

        let last_row = lines.len().saturating_sub(1) as u16;
        let last_width = lines.last().map(|l| l.width()).unwrap_or(0) as u16;
        // a full last line pushes the cursor onto the next row
        let cursor = if last_width >= width.max(1) {
            (last_row + 1, 0)
        } else {
            (last_row, last_width)
        };
        Self { lines, cursor }
    }

    /// Rows needed to show the text and the cursor
    fn rows(&self) -> u16 {
        self.cursor.0 + 1
    }
}

fn render_form(f: &mut Frame, form: &MessageForm, palette: &Palette, area: Rect, hits: &mut HitMap) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(input_height(form, area.width)), // Input box
            Constraint::Length(1),                              // Submit button
        ])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(form.label)
        .border_style(Style::default().fg(palette.seed));
    let inner = block.inner(chunks[0]);

    let layout = DraftLayout::new(&form.value, inner.width);
    let scroll = layout.rows().saturating_sub(inner.height);
    let lines: Vec<Line> = layout.lines.iter().map(|l| Line::from(l.as_str())).collect();
    let input = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((scroll, 0));
    f.render_widget(input, chunks[0]);

    if inner.width > 0 && inner.height > 0 {
        let (row, col) = layout.cursor;
        f.set_cursor(
            inner.x + col.min(inner.width - 1),
            inner.y + row.saturating_sub(scroll).min(inner.height - 1),
        );
    }

    let label = format!("[ {} ]", form.submit);
    let width = (label.width() as u16).min(chunks[1].width);
    let button_area = Rect {
        x: chunks[1].right().saturating_sub(width),
        width,
        ..chunks[1]
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            label,
            Style::default().fg(palette.seed).add_modifier(Modifier::BOLD),
        )),
        button_area,
    );
    hits.push(button_area, Action::Submit);
}

type StyledLine = Vec<(String, Style)>;

/// A run of styled text; `whole` runs are never split across lines
struct Piece {
    text: String,
    style: Style,
    whole: bool,
}

impl Piece {
    fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            whole: false,
        }
    }

    fn whole(text: impl Into<String>, style: Style) -> Self {
        Self {
            whole: true,
            ..Self::new(text, style)
        }
    }
}

/// Break styled text into lines no wider than `width` cells.
///
/// `\n` always starts a new line. Breaks fall between characters, so no
/// text is dropped or trimmed.
fn wrap_pieces(pieces: &[Piece], width: u16) -> Vec<StyledLine> {
    let width = width.max(1) as usize;
    let mut lines: Vec<StyledLine> = vec![Vec::new()];
    let mut used = 0usize;

    for piece in pieces {
        let piece_width = piece.text.width();
        if piece.whole && used > 0 && used + piece_width > width && piece_width <= width {
            lines.push(Vec::new());
            used = 0;
        }

        for c in piece.text.chars() {
            if c == '\n' {
                lines.push(Vec::new());
                used = 0;
                continue;
            }
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                lines.push(Vec::new());
                used = 0;
            }
            if let Some(line) = lines.last_mut() {
                let same_style = matches!(line.last(), Some((_, s)) if *s == piece.style);
                match line.last_mut() {
                    Some((current, _)) if same_style => current.push(c),
                    _ => line.push((c.to_string(), piece.style)),
                }
            }
            used += w;
        }
    }
    lines
}

fn row_lines(row: &MessageRow, palette: &Palette, width: u16) -> Vec<Line<'static>> {
    let author_style = Style::default().fg(palette.seed).add_modifier(Modifier::BOLD);
    let mut pieces = Vec::new();

    for (i, segment) in row.segments.iter().enumerate() {
        if i > 0 {
            pieces.push(Piece::new(" ", Style::default()));
        }
        match segment {
            Segment::Author(tag) => pieces.push(Piece::whole(tag.as_str(), author_style)),
            Segment::Text(text) => pieces.push(Piece::new(text.as_str(), Style::default())),
        }
    }

    wrap_pieces(&pieces, width)
        .into_iter()
        .map(|line| {
            Line::from(
                line.into_iter()
                    .map(|(text, style)| Span::styled(text, style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Newest rows win when space runs out; the ones shown stay oldest first.
fn render_rows(f: &mut Frame, rows: &[&MessageRow], palette: &Palette, area: Rect) {
    let rendered: Vec<(Vec<Line<'static>>, RowAlignment)> = rows
        .iter()
        .map(|row| (row_lines(row, palette, area.width), row.alignment))
        .collect();

    let mut used = 0u16;
    let mut first = rendered.len();
    for (lines, _) in rendered.iter().rev() {
        let height = lines.len() as u16;
        if used + height > area.height {
            break;
        }
        used += height;
        first -= 1;
    }

    let mut y = area.y;
    for (lines, alignment) in rendered.into_iter().skip(first) {
        let height = lines.len() as u16;
        let row_area = Rect {
            y,
            height,
            ..area
        };
        let alignment = match alignment {
            RowAlignment::Start => Alignment::Left,
            RowAlignment::End => Alignment::Right,
        };
        f.render_widget(Paragraph::new(Text::from(lines)).alignment(alignment), row_area);
        y += height;
    }
}

/// Render a view off-screen and return the text of each terminal row
pub fn render_to_lines(view: &View, width: u16, height: u16) -> Result<(Vec<String>, HitMap)> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    let mut hits = HitMap::default();
    terminal.draw(|f| hits = render_view(f, view))?;

    let buffer = terminal.backend().buffer();
    let lines = buffer
        .content()
        .chunks(width.max(1) as usize)
        .map(|row| row.iter().map(|cell| cell.symbol.as_str()).collect::<String>())
        .collect();
    Ok((lines, hits))
}
