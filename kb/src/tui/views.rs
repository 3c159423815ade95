//! TUI views and rendering
//!
//! Drawing is driven by AppState. The only thing written back is the layout
//! of the frame, which mouse hit-testing reads.

use boardstore::{Card, Status};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use crate::render::format_created;

use super::state::{AppState, BoardLayout, FormField, InteractionMode, NAV_ITEMS};

/// Height of one card block, borders included
const CARD_HEIGHT: u16 = 5;

/// Width of the navigation sidebar
const SIDEBAR_WIDTH: u16 = 18;

mod colors {
    use ratatui::style::Color;

    pub const TODO: Color = Color::Rgb(100, 149, 237); // Cornflower blue
    pub const PROGRESS: Color = Color::Rgb(255, 215, 0); // Gold
    pub const DONE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const DROP: Color = Color::Rgb(255, 0, 255); // Magenta
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

fn column_color(status: Status) -> Color {
    match status {
        Status::Todo => colors::TODO,
        Status::Progress => colors::PROGRESS,
        Status::Done => colors::DONE,
    }
}

/// Render the whole screen
pub fn render(state: &mut AppState, frame: &mut Frame) {
    trace!(?state.interaction_mode, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Sidebar + board
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);
    render_sidebar(frame, body[0]);
    state.layout = render_board(state, frame, body[1]);

    render_footer(state, frame, chunks[2]);

    match state.interaction_mode {
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        InteractionMode::Dialog => render_create_dialog(state, frame, frame.area()),
        _ => {}
    }
}

/// Header: app name, search box, column counts and board location
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let counts: Vec<Span> = Status::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, &status)| {
            let mut spans = Vec::new();
            if i > 0 {
                spans.push(Span::styled(" · ", Style::default().fg(colors::DIM)));
            }
            spans.push(Span::styled(
                format!("{} {}", status.title(), state.column_len(status)),
                Style::default().fg(column_color(status)),
            ));
            spans
        })
        .collect();
    let mut right_spans = counts;
    right_spans.push(Span::styled(" │ ", Style::default().fg(colors::DIM)));
    right_spans.push(Span::styled(state.location.clone(), Style::default().fg(colors::DIM)));
    right_spans.push(Span::raw(" "));
    let right_line = Line::from(right_spans);

    let searching = state.interaction_mode == InteractionMode::Search;
    let mut left_spans = vec![
        Span::styled(" Kanboard", Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled("Search: ", Style::default().fg(colors::DIM)),
    ];
    if state.search_text.is_empty() && !searching {
        left_spans.push(Span::styled("press /", Style::default().fg(colors::DIM)));
    } else {
        left_spans.push(Span::raw(state.search_text.as_str()));
    }
    if searching {
        left_spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_line.width() as u16)])
        .split(inner);
    frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
    frame.render_widget(Paragraph::new(right_line), chunks[1]);
}

/// Static navigation sidebar
fn render_sidebar(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = NAV_ITEMS
        .iter()
        .map(|&(label, active)| {
            if active {
                Line::from(Span::styled(
                    format!("▸ {}", label),
                    Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(format!("  {}", label), Style::default().fg(colors::DIM)))
            }
        })
        .collect();

    let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Menu "));
    frame.render_widget(sidebar, area);
}

/// Render the three columns and return where everything landed
fn render_board(state: &AppState, frame: &mut Frame, area: Rect) -> BoardLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);

    let mut layout = BoardLayout::default();
    for (status, &column_area) in Status::ALL.iter().copied().zip(chunks.iter()) {
        layout.columns.push((status, column_area));
        render_column(state, status, frame, column_area, &mut layout);
    }
    layout
}

/// Index that must stay on screen for a column
fn anchor_index(state: &AppState, status: Status) -> usize {
    if state.drag.is_active() && state.drop_column == Some(status) {
        state.drag.hover.unwrap_or_else(|| state.column_len(status))
    } else {
        state.selected[status.index()]
    }
}

fn render_column(state: &AppState, status: Status, frame: &mut Frame, area: Rect, layout: &mut BoardLayout) {
    trace!(%status, "render_column: called");
    let cards = state.column(status);
    let accent = column_color(status);
    let is_drop_column = state.drag.is_active() && state.drop_column == Some(status);
    let is_focused = state.focus == status;

    let border_style = if is_drop_column {
        Style::default().fg(colors::DROP)
    } else if is_focused {
        Style::default().fg(accent)
    } else {
        Style::default().fg(colors::DIM)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if is_drop_column { BorderType::Thick } else { BorderType::Plain })
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ({}) ", status.title(), cards.len()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if cards.is_empty() && !is_drop_column {
        let empty = Paragraph::new("No cards")
            .style(Style::default().fg(colors::DIM))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let visible = usize::from((inner.height / CARD_HEIGHT).max(1));
    let anchor = anchor_index(state, status);
    let offset = (anchor + 1).saturating_sub(visible);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for (index, card) in cards.iter().enumerate().skip(offset) {
        if y + CARD_HEIGHT > bottom {
            break;
        }
        let rect = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        let hovered = is_drop_column && state.drag.hover == Some(index);
        let selected = is_focused && !state.drag.is_active() && state.selected[status.index()] == index;
        let dragged = state.dragged_id() == Some(card.id.as_str());
        render_card(card, frame, rect, accent, hovered, selected, dragged);
        layout.cards.push((status, index, rect));
        y += CARD_HEIGHT;
    }

    if is_drop_column && state.drag.hover.is_none() && y < bottom {
        let slot = Rect::new(inner.x, y, inner.width, 1);
        let marker = Paragraph::new("── drop here ──")
            .style(Style::default().fg(colors::DROP).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(marker, slot);
    }
}

fn render_card(
    card: &Card,
    frame: &mut Frame,
    area: Rect,
    accent: Color,
    hovered: bool,
    selected: bool,
    dragged: bool,
) {
    let mut block = Block::default().borders(Borders::ALL);
    block = if hovered {
        block
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(colors::DROP))
    } else if selected {
        block.border_style(Style::default().fg(accent))
    } else {
        block.border_style(Style::default().fg(colors::DIM))
    };

    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    let mut body_style = Style::default();
    if dragged {
        title_style = title_style.fg(colors::DIM).add_modifier(Modifier::ITALIC);
        body_style = body_style.fg(colors::DIM);
    }
    if selected {
        block = block.style(Style::default().bg(colors::SELECTED_BG));
    }
    block = block.title(Span::styled(format!(" {} ", card.title), title_style));

    let description = card.description.lines().next().unwrap_or_default().to_string();
    let lines = vec![
        Line::from(Span::styled(description, body_style)),
        Line::from(Span::styled(format_created(&card.created_at), Style::default().fg(colors::DIM))),
    ];
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Footer: input echo, error or key hints
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(?state.interaction_mode, "render_footer: called");
    let content = if let Some(ref error) = state.error_message {
        Line::from(Span::styled(format!(" Error: {}", error), Style::default().fg(colors::ERROR)))
    } else {
        let keybinds: &[(&str, &str)] = match state.interaction_mode {
            InteractionMode::Search => &[("[Enter]", "Done"), ("[Esc]", "Done")],
            InteractionMode::Dialog => &[
                ("[Tab]", "Switch field"),
                ("[Enter]", "Create"),
                ("[Ctrl+S]", "Create"),
                ("[Esc]", "Close"),
            ],
            InteractionMode::Help => &[("[Esc]", "Close help")],
            InteractionMode::Normal if state.drag.is_active() => &[
                ("[h/l]", "Column"),
                ("[j/k]", "Slot"),
                ("[Space]", "Drop"),
                ("[Esc]", "Cancel"),
            ],
            InteractionMode::Normal => &[
                ("[Space]", "Pick up"),
                ("[n]", "New card"),
                ("[/]", "Search"),
                ("[?]", "Help"),
                ("[q]", "Quit"),
            ],
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, action) in keybinds {
            spans.push(Span::styled(
                *key,
                Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(format!(" {} ", action)));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Render the card creation dialog
fn render_create_dialog(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_create_dialog: called");
    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New card ")
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Description
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let form = &state.form;
    let field = |label: &'static str, text: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(colors::KEYBIND)
        } else {
            Style::default().fg(colors::DIM)
        };
        let mut content = text.to_string();
        if focused {
            content.push('_');
        }
        Paragraph::new(content)
            .block(Block::default().borders(Borders::ALL).border_style(style).title(label))
            .wrap(Wrap { trim: false })
    };

    frame.render_widget(field(" Title ", &form.title, form.focus == FormField::Title), chunks[0]);
    frame.render_widget(
        field(" Description ", &form.description, form.focus == FormField::Description),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Tab: switch  Enter: create  Ctrl+S: create  Esc: close",
            Style::default().fg(colors::DIM),
        ))
        .alignment(Alignment::Center),
        chunks[2],
    );
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let section = |name: &'static str| Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD)));
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )),
        Line::from(""),
        section("Board"),
        key_line("h/l ←/→", "Previous / next column"),
        key_line("j/k ↓/↑", "Next / previous card"),
        key_line("Space", "Pick up the selected card"),
        key_line("n, +", "New card"),
        key_line("/", "Search box"),
        key_line("?", "Toggle help"),
        key_line("q", "Quit"),
        Line::from(""),
        section("Carrying a card"),
        key_line("H/L", "Move to previous / next column"),
        key_line("J/K", "Move drop slot down / up"),
        key_line("Space", "Drop"),
        key_line("Esc", "Cancel"),
        Line::from(""),
        section("Mouse"),
        key_line("Drag", "Drop onto a card to land before it"),
        key_line("", "Drop onto empty space to append"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (? to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Helper to create a key binding line
fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
