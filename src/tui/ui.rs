use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::app::{App, Focus};
use crate::commands::CommandCtx;
use crate::models::Theme;

pub const TITLE: &str = "Task Tracker";
pub const PLACEHOLDER: &str = "Add a new task...";
pub const EMPTY_MESSAGE: &str = "No tasks yet. Add one to get started!";

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub danger: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            background: Color::Rgb(249, 250, 251),
            surface: Color::Rgb(255, 255, 255),
            text: Color::Rgb(17, 24, 39),
            muted: Color::Rgb(107, 114, 128),
            accent: Color::Rgb(59, 130, 246),
            danger: Color::Rgb(239, 68, 68),
        },
        Theme::Dark => Palette {
            background: Color::Rgb(17, 24, 39),
            surface: Color::Rgb(31, 41, 55),
            text: Color::Rgb(255, 255, 255),
            muted: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(59, 130, 246),
            danger: Color::Rgb(248, 113, 113),
        },
    }
}

/// Sun offers the way back to light, moon the way into dark.
fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "☾ dark",
        Theme::Dark => "☀ light",
    }
}

pub fn draw<C: CommandCtx>(frame: &mut Frame, app: &App<C>) {
    let theme = app.state().theme();
    let colors = palette(theme);
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background).fg(colors.text)),
        area,
    );

    let [header, input, list, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(frame, header, theme, &colors);
    draw_input(frame, input, app, &colors);
    draw_tasks(frame, list, app, &colors);
    draw_status(frame, status, app, &colors);
}

fn border_style(focused: bool, colors: &Palette) -> Style {
    if focused {
        Style::default().fg(colors.accent)
    } else {
        Style::default().fg(colors.muted)
    }
}

fn draw_header(frame: &mut Frame, area: Rect, theme: Theme, colors: &Palette) {
    let [title, toggle] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(area);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(colors.muted));

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
        )))
        .block(block.clone()),
        title,
    );
    frame.render_widget(
        Paragraph::new(theme_icon(theme))
            .style(Style::default().fg(colors.muted))
            .alignment(Alignment::Right)
            .block(block),
        toggle,
    );
}

fn draw_input<C: CommandCtx>(frame: &mut Frame, area: Rect, app: &App<C>, colors: &Palette) {
    let focused = app.focus() == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" + Add ")
        .border_style(border_style(focused, colors))
        .style(Style::default().bg(colors.surface));

    let line = if app.input().is_empty() {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(colors.muted)))
    } else {
        Line::from(Span::styled(app.input(), Style::default().fg(colors.text)))
    };
    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused {
        frame.set_cursor_position((cursor_column(area, app.input()), area.y + 1));
    }
}

/// Column right after the typed text, measured in display cells and kept
/// inside the bordered input box.
fn cursor_column(area: Rect, input: &str) -> u16 {
    let width = u16::try_from(input.width()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(width)
        .min(area.right().saturating_sub(2))
}

fn draw_tasks<C: CommandCtx>(frame: &mut Frame, area: Rect, app: &App<C>, colors: &Palette) {
    let focused = app.focus() == Focus::List;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused, colors))
        .style(Style::default().bg(colors.surface));

    let tasks = app.state().tasks();
    if tasks.is_empty() {
        frame.render_widget(
            Paragraph::new(EMPTY_MESSAGE)
                .style(Style::default().fg(colors.muted))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let (checkbox, text_style) = if task.completed {
                (
                    "[x] ",
                    Style::default()
                        .fg(colors.muted)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", Style::default().fg(colors.text))
            };
            ListItem::new(Line::from(vec![
                Span::styled(checkbox, Style::default().fg(colors.accent)),
                Span::styled(task.text.as_str(), text_style),
            ]))
        })
        .collect();

    let highlight = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status<C: CommandCtx>(frame: &mut Frame, area: Rect, app: &App<C>, colors: &Palette) {
    let line = match app.status_message() {
        Some(message) => Line::from(Span::styled(message, Style::default().fg(colors.danger))),
        None => Line::from(Span::styled(
            "enter add · tab switch · space toggle · d delete · t theme · q quit",
            Style::default().fg(colors.muted),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
