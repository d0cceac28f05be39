//! Forecast screen rendering
//!
//! Title, the two region selectors and the fetch control on top, then the
//! error banner, the office summary and one block per forecast card.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tenki_weather::{ForecastCard, OfficeSummary};

use crate::app::ForecastApp;
use crate::controls::Focus;
use crate::models::ForecastModel;

const TITLE: &str = "気象庁 天気予報";
const PARENT_LABEL: &str = "地方";
const CHILD_LABEL: &str = "地域";
const NO_CHILDREN: &str = "地域がありません";
const FETCH_LABEL: &str = "取得";
const LOADING: &str = "取得中…";
const WIND_LABEL: &str = "風：";
const WAVE_LABEL: &str = "波：";
const SCROLL_HINT: &str = "PgUp/PgDn で移動";

const CARD_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, app: &ForecastApp) {
    draw(frame, app.model(), app.focus(), app.card_offset());
}

fn draw(frame: &mut Frame, model: &ForecastModel, focus: Focus, card_offset: usize) {
    let screen = frame.area();
    let summary = model.summary();
    let headline = summary
        .as_ref()
        .and_then(|s| s.headline.as_deref())
        .map(|h| fit_headline(h, screen.width, (screen.height / 3).max(1)));
    let headline_rows = headline.as_ref().map_or(0, |(_, rows)| *rows);

    let error_height = if model.error_message().is_some() { 1 } else { 0 };
    let summary_height = match (&summary, model.is_loading()) {
        (Some(_), _) => 2 + headline_rows,
        (None, true) => 2,
        (None, false) => 0,
    };

    let [title, controls, error, header, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(error_height),
        Constraint::Length(summary_height),
        Constraint::Min(0),
    ])
    .areas(screen);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        title,
    );
    render_controls(frame, controls, model, focus);

    if let Some(message) = model.error_message() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message,
                Style::default().fg(Color::White).bg(Color::Red),
            )),
            error,
        );
    }

    match summary {
        Some(summary) => {
            let headline = headline.as_ref().map(|(text, _)| text.as_str());
            render_summary(frame, header, &summary, headline);
        }
        None if model.is_loading() => {
            frame.render_widget(
                Paragraph::new(Span::styled(LOADING, Style::default().fg(Color::DarkGray))),
                header,
            );
        }
        None => {}
    }

    render_cards(frame, body, model, card_offset);
}

/// Wrapped row count of `text` at `width` cells
fn wrapped_rows(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut rows = Line::from(text).width().div_ceil(width).max(1);
    // Word wrapping can push a word to the next row
    if text.contains(char::is_whitespace) {
        rows += 1;
    }
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Headline text and the rows it needs, cut with `…` when it would take
/// more than `max_rows`.
fn fit_headline(text: &str, width: u16, max_rows: u16) -> (String, u16) {
    let rows = wrapped_rows(text, width);
    if rows <= max_rows {
        return (text.to_string(), rows);
    }

    let mut budget = usize::from(width) * usize::from(max_rows);
    if text.contains(char::is_whitespace) {
        budget = budget.saturating_sub(usize::from(width));
    }
    let mut cut = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let w = Span::raw(&*ch.encode_utf8(&mut buf)).width();
        if used + w + 1 > budget {
            break;
        }
        used += w;
        cut.push(ch);
    }
    cut.push('…');
    (cut, max_rows)
}

fn control_block(label: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(label)
}

fn render_controls(frame: &mut Frame, area: Rect, model: &ForecastModel, focus: Focus) {
    let [parent, child, fetch] = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(40),
        Constraint::Percentage(20),
    ])
    .areas(area);

    let parent_text = model
        .selected_parent()
        .map(|p| format!("◀ {} ▶", p.name))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(parent_text).block(control_block(PARENT_LABEL, focus == Focus::Parent)),
        parent,
    );

    let child_line = match model.selected_child() {
        Some(c) => Line::from(format!("◀ {} ▶", c.name)),
        None => Line::from(Span::styled(
            NO_CHILDREN,
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(
        Paragraph::new(child_line).block(control_block(CHILD_LABEL, focus == Focus::Child)),
        child,
    );

    let mut button = Style::default().add_modifier(Modifier::BOLD);
    if model.selected_child().is_none() {
        button = button.fg(Color::DarkGray);
    }
    frame.render_widget(
        Paragraph::new(Span::styled(FETCH_LABEL, button))
            .block(control_block("", focus == Focus::Fetch)),
        fetch,
    );
}

fn render_summary(frame: &mut Frame, area: Rect, summary: &OfficeSummary, headline: Option<&str>) {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            summary.publishing_office.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            summary.report_label.as_str(),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if let Some(headline) = headline {
        lines.push(Line::from(headline));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn icon_color(class_name: &str) -> Color {
    match class_name {
        "thunder" => Color::Yellow,
        "snowy" => Color::White,
        "rainy" => Color::Blue,
        "storm" => Color::Magenta,
        "cloudy" => Color::Gray,
        "sunny" => Color::LightRed,
        _ => Color::Reset,
    }
}

fn card_widget(card: &ForecastCard) -> Paragraph<'_> {
    let mut weather = Vec::with_capacity(3);
    if !card.icon.is_none() {
        weather.push(Span::styled(
            card.icon.icon,
            Style::default().fg(icon_color(card.icon.class_name)),
        ));
        weather.push(Span::raw(" "));
    }
    weather.push(Span::raw(card.weather.as_str()));

    let lines = vec![
        Line::from(weather),
        Line::from(vec![
            Span::styled(WIND_LABEL, Style::default().fg(Color::DarkGray)),
            Span::raw(card.wind.as_str()),
        ]),
        Line::from(vec![
            Span::styled(WAVE_LABEL, Style::default().fg(Color::DarkGray)),
            Span::raw(card.wave.as_str()),
        ]),
    ];
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(card.date_label.as_str()),
    )
}

/// Cards from `offset` on, as many as fit. When some are off screen the last
/// row tells how many lie above and below.
fn render_cards(frame: &mut Frame, area: Rect, model: &ForecastModel, offset: usize) {
    let total = model.cards().count();
    if total == 0 {
        return;
    }
    let offset = offset.min(total - 1);

    let mut fit = usize::from(area.height / CARD_HEIGHT);
    let mut cards_area = area;
    let mut indicator = None;
    if offset > 0 || total > fit {
        let [list, last] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        cards_area = list;
        indicator = Some(last);
        fit = usize::from(list.height / CARD_HEIGHT);
    }

    let cards: Vec<ForecastCard> = model.cards().skip(offset).take(fit).collect();
    if !cards.is_empty() {
        let slots = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); cards.len()])
            .split(cards_area);
        for (card, slot) in cards.iter().zip(slots.iter()) {
            frame.render_widget(card_widget(card), *slot);
        }
    }

    if let Some(last) = indicator {
        let below = total - offset - cards.len();
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("▲ {offset}件  ▼ {below}件  {SCROLL_HINT}"),
                Style::default().fg(Color::DarkGray),
            )),
            last,
        );
    }
}
