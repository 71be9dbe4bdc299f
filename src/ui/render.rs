use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::content::{ContentSettings, EventConfig};
use crate::qr::qr_image_url;
use crate::session::SessionScreen;
use crate::ui::app::{App, ContentPhase};
use crate::ui::layout::{body_and_footer, centered_rect_by_size, event_columns};
use crate::ui::theme::{ACCENT, CARD_BORDER, MUTED_TEXT, SELECTED_BG, STATUS_ERROR, TITLE_TEXT};

pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let (body, footer) = body_and_footer(frame.area());
    frame.render_widget(Clear, body);
    // Zones are only valid for what this frame puts on screen.
    app.set_button_zones(Vec::new());

    let phase = app.content().clone();
    let screen = app.screen().clone();
    match phase {
        ContentPhase::Loading => draw_loading(frame, body, None),
        ContentPhase::Failed(message) => draw_loading(frame, body, Some(&message)),
        ContentPhase::Ready(content) => match screen {
            SessionScreen::Idle => draw_idle(frame, body, &content.settings),
            SessionScreen::Revealing { number } => {
                draw_number(frame, body, &content.settings, number, true, app)
            }
            SessionScreen::Revealed { number } => {
                draw_number(frame, body, &content.settings, number, false, app)
            }
            SessionScreen::Browsing { .. } => draw_events(frame, body, &content.events),
            SessionScreen::Embedded { url, .. } => draw_embedded(frame, body, app, &url),
        },
    }

    draw_footer(frame, footer, app);
}

fn draw_loading(frame: &mut Frame<'_>, area: Rect, error: Option<&str>) {
    let mut lines = vec![Line::styled("Loading...", Style::default().fg(MUTED_TEXT))];
    if let Some(error) = error {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("Content unavailable: {}", error),
            Style::default().fg(STATUS_ERROR),
        ));
    }
    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    let target = centered_rect_by_size(area, area.width, 3);
    frame.render_widget(widget, target);
}

fn draw_idle(frame: &mut Frame<'_>, area: Rect, settings: &ContentSettings) {
    let lines = vec![
        Line::styled(
            settings.start_title.clone(),
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(settings.start_reminder.clone(), Style::default().fg(TITLE_TEXT)),
    ];
    let height = lines.len() as u16;
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, centered_rect_by_size(area, area.width, height));
}

fn draw_number(
    frame: &mut Frame<'_>,
    area: Rect,
    settings: &ContentSettings,
    number: u32,
    spinning: bool,
    app: &mut App,
) {
    let number_style = if spinning {
        Style::default().fg(MUTED_TEXT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::styled(settings.reveal_title.clone(), Style::default().fg(TITLE_TEXT)),
        Line::from(""),
        Line::styled(number.to_string(), number_style),
        Line::from(""),
    ];
    for instruction in settings.instructions.lines() {
        lines.push(Line::styled(
            instruction.trim().to_string(),
            Style::default().fg(MUTED_TEXT).add_modifier(Modifier::ITALIC),
        ));
    }

    let text_height = lines.len() as u16;
    let total_height = if spinning { text_height } else { text_height + 2 };
    let target = centered_rect_by_size(area, area.width, total_height);

    let text_area = Rect {
        height: text_height.min(target.height),
        ..target
    };
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, text_area);

    // The button row is laid out span by span so each button gets its own
    // rect; those rects double as the touch hit zones.
    if !spinning && target.height > text_height {
        let row = Rect {
            x: target.x,
            y: target.y + target.height - 1,
            width: target.width,
            height: 1,
        };
        let zones = draw_button_row(frame, row, app);
        app.set_button_zones(zones);
    }
}

fn draw_button_row(frame: &mut Frame<'_>, row: Rect, app: &App) -> Vec<Rect> {
    let selected = app.button_selection();
    let labels: Vec<String> = app
        .buttons()
        .iter()
        .enumerate()
        .map(|(idx, button)| format!(" {}. {} ", idx + 1, button.name))
        .collect();

    let gap: u16 = 3;
    let total: u16 = labels
        .iter()
        .map(|label| label.chars().count() as u16)
        .sum::<u16>()
        .saturating_add(gap.saturating_mul(labels.len().saturating_sub(1) as u16));

    let mut x = row.x + row.width.saturating_sub(total) / 2;
    let mut zones = Vec::with_capacity(labels.len());
    for (idx, label) in labels.iter().enumerate() {
        let width = (label.chars().count() as u16).min((row.x + row.width).saturating_sub(x));
        if width == 0 {
            break;
        }
        let zone = Rect {
            x,
            y: row.y,
            width,
            height: 1,
        };
        let style = if idx == selected {
            Style::default().fg(ACCENT).bg(SELECTED_BG)
        } else {
            Style::default().fg(TITLE_TEXT)
        };
        frame.render_widget(Paragraph::new(Span::styled(label.clone(), style)), zone);
        zones.push(zone);
        x = x.saturating_add(width + gap);
    }
    zones
}

fn draw_events(frame: &mut Frame<'_>, area: Rect, events: &[EventConfig]) {
    if events.is_empty() {
        let widget = Paragraph::new(Line::styled(
            "No upcoming events.",
            Style::default().fg(MUTED_TEXT),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(widget, centered_rect_by_size(area, area.width, 1));
        return;
    }

    // One row of up to three cards; additional events wrap into extra rows.
    let mut remaining = events;
    let rows = events.len().div_ceil(3) as u16;
    let row_height = (area.height / rows.max(1)).max(5);
    let mut y = area.y;
    while !remaining.is_empty() && y < area.y + area.height {
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height: row_height.min(area.y + area.height - y),
        };
        let take = remaining.len().min(3);
        let columns = event_columns(rect, take);
        for (event, column) in remaining[..take].iter().zip(columns) {
            draw_event_card(frame, column, event);
        }
        remaining = &remaining[take..];
        y += row_height;
    }
}

fn draw_event_card(frame: &mut Frame<'_>, area: Rect, event: &EventConfig) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(CARD_BORDER))
        .title(Span::styled(
            event.name.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let lines = vec![
        Line::styled(event.venue.clone(), Style::default().fg(TITLE_TEXT)),
        Line::styled(event.date.clone(), Style::default().fg(MUTED_TEXT)),
        Line::from(""),
        Line::styled(
            format!("Sign up: {}", event.link),
            Style::default().fg(TITLE_TEXT),
        ),
    ];
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn draw_embedded(frame: &mut Frame<'_>, area: Rect, app: &App, url: &str) {
    let qr = qr_image_url(&app.config().remote.qr_base_url, url);
    let lines = vec![
        Line::styled(
            "Scan with your phone to continue",
            Style::default().fg(TITLE_TEXT).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(url.to_string(), Style::default().fg(ACCENT)),
        Line::from(""),
        Line::styled(format!("QR: {}", qr), Style::default().fg(MUTED_TEXT)),
    ];
    let height = lines.len() as u16 + 2;
    let width = (area.width.saturating_mul(3) / 4).max(20);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(CARD_BORDER));
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, centered_rect_by_size(area, width, height));
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.screen() {
        SessionScreen::Idle => "Tap anywhere to begin",
        SessionScreen::Revealing { .. } => "",
        SessionScreen::Revealed { .. } => "Tap a button  (Left/Right + Enter also works)",
        SessionScreen::Browsing { .. } | SessionScreen::Embedded { .. } => "Tap anywhere to go back",
    };

    let mut spans = vec![Span::styled(hint, Style::default().fg(MUTED_TEXT))];
    if let Some(status) = app.status_line() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status, Style::default().fg(STATUS_ERROR)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
