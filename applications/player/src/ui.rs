//! Terminal UI rendering
//!
//! Pure draw functions over [`PlayerState`]; all mutation happens in the
//! app loop before a frame is drawn.

use std::time::{Duration, Instant};

use matinee_core::{format_time, VideoAsset};
use matinee_playback::{PlayerState, SplashFrame};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(5);

const HELP_LINE: &str =
    " space play/pause | enter play | n/p next/prev | left/right seek | x rate | m mute | r rescan | q quit";

/// A transient message shown in the status line
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Draw one frame of the player screen
pub fn draw(
    frame: &mut Frame,
    state: &PlayerState,
    list_state: &mut ListState,
    toasts: &[Toast],
    splash: Option<SplashFrame>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_video_list(frame, rows[0], state, list_state);
    draw_transport(frame, rows[1], state);
    draw_status_line(frame, rows[2], toasts);

    if let Some(splash) = splash {
        draw_splash(frame, splash);
    }
}

fn draw_video_list(
    frame: &mut Frame,
    area: Rect,
    state: &PlayerState,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = state
        .videos
        .iter()
        .map(|video| {
            let selected = state
                .current
                .as_ref()
                .is_some_and(|current| current.id == video.id);
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            let mut spans = vec![Span::styled(format!("{marker}{}", video.filename), style)];
            if let Some(detail) = detail_label(video) {
                spans.push(Span::styled(
                    format!("  {detail}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(" Library ({}) ", state.videos.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(list, area, list_state);
}

/// Scan metadata shown dimmed after the filename, when the scan had it
fn detail_label(video: &VideoAsset) -> Option<String> {
    let size = video.size_bytes.map(format_size);
    let date = video.modified.map(|m| m.format("%Y-%m-%d").to_string());
    match (size, date) {
        (Some(size), Some(date)) => Some(format!("{size}, {date}")),
        (Some(size), None) => Some(size),
        (None, Some(date)) => Some(date),
        (None, None) => None,
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn draw_transport(frame: &mut Frame, area: Rect, state: &PlayerState) {
    let line = match &state.current {
        Some(video) => {
            let indicator = if state.is_loading {
                "..."
            } else if state.is_playing {
                "playing"
            } else {
                "paused"
            };
            let volume = if state.volume < 0.5 { "muted" } else { "vol 100%" };
            Line::from(vec![
                Span::styled(
                    format!(" [{indicator}] "),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    video.filename.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  {} / {}  {}x  {}",
                    format_time(state.position_ms),
                    format_time(state.duration_ms),
                    state.rate,
                    volume,
                )),
            ])
        }
        None => Line::from(Span::styled(
            " nothing playing",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let transport =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Playback "));
    frame.render_widget(transport, area);
}

fn draw_status_line(frame: &mut Frame, area: Rect, toasts: &[Toast]) {
    let line = if toasts.is_empty() {
        Line::from(Span::styled(HELP_LINE, Style::default().fg(Color::DarkGray)))
    } else {
        let joined = toasts
            .iter()
            .map(|toast| toast.message.as_str())
            .collect::<Vec<_>>()
            .join("  |  ");
        Line::from(Span::styled(
            format!(" {joined}"),
            Style::default().fg(Color::Yellow),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_splash(frame: &mut Frame, splash: SplashFrame) {
    if !splash.is_visible() {
        return;
    }

    let area = splash_rect(frame.area(), splash.scale);
    // The terminal has no alpha channel; fade the foreground through gray.
    let level = (splash.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    let style = Style::default().fg(Color::Rgb(level, level, level));

    let banner = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "M A T I N E E",
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(style));

    frame.render_widget(Clear, area);
    frame.render_widget(banner, area);
}

/// Center a box whose footprint tracks the spring scale
fn splash_rect(screen: Rect, scale: f32) -> Rect {
    const BASE_WIDTH: u16 = 31;
    const BASE_HEIGHT: u16 = 5;

    let width = ((f32::from(BASE_WIDTH) * scale).round() as u16).min(screen.width);
    let height = ((f32::from(BASE_HEIGHT) * scale).round() as u16).min(screen.height);
    let x = screen.x + screen.width.saturating_sub(width) / 2;
    let y = screen.y + screen.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
