pub mod charting;
pub mod dashboard;
pub mod drill;
pub mod onboarding;
pub mod screen;
pub mod settings;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::{app::App, confetti::Confetti, theme::Palette};

const HORIZONTAL_MARGIN: u16 = 4;
const VERTICAL_MARGIN: u16 = 1;

const CONFETTI_COLORS: [Color; 6] = [
    Color::Magenta,
    Color::Yellow,
    Color::Cyan,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
];

/// Render whichever screen is active, then the confetti overlay
pub fn draw(app: &App, f: &mut Frame) {
    let area = f.area();
    screen::current_screen(&app.state).render(app, f, area);
    if app.confetti.is_active() {
        f.render_widget(ConfettiLayer(&app.confetti), area);
    }
}

/// Split `area` into header, body and key-hint footer
pub fn frame_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

pub fn header(title: &str, subtitle: &str, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(Span::styled(title.to_string(), palette.accent())),
        Line::from(Span::styled(subtitle.to_string(), palette.dim())),
    ])
    .alignment(Alignment::Center)
}

/// One-line key legend, e.g. `[("enter", "start"), ("esc", "back")]`
pub fn key_hints(hints: &[(&str, &str)], palette: &Palette) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, (k, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", palette.dim()));
        }
        spans.push(Span::styled(format!("({k})"), palette.accent()));
        spans.push(Span::styled(format!(" {action}"), palette.dim()));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

pub fn card(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(format!(" {title} "), palette.accent()))
}

/// A `width` x `height` rect centered in `area`, clipped to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

struct ConfettiLayer<'a>(&'a Confetti);

impl Widget for ConfettiLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for piece in &self.0.pieces {
            if piece.x < 0.0 || piece.y < 0.0 {
                continue;
            }
            let (x, y) = (piece.x as u16, piece.y as u16);
            if x >= area.width || y >= area.height {
                continue;
            }
            let color = CONFETTI_COLORS[piece.color_index % CONFETTI_COLORS.len()];
            buf[(area.x + x, area.y + y)]
                .set_char(piece.symbol)
                .set_fg(color);
        }
    }
}
