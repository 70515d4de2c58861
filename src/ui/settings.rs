use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app::{App, Plan, SettingsRow},
    settings::UserSettings,
};

use super::{card, centered, frame_layout, header, key_hints};

pub fn setting_value(row: SettingsRow, settings: &UserSettings) -> String {
    match row {
        SettingsRow::Voice => (if settings.voice_enabled { "on" } else { "off" }).to_string(),
        SettingsRow::Difficulty => settings.difficulty.to_string(),
        SettingsRow::DailyGoal => format!("{} XP", settings.daily_goal),
        SettingsRow::Theme => settings.theme.to_string(),
        SettingsRow::Accent => settings
            .accent_color
            .map(|c| c.to_string())
            .unwrap_or_else(|| "theme default".to_string()),
    }
}

pub fn render_settings(app: &App, f: &mut Frame, area: Rect) {
    let palette = app.theme.palette();
    let settings = app.profile.settings();
    let (head, body, foot) = frame_layout(area);

    let account = if settings.is_premium {
        "Premium Member"
    } else {
        "Free Account"
    };
    f.render_widget(header("Settings", account, palette), head);

    let lines = SettingsRow::ALL
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let selected = idx == app.settings_cursor;
            let marker = if selected { "▸ " } else { "  " };
            let label_style = if selected { palette.accent() } else { palette.bold() };
            Line::from(vec![
                Span::styled(format!("{marker}{:<16}", row.to_string()), label_style),
                Span::styled(setting_value(*row, &settings), palette.dim()),
            ])
        })
        .collect::<Vec<Line>>();
    f.render_widget(
        Paragraph::new(lines).block(card("Preferences", palette)),
        centered(body, 50, SettingsRow::ALL.len() as u16 + 2),
    );

    let mut hints = vec![("↑/↓", "select"), ("enter", "change")];
    if !settings.is_premium {
        hints.push(("u", "upgrade"));
    }
    hints.push(("esc", "home"));
    f.render_widget(key_hints(&hints, palette), foot);
}

fn plan_card(plan: Plan, selected: bool, app: &App) -> Paragraph<'static> {
    let palette = app.theme.palette();
    let title = if selected {
        format!("▸ {plan}")
    } else {
        plan.to_string()
    };
    Paragraph::new(vec![
        Line::from(Span::styled(plan.price(), palette.bold())),
        Line::from(Span::styled(plan.blurb(), palette.dim())),
    ])
    .block(card(&title, palette))
    .alignment(Alignment::Center)
}

pub fn render_subscription(app: &App, f: &mut Frame, area: Rect) {
    let palette = app.theme.palette();
    let (head, body, foot) = frame_layout(area);

    f.render_widget(
        header(
            "Go Premium",
            "Unlimited drills, every difficulty, detailed progress",
            palette,
        ),
        head,
    );

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(centered(body, 60, 4));
    f.render_widget(plan_card(Plan::Monthly, app.plan == Plan::Monthly, app), cols[0]);
    f.render_widget(plan_card(Plan::Yearly, app.plan == Plan::Yearly, app), cols[1]);

    f.render_widget(
        key_hints(&[("←/→", "choose plan"), ("enter", "subscribe"), ("esc", "not now")], palette),
        foot,
    );
}
