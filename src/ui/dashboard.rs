use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{BarChart, Gauge, Paragraph},
    Frame,
};

use crate::{app::App, progress::UserStats, settings::UserSettings, theme::Palette};

use super::{card, charting, frame_layout, header, key_hints};

/// Streak, words learned and accuracy on one line
pub fn stat_line(stats: &UserStats) -> String {
    [
        format!("{} day streak", stats.current_streak),
        format!("{} words", stats.words_learned),
        format!("{}% accuracy", stats.accuracy),
    ]
    .iter()
    .join("  ·  ")
}

pub fn daily_goal_label(stats: &UserStats, settings: &UserSettings) -> String {
    let progress = stats.daily_goal_progress(settings.daily_goal);
    if progress >= settings.daily_goal {
        "Daily goal reached!".to_string()
    } else {
        format!(
            "{progress} / {} XP · {} XP to reach your daily goal",
            settings.daily_goal,
            settings.daily_goal - progress
        )
    }
}

fn level_gauge(stats: &UserStats, palette: &Palette) -> Gauge<'static> {
    Gauge::default()
        .block(card(&format!("Level {}", stats.level), palette))
        .gauge_style(Style::default().fg(palette.primary))
        .ratio(stats.xp_into_level() as f64 / 100.0)
        .label(format!(
            "{} XP · {} to level {}",
            stats.total_xp,
            stats.xp_for_next_level() - stats.total_xp,
            stats.level + 1
        ))
}

pub fn render_home(app: &App, f: &mut Frame, area: Rect) {
    let palette = app.theme.palette();
    let stats = app.profile.stats();
    let settings = app.profile.settings();
    let (head, body, foot) = frame_layout(area);

    let greeting = if app.profile.user_name().is_empty() {
        "Welcome back!".to_string()
    } else {
        format!("Hi, {}!", app.profile.user_name())
    };
    let plan = if settings.is_premium {
        "Premium Member"
    } else {
        "Free Account"
    };
    f.render_widget(header(&greeting, plan, palette), head);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // level
            Constraint::Length(1),
            Constraint::Length(1), // stats
            Constraint::Length(1),
            Constraint::Length(3), // daily goal
            Constraint::Length(1),
            Constraint::Min(1), // last practice
        ])
        .split(body);

    f.render_widget(level_gauge(&stats, palette), rows[0]);
    f.render_widget(
        Paragraph::new(Span::styled(stat_line(&stats), palette.bold())).alignment(Alignment::Center),
        rows[2],
    );

    let goal = settings.daily_goal.max(1);
    let goal_gauge = Gauge::default()
        .block(card("Daily Goal", palette))
        .gauge_style(Style::default().fg(palette.success))
        .ratio((stats.daily_goal_progress(goal) as f64 / goal as f64).min(1.0))
        .label(daily_goal_label(&stats, &settings));
    f.render_widget(goal_gauge, rows[4]);

    let last = charting::practiced_label(app.profile.last_practice(), app.today());
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(format!("Last practice: {last}"), palette.dim())),
            Line::from(Span::styled(
                format!("Difficulty: {}", app.effective_difficulty()),
                palette.dim(),
            )),
        ])
        .alignment(Alignment::Center),
        rows[6],
    );

    let mut hints = vec![("enter", "practice"), ("g", "progress"), ("s", "settings")];
    if !settings.is_premium {
        hints.push(("u", "upgrade"));
    }
    hints.push(("q", "quit"));
    f.render_widget(key_hints(&hints, palette), foot);
}

pub fn render_progress(app: &App, f: &mut Frame, area: Rect) {
    let palette = app.theme.palette();
    let stats = app.profile.stats();
    let points = app.bank.weekly_progress();
    let (head, body, foot) = frame_layout(area);

    f.render_widget(header("Your Progress", "This week", palette), head);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(body);

    let (xp_change, accuracy_change) = charting::weekly_change(points).unwrap_or((0, 0));
    let totals = vec![
        Line::from(vec![
            Span::styled(format!("{} XP", stats.total_xp), palette.bold()),
            Span::styled(format!("  (+{xp_change} this week)"), palette.dim()),
        ]),
        Line::from(vec![
            Span::styled(format!("{}% accuracy", stats.accuracy), palette.bold()),
            Span::styled(
                format!("  (+{accuracy_change}% improvement)"),
                palette.dim(),
            ),
        ]),
    ];
    f.render_widget(
        Paragraph::new(totals)
            .block(card("Totals", palette))
            .alignment(Alignment::Center),
        rows[0],
    );

    let bars = charting::xp_bars(points);
    let data: Vec<(&str, u64)> = bars.iter().map(|(l, v)| (l.as_str(), *v)).collect();
    let chart = BarChart::default()
        .block(card("Weekly XP", palette))
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(palette.primary))
        .value_style(palette.bold());
    f.render_widget(chart, rows[1]);

    let achievements = vec![
        Line::from(Span::styled(
            format!("{} day longest streak", stats.longest_streak),
            palette.bold(),
        )),
        Line::from(Span::styled(
            format!("{} words mastered", stats.words_learned),
            palette.bold(),
        )),
    ];
    f.render_widget(
        Paragraph::new(achievements)
            .block(card("Achievements", palette))
            .alignment(Alignment::Center),
        rows[2],
    );

    f.render_widget(key_hints(&[("esc", "home")], palette), foot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_line() {
        let stats = UserStats {
            current_streak: 3,
            words_learned: 12,
            accuracy: 85,
            ..Default::default()
        };
        assert_eq!(stat_line(&stats), "3 day streak  ·  12 words  ·  85% accuracy");
    }

    #[test]
    fn test_daily_goal_label() {
        let mut stats = UserStats::default();
        stats.add_xp(30);
        let settings = UserSettings::default();
        assert_eq!(
            daily_goal_label(&stats, &settings),
            "30 / 50 XP · 20 XP to reach your daily goal"
        );
    }
}
