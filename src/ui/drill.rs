use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    drill::{DrillSession, Phase},
    results::ResultsSummary,
    scoring::Outcome,
    theme::Palette,
};

use super::{card, centered, frame_layout, header, key_hints};

/// Letter tiles for the current word: typed letters, then blanks.
/// After a submission each tile is colored by its verdict.
pub fn letter_tiles(session: &DrillSession, palette: &Palette) -> Line<'static> {
    let Some(word) = session.current_word() else {
        return Line::default();
    };
    let typed: Vec<char> = session.input().chars().collect();
    let marks = session.letter_marks();
    let spans = (0..word.len())
        .map(|idx| {
            let shown = typed.get(idx).copied().unwrap_or('_');
            let style = if session.feedback_visible() {
                match marks.get(idx) {
                    Some(Outcome::Correct) => palette.good(),
                    Some(Outcome::Incorrect) => palette.bad(),
                    _ => palette.bad().add_modifier(Modifier::DIM),
                }
            } else if idx < typed.len() {
                palette.bold()
            } else if idx == typed.len() {
                palette.dim().add_modifier(Modifier::UNDERLINED)
            } else {
                palette.dim()
            };
            Span::styled(format!(" {shown} "), style)
        })
        .collect::<Vec<Span>>();
    Line::from(spans)
}

/// One marker per word: ✓/✗ once answered, ● for the word being typed, ○ for the rest
pub fn progress_nodes(session: &DrillSession, palette: &Palette) -> Line<'static> {
    let typing = matches!(session.phase(), Phase::Presenting { .. });
    let spans = (0..session.word_count())
        .map(|idx| match session.results().get(idx) {
            Some(r) if r.correct => Span::styled(" ✓ ", palette.good()),
            Some(_) => Span::styled(" ✗ ", palette.bad()),
            None if typing && idx == session.index() => Span::styled(" ● ", palette.accent()),
            None => Span::styled(" ○ ", palette.dim()),
        })
        .collect::<Vec<Span>>();
    Line::from(spans)
}

pub fn render_drill(app: &App, f: &mut Frame, area: Rect) {
    let palette = app.theme.palette();
    let (head, body, foot) = frame_layout(area);

    let Some(session) = app.drill.as_ref() else {
        let message = match app.drill_unavailable {
            Some(difficulty) => format!(
                "No {difficulty} words are available. Pick another difficulty in settings."
            ),
            None => "Preparing your words...".to_string(),
        };
        f.render_widget(header("Practice", "", palette), head);
        f.render_widget(
            Paragraph::new(Span::styled(message, palette.dim()))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            centered(body, body.width, 3),
        );
        f.render_widget(key_hints(&[("esc", "home")], palette), foot);
        return;
    };

    let subtitle = format!(
        "Word {} of {}",
        (session.index() + 1).min(session.word_count()),
        session.word_count()
    );
    f.render_widget(header("Spelling Drill", &subtitle, palette), head);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // mastery
            Constraint::Length(2), // word progress
            Constraint::Length(3), // clue
            Constraint::Length(3), // tiles
            Constraint::Min(3),    // feedback
        ])
        .split(body);

    let mastery = Gauge::default()
        .gauge_style(palette.accent())
        .ratio(session.mastery() as f64 / 10.0)
        .label(format!("mastery {}/10", session.mastery()));
    f.render_widget(mastery, rows[0]);
    f.render_widget(
        Paragraph::new(progress_nodes(session, palette)).alignment(Alignment::Center),
        centered(rows[1], rows[1].width, 1),
    );

    if let Some(word) = session.current_word() {
        let mut clue = vec![Line::from(Span::styled(
            word.category.clone(),
            palette.accent(),
        ))];
        if let Some(hint) = &word.hint {
            clue.push(Line::from(Span::styled(hint.clone(), palette.bold())));
        }
        if let Some(phonetics) = &word.phonetics {
            clue.push(Line::from(Span::styled(phonetics.clone(), palette.dim())));
        }
        f.render_widget(Paragraph::new(clue).alignment(Alignment::Center), rows[2]);
    }

    f.render_widget(
        Paragraph::new(letter_tiles(session, palette)).alignment(Alignment::Center),
        centered(rows[3], rows[3].width, 1),
    );

    let (feedback, hints): (Vec<Line>, Vec<(&str, &str)>) = match session.phase() {
        Phase::Feedback { correct: true, .. } => (
            vec![Line::from(Span::styled(
                format!("Correct! +{} XP", app.config.xp_per_correct),
                palette.good(),
            ))],
            vec![("enter", "continue"), ("esc", "quit drill")],
        ),
        Phase::Feedback { correct: false, .. } => {
            let answer = session
                .current_word()
                .map(|w| w.text.clone())
                .unwrap_or_default();
            let mut lines = vec![
                Line::from(Span::styled("Not quite.", palette.bad())),
                Line::from(vec![
                    Span::styled("The correct spelling is ", palette.dim()),
                    Span::styled(answer, palette.bold()),
                ]),
            ];
            if let Some(tip) = session.tip() {
                lines.push(Line::from(Span::styled(format!("Tip: {tip}"), palette.dim())));
            }
            (lines, vec![("enter", "continue"), ("esc", "quit drill")])
        }
        _ => (
            Vec::new(),
            vec![("a-z", "type"), ("backspace", "erase"), ("enter", "check"), ("esc", "quit drill")],
        ),
    };
    f.render_widget(
        Paragraph::new(feedback)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[4],
    );
    f.render_widget(key_hints(&hints, palette), foot);
}

/// One line per attempted word: mark, word padded to `width`, category
pub fn result_lines(summary: &ResultsSummary, palette: &Palette) -> Vec<Line<'static>> {
    let width = summary
        .results
        .iter()
        .map(|r| r.word.text.width())
        .max()
        .unwrap_or(0);
    summary
        .results
        .iter()
        .map(|r| {
            let (mark, style) = if r.correct {
                ("✓", palette.good())
            } else {
                ("✗", palette.bad())
            };
            let padding = " ".repeat(width - r.word.text.width());
            let mut spans = vec![
                Span::styled(format!("{mark} "), style),
                Span::styled(format!("{}{padding}  ", r.word.text), palette.bold()),
                Span::styled(r.word.category.clone(), palette.dim()),
            ];
            if !r.correct {
                if let Some(hint) = &r.word.hint {
                    spans.push(Span::styled(format!("  ({hint})"), palette.dim()));
                }
            }
            Line::from(spans)
        })
        .collect()
}

pub fn render_results(app: &App, f: &mut Frame, area: Rect) {
    let palette = app.theme.palette();
    let (head, body, foot) = frame_layout(area);

    let empty = ResultsSummary::new(Vec::new());
    let summary = app.summary.as_ref().unwrap_or(&empty);
    let score = summary
        .accuracy
        .map(|a| format!("{a}%"))
        .unwrap_or_else(|| "—".to_string());
    f.render_widget(
        header(
            "Practice Complete!",
            &format!(
                "{score} · {} out of {} correct",
                summary.correct_count,
                summary.total()
            ),
            palette,
        ),
        head,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(body);

    f.render_widget(
        Paragraph::new(Span::styled(summary.encouragement(), palette.bold()))
            .block(card("Tip", palette))
            .alignment(Alignment::Center),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(result_lines(summary, palette)).block(card("Your Results", palette)),
        rows[1],
    );
    f.render_widget(
        key_hints(&[("enter", "practice again"), ("esc", "home")], palette),
        foot,
    );
}
