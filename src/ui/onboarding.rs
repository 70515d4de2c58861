use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{
    app::{App, OnboardingStep},
    settings::SkillLevel,
};

use super::{card, centered, frame_layout, header, key_hints};

pub fn render_onboarding(app: &App, f: &mut Frame, area: Rect) {
    let palette = app.theme.palette();
    let ob = &app.onboarding;
    let (head, body, foot) = frame_layout(area);
    let panel = centered(body, 60, 9);

    match ob.step {
        OnboardingStep::Welcome => {
            f.render_widget(header("SpellRight", "Step 1 of 3", palette), head);
            let lines = vec![
                Line::from(Span::styled("Master spelling, one word at a time.", palette.bold())),
                Line::default(),
                Line::from(Span::styled(
                    "Complete short spelling drills with words matched to your level.",
                    palette.dim(),
                )),
                Line::from(Span::styled(
                    "Earn XP, keep your streak alive, and level up.",
                    palette.dim(),
                )),
            ];
            f.render_widget(
                Paragraph::new(lines)
                    .block(card("Welcome", palette))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                panel,
            );
            f.render_widget(key_hints(&[("enter", "get started"), ("esc", "quit")], palette), foot);
        }
        OnboardingStep::Level => {
            f.render_widget(
                header("What's your spelling level?", "Step 2 of 3", palette),
                head,
            );
            let lines = SkillLevel::ALL
                .iter()
                .flat_map(|level| {
                    let selected = *level == ob.level;
                    let marker = if selected { "▸ " } else { "  " };
                    let style = if selected { palette.accent() } else { palette.bold() };
                    [
                        Line::from(Span::styled(format!("{marker}{level}"), style)),
                        Line::from(Span::styled(format!("    {}", level.description()), palette.dim())),
                    ]
                })
                .collect::<Vec<Line>>();
            f.render_widget(Paragraph::new(lines).block(card("Skill level", palette)), panel);
            f.render_widget(
                key_hints(&[("↑/↓", "choose"), ("enter", "next"), ("esc", "quit")], palette),
                foot,
            );
        }
        OnboardingStep::Name => {
            f.render_widget(header("What's your name?", "Step 3 of 3", palette), head);
            let lines = vec![
                Line::default(),
                Line::from(vec![
                    Span::styled(ob.name.clone(), palette.bold()),
                    Span::styled("▏", palette.accent()),
                ]),
            ];
            f.render_widget(
                Paragraph::new(lines)
                    .block(card("Name", palette))
                    .alignment(Alignment::Center),
                centered(body, 40, 5),
            );
            f.render_widget(
                key_hints(&[("enter", "start practicing"), ("esc", "quit")], palette),
                foot,
            );
        }
    }
}
