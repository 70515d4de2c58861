use ratatui::{layout::Rect, Frame};

use crate::app::{App, AppState};

use super::{dashboard, drill, onboarding, settings};

/// A UI screen boundary: renders one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect);
}

pub struct OnboardingScreen;

impl Screen for OnboardingScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        onboarding::render_onboarding(app, f, area);
    }
}

pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        dashboard::render_home(app, f, area);
    }
}

pub struct DrillScreen;

impl Screen for DrillScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        drill::render_drill(app, f, area);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        drill::render_results(app, f, area);
    }
}

pub struct ProgressScreen;

impl Screen for ProgressScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        dashboard::render_progress(app, f, area);
    }
}

pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        settings::render_settings(app, f, area);
    }
}

pub struct SubscriptionScreen;

impl Screen for SubscriptionScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        settings::render_subscription(app, f, area);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Onboarding => Box::new(OnboardingScreen),
        AppState::Home => Box::new(HomeScreen),
        AppState::Drill => Box::new(DrillScreen),
        AppState::Results => Box::new(ResultsScreen),
        AppState::Progress => Box::new(ProgressScreen),
        AppState::Settings => Box::new(SettingsScreen),
        AppState::Subscription => Box::new(SubscriptionScreen),
    }
}
