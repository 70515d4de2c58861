use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::capabilities::{Capabilities, Haptic, Sound, TerminalCapabilities};
use crate::config::Config;
use crate::confetti::Confetti;
use crate::drill::{Advance, DrillSession};
use crate::error::SpellError;
use crate::profile::Profile;
use crate::results::ResultsSummary;
use crate::runtime::AppEvent;
use crate::settings::{next_in, AccentColor, SettingsPatch, SkillLevel, ThemeKind, DAILY_GOALS};
use crate::theme::ThemeStore;
use crate::word_bank::{DifficultyFilter, WordBank};

const CONFETTI_PIECES: usize = 50;
pub const MAX_NAME_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Onboarding,
    Home,
    Drill,
    Results,
    Progress,
    Settings,
    Subscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Welcome,
    Level,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingState {
    pub step: OnboardingStep,
    pub level: SkillLevel,
    pub name: String,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            step: OnboardingStep::Welcome,
            level: SkillLevel::Beginner,
            name: String::new(),
        }
    }
}

/// Rows on the settings screen, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SettingsRow {
    #[strum(serialize = "Voice feedback")]
    Voice,
    #[strum(serialize = "Difficulty")]
    Difficulty,
    #[strum(serialize = "Daily goal")]
    DailyGoal,
    #[strum(serialize = "Theme")]
    Theme,
    #[strum(serialize = "Accent")]
    Accent,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 5] = [
        SettingsRow::Voice,
        SettingsRow::Difficulty,
        SettingsRow::DailyGoal,
        SettingsRow::Theme,
        SettingsRow::Accent,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Plan {
    Monthly,
    #[default]
    Yearly,
}

impl Plan {
    pub fn price(&self) -> &'static str {
        match self {
            Plan::Monthly => "$9.99/month",
            Plan::Yearly => "$79.99/year",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            Plan::Monthly => "Billed monthly",
            Plan::Yearly => "Save 33% • $6.67/month",
        }
    }
}

pub struct App {
    pub state: AppState,
    pub profile: Profile,
    pub bank: WordBank,
    pub config: Config,
    pub theme: ThemeStore,
    pub onboarding: OnboardingState,
    pub drill: Option<DrillSession>,
    /// Set when the chosen difficulty has no words
    pub drill_unavailable: Option<DifficultyFilter>,
    pub summary: Option<ResultsSummary>,
    pub confetti: Confetti,
    pub settings_cursor: usize,
    pub plan: Plan,
    pub difficulty_override: Option<DifficultyFilter>,
    pub should_quit: bool,
    area: (u16, u16),
    capabilities: Box<dyn Capabilities>,
    rng: StdRng,
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    pub fn new(profile: Profile, bank: WordBank, config: Config) -> Self {
        let settings = profile.settings();
        let state = if profile.is_onboarded() {
            AppState::Home
        } else {
            AppState::Onboarding
        };
        let capabilities = TerminalCapabilities::new(config.sound_enabled);
        Self {
            state,
            theme: ThemeStore::from_settings(&settings),
            profile,
            bank,
            config,
            onboarding: OnboardingState::default(),
            drill: None,
            drill_unavailable: None,
            summary: None,
            confetti: Confetti::new(),
            settings_cursor: 0,
            plan: Plan::default(),
            difficulty_override: None,
            should_quit: false,
            area: (80, 24),
            capabilities: Box::new(capabilities),
            rng: StdRng::from_entropy(),
            clock: local_today,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Box<dyn Capabilities>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_difficulty_override(mut self, difficulty: Option<DifficultyFilter>) -> Self {
        self.difficulty_override = difficulty;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn area(&self) -> (u16, u16) {
        self.area
    }

    pub fn effective_difficulty(&self) -> DifficultyFilter {
        self.difficulty_override
            .unwrap_or(self.profile.settings().difficulty)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.confetti.update(),
            AppEvent::Resize(w, h) => self.area = (w, h),
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::InputClosed => {
                warn!("terminal input closed, exiting");
                self.should_quit = true;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.state {
            AppState::Onboarding => self.on_onboarding_key(key.code),
            AppState::Home => self.on_home_key(key.code),
            AppState::Drill => self.on_drill_key(key.code),
            AppState::Results => self.on_results_key(key.code),
            AppState::Progress => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Backspace) {
                    self.state = AppState::Home;
                }
            }
            AppState::Settings => self.on_settings_key(key.code),
            AppState::Subscription => self.on_subscription_key(key.code),
        }
    }

    fn on_onboarding_key(&mut self, code: KeyCode) {
        let ob = &mut self.onboarding;
        match (ob.step, code) {
            (_, KeyCode::Esc) => self.should_quit = true,
            (OnboardingStep::Welcome, KeyCode::Enter) => ob.step = OnboardingStep::Level,
            (OnboardingStep::Level, KeyCode::Up) => {
                let idx = SkillLevel::ALL.iter().position(|l| *l == ob.level).unwrap_or(0);
                ob.level = SkillLevel::ALL[idx.saturating_sub(1)];
            }
            (OnboardingStep::Level, KeyCode::Down) => {
                let idx = SkillLevel::ALL.iter().position(|l| *l == ob.level).unwrap_or(0);
                ob.level = SkillLevel::ALL[(idx + 1).min(SkillLevel::ALL.len() - 1)];
            }
            (OnboardingStep::Level, KeyCode::Enter) => ob.step = OnboardingStep::Name,
            (OnboardingStep::Name, KeyCode::Char(c)) => {
                if ob.name.chars().count() < MAX_NAME_LEN && !c.is_control() {
                    ob.name.push(c);
                }
            }
            (OnboardingStep::Name, KeyCode::Backspace) => {
                ob.name.pop();
            }
            (OnboardingStep::Name, KeyCode::Enter) => {
                if !ob.name.trim().is_empty() {
                    let (name, level) = (ob.name.clone(), ob.level);
                    self.profile.complete_onboarding(&name, level);
                    self.state = AppState::Home;
                }
            }
            _ => {}
        }
    }

    fn on_home_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('p') => self.start_drill(),
            KeyCode::Char('g') => self.state = AppState::Progress,
            KeyCode::Char('s') => self.state = AppState::Settings,
            KeyCode::Char('u') if !self.profile.settings().is_premium => {
                self.state = AppState::Subscription
            }
            _ => {}
        }
    }

    pub fn start_drill(&mut self) {
        let difficulty = self.effective_difficulty();
        let words = self.bank.select(difficulty, self.config.words_per_session.max(1));
        self.summary = None;
        self.confetti.stop();
        self.state = AppState::Drill;
        match DrillSession::new(words) {
            Ok(session) => {
                info!("starting {difficulty} drill with {} words", session.word_count());
                self.drill = Some(
                    session
                        .with_xp_reward(self.config.xp_per_correct)
                        .with_baseline(self.profile.stats().words_learned),
                );
                self.drill_unavailable = None;
            }
            Err(SpellError::EmptySession) => {
                warn!("no words available for {difficulty} difficulty");
                self.drill = None;
                self.drill_unavailable = Some(difficulty);
            }
            Err(e) => {
                warn!("could not start drill: {e}");
                self.drill = None;
                self.drill_unavailable = Some(difficulty);
            }
        }
    }

    fn on_drill_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            info!("drill abandoned");
            self.drill = None;
            self.confetti.stop();
            self.state = AppState::Home;
            return;
        }
        let Some(session) = self.drill.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(c) => {
                if session.append_letter(c) {
                    self.capabilities.haptic(Haptic::Light);
                    self.capabilities.play_sound(Sound::Tap);
                }
            }
            KeyCode::Backspace => {
                if session.backspace() {
                    self.capabilities.haptic(Haptic::Light);
                }
            }
            KeyCode::Enter => {
                if session.feedback_visible() {
                    self.continue_drill();
                } else {
                    self.submit_word();
                }
            }
            _ => {}
        }
    }

    /// Score the current input and apply its rewards
    pub fn submit_word(&mut self) {
        let Some(session) = self.drill.as_mut() else {
            return;
        };
        let Some(submission) = session.submit(&mut self.rng) else {
            return;
        };
        let word = session
            .results()
            .last()
            .map(|r| r.word.text.clone())
            .unwrap_or_default();

        if submission.correct {
            let level_before = self.profile.stats().level;
            self.profile.add_xp(submission.xp_awarded);
            let stats = self.profile.increment_words_learned();
            self.capabilities.haptic(Haptic::Success);
            self.capabilities.play_sound(Sound::Success);
            if self.profile.settings().voice_enabled {
                self.capabilities.speak(&word);
            }
            if stats.level > level_before {
                info!("level up: {level_before} -> {}", stats.level);
                self.capabilities.play_sound(Sound::LevelUp);
            }
            let (w, h) = self.area;
            self.confetti.launch(w, h, CONFETTI_PIECES, &mut self.rng);
        } else {
            self.capabilities.haptic(Haptic::Error);
            self.capabilities.play_sound(Sound::Error);
        }
    }

    pub fn continue_drill(&mut self) {
        let Some(session) = self.drill.as_mut() else {
            return;
        };
        match session.advance() {
            Some(Advance::Next { .. }) => {}
            Some(Advance::Complete { payload }) => {
                let outcome = session.outcome();
                let today = self.today();
                self.profile.record_session_outcome(&outcome, today);
                let summary = ResultsSummary::from_payload(Some(&payload));
                if summary.is_perfect() {
                    self.capabilities.play_sound(Sound::Achievement);
                }
                self.summary = Some(summary);
                self.drill = None;
                self.state = AppState::Results;
            }
            None => {}
        }
    }

    fn on_results_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Char('p') => self.start_drill(),
            KeyCode::Esc | KeyCode::Char('h') => {
                self.confetti.stop();
                self.state = AppState::Home;
            }
            _ => {}
        }
    }

    fn on_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('h') => self.state = AppState::Home,
            KeyCode::Up => self.settings_cursor = self.settings_cursor.saturating_sub(1),
            KeyCode::Down => {
                self.settings_cursor = (self.settings_cursor + 1).min(SettingsRow::ALL.len() - 1)
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ') => {
                self.cycle_setting(SettingsRow::ALL[self.settings_cursor])
            }
            KeyCode::Char('u') if !self.profile.settings().is_premium => {
                self.state = AppState::Subscription
            }
            _ => {}
        }
    }

    pub fn cycle_setting(&mut self, row: SettingsRow) {
        let current = self.profile.settings();
        let patch = match row {
            SettingsRow::Voice => SettingsPatch {
                voice_enabled: Some(!current.voice_enabled),
                ..Default::default()
            },
            SettingsRow::Difficulty => SettingsPatch {
                difficulty: Some(next_in(&DifficultyFilter::ALL, current.difficulty)),
                ..Default::default()
            },
            SettingsRow::DailyGoal => SettingsPatch {
                daily_goal: Some(next_in(&DAILY_GOALS, current.daily_goal)),
                ..Default::default()
            },
            SettingsRow::Theme => SettingsPatch {
                theme: Some(next_in(&ThemeKind::ALL, current.theme)),
                ..Default::default()
            },
            SettingsRow::Accent => {
                let next = match current.accent_color {
                    None => Some(AccentColor::ALL[0]),
                    Some(c) if c == AccentColor::ALL[AccentColor::ALL.len() - 1] => None,
                    Some(c) => Some(next_in(&AccentColor::ALL, c)),
                };
                SettingsPatch {
                    accent_color: Some(next),
                    ..Default::default()
                }
            }
        };
        let updated = self.profile.update_settings(&patch);
        self.theme.set(updated.theme, updated.accent_color);
    }

    fn on_subscription_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.state = AppState::Home,
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.plan = match self.plan {
                    Plan::Monthly => Plan::Yearly,
                    Plan::Yearly => Plan::Monthly,
                }
            }
            KeyCode::Enter => {
                info!("premium unlocked ({} plan)", self.plan);
                self.profile.update_settings(&SettingsPatch {
                    is_premium: Some(true),
                    ..Default::default()
                });
                self.state = AppState::Home;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::RecordingCapabilities;
    use crate::store::SqliteStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn onboarded_app() -> App {
        let mut profile = Profile::open(Box::new(SqliteStore::in_memory().unwrap())).unwrap();
        profile.complete_onboarding("Ada", SkillLevel::Beginner);
        App::new(profile, WordBank::english().unwrap(), Config::default())
            .with_capabilities(Box::new(RecordingCapabilities::new()))
            .with_rng_seed(11)
    }

    #[test]
    fn test_first_run_starts_onboarding() {
        let profile = Profile::open(Box::new(SqliteStore::in_memory().unwrap())).unwrap();
        let app = App::new(profile, WordBank::english().unwrap(), Config::default());
        assert_eq!(app.state, AppState::Onboarding);
    }

    #[test]
    fn test_onboarding_flow() {
        let profile = Profile::open(Box::new(SqliteStore::in_memory().unwrap())).unwrap();
        let mut app = App::new(profile, WordBank::english().unwrap(), Config::default());
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.onboarding.step, OnboardingStep::Name);
        // blank names are refused
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Onboarding);
        for c in "Bo".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Home);
        assert_eq!(app.profile.user_name(), "Bo");
        assert_eq!(app.profile.settings().initial_level, SkillLevel::Intermediate);
    }

    #[test]
    fn test_home_navigation() {
        let mut app = onboarded_app();
        assert_eq!(app.state, AppState::Home);
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.state, AppState::Settings);
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.state, AppState::Progress);
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = onboarded_app();
        app.start_drill();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.drill.as_ref().unwrap().input(), "");
    }

    #[test]
    fn test_empty_difficulty_shows_unavailable() {
        let mut profile = Profile::open(Box::new(SqliteStore::in_memory().unwrap())).unwrap();
        profile.complete_onboarding("Ada", SkillLevel::Beginner);
        let bank = WordBank::from_words(
            "tiny",
            vec![crate::word_bank::Word::new(
                "1",
                "cat",
                crate::word_bank::Difficulty::Easy,
                "Animals",
            )],
        );
        let mut app = App::new(profile, bank, Config::default())
            .with_difficulty_override(Some(DifficultyFilter::Hard));
        app.start_drill();
        assert_eq!(app.state, AppState::Drill);
        assert!(app.drill.is_none());
        assert_eq!(app.drill_unavailable, Some(DifficultyFilter::Hard));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Home);
    }

    #[test]
    fn test_zero_word_config_still_starts_a_drill() {
        let mut profile = Profile::open(Box::new(SqliteStore::in_memory().unwrap())).unwrap();
        profile.complete_onboarding("Ada", SkillLevel::Beginner);
        let config = Config {
            words_per_session: 0,
            ..Config::default()
        };
        let mut app = App::new(profile, WordBank::english().unwrap(), config)
            .with_capabilities(Box::new(RecordingCapabilities::new()));
        app.start_drill();
        assert_eq!(app.drill_unavailable, None);
        assert_eq!(app.drill.as_ref().unwrap().word_count(), 1);
    }

    #[test]
    fn test_settings_cycle_updates_theme() {
        let mut app = onboarded_app();
        app.state = AppState::Settings;
        app.settings_cursor = 3;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.profile.settings().theme, ThemeKind::Midnight);
        assert_eq!(app.theme.kind(), ThemeKind::Midnight);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.profile.settings().accent_color, Some(AccentColor::Violet));
        assert_eq!(app.theme.accent(), Some(AccentColor::Violet));
    }

    fn spell(app: &mut App, word: &str) {
        for c in word.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_voice_toggle_keeps_injected_capabilities() {
        let recorder = RecordingCapabilities::new();
        let mut app = onboarded_app().with_capabilities(Box::new(recorder.clone()));
        app.cycle_setting(SettingsRow::Voice);
        app.cycle_setting(SettingsRow::Voice);
        assert!(app.profile.settings().voice_enabled);

        app.start_drill();
        spell(&mut app, "apple");
        let log = recorder.log();
        assert_eq!(log.haptics.first(), Some(&Haptic::Light));
        assert!(log.sounds.contains(&Sound::Tap));
        assert!(log.sounds.contains(&Sound::Success));
        assert_eq!(log.spoken, vec!["apple".to_string()]);
    }

    #[test]
    fn test_voice_off_skips_speech_only() {
        let recorder = RecordingCapabilities::new();
        let mut app = onboarded_app().with_capabilities(Box::new(recorder.clone()));
        app.cycle_setting(SettingsRow::Voice);
        assert!(!app.profile.settings().voice_enabled);

        app.start_drill();
        spell(&mut app, "apple");
        let log = recorder.log();
        assert!(log.spoken.is_empty());
        assert!(log.sounds.contains(&Sound::Success));
        assert!(log.haptics.contains(&Haptic::Success));
    }

    #[test]
    fn test_accent_cycles_back_to_none() {
        let mut app = onboarded_app();
        for _ in 0..AccentColor::ALL.len() {
            app.cycle_setting(SettingsRow::Accent);
        }
        assert_eq!(app.profile.settings().accent_color, Some(AccentColor::Amber));
        app.cycle_setting(SettingsRow::Accent);
        assert_eq!(app.profile.settings().accent_color, None);
    }

    #[test]
    fn test_subscription_unlocks_premium() {
        let mut app = onboarded_app();
        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.state, AppState::Subscription);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.plan, Plan::Monthly);
        app.handle_key(key(KeyCode::Enter));
        assert!(app.profile.settings().is_premium);
        assert_eq!(app.state, AppState::Home);
        // no upsell once premium
        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.state, AppState::Home);
    }

    #[test]
    fn test_resize_and_tick() {
        let mut app = onboarded_app();
        app.handle_event(AppEvent::Resize(120, 40));
        assert_eq!(app.area(), (120, 40));
        app.handle_event(AppEvent::Tick);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_closed_input_quits() {
        let mut app = onboarded_app();
        app.start_drill();
        app.handle_event(AppEvent::InputClosed);
        assert!(app.should_quit);
    }
}
