use serde::{Deserialize, Serialize};

use crate::word_bank::DifficultyFilter;

pub const DAILY_GOALS: [u32; 4] = [25, 50, 100, 150];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Learning basic words and patterns",
            SkillLevel::Intermediate => "Comfortable with common words",
            SkillLevel::Advanced => "Ready for challenging words",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "camelCase")]
pub enum ThemeKind {
    #[default]
    #[strum(serialize = "Warm Parchment")]
    WarmParchment,
    #[strum(serialize = "Midnight")]
    Midnight,
    #[strum(serialize = "High Contrast")]
    HighContrast,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 3] = [
        ThemeKind::WarmParchment,
        ThemeKind::Midnight,
        ThemeKind::HighContrast,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Violet,
    Rose,
    Mint,
    Amber,
}

impl AccentColor {
    pub const ALL: [AccentColor; 4] = [
        AccentColor::Violet,
        AccentColor::Rose,
        AccentColor::Mint,
        AccentColor::Amber,
    ];

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            AccentColor::Violet => (0x6B, 0x4C, 0xE6),
            AccentColor::Rose => (0xFF, 0x6B, 0x9D),
            AccentColor::Mint => (0x00, 0xD9, 0xA3),
            AccentColor::Amber => (0xFF, 0xB8, 0x00),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub voice_enabled: bool,
    pub difficulty: DifficultyFilter,
    pub daily_goal: u32,
    pub is_premium: bool,
    pub initial_level: SkillLevel,
    pub theme: ThemeKind,
    pub accent_color: Option<AccentColor>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            voice_enabled: true,
            difficulty: DifficultyFilter::Mixed,
            daily_goal: 50,
            is_premium: false,
            initial_level: SkillLevel::Beginner,
            theme: ThemeKind::WarmParchment,
            accent_color: None,
        }
    }
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub voice_enabled: Option<bool>,
    pub difficulty: Option<DifficultyFilter>,
    pub daily_goal: Option<u32>,
    pub is_premium: Option<bool>,
    pub initial_level: Option<SkillLevel>,
    pub theme: Option<ThemeKind>,
    /// `Some(None)` clears the accent
    pub accent_color: Option<Option<AccentColor>>,
}

impl UserSettings {
    pub fn apply(&self, patch: &SettingsPatch) -> UserSettings {
        UserSettings {
            voice_enabled: patch.voice_enabled.unwrap_or(self.voice_enabled),
            difficulty: patch.difficulty.unwrap_or(self.difficulty),
            daily_goal: patch.daily_goal.unwrap_or(self.daily_goal),
            is_premium: patch.is_premium.unwrap_or(self.is_premium),
            initial_level: patch.initial_level.unwrap_or(self.initial_level),
            theme: patch.theme.unwrap_or(self.theme),
            accent_color: patch.accent_color.unwrap_or(self.accent_color),
        }
    }
}

/// Cycle through a fixed option list, wrapping at the end
pub fn next_in<T: PartialEq + Copy>(options: &[T], current: T) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    options[(idx + 1) % options.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = UserSettings::default();
        assert!(s.voice_enabled);
        assert_eq!(s.difficulty, DifficultyFilter::Mixed);
        assert_eq!(s.daily_goal, 50);
        assert!(!s.is_premium);
        assert_eq!(s.theme, ThemeKind::WarmParchment);
        assert_eq!(s.accent_color, None);
    }

    #[test]
    fn test_settings_are_plain_values() {
        let original = UserSettings::default();
        let mut edited = original;
        edited.daily_goal = 150;
        assert_eq!(original.daily_goal, 50);
        assert_eq!(edited.daily_goal, 150);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&UserSettings::default()).unwrap();
        assert!(json.contains("\"voiceEnabled\":true"));
        assert!(json.contains("\"difficulty\":\"mixed\""));
        assert!(json.contains("\"theme\":\"warmParchment\""));
        assert!(json.contains("\"accentColor\":null"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: UserSettings =
            serde_json::from_str(r#"{"difficulty":"hard","dailyGoal":100}"#).unwrap();
        assert_eq!(s.difficulty, DifficultyFilter::Hard);
        assert_eq!(s.daily_goal, 100);
        assert!(s.voice_enabled);
    }

    #[test]
    fn test_apply_patch() {
        let s = UserSettings::default();
        let patched = s.apply(&SettingsPatch {
            voice_enabled: Some(false),
            accent_color: Some(Some(AccentColor::Rose)),
            ..Default::default()
        });
        assert!(!patched.voice_enabled);
        assert_eq!(patched.accent_color, Some(AccentColor::Rose));
        assert_eq!(patched.daily_goal, s.daily_goal);

        let cleared = patched.apply(&SettingsPatch {
            accent_color: Some(None),
            ..Default::default()
        });
        assert_eq!(cleared.accent_color, None);
    }

    #[test]
    fn test_next_in_wraps() {
        assert_eq!(next_in(&DAILY_GOALS, 50), 100);
        assert_eq!(next_in(&DAILY_GOALS, 150), 25);
        assert_eq!(next_in(&DAILY_GOALS, 7), 50);
    }
}
