use ratatui::style::{Color, Modifier, Style};

use crate::settings::{AccentColor, ThemeKind, UserSettings};

/// Resolved colors for one theme/accent combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub text: Color,
    pub text_dim: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub border: Color,
}

impl Palette {
    fn base(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::WarmParchment => Self {
                primary: Color::Rgb(0x6B, 0x4C, 0xE6),
                text: Color::Rgb(0x3B, 0x2F, 0x2F),
                text_dim: Color::Rgb(0x8C, 0x7B, 0x6B),
                success: Color::Rgb(0x00, 0xC8, 0x96),
                error: Color::Rgb(0xFF, 0x57, 0x57),
                warning: Color::Rgb(0xFF, 0xB8, 0x00),
                border: Color::Rgb(0xD6, 0xC7, 0xA1),
            },
            ThemeKind::Midnight => Self {
                primary: Color::Rgb(0x8B, 0x5C, 0xF6),
                text: Color::Rgb(0xE5, 0xE7, 0xEB),
                text_dim: Color::Rgb(0x9C, 0xA3, 0xAF),
                success: Color::Rgb(0x00, 0xD9, 0xA3),
                error: Color::Rgb(0xFF, 0x6B, 0x6B),
                warning: Color::Rgb(0xFF, 0xC8, 0x3D),
                border: Color::Rgb(0x37, 0x41, 0x51),
            },
            ThemeKind::HighContrast => Self {
                primary: Color::Yellow,
                text: Color::White,
                text_dim: Color::Gray,
                success: Color::Green,
                error: Color::Red,
                warning: Color::Yellow,
                border: Color::White,
            },
        }
    }

    pub fn bold(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn good(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    pub fn bad(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

/// Owns the active theme. Held by the app and handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStore {
    kind: ThemeKind,
    accent: Option<AccentColor>,
    palette: Palette,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(ThemeKind::default(), None)
    }
}

impl ThemeStore {
    pub fn new(kind: ThemeKind, accent: Option<AccentColor>) -> Self {
        Self {
            kind,
            accent,
            palette: Self::derive(kind, accent),
        }
    }

    pub fn from_settings(settings: &UserSettings) -> Self {
        Self::new(settings.theme, settings.accent_color)
    }

    fn derive(kind: ThemeKind, accent: Option<AccentColor>) -> Palette {
        let mut palette = Palette::base(kind);
        if let Some(accent) = accent {
            let (r, g, b) = accent.rgb();
            palette.primary = Color::Rgb(r, g, b);
        }
        palette
    }

    pub fn set(&mut self, kind: ThemeKind, accent: Option<AccentColor>) {
        self.kind = kind;
        self.accent = accent;
        self.palette = Self::derive(kind, accent);
    }

    pub fn kind(&self) -> ThemeKind {
        self.kind
    }

    pub fn accent(&self) -> Option<AccentColor> {
        self.accent
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
