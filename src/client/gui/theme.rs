use crate::client::services::response_parser::StatusTone;
use crate::client::utils::theme_store::ThemeStore;
use iced::Color;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Colors used by the dashboard for one theme mode.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub card: Color,
    pub card_border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub affirmative_bg: Color,
    pub affirmative_border: Color,
    pub affirmative_text: Color,
    pub error_bg: Color,
    pub error_border: Color,
    pub error_text: Color,
    pub neutral_bg: Color,
    pub neutral_border: Color,
    pub loading_bg: Color,
    pub loading_text: Color,
}

const LIGHT: Palette = Palette {
    background: Color::from_rgb(0.95, 0.95, 0.96),
    card: Color::WHITE,
    card_border: Color::from_rgb(0.85, 0.86, 0.88),
    text: Color::from_rgb(0.12, 0.13, 0.16),
    text_muted: Color::from_rgb(0.45, 0.46, 0.5),
    affirmative_bg: Color::from_rgb(0.86, 0.99, 0.9),
    affirmative_border: Color::from_rgb(0.29, 0.87, 0.5),
    affirmative_text: Color::from_rgb(0.08, 0.5, 0.24),
    error_bg: Color::from_rgb(0.99, 0.89, 0.89),
    error_border: Color::from_rgb(0.94, 0.27, 0.27),
    error_text: Color::from_rgb(0.73, 0.11, 0.11),
    neutral_bg: Color::from_rgb(0.9, 0.9, 0.92),
    neutral_border: Color::from_rgb(0.78, 0.79, 0.82),
    loading_bg: Color::from_rgb(0.86, 0.97, 0.9),
    loading_text: Color::from_rgb(0.13, 0.6, 0.3),
};

const DARK: Palette = Palette {
    background: Color::from_rgb(0.06, 0.07, 0.18),
    card: Color::from_rgb(0.18, 0.19, 0.36),
    card_border: Color::from_rgb(0.3, 0.3, 0.4),
    text: Color::WHITE,
    text_muted: Color::from_rgb(0.7, 0.7, 0.7),
    affirmative_bg: Color::from_rgb(0.05, 0.3, 0.15),
    affirmative_border: Color::from_rgb(0.0, 0.7, 0.3),
    affirmative_text: Color::from_rgb(0.55, 0.95, 0.65),
    error_bg: Color::from_rgb(0.35, 0.08, 0.1),
    error_border: Color::from_rgb(1.0, 0.2, 0.2),
    error_text: Color::from_rgb(1.0, 0.6, 0.6),
    neutral_bg: Color::from_rgb(0.12, 0.13, 0.26),
    neutral_border: Color::from_rgb(0.3, 0.3, 0.4),
    loading_bg: Color::from_rgb(0.05, 0.3, 0.15),
    loading_text: Color::from_rgb(0.2, 0.8, 0.4),
};

impl Palette {
    /// (background, border, text) for a result block / badge.
    pub fn tone(&self, tone: StatusTone) -> (Color, Color, Color) {
        match tone {
            StatusTone::Affirmative => (self.affirmative_bg, self.affirmative_border, self.affirmative_text),
            StatusTone::Error => (self.error_bg, self.error_border, self.error_text),
            StatusTone::Neutral => (self.neutral_bg, self.neutral_border, self.text),
        }
    }
}

/// Theme handed to the rendering layer. Reads the persisted preference on
/// init, writes it back on every toggle.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    mode: ThemeMode,
    store: ThemeStore,
}

impl ThemeContext {
    pub fn init(store: ThemeStore) -> Self {
        let mode = match store.load() {
            Some(raw) => ThemeMode::parse(&raw).unwrap_or_else(|| {
                warn!("[THEME] unknown theme '{}' in {}, using light", raw, store.path().display());
                ThemeMode::default()
            }),
            None => ThemeMode::default(),
        };
        info!("[THEME] starting with {} theme", mode.as_str());
        Self { mode, store }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(e) = self.store.save(self.mode.as_str()) {
            // non fatale: il tema resta valido per questa sessione
            warn!("[THEME] could not persist theme to {}: {}", self.store.path().display(), e);
        }
        self.mode
    }

    pub fn iced_theme(&self) -> iced::Theme {
        match self.mode {
            ThemeMode::Light => iced::Theme::Light,
            ThemeMode::Dark => iced::Theme::Dark,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self.mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}
