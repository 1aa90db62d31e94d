use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_THEME: &str = "slate";

#[derive(Embed)]
#[folder = "assets/themes/"]
struct BundledThemes;

/// A named palette. Colors are stored as written in the theme file and
/// resolved on use, so a typo shows up as the terminal default instead of
/// rejecting the whole theme.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

macro_rules! palette {
    ($($field:ident = $default:literal),* $(,)?) => {
        #[derive(Clone, Debug, Serialize, Deserialize)]
        pub struct ThemeColors {
            $(pub $field: String,)*
        }

        impl Default for ThemeColors {
            fn default() -> Self {
                Self { $($field: $default.to_string(),)* }
            }
        }

        impl ThemeColors {
            $(
                pub fn $field(&self) -> Color {
                    Self::parse_color(&self.$field)
                }
            )*
        }
    };
}

palette! {
    bg = "#f8fafc",
    fg = "#1e293b",
    text_muted = "#94a3b8",
    accent = "#4f46e5",
    accent_dim = "#e0e7ff",
    border = "#e2e8f0",
    border_focused = "#4f46e5",
    header_bg = "#ffffff",
    header_fg = "#1e293b",
    sidebar_bg = "#0f172a",
    sidebar_fg = "#94a3b8",
    highlight_bg = "#4f46e5",
    highlight_fg = "#ffffff",
    word_bg = "#f1f5f9",
    word_fg = "#475569",
    affirmative = "#34d399",
    negative = "#fb7185",
    interrogative = "#fbbf24",
    success = "#059669",
    error = "#f43f5e",
}

impl ThemeColors {
    /// `#rrggbb`, a color name or an ANSI index. Anything else is `Color::Reset`.
    pub fn parse_color(value: &str) -> Color {
        value.trim().parse().unwrap_or(Color::Reset)
    }
}

impl Theme {
    /// A user theme in the config directory shadows a bundled one of the same name.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");
        Self::load_user(&filename).or_else(|| Self::load_bundled(&filename))
    }

    fn user_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lingodeck").join("themes"))
    }

    fn load_user(filename: &str) -> Option<Self> {
        let path = Self::user_dir()?.join(filename);
        let content = fs::read_to_string(&path).ok()?;
        match toml::from_str(&content) {
            Ok(theme) => {
                debug!(path = %path.display(), "loaded user theme");
                Some(theme)
            }
            Err(err) => {
                warn!(path = %path.display(), "ignoring theme: {err}");
                None
            }
        }
    }

    fn load_bundled(filename: &str) -> Option<Self> {
        let file = BundledThemes::get(filename)?;
        let content = std::str::from_utf8(&file.data).ok()?;
        toml::from_str(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = BundledThemes::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_bundled(&format!("{DEFAULT_THEME}.toml")).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}
