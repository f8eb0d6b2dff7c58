//! Dark/light theme selection.
//!
//! The active theme lives in the session. A request may carry a one-shot
//! `?theme=` override; the server applies it and redirects to a URL without
//! the parameter, so a reload never reapplies it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::params::HexColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn opposite(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn style_sheet(self) -> &'static str {
        match self {
            Theme::Dark => DARK_CSS,
            Theme::Light => LIGHT_CSS,
        }
    }

    /// Text of the title pill that links to the other theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "// Dark+",
            Theme::Light => "// Light+",
        }
    }

    pub fn default_fill(self) -> HexColor {
        match self {
            Theme::Dark => HexColor::new(0xFF, 0xFF, 0xFF),
            Theme::Light => HexColor::new(0x00, 0x00, 0x00),
        }
    }

    pub fn default_back(self) -> HexColor {
        match self {
            Theme::Dark => HexColor::new(0x1E, 0x1E, 0x1E),
            Theme::Light => HexColor::new(0xFF, 0xFF, 0xFF),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}', expected 'dark' or 'light'")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

/// Outcome of resolving the theme for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeResolution {
    pub effective: Theme,
    pub style_sheet: &'static str,
    pub toggle_target: Theme,
}

/// Resolve the effective theme from the persisted flag and an optional
/// override taken from the query string.
///
/// An override that is neither `dark` nor `light` is ignored and the
/// persisted flag stays in effect. Writing `effective` back into the session
/// and dropping the override from the URL is the caller's job.
pub fn resolve_theme(persisted: Theme, incoming_override: Option<&str>) -> ThemeResolution {
    let effective = match incoming_override.map(str::parse::<Theme>) {
        Some(Ok(theme)) => theme,
        Some(Err(err)) => {
            tracing::debug!("{err}; keeping {persisted}");
            persisted
        }
        None => persisted,
    };

    ThemeResolution {
        effective,
        style_sheet: effective.style_sheet(),
        toggle_target: effective.opposite(),
    }
}

const DARK_CSS: &str = r#"
body { background-color: #1E1E1E; color: #D4D4D4; font-family: monospace; margin: 0; }
h1, h2, h3 { color: #D4D4D4; font-family: monospace; }
.sidebar { background-color: #252526; color: #D4D4D4; }
.sidebar code { background-color: transparent; color: #D4D4D4; }
input[type=text] { background-color: #3C3C3C; border: 1px solid #3C3C3C; color: #D4D4D4; }
select { background-color: #3C3C3C; color: #D4D4D4; border: 1px solid #3C3C3C; }
button.primary { background-color: #3B82F6; color: white; border: none; }
a.download { background-color: #006400; color: white; }
.theme-switcher-button { background-color: #0A0A0A; color: #23D18B; }
.theme-switcher-button:hover { background-color: #202020; color: #23D18B; }
.notice.warning { background-color: #3A3A1E; color: #E5E510; }
.notice.error { background-color: #3A1E1E; color: #F14C4C; }
.floating-button { background-color: #3B82F6; }
.floating-button:hover { background-color: #2563EB; }
"#;

const LIGHT_CSS: &str = r#"
body { background-color: #FFFFFF; color: #333333; font-family: monospace; margin: 0; }
h1 { color: #00008B; font-family: monospace; }
h2, h3 { color: #333333; font-family: monospace; }
.sidebar { background-color: #F5F5F5; color: #333333; }
.sidebar code { background-color: transparent; color: #333333; }
input[type=text] { background-color: #F5F5F5; border: 1px solid #CCCCCC; color: #333333; }
select { background-color: #F5F5F5; color: #333333; border: 1px solid #CCCCCC; }
button.primary { background-color: #007ACC; color: white; border: none; }
a.download { background-color: #28A745; color: white; }
.theme-switcher-button { background-color: #E0E0E0; color: #005A9E; }
.theme-switcher-button:hover { background-color: #CECECE; color: #005A9E; }
.notice.warning { background-color: #FFF8DB; color: #7A5D00; }
.notice.error { background-color: #FDECEA; color: #B00020; }
.floating-button { background-color: #007ACC; }
.floating-button:hover { background-color: #005F9E; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_persisted_flag() {
        let r = resolve_theme(Theme::Dark, Some("light"));
        assert_eq!(r.effective, Theme::Light);
        assert_eq!(r.toggle_target, Theme::Dark);
        assert_eq!(r.style_sheet, LIGHT_CSS);
    }

    #[test]
    fn no_override_keeps_persisted_flag() {
        let r = resolve_theme(Theme::Light, None);
        assert_eq!(r.effective, Theme::Light);
        assert_eq!(r.toggle_target, Theme::Dark);
    }

    #[test]
    fn unknown_override_is_ignored() {
        for value in ["blue", "", "darkish"] {
            let r = resolve_theme(Theme::Light, Some(value));
            assert_eq!(r.effective, Theme::Light, "{value:?} should be ignored");
        }
    }

    #[test]
    fn override_parsing_is_case_insensitive() {
        assert_eq!(" DARK ".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
    }

    #[test]
    fn themes_have_distinct_defaults() {
        assert_eq!(Theme::Dark.default_fill().to_string(), "#FFFFFF");
        assert_eq!(Theme::Dark.default_back().to_string(), "#1E1E1E");
        assert_eq!(Theme::Light.default_fill().to_string(), "#000000");
        assert_eq!(Theme::Light.default_back().to_string(), "#FFFFFF");
        assert_ne!(Theme::Dark.style_sheet(), Theme::Light.style_sheet());
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Theme::Dark.opposite().opposite(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle_label(), "// Dark+");
        assert_eq!(Theme::Light.toggle_label(), "// Light+");
    }
}
