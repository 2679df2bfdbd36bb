// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, fmt};

use ratatui::style::{Color, Modifier, Style};

/// Styling for the TUI.
///
/// Foreground/background can be overridden via `PYTHIA_THEME_FG` /
/// `PYTHIA_THEME_BG` (`#rrggbb`); everything else derives from the base.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    fg: Option<Color>,
    bg: Option<Color>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        Ok(Self {
            fg: color_override_from_env("PYTHIA_THEME_FG")?,
            bg: color_override_from_env("PYTHIA_THEME_BG")?,
        })
    }

    pub(crate) fn base_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        style
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(Color::LightGreen)
        } else {
            self.base_style().fg(Color::DarkGray)
        }
    }

    /// Background fill for a flagged token; the hovered one stands apart.
    pub(crate) fn highlight_style(&self, hovered: bool) -> Style {
        let base = self.base_style().fg(Color::Black).add_modifier(Modifier::BOLD);
        if hovered {
            base.bg(Color::Magenta)
        } else {
            base.bg(Color::Yellow)
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(Color::Red)
    }

    pub(crate) fn dim_style(&self) -> Style {
        self.base_style().fg(Color::Gray)
    }

    pub(crate) fn title_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn detail_border_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }
}

fn color_override_from_env(name: &str) -> Result<Option<Color>, ThemeError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => parse_hex_color(value.trim()).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_hex_color(value: &str) -> Result<Color, ThemeError> {
    let digits = value
        .strip_prefix('#')
        .filter(|digits| digits.len() == 6 && digits.chars().all(|ch| ch.is_ascii_hexdigit()))
        .ok_or_else(|| ThemeError::InvalidColor { value: value.to_owned() })?;

    let component = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ThemeError::InvalidColor { value: value.to_owned() })
    };

    Ok(Color::Rgb(component(0..2)?, component(2..4)?, component(4..6)?))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ThemeError {
    InvalidColor { value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { value } => {
                write!(f, "invalid theme color '{value}' (expected #rrggbb)")
            }
        }
    }
}

impl std::error::Error for ThemeError {}

#[cfg(test)]
mod tests {
    use super::{parse_hex_color, ThemeError, TuiTheme};
    use ratatui::style::Color;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#1a2b3c").unwrap(), Color::Rgb(0x1a, 0x2b, 0x3c));
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn rejects_malformed_colors() {
        for value in ["1a2b3c", "#12345", "#12345g", "#1234567", ""] {
            assert_eq!(
                parse_hex_color(value).unwrap_err(),
                ThemeError::InvalidColor { value: value.to_owned() }
            );
        }
    }

    #[test]
    fn hovered_highlight_differs_from_plain_highlight() {
        let theme = TuiTheme::default();
        assert_ne!(theme.highlight_style(true), theme.highlight_style(false));
    }

    #[test]
    fn default_base_style_is_terminal_default() {
        let theme = TuiTheme::default();
        assert_eq!(theme.base_style(), ratatui::style::Style::default());
    }
}
