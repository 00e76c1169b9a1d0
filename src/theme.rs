//! Colours for the pet view, with optional overrides from the config file

use ratatui::style::Color;

use crate::config::ThemeOverrides;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,      // Active borders, key hints, popups
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Secondary text, empty states
    pub bg_selected: Color, // Roster selection background
    pub inactive: Color,    // Borders of unfocused panels
    pub header: Color,      // Panel headings
    pub weight: Color,      // Weight bar
    pub happiness: Color,   // Happiness bar
    pub danger: Color,      // Notices, zeroed stats
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired
        Self {
            accent: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(245, 194, 231),
            weight: Color::Rgb(137, 180, 250),
            happiness: Color::Rgb(166, 218, 149),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
        }
    }
}

impl Theme {
    /// Defaults with any parseable overrides applied. Bad hex values are
    /// traced and ignored.
    pub fn from_overrides(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();

        let slots: [(&str, &Option<String>, &mut Color); 6] = [
            ("accent", &overrides.accent, &mut theme.accent),
            ("text", &overrides.text, &mut theme.text),
            ("text_dim", &overrides.text_dim, &mut theme.text_dim),
            ("selected", &overrides.selected, &mut theme.bg_selected),
            ("weight", &overrides.weight, &mut theme.weight),
            ("happiness", &overrides.happiness, &mut theme.happiness),
        ];

        for (key, value, slot) in slots {
            let Some(value) = value else { continue };
            match parse_hex_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!("Ignoring theme.{}: not a hex colour: {}", key, value),
            }
        }

        theme
    }
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}
