use clap::ValueEnum;
use ratatui::style::Color;

/// Active color scheme of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Glyph shown on the theme toggle button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeIcon {
    #[default]
    LightMode,
    DarkMode,
}

impl ThemeIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            ThemeIcon::LightMode => "☀",
            ThemeIcon::DarkMode => "☾",
        }
    }

    /// The icon that goes with a theme
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => ThemeIcon::LightMode,
            ThemeMode::Dark => ThemeIcon::DarkMode,
        }
    }
}

/// Colors derived from a theme's seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub seed: Color,
    pub muted: Color,
    pub surface: Color,
}

impl ThemeMode {
    pub fn palette(&self) -> Palette {
        match self {
            // green seed
            ThemeMode::Light => Palette {
                background: Color::White,
                foreground: Color::Black,
                seed: Color::Green,
                muted: Color::DarkGray,
                surface: Color::Rgb(220, 237, 220),
            },
            // teal accent seed (#64FFDA)
            ThemeMode::Dark => Palette {
                background: Color::Black,
                foreground: Color::White,
                seed: Color::Rgb(0x64, 0xff, 0xda),
                muted: Color::Gray,
                surface: Color::Rgb(28, 40, 38),
            },
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_follows_mode() {
        assert_eq!(ThemeIcon::for_mode(ThemeMode::Light), ThemeIcon::LightMode);
        assert_eq!(ThemeIcon::for_mode(ThemeMode::Dark), ThemeIcon::DarkMode);
        assert_ne!(ThemeIcon::LightMode.glyph(), ThemeIcon::DarkMode.glyph());
    }

    #[test]
    fn test_palettes_use_distinct_seeds() {
        let light = ThemeMode::Light.palette();
        let dark = ThemeMode::Dark.palette();
        assert_eq!(light.seed, Color::Green);
        assert_eq!(dark.seed, Color::Rgb(0x64, 0xff, 0xda));
        assert_ne!(light.background, dark.background);
    }

    #[test]
    fn test_toggled_is_involution() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }
}
