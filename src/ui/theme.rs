/// Dark and light color schemes
///
/// Each scheme is a fixed [`Palette`]; the view reads colors from the active
/// palette and the iced theme is derived from it, so switching modes
/// repaints every widget at once.
use iced::widget::{button, container};
use iced::{theme, Background, Border, Color, Theme};
use serde::{Deserialize, Serialize};

/// Which color scheme is active
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Colors for every widget group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub button_bg: Color,
    pub button_fg: Color,
    pub terminal_bg: Color,
    pub terminal_fg: Color,
    pub popup_bg: Color,
    pub popup_fg: Color,
}

fn dark() -> Palette {
    Palette {
        bg: Color::from_rgb8(0x2d, 0x2d, 0x2d),
        fg: Color::WHITE,
        button_bg: Color::from_rgb8(0x3c, 0x3c, 0x3c),
        button_fg: Color::WHITE,
        terminal_bg: Color::from_rgb8(0x1e, 0x1e, 0x1e),
        terminal_fg: Color::WHITE,
        popup_bg: Color::from_rgb8(0x2d, 0x2d, 0x2d),
        popup_fg: Color::WHITE,
    }
}

fn light() -> Palette {
    Palette {
        bg: Color::from_rgb8(0xf0, 0xf0, 0xf0),
        fg: Color::BLACK,
        button_bg: Color::from_rgb8(0xe0, 0xe0, 0xe0),
        button_fg: Color::BLACK,
        terminal_bg: Color::WHITE,
        terminal_fg: Color::BLACK,
        popup_bg: Color::from_rgb8(0xf0, 0xf0, 0xf0),
        popup_fg: Color::BLACK,
    }
}

impl ThemeMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => dark(),
            ThemeMode::Light => light(),
        }
    }

    /// iced theme built from the palette (drives default text and widget colors)
    pub fn iced_theme(self) -> Theme {
        let palette = self.palette();
        let (name, base) = match self {
            ThemeMode::Dark => ("JoyBackup Dark", theme::Palette::DARK),
            ThemeMode::Light => ("JoyBackup Light", theme::Palette::LIGHT),
        };

        Theme::custom(
            name.to_string(),
            theme::Palette {
                background: palette.bg,
                text: palette.fg,
                ..base
            },
        )
    }
}

impl Palette {
    /// Flat button in the palette's button colors
    pub fn button_style(&self, status: button::Status) -> button::Style {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => {
                mix(self.button_bg, self.button_fg, 0.12)
            }
            button::Status::Active | button::Status::Disabled => self.button_bg,
        };

        button::Style {
            background: Some(Background::Color(background)),
            text_color: self.button_fg,
            border: Border {
                color: mix(self.button_bg, self.button_fg, 0.25),
                width: 1.0,
                radius: 2.0.into(),
            },
            ..button::Style::default()
        }
    }

    /// Window background
    pub fn window_style(&self) -> container::Style {
        container::Style {
            background: Some(Background::Color(self.bg)),
            text_color: Some(self.fg),
            ..container::Style::default()
        }
    }

    /// Log pane ("terminal") background
    pub fn terminal_style(&self) -> container::Style {
        container::Style {
            background: Some(Background::Color(self.terminal_bg)),
            text_color: Some(self.terminal_fg),
            ..container::Style::default()
        }
    }

    /// Help panel background
    pub fn popup_style(&self) -> container::Style {
        container::Style {
            background: Some(Background::Color(self.popup_bg)),
            text_color: Some(self.popup_fg),
            border: Border {
                color: self.button_bg,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..container::Style::default()
        }
    }
}

/// Linear blend of two colors, `t` = 0.0 gives `a`
fn mix(a: Color, b: Color, t: f32) -> Color {
    Color {
        r: a.r + (b.r - a.r) * t,
        g: a.g + (b.g - a.g) * t,
        b: a.b + (b.b - a.b) * t,
        a: a.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        let dark = ThemeMode::Dark.palette();
        let light = ThemeMode::Light.palette();
        assert_ne!(dark, light);
        assert_eq!(dark.fg, Color::WHITE);
        assert_eq!(light.terminal_bg, Color::WHITE);
    }

    #[test]
    fn test_iced_theme_uses_palette_background() {
        let theme = ThemeMode::Light.iced_theme();
        assert_eq!(theme.palette().background, light().bg);
        assert_eq!(theme.palette().text, light().fg);
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix(Color::BLACK, Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(mix(Color::BLACK, Color::WHITE, 1.0), Color::WHITE);
    }
}
