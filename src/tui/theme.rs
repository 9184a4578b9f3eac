use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Theme configuration for the TUI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: ColorValue,
    pub foreground: ColorValue,

    // Chrome
    pub border: ColorValue,
    pub border_focused: ColorValue,
    pub header: ColorValue,

    // Text
    pub text_primary: ColorValue,
    pub text_secondary: ColorValue,
    pub text_disabled: ColorValue,

    // Markup
    pub heading: ColorValue,
    pub link: ColorValue,
    pub code: ColorValue,
    pub redacted: ColorValue,

    // Menu
    pub menu_active: ColorValue,

    // Status
    pub accent: ColorValue,
    pub success: ColorValue,
    pub error: ColorValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Rgb { r: u8, g: u8, b: u8 },
    Named(String),
}

impl ColorValue {
    fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }

    pub fn to_color(&self) -> Color {
        match self {
            ColorValue::Rgb { r, g, b } => Color::Rgb(*r, *g, *b),
            ColorValue::Named(name) => match name.as_str() {
                "black" => Color::Black,
                "red" => Color::Red,
                "green" => Color::Green,
                "yellow" => Color::Yellow,
                "blue" => Color::Blue,
                "magenta" => Color::Magenta,
                "cyan" => Color::Cyan,
                "white" => Color::White,
                "gray" | "grey" => Color::Gray,
                "dark_gray" | "dark_grey" => Color::DarkGray,
                "light_green" => Color::LightGreen,
                "light_red" => Color::LightRed,
                _ => Color::White,
            },
        }
    }
}

impl Theme {
    /// Black, grey and a red accent
    pub fn noir() -> Self {
        Self {
            name: "noir".to_string(),
            colors: ThemeColors {
                background: ColorValue::Rgb { r: 10, g: 10, b: 10 },
                foreground: ColorValue::Rgb {
                    r: 210,
                    g: 210,
                    b: 210,
                },

                border: ColorValue::named("dark_gray"),
                border_focused: ColorValue::Rgb { r: 200, g: 30, b: 45 },
                header: ColorValue::Rgb { r: 200, g: 30, b: 45 },

                text_primary: ColorValue::named("white"),
                text_secondary: ColorValue::named("gray"),
                text_disabled: ColorValue::named("dark_gray"),

                heading: ColorValue::Rgb { r: 200, g: 30, b: 45 },
                link: ColorValue::named("gray"),
                code: ColorValue::named("white"),
                redacted: ColorValue::named("dark_gray"),

                menu_active: ColorValue::Rgb { r: 200, g: 30, b: 45 },

                accent: ColorValue::Rgb { r: 200, g: 30, b: 45 },
                success: ColorValue::named("green"),
                error: ColorValue::Rgb { r: 230, g: 40, b: 40 },
            },
        }
    }

    /// Green phosphor CRT
    pub fn phosphor() -> Self {
        Self {
            name: "phosphor".to_string(),
            colors: ThemeColors {
                background: ColorValue::named("black"),
                foreground: ColorValue::Rgb { r: 50, g: 255, b: 80 },

                border: ColorValue::Rgb { r: 0, g: 90, b: 20 },
                border_focused: ColorValue::named("light_green"),
                header: ColorValue::named("light_green"),

                text_primary: ColorValue::Rgb { r: 50, g: 255, b: 80 },
                text_secondary: ColorValue::Rgb { r: 0, g: 170, b: 40 },
                text_disabled: ColorValue::Rgb { r: 0, g: 90, b: 20 },

                heading: ColorValue::named("light_green"),
                link: ColorValue::Rgb { r: 0, g: 170, b: 40 },
                code: ColorValue::Rgb { r: 50, g: 255, b: 80 },
                redacted: ColorValue::Rgb { r: 0, g: 90, b: 20 },

                menu_active: ColorValue::named("light_green"),

                accent: ColorValue::named("yellow"),
                success: ColorValue::named("light_green"),
                error: ColorValue::named("light_red"),
            },
        }
    }

    /// Names accepted by [`Theme::by_name`]
    pub fn available() -> &'static [&'static str] {
        &["noir", "phosphor"]
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "noir" => Some(Self::noir()),
            "phosphor" | "green" => Some(Self::phosphor()),
            _ => None,
        }
    }

    pub fn base(&self) -> Style {
        Style::default()
            .fg(self.colors.foreground.to_color())
            .bg(self.colors.background.to_color())
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.colors.heading.to_color())
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.colors.text_secondary.to_color())
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.colors.error.to_color())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::noir()
    }
}
