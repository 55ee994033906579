use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub menu: MenuStyle,
    pub commandline: CommandLineStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
            menu: MenuStyle::default(),
            commandline: CommandLineStyle::default(),
        }
    }
}

impl Theme {
    /// Looks up a color by dotted key, e.g. `"menu.background"`.
    pub fn color(&self, key: &str) -> Option<Color> {
        let hex = match key {
            "background" | "colors.background" => &self.colors.background,
            "foreground" | "colors.foreground" => &self.colors.foreground,
            "primary" | "colors.primary" => &self.colors.primary,
            "accent" | "colors.accent" => &self.colors.accent,
            "muted" | "colors.muted" => &self.colors.muted,
            "menu.background" => &self.menu.background,
            "menu.foreground" => &self.menu.foreground,
            "commandline.output_background" => &self.commandline.output_background,
            "commandline.foreground" => &self.commandline.foreground,
            "commandline.cursor" => &self.commandline.cursor,
            "commandline.icon" => &self.commandline.icon,
            "commandline.arrow" => &self.commandline.arrow,
            _ => return None,
        };
        Some(hex.to_color())
    }

    /// Like [`Theme::color`], falling back to `Color::Reset` for unknown keys.
    pub fn color_or_reset(&self, key: &str) -> Color {
        self.color(key).unwrap_or(Color::Reset)
    }

    pub fn overlay_style(&self) -> Style {
        Style::default()
            .bg(self.color_or_reset("menu.background"))
            .fg(self.color_or_reset("menu.foreground"))
    }

    pub fn output_style(&self) -> Style {
        Style::default()
            .bg(self.color_or_reset("commandline.output_background"))
            .fg(self.color_or_reset("commandline.foreground"))
    }

    pub fn icon_style(&self) -> Style {
        Style::default()
            .fg(self.color_or_reset("commandline.icon"))
            .add_modifier(Modifier::BOLD)
    }

    pub fn arrow_style(&self) -> Style {
        Style::default()
            .fg(self.color_or_reset("commandline.arrow"))
            .add_modifier(Modifier::DIM)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default().fg(self.color_or_reset("commandline.cursor"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub background: HexColor,
    pub foreground: HexColor,
    pub primary: HexColor,
    pub accent: HexColor,
    pub muted: HexColor,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: HexColor::new("#1a1b26"),
            foreground: HexColor::new("#c0caf5"),
            primary: HexColor::new("#7aa2f7"),
            accent: HexColor::new("#bb9af7"),
            muted: HexColor::new("#565f89"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuStyle {
    pub background: HexColor,
    pub foreground: HexColor,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            background: HexColor::new("#24283b"),
            foreground: HexColor::new("#c0caf5"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandLineStyle {
    pub output_background: HexColor,
    pub foreground: HexColor,
    pub cursor: HexColor,
    pub icon: HexColor,
    pub arrow: HexColor,
}

impl Default for CommandLineStyle {
    fn default() -> Self {
        Self {
            output_background: HexColor::new("#1a1b26"),
            foreground: HexColor::new("#ffffff"),
            cursor: HexColor::new("#ffffff"),
            icon: HexColor::new("#7aa2f7"),
            arrow: HexColor::new("#565f89"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    pub fn to_color(&self) -> Color {
        self.parse_hex().unwrap_or(Color::Reset)
    }

    fn parse_hex(&self) -> Option<Color> {
        let hex = self.0.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#ffffff".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(HexColor::new("#ff0000").to_color(), Color::Rgb(255, 0, 0));
        assert_eq!(HexColor::new("00ff00").to_color(), Color::Rgb(0, 255, 0));
        assert_eq!(HexColor::new("#fff").to_color(), Color::Reset);
        assert_eq!(HexColor::new("#zzzzzz").to_color(), Color::Reset);
    }

    #[test]
    fn test_menu_background_lookup() {
        let theme = Theme::default();
        assert_eq!(theme.color("menu.background"), Some(Color::Rgb(0x24, 0x28, 0x3b)));
        assert_eq!(theme.color("menu.nope"), None);
        assert_eq!(theme.color_or_reset("menu.nope"), Color::Reset);
    }

    #[test]
    fn test_theme_serialization() {
        let mut theme = Theme::default();
        theme.name = "vibrant".to_string();
        theme.menu.background = HexColor::new("#16161f");
        let toml_str = toml::to_string_pretty(&theme).unwrap();
        let parsed: Theme = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.name, "vibrant");
        assert_eq!(parsed.menu.background.0, "#16161f");
    }

    #[test]
    fn test_partial_theme_uses_defaults() {
        let parsed: Theme = toml::from_str("[menu]\nbackground = \"#000000\"\n").unwrap();
        assert_eq!(parsed.color("menu.background"), Some(Color::Rgb(0, 0, 0)));
        assert_eq!(parsed.menu.foreground.0, "#c0caf5");
        assert_eq!(parsed.name, "default");
    }
}
