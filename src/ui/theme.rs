use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "terminal-default";

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub term: String,
    pub option_fg: String,
    pub option_selected_bg: String,
    pub option_selected_fg: String,
    pub streak: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// Look for `<name>.toml` among the user's themes first, then the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("wordquiz").join("themes").join(&filename);
            if let Ok(content) = fs::read_to_string(&user_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(e) => log::warn!("ignoring theme {}: {e}", user_path.display()),
                }
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();

        if let Some(config_dir) = dirs::config_dir() {
            if let Ok(entries) = fs::read_dir(config_dir.join("wordquiz").join("themes")) {
                for entry in entries.flatten() {
                    let file_name = entry.file_name().to_string_lossy().to_string();
                    if let Some(name) = file_name.strip_suffix(".toml") {
                        names.push(name.to_string());
                    }
                }
            }
        }

        names.sort();
        names.dedup();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "reset".to_string(),
            fg: "reset".to_string(),
            muted: "darkgray".to_string(),
            accent: "cyan".to_string(),
            border: "darkgray".to_string(),
            border_focused: "cyan".to_string(),
            header_bg: "reset".to_string(),
            header_fg: "white".to_string(),
            term: "white".to_string(),
            option_fg: "reset".to_string(),
            option_selected_bg: "cyan".to_string(),
            option_selected_fg: "black".to_string(),
            streak: "magenta".to_string(),
            bar_empty: "darkgray".to_string(),
            error: "red".to_string(),
            warning: "yellow".to_string(),
            success: "green".to_string(),
        }
    }
}

impl ThemeColors {
    /// Accepts `#rrggbb` or a terminal colour name (`red`, `darkgray`,
    /// `reset`, ...). Anything else falls back to the terminal default.
    pub fn parse_color(value: &str) -> Color {
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return Color::Rgb(r, g, b);
                }
            }
            return Color::Reset;
        }
        value.parse::<Color>().unwrap_or(Color::Reset)
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn term(&self) -> Color { Self::parse_color(&self.term) }
    pub fn option_fg(&self) -> Color { Self::parse_color(&self.option_fg) }
    pub fn option_selected_bg(&self) -> Color { Self::parse_color(&self.option_selected_bg) }
    pub fn option_selected_fg(&self) -> Color { Self::parse_color(&self.option_selected_fg) }
    pub fn streak(&self) -> Color { Self::parse_color(&self.streak) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }

    /// Timer colour for `remaining` of `limit` seconds: green above 60 %,
    /// yellow above 30 %, red otherwise.
    pub fn timer(&self, remaining: u32, limit: u32) -> Color {
        let limit = limit.max(1) as f64;
        let ratio = remaining as f64 / limit;
        if ratio > 0.6 {
            self.success()
        } else if ratio > 0.3 {
            self.warning()
        } else {
            self.error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.iter().any(|n| n == DEFAULT_THEME));
        for name in ["terminal-default", "midnight", "paper"] {
            let theme = Theme::load(name).unwrap_or_else(|| panic!("theme {name} loads"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(ThemeColors::parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(ThemeColors::parse_color("red"), Color::Red);
        assert_eq!(ThemeColors::parse_color("#zzz"), Color::Reset);
        assert_eq!(ThemeColors::parse_color("not-a-colour"), Color::Reset);
    }

    #[test]
    fn test_timer_thresholds() {
        let colors = ThemeColors::default();
        // medium: 10 seconds
        assert_eq!(colors.timer(10, 10), colors.success());
        assert_eq!(colors.timer(7, 10), colors.success());
        assert_eq!(colors.timer(6, 10), colors.warning());
        assert_eq!(colors.timer(4, 10), colors.warning());
        assert_eq!(colors.timer(3, 10), colors.error());
        assert_eq!(colors.timer(0, 10), colors.error());
    }
}
