//! Theme system for UI styling
//!
//! Provides consistent styling across the base view and the modal
//! chrome with support for multiple themes.

use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

/// UI theme containing all style definitions
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Color scheme
    pub colors: ColorScheme,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    /// Load a theme by name, falling back to the default theme
    pub fn load(theme_name: &str) -> Self {
        match theme_name {
            "default" => Self::default_theme(),
            "dark" => Self::dark_theme(),
            "light" => Self::light_theme(),
            other => {
                debug!(theme = other, "Unknown theme name, using default");
                Self::default_theme()
            }
        }
    }

    /// Default theme (dark with blue accents)
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            colors: ColorScheme {
                background: Color::Reset,
                foreground: Color::White,
                primary: Color::Blue,
                secondary: Color::Cyan,
                accent: Color::Yellow,
                success: Color::Green,
                error: Color::Red,
                info: Color::Blue,
                muted: Color::DarkGray,
                overlay: Color::Black,
            },
        }
    }

    /// Dark theme with softer colors
    pub fn dark_theme() -> Self {
        Self {
            name: "dark".to_string(),
            colors: ColorScheme {
                background: Color::Black,
                foreground: Color::Rgb(220, 220, 220),
                primary: Color::Rgb(100, 149, 237),
                secondary: Color::Rgb(72, 209, 204),
                accent: Color::Rgb(255, 215, 0),
                success: Color::Rgb(50, 205, 50),
                error: Color::Rgb(220, 20, 60),
                info: Color::Rgb(135, 206, 235),
                muted: Color::Rgb(105, 105, 105),
                overlay: Color::Rgb(10, 10, 10),
            },
        }
    }

    /// Light theme for better visibility
    pub fn light_theme() -> Self {
        Self {
            name: "light".to_string(),
            colors: ColorScheme {
                background: Color::White,
                foreground: Color::Black,
                primary: Color::Rgb(0, 100, 200),
                secondary: Color::Rgb(0, 150, 150),
                accent: Color::Rgb(200, 150, 0),
                success: Color::Rgb(0, 150, 0),
                error: Color::Rgb(200, 0, 0),
                info: Color::Rgb(0, 100, 200),
                muted: Color::Rgb(120, 120, 120),
                overlay: Color::Rgb(210, 210, 210),
            },
        }
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }

    /// Get style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.colors.foreground)
    }

    /// Get style for success messages
    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.colors.success)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for error messages
    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.colors.error)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for info messages
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.colors.info)
    }

    /// Get style for muted/disabled text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }

    /// Get style for the overlay scrim once settled
    pub fn overlay_style(&self) -> Style {
        Style::default()
            .fg(self.colors.muted)
            .bg(self.colors.overlay)
    }

    /// Get style for the overlay scrim while fading in
    pub fn overlay_soft_style(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }

    /// Get style for the modal window interior
    pub fn window_style(&self) -> Style {
        Style::default()
            .fg(self.colors.foreground)
            .bg(self.colors.background)
    }

    /// Get style for the modal window border
    pub fn window_border_style(&self) -> Style {
        Style::default().fg(self.colors.primary)
    }

    /// Get style for the modal window border right after opening
    pub fn window_border_emphasis_style(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for the title bar row
    pub fn title_bar_style(&self) -> Style {
        Style::default().bg(self.colors.background)
    }

    /// Get style for the title text
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for the close affordance
    pub fn close_button_style(&self) -> Style {
        Style::default().fg(self.colors.error)
    }

    /// Get style for the modal body text
    pub fn body_style(&self) -> Style {
        Style::default().fg(self.colors.foreground)
    }

    /// Get style for the modal footer
    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }
}

/// Color scheme for themes
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub background: Color,
    pub foreground: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
    pub muted: Color,
    pub overlay: Color,
}
