//! Colour palettes for the TUI. Band and change colours come from `Tone`.

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::scoring::Tone;

/// Background luma above which the terminal counts as light
const LIGHT_LUMA: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tone colours (traffic light)
    pub danger: Color,
    pub warning: Color,
    pub safe: Color,

    pub bar_empty: Color,

    // Table
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub header_style: Style,
    pub sort_header_style: Style,
    pub row_selected: Style,

    pub muted: Color,
    pub title_color: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popups and panels
    pub popup_border: Color,
    pub popup_title: Style,
    pub panel_border: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            danger: Color::Red,
            warning: Color::Yellow,
            safe: Color::Green,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            sort_header_style: Style::new().fg(Color::Cyan).bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            panel_border: Color::Indexed(240),
        }
    }

    pub fn light() -> Self {
        Self {
            danger: Color::Indexed(160),
            warning: Color::Indexed(172),
            safe: Color::Indexed(28),
            bar_empty: Color::Indexed(252),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            header_style: Style::new().bold(),
            sort_header_style: Style::new().fg(Color::Blue).bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Indexed(160),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            panel_border: Color::Indexed(248),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Danger => self.danger,
            Tone::Warning => self.warning,
            Tone::Safe => self.safe,
        }
    }
}

/// Pick a theme. `Auto` asks the terminal for its background colour, which
/// must happen before the TUI takes over the terminal.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                tracing::debug!(error = %e, "could not detect terminal background, using dark theme");
                Theme::Dark
            }
        },
    }
}
