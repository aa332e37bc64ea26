//! Terminal styling.
//!
//! ANSI escape codes and color detection for the text report. Marker tags
//! use the same hues the map uses for the route's start, waypoints and end.

use shiproute_lib::MarkerRole;

/// Raw ANSI escape sequences.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";

    /// Bold reverse green, start marker tag.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse yellow, waypoint marker tag.
    pub const TAG_WAYPOINT: &str = "\x1b[1;7;33m";
    /// Bold reverse red, end marker tag.
    pub const TAG_END: &str = "\x1b[1;7;31m";

    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    pub const GRAY: &str = "\x1b[90m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Resolved color codes, or empty strings when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_waypoint: &'static str,
    pub tag_end: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_waypoint: colors::TAG_WAYPOINT,
            tag_end: colors::TAG_END,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_waypoint: "",
            tag_end: "",
            white_bold: "",
            gray: "",
            cyan: "",
        }
    }

    /// Pick [`ColorPalette::colored`] or [`ColorPalette::plain`] from the
    /// environment.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Tag color for a marker of the given role.
    #[must_use]
    pub fn tag(&self, role: MarkerRole) -> &'static str {
        match role {
            MarkerRole::Start => self.tag_start,
            MarkerRole::Waypoint => self.tag_waypoint,
            MarkerRole::End => self.tag_end,
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Four-character label printed inside a marker tag.
#[must_use]
pub fn tag_label(role: MarkerRole) -> &'static str {
    match role {
        MarkerRole::Start => "STRT",
        MarkerRole::Waypoint => "WAYP",
        MarkerRole::End => "END ",
    }
}

/// Whether ANSI colors should be emitted.
///
/// Honors `NO_COLOR` (<https://no-color.org/>) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    !std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb"))
}

/// Group the integer part of `value` in thousands, keeping one decimal.
///
/// ```
/// # use shiproute_cli::terminal::format_distance;
/// assert_eq!(format_distance(8288.44), "8,288.4");
/// assert_eq!(format_distance(950.0), "950.0");
/// ```
#[must_use]
pub fn format_distance(value: f64) -> String {
    let fixed = format!("{:.1}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
