use crossterm::event::KeyCode;
use crossterm::style::Color;

/// Shared color scheme state
#[derive(Clone, Copy)]
pub struct ColorState {
    pub scheme: u8,
}

impl ColorState {
    pub fn new(default_scheme: u8) -> Self {
        Self { scheme: default_scheme }
    }

    /// Handle color scheme key input (shifted digits). Returns true if handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        self.scheme = match code {
            KeyCode::Char(')') => 0,  // Shift+0: green
            KeyCode::Char('!') => 1,  // Shift+1: fire
            KeyCode::Char('@') => 2,  // Shift+2: ice
            KeyCode::Char('#') => 3,  // Shift+3: pink
            KeyCode::Char('$') => 4,  // Shift+4: gold
            KeyCode::Char('%') => 5,  // Shift+5: electric
            KeyCode::Char('^') => 6,  // Shift+6: lava
            KeyCode::Char('&') => 7,  // Shift+7: mono
            _ => return false,
        };
        true
    }

    pub fn color(&self, intensity: u8) -> (Color, bool) {
        scheme_color(self.scheme, intensity, false)
    }
}

/// Get color from scheme based on intensity (0-3)
pub fn scheme_color(scheme: u8, intensity: u8, bold: bool) -> (Color, bool) {
    match scheme {
        1 => match intensity {  // Red/Yellow (fire)
            0 => (Color::DarkRed, false),
            1 => (Color::Red, false),
            2 => (Color::DarkYellow, bold),
            _ => (Color::Yellow, true),
        },
        2 => match intensity {  // Blue/Cyan (ice)
            0 => (Color::DarkBlue, false),
            1 => (Color::Blue, false),
            2 => (Color::Cyan, bold),
            _ => (Color::Cyan, true),
        },
        3 => match intensity {  // Magenta (pink)
            0 => (Color::DarkMagenta, false),
            1 => (Color::Magenta, false),
            2 => (Color::Magenta, bold),
            _ => (Color::AnsiValue(13), true),
        },
        4 => match intensity {  // Yellow (gold)
            0 => (Color::DarkYellow, false),
            1 => (Color::Yellow, false),
            2 => (Color::Yellow, bold),
            _ => (Color::AnsiValue(11), true),
        },
        5 => match intensity {  // Cyan (electric)
            0 => (Color::DarkCyan, false),
            1 => (Color::Cyan, false),
            2 => (Color::Cyan, bold),
            _ => (Color::AnsiValue(14), true),
        },
        6 => match intensity {  // Red/Magenta (lava)
            0 => (Color::DarkRed, false),
            1 => (Color::Red, false),
            2 => (Color::Magenta, bold),
            _ => (Color::AnsiValue(9), true),
        },
        7 => match intensity {  // White/Grey (mono)
            0 => (Color::DarkGrey, false),
            1 => (Color::Grey, false),
            2 => (Color::White, bold),
            _ => (Color::White, true),
        },
        _ => match intensity {  // Default: Green
            0 => (Color::DarkGreen, false),
            1 => (Color::Green, false),
            2 => (Color::Green, true),
            _ => (Color::AnsiValue(10), true),
        },
    }
}

/// How a game is going, for banners and counters
#[derive(Clone, Copy)]
pub enum StatusColor {
    Good,      // won
    Critical,  // lost
    Info,      // running
    Muted,     // hints, paused
}

/// Status color: semantic in mono mode (scheme 7), themed otherwise
pub fn status_color(scheme: u8, status: StatusColor) -> Color {
    if scheme == 7 {
        match status {
            StatusColor::Good => Color::Green,
            StatusColor::Critical => Color::Red,
            StatusColor::Info => Color::Cyan,
            StatusColor::Muted => Color::DarkGrey,
        }
    } else {
        let intensity = match status {
            StatusColor::Muted => 0,
            StatusColor::Info => 1,
            StatusColor::Good => 2,
            StatusColor::Critical => 3,
        };
        scheme_color(scheme, intensity, false).0
    }
}

/// Classic minesweeper digit colors
pub fn mine_digit_color(n: u8) -> Color {
    match n {
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Red,
        4 => Color::DarkBlue,
        5 => Color::DarkRed,
        6 => Color::DarkCyan,
        7 => Color::Grey,
        _ => Color::DarkGrey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_digits_pick_schemes() {
        let mut colors = ColorState::new(0);
        assert!(colors.handle_key(KeyCode::Char('@')));
        assert_eq!(colors.scheme, 2);
        assert!(!colors.handle_key(KeyCode::Char('x')));
        assert_eq!(colors.scheme, 2);
        assert!(colors.handle_key(KeyCode::Char('&')));
        assert_eq!(colors.scheme, 7);
    }

    #[test]
    fn mono_status_is_semantic() {
        assert_eq!(status_color(7, StatusColor::Critical), Color::Red);
        assert_eq!(status_color(1, StatusColor::Critical), Color::Yellow);
    }
}
