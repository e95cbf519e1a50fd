use crossterm::Command;
use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};

pub const COLOR_GOOD: Color = Color::Rgb {
    r: 95,
    g: 200,
    b: 120,
};
pub const COLOR_WARN: Color = Color::Rgb {
    r: 230,
    g: 180,
    b: 70,
};
pub const COLOR_HOT: Color = Color::Rgb {
    r: 230,
    g: 90,
    b: 70,
};

const JOB_COLORS: [Color; 12] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
];

pub fn color_for_percent(pct: f32) -> Color {
    if pct < 50.0 {
        COLOR_GOOD
    } else if pct < 80.0 {
        COLOR_WARN
    } else {
        COLOR_HOT
    }
}

/// Escape sequences used by the renderers.
///
/// A plain palette yields empty strings everywhere so the output is pure text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn ansi() -> Self {
        Self { enabled: true }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Foreground color of a job tag; tag 0 is uncolored
    pub fn job(self, tag: u32) -> String {
        if tag == 0 {
            return String::new();
        }
        let color = JOB_COLORS[(tag as usize - 1) % JOB_COLORS.len()];
        self.sequence(SetForegroundColor(color))
    }

    pub fn load(self, pct: f32) -> String {
        self.sequence(SetForegroundColor(color_for_percent(pct)))
    }

    pub fn red(self) -> String {
        self.sequence(SetForegroundColor(Color::Red))
    }

    pub fn reverse(self) -> String {
        self.sequence(SetAttribute(Attribute::Reverse))
    }

    pub fn reset(self) -> String {
        self.sequence(SetAttribute(Attribute::Reset))
    }

    /// Wrap `text` between a color sequence and a reset
    pub fn paint(self, color: &str, text: &str) -> String {
        if !self.enabled || color.is_empty() {
            return text.to_string();
        }
        format!("{color}{text}{}", self.reset())
    }

    fn sequence(self, command: impl Command) -> String {
        let mut out = String::new();
        if self.enabled {
            let _ = command.write_ansi(&mut out);
        }
        out
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}
