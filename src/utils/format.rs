use unicode_width::UnicodeWidthStr;

pub fn text_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

/// Remove ANSI CSI sequences, leaving only the visible text.
#[cfg(test)]
pub fn strip_ansi(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            output.push(ch);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            // CSI: parameters run until a final byte in '@'..='~'
            for next in chars.by_ref() {
                if ('@'..='~').contains(&next) {
                    break;
                }
            }
        }
    }
    output
}

pub fn pad_to_width(value: &str, width: usize) -> String {
    let current = text_width(value);
    if current >= width {
        return value.to_string();
    }
    let mut output = String::with_capacity(value.len() + width - current);
    output.push_str(value);
    output.push_str(&" ".repeat(width - current));
    output
}

/// Format a quantity of memory given in megabytes, promoting to Gb then Tb
/// while the value stays above 1000.
pub fn format_memory_mb(mb: f64) -> String {
    let mut value = mb;
    let mut unit = "Mb";

    if value > 1000.0 {
        value /= 1000.0;
        unit = "Gb";
    }

    if value > 1000.0 {
        value /= 1000.0;
        unit = "Tb";
    }

    format!("{value:5.1}{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_memory_units() {
        assert_eq!(format_memory_mb(950.0), "950.0Mb");
        assert_eq!(format_memory_mb(1000.0), "1000.0Mb");
        assert_eq!(format_memory_mb(1500.0), "  1.5Gb");
        assert_eq!(format_memory_mb(1_500_000.0), "  1.5Tb");
        assert_eq!(format_memory_mb(0.0), "  0.0Mb");
    }

    #[test]
    fn strip_ansi_removes_color_sequences() {
        assert_eq!(strip_ansi("\x1b[38;5;1m●\x1b[0m ."), "● .");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn text_width_counts_display_cells() {
        assert_eq!(text_width("●"), 1);
        assert_eq!(text_width("表"), 2);
    }

    #[test]
    fn pad_to_width_uses_display_cells() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcd", 2), "abcd");
    }
}
