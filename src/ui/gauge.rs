const PARTIAL_BLOCKS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];
const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn clamp_pct(pct: f32) -> f32 {
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Horizontal gauge of exactly `width` cells.
pub fn gauge(pct: f32, width: usize) -> String {
    let pct = clamp_pct(pct);
    let eighths = ((pct / 100.0) * (width * 8) as f32).round() as usize;
    let eighths = eighths.min(width * 8);
    let full = eighths / 8;
    let partial = eighths % 8;

    let mut out = String::with_capacity(width * 3);
    out.push_str(&"█".repeat(full));
    if full < width {
        out.push(PARTIAL_BLOCKS[partial]);
        out.push_str(&" ".repeat(width - full - 1));
    }
    out
}

/// Single-cell vertical gauge.
pub fn gauge1(pct: f32) -> char {
    let level = ((clamp_pct(pct) / 100.0) * 8.0).round() as usize;
    LEVELS[level.min(8)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::text_width;

    #[test]
    fn gauge_has_fixed_width() {
        for pct in [0.0, 3.0, 33.3, 50.0, 99.9, 100.0, 250.0, -4.0, f32::NAN] {
            assert_eq!(text_width(&gauge(pct, 8)), 8, "pct {pct}");
        }
    }

    #[test]
    fn gauge_fills_proportionally() {
        assert_eq!(gauge(0.0, 4), "    ");
        assert_eq!(gauge(50.0, 4), "██  ");
        assert_eq!(gauge(100.0, 4), "████");
        assert_eq!(gauge(12.5, 1), "▏");
    }

    #[test]
    fn gauge1_levels() {
        assert_eq!(gauge1(0.0), ' ');
        assert_eq!(gauge1(50.0), '▄');
        assert_eq!(gauge1(100.0), '█');
        assert_eq!(gauge1(f32::INFINITY), ' ');
    }
}
