//! System-font capability probing.

use unicode_width::UnicodeWidthStr;

/// Answers whether the system font can render a code as a single glyph.
pub trait FontProbe {
    fn can_render(&self, code: &str) -> bool;
}

impl<F> FontProbe for F
where
    F: Fn(&str) -> bool,
{
    fn can_render(&self, code: &str) -> bool {
        self(code)
    }
}

/// Width-based guess: a sequence the font cannot compose falls back to
/// several glyphs side by side, which shows up as a display width above two
/// cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct WidthHeuristic;

pub const MAX_GLYPH_WIDTH: usize = 2;

impl FontProbe for WidthHeuristic {
    fn can_render(&self, code: &str) -> bool {
        let w = UnicodeWidthStr::width(code);
        w > 0 && w <= MAX_GLYPH_WIDTH
    }
}

/// Probe that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFont;

impl FontProbe for AnyFont {
    fn can_render(&self, _code: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_heuristic() {
        assert!(WidthHeuristic.can_render("😀"));
        assert!(WidthHeuristic.can_render("a"));
        assert!(!WidthHeuristic.can_render("😀😀"));
        assert!(!WidthHeuristic.can_render(""));
    }

    #[test]
    fn closure_probe() {
        let probe = |code: &str| code != "🫠";
        assert!(probe.can_render("😀"));
        assert!(!FontProbe::can_render(&probe, "🫠"));
    }
}
