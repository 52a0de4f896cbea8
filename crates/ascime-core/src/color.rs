use std::fmt::Write as _;

/// SGR reset, emitted right after every colored glyph.
pub const RESET: &str = "\x1b[0m";

/// Escape introducer; any output containing it carries color.
pub const ESC: char = '\x1b';

/// Écrit la séquence truecolor foreground `ESC[38;2;R;G;Bm`.
///
/// # Example
/// ```
/// use ascime_core::color::push_truecolor_fg;
/// let mut s = String::new();
/// push_truecolor_fg(&mut s, 0, 200, 255);
/// assert_eq!(s, "\x1b[38;2;0;200;255m");
/// ```
#[inline]
pub fn push_truecolor_fg(out: &mut String, r: u8, g: u8, b: u8) {
    // Writing into a String cannot fail.
    let _ = write!(out, "\x1b[38;2;{r};{g};{b}m");
}

/// Wrap `ch` in a truecolor escape followed by a reset.
///
/// # Example
/// ```
/// use ascime_core::color::push_colored_glyph;
/// let mut s = String::new();
/// push_colored_glyph(&mut s, '@', (0, 0, 0));
/// assert_eq!(s, "\x1b[38;2;0;0;0m@\x1b[0m");
/// ```
#[inline]
pub fn push_colored_glyph(out: &mut String, ch: char, (r, g, b): (u8, u8, u8)) {
    push_truecolor_fg(out, r, g, b);
    out.push(ch);
    out.push_str(RESET);
}

/// Wrap an arbitrary text block in one color, reset at the end.
#[must_use]
pub fn paint(text: &str, (r, g, b): (u8, u8, u8)) -> String {
    let mut out = String::with_capacity(text.len() + 24);
    push_truecolor_fg(&mut out, r, g, b);
    out.push_str(text);
    out.push_str(RESET);
    out
}
