//! Standard 14 fonts used for spine labels.
//!
//! Standard fonts need no embedding, only their advance widths so text can be
//! centered. Widths are in 1/1000 em from the Adobe core AFM files. Glyphs
//! outside the table are measured as `n`.

use serde::{Deserialize, Serialize};

/// A PDF standard Type1 font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandardFont {
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
}

impl StandardFont {
    /// PostScript name written to the font dictionary.
    pub fn base_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }

    /// Advance width of `text` in points at `size_pt`.
    pub fn text_width(self, text: &str, size_pt: f64) -> f64 {
        let units: u32 = text.chars().map(|c| self.glyph_width(c)).sum();
        units as f64 * size_pt / 1000.0
    }

    fn glyph_width(self, c: char) -> u32 {
        match self {
            StandardFont::Helvetica => helvetica_width(c),
            StandardFont::HelveticaBold => helvetica_bold_width(c),
        }
    }
}

fn helvetica_width(c: char) -> u32 {
    match c {
        ' ' | ',' | '.' | '/' => 278,
        '-' => 333,
        ':' | ';' | '!' => 278,
        '0'..='9' => 556,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'F' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'I' => 278,
        'J' => 500,
        'L' => 556,
        'M' => 833,
        'W' => 944,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
        'f' | 't' => 278,
        'i' | 'j' | 'l' => 222,
        'm' => 833,
        'r' => 333,
        'w' => 722,
        'a'..='z' => 556,
        _ => 556,
    }
}

fn helvetica_bold_width(c: char) -> u32 {
    match c {
        ' ' | ',' | '.' | '/' => 278,
        '-' | ':' | ';' | '!' => 333,
        '0'..='9' => 556,
        'A' | 'B' | 'C' | 'D' | 'H' | 'K' | 'N' | 'R' | 'U' => 722,
        'E' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'F' | 'L' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'I' => 278,
        'J' => 556,
        'M' => 833,
        'W' => 944,
        'a' | 'c' | 'e' | 'k' | 's' | 'v' | 'x' | 'y' => 556,
        'f' | 't' => 333,
        'i' | 'j' | 'l' => 278,
        'm' => 889,
        'r' => 389,
        'w' => 778,
        'z' => 500,
        'a'..='z' => 611,
        _ => 611,
    }
}
