//! Standard Type 1 fonts, WinAnsi text encoding and glyph metrics.
//!
//! Only the two base-14 Helvetica faces are used, so no font program is
//! embedded. Characters outside WinAnsi that the layouts rely on (the
//! checkbox and the rupee sign) are drawn as vector symbols by the writer;
//! everything else unencodable becomes `?`.

/// A base-14 font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    /// PostScript name used as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    /// Advance width of a WinAnsi byte, in 1/1000 em.
    pub fn byte_width(&self, byte: u8) -> u16 {
        let table = match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match byte {
            0x20..=0x7e => table[(byte - 0x20) as usize],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of already-encoded bytes at the given size, in points.
    pub fn bytes_width(&self, bytes: &[u8], size: f32) -> f32 {
        let units: u32 = bytes.iter().map(|b| u32::from(self.byte_width(*b))).sum();
        units as f32 * size / 1000.0
    }

    /// Width of a string at the given size, in points, symbols included.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        encode(text)
            .iter()
            .map(|run| match run {
                Run::Text(bytes) => self.bytes_width(bytes, size),
                Run::Symbol(symbol) => symbol.advance() * size,
            })
            .sum()
    }
}

/// A glyph drawn with path operators instead of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// U+2610 BALLOT BOX.
    Checkbox,
    /// U+20B9 INDIAN RUPEE SIGN.
    Rupee,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\u{2610}' => Some(Symbol::Checkbox),
            '\u{20b9}' => Some(Symbol::Rupee),
            _ => None,
        }
    }

    /// Horizontal advance in em.
    pub fn advance(&self) -> f32 {
        match self {
            Symbol::Checkbox => 0.8,
            Symbol::Rupee => 0.556,
        }
    }
}

/// A maximal stretch of text that is either encodable bytes or one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text(Vec<u8>),
    Symbol(Symbol),
}

/// Split a string into WinAnsi byte runs and vector symbols.
pub fn encode(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut pending: Vec<u8> = Vec::new();

    for c in text.chars() {
        if let Some(symbol) = Symbol::from_char(c) {
            if !pending.is_empty() {
                runs.push(Run::Text(std::mem::take(&mut pending)));
            }
            runs.push(Run::Symbol(symbol));
        } else {
            pending.push(win_ansi_byte(c));
        }
    }
    if !pending.is_empty() {
        runs.push(Run::Text(pending));
    }
    runs
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\t' | '\n' | '\r' => b' ',
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ => b'?',
    }
}

const FALLBACK_WIDTH: u16 = 556;

/// Helvetica advance widths for 0x20..=0x7E (Adobe AFM).
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold advance widths for 0x20..=0x7E (Adobe AFM).
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one_text_run() {
        assert_eq!(encode("Item"), vec![Run::Text(b"Item".to_vec())]);
    }

    #[test]
    fn symbols_split_runs() {
        let runs = encode("Price (\u{20b9})");
        assert_eq!(
            runs,
            vec![
                Run::Text(b"Price (".to_vec()),
                Run::Symbol(Symbol::Rupee),
                Run::Text(b")".to_vec()),
            ]
        );
        assert_eq!(encode("\u{2610}"), vec![Run::Symbol(Symbol::Checkbox)]);
    }

    #[test]
    fn latin1_passes_through_and_unknown_becomes_question_mark() {
        assert_eq!(encode("café"), vec![Run::Text(vec![b'c', b'a', b'f', 0xe9])]);
        assert_eq!(encode("米"), vec![Run::Text(b"?".to_vec())]);
    }

    #[test]
    fn widths_match_afm() {
        // "Item" = I(278) + t(278) + e(556) + m(833) = 1945 units.
        let w = Font::Helvetica.text_width("Item", 10.0);
        assert!((w - 19.45).abs() < 1e-4, "got {w}");
        assert!(Font::HelveticaBold.text_width("Item", 10.0) > w);
    }

    #[test]
    fn digits_are_tabular() {
        let a = Font::Helvetica.text_width("111.00", 10.0);
        let b = Font::Helvetica.text_width("888.88", 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn symbol_width_counts() {
        let w = Font::Helvetica.text_width("\u{20b9}", 10.0);
        assert!((w - 5.56).abs() < 1e-4);
    }
}
