//! Fixed-width bit patterns with don't-care positions.

use crate::error::IrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One position of a [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternBit {
    /// The bit must be 0.
    Zero,
    /// The bit must be 1.
    One,
    /// The bit is not examined.
    DontCare,
}

impl PatternBit {
    fn to_char(self) -> char {
        match self {
            PatternBit::Zero => '0',
            PatternBit::One => '1',
            PatternBit::DontCare => '-',
        }
    }
}

/// A switch case pattern over `0`, `1` and `-` (don't care).
///
/// The leftmost character is the most significant bit, so `"-1"` matches any
/// two-bit value whose bit 0 is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(String);

impl Pattern {
    /// Parses a pattern, rejecting characters other than `0`, `1` and `-`.
    pub fn parse(text: &str) -> Result<Self, IrError> {
        if let Some(ch) = text.chars().find(|c| !matches!(c, '0' | '1' | '-')) {
            return Err(IrError::InvalidPattern {
                pattern: text.to_string(),
                ch,
            });
        }
        Ok(Pattern(text.to_string()))
    }

    /// The pattern of `width` don't-care bits, matching every value.
    pub fn wildcard(width: u32) -> Self {
        Pattern("-".repeat(width as usize))
    }

    /// The exact binary spelling of `value` in `width` bits.
    pub fn from_int(value: u64, width: u32) -> Result<Self, IrError> {
        if width < 64 && value >> width != 0 {
            return Err(IrError::ValueOverflow { value, width });
        }
        let text = (0..width)
            .rev()
            .map(|bit| {
                if bit < 64 && (value >> bit) & 1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect();
        Ok(Pattern(text))
    }

    /// Builds a pattern from bits listed least significant first.
    pub fn from_lsb_bits(bits: &[PatternBit]) -> Self {
        Pattern(bits.iter().rev().map(|bit| bit.to_char()).collect())
    }

    /// The number of bits this pattern constrains or ignores.
    pub fn width(&self) -> u32 {
        self.0.len() as u32
    }

    /// The bit at `index`, counted from the least significant end.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn bit(&self, index: u32) -> PatternBit {
        let width = self.width();
        assert!(index < width, "index {index} out of bounds for width {width}");
        match self.0.as_bytes()[(width - 1 - index) as usize] {
            b'0' => PatternBit::Zero,
            b'1' => PatternBit::One,
            _ => PatternBit::DontCare,
        }
    }

    /// Tests `value` against the pattern. Bits of `value` above the pattern
    /// width are ignored.
    pub fn matches(&self, value: u64) -> bool {
        (0..self.width()).all(|index| {
            let set = index < 64 && (value >> index) & 1 == 1;
            match self.bit(index) {
                PatternBit::Zero => !set,
                PatternBit::One => set,
                PatternBit::DontCare => true,
            }
        })
    }

    /// The pattern text, most significant bit first.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Pattern {
    type Error = IrError;

    fn try_from(text: String) -> Result<Self, IrError> {
        Pattern::parse(&text)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> String {
        pattern.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_invalid_characters() {
        assert_eq!(
            Pattern::parse("1x0"),
            Err(IrError::InvalidPattern {
                pattern: "1x0".to_string(),
                ch: 'x'
            })
        );
        assert!(Pattern::parse("10-").is_ok());
    }

    #[test]
    fn msb_first_matching() {
        let p = Pattern::parse("-1").unwrap();
        assert!(p.matches(0b01));
        assert!(p.matches(0b11));
        assert!(!p.matches(0b10));
        assert_eq!(p.bit(0), PatternBit::One);
        assert_eq!(p.bit(1), PatternBit::DontCare);
    }

    #[test]
    fn wildcard_matches_everything() {
        let p = Pattern::wildcard(3);
        assert_eq!(p.as_str(), "---");
        assert!((0..8).all(|v| p.matches(v)));
    }

    #[test]
    fn from_int_spelling() {
        assert_eq!(Pattern::from_int(5, 4).unwrap().as_str(), "0101");
        assert_eq!(
            Pattern::from_int(4, 2),
            Err(IrError::ValueOverflow { value: 4, width: 2 })
        );
    }

    #[test]
    fn from_lsb_bits_reverses() {
        let p = Pattern::from_lsb_bits(&[PatternBit::One, PatternBit::DontCare, PatternBit::Zero]);
        assert_eq!(p.as_str(), "0-1");
    }

    #[test]
    fn serde_validates() {
        let p: Pattern = serde_json::from_str("\"1-0\"").unwrap();
        assert_eq!(p.width(), 3);
        assert!(serde_json::from_str::<Pattern>("\"12\"").is_err());
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"1-0\"");
    }
}
