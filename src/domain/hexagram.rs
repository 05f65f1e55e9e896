//! Hexagram identifiers and line figures
//!
//! ID Format: `Q{n}` with `n` in `1..=64`.
//!
//! The number is the 6-bit yang/yin pattern plus one, with line 0 (bottom)
//! as the least significant bit. Old/young state does not affect the ID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::line::Line;

#[derive(Debug, Error, PartialEq)]
pub enum HexagramIdError {
    #[error("Invalid hexagram ID format: expected 'Q{{1..64}}', got '{0}'")]
    InvalidFormat(String),

    #[error("Hexagram number out of range: expected 1..=64, got {0}")]
    OutOfRange(u32),

    #[error("Hexagram ID {stored} does not match its lines, which give {derived}")]
    Mismatch {
        stored: HexagramId,
        derived: HexagramId,
    },
}

/// Hexagram identifier in the format `Q{1..64}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexagramId {
    bits: u8,
}

impl HexagramId {
    /// Creates an ID from a 6-bit pattern (higher bits are ignored)
    pub fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0b11_1111 }
    }

    /// Creates an ID from its 1-based number
    pub fn from_number(number: u32) -> Result<Self, HexagramIdError> {
        if !(1..=64).contains(&number) {
            return Err(HexagramIdError::OutOfRange(number));
        }
        Ok(Self::from_bits((number - 1) as u8))
    }

    /// Derives the ID from a line sequence's polarity
    pub fn from_lines(lines: &[Line; 6]) -> Self {
        let bits = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_yang())
            .fold(0u8, |acc, (i, _)| acc | (1 << i));
        Self { bits }
    }

    /// Returns the 6-bit yang/yin pattern
    pub fn bits(self) -> u8 {
        self.bits
    }

    /// Returns the 1-based number
    pub fn number(self) -> u32 {
        u32::from(self.bits) + 1
    }

    /// Returns true if line `position` (0 = bottom) is yang
    pub fn is_yang_at(self, position: usize) -> bool {
        position < 6 && self.bits & (1 << position) != 0
    }

    /// Returns the young-line figure with this pattern
    pub fn young_lines(self) -> [Line; 6] {
        std::array::from_fn(|i| Line::young(self.is_yang_at(i)))
    }

    /// Returns the lower trigram (lines 0-2)
    pub fn lower(self) -> Trigram {
        Trigram::from_bits(self.bits & 0b111)
    }

    /// Returns the upper trigram (lines 3-5)
    pub fn upper(self) -> Trigram {
        Trigram::from_bits(self.bits >> 3)
    }

    /// Iterates over all 64 identifiers in numeric order
    pub fn all() -> impl Iterator<Item = HexagramId> {
        (0u8..64).map(Self::from_bits)
    }
}

impl fmt::Display for HexagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

impl FromStr for HexagramId {
    type Err = HexagramIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('Q')
            .or_else(|| s.strip_prefix('q'))
            .ok_or_else(|| HexagramIdError::InvalidFormat(s.to_string()))?;

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(HexagramIdError::InvalidFormat(s.to_string()));
        }

        let number: u32 = digits
            .parse()
            .map_err(|_| HexagramIdError::InvalidFormat(s.to_string()))?;

        Self::from_number(number)
    }
}

impl TryFrom<String> for HexagramId {
    type Error = HexagramIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexagramId> for String {
    fn from(id: HexagramId) -> Self {
        id.to_string()
    }
}

/// One of the eight three-line figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigram {
    Kun,
    Zhen,
    Kan,
    Dui,
    Gen,
    Li,
    Xun,
    Qian,
}

impl Trigram {
    /// Creates a trigram from a 3-bit pattern, bottom line least significant
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Trigram::Kun,
            0b001 => Trigram::Zhen,
            0b010 => Trigram::Kan,
            0b011 => Trigram::Dui,
            0b100 => Trigram::Gen,
            0b101 => Trigram::Li,
            0b110 => Trigram::Xun,
            _ => Trigram::Qian,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Trigram::Kun => "Kun",
            Trigram::Zhen => "Zhen",
            Trigram::Kan => "Kan",
            Trigram::Dui => "Dui",
            Trigram::Gen => "Gen",
            Trigram::Li => "Li",
            Trigram::Xun => "Xun",
            Trigram::Qian => "Qian",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Trigram::Qian => '☰',
            Trigram::Dui => '☱',
            Trigram::Li => '☲',
            Trigram::Zhen => '☳',
            Trigram::Xun => '☴',
            Trigram::Kan => '☵',
            Trigram::Gen => '☶',
            Trigram::Kun => '☷',
        }
    }

    /// Returns the traditional image (heaven, lake, ...)
    pub fn image(self) -> &'static str {
        match self {
            Trigram::Qian => "heaven",
            Trigram::Dui => "lake",
            Trigram::Li => "fire",
            Trigram::Zhen => "thunder",
            Trigram::Xun => "wind",
            Trigram::Kan => "water",
            Trigram::Gen => "mountain",
            Trigram::Kun => "earth",
        }
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.symbol(), self.name(), self.image())
    }
}

/// A six-line figure together with its identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHexagram")]
pub struct Hexagram {
    pub id: HexagramId,
    /// Lines from bottom (0) to top (5)
    #[serde(rename = "yaos")]
    pub lines: [Line; 6],
}

/// Unchecked wire form; the stored id must agree with the lines
#[derive(Deserialize)]
struct RawHexagram {
    id: HexagramId,
    yaos: [Line; 6],
}

impl TryFrom<RawHexagram> for Hexagram {
    type Error = HexagramIdError;

    fn try_from(raw: RawHexagram) -> Result<Self, Self::Error> {
        let hexagram = Hexagram::from_lines(raw.yaos);
        if hexagram.id != raw.id {
            return Err(HexagramIdError::Mismatch {
                stored: raw.id,
                derived: hexagram.id,
            });
        }
        Ok(hexagram)
    }
}

impl Hexagram {
    /// Builds a hexagram from its lines, deriving the identifier
    pub fn from_lines(lines: [Line; 6]) -> Self {
        Self {
            id: HexagramId::from_lines(&lines),
            lines,
        }
    }

    /// Returns the figure with every old line inverted (9 -> 8, 6 -> 7)
    pub fn changed(&self) -> Self {
        Self::from_lines(self.lines.map(Line::changed))
    }

    /// Returns the figure built from the middle four lines:
    /// positions 1-3 become the lower half, positions 2-4 the upper half
    pub fn mutual(&self) -> Self {
        let l = &self.lines;
        Self::from_lines([l[1], l[2], l[3], l[2], l[3], l[4]])
    }

    /// Returns the positions of the changing lines
    pub fn changing_positions(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_old())
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns the numeric line values, bottom to top
    pub fn values(&self) -> [u8; 6] {
        self.lines.map(Line::value)
    }

    /// Renders the figure top line first, one line per row
    pub fn render(&self) -> Vec<&'static str> {
        self.lines.iter().rev().map(|line| line.glyph()).collect()
    }
}
