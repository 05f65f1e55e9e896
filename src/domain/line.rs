//! Line (yao) values
//!
//! Each line carries a polarity (yang/yin) and a state (old/young).
//! Old lines are the changing ones; they invert in the changed hexagram.
//!
//! | Value | Name | Probability |
//! |-------|------|-------------|
//! | 9 | old yang | 1/8 |
//! | 7 | young yang | 3/8 |
//! | 8 | young yin | 3/8 |
//! | 6 | old yin | 1/8 |

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    #[error("Invalid line value: expected 6, 7, 8 or 9, got {0}")]
    InvalidValue(u8),
}

/// A single line of a hexagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Line {
    OldYin,
    YoungYang,
    YoungYin,
    OldYang,
}

impl Line {
    /// All line values, in draw-table order
    pub const ALL: [Line; 4] = [Line::OldYang, Line::YoungYang, Line::YoungYin, Line::OldYin];

    /// Maps a draw in [0, 1) onto a line via the cumulative table
    pub fn from_draw(r: f64) -> Self {
        if r < 0.125 {
            Line::OldYang
        } else if r < 0.5 {
            Line::YoungYang
        } else if r < 0.875 {
            Line::YoungYin
        } else {
            Line::OldYin
        }
    }

    /// Returns the traditional numeric value (6, 7, 8 or 9)
    pub fn value(self) -> u8 {
        match self {
            Line::OldYin => 6,
            Line::YoungYang => 7,
            Line::YoungYin => 8,
            Line::OldYang => 9,
        }
    }

    /// Returns true for 7 and 9
    pub fn is_yang(self) -> bool {
        matches!(self, Line::YoungYang | Line::OldYang)
    }

    /// Returns true for the changing lines, 6 and 9
    pub fn is_old(self) -> bool {
        matches!(self, Line::OldYin | Line::OldYang)
    }

    /// Returns the line after change: old lines invert, young lines stay
    pub fn changed(self) -> Self {
        match self {
            Line::OldYang => Line::YoungYin,
            Line::OldYin => Line::YoungYang,
            young => young,
        }
    }

    /// Returns the young line of the given polarity
    pub fn young(yang: bool) -> Self {
        if yang {
            Line::YoungYang
        } else {
            Line::YoungYin
        }
    }

    /// Returns a display label
    pub fn label(self) -> &'static str {
        match self {
            Line::OldYin => "old yin",
            Line::YoungYang => "young yang",
            Line::YoungYin => "young yin",
            Line::OldYang => "old yang",
        }
    }

    /// Renders the line as a text glyph, marking changing lines
    pub fn glyph(self) -> &'static str {
        match self {
            Line::OldYang => "━━━━━━━ ○",
            Line::YoungYang => "━━━━━━━",
            Line::YoungYin => "━━━ ━━━",
            Line::OldYin => "━━━ ━━━ ×",
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<u8> for Line {
    type Error = LineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Line::OldYin),
            7 => Ok(Line::YoungYang),
            8 => Ok(Line::YoungYin),
            9 => Ok(Line::OldYang),
            other => Err(LineError::InvalidValue(other)),
        }
    }
}

impl From<Line> for u8 {
    fn from(line: Line) -> Self {
        line.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_table_boundaries() {
        assert_eq!(Line::from_draw(0.0), Line::OldYang);
        assert_eq!(Line::from_draw(0.124_999), Line::OldYang);
        assert_eq!(Line::from_draw(0.125), Line::YoungYang);
        assert_eq!(Line::from_draw(0.499_999), Line::YoungYang);
        assert_eq!(Line::from_draw(0.5), Line::YoungYin);
        assert_eq!(Line::from_draw(0.874_999), Line::YoungYin);
        assert_eq!(Line::from_draw(0.875), Line::OldYin);
        assert_eq!(Line::from_draw(0.999_999), Line::OldYin);
    }

    #[test]
    fn polarity_and_state() {
        assert!(Line::OldYang.is_yang() && Line::OldYang.is_old());
        assert!(Line::YoungYang.is_yang() && !Line::YoungYang.is_old());
        assert!(!Line::YoungYin.is_yang() && !Line::YoungYin.is_old());
        assert!(!Line::OldYin.is_yang() && Line::OldYin.is_old());
    }

    #[test]
    fn old_lines_invert_on_change() {
        assert_eq!(Line::OldYang.changed(), Line::YoungYin);
        assert_eq!(Line::OldYin.changed(), Line::YoungYang);
        assert_eq!(Line::YoungYang.changed(), Line::YoungYang);
        assert_eq!(Line::YoungYin.changed(), Line::YoungYin);
    }

    #[test]
    fn value_conversion() {
        for line in Line::ALL {
            assert_eq!(Line::try_from(line.value()), Ok(line));
        }
        assert_eq!(Line::try_from(5), Err(LineError::InvalidValue(5)));
        assert_eq!(Line::try_from(10), Err(LineError::InvalidValue(10)));
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&Line::OldYang).unwrap(), "9");
        let parsed: Line = serde_json::from_str("6").unwrap();
        assert_eq!(parsed, Line::OldYin);
        assert!(serde_json::from_str::<Line>("4").is_err());
    }
}
