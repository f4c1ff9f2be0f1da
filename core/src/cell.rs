use core::fmt;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Player-visible display symbol of a cell, or of a scan slot outside the board.
///
/// The textual form is a fixed alphabet shared with perception consumers:
/// `u`, `m`, `c`, `f`, `1`..`8` and `x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Unexplored,
    Mine,
    Clear,
    Flagged,
    /// Revealed cell with `1..=8` adjacent mines. Other values are not part of the alphabet:
    /// they display as `?` and fail to serialize.
    Count(u8),
    /// Scan slot that falls outside the board.
    Outside,
}

impl Symbol {
    const COUNTS: [&'static str; 8] = ["1", "2", "3", "4", "5", "6", "7", "8"];

    /// Symbol shown for a revealed safe cell.
    pub const fn revealed(adjacent_mines: u8) -> Self {
        debug_assert!(adjacent_mines <= 8);
        if adjacent_mines == 0 {
            Self::Clear
        } else {
            Self::Count(adjacent_mines)
        }
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Count(0) | Self::Count(9..))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unexplored => "u",
            Self::Mine => "m",
            Self::Clear => "c",
            Self::Flagged => "f",
            Self::Count(count @ 1..=8) => Self::COUNTS[count as usize - 1],
            Self::Count(_) => "?",
            Self::Outside => "x",
        }
    }

    /// Whether a cell showing this symbol is drawn with a highlighted shade.
    pub const fn is_highlighted(self) -> bool {
        matches!(self, Self::Clear | Self::Flagged | Self::Count(_))
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::Unexplored
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseSymbolError;

impl fmt::Display for ParseSymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown display symbol")
    }
}

impl FromStr for Symbol {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(match s {
            "u" => Self::Unexplored,
            "m" => Self::Mine,
            "c" => Self::Clear,
            "f" => Self::Flagged,
            "x" => Self::Outside,
            _ => match s.as_bytes() {
                &[digit @ b'1'..=b'8'] => Self::Count(digit - b'0'),
                _ => return Err(ParseSymbolError),
            },
        })
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if !self.is_valid() {
            return Err(ser::Error::custom("adjacent mine count outside 1..=8"));
        }
        serializer.serialize_str(self.as_str())
    }
}

struct SymbolVisitor;

impl Visitor<'_> for SymbolVisitor {
    type Value = Symbol;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("one of \"u\", \"m\", \"c\", \"f\", \"x\" or a digit 1-8")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> core::result::Result<Symbol, E> {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_str(SymbolVisitor)
    }
}

/// State of a single board position.
///
/// Only [`Board`](crate::Board) mutates cells; everything else gets shared references.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) has_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) display: Symbol,
}

impl Cell {
    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Number of mines among the in-bounds neighbors. Meaningless for mine cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// What the player currently sees, not the hidden truth.
    pub const fn display(&self) -> Symbol {
        self.display
    }
}
