use std::str::FromStr;

use minescan_core::{Action, ActionEvent, Coord, GameError};
use serde::{Deserialize, Serialize};

use crate::*;

/// An action request as it arrives on the wire.
///
/// Coordinates are signed so that off-board requests can be expressed and rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub x: i32,
    pub y: i32,
    pub action: Action,
}

impl Command {
    pub const fn new(x: i32, y: i32, action: Action) -> Self {
        Self { x, y, action }
    }

    /// Converts to an engine event, rejecting coordinates no board can hold.
    pub fn to_event(self) -> std::result::Result<ActionEvent, GameError> {
        let x = Coord::try_from(self.x).map_err(|_| GameError::OutOfBounds)?;
        let y = Coord::try_from(self.y).map_err(|_| GameError::OutOfBounds)?;
        Ok(ActionEvent::new((x, y), self.action))
    }
}

/// Maps a key or name to an action: `c` reveals ("click"), `f` flags, `s` scans.
pub fn action_from_key(key: &str) -> Option<Action> {
    match key {
        "c" | "reveal" => Some(Action::Reveal),
        "f" | "flag" => Some(Action::Flag),
        "s" | "scan" => Some(Action::Scan),
        _ => None,
    }
}

/// Parses either a JSON object or the `"<x> <y> <key>"` shorthand.
impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.starts_with('{') {
            return Ok(serde_json::from_str(line)?);
        }

        let malformed = || ProtocolError::Malformed(line.to_owned());
        let mut parts = line.split_whitespace();
        let (Some(x), Some(y), Some(key), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let x = x.parse().map_err(|_| malformed())?;
        let y = y.parse().map_err(|_| malformed())?;
        let action = action_from_key(key).ok_or_else(malformed)?;
        Ok(Self::new(x, y, action))
    }
}
