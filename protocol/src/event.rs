use std::collections::BTreeMap;

use minescan_core::{CellUpdate, Coord, RoundReport, ScanWindow, SessionObserver, Symbol};
use serde::{Deserialize, Serialize};

use crate::*;

/// Name of the goal slot that carries the end-of-round notification.
pub const GOAL_STATE_SLOT: &str = "state";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalState {
    #[serde(rename = "gameover-win")]
    GameoverWin,
    #[serde(rename = "gameover-loss")]
    GameoverLoss,
}

impl GoalState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GameoverWin => "gameover-win",
            Self::GameoverLoss => "gameover-loss",
        }
    }
}

impl From<&RoundReport> for GoalState {
    fn from(report: &RoundReport) -> Self {
        match report {
            RoundReport::Won { .. } => Self::GameoverWin,
            RoundReport::Lost { .. } => Self::GameoverLoss,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    RoundStarted {
        round: u32,
    },
    CellUpdated {
        x: Coord,
        y: Coord,
        symbol: Symbol,
        highlight: bool,
    },
    /// Scan result keyed by slot label `aa`..`ee`.
    Perception {
        x: Coord,
        y: Coord,
        slots: BTreeMap<String, Symbol>,
    },
    GoalState {
        slot: String,
        state: GoalState,
    },
    RoundEnded {
        report: RoundReport,
    },
    Rejected {
        reason: String,
    },
}

impl Event {
    pub fn perception(window: &ScanWindow) -> Self {
        let (x, y) = window.focus();
        Self::Perception {
            x,
            y,
            slots: window
                .slots()
                .map(|(label, symbol)| (label.to_owned(), symbol))
                .collect(),
        }
    }

    pub fn goal_state(report: &RoundReport) -> Self {
        Self::GoalState {
            slot: GOAL_STATE_SLOT.to_owned(),
            state: report.into(),
        }
    }

    pub fn rejected(reason: impl ToString) -> Self {
        Self::Rejected {
            reason: reason.to_string(),
        }
    }
}

impl From<CellUpdate> for Event {
    fn from(update: CellUpdate) -> Self {
        let (x, y) = update.coords;
        Self::CellUpdated {
            x,
            y,
            symbol: update.symbol,
            highlight: update.highlight,
        }
    }
}

pub fn encode_event(event: &Event) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

pub fn decode_event(line: &str) -> Result<Event> {
    Ok(serde_json::from_str(line)?)
}

/// Session observer that queues protocol events until they are drained.
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Vec<Event>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Event> {
        self.events.drain(..)
    }
}

impl SessionObserver for EventBuffer {
    fn round_started(&mut self, round: u32) {
        self.push(Event::RoundStarted { round });
    }

    fn cell_updated(&mut self, update: CellUpdate) {
        self.push(update.into());
    }

    fn round_ended(&mut self, report: &RoundReport) {
        log::debug!("Queueing end of round {}", report.round());
        self.push(Event::goal_state(report));
        self.push(Event::RoundEnded { report: *report });
    }
}
