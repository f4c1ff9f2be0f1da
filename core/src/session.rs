use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Reveal,
    Flag,
    Scan,
}

/// A discrete input event addressed at a board position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub coords: Coord2,
    pub action: Action,
}

impl ActionEvent {
    pub const fn new(coords: Coord2, action: Action) -> Self {
        Self { coords, action }
    }
}

/// Statistics emitted once per completed round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RoundReport {
    Won {
        round: u32,
    },
    Lost {
        round: u32,
        correct_flags: CellCount,
        incorrect_flags: CellCount,
        unmarked_mines: CellCount,
    },
}

impl RoundReport {
    pub const fn round(&self) -> u32 {
        match *self {
            Self::Won { round } | Self::Lost { round, .. } => round,
        }
    }

    pub const fn state(&self) -> SessionState {
        match self {
            Self::Won { .. } => SessionState::Won,
            Self::Lost { .. } => SessionState::Lost,
        }
    }
}

/// A cell whose display changed, for redrawing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub coords: Coord2,
    pub symbol: Symbol,
    pub highlight: bool,
}

impl CellUpdate {
    fn from_board(board: &Board, coords: Coord2) -> Result<Self> {
        let symbol = board.cell_at(coords)?.display();
        Ok(Self {
            coords,
            symbol,
            highlight: symbol.is_highlighted(),
        })
    }
}

/// Receives what the session produces: redraws and round statistics.
///
/// Observers never feed back into game state.
pub trait SessionObserver {
    /// A fresh board was set up; every cell is unexplored again. `round` is the round now being
    /// played, counting from 1.
    fn round_started(&mut self, _round: u32) {}

    fn cell_updated(&mut self, _update: CellUpdate) {}

    fn round_ended(&mut self, _report: &RoundReport) {}
}

impl SessionObserver for () {}

impl<O: SessionObserver + ?Sized> SessionObserver for &mut O {
    fn round_started(&mut self, round: u32) {
        (**self).round_started(round)
    }

    fn cell_updated(&mut self, update: CellUpdate) {
        (**self).cell_updated(update)
    }

    fn round_ended(&mut self, report: &RoundReport) {
        (**self).round_ended(report)
    }
}

/// Result of a dispatched action.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// Positions newly revealed; the round goes on.
    Revealed(Vec<Coord2>),
    /// A mine was flagged; the round goes on.
    Flagged,
    Scanned(ScanWindow),
    /// The action ended the round. A new round is already in play.
    RoundEnded(RoundReport),
}

/// Sequences rounds: setup, action dispatch, win/loss detection and round counting.
#[derive(Debug)]
pub struct GameSession<G = RandomMineGenerator, O = ()> {
    board: Board,
    generator: G,
    observer: O,
    state: SessionState,
    rounds_completed: u32,
}

impl GameSession {
    /// Standard session with seeded random mine placement and no observer.
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::new(RandomMineGenerator::new(seed), ())
    }
}

impl<G: MineGenerator, O: SessionObserver> GameSession<G, O> {
    /// Creates a session and starts its first round.
    pub fn new(generator: G, observer: O) -> Result<Self> {
        let mut session = Self {
            board: Board::new(GameConfig::STANDARD),
            generator,
            observer,
            state: SessionState::Playing,
            rounds_completed: 0,
        };
        session.start_round()?;
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of completed rounds, won or lost.
    pub fn round_number(&self) -> u32 {
        self.rounds_completed
    }

    pub fn flagged_count(&self) -> CellCount {
        self.board.flagged_count()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Sets up a fresh board and enters `Playing`.
    pub fn start_round(&mut self) -> Result<()> {
        self.board.new_round(&mut self.generator)?;
        self.state = SessionState::Playing;
        log::debug!("Round {} started", self.rounds_completed + 1);
        self.observer.round_started(self.rounds_completed + 1);
        Ok(())
    }

    pub fn dispatch(&mut self, event: ActionEvent) -> Result<Response> {
        log::trace!("{:?} at {:?}", event.action, event.coords);
        match event.action {
            Action::Reveal => self.on_reveal(event.coords),
            Action::Flag => self.on_flag(event.coords),
            Action::Scan => self.on_scan(event.coords).map(Response::Scanned),
        }
    }

    pub fn on_reveal(&mut self, coords: Coord2) -> Result<Response> {
        self.check_playing()?;

        match self.board.reveal(coords)? {
            RevealOutcome::HitMine => {
                self.emit_update(coords)?;
                self.end_round(SessionState::Lost)
            }
            RevealOutcome::Revealed(revealed) => {
                for &pos in &revealed {
                    self.emit_update(pos)?;
                }
                Ok(Response::Revealed(revealed))
            }
        }
    }

    pub fn on_flag(&mut self, coords: Coord2) -> Result<Response> {
        self.check_playing()?;

        let outcome = self.board.flag(coords)?;
        self.emit_update(coords)?;

        match outcome {
            FlagOutcome::FlaggedEmpty => self.end_round(SessionState::Lost),
            FlagOutcome::FlaggedMine if self.board.all_mines_flagged() => {
                self.end_round(SessionState::Won)
            }
            FlagOutcome::FlaggedMine if self.board.flags_exhausted() => {
                log::warn!("All flags spent without covering every mine");
                self.end_round(SessionState::Lost)
            }
            FlagOutcome::FlaggedMine => Ok(Response::Flagged),
        }
    }

    /// Read-only 5×5 view around `coords`. Rejected with [`GameError::AlreadyEnded`] outside of
    /// `Playing`.
    pub fn on_scan(&self, coords: Coord2) -> Result<ScanWindow> {
        self.check_playing()?;
        self.board.scan(coords)
    }

    fn emit_update(&mut self, coords: Coord2) -> Result<()> {
        let update = CellUpdate::from_board(&self.board, coords)?;
        self.observer.cell_updated(update);
        Ok(())
    }

    fn end_round(&mut self, state: SessionState) -> Result<Response> {
        self.state = state;
        let round = self.rounds_completed + 1;
        let report = match state {
            SessionState::Won => RoundReport::Won { round },
            _ => {
                let tally = self.board.flag_tally();
                RoundReport::Lost {
                    round,
                    correct_flags: tally.correct,
                    incorrect_flags: tally.incorrect,
                    unmarked_mines: tally.unmarked_mines,
                }
            }
        };

        log::info!("Round {} ended: {:?}", round, report);
        self.observer.round_ended(&report);
        self.rounds_completed = round;

        self.start_round()?;
        Ok(Response::RoundEnded(report))
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
