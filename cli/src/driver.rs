use std::io::{BufRead, Write};

use anyhow::Context;
use minescan_core::*;
use minescan_protocol::{Command, Event, EventBuffer, encode_event};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub won: u32,
    pub lost: u32,
}

/// Feeds input lines to a session and writes the resulting events.
pub struct Driver<G, W> {
    session: GameSession<G, EventBuffer>,
    out: W,
    round_limit: Option<u32>,
    show_board: bool,
    summary: Summary,
}

impl<G: MineGenerator, W: Write> Driver<G, W> {
    pub fn new(session: GameSession<G, EventBuffer>, out: W) -> Self {
        Self {
            session,
            out,
            round_limit: None,
            show_board: false,
            summary: Summary::default(),
        }
    }

    pub fn with_round_limit(mut self, round_limit: Option<u32>) -> Self {
        self.round_limit = round_limit;
        self
    }

    pub fn with_board_output(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }

    /// Processes `input` line by line until it ends or the round limit is reached.
    pub fn run<R: BufRead>(&mut self, input: R) -> anyhow::Result<Summary> {
        self.flush_events()?;

        for line in input.lines() {
            if self.limit_reached() {
                break;
            }

            let line = line.context("Could not read input")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            self.handle_line(line)?;
            self.out.flush()?;

            if self.show_board {
                eprint!("{}", self.session.board());
            }
        }

        Ok(self.summary)
    }

    fn limit_reached(&self) -> bool {
        self.round_limit
            .is_some_and(|limit| self.session.round_number() >= limit)
    }

    fn handle_line(&mut self, line: &str) -> anyhow::Result<()> {
        let event = match line.parse::<Command>() {
            Ok(command) => command.to_event(),
            Err(err) => {
                log::warn!("{}", err);
                return self.write_event(&Event::rejected(err));
            }
        };

        match event.and_then(|event| self.session.dispatch(event)) {
            Ok(response) => {
                self.flush_events()?;
                match response {
                    Response::Scanned(window) => self.write_event(&Event::perception(&window))?,
                    Response::RoundEnded(report) => self.record(&report),
                    Response::Revealed(_) | Response::Flagged => {}
                }
                Ok(())
            }
            Err(GameError::OutOfBounds) => {
                log::warn!("Rejected {:?}: out of bounds", line);
                self.write_event(&Event::rejected(GameError::OutOfBounds))
            }
            Err(err) => Err(err).context("Session cannot continue"),
        }
    }

    fn record(&mut self, report: &RoundReport) {
        match report.state() {
            SessionState::Won => self.summary.won += 1,
            _ => self.summary.lost += 1,
        }
    }

    fn flush_events(&mut self) -> anyhow::Result<()> {
        let events: Vec<_> = self.session.observer_mut().drain().collect();
        for event in &events {
            self.write_event(event)?;
        }
        Ok(())
    }

    fn write_event(&mut self, event: &Event) -> anyhow::Result<()> {
        writeln!(self.out, "{}", encode_event(event)?).context("Could not write event")
    }
}
