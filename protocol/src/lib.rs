//! Wire format between the engine and the outside world: action commands coming in, perception
//! frames, redraws and round statistics going out. Everything is JSON, one message per line.

pub use command::*;
pub use error::*;
pub use event::*;

mod command;
mod error;
mod event;
