#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
#[cfg(feature = "std")]
mod cli;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
#[cfg(feature = "std")]
pub mod records;
mod ship;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, SetCells};
pub use board::*;
#[cfg(feature = "std")]
pub use cli::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, log_level, LOG_ENV};
#[cfg(feature = "std")]
pub use records::{Record, RecordBook, Records};
pub use ship::*;
