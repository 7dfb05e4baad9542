//! Tournament runner for petanque competitions
//!
//! This crate sits between a front end and the `petanque_core` engine:
//! - Starting a competition and entering scores round by round
//! - Building the knockout stage from the group standings
//! - Applying scanned score sheets by round and court
//! - Saving and restoring the competition state
//!
//! # Usage
//!
//! ```bash
//! # Start a five-team group stage
//! cargo run -p tournament -- start "Spring Cup" Carreau Pointeurs Tireurs Cochonnet Boules
//!
//! # Enter a result and close the round
//! cargo run -p tournament -- score 1 1 13 7
//! cargo run -p tournament -- finish 1
//! ```

mod competition;
mod config;
mod error;
mod import;
mod report;
mod state;

pub use competition::*;
pub use config::*;
pub use error::*;
pub use import::*;
pub use report::*;
pub use state::*;
