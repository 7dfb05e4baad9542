//! Scheduling and ranking engine for petanque tournaments.
//!
//! Everything here is a pure function over in-memory values:
//! - `round_robin`: circle-method pairings with byes for odd team counts
//! - `standings`: leaderboard from a roster and a set of results
//! - `knockout`: bracket seeding from a ranked subset of teams
//!
//! Randomness is always passed in, so tests can use a seeded generator and
//! applications can use `rand::thread_rng()`.

pub mod knockout;
pub mod roster;
pub mod round_robin;
pub mod shuffle;
pub mod standings;
pub mod types;

pub use knockout::*;
pub use roster::*;
pub use round_robin::*;
pub use shuffle::shuffle;
pub use standings::*;
pub use types::*;
