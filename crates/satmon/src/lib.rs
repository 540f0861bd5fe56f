//! Saturday Morning - Core Library
//!
//! Releases a media library one episode at a time. A source tree is walked
//! until a directory holding a `.satmonrc` is found; that directory's schedule
//! decides whether its first entry (in natural order) moves to the same
//! relative place under the destination tree today.
//!
//! ```text
//! walker ──► scope::load_config ──► config (INI, layered options)
//!   │               │
//!   │               ▼
//!   │         scope::resolve ──► entries ──► order
//!   │               │
//!   │               ▼
//!   │         schedule::evaluate
//!   │               │
//!   ▼               ▼
//! report ◄──── executor ──► fs::Filesystem (LocalFs)
//! ```

pub mod config;
pub mod date;
pub mod entries;
pub mod error;
pub mod executor;
pub mod fs;
pub mod order;
pub mod report;
pub mod schedule;
pub mod scope;
pub mod walker;

#[cfg(test)]
mod test_fs;

pub use config::{EffectiveOptions, ScopeConfig, Subject, CONF_NAME};
pub use error::{Result, SatmonError};
pub use fs::{Filesystem, LocalFs};
pub use report::{RunReport, ScopeAction, ScopeReport};
pub use schedule::MoveDecision;
pub use walker::{run, RunOptions, Walker};
