//! Cookie-backed calculator state
//!
//! - [`Memory`]: the last remembered selection, replaced on every remember
//! - [`History`]: every remembered selection, cleared only on delete
//! - [`CurrentValues`]: request input layered over [`Memory`]
//!
//! Memory and History decode their cookies leniently: a payload that does
//! not parse is logged and treated as if nothing was remembered.

pub mod current_values;
pub mod history;
pub mod memory;
mod storage;

pub use current_values::CurrentValues;
pub use history::{DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_COOKIE_SIZE, HISTORY_COOKIE, History, HistoryLimits};
pub use memory::{MEMORY_COOKIE, Memory};
