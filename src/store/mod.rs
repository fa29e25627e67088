//! Stateful stores over the storage gateway.
//!
//! [`WeekState`] is the synchronous state machine for the current week and
//! history; [`WeekStore`], [`WorkerStore`] and [`PreferencesStore`] own their
//! in-memory state and persist it after every change.

mod preferences_store;
mod reset;
mod week_state;
mod week_store;
mod worker_store;

pub use preferences_store::PreferencesStore;
pub use reset::{MASTER_PASSWORD, verify_master_password};
pub use week_state::WeekState;
pub use week_store::WeekStore;
pub use worker_store::WorkerStore;
