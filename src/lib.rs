//! Personal work-shift tracker
//!
//! This crate records check-in and check-out times for a worker's morning,
//! afternoon and night shifts, groups them into seven-day work weeks, and
//! computes hours and pay with a separate multiplier for extra shifts. Closed
//! weeks are archived into a history.

#![warn(missing_docs)]

pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod planning;
pub mod storage;
pub mod store;
pub mod tracker;
pub mod validation;
