//! Settings loading and management for the shift tracker.
//!
//! Settings cover the tunable constants of the tracker: the extra
//! pay multiplier, week start day, arrival tolerance, note length limit,
//! currency symbol, expected shift windows and the setup defaults.
//!
//! # Example
//!
//! ```no_run
//! use shift_tracker::config::SettingsLoader;
//!
//! let settings = SettingsLoader::load("./config/tracker.yaml").unwrap().into_settings();
//! println!("Extra shifts pay {}x", settings.extra_multiplier);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{ShiftWindow, ShiftWindows, TrackerSettings};
