//! Master password gate for wiping all data.

use crate::error::{TrackerError, TrackerResult};

/// Password required by a full reset.
///
/// Only guards against wiping data by accident; it is compared verbatim and
/// stored in plain text.
pub const MASTER_PASSWORD: &str = "reset-all-data";

/// Checks `password` against [`MASTER_PASSWORD`].
pub fn verify_master_password(password: &str) -> TrackerResult<()> {
    if password == MASTER_PASSWORD {
        Ok(())
    } else {
        Err(TrackerError::IncorrectPassword)
    }
}
