//! Refresh policy for the primary/example repository pair.

use tracing::{error, warn};

use crate::error::Result;

/// Both files after a refresh attempt.
#[derive(Debug)]
pub struct Reconciled<T> {
    pub primary: T,
    /// `None` when the example file could not be read; the previous example
    /// snapshot stays installed in that case.
    pub example: Option<T>,
}

/// Combine the two read results.
///
/// The primary file is required: its failure fails the whole refresh. The
/// example file is optional: its failure is logged and dropped.
pub fn reconcile<T>(primary: Result<T>, example: Result<T>) -> Result<Reconciled<T>> {
    let example = match example {
        Ok(example) => Some(example),
        Err(err) => {
            warn!(error = %err, "example env file unavailable, keeping previous definitions");
            None
        }
    };

    let primary = primary.inspect_err(|err| error!(error = %err, "failed to refresh env file"))?;

    Ok(Reconciled { primary, example })
}
