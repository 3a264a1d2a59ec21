use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Which vendor payload a snapshot was being built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Current conditions, optionally carrying an embedded `forecast` list.
    CurrentConditions,
    /// A standalone array of daily forecast records.
    DailyForecast,
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::CurrentConditions => f.write_str("current conditions"),
            Payload::DailyForecast => f.write_str("daily forecast"),
        }
    }
}

/// Errors raised while turning a vendor payload into a [`crate::VendorSnapshot`].
///
/// Every shape problem (missing field, wrong type, out-of-range epoch) is
/// reported here once, at the parse boundary. The entity view never fails.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Malformed {payload} payload: {message}")]
    Malformed {
        payload: Payload,
        /// `(line, column)` of the offending token. Only known for text
        /// input; `None` when parsing an already decoded value.
        position: Option<(usize, usize)>,
        message: String,
    },
}

impl SnapshotError {
    pub(crate) fn malformed(payload: Payload, err: serde_json::Error) -> Self {
        debug!(%payload, error = %err, "Rejected vendor payload");

        // serde_json reports line 0 for errors raised outside a text parser.
        let position = (err.line() > 0).then(|| (err.line(), err.column()));

        SnapshotError::Malformed {
            payload,
            position,
            message: err.to_string(),
        }
    }

    /// The payload that failed to parse.
    pub fn payload(&self) -> Payload {
        match self {
            SnapshotError::Malformed { payload, .. } => *payload,
        }
    }

    /// Where in the input text the failure was detected, if known.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            SnapshotError::Malformed { position, .. } => *position,
        }
    }
}
