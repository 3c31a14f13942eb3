//! Per-item failures collected during a transfer

use std::fmt;

/// One item that could not be extracted or loaded.
///
/// These never abort a run; they are counted against the total and shown
/// to the user as warnings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemFailure {
    /// Document id (or file name when no id could be derived)
    pub id: String,
    /// Human readable description, rendered as the warning text
    pub message: String,
}

impl ItemFailure {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
