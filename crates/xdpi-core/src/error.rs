// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, XdpiError>;

/// Which kind of per-record request a failure belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordKind {
    ScreenResources,
    Output,
    Crtc,
    Monitor,
    PrimaryOutput,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::ScreenResources => "screen resources",
            RecordKind::Output => "output",
            RecordKind::Crtc => "crtc",
            RecordKind::Monitor => "monitor",
            RecordKind::PrimaryOutput => "primary output",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum XdpiError {
    #[error("cannot connect to display server: {0}")]
    ConnectionUnavailable(String),

    #[error("{extension} unsupported: {reason}")]
    ExtensionUnsupported { extension: String, reason: String },

    #[error("{record} {id} query failed: {reason}")]
    QueryFailed {
        record: RecordKind,
        id: u32,
        reason: String,
    },

    #[error("ignoring Xft.dpi override {value:?}: {reason}")]
    InvalidOverride { value: String, reason: String },

    #[error("out of memory while building screen {screen}")]
    AllocationFailure { screen: usize },
}

impl XdpiError {
    pub fn query_failed(record: RecordKind, id: u32, reason: impl fmt::Display) -> Self {
        XdpiError::QueryFailed {
            record,
            id,
            reason: reason.to_string(),
        }
    }

    pub fn unsupported(extension: &str, reason: impl fmt::Display) -> Self {
        XdpiError::ExtensionUnsupported {
            extension: extension.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Only a lost connection stops a backend; everything else degrades.
    pub fn is_fatal(&self) -> bool {
        matches!(self, XdpiError::ConnectionUnavailable(_))
    }
}
