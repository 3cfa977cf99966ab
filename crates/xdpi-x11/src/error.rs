// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};

use xdpi_core::{RecordKind, XdpiError};

pub type Result<T> = std::result::Result<T, X11Error>;

/// Errors that end a backend's run. Per-record protocol errors never become
/// one of these; they are recorded in the snapshot instead.
#[derive(Debug, Error)]
pub enum X11Error {
    #[error("connect error: {0}")]
    Connect(#[from] ConnectError),

    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("reply error: {0}")]
    Reply(#[from] ReplyError),
}

impl From<X11Error> for XdpiError {
    fn from(e: X11Error) -> Self {
        XdpiError::ConnectionUnavailable(e.to_string())
    }
}

/// Split a failed reply into "skip this record" or "give up on the backend".
pub(crate) fn record_failure(err: ReplyError, record: RecordKind, id: u32) -> Result<XdpiError> {
    match err {
        ReplyError::X11Error(e) => {
            let failure = XdpiError::query_failed(record, id, format!("{:?}", e.error_kind));
            eventline::warn!("{failure}");
            Ok(failure)
        }
        other => Err(other.into()),
    }
}
