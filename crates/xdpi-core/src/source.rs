// Author: Dustin Pilgrim
// License: MIT

//! Raw records as a transport hands them over, before any reconciliation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, XdpiError};
use crate::geometry::{PhysicalSize, PixelSize, Rotation};

#[cfg(feature = "clap")]
use clap::ValueEnum;

/// How a backend talks to the server.
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Backend {
    /// One request at a time, each reply awaited before the next request.
    Sync,
    /// All requests of a phase sent up front, replies collected afterwards.
    Batched,
    /// Run both, one after the other.
    Both,
}

impl Backend {
    pub fn label(self) -> &'static str {
        match self {
            Backend::Sync => "sync",
            Backend::Batched => "batched",
            Backend::Both => "both",
        }
    }
}

/// Something that can produce a full snapshot of the display topology.
pub trait TopologySource {
    fn label(&self) -> &str;

    /// Only a lost connection is an error here; partial data is returned
    /// with its failures recorded in the snapshot.
    fn fetch(&mut self) -> Result<DisplaySnapshot>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct RandrVersion {
    pub major: u32,
    pub minor: u32,
}

impl RandrVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// GetOutputPrimary arrived in 1.3.
    pub fn supports_primary(self) -> bool {
        self >= RandrVersion::new(1, 3)
    }

    /// GetMonitors arrived in 1.5.
    pub fn supports_monitors(self) -> bool {
        self >= RandrVersion::new(1, 5)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
    Unknown,
}

impl ConnectionState {
    pub fn from_wire(value: u8) -> Self {
        match value {
            0 => ConnectionState::Connected,
            1 => ConnectionState::Disconnected,
            _ => ConnectionState::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Unknown => "unknown connection",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawOutput {
    pub id: u32,
    /// Explicit-length wire bytes; not NUL-terminated.
    pub name: Vec<u8>,
    pub connection: ConnectionState,
    pub physical: PhysicalSize,
    /// CRTC the output reports itself attached to, if any.
    pub crtc: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawCrtc {
    pub id: u32,
    /// Already axis-correct for the CRTC's rotation.
    pub size: PixelSize,
    pub rotation: Rotation,
    pub outputs: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawMonitor {
    pub name: Vec<u8>,
    pub primary: bool,
    pub automatic: bool,
    pub size: PixelSize,
    pub physical: PhysicalSize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandrSnapshot {
    pub version: RandrVersion,
    /// Output ids in screen-resources order; defines canonical ordering.
    pub resource_outputs: Vec<u32>,
    /// Primary output handle, when the server can tell us.
    pub primary: Option<u32>,
    pub outputs: Vec<RawOutput>,
    pub crtcs: Vec<RawCrtc>,
    /// `None` when the server predates monitors.
    pub monitors: Option<Vec<RawMonitor>>,
    /// Per-record failures the transport skipped over.
    pub failures: Vec<XdpiError>,
}

impl RandrSnapshot {
    pub fn new(version: RandrVersion) -> Self {
        Self {
            version,
            resource_outputs: Vec::new(),
            primary: None,
            outputs: Vec::new(),
            crtcs: Vec::new(),
            monitors: None,
            failures: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawScreen {
    pub index: usize,
    pub size: PixelSize,
    pub physical: PhysicalSize,
    /// `None` when RandR is absent or its resources could not be read.
    pub randr: Option<RandrSnapshot>,
    /// Why there is no RandR data, if there isn't.
    pub randr_unavailable: Option<XdpiError>,
}

impl RawScreen {
    pub fn new(index: usize, size: PixelSize, physical: PhysicalSize) -> Self {
        Self {
            index,
            size,
            physical,
            randr: None,
            randr_unavailable: None,
        }
    }
}

/// One Xinerama region. Pixel geometry only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyHead {
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub size: PixelSize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DisplaySnapshot {
    pub screens: Vec<RawScreen>,
    pub legacy_heads: Vec<LegacyHead>,
    /// Raw `Xft.dpi` resource string, if set.
    pub font_dpi: Option<String>,
    pub environment: Vec<EnvVar>,
    /// Display-level problems (missing extensions and the like).
    pub notes: Vec<XdpiError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_gates() {
        assert!(!RandrVersion::new(1, 2).supports_primary());
        assert!(RandrVersion::new(1, 3).supports_primary());
        assert!(!RandrVersion::new(1, 4).supports_monitors());
        assert!(RandrVersion::new(1, 5).supports_monitors());
        assert!(RandrVersion::new(2, 0).supports_monitors());
    }

    #[test]
    fn connection_from_wire() {
        assert_eq!(ConnectionState::from_wire(0), ConnectionState::Connected);
        assert_eq!(ConnectionState::from_wire(1), ConnectionState::Disconnected);
        assert_eq!(ConnectionState::from_wire(2), ConnectionState::Unknown);
    }
}
