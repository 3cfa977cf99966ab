// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::geometry::{density_of, Density, PhysicalSize, PixelSize};
use crate::name::BoundedName;
use crate::source::RawMonitor;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Monitor {
    pub name: BoundedName,
    pub primary: bool,
    /// Server-assigned rather than configured by the user.
    pub automatic: bool,
    pub size: PixelSize,
    /// Reported physical size, swapped when `rotated`.
    pub physical: PhysicalSize,
    /// Inferred: monitors carry no rotation on the wire.
    pub rotated: bool,
    pub density: Option<Density>,
    pub dpi: Option<u32>,
}

/// A monitor is taken as rotated when its pixel and physical aspect disagree.
pub fn infer_rotation(size: PixelSize, physical: PhysicalSize) -> bool {
    size.is_landscape() != physical.is_landscape()
}

impl Monitor {
    pub fn build(raw: &RawMonitor) -> Self {
        let rotated = infer_rotation(raw.size, raw.physical);
        let physical = raw.physical.oriented(rotated);

        let density = physical
            .is_known()
            .then(|| density_of(raw.size, physical));

        Self {
            name: BoundedName::from_wire(&raw.name),
            primary: raw.primary,
            automatic: raw.automatic,
            size: raw.size,
            physical,
            rotated,
            density,
            dpi: density.map(|d| d.dpi()),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.dpi.is_some()
    }
}
