// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::geometry::{density_of, Density, PhysicalSize, PixelSize};
use crate::reference::ReferenceDpi;
use crate::source::RawScreen;

/// One core-protocol screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Screen {
    pub index: usize,
    pub size: PixelSize,
    pub physical: PhysicalSize,
    pub density: Density,
    pub reference: ReferenceDpi,
}

impl Screen {
    pub fn from_raw(raw: &RawScreen) -> Self {
        let density = density_of(raw.size, raw.physical);
        Self {
            index: raw.index,
            size: raw.size,
            physical: raw.physical,
            density,
            reference: ReferenceDpi::protocol(density.dpi()),
        }
    }
}
