// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::geometry::{density_of, Density, PhysicalSize, PixelSize, Rotation};
use crate::name::BoundedName;
use crate::source::{ConnectionState, RawCrtc, RawOutput};

/// Sentinel shown for outputs that have no usable DPI.
pub const UNUSABLE_DPI: i32 = -1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Output {
    pub id: u32,
    pub name: BoundedName,
    pub connection: ConnectionState,
    pub primary: bool,

    /// Pixel size of the driving CRTC, `None` if the output drives none.
    pub size: Option<PixelSize>,

    /// Reported physical size, swapped when `rotated`.
    pub physical: PhysicalSize,
    pub rotated: bool,

    pub density: Option<Density>,

    /// `None` when not connected, not driving a CRTC, or size unknown.
    pub dpi: Option<u32>,
}

impl Output {
    /// Build the canonical record from a raw output and the CRTC it drives.
    pub fn build(raw: &RawOutput, crtc: Option<&RawCrtc>, primary: bool) -> Self {
        let rotation = crtc.map(|c| c.rotation).unwrap_or(Rotation::Normal);
        let rotated = rotation.swaps_axes();
        let physical = raw.physical.oriented(rotated);
        let size = crtc.map(|c| c.size);

        let usable = raw.connection == ConnectionState::Connected && physical.is_known();

        let density = match size {
            Some(px) if usable => Some(density_of(px, physical)),
            _ => None,
        };

        Self {
            id: raw.id,
            name: BoundedName::from_wire(&raw.name),
            connection: raw.connection,
            primary,
            size,
            physical,
            rotated,
            density,
            dpi: density.map(|d| d.dpi()),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.dpi.is_some()
    }

    /// DPI with the `-1` sentinel for unusable outputs.
    pub fn raw_dpi(&self) -> i32 {
        self.dpi.map(|d| d as i32).unwrap_or(UNUSABLE_DPI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(connection: ConnectionState, mm: (u32, u32)) -> RawOutput {
        RawOutput {
            id: 0x42,
            name: b"DP-1".to_vec(),
            connection,
            physical: PhysicalSize::new(mm.0, mm.1),
            crtc: Some(0x40),
        }
    }

    fn crtc(w: u32, h: u32, rotation: Rotation) -> RawCrtc {
        RawCrtc {
            id: 0x40,
            size: PixelSize::new(w, h),
            rotation,
            outputs: vec![0x42],
        }
    }

    #[test]
    fn connected_output_gets_dpi() {
        let out = Output::build(
            &raw(ConnectionState::Connected, (509, 286)),
            Some(&crtc(1920, 1080, Rotation::Normal)),
            false,
        );
        assert_eq!(out.name.as_str(), "DP-1");
        assert_eq!(out.dpi, Some(96));
        assert_eq!(out.raw_dpi(), 96);
        assert!(!out.rotated);
    }

    #[test]
    fn rotated_output_swaps_physical_axes() {
        // Panel is 509x286 mm; CRTC rotated 270° reports portrait pixels.
        let out = Output::build(
            &raw(ConnectionState::Connected, (509, 286)),
            Some(&crtc(1080, 1920, Rotation::Right)),
            false,
        );
        assert!(out.rotated);
        assert_eq!(out.physical, PhysicalSize::new(286, 509));
        let d = out.density.unwrap();
        assert_eq!(d.dpi_x, 96);
        assert_eq!(d.dpi_y, 96);
    }

    #[test]
    fn disconnected_output_is_unusable_whatever_its_size() {
        let out = Output::build(
            &raw(ConnectionState::Disconnected, (509, 286)),
            Some(&crtc(1920, 1080, Rotation::Normal)),
            false,
        );
        assert_eq!(out.dpi, None);
        assert_eq!(out.raw_dpi(), UNUSABLE_DPI);
        assert!(!out.is_usable());
    }

    #[test]
    fn unknown_connection_is_unusable() {
        let out = Output::build(
            &raw(ConnectionState::Unknown, (509, 286)),
            Some(&crtc(1920, 1080, Rotation::Normal)),
            false,
        );
        assert_eq!(out.raw_dpi(), UNUSABLE_DPI);
    }

    #[test]
    fn zero_physical_dimension_is_unusable() {
        let out = Output::build(
            &raw(ConnectionState::Connected, (0, 286)),
            Some(&crtc(1920, 1080, Rotation::Normal)),
            false,
        );
        assert_eq!(out.raw_dpi(), UNUSABLE_DPI);
    }

    #[test]
    fn output_without_crtc_is_unusable() {
        let out = Output::build(&raw(ConnectionState::Connected, (509, 286)), None, false);
        assert_eq!(out.size, None);
        assert_eq!(out.raw_dpi(), UNUSABLE_DPI);
    }
}
