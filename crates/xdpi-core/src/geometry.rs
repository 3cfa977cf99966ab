// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

pub const MM_PER_INCH: f64 = 25.4;
pub const MM_PER_CM: f64 = 10.0;

/// Pixel dimensions as reported by the server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_landscape(self) -> bool {
        self.width > self.height
    }
}

/// Physical dimensions in millimeters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width_mm: u32,
    pub height_mm: u32,
}

impl PhysicalSize {
    pub fn new(width_mm: u32, height_mm: u32) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Both axes known; a zero on either axis means the server has no idea.
    pub fn is_known(self) -> bool {
        self.width_mm != 0 && self.height_mm != 0
    }

    pub fn is_landscape(self) -> bool {
        self.width_mm > self.height_mm
    }

    pub fn swapped(self) -> Self {
        Self {
            width_mm: self.height_mm,
            height_mm: self.width_mm,
        }
    }

    /// Axis-correct the reported size for a rotated surface.
    pub fn oriented(self, rotated: bool) -> Self {
        if rotated { self.swapped() } else { self }
    }
}

/// CRTC rotation, decoded from the low nibble of the protocol's rotation mask.
/// Reflection bits are ignored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    Normal,
    Left,
    Inverted,
    Right,
}

impl Rotation {
    pub fn from_bits(bits: u16) -> Self {
        match bits & 0x0f {
            0x02 => Rotation::Left,
            0x04 => Rotation::Inverted,
            0x08 => Rotation::Right,
            _ => Rotation::Normal,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Normal => 0,
            Rotation::Left => 90,
            Rotation::Inverted => 180,
            Rotation::Right => 270,
        }
    }

    /// Only quarter turns swap the physical axes.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Left | Rotation::Right)
    }
}

/// Derived resolution figures for one surface.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Density {
    pub dpi_x: u32,
    pub dpi_y: u32,
    pub dpcm_x: u32,
    pub dpcm_y: u32,
    /// Distance between pixel centers in mm, if there are any pixels at all.
    pub pitch_mm: Option<f64>,
}

impl Density {
    /// Single representative DPI: vertical axis first, horizontal as fallback.
    pub fn dpi(&self) -> u32 {
        if self.dpi_y != 0 { self.dpi_y } else { self.dpi_x }
    }
}

fn per_unit(pixels: u32, mm: u32, mm_per_unit: f64) -> u32 {
    if mm == 0 {
        return 0;
    }
    (pixels as f64 * mm_per_unit / mm as f64).round() as u32
}

pub fn dpi_and_pitch(pixel_w: u32, pixel_h: u32, mm_w: u32, mm_h: u32) -> Density {
    let pitch_mm = if pixel_w == 0 && pixel_h == 0 {
        None
    } else {
        let diag_mm = (mm_w as f64).hypot(mm_h as f64);
        let diag_px = (pixel_w as f64).hypot(pixel_h as f64);
        Some(diag_mm / diag_px)
    };

    Density {
        dpi_x: per_unit(pixel_w, mm_w, MM_PER_INCH),
        dpi_y: per_unit(pixel_h, mm_h, MM_PER_INCH),
        dpcm_x: per_unit(pixel_w, mm_w, MM_PER_CM),
        dpcm_y: per_unit(pixel_h, mm_h, MM_PER_CM),
        pitch_mm,
    }
}

pub fn density_of(pixels: PixelSize, physical: PhysicalSize) -> Density {
    dpi_and_pitch(
        pixels.width,
        pixels.height,
        physical.width_mm,
        physical.height_mm,
    )
}
