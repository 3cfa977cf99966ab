// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// DPI at which a scaling factor of 1 is assumed.
pub const BASELINE_DPI: f64 = 96.0;

/// Integer scaling recommendations around a fractional ratio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScalingFactor {
    pub min: u32,
    pub actual: f64,
    pub round: u32,
    pub max: u32,
}

fn at_least_one(v: f64) -> u32 {
    // NaN casts to 0, which the max() below lifts back to 1.
    (v as u32).max(1)
}

pub fn calc_scaling(ratio: f64) -> ScalingFactor {
    ScalingFactor {
        min: at_least_one(ratio.floor()),
        actual: ratio,
        round: at_least_one(ratio.round()),
        max: at_least_one(ratio.ceil()),
    }
}

pub fn ratio_of(dpi: f64) -> f64 {
    dpi / BASELINE_DPI
}

/// Native and prorated factors for one output or monitor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Scaling {
    pub native: ScalingFactor,
    /// `None` when there is no usable reference surface on the screen.
    pub prorated: Option<ScalingFactor>,
}

/// Scale `dpi` against the reference ratio, relative to the primary surface.
pub fn prorated_ratio(reference_ratio: f64, dpi: u32, primary_dpi: u32) -> Option<f64> {
    if primary_dpi == 0 {
        return None;
    }
    Some(reference_ratio * dpi as f64 / primary_dpi as f64)
}

pub fn scaling_for(dpi: u32, reference_ratio: f64, primary_dpi: Option<u32>) -> Scaling {
    Scaling {
        native: calc_scaling(ratio_of(dpi as f64)),
        prorated: primary_dpi
            .and_then(|p| prorated_ratio(reference_ratio, dpi, p))
            .map(calc_scaling),
    }
}
