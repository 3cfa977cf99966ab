// Author: Dustin Pilgrim
// License: MIT

//! Turns a raw snapshot into canonical per-screen records.

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XdpiError};
use crate::monitor::Monitor;
use crate::output::Output;
use crate::screen::Screen;
use crate::source::{
    DisplaySnapshot, EnvVar, LegacyHead, RandrSnapshot, RandrVersion, RawCrtc, RawOutput,
    RawScreen,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandrTopology {
    pub version: RandrVersion,
    pub outputs: Vec<Output>,
    /// `None` when the server predates monitors or they could not be read.
    pub monitors: Option<Vec<Monitor>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenTopology {
    pub screen: Screen,
    pub randr: Option<RandrTopology>,
    pub warnings: Vec<XdpiError>,
}

/// Everything one enumeration pass found, owned by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Topology {
    pub screens: Vec<ScreenTopology>,
    /// Screens whose records could not be built at all.
    pub failed_screens: Vec<XdpiError>,
    /// Reported as-is next to RandR data, never merged with it.
    pub legacy_heads: Vec<LegacyHead>,
    pub font_dpi: Option<String>,
    pub environment: Vec<EnvVar>,
    pub notes: Vec<XdpiError>,
}

pub fn reconcile(snapshot: DisplaySnapshot) -> Topology {
    let mut screens = Vec::with_capacity(snapshot.screens.len());
    let mut failed_screens = Vec::new();

    for raw in &snapshot.screens {
        match reconcile_screen(raw) {
            Ok(s) => screens.push(s),
            Err(e) => failed_screens.push(e),
        }
    }

    Topology {
        screens,
        failed_screens,
        legacy_heads: snapshot.legacy_heads,
        font_dpi: snapshot.font_dpi,
        environment: snapshot.environment,
        notes: snapshot.notes,
    }
}

pub fn reconcile_screen(raw: &RawScreen) -> Result<ScreenTopology> {
    let screen = Screen::from_raw(raw);
    let mut warnings = Vec::new();

    if let Some(e) = &raw.randr_unavailable {
        warnings.push(e.clone());
    }

    let randr = match &raw.randr {
        Some(snap) => {
            warnings.extend(snap.failures.iter().cloned());
            Some(reconcile_randr(raw.index, snap)?)
        }
        None => None,
    };

    Ok(ScreenTopology {
        screen,
        randr,
        warnings,
    })
}

fn reconcile_randr(screen: usize, snap: &RandrSnapshot) -> Result<RandrTopology> {
    let oom = |_: TryReserveError| XdpiError::AllocationFailure { screen };

    let primary = if snap.version.supports_primary() {
        snap.primary
    } else {
        None
    };

    let raw_outputs = canonical_outputs(snap);
    let mut outputs = Vec::new();
    outputs.try_reserve_exact(raw_outputs.len()).map_err(oom)?;
    for raw in raw_outputs {
        let crtc = driving_crtc(raw, &snap.crtcs);
        outputs.push(Output::build(raw, crtc, primary == Some(raw.id)));
    }

    let monitors = match &snap.monitors {
        Some(list) if snap.version.supports_monitors() => {
            let mut monitors = Vec::new();
            monitors.try_reserve_exact(list.len()).map_err(oom)?;
            monitors.extend(list.iter().map(Monitor::build));
            Some(monitors)
        }
        _ => None,
    };

    Ok(RandrTopology {
        version: snap.version,
        outputs,
        monitors,
    })
}

/// Outputs in screen-resources order, each once, however the backend walked them.
fn canonical_outputs(snap: &RandrSnapshot) -> Vec<&RawOutput> {
    let mut seen: Vec<&RawOutput> = Vec::with_capacity(snap.outputs.len());
    for out in &snap.outputs {
        if !seen.iter().any(|o| o.id == out.id) {
            seen.push(out);
        }
    }

    let position = |id: u32| {
        snap.resource_outputs
            .iter()
            .position(|&o| o == id)
            .unwrap_or(usize::MAX)
    };
    // stable: outputs missing from the resource list keep their relative order
    seen.sort_by_key(|o| position(o.id));
    seen
}

/// The CRTC an output drives, matched by identity from either side.
fn driving_crtc<'a>(out: &RawOutput, crtcs: &'a [RawCrtc]) -> Option<&'a RawCrtc> {
    out.crtc
        .and_then(|id| crtcs.iter().find(|c| c.id == id))
        .or_else(|| crtcs.iter().find(|c| c.outputs.contains(&out.id)))
}
