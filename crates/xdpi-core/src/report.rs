// Author: Dustin Pilgrim
// License: MIT

//! Reference DPI and scaling on top of a reconciled topology.

use serde::{Deserialize, Serialize};

use crate::error::XdpiError;
use crate::monitor::Monitor;
use crate::output::Output;
use crate::reference;
use crate::scaling::{calc_scaling, ratio_of, scaling_for, Scaling, ScalingFactor};
use crate::screen::Screen;
use crate::source::{EnvVar, LegacyHead, RandrVersion};
use crate::topology::{ScreenTopology, Topology};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputEntry {
    pub output: Output,
    /// `None` for unusable outputs.
    pub scaling: Option<Scaling>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorEntry {
    pub monitor: Monitor,
    pub scaling: Option<Scaling>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandrReport {
    pub version: RandrVersion,
    pub outputs: Vec<OutputEntry>,
    pub monitors: Option<Vec<MonitorEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenReport {
    pub screen: Screen,
    pub reference_scaling: ScalingFactor,
    pub randr: Option<RandrReport>,
    pub warnings: Vec<XdpiError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub screens: Vec<ScreenReport>,
    pub failed_screens: Vec<XdpiError>,
    pub legacy_heads: Vec<LegacyHead>,
    pub font_dpi: Option<String>,
    pub environment: Vec<EnvVar>,
    pub notes: Vec<XdpiError>,
}

impl Report {
    /// Every warning in the report, display-level first.
    pub fn warnings(&self) -> impl Iterator<Item = &XdpiError> {
        self.notes
            .iter()
            .chain(self.failed_screens.iter())
            .chain(self.screens.iter().flat_map(|s| s.warnings.iter()))
    }
}

pub fn build(topology: Topology) -> Report {
    let font_dpi = topology.font_dpi.as_deref();
    let screens = topology
        .screens
        .into_iter()
        .map(|s| build_screen(s, font_dpi))
        .collect();

    Report {
        screens,
        failed_screens: topology.failed_screens,
        legacy_heads: topology.legacy_heads,
        font_dpi: topology.font_dpi,
        environment: topology.environment,
        notes: topology.notes,
    }
}

fn build_screen(topo: ScreenTopology, font_dpi: Option<&str>) -> ScreenReport {
    let ScreenTopology {
        mut screen,
        randr,
        mut warnings,
    } = topo;

    let (resolved, warning) = reference::resolve(screen.reference, font_dpi);
    screen.reference = resolved;
    warnings.extend(warning);

    let reference_ratio = ratio_of(screen.reference.value);

    let randr = randr.map(|r| {
        let primary = reference_surface_dpi(&r.outputs, |o| o.primary, |o| o.dpi);
        let outputs = r
            .outputs
            .into_iter()
            .map(|output| OutputEntry {
                scaling: output.dpi.map(|dpi| scaling_for(dpi, reference_ratio, primary)),
                output,
            })
            .collect();

        let monitors = r.monitors.map(|list| {
            let primary = reference_surface_dpi(&list, |m| m.primary, |m| m.dpi);
            list.into_iter()
                .map(|monitor| MonitorEntry {
                    scaling: monitor.dpi.map(|dpi| scaling_for(dpi, reference_ratio, primary)),
                    monitor,
                })
                .collect()
        });

        RandrReport {
            version: r.version,
            outputs,
            monitors,
        }
    });

    ScreenReport {
        reference_scaling: calc_scaling(reference_ratio),
        screen,
        randr,
        warnings,
    }
}

/// DPI of the surface prorated scaling is measured against.
///
/// An explicitly primary surface wins. Without one, the first enumerated
/// usable surface stands in for it; the server does not promise that
/// enumeration order means anything, so this is a heuristic.
fn reference_surface_dpi<T>(
    items: &[T],
    is_primary: impl Fn(&T) -> bool,
    dpi: impl Fn(&T) -> Option<u32>,
) -> Option<u32> {
    items
        .iter()
        .filter(|i| is_primary(*i))
        .find_map(&dpi)
        .or_else(|| items.iter().find_map(&dpi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PhysicalSize, PixelSize, Rotation};
    use crate::source::{ConnectionState, RandrSnapshot, RawCrtc, RawMonitor, RawOutput, RawScreen};
    use crate::source::DisplaySnapshot;
    use crate::topology::reconcile;

    fn raw_output(id: u32, crtc: u32, connection: ConnectionState) -> RawOutput {
        RawOutput {
            id,
            name: format!("OUT-{id}").into_bytes(),
            connection,
            physical: PhysicalSize::new(509, 286),
            crtc: Some(crtc),
        }
    }

    fn raw_crtc(id: u32, output: u32, w: u32, h: u32) -> RawCrtc {
        RawCrtc {
            id,
            size: PixelSize::new(w, h),
            rotation: Rotation::Normal,
            outputs: vec![output],
        }
    }

    /// 96 dpi panel first, 192 dpi panel second, one disconnected connector.
    fn two_panels(primary: Option<u32>) -> DisplaySnapshot {
        let mut snap = RandrSnapshot::new(RandrVersion::new(1, 6));
        snap.resource_outputs = vec![1, 2, 3];
        snap.primary = primary;
        snap.crtcs = vec![raw_crtc(10, 1, 1920, 1080), raw_crtc(11, 2, 3840, 2160)];
        snap.outputs = vec![
            raw_output(1, 10, ConnectionState::Connected),
            raw_output(2, 11, ConnectionState::Connected),
            RawOutput {
                crtc: None,
                ..raw_output(3, 0, ConnectionState::Disconnected)
            },
        ];
        snap.monitors = Some(vec![RawMonitor {
            name: b"OUT-2".to_vec(),
            primary: false,
            automatic: true,
            size: PixelSize::new(3840, 2160),
            physical: PhysicalSize::new(509, 286),
        }]);

        let mut screen = RawScreen::new(0, PixelSize::new(5760, 2160), PhysicalSize::new(1524, 572));
        screen.randr = Some(snap);

        DisplaySnapshot {
            screens: vec![screen],
            ..Default::default()
        }
    }

    #[test]
    fn disconnected_outputs_get_no_scaling() {
        let report = build(reconcile(two_panels(None)));
        let outputs = &report.screens[0].randr.as_ref().unwrap().outputs;
        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[2].output.raw_dpi(), -1);
        assert!(outputs[2].scaling.is_none());
    }

    #[test]
    fn native_scaling_follows_output_dpi() {
        let report = build(reconcile(two_panels(None)));
        let outputs = &report.screens[0].randr.as_ref().unwrap().outputs;
        assert_eq!(outputs[1].scaling.unwrap().native.round, 2);
    }

    // Assumption under test: with no primary flag, the first enumerated
    // usable output is the prorating reference.
    #[test]
    fn first_enumerated_output_stands_in_for_primary() {
        let report = build(reconcile(two_panels(None)));
        let screen = &report.screens[0];
        let reference = ratio_of(screen.screen.reference.value);
        let outputs = &screen.randr.as_ref().unwrap().outputs;

        let first = outputs[0].scaling.unwrap().prorated.unwrap();
        assert!((first.actual - reference).abs() < 1e-9);

        let second = outputs[1].scaling.unwrap().prorated.unwrap();
        assert!((second.actual - reference * 2.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_primary_overrides_enumeration_order() {
        let report = build(reconcile(two_panels(Some(2))));
        let screen = &report.screens[0];
        let reference = ratio_of(screen.screen.reference.value);
        let outputs = &screen.randr.as_ref().unwrap().outputs;

        let second = outputs[1].scaling.unwrap().prorated.unwrap();
        assert!((second.actual - reference).abs() < 1e-9);

        let first = outputs[0].scaling.unwrap().prorated.unwrap();
        assert!((first.actual - reference / 2.0).abs() < 1e-9);
    }

    #[test]
    fn monitors_prorate_against_their_own_list() {
        let report = build(reconcile(two_panels(None)));
        let screen = &report.screens[0];
        let monitors = screen.randr.as_ref().unwrap().monitors.as_ref().unwrap();
        let scaling = monitors[0].scaling.unwrap();
        assert_eq!(scaling.native.round, 2);
        // sole monitor is its own reference
        let reference = ratio_of(screen.screen.reference.value);
        assert!((scaling.prorated.unwrap().actual - reference).abs() < 1e-9);
    }

    #[test]
    fn font_dpi_override_feeds_prorated_scaling() {
        let mut snapshot = two_panels(None);
        snapshot.font_dpi = Some("144".into());
        let report = build(reconcile(snapshot));
        let screen = &report.screens[0];
        assert!(screen.screen.reference.is_overridden());
        assert_eq!(screen.reference_scaling.actual, 1.5);

        let outputs = &screen.randr.as_ref().unwrap().outputs;
        let second = outputs[1].scaling.unwrap().prorated.unwrap();
        assert_eq!(second.actual, 3.0);
        assert_eq!(second.round, 3);
    }

    #[test]
    fn bad_font_dpi_lands_in_warnings() {
        let mut snapshot = two_panels(None);
        snapshot.font_dpi = Some("abc".into());
        let report = build(reconcile(snapshot));
        assert!(!report.screens[0].screen.reference.is_overridden());
        assert!(report
            .warnings()
            .any(|w| matches!(w, XdpiError::InvalidOverride { .. })));
    }
}
