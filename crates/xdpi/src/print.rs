// Author: Dustin Pilgrim
// License: MIT

use std::fmt::Write;

use xdpi_core::report::{MonitorEntry, OutputEntry, RandrReport, ScreenReport};
use xdpi_core::source::ConnectionState;
use xdpi_core::{Density, DpiOrigin, PhysicalSize, PixelSize, Report, Scaling, ScalingFactor};

pub const BANNER: &str = "*** Resolution and dot pitch information exposed by X11 ***";
pub const DONE: &str = "*** Done ***";

/// Text rendering of one backend's report.
pub fn render(label: &str, report: &Report) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, label, report);
    out
}

pub fn render_json(reports: &[(&str, Report)]) -> Result<String, String> {
    let map: serde_json::Map<String, serde_json::Value> = reports
        .iter()
        .map(|(label, report)| {
            serde_json::to_value(report)
                .map(|v| (label.to_string(), v))
                .map_err(|e| format!("serialize {label} report: {e}"))
        })
        .collect::<Result<_, _>>()?;

    serde_json::to_string_pretty(&map).map_err(|e| format!("serialize report: {e}"))
}

fn write_report(out: &mut String, label: &str, report: &Report) -> std::fmt::Result {
    writeln!(out, "** {label} backend")?;

    for screen in &report.screens {
        write_screen(out, screen)?;
    }

    for failed in &report.failed_screens {
        writeln!(out, "{failed}")?;
    }

    if !report.legacy_heads.is_empty() {
        writeln!(out, "Xinerama screens:")?;
        for head in &report.legacy_heads {
            writeln!(
                out,
                "\t{}: {} pixels at +{}+{}, no dpi information",
                head.index,
                pixels(head.size),
                head.x,
                head.y
            )?;
        }
    }

    if let Some(dpi) = &report.font_dpi {
        writeln!(out, "X resources:")?;
        writeln!(out, "\tXft.dpi: {dpi}")?;
    }

    let set: Vec<_> = report
        .environment
        .iter()
        .filter_map(|v| v.value.as_ref().map(|value| (&v.name, value)))
        .collect();
    if !set.is_empty() {
        writeln!(out, "Environment:")?;
        for (name, value) in set {
            writeln!(out, "\t{name}={value}")?;
        }
    }

    for note in &report.notes {
        writeln!(out, "note: {note}")?;
    }

    Ok(())
}

fn write_screen(out: &mut String, s: &ScreenReport) -> std::fmt::Result {
    let screen = &s.screen;
    writeln!(
        out,
        "Screen {}: {} pixels, {} mm: {}",
        screen.index,
        pixels(screen.size),
        millimeters(screen.physical),
        density(&screen.density)
    )?;

    let origin = match screen.reference.origin {
        DpiOrigin::Protocol => "core geometry",
        DpiOrigin::FontResource => "Xft.dpi",
    };
    writeln!(
        out,
        "\treference: {} dpi ({origin}), scaling {}",
        trim_float(screen.reference.value),
        factor(&s.reference_scaling)
    )?;

    match &s.randr {
        Some(randr) => write_randr(out, randr)?,
        None => writeln!(out, "\tXRandR: no dpi information")?,
    }

    for w in &s.warnings {
        writeln!(out, "\twarning: {w}")?;
    }
    Ok(())
}

fn write_randr(out: &mut String, randr: &RandrReport) -> std::fmt::Result {
    writeln!(out, "\tXRandR {}.{}:", randr.version.major, randr.version.minor)?;
    for entry in &randr.outputs {
        write_output(out, entry)?;
    }

    if let Some(monitors) = &randr.monitors {
        writeln!(out, "\tXRandR monitors:")?;
        for entry in monitors {
            write_monitor(out, entry)?;
        }
    }
    Ok(())
}

fn write_output(out: &mut String, entry: &OutputEntry) -> std::fmt::Result {
    let o = &entry.output;
    let name = if o.primary {
        format!("{} (primary)", o.name)
    } else {
        o.name.to_string()
    };

    match (o.size, &o.density) {
        (Some(size), Some(d)) => {
            writeln!(
                out,
                "\t\t{name}: {} pixels, ({}) {} mm: {}",
                pixels(size),
                if o.rotated { "R" } else { "U" },
                millimeters(o.physical),
                density(d)
            )?;
        }
        _ => {
            let why = if o.connection != ConnectionState::Connected {
                o.connection.label()
            } else if o.size.is_none() {
                "no crtc"
            } else {
                "unknown physical size"
            };
            writeln!(out, "\t\t{name}: {why}, no dpi information")?;
        }
    }

    if let Some(scaling) = &entry.scaling {
        write_scaling(out, scaling)?;
    }
    Ok(())
}

fn write_monitor(out: &mut String, entry: &MonitorEntry) -> std::fmt::Result {
    let m = &entry.monitor;
    let mut flags = Vec::new();
    if m.primary {
        flags.push("primary");
    }
    if m.automatic {
        flags.push("automatic");
    }
    let name = if flags.is_empty() {
        m.name.to_string()
    } else {
        format!("{} ({})", m.name, flags.join(", "))
    };

    match &m.density {
        Some(d) => writeln!(
            out,
            "\t\t{name}: {} pixels, ({}) {} mm: {}",
            pixels(m.size),
            if m.rotated { "R" } else { "U" },
            millimeters(m.physical),
            density(d)
        )?,
        None => writeln!(
            out,
            "\t\t{name}: {} pixels, no dpi information",
            pixels(m.size)
        )?,
    }

    if let Some(scaling) = &entry.scaling {
        write_scaling(out, scaling)?;
    }
    Ok(())
}

fn write_scaling(out: &mut String, s: &Scaling) -> std::fmt::Result {
    writeln!(out, "\t\t\tnative scaling: {}", factor(&s.native))?;
    match &s.prorated {
        Some(p) => writeln!(out, "\t\t\tprorated scaling: {}", factor(p)),
        None => writeln!(out, "\t\t\tprorated scaling: no reference"),
    }
}

fn pixels(p: PixelSize) -> String {
    format!("{}x{}", p.width, p.height)
}

fn millimeters(p: PhysicalSize) -> String {
    format!("{}x{}", p.width_mm, p.height_mm)
}

fn density(d: &Density) -> String {
    let mut s = format!("{}x{} dpi, {}x{} dpcm", d.dpi_x, d.dpi_y, d.dpcm_x, d.dpcm_y);
    if let Some(pitch) = d.pitch_mm {
        let _ = write!(s, ", {pitch:.3} mm dot pitch");
    }
    s
}

fn factor(f: &ScalingFactor) -> String {
    format!(
        "{:.2} (min {}, round {}, max {})",
        f.actual, f.min, f.round, f.max
    )
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdpi_core::source::{
        DisplaySnapshot, LegacyHead, RandrSnapshot, RandrVersion, RawCrtc, RawOutput, RawScreen,
    };
    use xdpi_core::{analyze, Rotation};

    fn single_screen() -> RawScreen {
        RawScreen::new(0, PixelSize::new(1920, 1080), PhysicalSize::new(509, 286))
    }

    #[test]
    fn screen_without_randr() {
        let report = analyze(DisplaySnapshot {
            screens: vec![single_screen()],
            ..Default::default()
        });
        let text = render("sync", &report);
        assert!(text.starts_with("** sync backend\n"));
        assert!(text.contains(
            "Screen 0: 1920x1080 pixels, 509x286 mm: 96x96 dpi, 38x38 dpcm, 0.265 mm dot pitch"
        ));
        assert!(text.contains("reference: 96 dpi (core geometry), scaling 1.00 (min 1, round 1, max 1)"));
        assert!(text.contains("XRandR: no dpi information"));
        assert!(!text.contains("XRandR monitors"));
    }

    #[test]
    fn unusable_outputs_and_xinerama_say_so() {
        let mut randr = RandrSnapshot::new(RandrVersion::new(1, 4));
        randr.resource_outputs = vec![1, 2];
        randr.primary = Some(1);
        randr.crtcs = vec![RawCrtc {
            id: 9,
            size: PixelSize::new(1920, 1080),
            rotation: Rotation::Normal,
            outputs: vec![1],
        }];
        randr.outputs = vec![
            RawOutput {
                id: 1,
                name: b"DP-1".to_vec(),
                connection: ConnectionState::Connected,
                physical: PhysicalSize::new(509, 286),
                crtc: Some(9),
            },
            RawOutput {
                id: 2,
                name: b"HDMI-1".to_vec(),
                connection: ConnectionState::Disconnected,
                physical: PhysicalSize::new(0, 0),
                crtc: None,
            },
        ];
        let mut screen = single_screen();
        screen.randr = Some(randr);

        let report = analyze(DisplaySnapshot {
            screens: vec![screen],
            legacy_heads: vec![LegacyHead {
                index: 0,
                x: 0,
                y: 0,
                size: PixelSize::new(1920, 1080),
            }],
            font_dpi: Some("abc".into()),
            ..Default::default()
        });
        let text = render("batched", &report);

        assert!(text.contains("\tXRandR 1.4:\n"));
        assert!(text.contains("\t\tDP-1 (primary): 1920x1080 pixels, (U) 509x286 mm: 96x96 dpi"));
        assert!(text.contains("\t\t\tnative scaling: 1.00 (min 1, round 1, max 1)"));
        assert!(text.contains("\t\tHDMI-1: disconnected, no dpi information\n"));
        assert!(text.contains("Xinerama screens:\n\t0: 1920x1080 pixels at +0+0, no dpi information"));
        assert!(text.contains("\tXft.dpi: abc"));
        assert!(text.contains("\twarning: ignoring Xft.dpi override \"abc\": not a number"));
    }

    #[test]
    fn json_is_keyed_by_backend() {
        let report = analyze(DisplaySnapshot {
            screens: vec![single_screen()],
            ..Default::default()
        });
        let json = render_json(&[("sync", report.clone()), ("batched", report)]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["sync"]["screens"][0]["screen"]["density"]["dpi_x"], 96);
        assert!(v["batched"]["screens"][0]["randr"].is_null());
    }

    #[test]
    fn whole_numbers_print_without_decimals() {
        assert_eq!(trim_float(96.0), "96");
        assert_eq!(trim_float(120.5), "120.5");
    }
}
