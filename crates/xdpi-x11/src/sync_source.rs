// Author: Dustin Pilgrim
// License: MIT

//! One request, one reply. Walks CRTCs first and picks up their outputs,
//! then the outputs that drive nothing.

use eventline::{debug, info};
use x11rb::connection::Connection;
use x11rb::protocol::randr::ConnectionExt as _;
use x11rb::protocol::xproto::{ConnectionExt as _, Window};
use x11rb::rust_connection::RustConnection;

use xdpi_core::source::{DisplaySnapshot, RandrSnapshot, RandrVersion, RawMonitor, RawScreen};
use xdpi_core::{RecordKind, TopologySource, XdpiError};

use crate::convert;
use crate::display;
use crate::error::{record_failure, Result};
use crate::resources::{Resources, ResourcesCookie};

pub struct SyncSource {
    conn: RustConnection,
}

impl SyncSource {
    pub fn connect(display: Option<&str>) -> Result<Self> {
        Ok(Self {
            conn: display::connect(display)?,
        })
    }

    fn snapshot(&self) -> Result<DisplaySnapshot> {
        let mut snapshot = DisplaySnapshot::default();
        let version = display::randr_version(&self.conn, &mut snapshot.notes)?;

        for (index, screen) in self.conn.setup().roots.iter().enumerate() {
            let mut raw = convert::raw_screen(index, screen);
            if let Some(version) = version {
                self.fill_randr(&mut raw, screen.root, version)?;
            }
            snapshot.screens.push(raw);
        }

        snapshot.legacy_heads = display::xinerama_heads(&self.conn, &mut snapshot.notes)?;
        snapshot.font_dpi = display::font_dpi(&self.conn)?;
        Ok(snapshot)
    }

    fn fill_randr(&self, raw: &mut RawScreen, root: Window, version: RandrVersion) -> Result<()> {
        let res = match ResourcesCookie::send(&self.conn, root, version)?.reply() {
            Ok(res) => res,
            Err(e) => {
                raw.randr_unavailable = Some(record_failure(e, RecordKind::ScreenResources, root)?);
                return Ok(());
            }
        };
        debug!(
            "screen {}: {} crtcs, {} outputs",
            raw.index,
            res.crtcs.len(),
            res.outputs.len()
        );

        let mut snap = RandrSnapshot::new(version);
        snap.resource_outputs = res.outputs.clone();

        if version.supports_primary() {
            match self.conn.randr_get_output_primary(root)?.reply() {
                Ok(r) => snap.primary = (r.output != 0).then_some(r.output),
                Err(e) => snap
                    .failures
                    .push(record_failure(e, RecordKind::PrimaryOutput, root)?),
            }
        }

        self.walk_crtcs(&mut snap, &res)?;

        if version.supports_monitors() {
            snap.monitors = self.monitors(&mut snap.failures, root)?;
        }

        raw.randr = Some(snap);
        Ok(())
    }

    fn walk_crtcs(&self, snap: &mut RandrSnapshot, res: &Resources) -> Result<()> {
        let mut seen = Vec::with_capacity(res.outputs.len());

        for &crtc in &res.crtcs {
            let info = match self.conn.randr_get_crtc_info(crtc, res.timestamp)?.reply() {
                Ok(info) => info,
                Err(e) => {
                    snap.failures.push(record_failure(e, RecordKind::Crtc, crtc)?);
                    continue;
                }
            };
            // idle CRTC
            if info.outputs.is_empty() {
                continue;
            }

            let outputs = info.outputs.clone();
            snap.crtcs.push(convert::raw_crtc(crtc, info));

            for output in outputs {
                if !seen.contains(&output) {
                    seen.push(output);
                    self.push_output(snap, output, res)?;
                }
            }
        }

        for &output in &res.outputs {
            if !seen.contains(&output) {
                self.push_output(snap, output, res)?;
            }
        }
        Ok(())
    }

    fn push_output(&self, snap: &mut RandrSnapshot, output: u32, res: &Resources) -> Result<()> {
        match self.conn.randr_get_output_info(output, res.timestamp)?.reply() {
            Ok(info) => snap.outputs.push(convert::raw_output(output, info)),
            Err(e) => snap
                .failures
                .push(record_failure(e, RecordKind::Output, output)?),
        }
        Ok(())
    }

    fn monitors(
        &self,
        failures: &mut Vec<XdpiError>,
        root: Window,
    ) -> Result<Option<Vec<RawMonitor>>> {
        let reply = match self.conn.randr_get_monitors(root, true)?.reply() {
            Ok(r) => r,
            Err(e) => {
                failures.push(record_failure(e, RecordKind::Monitor, root)?);
                return Ok(None);
            }
        };

        let mut monitors = Vec::with_capacity(reply.monitors.len());
        for info in &reply.monitors {
            match self.conn.get_atom_name(info.name)?.reply() {
                Ok(name) => monitors.push(convert::raw_monitor(name.name, info)),
                Err(e) => failures.push(record_failure(e, RecordKind::Monitor, info.name)?),
            }
        }
        Ok(Some(monitors))
    }
}

impl TopologySource for SyncSource {
    fn label(&self) -> &str {
        "sync"
    }

    fn fetch(&mut self) -> xdpi_core::error::Result<DisplaySnapshot> {
        info!("querying display (sync)");
        Ok(self.snapshot()?)
    }
}
