// Author: Dustin Pilgrim
// License: MIT

//! Cookie-style backend: every request of a phase goes out before the first
//! reply is awaited, so round trips overlap. Walks outputs first.

use eventline::{debug, info};
use x11rb::connection::Connection;
use x11rb::cookie::Cookie;
use x11rb::protocol::randr::{
    ConnectionExt as _, GetCrtcInfoReply, GetMonitorsReply, GetOutputInfoReply,
    GetOutputPrimaryReply,
};
use x11rb::protocol::xproto::{ConnectionExt as _, GetAtomNameReply};
use x11rb::rust_connection::RustConnection;

use xdpi_core::source::{DisplaySnapshot, RandrSnapshot, RandrVersion, RawMonitor};
use xdpi_core::{RecordKind, TopologySource, XdpiError};

use crate::convert;
use crate::display;
use crate::error::{record_failure, Result};
use crate::resources::{Resources, ResourcesCookie};

type Pending<'c, R> = Cookie<'c, RustConnection, R>;

pub struct BatchedSource {
    conn: RustConnection,
}

/// Per-screen requests issued in the first phase.
struct ScreenCookies<'c> {
    root: u32,
    resources: ResourcesCookie<'c>,
    primary: Option<Pending<'c, GetOutputPrimaryReply>>,
    monitors: Option<Pending<'c, GetMonitorsReply>>,
}

/// Per-screen requests issued once resources are known.
struct RecordCookies<'c> {
    outputs: Vec<(u32, Pending<'c, GetOutputInfoReply>)>,
    crtcs: Vec<(u32, Pending<'c, GetCrtcInfoReply>)>,
}

impl BatchedSource {
    pub fn connect(display: Option<&str>) -> Result<Self> {
        Ok(Self {
            conn: display::connect(display)?,
        })
    }

    fn snapshot(&self) -> Result<DisplaySnapshot> {
        let mut snapshot = DisplaySnapshot::default();
        let version = display::randr_version(&self.conn, &mut snapshot.notes)?;

        let roots = &self.conn.setup().roots;
        snapshot.screens = roots
            .iter()
            .enumerate()
            .map(|(index, screen)| convert::raw_screen(index, screen))
            .collect();

        if let Some(version) = version {
            let randr = self.randr_screens(version)?;
            for (raw, result) in snapshot.screens.iter_mut().zip(randr) {
                match result {
                    Ok(snap) => raw.randr = Some(snap),
                    Err(e) => raw.randr_unavailable = Some(e),
                }
            }
        }

        snapshot.legacy_heads = display::xinerama_heads(&self.conn, &mut snapshot.notes)?;
        snapshot.font_dpi = display::font_dpi(&self.conn)?;
        Ok(snapshot)
    }

    /// One entry per screen: its RandR data or why there is none.
    fn randr_screens(
        &self,
        version: RandrVersion,
    ) -> Result<Vec<std::result::Result<RandrSnapshot, XdpiError>>> {
        let roots = &self.conn.setup().roots;

        // phase 1: resources, primary and monitors for every screen
        let mut first = Vec::with_capacity(roots.len());
        for screen in roots {
            let root = screen.root;
            first.push(ScreenCookies {
                root,
                resources: ResourcesCookie::send(&self.conn, root, version)?,
                primary: if version.supports_primary() {
                    Some(self.conn.randr_get_output_primary(root)?)
                } else {
                    None
                },
                monitors: if version.supports_monitors() {
                    Some(self.conn.randr_get_monitors(root, true)?)
                } else {
                    None
                },
            });
        }

        let mut collected = Vec::with_capacity(first.len());
        for cookies in first {
            let root = cookies.root;
            let mut snap = RandrSnapshot::new(version);

            let res = match cookies.resources.reply() {
                Ok(res) => Some(res),
                Err(e) => {
                    collected.push((None, Err(record_failure(e, RecordKind::ScreenResources, root)?)));
                    continue;
                }
            };

            if let Some(primary) = cookies.primary {
                match primary.reply() {
                    Ok(r) => snap.primary = (r.output != 0).then_some(r.output),
                    Err(e) => snap
                        .failures
                        .push(record_failure(e, RecordKind::PrimaryOutput, root)?),
                }
            }

            let monitors = match cookies.monitors.map(|c| c.reply()) {
                Some(Ok(r)) => Some(r),
                Some(Err(e)) => {
                    snap.failures.push(record_failure(e, RecordKind::Monitor, root)?);
                    None
                }
                None => None,
            };
            if let Some(m) = monitors {
                snap.monitors = Some(self.monitors(&mut snap.failures, m)?);
            }

            collected.push((res, Ok(snap)));
        }

        // phase 2: every output and CRTC of every screen
        let mut second = Vec::with_capacity(collected.len());
        for (res, _) in &collected {
            second.push(match res {
                Some(res) => Some(self.send_records(res)?),
                None => None,
            });
        }

        let mut out = Vec::with_capacity(collected.len());
        for ((res, snap), cookies) in collected.into_iter().zip(second) {
            let mut snap = match snap {
                Ok(snap) => snap,
                Err(e) => {
                    out.push(Err(e));
                    continue;
                }
            };
            if let (Some(res), Some(cookies)) = (res, cookies) {
                snap.resource_outputs = res.outputs;
                self.collect_records(&mut snap, cookies)?;
            }
            debug!(
                "batched: {} outputs, {} active crtcs",
                snap.outputs.len(),
                snap.crtcs.len()
            );
            out.push(Ok(snap));
        }

        Ok(out)
    }

    fn send_records<'c>(&'c self, res: &Resources) -> Result<RecordCookies<'c>> {
        let mut outputs = Vec::with_capacity(res.outputs.len());
        for &output in &res.outputs {
            outputs.push((output, self.conn.randr_get_output_info(output, res.timestamp)?));
        }

        let mut crtcs = Vec::with_capacity(res.crtcs.len());
        for &crtc in &res.crtcs {
            crtcs.push((crtc, self.conn.randr_get_crtc_info(crtc, res.timestamp)?));
        }

        Ok(RecordCookies { outputs, crtcs })
    }

    fn collect_records(&self, snap: &mut RandrSnapshot, cookies: RecordCookies<'_>) -> Result<()> {
        for (id, cookie) in cookies.outputs {
            match cookie.reply() {
                Ok(info) => snap.outputs.push(convert::raw_output(id, info)),
                Err(e) => snap.failures.push(record_failure(e, RecordKind::Output, id)?),
            }
        }

        for (id, cookie) in cookies.crtcs {
            match cookie.reply() {
                // idle CRTC
                Ok(info) if info.outputs.is_empty() => {}
                Ok(info) => snap.crtcs.push(convert::raw_crtc(id, info)),
                Err(e) => snap.failures.push(record_failure(e, RecordKind::Crtc, id)?),
            }
        }
        Ok(())
    }

    fn monitors(
        &self,
        failures: &mut Vec<XdpiError>,
        reply: GetMonitorsReply,
    ) -> Result<Vec<RawMonitor>> {
        let mut names: Vec<Pending<'_, GetAtomNameReply>> = Vec::with_capacity(reply.monitors.len());
        for info in &reply.monitors {
            names.push(self.conn.get_atom_name(info.name)?);
        }

        let mut monitors = Vec::with_capacity(reply.monitors.len());
        for (info, cookie) in reply.monitors.iter().zip(names) {
            match cookie.reply() {
                Ok(name) => monitors.push(convert::raw_monitor(name.name, info)),
                Err(e) => failures.push(record_failure(e, RecordKind::Monitor, info.name)?),
            }
        }
        Ok(monitors)
    }
}

impl TopologySource for BatchedSource {
    fn label(&self) -> &str {
        "batched"
    }

    fn fetch(&mut self) -> xdpi_core::error::Result<DisplaySnapshot> {
        info!("querying display (batched)");
        Ok(self.snapshot()?)
    }
}
