// Author: Dustin Pilgrim
// License: MIT

//! Display-wide queries shared by both backends.

use eventline::{debug, info, warn};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors::ReplyError;
use x11rb::protocol::randr::{self, ConnectionExt as _};
use x11rb::protocol::xinerama::{self, ConnectionExt as _};
use x11rb::resource_manager;
use x11rb::rust_connection::RustConnection;

use xdpi_core::geometry::PixelSize;
use xdpi_core::source::{LegacyHead, RandrVersion};
use xdpi_core::XdpiError;

use crate::error::Result;

/// Newest RandR we know how to talk to.
const RANDR_WANTED: (u32, u32) = (1, 6);

pub fn connect(display: Option<&str>) -> Result<RustConnection> {
    let (conn, screen) = RustConnection::connect(display)?;
    debug!(
        "connected to {} (default screen {screen}, {} screens)",
        display.unwrap_or("$DISPLAY"),
        conn.setup().roots.len()
    );
    Ok(conn)
}

/// Negotiated RandR version, or `None` when per-output data is unavailable.
pub fn randr_version(conn: &RustConnection, notes: &mut Vec<XdpiError>) -> Result<Option<RandrVersion>> {
    if conn.extension_information(randr::X11_EXTENSION_NAME)?.is_none() {
        note(notes, XdpiError::unsupported("RandR", "extension not present"));
        return Ok(None);
    }

    let reply = match conn
        .randr_query_version(RANDR_WANTED.0, RANDR_WANTED.1)?
        .reply()
    {
        Ok(r) => r,
        Err(ReplyError::X11Error(e)) => {
            note(notes, XdpiError::unsupported("RandR", format!("{:?}", e.error_kind)));
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let version = RandrVersion::new(reply.major_version, reply.minor_version);
    debug!("RandR {}.{}", version.major, version.minor);

    if version < RandrVersion::new(1, 2) {
        note(
            notes,
            XdpiError::unsupported("RandR", format!("need 1.2, server has {}.{}", version.major, version.minor)),
        );
        return Ok(None);
    }

    if !version.supports_monitors() {
        note(
            notes,
            XdpiError::unsupported(
                "RandR monitors",
                format!("need 1.5, server has {}.{}", version.major, version.minor),
            ),
        );
    }

    Ok(Some(version))
}

/// Xinerama regions, empty when the extension is missing or inactive.
pub fn xinerama_heads(conn: &RustConnection, notes: &mut Vec<XdpiError>) -> Result<Vec<LegacyHead>> {
    if conn.extension_information(xinerama::X11_EXTENSION_NAME)?.is_none() {
        debug!("Xinerama not present");
        return Ok(Vec::new());
    }

    let active = match conn.xinerama_is_active()?.reply() {
        Ok(r) => r.state != 0,
        Err(ReplyError::X11Error(e)) => {
            note(notes, XdpiError::unsupported("Xinerama", format!("{:?}", e.error_kind)));
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    if !active {
        debug!("Xinerama inactive");
        return Ok(Vec::new());
    }

    let screens = match conn.xinerama_query_screens()?.reply() {
        Ok(r) => r.screen_info,
        Err(ReplyError::X11Error(e)) => {
            note(notes, XdpiError::unsupported("Xinerama", format!("{:?}", e.error_kind)));
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(screens
        .iter()
        .enumerate()
        .map(|(index, s)| LegacyHead {
            index,
            x: s.x_org.into(),
            y: s.y_org.into(),
            size: PixelSize::new(s.width.into(), s.height.into()),
        })
        .collect())
}

/// The `Xft.dpi` resource as the user set it, unparsed.
pub fn font_dpi(conn: &RustConnection) -> Result<Option<String>> {
    let db = match resource_manager::new_from_default(conn) {
        Ok(db) => db,
        Err(ReplyError::X11Error(e)) => {
            warn!("cannot read X resources: {:?}", e.error_kind);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let value = db.get_string("Xft.dpi", "").map(str::to_owned);
    debug!("Xft.dpi={:?}", value);
    Ok(value)
}

fn note(notes: &mut Vec<XdpiError>, e: XdpiError) {
    info!("{e}");
    notes.push(e);
}
