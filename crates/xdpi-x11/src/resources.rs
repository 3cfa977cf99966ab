// Author: Dustin Pilgrim
// License: MIT

use x11rb::cookie::Cookie;
use x11rb::errors::{ConnectionError, ReplyError};
use x11rb::protocol::randr::{
    ConnectionExt as _, Crtc, GetScreenResourcesCurrentReply, GetScreenResourcesReply, Output,
};
use x11rb::protocol::xproto::{Timestamp, Window};
use x11rb::rust_connection::RustConnection;

use xdpi_core::source::RandrVersion;

/// The parts of a screen-resources reply we care about.
#[derive(Debug, Clone)]
pub struct Resources {
    pub crtcs: Vec<Crtc>,
    pub outputs: Vec<Output>,
    pub timestamp: Timestamp,
}

/// Pending screen-resources request. The cheap "current" variant needs 1.3.
pub enum ResourcesCookie<'c> {
    Current(Cookie<'c, RustConnection, GetScreenResourcesCurrentReply>),
    Full(Cookie<'c, RustConnection, GetScreenResourcesReply>),
}

impl<'c> ResourcesCookie<'c> {
    pub fn send(
        conn: &'c RustConnection,
        root: Window,
        version: RandrVersion,
    ) -> Result<Self, ConnectionError> {
        if version >= RandrVersion::new(1, 3) {
            Ok(Self::Current(conn.randr_get_screen_resources_current(root)?))
        } else {
            Ok(Self::Full(conn.randr_get_screen_resources(root)?))
        }
    }

    pub fn reply(self) -> Result<Resources, ReplyError> {
        match self {
            Self::Current(c) => {
                let r = c.reply()?;
                Ok(Resources {
                    crtcs: r.crtcs,
                    outputs: r.outputs,
                    timestamp: r.config_timestamp,
                })
            }
            Self::Full(c) => {
                let r = c.reply()?;
                Ok(Resources {
                    crtcs: r.crtcs,
                    outputs: r.outputs,
                    timestamp: r.config_timestamp,
                })
            }
        }
    }
}
