// Author: Dustin Pilgrim
// License: MIT

//! x11rb replies to plain snapshot records.

use x11rb::protocol::randr::{GetCrtcInfoReply, GetOutputInfoReply, MonitorInfo};
use x11rb::protocol::xproto;

use xdpi_core::geometry::{PhysicalSize, PixelSize, Rotation};
use xdpi_core::source::{ConnectionState, RawCrtc, RawMonitor, RawOutput, RawScreen};

pub fn raw_screen(index: usize, screen: &xproto::Screen) -> RawScreen {
    RawScreen::new(
        index,
        PixelSize::new(screen.width_in_pixels.into(), screen.height_in_pixels.into()),
        PhysicalSize::new(
            screen.width_in_millimeters.into(),
            screen.height_in_millimeters.into(),
        ),
    )
}

pub fn raw_output(id: u32, info: GetOutputInfoReply) -> RawOutput {
    RawOutput {
        id,
        name: info.name,
        connection: ConnectionState::from_wire(u8::from(info.connection)),
        physical: PhysicalSize::new(info.mm_width, info.mm_height),
        // 0 is "no CRTC" on the wire
        crtc: (info.crtc != 0).then_some(info.crtc),
    }
}

pub fn raw_crtc(id: u32, info: GetCrtcInfoReply) -> RawCrtc {
    RawCrtc {
        id,
        size: PixelSize::new(info.width.into(), info.height.into()),
        rotation: Rotation::from_bits(u16::from(info.rotation)),
        outputs: info.outputs,
    }
}

pub fn raw_monitor(name: Vec<u8>, info: &MonitorInfo) -> RawMonitor {
    RawMonitor {
        name,
        primary: info.primary,
        automatic: info.automatic,
        size: PixelSize::new(info.width.into(), info.height.into()),
        physical: PhysicalSize::new(info.width_in_millimeters, info.height_in_millimeters),
    }
}
