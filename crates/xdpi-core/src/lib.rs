// Author: Dustin Pilgrim
// License: MIT

pub mod error;
pub mod geometry;
pub mod monitor;
pub mod name;
pub mod output;
pub mod reference;
pub mod report;
pub mod scaling;
pub mod screen;
pub mod source;
pub mod topology;

pub use error::{RecordKind, XdpiError};
pub use geometry::{dpi_and_pitch, Density, PhysicalSize, PixelSize, Rotation};
pub use monitor::Monitor;
pub use name::BoundedName;
pub use output::{Output, UNUSABLE_DPI};
pub use reference::{DpiOrigin, ReferenceDpi};
pub use report::Report;
pub use scaling::{calc_scaling, Scaling, ScalingFactor, BASELINE_DPI};
pub use screen::Screen;
pub use source::{Backend, DisplaySnapshot, TopologySource};
pub use topology::Topology;

/// Reconcile a snapshot and derive reference DPI and scaling for it.
pub fn analyze(snapshot: DisplaySnapshot) -> Report {
    report::build(topology::reconcile(snapshot))
}
