// Author: Dustin Pilgrim
// License: MIT

pub mod batched_source;
pub mod convert;
pub mod display;
pub mod error;
pub mod resources;
pub mod sync_source;

pub use batched_source::BatchedSource;
pub use error::{Result, X11Error};
pub use sync_source::SyncSource;

use xdpi_core::{Backend, TopologySource, XdpiError};

/// Connect every backend `backend` asks for, in run order.
///
/// A backend that cannot reach the server is returned as its error so the
/// caller can still run the others.
pub fn open(
    backend: Backend,
    display: Option<&str>,
) -> Vec<(Backend, std::result::Result<Box<dyn TopologySource>, XdpiError>)> {
    let kinds: &[Backend] = match backend {
        Backend::Both => &[Backend::Sync, Backend::Batched],
        Backend::Sync => &[Backend::Sync],
        Backend::Batched => &[Backend::Batched],
    };

    kinds
        .iter()
        .map(|&kind| {
            let source: std::result::Result<Box<dyn TopologySource>, X11Error> = match kind {
                Backend::Batched => {
                    BatchedSource::connect(display).map(|s| Box::new(s) as Box<dyn TopologySource>)
                }
                _ => SyncSource::connect(display).map(|s| Box::new(s) as Box<dyn TopologySource>),
            };
            (kind, source.map_err(XdpiError::from))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "needs an X server"]
    fn both_backends_agree() {
        let mut opened = open(Backend::Both, None);
        assert_eq!(opened.len(), 2);

        let mut reports = Vec::new();
        for (_, source) in opened.iter_mut() {
            let source = source.as_mut().expect("connect");
            let snapshot = source.fetch().expect("fetch");
            reports.push(xdpi_core::analyze(snapshot));
        }

        let outputs = |r: &xdpi_core::Report| -> Vec<(String, i32)> {
            r.screens
                .iter()
                .filter_map(|s| s.randr.as_ref())
                .flat_map(|r| r.outputs.iter())
                .map(|o| (o.output.name.to_string(), o.output.raw_dpi()))
                .collect()
        };
        assert_eq!(outputs(&reports[0]), outputs(&reports[1]));
    }

    #[test]
    fn unreachable_display_is_per_backend() {
        let opened = open(Backend::Both, Some("unix:/nonexistent/xdpi-test-socket"));
        assert_eq!(opened.len(), 2);
        for (_, source) in &opened {
            match source {
                Err(e) => assert!(e.is_fatal()),
                Ok(_) => panic!("connected to a display that does not exist"),
            }
        }
    }
}
