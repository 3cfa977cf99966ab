// Author: Dustin Pilgrim
// License: MIT

use eventline::{debug, error, info, warn};

use xdpi_core::Report;

use crate::cli::{Args, Format};
use crate::{config, env, print};

pub fn run(args: Args) -> Result<(), String> {
    info!("starting xdpi");

    let cfg = config::load().unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        config::XdpiConfig::default()
    });

    let backend = args.backend.unwrap_or(cfg.backend);
    let format = args.format.unwrap_or(cfg.format);
    debug!("backend={:?} format={:?} display={:?}", backend, format, args.display);

    let environment = env::collect(&cfg.environment);

    let mut reports: Vec<(&str, Report)> = Vec::new();
    let mut failures = Vec::new();

    if format == Format::Text {
        println!("{}", print::BANNER);
    }

    for (kind, source) in xdpi_x11::open(backend, args.display.as_deref()) {
        let label = kind.label();
        let snapshot = source.and_then(|mut s| s.fetch());

        match snapshot {
            Ok(mut snapshot) => {
                snapshot.environment = environment.clone();
                let report = xdpi_core::analyze(snapshot);
                for w in report.warnings() {
                    warn!("{label}: {w}");
                }
                if format == Format::Text {
                    print!("{}", print::render(label, &report));
                }
                reports.push((label, report));
            }
            Err(e) => {
                error!("{label} backend failed: {e}");
                failures.push(format!("xdpi: {label} backend: {e}"));
            }
        }
    }

    match format {
        Format::Text => println!("{}", print::DONE),
        Format::Json => println!("{}", print::render_json(&reports)?),
    }

    if reports.is_empty() {
        return Err(failures.join("\n"));
    }

    for f in &failures {
        eprintln!("{f}");
    }

    info!("done ({} report(s))", reports.len());
    Ok(())
}
