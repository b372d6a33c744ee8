#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate regex;

pub mod aggregator;
pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod date;
pub mod error;
pub mod parser;
pub mod profile;
pub mod reader;
pub mod report;
pub mod sink;

use std::error::Error;
use std::fs;

use analyzer::Analyzer;
use config::Config;
use report::Report;
use sink::{FileSink, RejectSink};

pub use error::ConfigError;

/// Analyses every log file under `config.log_dir` and writes the monthly report.
pub fn run(config: &Config) -> Result<Report, Box<dyn Error>> {
    let profile = config.validate()?;
    info!(
        "Parsing {}/{} logs for month {} from {}",
        config.server_name,
        config.server_type,
        config.month,
        config.log_dir.display()
    );

    fs::create_dir_all(&config.output_dir)?;
    let mut diagnostics = FileSink::new(config.diagnostics_path());
    let mut invalid = if config.collect_invalid {
        Some(FileSink::new(config.invalid_path()))
    } else {
        None
    };

    let mut analyzer = Analyzer::new(profile, config.month);
    for path in reader::log_files(&config.log_dir) {
        debug!("Reading {}", path.display());
        let mut lines = match reader::open(&path) {
            Ok(lines) => lines,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let invalid_sink = invalid.as_mut().map(|sink| sink as &mut dyn RejectSink);
        analyzer.process_reader(&path, &mut lines, &mut diagnostics, invalid_sink)?;
    }
    diagnostics.flush()?;
    if let Some(invalid) = invalid.as_mut() {
        invalid.flush()?;
    }

    info!("{}", analyzer.tally());
    let report = analyzer.finish();
    let report_path = config.report_path();
    report.write_to(&report_path)?;
    info!(
        "Wrote {} ({} effective, {} route, {} diagram, {} fare)",
        report_path.display(),
        report.total_effective,
        report.total_route,
        report.total_diagram,
        report.total_fare
    );

    Ok(report)
}
