#[macro_use]
extern crate clap;
extern crate weblogstat;

use std::path::PathBuf;
use std::process;

use clap::App;
use weblogstat::config::Config;

fn main() {
    env_logger::init();

    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml).get_matches();

    let mut config = Config::new(matches.value_of("LOG_DIR").unwrap_or_default());
    if let Some(month) = matches.value_of("month") {
        config.month = match Config::parse_month(month) {
            Ok(month) => month,
            Err(e) => {
                eprintln!("Application error: {}", e);
                process::exit(1);
            }
        };
    }
    if let Some(server_name) = matches.value_of("server-name") {
        config.server_name = server_name.to_string();
    }
    if let Some(server_type) = matches.value_of("server-type") {
        config.server_type = server_type.to_string();
    }
    if let Some(output_dir) = matches.value_of("output-dir") {
        config.output_dir = PathBuf::from(output_dir);
    }
    config.collect_invalid = matches.is_present("collect-invalid");

    match weblogstat::run(&config) {
        Ok(report) => println!(
            "{}: {} effective hits ({} route, {} diagram, {} fare) over {} days",
            config.report_path().display(),
            report.total_effective,
            report.total_route,
            report.total_diagram,
            report.total_fare,
            report.daily_stat.len()
        ),
        Err(e) => {
            eprintln!("Application error: {}", e);
            process::exit(1);
        }
    }
}
