// Command line interface parsing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use clap::{
    crate_description,
    crate_name,
    crate_version,
    value_parser,
    Arg,
    ArgMatches,
    Command,
};
use crate::common::{
    ClientConfig,
    DEFAULT_OUTPUT_DIR,
    DEFAULT_PROFILE,
};
use std::path::PathBuf;
use tracing::debug;

// Create the clap command
fn create_app() -> Command {
    debug!("Creating CLI app");

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("PROFILE")
                .env("AWS_PROFILE")
                .hide_env_values(true)
                .long("profile")
                .short('p')
                .value_name("PROFILE")
                .help("AWS credential profile to report on")
                .default_value(DEFAULT_PROFILE)
        )
        .arg(
            Arg::new("OUTPUT_DIR")
                .env("S3INSIGHTS_OUTPUT_DIR")
                .hide_env_values(true)
                .long("output-dir")
                .short('o')
                .value_name("DIR")
                .help("Directory to write the reports to")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT_DIR)
        )
}

// Build a ClientConfig from parsed matches. Both arguments carry defaults,
// so the fallbacks only apply if that ever changes.
fn client_config(matches: &ArgMatches) -> ClientConfig {
    let default = ClientConfig::default();

    let profile = matches.get_one::<String>("PROFILE")
        .cloned()
        .unwrap_or(default.profile);

    let output_dir = matches.get_one::<PathBuf>("OUTPUT_DIR")
        .cloned()
        .unwrap_or(default.output_dir);

    ClientConfig {
        profile,
        output_dir,
    }
}

/// Parses the command line into a `ClientConfig`.
pub fn parse_args() -> ClientConfig {
    debug!("Parsing command line arguments");

    let matches = create_app().get_matches();

    client_config(&matches)
}
