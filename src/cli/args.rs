use crate::constants::{exit_codes, verbosity, FALLBACK_CLASS_NAME};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for the project initializer.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Template bundle directory.
    #[arg(value_name = "TEMPLATE_DIR")]
    pub template_dir: PathBuf,

    /// Destination directory for the generated project.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Game name, as the player would read it.
    #[arg(short, long, default_value = FALLBACK_CLASS_NAME)]
    pub name: String,

    /// Java package; derived from the game name when omitted.
    #[arg(short, long, default_value = "")]
    pub package: String,

    /// Selected library keys (comma-separated).
    #[arg(short, long = "library", value_delimiter = ',')]
    pub libraries: Vec<String>,

    /// Active profiles (comma-separated).
    #[arg(long = "profile", value_delimiter = ',')]
    pub profiles: Vec<String>,

    /// Library catalog as a JSON array.
    #[arg(short, long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Library versions as a JSON object of `group:artifact` to version.
    #[arg(long, value_name = "FILE")]
    pub versions: Option<PathBuf>,

    /// Core platform version, overriding the bundle's default.
    #[arg(long = "jme-version")]
    pub jme_version: Option<String>,

    /// Force overwrite of an existing output directory.
    #[arg(short, long)]
    pub force: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Preview actions without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn parses_minimal_args() {
        let args = Args::parse_from(["jme-initializer", "template_dir", "output_dir"]);
        assert_eq!(args.template_dir, PathBuf::from("template_dir"));
        assert_eq!(args.output_dir, PathBuf::from("output_dir"));
        assert_eq!(args.name, "MyGame");
        assert_eq!(args.package, "");
        assert!(args.libraries.is_empty());
        assert!(args.catalog.is_none());
        assert!(!args.force);
    }

    #[test]
    fn parses_full_feature_flags() {
        let args = Args::parse_from([
            "jme-initializer",
            "template_dir",
            "output_dir",
            "--name",
            "Space Blaster",
            "--package",
            "com.example.blaster",
            "--library",
            "JME_DESKTOP,LEMUR",
            "-l",
            "MINIE",
            "--profile",
            "SINGLEPLATFORM",
            "--catalog",
            "libraries.json",
            "--versions",
            "versions.json",
            "--jme-version",
            "3.7.0-stable",
            "--force",
            "-vvv",
            "--dry-run",
        ]);
        assert_eq!(args.name, "Space Blaster");
        assert_eq!(args.package, "com.example.blaster");
        assert_eq!(args.libraries, vec!["JME_DESKTOP", "LEMUR", "MINIE"]);
        assert_eq!(args.profiles, vec!["SINGLEPLATFORM"]);
        assert_eq!(args.catalog, Some(PathBuf::from("libraries.json")));
        assert_eq!(args.versions, Some(PathBuf::from("versions.json")));
        assert_eq!(args.jme_version.as_deref(), Some("3.7.0-stable"));
        assert!(args.force);
        assert_eq!(args.verbose, 3);
        assert!(args.dry_run);
    }
}
