//! Command-line argument parsing.
//!
//! Turns raw arguments into a [`CliAction`] for `main`. Unknown options and
//! malformed values fall back to printing help instead of failing hard.

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::logger::Log;

/// What the binary should do after parsing.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Drive the face from the system clock until a shutdown signal
    Run {
        debug_enabled: bool,
        config_path: Option<PathBuf>,
    },
    /// Initialize, render once and exit
    Once {
        debug_enabled: bool,
        config_path: Option<PathBuf>,
    },
    /// Replay a whole day of minute ticks without sleeping
    Simulate {
        debug_enabled: bool,
        config_path: Option<PathBuf>,
        date: NaiveDate,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or malformed arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments, skipping the program name.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut run_once = false;
        let mut simulate_date: Option<NaiveDate> = None;
        let mut config_path: Option<PathBuf> = None;
        let mut unknown_arg_found = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = &args_vec[i];
            match arg_str.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--once" | "-o" => run_once = true,
                "--simulate" | "-s" => match args_vec.get(i + 1) {
                    Some(value) => {
                        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                            Ok(date) => simulate_date = Some(date),
                            Err(_) => {
                                Log::log_warning(&format!(
                                    "Invalid date for --simulate: {} (expected YYYY-MM-DD)",
                                    value
                                ));
                                unknown_arg_found = true;
                            }
                        }
                        i += 1;
                    }
                    None => {
                        Log::log_warning("Missing date for --simulate. Usage: --simulate <YYYY-MM-DD>");
                        unknown_arg_found = true;
                    }
                },
                "--config" | "-c" => match args_vec.get(i + 1) {
                    Some(value) => {
                        config_path = Some(PathBuf::from(value));
                        i += 1;
                    }
                    None => {
                        Log::log_warning("Missing path for --config. Usage: --config <path>");
                        unknown_arg_found = true;
                    }
                },
                _ => {
                    if arg_str.starts_with('-') {
                        Log::log_warning(&format!("Unknown option: {}", arg_str));
                        unknown_arg_found = true;
                    }
                    // Non-option arguments are ignored
                }
            }
            i += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else if run_once && simulate_date.is_some() {
            Log::log_warning("--once and --simulate cannot be combined");
            CliAction::ShowHelpDueToError
        } else if let Some(date) = simulate_date {
            CliAction::Simulate {
                debug_enabled,
                config_path,
                date,
            }
        } else if run_once {
            CliAction::Once {
                debug_enabled,
                config_path,
            }
        } else {
            CliAction::Run {
                debug_enabled,
                config_path,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    Log::log_version();
    Log::log_pipe();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    Log::log_version();
    Log::log_block_start(env!("CARGO_PKG_DESCRIPTION"));
    Log::log_block_start("Usage: almanac [OPTIONS]");
    Log::log_block_start("Options:");
    Log::log_indented("-c, --config <path>          Load configuration from a specific file");
    Log::log_indented("-d, --debug                  Enable detailed debug output");
    Log::log_indented("-h, --help                   Print help information");
    Log::log_indented("-o, --once                   Render the face once and exit");
    Log::log_indented("-s, --simulate <YYYY-MM-DD>  Replay every minute of a day without waiting");
    Log::log_indented("-V, --version                Print version information");
    Log::log_end();
}
