//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::{Config, ReferenceData};

/// Data directory: `--data` flag, then config/env
pub fn data_dir(global: &GlobalOpts, config: &Config) -> Option<PathBuf> {
    global.data.clone().or_else(|| config.data_dir.clone())
}

/// Load and validate the reference tables for a command
pub fn load_reference(global: &GlobalOpts, config: &Config) -> Result<ReferenceData> {
    let dir = data_dir(global, config);
    if global.verbose {
        match &dir {
            Some(d) => note(global, &format!("Reference data from {} (built-in fallback)", d.display())),
            None => note(global, "Reference data: built-in tables"),
        }
    }
    Ok(ReferenceData::load(dir.as_deref())?)
}

/// Progress line on stderr, hidden with --quiet
pub fn note(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{} {}", style("→").blue(), message);
    }
}

/// Warning line on stderr, hidden only with --quiet
pub fn warn(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{} {}", style("!").yellow(), message);
    }
}

/// Success line on stderr, hidden with --quiet
pub fn success(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{} {}", style("✓").green(), message);
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and line breaks according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
        assert_eq!(escape_csv("with\rreturn"), "\"with\rreturn\"");
    }

    #[test]
    fn test_data_dir_prefers_flag() {
        let global = GlobalOpts {
            format: crate::cli::OutputFormat::Auto,
            quiet: true,
            verbose: false,
            data: Some(PathBuf::from("flag")),
        };
        let config = Config {
            data_dir: Some(PathBuf::from("config")),
            ..Config::default()
        };
        assert_eq!(data_dir(&global, &config), Some(PathBuf::from("flag")));

        let global = GlobalOpts { data: None, ..global };
        assert_eq!(data_dir(&global, &config), Some(PathBuf::from("config")));
    }
}
