//! Command-line interface for par-ligature.
//!
//! Inspection commands over the configured ligature rules: print the
//! dispatch table for a mode, scan text for ligature spans, or validate
//! the config.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use par_ligature_config::Config;
use par_ligature_rules::{GeneratedTable, ModeId};

use crate::dispatch::LigatureSpan;
use crate::runtime::LigatureRuntime;

/// par-ligature - ligature dispatch table inspector
#[derive(Parser, Debug)]
#[command(name = "par-ligature")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/par-ligature/ligatures.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level 0-4 (overrides DEBUG_LEVEL)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=4))]
    pub log_level: Option<u8>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the ligature dispatch table resolved for a mode
    Show {
        /// Active mode, e.g. "rust"
        #[arg(long)]
        mode: String,
    },
    /// Print the ligature spans found in a line of text
    Scan {
        /// Active mode, e.g. "rust"
        #[arg(long)]
        mode: String,

        /// Text to scan
        text: String,
    },
    /// Load the config and report ligature sets that fail to register
    Check,
}

/// Load the config named on the command line, or the default one.
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load(),
    }
}

/// Run a parsed command line, returning what should be printed on stdout.
pub fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli.config.as_ref())?;
    let mut runtime = LigatureRuntime::from_config(&config);

    match &cli.command {
        Commands::Show { mode } => {
            let mode = ModeId::from(mode.as_str());
            Ok(match runtime.table_for(&mode) {
                Some(table) => format_table(&table),
                None => format!("mode '{mode}' is ignored\n"),
            })
        }
        Commands::Scan { mode, text } => {
            let mode = ModeId::from(mode.as_str());
            Ok(match runtime.matcher_for(&mode) {
                Some(matcher) => format_spans(&matcher.find_ligatures(text)),
                None => format!("mode '{mode}' is ignored\n"),
            })
        }
        Commands::Check => {
            let failures = runtime.failures();
            if failures.is_empty() {
                return Ok(format!(
                    "ok: {} ligature sets registered\n",
                    runtime.tables().registry().len()
                ));
            }
            let mut report = String::new();
            for failure in failures {
                let _ = writeln!(
                    report,
                    "ligature set #{} ({}): {}",
                    failure.index, failure.selector, failure.error
                );
            }
            bail!("{} invalid ligature sets\n{}", failures.len(), report.trim_end())
        }
    }
}

/// One line per leading character: `<char>\t<rendered pattern>`.
pub fn format_table(table: &GeneratedTable) -> String {
    let mut out = format!(
        "mode '{}': {} leading characters\n",
        table.mode(),
        table.len()
    );
    for (leading, pattern) in table.iter() {
        let _ = writeln!(out, "{leading}\t{pattern}");
    }
    out
}

/// One line per span: `<start>+<len>\t<text>`.
pub fn format_spans(spans: &[LigatureSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        let _ = writeln!(out, "{}+{}\t{}", span.start, span.len, span.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["par-ligature", "show", "--mode", "rust"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { ref mode } if mode == "rust"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_scan_with_globals() {
        let cli = Cli::try_parse_from([
            "par-ligature",
            "scan",
            "--mode",
            "c",
            "a => b",
            "--config",
            "/tmp/l.yaml",
            "--log-level",
            "3",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Scan { ref text, .. } if text == "a => b"));
        assert_eq!(cli.log_level, Some(3));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/l.yaml")));
    }

    #[test]
    fn test_log_level_out_of_range() {
        assert!(Cli::try_parse_from(["par-ligature", "check", "--log-level", "7"]).is_err());
    }

    #[test]
    fn test_format_spans() {
        let spans = [LigatureSpan {
            start: 3,
            len: 2,
            text: "=>".to_string(),
        }];
        assert_eq!(format_spans(&spans), "3+2\t=>\n");
    }
}
