// File: ./src/cli.rs
//! Command-line parsing and help text.
use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Generate demo rows, then prune.
    All,
    Generate,
    Prune,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub root: Option<PathBuf>,
}

impl CliArgs {
    /// Parses arguments, excluding the binary name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = None;
        let mut root = None;
        let mut iter = args.into_iter().map(Into::into);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" | "help" => return Ok(Self { command: Command::Help, root }),
                "-r" | "--root" => match iter.next() {
                    Some(path) => root = Some(PathBuf::from(path)),
                    None => bail!("{} requires a path", arg),
                },
                "generate" | "prune" if command.is_some() => {
                    bail!("Only one command may be given")
                }
                "generate" => command = Some(Command::Generate),
                "prune" => command = Some(Command::Prune),
                other => bail!("Unknown argument: {}", other),
            }
        }

        Ok(Self {
            command: command.unwrap_or(Command::All),
            root,
        })
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Sheetprune v{} - fill a Google Sheets range with demo rows and prune old ones",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {}                    Write demo rows, then prune", binary_name);
    println!("    {} generate           Write demo rows only", binary_name);
    println!("    {} prune              Prune rows outside the retention window", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("FILES:");
    println!("    <config>/config.toml        spreadsheet_id, range, retention_days, ...");
    println!("    <config>/credentials.json   OAuth client secrets (Desktop app)");
    println!("    <data>/token/               Cached authorization tokens");
}
