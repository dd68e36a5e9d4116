use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

use linecut::core::config::{ConfigLoader, ConfigOverrides, DeletionConfig};
use linecut::{LineRangeDeleter, LinecutResult, Outcome};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to edit in place (defaults to views/specialist/words.ejs)
    target: Option<PathBuf>,

    /// First line to remove, 1-based
    #[arg(long)]
    start_line: Option<usize>,

    /// Last line to remove, 1-based and inclusive
    #[arg(long)]
    end_line: Option<usize>,

    /// Only delete when the file has more lines than this
    #[arg(long = "threshold")]
    length_threshold: Option<usize>,

    /// Text encoding of the file
    #[arg(long)]
    encoding: Option<String>,

    /// Refuse to write unless the first removed line contains this text
    #[arg(long)]
    expect_start: Option<String>,

    /// Refuse to write unless the first line after the range contains this text
    #[arg(long)]
    expect_end: Option<String>,

    /// Show what would be removed without writing
    #[arg(long, overrides_with = "no_dry_run")]
    dry_run: bool,

    /// Write even if a config file enables dry_run
    #[arg(long, overrides_with = "dry_run")]
    no_dry_run: bool,

    /// Configuration file layered over the global and project ones
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            target: self.target.clone(),
            start_line: self.start_line,
            end_line: self.end_line,
            length_threshold: self.length_threshold,
            encoding: self.encoding.clone(),
            expect_start: self.expect_start.clone(),
            expect_end: self.expect_end.clone(),
            dry_run: match (self.dry_run, self.no_dry_run) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }

    fn effective_config(&self) -> LinecutResult<DeletionConfig> {
        let mut config = ConfigLoader::default().load(self.config.as_deref())?;
        config.apply(self.overrides());
        Ok(config)
    }
}

fn execute<W: Write>(cli: &Cli, out: &mut W) -> LinecutResult<()> {
    let config = cli.effective_config()?;

    if cli.print_config {
        config.validate()?;
        write!(out, "{}", config.to_toml()?).map_err(linecut::LinecutError::Output)?;
        return Ok(());
    }

    let deleter = LineRangeDeleter::new(config)?;
    let outcome = deleter.run(out)?;
    debug!("Target modified: {}", outcome.modified());
    match outcome {
        Outcome::Removed {
            removed, remaining, ..
        } => info!(
            "Removed {} lines from {}, {} remain",
            removed,
            deleter.config().target.display(),
            remaining
        ),
        Outcome::DryRun { .. } => info!("Dry run, nothing written"),
        Outcome::Skipped { total } => info!("Skipped file with {} lines", total),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    linecut::init_with_logger(cli.verbose)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Every failure is reported on the console; the exit status stays 0.
    if let Err(e) = execute(&cli, &mut out) {
        debug!("{:?}", e);
        writeln!(out, "Error: {}", e)?;
    }

    Ok(())
}
