//! CLI command implementations.

use crate::config::Config;
use crate::version::VersionInfo;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::error;
use vault_index_walker::{IndexReport, VaultIndexer};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Index a vault, leaves to root.
pub fn init(config: &Config, output: Option<&Path>) -> Result<()> {
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(format!("configuration validation failed: {}", e).into());
    }

    let vault = config.vault_dir.as_path();

    if config.verbose {
        println!("Starting indexation of vault: {}", vault.display());
        if config.dry_run {
            println!("{}", "🔍 DRY RUN MODE - No files will be created".yellow());
        }
        if config.backup {
            println!("{}", "💾 BACKUP MODE - Existing index files will be backed up".cyan());
        }
        if !config.exclude_dirs.is_empty() {
            println!("🚫 Excluding directories: {}", config.exclude_dirs.join(", "));
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Indexing vault...");

    let indexer = VaultIndexer::new(vault, config.index_options());
    let result = indexer.start();

    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!("Indexation failed for {}: {}", vault.display(), e);
            return Err(format!("indexation failed: {}", e).into());
        }
    };

    print_summary(&report);

    if let Some(out_path) = output {
        export_report(&report, out_path)?;
    }

    if config.dry_run {
        println!("{} Dry run completed for vault: {}", "🔍".cyan(), vault.display());
    } else {
        println!("{} Successfully indexed vault: {}", "✓".green(), vault.display());
    }

    Ok(())
}

fn print_summary(report: &IndexReport) {
    let written = if report.dry_run {
        format!("{} would be created", report.planned.len())
    } else {
        format!("{} created", report.created.len())
    };

    println!(
        "{} {} directories: {}, {} already indexed, {} empty in {}ms",
        "✓".green(),
        report.processed.len().to_string().cyan(),
        written.cyan(),
        report.already_indexed.len(),
        report.empty.len().to_string().dimmed(),
        report.duration_ms
    );

    if !report.backups.is_empty() {
        println!("{} {} backups created", "💾".cyan(), report.backups.len());
        for backup in report.backups.iter().take(5) {
            println!("  {}", backup.display().to_string().dimmed());
        }
        if report.backups.len() > 5 {
            println!("  ... and {} more", report.backups.len() - 5);
        }
    }
}

fn export_report(report: &IndexReport, path: &Path) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(report)?)?;
    println!("{} Report written to {}", "✓".green(), path.display());
    Ok(())
}

/// Print build information.
pub fn version(json: bool) -> Result<()> {
    let info = VersionInfo::get();
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info);
    }
    Ok(())
}
