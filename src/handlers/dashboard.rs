//! Dashboard handler

use crate::config::ArchiveConfig;
use crate::dashboard;
use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Write the monthly progress dashboard; `output` overrides the configured path
pub fn handle_dashboard(config: &ArchiveConfig, output: Option<&Path>) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => config.resolve(&config.dashboard_path),
    };

    let monthly = dashboard::collect_monthly(config);
    dashboard::write_dashboard(&path, &monthly, Local::now().date_naive())?;
    println!("Wrote {}", path.display());
    Ok(path)
}
