//! Organize handler

use crate::config::{ArchiveConfig, DuplicatePolicy};
use crate::formatting;
use crate::organizer::{OrganizeOptions, OrganizeReport, Organizer};
use crate::resolver::{CommandResolver, DifficultyResolver, ReadmeResolver};
use anyhow::{Context, Result, bail};
use clap::ValueEnum;

/// Where difficulties come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ResolverKind {
    /// README snippet inside each solution folder
    #[default]
    Readme,
    /// External lookup tool queried by problem slug
    Command,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizeRequest {
    pub platform: String,
    pub resolver: ResolverKind,
    /// Overrides the configured lookup command
    pub lookup_command: Option<String>,
    /// Overrides the configured duplicate policy
    pub policy: Option<DuplicatePolicy>,
    pub dry_run: bool,
    pub commit: bool,
}

fn build_resolver(
    config: &ArchiveConfig,
    request: &OrganizeRequest,
) -> Result<Box<dyn DifficultyResolver>> {
    Ok(match request.resolver {
        ResolverKind::Readme => Box::new(ReadmeResolver::new(
            config.readme_name.clone(),
            config.scan_lines,
        )?),
        ResolverKind::Command => {
            let command_line = request
                .lookup_command
                .as_deref()
                .unwrap_or(&config.lookup_command);
            Box::new(CommandResolver::new(command_line)?)
        }
    })
}

/// Sort one platform's root-level problems into difficulty buckets
pub fn handle_organize(config: &ArchiveConfig, request: &OrganizeRequest) -> Result<OrganizeReport> {
    let Some(platform) = config.platform(&request.platform) else {
        bail!("Unknown platform '{}'", request.platform);
    };
    if !platform.bucketed {
        bail!("Platform '{}' is not sorted by difficulty", platform.name);
    }

    let root = config.platform_dir(platform);
    let options = OrganizeOptions {
        policy: request.policy.unwrap_or(config.duplicate_policy),
        dry_run: request.dry_run,
    };
    let organizer = Organizer::new(&root, config, build_resolver(config, request)?, options);

    let report = organizer.organize()?;
    println!("\n{}", formatting::format_organize_summary(&report));

    if request.dry_run {
        println!("\nDry run: nothing was moved.");
        return Ok(report);
    }

    if request.commit {
        let committed = organizer
            .commit(&report)
            .context("Failed to commit reorganization")?;
        if committed {
            println!("\nCommitted the reorganization.");
            return Ok(report);
        }
    }

    if report.changed {
        println!("\nChanges made! Please commit the changes.");
    } else {
        println!("\nNo changes needed. All problems are already organized.");
    }
    Ok(report)
}
