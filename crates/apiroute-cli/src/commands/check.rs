//! Validate a manifest the way the host would at startup

use super::build_router;
use crate::manifest::Manifest;
use anyhow::Result;
use apiroute_core::{current_api_version, CurrentVersionSource};
use clap::Args;
use console::{style, Emoji};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Route manifest (TOML)
    pub manifest: PathBuf,
}

static CHECK: Emoji<'_, '_> = Emoji("✅ ", "+ ");
static WARN: Emoji<'_, '_> = Emoji("⚠️ ", "! ");

pub fn check(args: CheckArgs, source: &dyn CurrentVersionSource) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;

    // Explicit-only manifests never read the setting, so report it separately
    match current_api_version(source) {
        Ok(current) => println!("{} current API version: {}", CHECK, style(current).bold()),
        Err(err) => println!("{} {}", WARN, style(err).yellow()),
    }

    let router = build_router(&manifest, source)?;
    println!(
        "{} {} routes registered",
        CHECK,
        style(router.len()).bold()
    );

    Ok(())
}
