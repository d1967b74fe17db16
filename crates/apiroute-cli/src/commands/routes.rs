//! Print the versioned route table

use crate::manifest::Manifest;
use anyhow::{Context, Result};
use apiroute_core::{CurrentVersionSource, RouteEntry};
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Route manifest (TOML)
    pub manifest: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RouteRow<'a> {
    method: String,
    handler: String,
    #[serde(flatten)]
    entry: &'a RouteEntry,
}

pub fn routes(args: RoutesArgs, source: &dyn CurrentVersionSource) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;

    let mut resolved = Vec::with_capacity(manifest.routes.len());
    for route in &manifest.routes {
        let entry = route
            .declaration
            .create_route(source)
            .with_context(|| format!("route '{}'", route.declaration.template()))?;
        resolved.push((route.method()?, route.handler_label(), entry));
    }

    if args.json {
        let rows: Vec<RouteRow<'_>> = resolved
            .iter()
            .map(|(method, handler, entry)| RouteRow {
                method: method.to_string(),
                handler: handler.clone(),
                entry,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (method, handler, entry) in &resolved {
        println!(
            "{:<7} {} {}",
            style(method.as_str()).bold(),
            entry.template(),
            style(format!("-> {}", handler)).dim()
        );
        if let Some(name) = entry.name() {
            println!("        name: {}, order: {}", name, entry.order());
        }
    }

    Ok(())
}
