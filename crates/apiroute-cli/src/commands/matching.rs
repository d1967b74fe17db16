//! Show which route answers a request

use super::build_router;
use crate::manifest::Manifest;
use anyhow::{bail, Context, Result};
use apiroute_core::{CurrentVersionSource, RouteMatch};
use clap::Args;
use console::style;
use http::Method;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Route manifest (TOML)
    pub manifest: PathBuf,

    /// Request method
    pub method: String,

    /// Request path, e.g. /api/v2/Examples/
    pub path: String,
}

pub fn match_request(args: MatchArgs, source: &dyn CurrentVersionSource) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let router = build_router(&manifest, source)?;

    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method '{}'", args.method))?;

    match router.at(&method, &args.path) {
        RouteMatch::Found {
            handler,
            entry,
            version,
            params,
        } => {
            println!("{} {}", style("handler:").bold(), handler);
            println!("{} {}", style("version:").bold(), version);
            println!("{} {}", style("route:").bold(), entry.template());
            let mut params: Vec<_> = params.into_iter().collect();
            params.sort();
            for (key, value) in params {
                println!("{} {} = {}", style("param:").bold(), key, value);
            }
            Ok(())
        }
        RouteMatch::MethodNotAllowed { allowed } => {
            let allowed: Vec<&str> = allowed.iter().map(Method::as_str).collect();
            bail!(
                "{} {} is not allowed (allowed: {})",
                method,
                args.path,
                allowed.join(", ")
            )
        }
        RouteMatch::NotFound => bail!("no route answers {} {}", method, args.path),
    }
}
