//! CLI commands

mod check;
mod matching;
mod routes;

pub use check::{check, CheckArgs};
pub use matching::{match_request, MatchArgs};
pub use routes::{routes, RoutesArgs};

use crate::manifest::Manifest;
use anyhow::Result;
use apiroute_core::{register_all, CurrentVersionSource, VersionedRouter};

/// Register every manifest route, failing on the first error
pub(crate) fn build_router(
    manifest: &Manifest,
    source: &dyn CurrentVersionSource,
) -> Result<VersionedRouter<String>> {
    let mut routes = Vec::with_capacity(manifest.routes.len());
    for route in &manifest.routes {
        routes.push((route.declaration.clone(), (route.method()?, route.handler_label())));
    }

    let mut router = VersionedRouter::new();
    register_all(&mut router, source, routes)?;
    Ok(router)
}
