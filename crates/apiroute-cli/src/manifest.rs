//! Route manifest loading
//!
//! A manifest lists the routes an application registers at startup:
//!
//! ```toml
//! [[route]]
//! template = "Examples/"
//! method = "GET"
//! accepted_versions = [2, 3, 4, 5, 6]
//! handler = "ExamplesApiController::some_breaking_change"
//! ```

use anyhow::{Context, Result};
use apiroute_core::RouteDeclaration;
use http::Method;
use serde::Deserialize;
use std::path::Path;

/// Parsed manifest file
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "route")]
    pub routes: Vec<ManifestRoute>,
}

/// One `[[route]]` table
#[derive(Debug, Deserialize)]
pub struct ManifestRoute {
    #[serde(flatten)]
    pub declaration: RouteDeclaration,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub handler: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl ManifestRoute {
    /// HTTP method this route is bound to
    pub fn method(&self) -> Result<Method> {
        Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .with_context(|| format!("invalid HTTP method '{}'", self.method))
    }

    /// Handler label, falling back to the route name or template
    pub fn handler_label(&self) -> String {
        self.handler
            .clone()
            .or_else(|| self.declaration.route_name().map(str::to_string))
            .unwrap_or_else(|| self.declaration.template().to_string())
    }
}

impl Manifest {
    /// Parse a manifest from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid route manifest")
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let manifest = Self::parse(&content)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;

        tracing::debug!(path = %path.display(), routes = manifest.routes.len(), "loaded route manifest");
        Ok(manifest)
    }
}
