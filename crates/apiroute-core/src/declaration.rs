//! Route declarations and their validation
//!
//! A [`RouteDeclaration`] states which resource path a handler serves and
//! which API versions it answers for. Versions are declared in one of three
//! ways:
//!
//! - nothing: every version from 1 through the current API version
//! - [`accepted_versions`](RouteDeclaration::accepted_versions): exactly the listed versions
//! - [`starting_version`](RouteDeclaration::starting_version): from that version through current
//!
//! # Example
//!
//! ```
//! use apiroute_core::RouteDeclaration;
//!
//! let get_v1 = RouteDeclaration::new("Examples/")?.accepted_versions([1]);
//! let get_latest = RouteDeclaration::new("Examples/")?
//!     .starting_version(13)
//!     .name("examples-latest");
//!
//! assert!(RouteDeclaration::new("/Examples").is_err());
//! # Ok::<(), apiroute_core::RouteError>(())
//! ```

use crate::error::{Result, RouteError};
use crate::resolver;
use crate::settings::CurrentVersionSource;
use crate::template::RouteEntry;
use serde::{Deserialize, Serialize};

/// Characters that may not open a template; the version prefix is always the root
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// A handler's versioning intent, registered once with the routing host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDeclaration")]
pub struct RouteDeclaration {
    template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    accepted_versions: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    starting_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    order: i32,
}

impl RouteDeclaration {
    /// Create a declaration for a resource path fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidDeclaration`] if the template is empty,
    /// all whitespace, or starts with a path separator.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        validate_template(&template)?;

        Ok(Self {
            template,
            accepted_versions: None,
            starting_version: None,
            name: None,
            order: 0,
        })
    }

    /// Answer exactly these versions, in the given order.
    ///
    /// Duplicates are kept as declared. An empty list fails validation.
    pub fn accepted_versions(mut self, versions: impl IntoIterator<Item = i32>) -> Self {
        self.accepted_versions = Some(versions.into_iter().collect());
        self
    }

    /// Answer every version from `version` through the current API version
    pub fn starting_version(mut self, version: i32) -> Self {
        self.starting_version = Some(version);
        self
    }

    /// Set the route name passed through to the host
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the route order passed through to the host
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Resource path fragment, exactly as declared
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Explicitly declared versions, if any
    pub fn declared_versions(&self) -> Option<&[i32]> {
        self.accepted_versions.as_deref()
    }

    /// Declared starting version, if any
    pub fn declared_starting_version(&self) -> Option<i32> {
        self.starting_version
    }

    /// Route name, if any
    pub fn route_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Route order
    pub fn route_order(&self) -> i32 {
        self.order
    }

    /// Check the version constraints without resolving them
    pub fn validate(&self) -> Result<()> {
        validate_constraints(self.accepted_versions.as_deref(), self.starting_version)
    }

    /// Resolve the concrete versions this declaration answers for.
    ///
    /// The result depends only on the declaration and the value reported by
    /// `source`, so repeated calls against an unchanged source agree.
    pub fn resolve<S>(&self, source: &S) -> Result<Vec<u32>>
    where
        S: CurrentVersionSource + ?Sized,
    {
        resolver::resolve_versions(self, source)
    }

    /// Validate, resolve and render this declaration into a route entry
    pub fn create_route<S>(&self, source: &S) -> Result<RouteEntry>
    where
        S: CurrentVersionSource + ?Sized,
    {
        let versions = self.resolve(source)?;
        Ok(RouteEntry::new(self, versions))
    }
}

/// Wire form of a declaration, validated on the way in
#[derive(Deserialize)]
struct RawDeclaration {
    template: Option<String>,
    #[serde(default)]
    accepted_versions: Option<Vec<i32>>,
    #[serde(default)]
    starting_version: Option<i32>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    order: i32,
}

impl TryFrom<RawDeclaration> for RouteDeclaration {
    type Error = RouteError;

    fn try_from(raw: RawDeclaration) -> Result<Self> {
        let template = raw.template.ok_or_else(RouteError::blank_template)?;
        let mut declaration = RouteDeclaration::new(template)?.order(raw.order);
        declaration.accepted_versions = raw.accepted_versions;
        declaration.starting_version = raw.starting_version;
        declaration.name = raw.name;
        Ok(declaration)
    }
}

/// Validate a route template fragment.
///
/// # Examples
///
/// ```
/// use apiroute_core::declaration::validate_template;
///
/// assert!(validate_template("GamingGroups").is_ok());
/// assert!(validate_template("Examples/{id}").is_ok());
///
/// assert!(validate_template("").is_err());
/// assert!(validate_template("   ").is_err());
/// assert!(validate_template("/GamingGroups").is_err());
/// ```
pub fn validate_template(template: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(RouteError::blank_template());
    }

    if template.starts_with(PATH_SEPARATORS) {
        return Err(RouteError::leading_separator());
    }

    Ok(())
}

/// Validate the pairing and values of the version constraints.
///
/// Declaring both an explicit set and a starting version is rejected before
/// any value is inspected. An explicit set must hold at least one version;
/// `accepted_versions([])` is an [`RouteError::InvalidVersionValue`] rather
/// than a route answering `regex()`.
pub fn validate_constraints(accepted: Option<&[i32]>, starting: Option<i32>) -> Result<()> {
    if accepted.is_some() && starting.is_some() {
        return Err(RouteError::ConflictingConstraints);
    }

    if let Some(versions) = accepted {
        if versions.is_empty() {
            return Err(RouteError::empty_accepted());
        }
        if versions.iter().any(|&version| version < 1) {
            return Err(RouteError::non_positive_accepted());
        }
    }

    if matches!(starting, Some(version) if version < 1) {
        return Err(RouteError::non_positive_starting());
    }

    Ok(())
}
