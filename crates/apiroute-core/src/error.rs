//! Error types for route declaration, resolution and registration

use thiserror::Error;

/// Result type alias for apiroute operations
pub type Result<T, E = RouteError> = std::result::Result<T, E>;

/// Errors raised while validating a declaration or resolving its versions.
///
/// All of these are deterministic programming or configuration mistakes.
/// Hosts are expected to abort route registration when one surfaces rather
/// than register a partially-built route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The template is blank or starts with a path separator
    #[error("{0}")]
    InvalidDeclaration(String),

    /// Both explicit accepted versions and a starting version were declared
    #[error("Either 'AcceptedVersions' or 'StartingVersion' can be set, but not both.")]
    ConflictingConstraints,

    /// A declared version is not a positive integer
    #[error("{0}")]
    InvalidVersionValue(String),

    /// The current API version setting is missing, non-numeric or not positive
    #[error("The 'currentApiVersion' app setting must be a positive integer.")]
    InvalidConfiguration {
        /// Raw value read from the configuration source, if any
        value: Option<String>,
    },

    /// The starting version is greater than the current API version
    #[error("The 'StartingVersion' cannot be greater than the 'currentApiVersion' specified in the config.")]
    RangeViolation {
        /// Declared starting version
        starting: u32,
        /// Current API version read from configuration
        current: u32,
    },
}

impl RouteError {
    pub(crate) fn blank_template() -> Self {
        Self::InvalidDeclaration("The route template cannot be empty or whitespace.".to_string())
    }

    pub(crate) fn leading_separator() -> Self {
        Self::InvalidDeclaration(
            "The route cannot start with a forward slash ('/') since it will be prefixed with the api version (e.g. api/v2/).".to_string(),
        )
    }

    pub(crate) fn non_positive_accepted() -> Self {
        Self::InvalidVersionValue(
            "The explicitly specified AcceptedVersion values must all be positive integers.".to_string(),
        )
    }

    /// An explicit but empty version list.
    ///
    /// Rendering it would produce the unmatchable `regex()` constraint, so it
    /// is rejected as a version value instead.
    pub(crate) fn empty_accepted() -> Self {
        Self::InvalidVersionValue(
            "The explicitly specified AcceptedVersions must contain at least one version.".to_string(),
        )
    }

    pub(crate) fn non_positive_starting() -> Self {
        Self::InvalidVersionValue("The 'StartingVersion' must be a positive integer.".to_string())
    }

    /// Short machine-readable kind identifier
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDeclaration(_) => "invalid_declaration",
            Self::ConflictingConstraints => "conflicting_constraints",
            Self::InvalidVersionValue(_) => "invalid_version_value",
            Self::InvalidConfiguration { .. } => "invalid_configuration",
            Self::RangeViolation { .. } => "range_violation",
        }
    }
}

/// Errors raised by a routing host while registering resolved routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The declaration failed validation or resolution
    #[error("failed to register route '{template}': {source}")]
    Route {
        /// Template fragment of the offending declaration
        template: String,
        /// Underlying resolution failure
        #[source]
        source: RouteError,
    },

    /// A route with the same name is already registered
    #[error("a route named '{0}' is already registered")]
    DuplicateName(String),

    /// Two routes claim the same method, path and version with the same order
    #[error("route conflict on {method} {path}: '{existing}' and '{new}' share order {order}")]
    RouteConflict {
        /// HTTP method of the conflicting routes
        method: String,
        /// Concrete path both routes expand to
        path: String,
        /// Template of the route registered first
        existing: String,
        /// Template of the route being registered
        new: String,
        /// Shared order value
        order: i32,
    },

    /// The underlying path matcher rejected the expanded path
    #[error("invalid route path '{path}': {details}")]
    InvalidPath {
        /// Expanded concrete path
        path: String,
        /// Error reported by the matcher
        details: String,
    },
}
