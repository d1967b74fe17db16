//! # apiroute core
//!
//! Declarative URI versioning for REST routes.
//!
//! A handler declares the resource path it serves and which API versions it
//! answers for. At registration time the declaration is validated, resolved
//! against the deployment's current API version, and rendered into a route
//! template such as `api/v{version:int:regex(2|3|4)}/GamingGroups` that a
//! routing host matches inbound requests against.
//!
//! ```
//! use apiroute_core::{AppSettings, RouteDeclaration};
//!
//! let settings = AppSettings::new().with("currentApiVersion", "4");
//! let entry = RouteDeclaration::new("GamingGroups")?
//!     .starting_version(2)
//!     .create_route(&settings)?;
//!
//! assert_eq!(entry.template(), "api/v{version:int:regex(2|3|4)}/GamingGroups");
//! assert_eq!(entry.versions(), &[2, 3, 4]);
//! # Ok::<(), apiroute_core::RouteError>(())
//! ```

#[macro_use]
mod events;

pub mod declaration;
mod error;
mod host;
pub mod resolver;
mod router;
mod settings;
pub mod template;

// Public API
pub use declaration::RouteDeclaration;
pub use error::{RegistrationError, Result, RouteError};
pub use host::{register, register_all, RouteHost};
pub use resolver::{current_api_version, resolve_versions};
pub use router::{RouteMatch, VersionedRouter};
pub use settings::{
    from_fn, load_dotenv, load_dotenv_from, AppSettings, CurrentVersionSource, EnvSettings,
    FixedVersion, FnSource, CURRENT_API_VERSION_KEY,
};
pub use template::{build_template, parse_version_segment, RouteEntry};
