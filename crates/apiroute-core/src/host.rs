//! Explicit registration with a routing host
//!
//! Handlers are not discovered by scanning. The application builds its
//! [`RouteDeclaration`]s, pairs each with whatever the host binds to a route,
//! and hands them to [`register_all`] at startup. The first failing
//! declaration aborts registration, so a misconfigured deployment fails
//! before serving traffic.
//!
//! # Example
//!
//! ```
//! use apiroute_core::{register_all, FixedVersion, RouteDeclaration, VersionedRouter};
//! use http::Method;
//!
//! let mut router = VersionedRouter::new();
//! let routes = vec![
//!     (RouteDeclaration::new("Examples/")?, (Method::POST, "post")),
//!     (RouteDeclaration::new("Examples/")?.accepted_versions([1]), (Method::GET, "get_v1")),
//!     (RouteDeclaration::new("Examples/")?.starting_version(2), (Method::GET, "get_latest")),
//! ];
//!
//! register_all(&mut router, &FixedVersion(3), routes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::declaration::RouteDeclaration;
use crate::error::RegistrationError;
use crate::settings::CurrentVersionSource;
use crate::template::RouteEntry;

/// A routing host that accepts resolved routes.
///
/// `H` is whatever the host binds to a route: a handler, a method and
/// handler pair, a controller action name.
pub trait RouteHost<H> {
    /// Register one resolved route.
    ///
    /// Implementations must either register the whole entry or leave the
    /// host unchanged.
    fn register(&mut self, entry: RouteEntry, handler: H) -> Result<(), RegistrationError>;
}

impl<H> RouteHost<H> for Vec<(RouteEntry, H)> {
    fn register(&mut self, entry: RouteEntry, handler: H) -> Result<(), RegistrationError> {
        self.push((entry, handler));
        Ok(())
    }
}

/// Resolve a single declaration and register it with `host`.
pub fn register<Host, H, S>(
    host: &mut Host,
    source: &S,
    declaration: &RouteDeclaration,
    handler: H,
) -> Result<(), RegistrationError>
where
    Host: RouteHost<H> + ?Sized,
    S: CurrentVersionSource + ?Sized,
{
    let entry = declaration
        .create_route(source)
        .map_err(|source| RegistrationError::Route {
            template: declaration.template().to_string(),
            source,
        })?;

    host.register(entry, handler)
}

/// Resolve and register every declaration in order.
///
/// Returns the number of registered routes. Stops at the first error;
/// routes registered before it stay registered, the failing one is not.
pub fn register_all<Host, H, S, I>(
    host: &mut Host,
    source: &S,
    routes: I,
) -> Result<usize, RegistrationError>
where
    Host: RouteHost<H> + ?Sized,
    S: CurrentVersionSource + ?Sized,
    I: IntoIterator<Item = (RouteDeclaration, H)>,
{
    let mut registered = 0;

    for (declaration, handler) in routes {
        if let Err(err) = register(host, source, &declaration, handler) {
            route_event!(
                error,
                template = %declaration.template(),
                name = ?declaration.route_name(),
                error = %err,
                "route registration failed"
            );
            return Err(err);
        }
        registered += 1;
    }

    route_event!(debug, count = registered, "registered versioned routes");
    Ok(registered)
}
