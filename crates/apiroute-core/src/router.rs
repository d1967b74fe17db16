//! Versioned router built on a radix tree (matchit)
//!
//! [`VersionedRouter`] is a reference routing host. Each registered entry is
//! expanded into one concrete path per resolved version, so
//! `api/v{version:int:regex(2|3)}/Examples/{id}` is served at
//! `/api/v2/Examples/{id}` and `/api/v3/Examples/{id}`.
//!
//! Fragment parameters are matched by name only: `{id:int}` captures any
//! segment as `id`, and `{*path}` captures the rest of the path. Constraints
//! are left to the handler.
//!
//! # Precedence
//!
//! When two entries claim the same method, path and version, the one with
//! the lower `order` wins. Equal orders are a registration error, as are
//! duplicate route names.
//!
//! # Example
//!
//! ```
//! use apiroute_core::{FixedVersion, RouteDeclaration, RouteMatch, VersionedRouter};
//! use http::Method;
//!
//! let source = FixedVersion(14);
//! let mut router = VersionedRouter::new();
//! router
//!     .route(Method::GET, &RouteDeclaration::new("Examples/")?.accepted_versions([1]), "v1", &source)?
//!     .route(Method::GET, &RouteDeclaration::new("Examples/")?.starting_version(13), "latest", &source)?;
//!
//! match router.at(&Method::GET, "/api/v14/Examples/") {
//!     RouteMatch::Found { handler, version, .. } => {
//!         assert_eq!(*handler, "latest");
//!         assert_eq!(version, 14);
//!     }
//!     _ => unreachable!(),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::declaration::RouteDeclaration;
use crate::error::RegistrationError;
use crate::host::{self, RouteHost};
use crate::settings::CurrentVersionSource;
use crate::template::RouteEntry;
use http::Method;
use matchit::Router as MatchitRouter;
use std::collections::{HashMap, HashSet};

/// A registered entry and the handler bound to it
struct Registered<T> {
    method: Method,
    entry: RouteEntry,
    handler: T,
}

/// Which entry serves a concrete path, per method
#[derive(Debug, Clone)]
struct PathSlot {
    version: u32,
    methods: HashMap<Method, usize>,
}

/// Result of matching a request against the router
#[derive(Debug)]
pub enum RouteMatch<'a, T> {
    /// A route answers this method, path and version
    Found {
        /// Bound handler
        handler: &'a T,
        /// Entry the handler was registered with
        entry: &'a RouteEntry,
        /// Version taken from the path
        version: u32,
        /// Path parameters from the fragment
        params: HashMap<String, String>,
    },
    /// No route answers this path
    NotFound,
    /// The path exists for other methods only
    MethodNotAllowed {
        /// Methods that would be accepted
        allowed: Vec<Method>,
    },
}

/// Routing host that dispatches versioned paths to bound handlers.
pub struct VersionedRouter<T> {
    inner: MatchitRouter<String>,
    registered: Vec<Registered<T>>,
    slots: HashMap<String, PathSlot>,
    names: HashSet<String>,
}

impl<T> VersionedRouter<T> {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            inner: MatchitRouter::new(),
            registered: Vec::new(),
            slots: HashMap::new(),
            names: HashSet::new(),
        }
    }

    /// Resolve a declaration and bind `handler` to it for `method`
    pub fn route<S>(
        &mut self,
        method: Method,
        declaration: &RouteDeclaration,
        handler: T,
        source: &S,
    ) -> Result<&mut Self, RegistrationError>
    where
        S: CurrentVersionSource + ?Sized,
    {
        host::register(&mut *self, source, declaration, (method, handler))?;
        Ok(self)
    }

    /// Bind `handler` to an already resolved entry
    pub fn insert(
        &mut self,
        method: Method,
        entry: RouteEntry,
        handler: T,
    ) -> Result<(), RegistrationError> {
        if let Some(name) = entry.name() {
            if self.names.contains(name) {
                return Err(RegistrationError::DuplicateName(name.to_string()));
            }
        }

        let index = self.registered.len();
        let mut claims: Vec<(String, u32)> = Vec::new();

        for (version, path) in entry.concrete_paths() {
            let key = convert_path_params(&path)?;
            if claims.iter().any(|(claimed, _)| *claimed == key) {
                // Duplicate version in an explicit list
                continue;
            }

            if let Some(existing) = self
                .slots
                .get(&key)
                .and_then(|slot| slot.methods.get(&method))
            {
                let existing = &self.registered[*existing].entry;
                if existing.order() == entry.order() {
                    return Err(RegistrationError::RouteConflict {
                        method: method.to_string(),
                        path,
                        existing: existing.template().to_string(),
                        new: entry.template().to_string(),
                        order: entry.order(),
                    });
                }
                if existing.order() < entry.order() {
                    route_event!(
                        warn,
                        method = %method,
                        path = %path,
                        winner = %existing.template(),
                        "route shadowed by lower order route"
                    );
                    continue;
                }
            }

            claims.push((key, version));
        }

        for (key, _) in &claims {
            if self.slots.contains_key(key) {
                continue;
            }
            if let Err(e) = self.inner.insert(key.clone(), key.clone()) {
                // Drop any paths of this entry that made it in
                self.inner = rebuild_matcher(&self.slots);
                return Err(RegistrationError::InvalidPath {
                    path: key.clone(),
                    details: e.to_string(),
                });
            }
        }

        for (key, version) in claims {
            self.slots
                .entry(key)
                .or_insert_with(|| PathSlot {
                    version,
                    methods: HashMap::new(),
                })
                .methods
                .insert(method.clone(), index);
        }

        if let Some(name) = entry.name() {
            self.names.insert(name.to_string());
        }

        route_event!(debug, method = %method, template = %entry.template(), "route registered");
        self.registered.push(Registered {
            method,
            entry,
            handler,
        });
        Ok(())
    }

    /// Match a request method and path
    pub fn at(&self, method: &Method, path: &str) -> RouteMatch<'_, T> {
        let matched = match self.inner.at(path) {
            Ok(matched) => matched,
            Err(_) => return RouteMatch::NotFound,
        };

        let Some(slot) = self.slots.get(matched.value) else {
            return RouteMatch::NotFound;
        };

        match slot.methods.get(method) {
            Some(&index) => {
                let registered = &self.registered[index];
                let params = matched
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();

                RouteMatch::Found {
                    handler: &registered.handler,
                    entry: &registered.entry,
                    version: slot.version,
                    params,
                }
            }
            None => {
                let mut allowed: Vec<Method> = slot.methods.keys().cloned().collect();
                allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
                RouteMatch::MethodNotAllowed { allowed }
            }
        }
    }

    /// Versions served for `method` and `fragment`, ascending
    pub fn versions_for(&self, method: &Method, fragment: &str) -> Vec<u32> {
        let mut versions: Vec<u32> = self
            .registered
            .iter()
            .filter(|r| r.method == *method && r.entry.fragment() == fragment)
            .flat_map(|r| r.entry.versions().iter().copied())
            .collect();
        versions.sort_unstable();
        versions.dedup();
        versions
    }

    /// Registered routes in registration order
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &RouteEntry, &T)> {
        self.registered
            .iter()
            .map(|r| (&r.method, &r.entry, &r.handler))
    }

    /// Find a registered route by name
    pub fn named(&self, name: &str) -> Option<(&Method, &RouteEntry)> {
        self.registered
            .iter()
            .find(|r| r.entry.name() == Some(name))
            .map(|r| (&r.method, &r.entry))
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether no route has been registered
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

impl<T> std::fmt::Debug for VersionedRouter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionedRouter")
            .field("routes", &self.registered.len())
            .field("paths", &self.slots.len())
            .field("names", &self.names)
            .finish()
    }
}

impl<T> Default for VersionedRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteHost<(Method, T)> for VersionedRouter<T> {
    fn register(&mut self, entry: RouteEntry, (method, handler): (Method, T)) -> Result<(), RegistrationError> {
        self.insert(method, entry, handler)
    }
}

/// Matcher holding exactly the committed paths
fn rebuild_matcher(slots: &HashMap<String, PathSlot>) -> MatchitRouter<String> {
    let mut matcher = MatchitRouter::new();
    for key in slots.keys() {
        // Every committed key was accepted once already
        let _ = matcher.insert(key.clone(), key.clone());
    }
    matcher
}

/// Convert `{param}` style to matchit's `:param` / `*param`
///
/// Constraints and the optional marker are dropped (`{id:int}` and `{id?}`
/// both become `:id`), and `{*rest}` becomes the catch-all `*rest`. A `:` or
/// `*` outside braces would be read by matchit as a parameter, so it is
/// rejected.
fn convert_path_params(path: &str) -> Result<String, RegistrationError> {
    let invalid = |details: &str| RegistrationError::InvalidPath {
        path: path.to_string(),
        details: details.to_string(),
    };

    let mut result = String::with_capacity(path.len());
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                // Constraints may carry their own braces, e.g. `regex(\d{3})`
                let mut depth = 1;
                let mut param = String::new();
                for inner in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    if depth == 0 {
                        break;
                    }
                    param.push(inner);
                }
                if depth != 0 {
                    return Err(invalid("unclosed parameter brace"));
                }

                let name = param.split(':').next().unwrap_or_default().trim();
                let (marker, name) = match name.strip_prefix('*') {
                    Some(rest) => ('*', rest.trim_start_matches('*')),
                    None => (':', name),
                };
                let name = name.trim_end_matches('?');
                if name.is_empty() {
                    return Err(invalid("parameter name is empty"));
                }
                result.push(marker);
                result.push_str(name);
            }
            '}' => return Err(invalid("unmatched closing brace")),
            ':' | '*' => {
                return Err(invalid("':' and '*' are only allowed inside a {parameter}"));
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}
