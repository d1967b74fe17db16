//! Route template rendering
//!
//! Resolved versions are rendered as an integer-constrained regex
//! alternation in front of the declared fragment:
//!
//! ```text
//! api/v{version:int:regex(2|3|4)}/GamingGroups
//! ```
//!
//! The fragment is appended untouched. No slash normalization or case
//! changes happen here.

use crate::declaration::RouteDeclaration;
use serde::Serialize;
use std::fmt::Write as _;

/// Fixed root of every versioned route
pub const API_ROOT: &str = "api";

/// Name of the route parameter carrying the version number
pub const VERSION_PARAMETER: &str = "version";

/// Render the version-qualified route template.
///
/// Versions are joined with `|` in the order given.
///
/// # Examples
///
/// ```
/// use apiroute_core::template::build_template;
///
/// assert_eq!(
///     build_template(&[1, 2, 3], "GamingGroups"),
///     "api/v{version:int:regex(1|2|3)}/GamingGroups"
/// );
/// ```
pub fn build_template(versions: &[u32], fragment: &str) -> String {
    let mut template = String::with_capacity(API_ROOT.len() + fragment.len() + 32 + versions.len() * 3);
    template.push_str(API_ROOT);
    template.push_str("/v{");
    template.push_str(VERSION_PARAMETER);
    template.push_str(":int:regex(");
    for (i, version) in versions.iter().enumerate() {
        if i > 0 {
            template.push('|');
        }
        // Writing to a String cannot fail
        let _ = write!(template, "{}", version);
    }
    template.push_str(")}/");
    template.push_str(fragment);
    template
}

/// Concrete request path for one version of a fragment.
///
/// # Examples
///
/// ```
/// use apiroute_core::template::concrete_path;
///
/// assert_eq!(concrete_path(2, "Examples/"), "/api/v2/Examples/");
/// ```
pub fn concrete_path(version: u32, fragment: &str) -> String {
    format!("/{}/v{}/{}", API_ROOT, version, fragment)
}

/// Extract the version number from an inbound `api/v{n}/...` path.
///
/// A leading `/` is optional. Returns `None` if the path is not rooted at
/// a versioned API segment or the version is not a positive integer.
///
/// # Examples
///
/// ```
/// use apiroute_core::template::parse_version_segment;
///
/// assert_eq!(parse_version_segment("/api/v3/Examples/"), Some(3));
/// assert_eq!(parse_version_segment("api/v12"), Some(12));
/// assert_eq!(parse_version_segment("/api/Examples"), None);
/// assert_eq!(parse_version_segment("/api/v0/Examples"), None);
/// ```
pub fn parse_version_segment(path: &str) -> Option<u32> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut segments = path.split('/');

    if segments.next()? != API_ROOT {
        return None;
    }

    let digits = segments.next()?.strip_prefix('v')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse::<u32>().ok().filter(|&v| v >= 1)
}

/// A resolved, rendered route ready to hand to the routing host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    template: String,
    fragment: String,
    versions: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    order: i32,
}

impl RouteEntry {
    pub(crate) fn new(declaration: &RouteDeclaration, versions: Vec<u32>) -> Self {
        let fragment = declaration.template().to_string();
        let template = build_template(&versions, &fragment);

        route_event!(
            debug,
            template = %template,
            versions = ?versions,
            name = ?declaration.route_name(),
            "resolved versioned route"
        );

        Self {
            template,
            fragment,
            versions,
            name: declaration.route_name().map(str::to_string),
            order: declaration.route_order(),
        }
    }

    /// Rendered route template, e.g. `api/v{version:int:regex(1|2)}/Examples/`
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Declared resource fragment
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Resolved versions in resolution order
    pub fn versions(&self) -> &[u32] {
        &self.versions
    }

    /// Route name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Route order
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Whether this route answers for `version`
    pub fn accepts(&self, version: u32) -> bool {
        self.versions.contains(&version)
    }

    /// One concrete request path per resolved version
    pub fn concrete_paths(&self) -> impl Iterator<Item = (u32, String)> + '_ {
        self.versions
            .iter()
            .map(move |&version| (version, concrete_path(version, &self.fragment)))
    }
}

impl std::fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AppSettings, FixedVersion, CURRENT_API_VERSION_KEY};

    fn settings(current: &str) -> AppSettings {
        AppSettings::new().with(CURRENT_API_VERSION_KEY, current)
    }

    #[test]
    fn test_all_versions_up_to_current() {
        let declaration = RouteDeclaration::new("GamingGroups").unwrap();
        let entry = declaration.create_route(&settings("3")).unwrap();
        assert_eq!(entry.template(), "api/v{version:int:regex(1|2|3)}/GamingGroups");
        assert_eq!(entry.versions(), &[1, 2, 3]);
    }

    #[test]
    fn test_explicit_versions() {
        let declaration = RouteDeclaration::new("GamingGroups")
            .unwrap()
            .accepted_versions([2, 3, 4]);
        let entry = declaration.create_route(&settings("50")).unwrap();
        assert_eq!(entry.template(), "api/v{version:int:regex(2|3|4)}/GamingGroups");
    }

    #[test]
    fn test_starting_version() {
        let declaration = RouteDeclaration::new("GamingGroups")
            .unwrap()
            .starting_version(2);
        let entry = declaration.create_route(&settings("4")).unwrap();
        assert_eq!(entry.template(), "api/v{version:int:regex(2|3|4)}/GamingGroups");
    }

    #[test]
    fn test_fragment_untouched() {
        let declaration = RouteDeclaration::new("Examples/{id}/Items/").unwrap();
        let entry = declaration.create_route(&FixedVersion(1)).unwrap();
        assert_eq!(entry.template(), "api/v{version:int:regex(1)}/Examples/{id}/Items/");
        assert_eq!(entry.fragment(), "Examples/{id}/Items/");
    }

    #[test]
    fn test_metadata_passed_through() {
        let declaration = RouteDeclaration::new("Examples/")
            .unwrap()
            .name("examples-post")
            .order(-3);
        let entry = declaration.create_route(&FixedVersion(2)).unwrap();
        assert_eq!(entry.name(), Some("examples-post"));
        assert_eq!(entry.order(), -3);
        assert_eq!(entry.to_string(), entry.template());
    }

    #[test]
    fn test_render_is_idempotent() {
        let declaration = RouteDeclaration::new("GamingGroups").unwrap().starting_version(2);
        let source = settings("5");
        let first = declaration.create_route(&source).unwrap();
        let second = declaration.create_route(&source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concrete_paths() {
        let declaration = RouteDeclaration::new("Examples/").unwrap().accepted_versions([7, 9]);
        let entry = declaration.create_route(&FixedVersion(1)).unwrap();
        let paths: Vec<_> = entry.concrete_paths().collect();
        assert_eq!(
            paths,
            vec![
                (7, "/api/v7/Examples/".to_string()),
                (9, "/api/v9/Examples/".to_string())
            ]
        );
        assert!(entry.accepts(9));
        assert!(!entry.accepts(8));
    }

    #[test]
    fn test_parse_version_segment() {
        assert_eq!(parse_version_segment("/api/v1/Examples"), Some(1));
        assert_eq!(parse_version_segment("/api/v/Examples"), None);
        assert_eq!(parse_version_segment("/api/vx/Examples"), None);
        assert_eq!(parse_version_segment("/v1/Examples"), None);
        assert_eq!(parse_version_segment(""), None);
    }

    #[test]
    fn test_serialize_entry() {
        let declaration = RouteDeclaration::new("Examples/").unwrap().accepted_versions([1]);
        let entry = declaration.create_route(&FixedVersion(1)).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["template"], "api/v{version:int:regex(1)}/Examples/");
        assert_eq!(json["versions"], serde_json::json!([1]));
        assert!(json.get("name").is_none());
    }
}
