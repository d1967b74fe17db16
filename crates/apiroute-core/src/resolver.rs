//! Version resolution
//!
//! Turns a validated declaration and the current API version into the
//! concrete list of versions a route answers for:
//!
//! - explicit versions resolve to themselves, in declared order, without
//!   consulting the current version
//! - otherwise the result is the ascending range `[start, current]`, where
//!   `start` is the starting version or 1

use crate::declaration::{validate_constraints, RouteDeclaration};
use crate::error::{Result, RouteError};
use crate::settings::CurrentVersionSource;

/// Resolve the versions a declaration answers for.
///
/// # Errors
///
/// - [`RouteError::ConflictingConstraints`] if both constraints are set
/// - [`RouteError::InvalidVersionValue`] if a declared version is below 1
/// - [`RouteError::InvalidConfiguration`] if the current version is missing or invalid
/// - [`RouteError::RangeViolation`] if the starting version exceeds the current version
pub fn resolve_versions<S>(declaration: &RouteDeclaration, source: &S) -> Result<Vec<u32>>
where
    S: CurrentVersionSource + ?Sized,
{
    let accepted = declaration.declared_versions();
    let starting = declaration.declared_starting_version();
    validate_constraints(accepted, starting)?;

    if let Some(versions) = accepted {
        // Validated positive above, so the conversion is lossless
        return Ok(versions.iter().map(|&v| v.unsigned_abs()).collect());
    }

    let current = current_api_version(source)?;
    let start = starting.map(i32::unsigned_abs).unwrap_or(1);
    version_range(start, current)
}

/// Read and parse the current API version from `source`.
pub fn current_api_version<S>(source: &S) -> Result<u32>
where
    S: CurrentVersionSource + ?Sized,
{
    let raw = source.current_api_version();
    match raw.as_deref().and_then(parse_version_setting) {
        Some(current) => Ok(current),
        None => {
            route_event!(error, value = ?raw, "invalid currentApiVersion setting");
            Err(RouteError::InvalidConfiguration { value: raw })
        }
    }
}

/// Parse a configured version number.
///
/// Surrounding whitespace and a leading `+` are accepted. Anything that is
/// not a positive integer fitting in an `i32` yields `None`.
///
/// # Examples
///
/// ```
/// use apiroute_core::resolver::parse_version_setting;
///
/// assert_eq!(parse_version_setting("3"), Some(3));
/// assert_eq!(parse_version_setting(" +14 "), Some(14));
/// assert_eq!(parse_version_setting("-1"), None);
/// assert_eq!(parse_version_setting("0"), None);
/// assert_eq!(parse_version_setting("three"), None);
/// ```
pub fn parse_version_setting(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match digits.parse::<i32>() {
        Ok(value) if value >= 1 => Some(value.unsigned_abs()),
        _ => None,
    }
}

/// Every version from `start` through `current`, inclusive and ascending.
///
/// The range is materialized, one `u32` per version, and the rendered
/// template then spells each version out in its alternation. Any current
/// version a real API reaches is fine, but a value near `i32::MAX` with a
/// low start asks for gigabytes and aborts on allocation. Only the width of
/// the range matters: `version_range(n, n)` is a single element for any `n`.
///
/// # Errors
///
/// Returns [`RouteError::RangeViolation`] if `start > current`.
pub fn version_range(start: u32, current: u32) -> Result<Vec<u32>> {
    if start > current {
        return Err(RouteError::RangeViolation {
            starting: start,
            current,
        });
    }

    Ok((start..=current).collect())
}
