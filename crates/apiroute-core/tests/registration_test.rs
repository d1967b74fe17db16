use apiroute_core::{
    register_all, AppSettings, CurrentVersionSource, RegistrationError, RouteDeclaration,
    RouteError, RouteMatch, VersionedRouter, CURRENT_API_VERSION_KEY,
};
use http::Method;
use std::cell::RefCell;

/// Settings double that records every lookup
struct RecordingSettings {
    value: Option<String>,
    lookups: RefCell<usize>,
}

impl RecordingSettings {
    fn returning(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            lookups: RefCell::new(0),
        }
    }
}

impl CurrentVersionSource for RecordingSettings {
    fn current_api_version(&self) -> Option<String> {
        *self.lookups.borrow_mut() += 1;
        self.value.clone()
    }
}

fn gaming_groups() -> RouteDeclaration {
    RouteDeclaration::new("GamingGroups").unwrap()
}

#[test]
fn test_negative_current_version_is_a_configuration_error() {
    let settings = RecordingSettings::returning("-1");
    let err = gaming_groups().create_route(&settings).unwrap_err();

    assert_eq!(
        err.to_string(),
        "The 'currentApiVersion' app setting must be a positive integer."
    );
    assert_eq!(*settings.lookups.borrow(), 1);
}

#[test]
fn test_route_supports_all_versions_up_to_current() {
    let settings = RecordingSettings::returning("3");
    let entry = gaming_groups().create_route(&settings).unwrap();

    assert_eq!(entry.template(), "api/v{version:int:regex(1|2|3)}/GamingGroups");
}

#[test]
fn test_route_supports_specified_versions() {
    let settings = RecordingSettings::returning("50");
    let entry = gaming_groups()
        .accepted_versions([2, 3, 4])
        .create_route(&settings)
        .unwrap();

    assert_eq!(entry.template(), "api/v{version:int:regex(2|3|4)}/GamingGroups");
    assert_eq!(*settings.lookups.borrow(), 0);
}

#[test]
fn test_non_positive_accepted_version_rejected() {
    let settings = RecordingSettings::returning("50");
    let err = gaming_groups()
        .accepted_versions([2, 3, -4])
        .create_route(&settings)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "The explicitly specified AcceptedVersion values must all be positive integers."
    );
}

#[test]
fn test_route_from_starting_version_to_current() {
    let settings = RecordingSettings::returning("4");
    let entry = gaming_groups()
        .starting_version(2)
        .create_route(&settings)
        .unwrap();

    assert_eq!(entry.template(), "api/v{version:int:regex(2|3|4)}/GamingGroups");
}

#[test]
fn test_both_constraints_rejected() {
    let settings = RecordingSettings::returning("50");
    let err = gaming_groups()
        .accepted_versions([2])
        .starting_version(1)
        .create_route(&settings)
        .unwrap_err();

    assert_eq!(err, RouteError::ConflictingConstraints);
}

#[test]
fn test_starting_version_above_current_rejected() {
    let settings = RecordingSettings::returning("1");
    let err = gaming_groups()
        .starting_version(2)
        .create_route(&settings)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "The 'StartingVersion' cannot be greater than the 'currentApiVersion' specified in the config."
    );
}

#[test]
fn test_resolution_is_repeatable() {
    let settings = AppSettings::new().with(CURRENT_API_VERSION_KEY, "6");
    let declaration = gaming_groups().starting_version(3).name("groups").order(2);

    let first = declaration.create_route(&settings).unwrap();
    let second = declaration.create_route(&settings).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.name(), Some("groups"));
    assert_eq!(first.order(), 2);
}

#[test]
fn test_startup_registration_against_router() {
    let settings = AppSettings::new().with(CURRENT_API_VERSION_KEY, "14");
    let mut router = VersionedRouter::new();

    let routes = vec![
        (RouteDeclaration::new("Examples/").unwrap(), (Method::POST, "post")),
        (
            RouteDeclaration::new("Examples/").unwrap().accepted_versions([1]),
            (Method::GET, "get"),
        ),
        (
            RouteDeclaration::new("Examples/")
                .unwrap()
                .accepted_versions([2, 3, 4, 5, 6]),
            (Method::GET, "some_breaking_change"),
        ),
        (
            RouteDeclaration::new("Examples/")
                .unwrap()
                .accepted_versions([7, 8, 9, 10, 11, 12]),
            (Method::GET, "yet_another_breaking_change"),
        ),
        (
            RouteDeclaration::new("Examples/").unwrap().starting_version(13),
            (Method::GET, "latest_breaking_change"),
        ),
    ];

    assert_eq!(register_all(&mut router, &settings, routes).unwrap(), 5);

    let templates: Vec<&str> = router.routes().map(|(_, entry, _)| entry.template()).collect();
    assert_eq!(
        templates[4],
        "api/v{version:int:regex(13|14)}/Examples/"
    );

    match router.at(&Method::GET, "/api/v5/Examples/") {
        RouteMatch::Found { handler, version, .. } => {
            assert_eq!(*handler, "some_breaking_change");
            assert_eq!(version, 5);
        }
        _ => panic!("GET /api/v5/Examples/ should be routed"),
    }
}

#[test]
fn test_startup_aborts_on_misconfiguration() {
    let settings = AppSettings::new();
    let mut router: VersionedRouter<&str> = VersionedRouter::new();

    let routes = vec![(
        RouteDeclaration::new("Examples/").unwrap(),
        (Method::GET, "get"),
    )];

    let err = register_all(&mut router, &settings, routes).unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::Route {
            source: RouteError::InvalidConfiguration { value: None },
            ..
        }
    ));
    assert!(router.is_empty());
}
