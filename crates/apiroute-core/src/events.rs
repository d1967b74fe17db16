//! Resolution and registration events
//!
//! Route resolution runs once per declaration at startup. Hosts embedding
//! the core without a subscriber can drop the `tracing` feature, and every
//! event below compiles to nothing.

/// Emit a `tracing` event at the given level (`error`, `warn`, `debug`).
///
/// ```ignore
/// route_event!(warn, path = %path, "route shadowed by lower order route");
/// ```
macro_rules! route_event {
    ($level:ident, $($field:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::$level!($($field)*);
    }};
}
