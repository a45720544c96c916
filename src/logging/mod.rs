//! Structured logging utilities.
//!
//! Provides the tracing filter construction used at startup and the
//! operation ID generation that correlates every engine operation's log
//! lines, from the initial request through its resolution.

use uuid::Uuid;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use serverdeck::config::{LogFormat, LoggingConfig};
/// use serverdeck::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("state".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,serverdeck::state=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",serverdeck::{}={}", component, level));
        }
    }

    filter_str
}

/// Generate a new operation ID using UUID v4
///
/// Returns a unique correlation ID that ties together the log lines of a
/// single engine operation, from invocation through resolution.
///
/// # Examples
///
/// ```
/// use serverdeck::logging::generate_operation_id;
///
/// let operation_id = generate_operation_id();
/// assert!(!operation_id.is_empty());
/// ```
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}
