//! Error types for the Flitzy flow core.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Location capture errors.
///
/// `PermissionDenied` and `PositionUnavailable` are degradations: the
/// capture session stays usable with an unresolved selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Current position unavailable: {reason}")]
    PositionUnavailable { reason: String },

    #[error("Invalid region: {reason}")]
    InvalidRegion { reason: String },

    #[error("Unknown address field: {name}")]
    UnknownField { name: String },
}

/// Navigation stack errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("No history to go back to")]
    NoHistory,

    #[error("Unknown route: {name}")]
    UnknownRoute { name: String },

    #[error("Route {route} requires param {param}")]
    MissingParam { route: String, param: String },

    #[error("Invalid params for route {route}: {reason}")]
    InvalidParams { route: String, reason: String },

    #[error("Action belongs to {expected}, but {actual} is active")]
    WrongScreen { expected: String, actual: String },
}

/// Remote catalog errors. Callers on the Home screen degrade to an empty feed.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),
}

/// Errors parsing driver commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid argument {arg}: {reason}")]
    InvalidArgument { arg: String, reason: String },
}

/// Result type alias for the flow core.
pub type Result<T> = std::result::Result<T, Error>;
