use thiserror::Error;

/// Every failure a dispatcher or table store call can surface.
///
/// Engine failures are carried through untouched; everything else is a contract violation
/// detected before a statement reaches the engine.
#[derive(Debug, Error)]
pub enum TableDispatchError {
    /// The engine rejected a statement (malformed SQL, constraint violation, closed connection).
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Payload missing, wrong length, or wrong element type for the route.
    #[error("{0}")]
    Shape(String),

    /// A fragment destined for statement text tripped the denylist.
    #[error("Invalid payload - looks like injection attempt: {0:?}")]
    InjectionSuspected(String),

    /// A concatenated identifier is not part of the table catalog.
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// The route does not name any known operation.
    #[error("Undefined route: {0}")]
    UndefinedRoute(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TableDispatchError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        TableDispatchError::Shape(msg.into())
    }

    /// True when the call was refused before any statement ran.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TableDispatchError::Sqlite(_))
    }
}
