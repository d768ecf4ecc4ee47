use crate::error::TableDispatchError;

/// Every operation a route string can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Scan,
    Describe,
    Column,
    Order,
    Where,
    InsertOne,
    InsertMany,
    Update,
    Delete,
}

fn normalize(route: &str) -> &str {
    route.strip_prefix('/').unwrap_or(route)
}

impl Route {
    /// Resolve a read route. A missing or empty route is a full scan.
    ///
    /// # Errors
    /// Returns `TableDispatchError::UndefinedRoute` for anything else.
    pub fn for_get(route: Option<&str>) -> Result<Self, TableDispatchError> {
        let Some(raw) = route else {
            return Ok(Route::Scan);
        };
        match normalize(raw) {
            "" | "scan" => Ok(Route::Scan),
            "describe" | "table" => Ok(Route::Describe),
            "column" => Ok(Route::Column),
            "order" => Ok(Route::Order),
            "where" => Ok(Route::Where),
            _ => Err(TableDispatchError::UndefinedRoute(raw.to_owned())),
        }
    }

    /// Resolve a write route. Any route mentioning `insert` picks its arity from the suffix.
    ///
    /// # Errors
    /// Returns `TableDispatchError::UndefinedRoute` for unknown routes and unknown insert
    /// suffixes.
    pub fn for_post(route: &str) -> Result<Self, TableDispatchError> {
        let name = normalize(route);
        if name.contains("insert") {
            if name.ends_with("many") {
                return Ok(Route::InsertMany);
            }
            if name.ends_with("one") {
                return Ok(Route::InsertOne);
            }
            return Err(TableDispatchError::UndefinedRoute(route.to_owned()));
        }
        match name {
            "update" => Ok(Route::Update),
            "delete" => Ok(Route::Delete),
            _ => Err(TableDispatchError::UndefinedRoute(route.to_owned())),
        }
    }

    #[must_use]
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Route::InsertOne | Route::InsertMany | Route::Update | Route::Delete
        )
    }
}
