use serde_json::Value as JsonValue;

use super::guard::Guard;
use super::route::Route;
use crate::error::TableDispatchError;
use crate::types::{Comparator, RowValues, SortOrder};

const NEED_TWO: &str = "Invalid payload - needs to be at least 2 items";
const EMPTY_PROJECTION: &str = "Invalid projection payload - needs at least 1 column";

/// Filter over the bound table, optionally projected and ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereRequest {
    pub column: String,
    pub target: RowValues,
    pub comparator: Comparator,
    /// When set, rows are projected to these columns and ordered by `column`.
    pub projection: Option<Vec<String>>,
    pub ascending: bool,
}

impl WhereRequest {
    #[must_use]
    pub fn new(column: impl Into<String>, target: impl Into<RowValues>) -> Self {
        Self {
            column: column.into(),
            target: target.into(),
            comparator: Comparator::Eq,
            projection: None,
            ascending: true,
        }
    }

    #[must_use]
    pub fn comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    #[must_use]
    pub fn project<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub set_column: String,
    pub new_value: RowValues,
    pub match_column: String,
    pub match_value: RowValues,
}

/// A fully decoded call. Built from a route and payload, or directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Scan,
    Describe,
    Column(String),
    Order {
        order_by: String,
        columns: Vec<String>,
        order: SortOrder,
    },
    Where(WhereRequest),
    InsertOne(Vec<RowValues>),
    InsertMany(Vec<Vec<RowValues>>),
    Update(UpdateRequest),
    Delete {
        column: String,
        value: RowValues,
    },
}

impl Request {
    /// Decode a read call. Every identifier is guarded as soon as it is read from the payload.
    ///
    /// # Errors
    /// `UndefinedRoute`, `Shape`, `InjectionSuspected` or `UnknownIdentifier`.
    pub fn from_get(
        route: Option<&str>,
        payload: Option<&[JsonValue]>,
        guard: &Guard,
    ) -> Result<Self, TableDispatchError> {
        match Route::for_get(route)? {
            Route::Scan => Ok(Request::Scan),
            Route::Describe => Ok(Request::Describe),
            Route::Column => decode_column(payload, guard),
            Route::Order => decode_order(payload, guard),
            Route::Where => decode_where(payload, guard).map(Request::Where),
            other => Err(TableDispatchError::UndefinedRoute(format!(
                "{other:?} is not a read route"
            ))),
        }
    }

    /// Decode a write call. Route and payload are both required.
    ///
    /// # Errors
    /// `UndefinedRoute`, `Shape`, `InjectionSuspected` or `UnknownIdentifier`.
    pub fn from_post(
        route: Option<&str>,
        payload: Option<&[JsonValue]>,
        guard: &Guard,
    ) -> Result<Self, TableDispatchError> {
        let (Some(route), Some(payload)) = (route, payload) else {
            return Err(TableDispatchError::shape("Need valid URL and payload"));
        };
        match Route::for_post(route)? {
            Route::InsertOne => Ok(Request::InsertOne(decode_row(payload)?)),
            Route::InsertMany => Ok(Request::InsertMany(
                payload
                    .iter()
                    .map(|row| match row {
                        JsonValue::Array(values) => decode_row(values),
                        _ => Err(TableDispatchError::shape(
                            "Invalid payload - insert_many needs a list of rows",
                        )),
                    })
                    .collect::<Result<_, _>>()?,
            )),
            Route::Update => decode_update(payload, guard),
            Route::Delete => decode_delete(payload, guard),
            other => Err(TableDispatchError::UndefinedRoute(format!(
                "{other:?} is not a write route"
            ))),
        }
    }

    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Request::InsertOne(_) | Request::InsertMany(_) | Request::Update(_) | Request::Delete { .. }
        )
    }

    /// Guard every fragment this request would concatenate into statement text.
    ///
    /// # Errors
    /// `Shape`, `InjectionSuspected` or `UnknownIdentifier`.
    pub fn validate(&self, guard: &Guard) -> Result<(), TableDispatchError> {
        match self {
            Request::Scan | Request::Describe | Request::InsertOne(_) | Request::InsertMany(_) => {
                Ok(())
            }
            Request::Column(column) => guard.check_identifier(column),
            Request::Order {
                order_by, columns, ..
            } => {
                guard.check_identifier(order_by)?;
                check_projection(guard, columns)
            }
            Request::Where(req) => {
                guard.check_identifier(&req.column)?;
                check_target(guard, &req.target)?;
                match &req.projection {
                    Some(columns) => check_projection(guard, columns),
                    None => Ok(()),
                }
            }
            Request::Update(req) => {
                guard.check_identifier(&req.set_column)?;
                guard.check_identifier(&req.match_column)
            }
            Request::Delete { column, .. } => guard.check_identifier(column),
        }
    }
}

fn check_target(guard: &Guard, target: &RowValues) -> Result<(), TableDispatchError> {
    match target {
        RowValues::Text(target) => guard.check_fragment(target),
        _ => Ok(()),
    }
}

fn check_projection(guard: &Guard, columns: &[String]) -> Result<(), TableDispatchError> {
    if columns.is_empty() {
        return Err(TableDispatchError::shape(EMPTY_PROJECTION));
    }
    columns.iter().try_for_each(|c| guard.check_identifier(c))
}

/// String element at `idx`, guarded as an identifier.
fn ident_at(payload: &[JsonValue], idx: usize, guard: &Guard) -> Result<String, TableDispatchError> {
    let ident = match payload.get(idx) {
        Some(value) => guard.check_value(value)?,
        None => return Err(TableDispatchError::shape("Invalid non-string payload")),
    };
    guard.check_identifier(ident)?;
    Ok(ident.to_owned())
}

/// Scalar element at `idx`; text targets go through the denylist.
fn target_at(payload: &[JsonValue], idx: usize, guard: &Guard) -> Result<RowValues, TableDispatchError> {
    if let Some(JsonValue::String(s)) = payload.get(idx) {
        guard.check_fragment(s)?;
    }
    RowValues::from_json(&payload[idx])
}

fn column_list(value: &JsonValue, guard: &Guard) -> Result<Vec<String>, TableDispatchError> {
    let JsonValue::Array(items) = value else {
        return Err(TableDispatchError::shape(
            "Invalid projection payload - expected a list of column names",
        ));
    };
    if items.is_empty() {
        return Err(TableDispatchError::shape(EMPTY_PROJECTION));
    }
    (0..items.len()).map(|idx| ident_at(items, idx, guard)).collect()
}

fn comparator_at(payload: &[JsonValue], idx: usize) -> Result<Comparator, TableDispatchError> {
    match payload.get(idx) {
        Some(JsonValue::String(s)) => s.parse(),
        _ => Err(TableDispatchError::shape("Invalid comparison payload")),
    }
}

fn decode_row(values: &[JsonValue]) -> Result<Vec<RowValues>, TableDispatchError> {
    if values.is_empty() {
        return Err(TableDispatchError::shape(
            "Invalid payload - insert row needs at least 1 value",
        ));
    }
    values.iter().map(RowValues::from_json).collect()
}

fn decode_where(
    payload: Option<&[JsonValue]>,
    guard: &Guard,
) -> Result<WhereRequest, TableDispatchError> {
    let payload = payload.unwrap_or_default();
    if payload.len() < 2 {
        return Err(TableDispatchError::shape(NEED_TWO));
    }
    if payload.len() > 5 {
        return Err(TableDispatchError::shape(
            "Invalid payload - needs at most 5 items",
        ));
    }
    let column = ident_at(payload, 0, guard)?;
    let mut req = WhereRequest::new(column, target_at(payload, 1, guard)?);
    match payload.len() {
        2 => {}
        3 => req.comparator = comparator_at(payload, 2)?,
        len => {
            req.projection = Some(column_list(&payload[2], guard)?);
            req.comparator = comparator_at(payload, 3)?;
            if len == 5 {
                let JsonValue::Bool(ascending) = payload[4] else {
                    return Err(TableDispatchError::shape("Invalid non-boolean payload"));
                };
                req.ascending = ascending;
            }
        }
    }
    Ok(req)
}

fn decode_column(payload: Option<&[JsonValue]>, guard: &Guard) -> Result<Request, TableDispatchError> {
    match payload {
        Some(p) if p.len() == 1 => Ok(Request::Column(ident_at(p, 0, guard)?)),
        _ => Err(TableDispatchError::shape(
            "Invalid payload - column route needs exactly 1 item",
        )),
    }
}

fn decode_order(payload: Option<&[JsonValue]>, guard: &Guard) -> Result<Request, TableDispatchError> {
    let payload = payload.unwrap_or_default();
    if !(2..=3).contains(&payload.len()) {
        return Err(TableDispatchError::shape(
            "Invalid payload - order route needs 2 or 3 items",
        ));
    }
    let order_by = ident_at(payload, 0, guard)?;
    let columns = column_list(&payload[1], guard)?;
    let order = match payload.get(2) {
        None => SortOrder::Descending,
        Some(JsonValue::Bool(ascending)) => SortOrder::from_ascending(*ascending),
        Some(_) => return Err(TableDispatchError::shape("Invalid non-boolean payload")),
    };
    Ok(Request::Order {
        order_by,
        columns,
        order,
    })
}

fn decode_update(payload: &[JsonValue], guard: &Guard) -> Result<Request, TableDispatchError> {
    if payload.len() != 4 {
        return Err(TableDispatchError::shape(
            "Invalid payload length for update method",
        ));
    }
    let set_column = ident_at(payload, 0, guard)?;
    let match_column = ident_at(payload, 2, guard)?;
    Ok(Request::Update(UpdateRequest {
        set_column,
        new_value: RowValues::from_json(&payload[1])?,
        match_column,
        match_value: RowValues::from_json(&payload[3])?,
    }))
}

fn decode_delete(payload: &[JsonValue], guard: &Guard) -> Result<Request, TableDispatchError> {
    if payload.len() != 2 {
        return Err(TableDispatchError::shape(
            "Invalid payload length for delete method",
        ));
    }
    Ok(Request::Delete {
        column: ident_at(payload, 0, guard)?,
        value: RowValues::from_json(&payload[1])?,
    })
}
