use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::error::TableDispatchError;

const DENYLIST: [&str; 3] = [";", "DROP", "TRUNCATE"];

/// Checks applied to every string fragment that is concatenated into statement text.
///
/// The denylist is a substring heuristic: it rejects `;`, `DROP`, `TRUNCATE` and the bound
/// table's own name, and lets everything else through. When a column catalog is attached,
/// identifiers must additionally be known columns of the table.
#[derive(Debug, Clone)]
pub struct Guard {
    table: String,
    columns: Option<HashSet<String>>,
}

impl Guard {
    /// Denylist only.
    #[must_use]
    pub fn denylist(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
        }
    }

    /// Denylist plus a column allow-list. Column names match ASCII case-insensitively, as
    /// SQLite identifiers do.
    #[must_use]
    pub fn with_catalog<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: Some(
                columns
                    .into_iter()
                    .map(|c| Into::<String>::into(c).to_ascii_lowercase())
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.columns.is_some()
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Denylist check on a raw fragment.
    ///
    /// # Errors
    /// Returns `TableDispatchError::InjectionSuspected` when the fragment contains a denylisted
    /// substring or the table name.
    pub fn check_fragment(&self, fragment: &str) -> Result<(), TableDispatchError> {
        let suspicious = DENYLIST.iter().any(|bad| fragment.contains(bad))
            || fragment.contains(self.table.as_str());
        if suspicious {
            return Err(TableDispatchError::InjectionSuspected(fragment.to_owned()));
        }
        Ok(())
    }

    /// Require a string payload element and run the denylist over it.
    ///
    /// # Errors
    /// `Shape` for non-strings, `InjectionSuspected` for denylisted content.
    pub fn check_value<'v>(&self, value: &'v JsonValue) -> Result<&'v str, TableDispatchError> {
        let JsonValue::String(s) = value else {
            return Err(TableDispatchError::shape("Invalid non-string payload"));
        };
        self.check_fragment(s)?;
        Ok(s)
    }

    /// Denylist plus, in strict mode, catalog membership.
    ///
    /// # Errors
    /// `InjectionSuspected` or `UnknownIdentifier`.
    pub fn check_identifier(&self, ident: &str) -> Result<(), TableDispatchError> {
        self.check_fragment(ident)?;
        match &self.columns {
            Some(columns) if !columns.contains(&ident.to_ascii_lowercase()) => {
                Err(TableDispatchError::UnknownIdentifier(format!(
                    "column {ident:?} is not in table {}",
                    self.table
                )))
            }
            _ => Ok(()),
        }
    }
}
