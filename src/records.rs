//! # Record Loading
//!
//! Builds model instances from rows of JSON cells. This is the use case the
//! provider is made for: the column schema is only known at runtime, but every
//! row of a batch has the same shape.
//!
//! A [`RecordLoader`] turns its column schema into a [`Signature`], resolves the
//! matching constructor **once**, and then runs each row through the same
//! invoker:
//!
//! ```text
//! schema ["user_id", "text", "text"]  ->  signature (UserId, String, String)  ->  User::new
//! row    [1, "Alice", "alice@example.com"]  ->  args  ->  User { .. }
//! ```
//!
//! Cells are converted by their column type, never by guessing from the JSON
//! value. A row with the wrong number of cells reaches the invoker as-is, so the
//! invoker's arity check reports it.

use ctor_provider::{
    ConstructorProvider, InvokeError, Invoker, ResolveError, Signature, TypeKey, Value,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use tracing::{debug, info, warn};

use crate::model::{OrderId, ProductId, UserId};

/// Declared type of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// `i64`
    Int,
    /// `u32`
    Count,
    /// `f64`
    Float,
    /// `String`
    Text,
    /// `bool`
    Bool,
    UserId,
    ProductId,
    OrderId,
}

/// A cell that does not fit its column.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CellError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: ColumnType,
        found: &'static str,
    },
    #[error("{value} is out of range for {column}")]
    OutOfRange { column: ColumnType, value: String },
}

impl ColumnType {
    /// The parameter type this column feeds.
    pub fn type_key(&self) -> TypeKey {
        match self {
            ColumnType::Int => TypeKey::of::<i64>(),
            ColumnType::Count => TypeKey::of::<u32>(),
            ColumnType::Float => TypeKey::of::<f64>(),
            ColumnType::Text => TypeKey::of::<String>(),
            ColumnType::Bool => TypeKey::of::<bool>(),
            ColumnType::UserId => TypeKey::of::<UserId>(),
            ColumnType::ProductId => TypeKey::of::<ProductId>(),
            ColumnType::OrderId => TypeKey::of::<OrderId>(),
        }
    }

    /// Converts a JSON cell into an argument of [`type_key`](Self::type_key)'s type.
    pub fn to_value(&self, cell: &serde_json::Value) -> Result<Value, CellError> {
        use serde_json::Value as Json;

        let mismatch = || CellError::Mismatch {
            expected: *self,
            found: json_kind(cell),
        };

        match (self, cell) {
            (ColumnType::Int, Json::Number(n)) => n.as_i64().map(Value::new).ok_or_else(mismatch),
            (ColumnType::Float, Json::Number(n)) => {
                n.as_f64().map(Value::new).ok_or_else(mismatch)
            }
            (ColumnType::Text, Json::String(s)) => Ok(Value::new(s.clone())),
            (ColumnType::Bool, Json::Bool(b)) => Ok(Value::new(*b)),
            (ColumnType::Count, Json::Number(_)) => self.to_u32(cell).map(Value::new),
            (ColumnType::UserId, Json::Number(_)) => {
                self.to_u32(cell).map(|id| Value::new(UserId(id)))
            }
            (ColumnType::ProductId, Json::Number(_)) => {
                self.to_u32(cell).map(|id| Value::new(ProductId(id)))
            }
            (ColumnType::OrderId, Json::Number(_)) => {
                self.to_u32(cell).map(|id| Value::new(OrderId(id)))
            }
            _ => Err(mismatch()),
        }
    }

    fn to_u32(&self, cell: &serde_json::Value) -> Result<u32, CellError> {
        let out_of_range = || CellError::OutOfRange {
            column: *self,
            value: cell.to_string(),
        };
        match (cell.as_u64(), cell.as_i64()) {
            (Some(n), _) => u32::try_from(n).map_err(|_| out_of_range()),
            // Negative integer
            (None, Some(_)) => Err(out_of_range()),
            (None, None) => Err(CellError::Mismatch {
                expected: *self,
                found: json_kind(cell),
            }),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::Count => "count",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Bool => "bool",
            ColumnType::UserId => "user_id",
            ColumnType::ProductId => "product_id",
            ColumnType::OrderId => "order_id",
        };
        f.write_str(name)
    }
}

fn json_kind(cell: &serde_json::Value) -> &'static str {
    match cell {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Errors while loading records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Schema has no matching constructor: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Row {row}: {source}")]
    Invoke { row: usize, source: InvokeError },

    #[error("Row {row}, column {column}: {source}")]
    Cell {
        row: usize,
        column: usize,
        source: CellError,
    },

    #[error("Row {row}: expected an array, found {found}")]
    RowShape { row: usize, found: &'static str },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads rows into `T` through one resolved constructor.
#[derive(Debug, Clone)]
pub struct RecordLoader<T> {
    columns: Vec<ColumnType>,
    invoker: Invoker<T>,
}

impl<T: Any> RecordLoader<T> {
    /// Resolves the constructor of `T` whose parameters match `columns`.
    pub fn new<P: ConstructorProvider>(
        provider: &P,
        columns: Vec<ColumnType>,
    ) -> Result<Self, LoadError> {
        let signature: Signature = columns.iter().map(ColumnType::type_key).collect();
        let invoker = provider.get_invoker::<T>(&signature)?;
        info!(target_type = %invoker.target(), %signature, "Record loader ready");
        Ok(Self { columns, invoker })
    }

    /// Same as [`new`](Self::new), with the schema given as a JSON array of column names.
    pub fn from_schema_json<P: ConstructorProvider>(
        provider: &P,
        schema: &str,
    ) -> Result<Self, LoadError> {
        let columns: Vec<ColumnType> = serde_json::from_str(schema)?;
        Self::new(provider, columns)
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }

    pub fn invoker(&self) -> &Invoker<T> {
        &self.invoker
    }

    /// Builds one `T` from one row. `row` is the index used in error messages.
    pub fn load_row(&self, row: usize, cells: &serde_json::Value) -> Result<T, LoadError> {
        let cells = cells.as_array().ok_or(LoadError::RowShape {
            row,
            found: json_kind(cells),
        })?;

        let mut args = Vec::with_capacity(cells.len());
        for (column, cell) in cells.iter().enumerate() {
            let arg = match self.columns.get(column) {
                Some(kind) => kind
                    .to_value(cell)
                    .map_err(|source| LoadError::Cell { row, column, source })?,
                // Extra cell: passed through so the invoker reports the arity.
                None => Value::new(cell.clone()),
            };
            args.push(arg);
        }

        self.invoker
            .invoke(args)
            .map_err(|source| LoadError::Invoke { row, source })
    }

    /// Builds one `T` per row, stopping at the first bad row.
    pub fn load_all(&self, rows: &[serde_json::Value]) -> Result<Vec<T>, LoadError> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(row, cells)| self.load_row(row, cells))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!(error = %e, "Load failed"))?;
        debug!(target_type = %self.invoker.target(), count = records.len(), "Loaded records");
        Ok(records)
    }

    /// Parses `json` as an array of rows and loads them all.
    pub fn load_json(&self, json: &str) -> Result<Vec<T>, LoadError> {
        let rows: Vec<serde_json::Value> = serde_json::from_str(json)?;
        self.load_all(&rows)
    }
}
