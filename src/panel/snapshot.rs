//! Table snapshots: the values a panel inspects.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{TablescopeError, TablescopeResult};
use crate::value::{Function, Object, Value};

/// Read access to one table instance and its derived row models.
///
/// Every accessor returns a fresh handle; aggregates are shared, not copied.
pub trait TableSnapshot {
    fn instance(&self) -> Value;
    fn state(&self) -> Value;
    fn columns(&self) -> Value;
    fn core_row_model(&self) -> Value;
    fn column_filtered_row_model(&self) -> Value;
    fn global_filtered_row_model(&self) -> Value;
    fn sorted_row_model(&self) -> Value;
    fn grouped_row_model(&self) -> Value;
    fn expanded_row_model(&self) -> Value;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument {
    #[serde(default)]
    state: Option<serde_json::Value>,
    #[serde(default)]
    columns: Option<serde_json::Value>,
    #[serde(default)]
    row_models: RowModelsDocument,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowModelsDocument {
    core: Option<serde_json::Value>,
    column_filtered: Option<serde_json::Value>,
    global_filtered: Option<serde_json::Value>,
    sorted: Option<serde_json::Value>,
    grouped: Option<serde_json::Value>,
    expanded: Option<serde_json::Value>,
}

/// A snapshot captured to a JSON document.
///
/// Missing parts read as `Undefined`. The instance is an object of accessor
/// callables over the captured parts.
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    state: Value,
    columns: Value,
    core: Value,
    column_filtered: Value,
    global_filtered: Value,
    sorted: Value,
    grouped: Value,
    expanded: Value,
}

impl JsonSnapshot {
    pub fn load(path: &Path) -> TablescopeResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| TablescopeError::InvalidSnapshot {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let doc: SnapshotDocument = serde_json::from_str(content)?;
        let part = |json: Option<serde_json::Value>| json.map(Value::from).unwrap_or_default();
        let models = doc.row_models;

        Ok(Self {
            state: part(doc.state),
            columns: part(doc.columns),
            core: part(models.core),
            column_filtered: part(models.column_filtered),
            global_filtered: part(models.global_filtered),
            sorted: part(models.sorted),
            grouped: part(models.grouped),
            expanded: part(models.expanded),
        })
    }
}

fn accessor(name: &str, value: &Value) -> Value {
    let value = value.clone();
    Function::named(name, move || Ok(value.clone())).into()
}

impl TableSnapshot for JsonSnapshot {
    fn instance(&self) -> Value {
        let mut table = Object::with_class("Table");
        for (name, value) in [
            ("getState", &self.state),
            ("getAllColumns", &self.columns),
            ("getCoreRowModel", &self.core),
            ("getColumnFilteredRowModel", &self.column_filtered),
            ("getGlobalFilteredRowModel", &self.global_filtered),
            ("getSortedRowModel", &self.sorted),
            ("getGroupedRowModel", &self.grouped),
            ("getExpandedRowModel", &self.expanded),
        ] {
            table.insert(name, accessor(name, value));
        }
        table.into_value()
    }

    fn state(&self) -> Value {
        self.state.clone()
    }

    fn columns(&self) -> Value {
        self.columns.clone()
    }

    fn core_row_model(&self) -> Value {
        self.core.clone()
    }

    fn column_filtered_row_model(&self) -> Value {
        self.column_filtered.clone()
    }

    fn global_filtered_row_model(&self) -> Value {
        self.global_filtered.clone()
    }

    fn sorted_row_model(&self) -> Value {
        self.sorted.clone()
    }

    fn grouped_row_model(&self) -> Value {
        self.grouped.clone()
    }

    fn expanded_row_model(&self) -> Value {
        self.expanded.clone()
    }
}
