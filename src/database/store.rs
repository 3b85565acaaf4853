//! Contrato de acceso a la base de datos alojada
//!
//! Toda la persistencia pasa por `TableStore`: leer una tabla completa,
//! insertar un registro, actualizar o borrar por igualdad sobre un campo.
//! No hay paginación ni filtros en el backend; la aplicación filtra después
//! de leer todo.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Una fila tal como la devuelve el backend
pub type Record = Map<String, Value>;

/// Tablas que usa la aplicación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Deliveries,
    Vehicles,
    Drivers,
    Depots,
    OptimizedRoutes,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Deliveries => "deliveries",
            Table::Vehicles => "vehicles",
            Table::Drivers => "drivers",
            Table::Depots => "depots",
            Table::OptimizedRoutes => "optimized_routes",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores de los backends de persistencia
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Database error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid column name: {0}")]
    InvalidIdentifier(String),

    #[error("Record must be a JSON object")]
    NotAnObject,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TableStore: Send + Sync {
    /// Todas las filas de la tabla
    async fn get(&self, table: Table) -> StoreResult<Vec<Record>>;

    /// Insertar un registro; devuelve las filas guardadas
    async fn insert(&self, table: Table, record: Record) -> StoreResult<Vec<Record>>;

    /// Actualización parcial de todas las filas con `field == value`
    async fn update(
        &self,
        table: Table,
        changes: Record,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Record>>;

    /// Borrar todas las filas con `field == value`
    async fn delete(&self, table: Table, field: &str, value: &Value) -> StoreResult<Vec<Record>>;

    /// Dejar `flag = true` solo en las filas con `key_field == key_value` y
    /// `false` en el resto, como una única operación del backend.
    ///
    /// Devuelve cuántas filas quedaron marcadas. Con 0 no se toca nada.
    async fn set_exclusive_flag(
        &self,
        table: Table,
        flag: &str,
        key_field: &str,
        key_value: &Value,
    ) -> StoreResult<usize>;
}

/// Serializar un modelo a registro
pub fn to_record<T: Serialize>(value: &T) -> StoreResult<Record> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

/// Decodificar las filas de una tabla en modelos tipados
pub fn from_records<T: DeserializeOwned>(rows: Vec<Record>) -> StoreResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(StoreError::from))
        .collect()
}

/// Representación textual de un valor para comparaciones de igualdad.
/// Coincide con `columna::text` en PostgreSQL y con el filtro `eq.` de PostgREST.
pub fn filter_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Comparación de igualdad tolerante al tipo (7 == "7")
pub fn values_match(candidate: Option<&Value>, expected: &Value) -> bool {
    match candidate {
        Some(v) => v == expected || filter_literal(v) == filter_literal(expected),
        None => false,
    }
}

/// Solo se aceptan nombres de columna simples
pub fn check_identifier(name: &str) -> StoreResult<&str> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(name)
    } else {
        Err(StoreError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_literal() {
        assert_eq!(filter_literal(&json!("TRK1")), "TRK1");
        assert_eq!(filter_literal(&json!(42)), "42");
        assert_eq!(filter_literal(&json!(true)), "true");
    }

    #[test]
    fn test_values_match_across_types() {
        assert!(values_match(Some(&json!(7)), &json!("7")));
        assert!(values_match(Some(&json!("abc")), &json!("abc")));
        assert!(!values_match(Some(&json!(false)), &json!(true)));
        assert!(!values_match(None, &json!(1)));
    }

    #[test]
    fn test_check_identifier() {
        assert!(check_identifier("tracking_number").is_ok());
        assert!(check_identifier("is_default").is_ok());
        assert!(check_identifier("id; DROP TABLE depots").is_err());
        assert!(check_identifier("1abc").is_err());
        assert!(check_identifier("").is_err());
    }

    #[test]
    fn test_to_record_rejects_scalars() {
        assert!(matches!(to_record(&5), Err(StoreError::NotAnObject)));
        let record = to_record(&json!({"status": "pending"})).unwrap();
        assert_eq!(record["status"], "pending");
    }
}
