//! Backend PostgreSQL directo (SQLx)
//!
//! Alternativa al REST de Supabase cuando se dispone de `DATABASE_URL`.
//! Las filas viajan como JSONB (`to_jsonb` / `jsonb_populate_record`) para
//! mantener el mismo contrato genérico por tabla.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::store::{
    check_identifier, filter_literal, Record, StoreError, StoreResult, Table, TableStore,
};
use crate::config::database::DatabaseConfig;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

fn quote(identifier: &str) -> StoreResult<String> {
    Ok(format!("\"{}\"", check_identifier(identifier)?))
}

fn quoted_columns(record: &Record) -> StoreResult<Vec<String>> {
    record.keys().map(|k| quote(k)).collect()
}

/// Parámetro posicional: JSONB para registros, texto para comparaciones
enum Bind {
    Json(Value),
    Text(String),
}

fn into_record(value: Value) -> StoreResult<Record> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        log::info!("🐘 Conectando a PostgreSQL: {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;
        Ok(Self { pool })
    }

    async fn fetch_rows(&self, sql: &str, binds: Vec<Bind>) -> StoreResult<Vec<Record>> {
        log::debug!("🐘 {}", sql);
        let mut query = sqlx::query_as::<_, (Value,)>(sql);
        for bind in binds {
            query = match bind {
                Bind::Json(value) => query.bind(value),
                Bind::Text(text) => query.bind(text),
            };
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(|(row,)| into_record(row)).collect()
    }
}

#[async_trait]
impl TableStore for PostgresStore {
    async fn get(&self, table: Table) -> StoreResult<Vec<Record>> {
        let sql = format!("SELECT to_jsonb(r) FROM {} AS r", quote(table.as_str())?);
        self.fetch_rows(&sql, Vec::new()).await
    }

    async fn insert(&self, table: Table, record: Record) -> StoreResult<Vec<Record>> {
        let name = quote(table.as_str())?;
        let columns = quoted_columns(&record)?.join(", ");
        let sql = format!(
            "INSERT INTO {name} AS r ({columns}) \
             SELECT {columns} FROM jsonb_populate_record(NULL::{name}, $1) \
             RETURNING to_jsonb(r)"
        );
        self.fetch_rows(&sql, vec![Bind::Json(Value::Object(record))]).await
    }

    async fn update(
        &self,
        table: Table,
        changes: Record,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Record>> {
        let name = quote(table.as_str())?;
        let assignments = quoted_columns(&changes)?
            .iter()
            .map(|c| format!("{c} = src.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {name} AS r SET {assignments} \
             FROM jsonb_populate_record(NULL::{name}, $1) AS src \
             WHERE r.{field}::text = $2 \
             RETURNING to_jsonb(r)",
            field = quote(field)?
        );
        self.fetch_rows(
            &sql,
            vec![Bind::Json(Value::Object(changes)), Bind::Text(filter_literal(value))],
        )
        .await
    }

    async fn delete(&self, table: Table, field: &str, value: &Value) -> StoreResult<Vec<Record>> {
        let sql = format!(
            "DELETE FROM {} AS r WHERE r.{}::text = $1 RETURNING to_jsonb(r)",
            quote(table.as_str())?,
            quote(field)?
        );
        self.fetch_rows(&sql, vec![Bind::Text(filter_literal(value))])
            .await
    }

    async fn set_exclusive_flag(
        &self,
        table: Table,
        flag: &str,
        key_field: &str,
        key_value: &Value,
    ) -> StoreResult<usize> {
        let name = quote(table.as_str())?;
        let flag = quote(flag)?;
        let key = quote(key_field)?;

        // El índice único parcial exige limpiar antes de marcar
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!("UPDATE {name} SET {flag} = false WHERE {flag}"))
            .execute(&mut *tx)
            .await?;
        let marked = sqlx::query(&format!("UPDATE {name} SET {flag} = true WHERE {key}::text = $1"))
            .bind(filter_literal(key_value))
            .execute(&mut *tx)
            .await?
            .rows_affected() as usize;
        if marked == 0 {
            log::warn!("⚠️ {} sin fila {} = {}; se deshace el cambio", name, key, key_value);
            tx.rollback().await?;
            return Ok(0);
        }
        tx.commit().await?;
        Ok(marked)
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if url[..at_pos].contains(':') {
            let protocol_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            let protocol = &url[..protocol_end];
            let host = &url[at_pos + 1..];
            return format!("{}***:***@{}", protocol, host);
        }
    }
    url.to_string()
}
