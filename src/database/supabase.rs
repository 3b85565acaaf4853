//! Backend Supabase (PostgREST)
//!
//! Cada operación del store es una única petición HTTP a `/rest/v1`.
//! El intercambio del almacén predeterminado usa la función RPC
//! `set_exclusive_flag` definida en `migrations/0001_depot_default.sql`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

use super::store::{
    check_identifier, filter_literal, Record, StoreError, StoreResult, Table, TableStore,
};

/// Cliente REST para la base de datos alojada
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(client: Client, project_url: &str, api_key: String) -> Self {
        Self {
            client,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key,
        }
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}", self.rest_url, table.as_str())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Parámetro de filtro `campo=eq.valor`
    fn eq_filter(field: &str, value: &Value) -> StoreResult<[(String, String); 1]> {
        let field = check_identifier(field)?;
        Ok([(field.to_string(), format!("eq.{}", filter_literal(value)))])
    }

    async fn read_rows(response: Response) -> StoreResult<Vec<Record>> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::error!("❌ Supabase respondió {}: {}", status, body);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TableStore for SupabaseStore {
    async fn get(&self, table: Table) -> StoreResult<Vec<Record>> {
        log::debug!("📥 Supabase select * from {}", table);
        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&[("select", "*")])
            .send()
            .await?;
        Self::read_rows(response).await
    }

    async fn insert(&self, table: Table, record: Record) -> StoreResult<Vec<Record>> {
        log::info!("📝 Supabase insert en {}", table);
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&Value::Object(record))
            .send()
            .await?;
        Self::read_rows(response).await
    }

    async fn update(
        &self,
        table: Table,
        changes: Record,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Record>> {
        log::info!("🔄 Supabase update {} where {} = {}", table, field, value);
        let response = self
            .authorized(self.client.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&Self::eq_filter(field, value)?)
            .json(&Value::Object(changes))
            .send()
            .await?;
        Self::read_rows(response).await
    }

    async fn delete(&self, table: Table, field: &str, value: &Value) -> StoreResult<Vec<Record>> {
        log::info!("🗑️ Supabase delete {} where {} = {}", table, field, value);
        let response = self
            .authorized(self.client.delete(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&Self::eq_filter(field, value)?)
            .send()
            .await?;
        Self::read_rows(response).await
    }

    async fn set_exclusive_flag(
        &self,
        table: Table,
        flag: &str,
        key_field: &str,
        key_value: &Value,
    ) -> StoreResult<usize> {
        let params = json!({
            "table_name": table.as_str(),
            "flag_column": check_identifier(flag)?,
            "key_column": check_identifier(key_field)?,
            "key_value": filter_literal(key_value),
        });
        log::info!("⭐ Supabase rpc set_exclusive_flag {}", params);
        let response = self
            .authorized(self.client.post(format!("{}/rpc/set_exclusive_flag", self.rest_url)))
            .json(&params)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        // La función devuelve el número de filas marcadas como escalar JSON
        let marked: Value = response.json().await?;
        Ok(marked.as_u64().unwrap_or(0) as usize)
    }
}
