//! Backend en memoria
//!
//! Se usa en los tests y en demos locales (`STORE_BACKEND=memory`). Imita lo
//! que hace la base de datos alojada al insertar: asigna `id` y `created_at`
//! cuando el registro no los trae.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::store::{check_identifier, values_match, Record, StoreResult, Table, TableStore};

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Table, Vec<Record>>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear un store con filas iniciales
    pub fn with_rows(rows: impl IntoIterator<Item = (Table, Vec<Record>)>) -> Self {
        let mut max_id = 0;
        let mut tables = HashMap::new();
        for (table, records) in rows {
            for record in &records {
                if let Some(id) = record.get("id").and_then(Value::as_i64) {
                    max_id = max_id.max(id);
                }
            }
            tables.entry(table).or_insert_with(Vec::new).extend(records);
        }
        Self {
            tables: RwLock::new(tables),
            next_id: AtomicI64::new(max_id),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn get(&self, table: Table) -> StoreResult<Vec<Record>> {
        let tables = self.tables.read().await;
        Ok(tables.get(&table).cloned().unwrap_or_default())
    }

    async fn insert(&self, table: Table, mut record: Record) -> StoreResult<Vec<Record>> {
        for key in record.keys() {
            check_identifier(key)?;
        }
        if !record.contains_key("id") {
            record.insert("id".into(), Value::from(self.allocate_id()));
        }
        if !record.contains_key("created_at") {
            record.insert("created_at".into(), Value::from(Utc::now().to_rfc3339()));
        }
        let mut tables = self.tables.write().await;
        tables.entry(table).or_default().push(record.clone());
        Ok(vec![record])
    }

    async fn update(
        &self,
        table: Table,
        changes: Record,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Record>> {
        check_identifier(field)?;
        let mut tables = self.tables.write().await;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(&table) {
            for row in rows.iter_mut().filter(|row| values_match(row.get(field), value)) {
                for (k, v) in &changes {
                    row.insert(k.clone(), v.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: Table, field: &str, value: &Value) -> StoreResult<Vec<Record>> {
        check_identifier(field)?;
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(Vec::new());
        };
        let (removed, kept): (Vec<Record>, Vec<Record>) = rows
            .drain(..)
            .partition(|row| values_match(row.get(field), value));
        *rows = kept;
        Ok(removed)
    }

    async fn set_exclusive_flag(
        &self,
        table: Table,
        flag: &str,
        key_field: &str,
        key_value: &Value,
    ) -> StoreResult<usize> {
        check_identifier(flag)?;
        check_identifier(key_field)?;
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(0);
        };
        let matched = rows
            .iter()
            .filter(|row| values_match(row.get(key_field), key_value))
            .count();
        if matched == 0 {
            return Ok(0);
        }
        for row in rows.iter_mut() {
            let selected = values_match(row.get(key_field), key_value);
            row.insert(flag.to_string(), Value::Bool(selected));
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::to_record;
    use serde_json::json;

    fn record(value: Value) -> Record {
        to_record(&value).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let rows = store
            .insert(Table::Vehicles, record(json!({"license_plate": "ABC-123"})))
            .await
            .unwrap();
        assert_eq!(rows[0]["id"], 1);
        assert!(rows[0].contains_key("created_at"));

        let rows = store
            .insert(Table::Vehicles, record(json!({"license_plate": "XYZ-999"})))
            .await
            .unwrap();
        assert_eq!(rows[0]["id"], 2);
        assert_eq!(store.get(Table::Vehicles).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seeded_ids_continue_after_max() {
        let store = MemoryStore::with_rows([(
            Table::Depots,
            vec![record(json!({"id": 10, "name": "Principal"}))],
        )]);
        let rows = store
            .insert(Table::Depots, record(json!({"name": "Secundario"})))
            .await
            .unwrap();
        assert_eq!(rows[0]["id"], 11);
    }

    #[tokio::test]
    async fn test_update_and_delete_by_equality() {
        let store = MemoryStore::with_rows([(
            Table::Deliveries,
            vec![
                record(json!({"id": 1, "tracking_number": "TRK1", "status": "pending"})),
                record(json!({"id": 2, "tracking_number": "TRK2", "status": "pending"})),
            ],
        )]);

        let updated = store
            .update(
                Table::Deliveries,
                record(json!({"status": "delivered"})),
                "tracking_number",
                &json!("TRK2"),
            )
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["status"], "delivered");

        let removed = store.delete(Table::Deliveries, "id", &json!("1")).await.unwrap();
        assert_eq!(removed.len(), 1);
        let left = store.get(Table::Deliveries).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0]["tracking_number"], "TRK2");
    }

    #[tokio::test]
    async fn test_exclusive_flag_leaves_single_default() {
        let store = MemoryStore::with_rows([(
            Table::Depots,
            vec![
                record(json!({"id": 1, "name": "A", "is_default": true})),
                record(json!({"id": 2, "name": "B", "is_default": false})),
                record(json!({"id": 3, "name": "C", "is_default": true})),
            ],
        )]);

        let marked = store
            .set_exclusive_flag(Table::Depots, "is_default", "id", &json!(2))
            .await
            .unwrap();
        assert_eq!(marked, 1);

        let defaults: Vec<_> = store
            .get(Table::Depots)
            .await
            .unwrap()
            .into_iter()
            .filter(|d| d["is_default"] == true)
            .map(|d| d["name"].clone())
            .collect();
        assert_eq!(defaults, vec![json!("B")]);
    }

    #[tokio::test]
    async fn test_exclusive_flag_on_missing_row_changes_nothing() {
        let store = MemoryStore::with_rows([(
            Table::Depots,
            vec![
                record(json!({"id": 1, "name": "A", "is_default": true})),
                record(json!({"id": 2, "name": "B", "is_default": false})),
            ],
        )]);

        let marked = store
            .set_exclusive_flag(Table::Depots, "is_default", "id", &json!(999))
            .await
            .unwrap();
        assert_eq!(marked, 0);

        let rows = store.get(Table::Depots).await.unwrap();
        assert_eq!(rows[0]["is_default"], true);
        assert_eq!(rows[1]["is_default"], false);
    }
}
