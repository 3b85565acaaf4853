use serde_json::{json, Value};
use std::sync::Arc;

use crate::database::store::{from_records, to_record};
use crate::database::{Record, StoreResult, Table, TableStore};
use crate::models::depot::DEFAULT_FLAG;
use crate::models::{Depot, RowId};

pub struct DepotRepository {
    store: Arc<dyn TableStore>,
}

impl DepotRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> StoreResult<Vec<Depot>> {
        from_records(self.store.get(Table::Depots).await?)
    }

    pub async fn create(&self, depot: &Depot) -> StoreResult<Vec<Depot>> {
        let rows = self.store.insert(Table::Depots, to_record(depot)?).await?;
        from_records(rows)
    }

    /// Marcar un único almacén como predeterminado; 0 si no existe
    pub async fn make_default(&self, key_field: &str, key_value: &Value) -> StoreResult<usize> {
        self.store
            .set_exclusive_flag(Table::Depots, DEFAULT_FLAG, key_field, key_value)
            .await
    }

    /// Quitar el flag de predeterminado a un almacén
    pub async fn clear_default(&self, id: &RowId) -> StoreResult<usize> {
        let mut changes = Record::new();
        changes.insert(DEFAULT_FLAG.into(), json!(false));
        let rows = self
            .store
            .update(Table::Depots, changes, "id", &id.to_value())
            .await?;
        Ok(rows.len())
    }

    pub async fn delete(&self, id: &RowId) -> StoreResult<usize> {
        let rows = self.store.delete(Table::Depots, "id", &id.to_value()).await?;
        Ok(rows.len())
    }
}
