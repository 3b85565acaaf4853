use serde_json::{json, Value};
use std::sync::Arc;

use crate::database::store::{from_records, to_record};
use crate::database::{Record, StoreResult, Table, TableStore};
use crate::models::{Delivery, DeliveryStatus};

pub struct DeliveryRepository {
    store: Arc<dyn TableStore>,
}

impl DeliveryRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> StoreResult<Vec<Delivery>> {
        from_records(self.store.get(Table::Deliveries).await?)
    }

    pub async fn create(&self, delivery: &Delivery) -> StoreResult<Vec<Delivery>> {
        let rows = self.store.insert(Table::Deliveries, to_record(delivery)?).await?;
        from_records(rows)
    }

    /// Cambiar el estado de las entregas con ese número de tracking
    pub async fn update_status(
        &self,
        tracking_number: &str,
        status: DeliveryStatus,
    ) -> StoreResult<usize> {
        let mut changes = Record::new();
        changes.insert("status".into(), json!(status));
        let rows = self
            .store
            .update(
                Table::Deliveries,
                changes,
                "tracking_number",
                &Value::from(tracking_number),
            )
            .await?;
        Ok(rows.len())
    }
}
