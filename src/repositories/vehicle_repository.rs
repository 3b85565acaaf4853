use serde_json::json;
use std::sync::Arc;

use crate::database::store::{from_records, to_record};
use crate::database::{Record, StoreResult, Table, TableStore};
use crate::models::{RowId, Vehicle, VehicleStatus, VehicleType};

pub struct VehicleRepository {
    store: Arc<dyn TableStore>,
}

impl VehicleRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> StoreResult<Vec<Vehicle>> {
        from_records(self.store.get(Table::Vehicles).await?)
    }

    /// Filas de la tabla, sin interpretar tipo ni estado
    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.store.get(Table::Vehicles).await?.len())
    }

    pub async fn create(
        &self,
        license_plate: String,
        vehicle_type: VehicleType,
        capacity_kg: f64,
    ) -> StoreResult<Vec<Vehicle>> {
        let vehicle = Vehicle {
            id: None,
            license_plate,
            vehicle_type,
            capacity_kg,
            status: VehicleStatus::Available,
            created_at: None,
        };
        let rows = self.store.insert(Table::Vehicles, to_record(&vehicle)?).await?;
        from_records(rows)
    }

    pub async fn update_status(&self, id: &RowId, status: VehicleStatus) -> StoreResult<usize> {
        let mut changes = Record::new();
        changes.insert("status".into(), json!(status));
        let rows = self
            .store
            .update(Table::Vehicles, changes, "id", &id.to_value())
            .await?;
        Ok(rows.len())
    }

    pub async fn delete(&self, id: &RowId) -> StoreResult<usize> {
        let rows = self.store.delete(Table::Vehicles, "id", &id.to_value()).await?;
        Ok(rows.len())
    }
}
