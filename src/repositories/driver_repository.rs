use std::sync::Arc;

use crate::database::{StoreResult, Table, TableStore};

/// Conductores: el dashboard solo muestra cuántos hay
pub struct DriverRepository {
    store: Arc<dyn TableStore>,
}

impl DriverRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.store.get(Table::Drivers).await?.len())
    }
}
