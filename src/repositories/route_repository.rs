use std::sync::Arc;

use crate::database::store::from_records;
use crate::database::{StoreResult, Table, TableStore};
use crate::models::OptimizedRoute;

/// Rutas optimizadas: solo lectura, las escribe el workflow externo
pub struct RouteRepository {
    store: Arc<dyn TableStore>,
}

impl RouteRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> StoreResult<Vec<OptimizedRoute>> {
        from_records(self.store.get(Table::OptimizedRoutes).await?)
    }
}
