//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Es inmutable: la base de datos externa es
//! la única fuente de verdad.

use reqwest::Client;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::TableStore;
use crate::services::{GeocodingService, RouteOptimizationService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<dyn TableStore>,
    pub geocoding: GeocodingService,
    pub optimizer: RouteOptimizationService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn TableStore>, http_client: Client) -> Self {
        let geocoding = GeocodingService::from_config(http_client.clone(), &config);
        let optimizer = RouteOptimizationService::from_config(http_client, &config);
        Self {
            config,
            store,
            geocoding,
            optimizer,
        }
    }
}
