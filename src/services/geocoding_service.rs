//! Servicio de geocodificación (Google Geocoding API)
//!
//! Una sola petición GET por dirección, acotada a la región configurada.
//! Solo se mira el primer resultado. Sin reintentos ni caché.

use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::config::EnvironmentConfig;
use crate::models::Coordinates;
use crate::utils::validation::validate_coordinates;

#[derive(Debug, Deserialize)]
struct GoogleGeocodingResponse {
    #[serde(default)]
    results: Vec<GoogleResult>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: Coordinates,
}

#[derive(Clone)]
pub struct GeocodingService {
    client: Client,
    endpoint: String,
    api_key: String,
    region: String,
    timeout: Duration,
}

impl GeocodingService {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        region: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            region: region.into(),
            timeout,
        }
    }

    pub fn from_config(client: Client, config: &EnvironmentConfig) -> Self {
        Self::new(
            client,
            config.google_geocoding_url.clone(),
            config.google_maps_api_key.clone(),
            config.geocoding_region.clone(),
            config.geocoding_timeout,
        )
    }

    /// Dirección tal como se envía al proveedor: `"{dirección},{región}"`
    pub fn scoped_query(&self, address: &str) -> String {
        format!("{},{}", address.trim(), self.region)
    }

    /// Geocodificar una dirección.
    ///
    /// `Ok(None)` cuando el proveedor no encuentra nada o responde con un
    /// estado distinto de 200. Los fallos de red se propagan.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        let query = self.scoped_query(address);
        log::info!("🗺️ Geocodificando dirección: {}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("address", query.as_str()), ("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("⚠️ Geocodificación respondió {} para: {}", status, query);
            return Ok(None);
        }

        let body: GoogleGeocodingResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Respuesta de geocodificación inválida: {}", e))?;

        match body.results.into_iter().next() {
            Some(first) => {
                let location = first.geometry.location;
                if let Err(e) = validate_coordinates(location.lat, location.lng) {
                    log::warn!("⚠️ Coordenadas fuera de rango para {}: {}", query, e);
                    return Ok(None);
                }
                log::info!("✅ Geocodificación exitosa: {} -> ({}, {})", query, location.lat, location.lng);
                Ok(Some(location))
            }
            None => {
                log::warn!("⚠️ Sin resultados para la dirección: {}", query);
                Ok(None)
            }
        }
    }
}
