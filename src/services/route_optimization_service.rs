//! Disparador del workflow de optimización (webhook de n8n)
//!
//! La optimización la calcula el servicio externo. Aquí solo se envía un
//! POST con las entregas elegidas y el almacén, y se interpreta la respuesta.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::config::EnvironmentConfig;
use crate::dto::optimization_dto::{OptimizationRequest, OptimizationResult};

/// Fallos que la vista muestra al usuario
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizationError {
    /// El webhook respondió con un estado distinto de 200; `body` va tal cual
    #[error("Webhook respondió {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Conexión, timeout o cuerpo ilegible
    #[error("{0}")]
    Transport(String),
}

#[derive(Clone)]
pub struct RouteOptimizationService {
    client: Client,
    webhook_url: String,
    timeout: Duration,
}

impl RouteOptimizationService {
    pub fn new(client: Client, webhook_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
            timeout,
        }
    }

    pub fn from_config(client: Client, config: &EnvironmentConfig) -> Self {
        Self::new(client, config.n8n_webhook_url.clone(), config.webhook_timeout)
    }

    /// Enviar la petición de optimización al workflow
    pub async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, OptimizationError> {
        log::info!(
            "🚀 Enviando {} entregas al webhook de optimización (almacén: {})",
            request.deliveries.len(),
            if request.depot.is_some() { "sí" } else { "no" }
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                log::error!("❌ Error al conectar con el webhook: {}", e);
                OptimizationError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .map_err(|e| OptimizationError::Transport(e.to_string()))?;
            log::error!("❌ Webhook respondió {}: {}", status, body);
            return Err(OptimizationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let result: OptimizationResult = response.json().await.map_err(|e| {
            log::error!("❌ Respuesta del webhook ilegible: {}", e);
            OptimizationError::Transport(e.to_string())
        })?;

        log::info!(
            "✅ Ruta optimizada: {:.2} km, {} min",
            result.total_distance_km,
            result.estimated_duration_minutes
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, RowId};
    use crate::utils::test_support::spawn_stub;
    use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn request() -> OptimizationRequest {
        OptimizationRequest {
            deliveries: vec![RowId::Int(4), RowId::Int(9)],
            depot: Some(Coordinates::new(-7.4002, -79.5717)),
        }
    }

    fn service(url: String) -> RouteOptimizationService {
        RouteOptimizationService::new(Client::new(), url, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_success_parses_sequence() {
        let router = Router::new().route(
            "/webhook",
            post(|Json(payload): Json<Value>| async move {
                assert_eq!(payload["deliveries"], json!([4, 9]));
                assert_eq!(payload["depot"]["lat"], json!(-7.4002));
                Json(json!({
                    "total_distance_km": 6.789,
                    "estimated_duration_minutes": 24,
                    "optimized_sequence": {
                        "encodedPolyline": "_p~iF~ps|U_ulLnnqC",
                        "ordered_waypoints": [
                            {"lat": -7.401, "lng": -79.570, "label": "Juan Perez"},
                            {"lat": -7.399, "lng": -79.568}
                        ]
                    }
                }))
            }),
        );
        let base = spawn_stub(router).await;

        let result = service(format!("{}/webhook", base)).optimize(&request()).await.unwrap();
        assert_eq!(result.total_distance_km, 6.789);
        assert_eq!(result.encoded_polyline(), Some("_p~iF~ps|U_ulLnnqC"));
        let waypoints = &result.optimized_sequence.unwrap().ordered_waypoints;
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[1].label, None);
    }

    #[tokio::test]
    async fn test_error_status_keeps_body_verbatim() {
        let router = Router::new().route(
            "/webhook",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "internal error") }),
        );
        let base = spawn_stub(router).await;

        let err = service(format!("{}/webhook", base)).optimize(&request()).await.unwrap_err();
        assert_eq!(
            err,
            OptimizationError::Rejected {
                status: 500,
                body: "internal error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_transport_error() {
        let router = Router::new().route("/webhook", post(|| async { "not json" }));
        let base = spawn_stub(router).await;

        let err = service(format!("{}/webhook", base)).optimize(&request()).await.unwrap_err();
        assert!(matches!(err, OptimizationError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_transport_error() {
        let err = service("http://127.0.0.1:9/webhook".to_string())
            .optimize(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, OptimizationError::Transport(_)));
    }
}
