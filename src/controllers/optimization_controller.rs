use serde_json::json;

use crate::dto::optimization_dto::{OptimizationRequest, OptimizationResult, OptimizeForm};
use crate::dto::Notice;
use crate::models::coordinates::PACASMAYO_CENTER;
use crate::models::depot::preferred_depot;
use crate::models::route::{format_number, round2};
use crate::models::{Coordinates, Delivery, Depot, Waypoint};
use crate::repositories::{DeliveryRepository, DepotRepository};
use crate::services::polyline;
use crate::services::{OptimizationError, RouteOptimizationService};
use crate::state::AppState;
use crate::templates_structs::{script_json, OptimizationView, OptimizeTemplate, PageContext, SelectOption};
use crate::utils::errors::AppResult;

pub struct OptimizationController {
    deliveries: DeliveryRepository,
    depots: DepotRepository,
    optimizer: RouteOptimizationService,
}

fn delivery_key(delivery: &Delivery) -> Option<String> {
    delivery.id.as_ref().map(|id| id.to_string())
}

impl OptimizationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            deliveries: DeliveryRepository::new(state.store.clone()),
            depots: DepotRepository::new(state.store.clone()),
            optimizer: state.optimizer.clone(),
        }
    }

    /// Entregas que aún pueden optimizarse (pendientes o en progreso)
    async fn open_deliveries(&self) -> AppResult<Vec<Delivery>> {
        let mut deliveries = self.deliveries.list().await?;
        deliveries.retain(|d| d.status.is_open());
        Ok(deliveries)
    }

    fn template(
        open: &[Delivery],
        depots: &[Depot],
        form: &OptimizeForm,
        depot: Option<&Depot>,
        notices: Vec<Notice>,
        outcome: Option<OptimizationView>,
    ) -> OptimizeTemplate {
        let candidates = open
            .iter()
            .filter_map(|d| {
                delivery_key(d).map(|value| SelectOption {
                    selected: form.deliveries.contains(&value),
                    value,
                    label: d.selector_label(),
                })
            })
            .collect();
        let depot_options = depots
            .iter()
            .map(|d| SelectOption {
                value: d.name.clone(),
                label: d.name.clone(),
                selected: depot.map(|selected| selected.name == d.name).unwrap_or(false),
            })
            .collect();

        OptimizeTemplate {
            ctx: PageContext::build("/optimize", notices),
            candidates,
            depots: depot_options,
            show_form: !open.is_empty() && !depots.is_empty(),
            outcome,
        }
    }

    /// Avisos previos al formulario; `None` si se puede optimizar
    fn blocking_notice(open: &[Delivery], depots: &[Depot]) -> Option<Notice> {
        if open.is_empty() {
            return Some(Notice::info("📭 No hay entregas pendientes para optimizar."));
        }
        if depots.is_empty() {
            return Some(Notice::warning(
                "⚠️ No hay almacenes registrados. Agrega uno en 'Gestión de Almacenes'.",
            ));
        }
        None
    }

    pub async fn page(&self) -> AppResult<OptimizeTemplate> {
        let open = self.open_deliveries().await?;
        let depots = self.depots.list().await?;
        let notices = Self::blocking_notice(&open, &depots).into_iter().collect();
        let form = OptimizeForm::default();
        Ok(Self::template(&open, &depots, &form, preferred_depot(&depots), notices, None))
    }

    pub async fn optimize(&self, form: OptimizeForm) -> AppResult<OptimizeTemplate> {
        let open = self.open_deliveries().await?;
        let depots = self.depots.list().await?;
        let depot = form
            .depot
            .as_deref()
            .and_then(|name| depots.iter().find(|d| d.name == name))
            .or_else(|| preferred_depot(&depots));

        if let Some(notice) = Self::blocking_notice(&open, &depots) {
            return Ok(Self::template(&open, &depots, &form, depot, vec![notice], None));
        }

        let selected: Vec<&Delivery> = open
            .iter()
            .filter(|d| delivery_key(d).map(|k| form.deliveries.contains(&k)).unwrap_or(false))
            .collect();
        if selected.len() < 2 {
            let notice = Notice::warning("Selecciona al menos dos entregas para optimizar una ruta.");
            return Ok(Self::template(&open, &depots, &form, depot, vec![notice], None));
        }

        let mut notices = Vec::new();
        let depot_coordinates = match depot {
            Some(d) => {
                notices.push(Notice::info(format!(
                    "📍 Usando almacén: {}, Dirección: {}",
                    d.name, d.address
                )));
                if d.coordinates.is_none() {
                    notices.push(Notice::warning(
                        "⚠️ No se pudo obtener coordenadas del almacén. Verifica la dirección.",
                    ));
                }
                d.coordinates
            }
            None => None,
        };

        let request = OptimizationRequest {
            deliveries: selected.iter().filter_map(|d| d.id.clone()).collect(),
            depot: depot_coordinates,
        };

        let outcome = match self.optimizer.optimize(&request).await {
            Ok(result) => {
                notices.push(Notice::success("✅ Ruta optimizada correctamente."));
                Some(Self::outcome_view(&result, depot_coordinates, &mut notices))
            }
            Err(OptimizationError::Rejected { body, .. }) => {
                notices.push(Notice::error("❌ Error al optimizar ruta").with_detail(body));
                None
            }
            Err(OptimizationError::Transport(message)) => {
                notices.push(Notice::error("⚠️ Error al conectar con n8n").with_detail(message));
                None
            }
        };

        Ok(Self::template(&open, &depots, &form, depot, notices, outcome))
    }

    /// Métricas y datos del mapa de una optimización exitosa
    fn outcome_view(
        result: &OptimizationResult,
        depot: Option<Coordinates>,
        notices: &mut Vec<Notice>,
    ) -> OptimizationView {
        let path = result
            .encoded_polyline()
            .and_then(|encoded| match polyline::decode(encoded) {
                Ok(points) if !points.is_empty() => Some(points),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("⚠️ Polilínea inválida: {}", e);
                    None
                }
            });

        let map_json = match path {
            Some(points) => {
                let center = Coordinates::centroid(&points).unwrap_or(PACASMAYO_CENTER);
                let ordered: &[Waypoint] = result
                    .optimized_sequence
                    .as_ref()
                    .map(|s| s.ordered_waypoints.as_slice())
                    .unwrap_or(&[]);
                let waypoints: Vec<_> = ordered
                    .iter()
                    .enumerate()
                    .map(|(i, w)| {
                        json!({
                            "lat": w.lat,
                            "lng": w.lng,
                            "label": format!("{}. {}", i + 1, w.label.as_deref().unwrap_or("Entrega")),
                        })
                    })
                    .collect();
                let path: Vec<[f64; 2]> = points.iter().map(|p| [p.lat, p.lng]).collect();
                Some(script_json(&json!({
                    "center": center,
                    "path": path,
                    "depot": depot,
                    "waypoints": waypoints,
                })))
            }
            None => {
                notices.push(Notice::warning("⚠️ No se recibió una polilínea válida desde n8n."));
                None
            }
        };

        OptimizationView {
            total_distance_km: format_number(round2(result.total_distance_km)),
            estimated_duration_minutes: format_number(result.estimated_duration_minutes),
            map_json,
        }
    }
}
