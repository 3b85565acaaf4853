use chrono::Utc;
use validator::Validate;

use crate::dto::delivery_dto::{CreateDeliveryForm, DeliveryListQuery, DeliveryStatusForm};
use crate::dto::Notice;
use crate::models::delivery::{distinct_statuses, tracking_number_at};
use crate::models::{Delivery, DeliveryStatus};
use crate::repositories::DeliveryRepository;
use crate::services::GeocodingService;
use crate::state::AppState;
use crate::templates_structs::{DeliveriesTemplate, PageContext, SelectOption};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_date;

const ALL_STATUSES: &str = "Todos";

pub struct DeliveryController {
    repository: DeliveryRepository,
    geocoding: GeocodingService,
}

/// Texto opcional del formulario: vacío se guarda como NULL
fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl DeliveryController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: DeliveryRepository::new(state.store.clone()),
            geocoding: state.geocoding.clone(),
        }
    }

    /// Lista con filtro por estado y búsqueda
    pub async fn page(
        &self,
        query: &DeliveryListQuery,
        notices: Vec<Notice>,
    ) -> AppResult<DeliveriesTemplate> {
        let all = self.repository.list().await?;
        let has_deliveries = !all.is_empty();
        let filters = query.filters();

        let mut status_options = vec![SelectOption {
            value: ALL_STATUSES.to_string(),
            label: ALL_STATUSES.to_string(),
            selected: filters.status.is_none(),
        }];
        status_options.extend(distinct_statuses(&all).into_iter().map(|status| SelectOption {
            value: status.as_str().to_string(),
            label: status.as_str().to_string(),
            selected: filters.status == Some(status),
        }));

        Ok(DeliveriesTemplate {
            ctx: PageContext::build("/deliveries", notices),
            search: filters.search.clone().unwrap_or_default(),
            deliveries: filters.apply(all),
            has_deliveries,
            status_options,
            transitions: DeliveryStatus::ALL.to_vec(),
            today: Utc::now().date_naive().to_string(),
        })
    }

    /// Formulario "Nueva entrega": validar, geocodificar y guardar
    pub async fn create(&self, form: CreateDeliveryForm) -> AppResult<Notice> {
        let estimated = if form.estimated_delivery_time.trim().is_empty() {
            Ok(Utc::now().date_naive())
        } else {
            validate_date(&form.estimated_delivery_time)
        };
        let Ok(estimated) = estimated else {
            return Ok(Notice::warning("⚠️ Completa todos los campos obligatorios."));
        };
        if let Err(errors) = form.validate() {
            log::warn!("⚠️ Formulario de entrega incompleto: {}", errors);
            return Ok(Notice::warning("⚠️ Completa todos los campos obligatorios."));
        }

        let coordinates = self
            .geocoding
            .geocode(&form.customer_address)
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;
        let Some(coordinates) = coordinates else {
            return Ok(Notice::error("❌ No se pudo obtener coordenadas. Verifica la dirección."));
        };

        let delivery = Delivery {
            id: None,
            tracking_number: tracking_number_at(Utc::now()),
            customer_name: form.customer_name.trim().to_string(),
            customer_phone: optional_text(form.customer_phone),
            customer_address: form.customer_address.trim().to_string(),
            customer_coordinates: Some(coordinates),
            package_description: optional_text(form.package_description),
            package_weight: Some(form.package_weight),
            status: DeliveryStatus::Pending,
            estimated_delivery_time: Some(estimated.to_string()),
            created_at: None,
        };
        self.repository.create(&delivery).await?;
        log::info!("📦 Entrega creada: {}", delivery.tracking_number);

        Ok(Notice::success("✅ Entrega creada con coordenadas reales."))
    }

    /// Acción rápida: cambiar el estado por número de tracking
    pub async fn update_status(&self, form: DeliveryStatusForm) -> AppResult<Notice> {
        let changed = self
            .repository
            .update_status(&form.tracking_number, form.status)
            .await?;
        if changed == 0 {
            return Ok(Notice::warning(format!(
                "⚠️ No se encontró la entrega {}.",
                form.tracking_number
            )));
        }
        log::info!("🔄 Entrega {} -> {}", form.tracking_number, form.status);
        Ok(Notice::success(format!("Estado cambiado a {}.", form.status.label())))
    }
}
