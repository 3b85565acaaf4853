use validator::Validate;

use crate::controllers::selected_id;
use crate::dto::depot_dto::{CreateDepotForm, DeleteDepotForm, UpdateDepotDefaultForm};
use crate::dto::Notice;
use crate::models::Depot;
use crate::repositories::DepotRepository;
use crate::services::GeocodingService;
use crate::state::AppState;
use crate::templates_structs::{DepotsTemplate, PageContext};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct DepotController {
    repository: DepotRepository,
    geocoding: GeocodingService,
}

impl DepotController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: DepotRepository::new(state.store.clone()),
            geocoding: state.geocoding.clone(),
        }
    }

    pub async fn page(&self, notices: Vec<Notice>) -> AppResult<DepotsTemplate> {
        Ok(DepotsTemplate {
            ctx: PageContext::build("/depots", notices),
            depots: self.repository.list().await?,
        })
    }

    /// Registrar un almacén geocodificado.
    ///
    /// Se inserta sin flag y, si se pidió, se marca como predeterminado con
    /// una sola operación del store.
    pub async fn create(&self, form: CreateDepotForm) -> AppResult<Notice> {
        if let Err(errors) = form.validate() {
            log::warn!("⚠️ Formulario de almacén incompleto: {}", errors);
            return Ok(Notice::warning("⚠️ Completa todos los campos obligatorios."));
        }

        let coordinates = self
            .geocoding
            .geocode(&form.address)
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;
        let Some(coordinates) = coordinates else {
            return Ok(Notice::error("❌ No se pudo geocodificar la dirección."));
        };

        let depot = Depot {
            id: None,
            name: form.name.trim().to_string(),
            address: form.address.trim().to_string(),
            coordinates: Some(coordinates),
            is_default: false,
            created_at: None,
        };
        let created = self.repository.create(&depot).await?;
        log::info!("🏭 Almacén registrado: {}", depot.name);

        if form.wants_default() {
            let marked = match created.first().and_then(|d| d.id.as_ref()) {
                Some(id) => self.repository.make_default("id", &id.to_value()).await?,
                None => 0,
            };
            if marked == 0 {
                log::warn!("⚠️ El store no devolvió el id de {}", depot.name);
                return Ok(Notice::warning(
                    "⚠️ Almacén registrado, pero no se pudo marcar como predeterminado.",
                ));
            }
        }
        Ok(Notice::success("✅ Almacén registrado correctamente."))
    }

    pub async fn update_default(&self, form: UpdateDepotDefaultForm) -> AppResult<Notice> {
        let id = selected_id(&form.depot_id)?;
        let changed = if form.wants_default() {
            self.repository.make_default("id", &id.to_value()).await?
        } else {
            self.repository.clear_default(&id).await?
        };
        if changed == 0 {
            return Err(not_found_error("Depot", &form.depot_id));
        }
        Ok(Notice::success("🔄 Almacén actualizado."))
    }

    pub async fn delete(&self, form: DeleteDepotForm) -> AppResult<Notice> {
        let id = selected_id(&form.depot_id)?;
        let name = self
            .repository
            .list()
            .await?
            .into_iter()
            .find(|d| d.id.as_ref() == Some(&id))
            .map(|d| d.name)
            .unwrap_or_else(|| id.to_string());
        if self.repository.delete(&id).await? == 0 {
            return Err(not_found_error("Depot", &form.depot_id));
        }
        log::info!("🗑️ Almacén eliminado: {}", name);
        Ok(Notice::warning(format!("🚫 Almacén '{}' eliminado.", name)))
    }
}
