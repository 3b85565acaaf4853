use crate::dto::Notice;
use crate::models::RouteSummary;
use crate::repositories::RouteRepository;
use crate::services::report_service::{render_pdf, routes_report};
use crate::state::AppState;
use crate::templates_structs::{PageContext, ReportsTemplate};
use crate::utils::errors::AppResult;

pub struct ReportController {
    routes: RouteRepository,
}

impl ReportController {
    pub fn new(state: &AppState) -> Self {
        Self {
            routes: RouteRepository::new(state.store.clone()),
        }
    }

    pub async fn page(&self, notices: Vec<Notice>) -> AppResult<ReportsTemplate> {
        let routes = self.routes.list().await?;
        Ok(ReportsTemplate {
            ctx: PageContext::build("/reports", notices),
            summary: RouteSummary::from_routes(&routes),
            routes,
        })
    }

    /// PDF detallado de rutas; `None` si aún no hay rutas
    pub async fn routes_pdf(&self) -> AppResult<Option<Vec<u8>>> {
        let routes = self.routes.list().await?;
        if routes.is_empty() {
            return Ok(None);
        }
        let summary = RouteSummary::from_routes(&routes);
        let pages = routes_report(&routes, &summary);
        Ok(Some(render_pdf("Reporte Detallado - Pacasmayo", &pages)?))
    }
}
