use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::controllers::ReportController;
use crate::dto::Notice;
use crate::routes::pdf_response;
use crate::services::report_service::ROUTES_REPORT_FILENAME;
use crate::state::AppState;
use crate::templates_structs::render;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_reports))
        .route("/routes.pdf", get(routes_report))
}

async fn show_reports(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let controller = ReportController::new(&state);
    render(&controller.page(Vec::new()).await?)
}

async fn routes_report(State(state): State<AppState>) -> Result<Response, AppError> {
    let controller = ReportController::new(&state);
    match controller.routes_pdf().await? {
        Some(bytes) => Ok(pdf_response(ROUTES_REPORT_FILENAME, bytes)),
        None => {
            let notice = Notice::warning("No hay rutas optimizadas para exportar.");
            Ok(render(&controller.page(vec![notice]).await?)?.into_response())
        }
    }
}
