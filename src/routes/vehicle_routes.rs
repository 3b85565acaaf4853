use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{CreateVehicleForm, DeleteVehicleForm, UpdateVehicleStatusForm};
use crate::dto::Notice;
use crate::routes::pdf_response;
use crate::services::report_service::VEHICLES_REPORT_FILENAME;
use crate::state::AppState;
use crate::templates_structs::render;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/", post(create_vehicle))
        .route("/status", post(update_vehicle_status))
        .route("/delete", post(delete_vehicle))
        .route("/report.pdf", get(vehicles_report))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let controller = VehicleController::new(&state);
    render(&controller.page(Vec::new()).await?)
}

async fn create_vehicle(
    State(state): State<AppState>,
    Form(form): Form<CreateVehicleForm>,
) -> Result<Html<String>, AppError> {
    let controller = VehicleController::new(&state);
    let notice = controller.create(form).await?;
    render(&controller.page(vec![notice]).await?)
}

async fn update_vehicle_status(
    State(state): State<AppState>,
    Form(form): Form<UpdateVehicleStatusForm>,
) -> Result<Html<String>, AppError> {
    let controller = VehicleController::new(&state);
    let notice = controller.update_status(form).await?;
    render(&controller.page(vec![notice]).await?)
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Form(form): Form<DeleteVehicleForm>,
) -> Result<Html<String>, AppError> {
    let controller = VehicleController::new(&state);
    let notice = controller.delete(form).await?;
    render(&controller.page(vec![notice]).await?)
}

async fn vehicles_report(State(state): State<AppState>) -> Result<Response, AppError> {
    let controller = VehicleController::new(&state);
    match controller.report_pdf().await? {
        Some(bytes) => Ok(pdf_response(VEHICLES_REPORT_FILENAME, bytes)),
        None => {
            let notice = Notice::warning("No hay vehículos registrados.");
            Ok(render(&controller.page(vec![notice]).await?)?.into_response())
        }
    }
}
