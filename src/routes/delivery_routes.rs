use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, post},
    Form, Router,
};

use crate::controllers::DeliveryController;
use crate::dto::delivery_dto::{CreateDeliveryForm, DeliveryListQuery, DeliveryStatusForm};
use crate::state::AppState;
use crate::templates_structs::render;
use crate::utils::errors::AppError;

pub fn create_delivery_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_deliveries))
        .route("/", post(create_delivery))
        .route("/status", post(update_delivery_status))
}

async fn list_deliveries(
    State(state): State<AppState>,
    Query(query): Query<DeliveryListQuery>,
) -> Result<Html<String>, AppError> {
    let controller = DeliveryController::new(&state);
    render(&controller.page(&query, Vec::new()).await?)
}

async fn create_delivery(
    State(state): State<AppState>,
    Form(form): Form<CreateDeliveryForm>,
) -> Result<Html<String>, AppError> {
    let controller = DeliveryController::new(&state);
    let notice = controller.create(form).await?;
    render(&controller.page(&DeliveryListQuery::default(), vec![notice]).await?)
}

async fn update_delivery_status(
    State(state): State<AppState>,
    Form(form): Form<DeliveryStatusForm>,
) -> Result<Html<String>, AppError> {
    let controller = DeliveryController::new(&state);
    let notice = controller.update_status(form).await?;
    render(&controller.page(&DeliveryListQuery::default(), vec![notice]).await?)
}
