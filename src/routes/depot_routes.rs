use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};

use crate::controllers::DepotController;
use crate::dto::depot_dto::{CreateDepotForm, DeleteDepotForm, UpdateDepotDefaultForm};
use crate::state::AppState;
use crate::templates_structs::render;
use crate::utils::errors::AppError;

pub fn create_depot_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_depots))
        .route("/", post(create_depot))
        .route("/default", post(update_depot_default))
        .route("/delete", post(delete_depot))
}

async fn list_depots(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let controller = DepotController::new(&state);
    render(&controller.page(Vec::new()).await?)
}

async fn create_depot(
    State(state): State<AppState>,
    Form(form): Form<CreateDepotForm>,
) -> Result<Html<String>, AppError> {
    let controller = DepotController::new(&state);
    let notice = controller.create(form).await?;
    render(&controller.page(vec![notice]).await?)
}

async fn update_depot_default(
    State(state): State<AppState>,
    Form(form): Form<UpdateDepotDefaultForm>,
) -> Result<Html<String>, AppError> {
    let controller = DepotController::new(&state);
    let notice = controller.update_default(form).await?;
    render(&controller.page(vec![notice]).await?)
}

async fn delete_depot(
    State(state): State<AppState>,
    Form(form): Form<DeleteDepotForm>,
) -> Result<Html<String>, AppError> {
    let controller = DepotController::new(&state);
    let notice = controller.delete(form).await?;
    render(&controller.page(vec![notice]).await?)
}
