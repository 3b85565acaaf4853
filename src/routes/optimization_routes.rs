use axum::{extract::State, response::Html, routing::get, Form, Router};

use crate::controllers::OptimizationController;
use crate::dto::optimization_dto::OptimizeForm;
use crate::state::AppState;
use crate::templates_structs::render;
use crate::utils::errors::AppError;

pub fn create_optimization_router() -> Router<AppState> {
    Router::new().route("/", get(show_optimizer).post(optimize_route))
}

async fn show_optimizer(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let controller = OptimizationController::new(&state);
    render(&controller.page().await?)
}

/// `deliveries` se repite por cada entrega marcada, así que se lee como pares
async fn optimize_route(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let controller = OptimizationController::new(&state);
    render(&controller.optimize(OptimizeForm::from_pairs(pairs)).await?)
}
