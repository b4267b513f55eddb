use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{Category, User};

use crate::{
    ServerError,
    server::ServerState,
    types::category::{CategoryNew, CategoryPatch, CategoryView},
};

fn view(category: Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        color: category.color,
        is_default: category.is_default,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let categories = state.engine.list_categories(user.id).await?;
    Ok(Json(categories.into_iter().map(view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(user.id, &payload.name, payload.color.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(view(category))))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPatch>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state
        .engine
        .update_category(user.id, id, payload.name.as_deref(), payload.color.as_deref())
        .await?;
    Ok(Json(view(category)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
