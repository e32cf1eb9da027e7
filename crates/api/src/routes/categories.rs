//! Category routes.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use spendwatch_db::entities::categories;
use spendwatch_shared::types::CategoryId;

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

/// A category a user can budget or spend against.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional icon name.
    pub icon: Option<String>,
    /// Optional hex color.
    pub color_code: Option<String>,
    /// System-wide rather than owned by the caller.
    pub is_system: bool,
}

impl From<categories::Model> for CategoryResponse {
    fn from(model: categories::Model) -> Self {
        Self {
            id: CategoryId::new(model.id),
            name: model.name,
            description: model.description,
            icon: model.icon,
            color_code: model.color_code,
            is_system: model.is_system,
        }
    }
}

/// System categories plus the caller's own, by name.
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let categories = state.categories().list_visible_to(auth.user_id()).await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}
