// Recipe Box - Web Server
// REST API over the recipe core with Axum

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use recipe_box::{
    Config, Like, Likes, LikesError, ListError, RawRecipe, Recipe, RecipePipeline, ServingDirection,
    ServingsError, ShoppingList, ShoppingListItem,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    pipeline: Arc<RecipePipeline>,
    recipes: Arc<Mutex<HashMap<String, Recipe>>>,
    list: Arc<Mutex<ShoppingList>>,
    likes: Arc<Mutex<Likes>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        let body = ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    let body = ApiResponse::<()> {
        success: false,
        data: None,
        error: Some(message.to_string()),
    };
    (status, Json(body)).into_response()
}

fn recipe_not_found(id: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("recipe not found: {}", id))
}

fn list_error(e: ListError) -> Response {
    let status = match e {
        ListError::NotFound(_) => StatusCode::NOT_FOUND,
        ListError::InvalidCount(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_response(status, e)
}

#[derive(Deserialize)]
struct CountUpdate {
    count: f64,
}

#[derive(Serialize)]
struct LikeStatus {
    liked: bool,
    count: usize,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> Response {
    ApiResponse::ok("OK")
}

/// POST /api/recipes - Prepare an upstream recipe and keep it
async fn create_recipe(State(state): State<AppState>, Json(raw): Json<RawRecipe>) -> Response {
    match state.pipeline.prepare(&raw) {
        Ok(recipe) => {
            state
                .recipes
                .lock()
                .await
                .insert(recipe.id.clone(), recipe.clone());
            ApiResponse::ok(recipe)
        }
        Err(e) => {
            tracing::info!(error = %e, "rejected recipe");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e)
        }
    }
}

/// GET /api/recipes/:id
async fn get_recipe(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.recipes.lock().await.get(&id) {
        Some(recipe) => ApiResponse::ok(recipe.clone()),
        None => recipe_not_found(&id),
    }
}

/// POST /api/recipes/:id/servings/:direction - increase | decrease
async fn update_servings(
    State(state): State<AppState>,
    Path((id, direction)): Path<(String, String)>,
) -> Response {
    let direction: ServingDirection = match direction.parse() {
        Ok(direction) => direction,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let mut recipes = state.recipes.lock().await;
    let Some(recipe) = recipes.get_mut(&id) else {
        return recipe_not_found(&id);
    };

    match recipe.update_servings(direction) {
        Ok(_) => ApiResponse::ok(recipe.clone()),
        Err(e @ (ServingsError::BelowMinimum { .. } | ServingsError::AboveMaximum { .. })) => {
            error_response(StatusCode::CONFLICT, e)
        }
    }
}

/// POST /api/recipes/:id/list - Add every ingredient to the shopping list
async fn add_recipe_to_list(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let recipes = state.recipes.lock().await;
    let Some(recipe) = recipes.get(&id) else {
        return recipe_not_found(&id);
    };

    let mut list = state.list.lock().await;
    list.add_recipe(recipe);
    ApiResponse::ok(list.items().to_vec())
}

/// POST /api/recipes/:id/like - Toggle like
async fn toggle_like(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let recipes = state.recipes.lock().await;
    let Some(recipe) = recipes.get(&id) else {
        return recipe_not_found(&id);
    };

    let mut likes = state.likes.lock().await;
    let liked = likes.toggle(recipe);
    ApiResponse::ok(LikeStatus {
        liked,
        count: likes.count(),
    })
}

/// GET /api/list - Full shopping list
async fn get_list(State(state): State<AppState>) -> Response {
    let items: Vec<ShoppingListItem> = state.list.lock().await.items().to_vec();
    ApiResponse::ok(items)
}

/// GET /api/list.csv
async fn get_list_csv(State(state): State<AppState>) -> Response {
    match state.list.lock().await.to_csv() {
        Ok(csv) => ([("content-type", "text/csv")], csv).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to export shopping list");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

/// DELETE /api/list/:id
async fn delete_item(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let mut list = state.list.lock().await;
    match list.delete_item(&id) {
        Ok(_) => ApiResponse::ok(list.items().to_vec()),
        Err(e) => list_error(e),
    }
}

/// PUT /api/list/:id - Overwrite an item's count
async fn update_count(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<CountUpdate>,
) -> Response {
    let mut list = state.list.lock().await;
    match list.update_count(&id, update.count) {
        Ok(()) => ApiResponse::ok(list.items().to_vec()),
        Err(e) => list_error(e),
    }
}

/// GET /api/likes
async fn get_likes(State(state): State<AppState>) -> Response {
    let likes: Vec<Like> = state.likes.lock().await.all().to_vec();
    ApiResponse::ok(likes)
}

/// DELETE /api/likes/:id
async fn delete_like(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.likes.lock().await.delete_like(&id) {
        Ok(like) => ApiResponse::ok(like),
        Err(e @ LikesError::NotFound(_)) => error_response(StatusCode::NOT_FOUND, e),
        Err(e @ LikesError::AlreadyLiked(_)) => error_response(StatusCode::CONFLICT, e),
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = AppState {
        pipeline: Arc::new(config.pipeline()?),
        recipes: Arc::new(Mutex::new(HashMap::new())),
        list: Arc::new(Mutex::new(config.shopping_list())),
        likes: Arc::new(Mutex::new(Likes::new())),
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/recipes", post(create_recipe))
        .route("/recipes/:id", get(get_recipe))
        .route("/recipes/:id/servings/:direction", post(update_servings))
        .route("/recipes/:id/list", post(add_recipe_to_list))
        .route("/recipes/:id/like", post(toggle_like))
        .route("/list", get(get_list))
        .route("/list.csv", get(get_list_csv))
        .route("/list/:id", put(update_count).delete(delete_item))
        .route("/likes", get(get_likes))
        .route("/likes/:id", delete(delete_like))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    tracing::info!(addr = %config.server_addr, "recipe server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
