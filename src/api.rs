//! REST API for the stowage service.
//!
//! Exposes the inventory operations as JSON endpoints under `/api`.
//! Uses Axum as the web framework and supports CORS.

use std::sync::{Arc, OnceLock};

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::config::ApiConfig;
use crate::error::InventoryError;
use crate::inventory::{ArrangementEntry, Inventory, PlannerConfig};
use crate::model::{
    ActionLog, ActionType, Container, Item, ItemRef, LogFilter, RetrievalAction, RetrievalStep,
    WasteItem, WasteReason,
};
use crate::simulation::{ItemUsage, SimulationChanges, SimulationSpan};
use crate::store::MemoryStore;
use crate::timestamp::{parse_iso8601, parse_or};
use crate::types::{Coordinates, Position};
use crate::waste::{ReturnItem, ReturnManifest, ReturnStep};

#[derive(Clone)]
struct ApiState {
    inventory: Arc<Inventory>,
}

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>Stowage API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                window.ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                });
            };
        </script>
    </body>
    </html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "itemId": "item-001",
    "userId": "astro-7",
    "timestamp": "2026-03-01T10:00:00Z",
    "containerId": "contA",
    "position": {
        "startCoordinates": {"width": 0.0, "depth": 0.0, "height": 0.0},
        "endCoordinates": {"width": 10.0, "depth": 10.0, "height": 20.0}
    }
}))]
pub struct PlaceRequest {
    pub item_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// ISO-8601; invalid or missing values fall back to mission time.
    #[serde(default)]
    pub timestamp: Option<String>,
    pub container_id: String,
    pub position: Position,
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Takes precedence over `itemName`.
    pub item_id: Option<String>,
    pub item_name: Option<String>,
    /// Records the search in the audit log when set.
    pub user_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    pub item_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Item reference inside a simulation request.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageRef {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "numOfDays": 3,
    "itemsToBeUsedPerDay": [{"itemId": "item-001"}, {"name": "Food Packet"}]
}))]
pub struct SimulateRequest {
    #[serde(default)]
    pub num_of_days: Option<u32>,
    /// Used when `numOfDays` is absent.
    #[serde(default)]
    pub to_timestamp: Option<String>,
    #[serde(default)]
    pub items_to_be_used_per_day: Vec<UsageRef>,
}

impl SimulateRequest {
    fn span(&self) -> SimulationSpan {
        if let Some(days) = self.num_of_days {
            return SimulationSpan::Days(days);
        }
        match self.to_timestamp.as_deref().map(|raw| (raw, parse_iso8601(raw))) {
            Some((_, Some(target))) => SimulationSpan::Until(target),
            Some((raw, None)) => {
                warn!(value = raw, "invalid toTimestamp, simulating one day");
                SimulationSpan::Days(1)
            }
            None => SimulationSpan::Days(1),
        }
    }

    fn usage_refs(self) -> Vec<ItemRef> {
        self.items_to_be_used_per_day
            .into_iter()
            .filter_map(|entry| ItemRef::from_parts(entry.item_id, entry.name))
            .collect()
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "undockingContainerId": "undock-1",
    "undockingDate": "2026-04-01T00:00:00Z",
    "maxWeight": 120.0
}))]
pub struct ReturnPlanRequest {
    pub undocking_container_id: String,
    #[serde(default)]
    pub undocking_date: Option<String>,
    pub max_weight: f64,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUndockingRequest {
    pub undocking_container_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub item_id: Option<String>,
    pub user_id: Option<String>,
    pub action_type: Option<ActionType>,
}

impl LogQuery {
    fn into_filter(self) -> LogFilter {
        let bound = |raw: Option<String>, name: &str| {
            raw.and_then(|value| {
                let parsed = parse_iso8601(&value);
                if parsed.is_none() {
                    warn!(%value, "ignoring invalid {}", name);
                }
                parsed
            })
        };
        LogFilter {
            start: bound(self.start_date, "startDate"),
            end: bound(self.end_date, "endDate"),
            item_id: self.item_id,
            user_id: self.user_id,
            action_type: self.action_type,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ContainerResponse {
    pub success: bool,
    pub container: Container,
}

#[derive(Serialize, ToSchema)]
pub struct ContainersResponse {
    pub success: bool,
    pub containers: Vec<Container>,
}

#[derive(Serialize, ToSchema)]
pub struct ItemResponse {
    pub success: bool,
    pub item: Item,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub found: bool,
    pub item: Option<Item>,
    pub retrieval_steps: Vec<RetrievalStep>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub success: bool,
    pub new_date: DateTime<Utc>,
    pub changes: SimulationChanges,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteResponse {
    pub success: bool,
    pub waste_items: Vec<WasteItem>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPlanResponse {
    pub success: bool,
    pub return_plan: Vec<ReturnStep>,
    pub retrieval_steps: Vec<RetrievalStep>,
    pub return_manifest: ReturnManifest,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UndockingResponse {
    pub success: bool,
    pub items_removed: usize,
}

#[derive(Serialize, ToSchema)]
pub struct LogsResponse {
    pub success: bool,
    pub logs: Vec<ActionLog>,
}

#[derive(Serialize, ToSchema)]
pub struct ArrangementResponse {
    pub success: bool,
    pub arrangement: Vec<ArrangementEntry>,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    success: bool,
    /// Machine-readable error code, e.g. `collision_detected`.
    error: String,
    message: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    message: impl Into<String>,
) -> Response {
    (status, Json(ErrorResponse::new(error, message))).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, "invalid_json", err.body_text())
}

fn query_error(err: QueryRejection) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, "invalid_query", err.body_text())
}

fn status_for(err: &InventoryError) -> StatusCode {
    match err {
        InventoryError::ContainerNotFound(_) | InventoryError::ItemNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        InventoryError::CollisionDetected { .. } | InventoryError::DuplicateId(_) => {
            StatusCode::CONFLICT
        }
        InventoryError::ItemTooLarge { .. }
        | InventoryError::EmptyContainer(_)
        | InventoryError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn inventory_error(err: InventoryError) -> Response {
    error_response(status_for(&err), err.code(), err.to_string())
}

fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload
        .map(|Json(value)| value)
        .map_err(json_deserialize_error)
}

fn ok<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

/// Mission time, used as the fallback for missing or invalid timestamps.
fn mission_now(inventory: &Inventory) -> Result<DateTime<Utc>, Response> {
    inventory.now().map_err(inventory_error)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handle_create_container,
        handle_list_containers,
        handle_create_item,
        handle_place,
        handle_search,
        handle_retrieve,
        handle_simulate,
        handle_identify_waste,
        handle_return_plan,
        handle_complete_undocking,
        handle_logs,
        handle_export_arrangement
    ),
    components(
        schemas(
            Coordinates,
            Position,
            Container,
            Item,
            ActionType,
            ActionLog,
            WasteReason,
            WasteItem,
            RetrievalAction,
            RetrievalStep,
            ItemUsage,
            SimulationChanges,
            ReturnStep,
            ReturnItem,
            ReturnManifest,
            ArrangementEntry,
            PlaceRequest,
            RetrieveRequest,
            UsageRef,
            SimulateRequest,
            ReturnPlanRequest,
            CompleteUndockingRequest,
            ContainerResponse,
            ContainersResponse,
            ItemResponse,
            SearchResponse,
            SimulateResponse,
            WasteResponse,
            ReturnPlanResponse,
            UndockingResponse,
            LogsResponse,
            ArrangementResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "inventory", description = "Containers, items and placement"),
        (name = "retrieval", description = "Search and retrieval"),
        (name = "waste", description = "Waste handling and undocking"),
        (name = "simulation", description = "Mission clock"),
        (name = "logs", description = "Audit log and exports")
    )
)]
struct ApiDoc;

/// Builds the application router for an inventory.
pub fn router(inventory: Arc<Inventory>) -> Router {
    let state = ApiState { inventory };
    Router::new()
        .route(
            "/api/containers",
            post(handle_create_container).get(handle_list_containers),
        )
        .route("/api/items", post(handle_create_item))
        .route("/api/place", post(handle_place))
        .route("/api/search", get(handle_search))
        .route("/api/retrieve", post(handle_retrieve))
        .route("/api/simulate/day", post(handle_simulate))
        .route("/api/waste/identify", get(handle_identify_waste))
        .route("/api/waste/return-plan", post(handle_return_plan))
        .route("/api/waste/complete-undocking", post(handle_complete_undocking))
        .route("/api/logs", get(handle_logs))
        .route("/api/export/arrangement", get(handle_export_arrangement))
        // API documentation
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .with_state(state)
}

/// Starts the API server with an empty in-memory inventory.
///
/// Configures CORS for cross-origin requests from the frontend.
/// Runs until the server is terminated.
pub async fn start_api_server(config: ApiConfig, planner: PlannerConfig) -> std::io::Result<()> {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let inventory = Arc::new(Inventory::new(Arc::new(MemoryStore::new()), planner));
    let app = router(inventory)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        "Server running on http://{}:{}",
        config.display_host(),
        config.port()
    );
    if config.binds_to_all_interfaces() && config.uses_default_host() {
        info!("Local access: http://localhost:{}", config.port());
    }
    info!("Documentation: GET /docs, GET /docs/openapi.json");

    axum::serve(listener, app).await
}

/// Handler for POST /api/containers.
#[utoipa::path(
    post,
    path = "/api/containers",
    request_body = Container,
    responses(
        (status = 200, description = "Container created", body = ContainerResponse),
        (status = CONFLICT, description = "Id already taken", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid container", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_create_container(
    State(state): State<ApiState>,
    payload: Result<Json<Container>, JsonRejection>,
) -> impl IntoResponse {
    let container = match parse_json(payload) {
        Ok(container) => container,
        Err(response) => return response,
    };
    match state.inventory.create_container(container) {
        Ok(container) => ok(ContainerResponse {
            success: true,
            container,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for GET /api/containers.
#[utoipa::path(
    get,
    path = "/api/containers",
    responses(
        (status = 200, description = "All containers, ordered by id", body = ContainersResponse)
    ),
    tag = "inventory"
)]
async fn handle_list_containers(State(state): State<ApiState>) -> impl IntoResponse {
    match state.inventory.containers() {
        Ok(containers) => ok(ContainersResponse {
            success: true,
            containers,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for POST /api/items.
///
/// An item sent with `containerId` and `position` is validated like a placement.
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = Item,
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = NOT_FOUND, description = "Unknown container", body = ErrorResponse),
        (status = CONFLICT, description = "Id taken or collision", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid item or placement", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_create_item(
    State(state): State<ApiState>,
    payload: Result<Json<Item>, JsonRejection>,
) -> impl IntoResponse {
    let item = match parse_json(payload) {
        Ok(item) => item,
        Err(response) => return response,
    };
    match state.inventory.create_item(item) {
        Ok(item) => ok(ItemResponse {
            success: true,
            item,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for POST /api/place.
#[utoipa::path(
    post,
    path = "/api/place",
    request_body = PlaceRequest,
    responses(
        (status = 200, description = "Item placed", body = ItemResponse),
        (status = NOT_FOUND, description = "Unknown item or container", body = ErrorResponse),
        (status = CONFLICT, description = "Box collides with a stored item", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Box does not fit the container", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_place(
    State(state): State<ApiState>,
    payload: Result<Json<PlaceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let now = match mission_now(&state.inventory) {
        Ok(now) => now,
        Err(response) => return response,
    };
    let user_id = request
        .user_id
        .unwrap_or_else(|| state.inventory.config().system_user.clone());
    let timestamp = parse_or(request.timestamp.as_deref(), now);

    match state.inventory.place(
        &request.container_id,
        &request.item_id,
        request.position,
        &user_id,
        Some(timestamp),
    ) {
        Ok(item) => ok(ItemResponse {
            success: true,
            item,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for GET /api/search.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Search result, `found` is false when nothing matches", body = SearchResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Neither itemId nor itemName given", body = ErrorResponse)
    ),
    tag = "retrieval"
)]
async fn handle_search(
    State(state): State<ApiState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(err) => return query_error(err),
    };
    let Some(reference) = ItemRef::from_parts(query.item_id, query.item_name) else {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_input",
            "Either itemId or itemName must be provided",
        );
    };

    match state.inventory.search(&reference, query.user_id.as_deref()) {
        Ok(outcome) => ok(SearchResponse {
            success: true,
            found: outcome.found,
            item: outcome.item,
            retrieval_steps: outcome.retrieval_steps,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for POST /api/retrieve.
#[utoipa::path(
    post,
    path = "/api/retrieve",
    request_body = RetrieveRequest,
    responses(
        (status = 200, description = "Usage recorded", body = ItemResponse),
        (status = NOT_FOUND, description = "Unknown item", body = ErrorResponse)
    ),
    tag = "retrieval"
)]
async fn handle_retrieve(
    State(state): State<ApiState>,
    payload: Result<Json<RetrieveRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let now = match mission_now(&state.inventory) {
        Ok(now) => now,
        Err(response) => return response,
    };
    let user_id = request
        .user_id
        .unwrap_or_else(|| state.inventory.config().system_user.clone());
    let timestamp = parse_or(request.timestamp.as_deref(), now);

    match state
        .inventory
        .retrieve(&request.item_id, &user_id, Some(timestamp))
    {
        Ok(item) => ok(ItemResponse {
            success: true,
            item,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for POST /api/simulate/day.
#[utoipa::path(
    post,
    path = "/api/simulate/day",
    request_body = SimulateRequest,
    responses(
        (status = 200, description = "Clock advanced", body = SimulateResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Span too long to simulate", body = ErrorResponse)
    ),
    tag = "simulation"
)]
async fn handle_simulate(
    State(state): State<ApiState>,
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let span = request.span();
    let usage = request.usage_refs();

    match state.inventory.simulate(span, &usage) {
        Ok(outcome) => ok(SimulateResponse {
            success: true,
            new_date: outcome.new_date,
            changes: outcome.changes,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for GET /api/waste/identify.
#[utoipa::path(
    get,
    path = "/api/waste/identify",
    responses(
        (status = 200, description = "Expired and used-up items", body = WasteResponse)
    ),
    tag = "waste"
)]
async fn handle_identify_waste(State(state): State<ApiState>) -> impl IntoResponse {
    match state.inventory.identify_waste() {
        Ok(waste_items) => ok(WasteResponse {
            success: true,
            waste_items,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for POST /api/waste/return-plan.
#[utoipa::path(
    post,
    path = "/api/waste/return-plan",
    request_body = ReturnPlanRequest,
    responses(
        (status = 200, description = "Return plan within the weight budget", body = ReturnPlanResponse),
        (status = NOT_FOUND, description = "Unknown undocking container", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid weight budget", body = ErrorResponse)
    ),
    tag = "waste"
)]
async fn handle_return_plan(
    State(state): State<ApiState>,
    payload: Result<Json<ReturnPlanRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let now = match mission_now(&state.inventory) {
        Ok(now) => now,
        Err(response) => return response,
    };
    let undocking_date = parse_or(request.undocking_date.as_deref(), now);

    match state.inventory.plan_return(
        &request.undocking_container_id,
        undocking_date,
        request.max_weight,
    ) {
        Ok(plan) => ok(ReturnPlanResponse {
            success: true,
            return_plan: plan.return_plan,
            retrieval_steps: plan.retrieval_steps,
            return_manifest: plan.return_manifest,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for POST /api/waste/complete-undocking.
#[utoipa::path(
    post,
    path = "/api/waste/complete-undocking",
    request_body = CompleteUndockingRequest,
    responses(
        (status = 200, description = "Items removed", body = UndockingResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Container holds no items", body = ErrorResponse)
    ),
    tag = "waste"
)]
async fn handle_complete_undocking(
    State(state): State<ApiState>,
    payload: Result<Json<CompleteUndockingRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let now = match mission_now(&state.inventory) {
        Ok(now) => now,
        Err(response) => return response,
    };
    let timestamp = parse_or(request.timestamp.as_deref(), now);

    match state
        .inventory
        .complete_undocking(&request.undocking_container_id, Some(timestamp))
    {
        Ok(items_removed) => ok(UndockingResponse {
            success: true,
            items_removed,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for GET /api/logs.
#[utoipa::path(
    get,
    path = "/api/logs",
    params(LogQuery),
    responses(
        (status = 200, description = "Matching audit records, oldest first", body = LogsResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Unknown actionType", body = ErrorResponse)
    ),
    tag = "logs"
)]
async fn handle_logs(
    State(state): State<ApiState>,
    query: Result<Query<LogQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(err) => return query_error(err),
    };
    match state.inventory.logs(&query.into_filter()) {
        Ok(logs) => ok(LogsResponse {
            success: true,
            logs,
        }),
        Err(err) => inventory_error(err),
    }
}

/// Handler for GET /api/export/arrangement.
#[utoipa::path(
    get,
    path = "/api/export/arrangement",
    responses(
        (status = 200, description = "Every placed item with its box", body = ArrangementResponse)
    ),
    tag = "logs"
)]
async fn handle_export_arrangement(State(state): State<ApiState>) -> impl IntoResponse {
    match state.inventory.arrangement() {
        Ok(arrangement) => ok(ArrangementResponse {
            success: true,
            arrangement,
        }),
        Err(err) => inventory_error(err),
    }
}

async fn serve_openapi_json(State(_state): State<ApiState>) -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui(State(_state): State<ApiState>) -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
