//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, ValidationFailure};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{catalog, checkout, health};
use crate::application::{CheckoutService, StepStatus, StepperItem, Summary};
use crate::domain::booking::{
    AddOnSelection, Area, BookingDraft, BudgetTier, CardDetails, Country, DraftUpdate, FoodDrinkOption, Interest,
    Occasion, PhoneNumber, TimeSlot,
};
use crate::domain::checkout::{Confirmation, Layout, Phase, Step};

/// Shared state for every API route. Handlers pick their slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CheckoutService>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(service: Arc<CheckoutService>) -> Self {
        Self {
            service,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<AppState> for checkout::CheckoutState {
    fn from_ref(s: &AppState) -> Self {
        checkout::CheckoutState {
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<AppState> for catalog::CatalogState {
    fn from_ref(s: &AppState) -> Self {
        catalog::CatalogState {
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            service: Arc::clone(&s.service),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Catalog
        catalog::get_catalog,
        catalog::get_end_times,
        // Checkout
        checkout::create_checkout,
        checkout::get_checkout,
        checkout::update_draft,
        checkout::next_step,
        checkout::previous_step,
        checkout::submit_payment,
        checkout::discard_checkout,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            ValidationFailure,
            // Catalog
            catalog::CatalogDto,
            catalog::OptionDto,
            catalog::BudgetTierDto,
            catalog::FoodDrinkOptionDto,
            catalog::InterestDto,
            catalog::CountryDto,
            catalog::GroupSizeRange,
            Area,
            TimeSlot,
            BudgetTier,
            FoodDrinkOption,
            Interest,
            Occasion,
            Country,
            // Checkout
            checkout::CreateCheckoutRequest,
            checkout::UpdateDraftRequest,
            checkout::CheckoutView,
            DraftUpdate,
            BookingDraft,
            PhoneNumber,
            CardDetails,
            AddOnSelection,
            Summary,
            StepperItem,
            StepStatus,
            Confirmation,
            Layout,
            Step,
            Phase,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and session count"),
        (name = "Catalog", description = "Option lists, limits and the current minimum date"),
        (name = "Checkout", description = "Checkout sessions: draft updates, step navigation and payment"),
    ),
    info(
        title = "Night Out Checkout API",
        version = "1.0.0",
        description = "Multi-step booking and simulated payment for night out reservations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `metrics` is served at `/metrics` when a Prometheus recorder is installed.
pub fn create_api_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let checkout_routes = Router::new()
        .route("/", post(checkout::create_checkout))
        .route(
            "/{id}",
            get(checkout::get_checkout).delete(checkout::discard_checkout),
        )
        .route("/{id}/draft", patch(checkout::update_draft))
        .route("/{id}/next", post(checkout::next_step))
        .route("/{id}/back", post(checkout::previous_step))
        .route("/{id}/payment", post(checkout::submit_payment));

    let catalog_routes = Router::new()
        .route("/", get(catalog::get_catalog))
        .route("/end-times", get(catalog::get_end_times));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1/checkouts", checkout_routes)
        .nest("/api/v1/catalog", catalog_routes)
        .with_state(state);

    if let Some(handle) = metrics {
        let metrics_routes = Router::new()
            .route("/metrics", get(prometheus_metrics))
            .with_state(MetricsState { handle });
        router = router.merge(metrics_routes);
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::application::{CheckoutRules, CheckoutSettings};
    use crate::infrastructure::{InMemorySessionRepository, SimulatedPaymentGateway};
    use crate::shared::time::FixedClock;

    fn app(layout: Layout) -> Router {
        let service = CheckoutService::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(SimulatedPaymentGateway::new(Duration::from_millis(2000))),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())),
            CheckoutSettings {
                layout,
                rules: CheckoutRules::default(),
            },
        );
        create_api_router(AppState::new(Arc::new(service)), None)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn create(app: &Router) -> String {
        let (status, json) = call(app, Method::POST, "/api/v1/checkouts", None).await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_str().unwrap().to_string()
    }

    fn survey(group_size: Value) -> Value {
        json!({ "updates": [
            {"field": "firstName", "value": "Ada"},
            {"field": "lastName", "value": "Lovelace"},
            {"field": "phoneCountry", "value": "US"},
            {"field": "phoneNumber", "value": "2065550100"},
            {"field": "preferredArea", "value": "capitol-hill"},
            {"field": "groupSize", "value": group_size},
            {"field": "date", "value": "2026-10-20"},
            {"field": "startTime", "value": "5:00 PM"},
            {"field": "endTime", "value": "11:00 PM"},
            {"field": "budget", "value": "150"},
            {"field": "foodDrink", "value": {"option": "dinner", "selected": true}},
            {"field": "interest", "value": {"interest": "nightlife", "selected": true}},
            {"field": "essentialComms", "value": true}
        ]})
    }

    fn card() -> Value {
        json!({ "updates": [
            {"field": "cardNumber", "value": "4242424242424242"},
            {"field": "cardName", "value": "Ada Lovelace"},
            {"field": "expiry", "value": "1228"},
            {"field": "cvc", "value": "123"}
        ]})
    }

    #[tokio::test]
    async fn health_reports_sessions() {
        let app = app(Layout::Wizard);
        create(&app).await;
        let (status, json) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["active_sessions"], 1);
    }

    #[tokio::test]
    async fn catalog_lists_options_and_min_date() {
        let app = app(Layout::Wizard);
        let (status, json) = call(&app, Method::GET, "/api/v1/catalog", None).await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["minDate"], "2026-10-20");
        assert_eq!(data["budgetTiers"].as_array().unwrap().len(), 5);
        assert_eq!(data["countries"].as_array().unwrap().len(), 18);
        assert_eq!(data["groupSize"]["min"], 2);
        assert_eq!(data["endTimes"]["8:00 PM"], json!(["10:00 PM", "11:00 PM", "12:00 AM"]));
    }

    #[tokio::test]
    async fn catalog_filters_countries() {
        let app = app(Layout::Wizard);
        let (_, json) = call(&app, Method::GET, "/api/v1/catalog?country=united", None).await;
        let names: Vec<&str> = json["data"]["countries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["United States", "United Kingdom"]);
    }

    #[tokio::test]
    async fn end_times_for_start() {
        let app = app(Layout::Wizard);
        let (status, json) = call(&app, Method::GET, "/api/v1/catalog/end-times?start=7:00%20PM", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], json!(["9:00 PM", "10:00 PM", "11:00 PM", "12:00 AM"]));

        let (status, json) = call(&app, Method::GET, "/api/v1/catalog/end-times?start=11:00%20PM", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["data"]["focus"], "startTime");
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let app = app(Layout::Wizard);
        let uri = format!("/api/v1/checkouts/{}", uuid::Uuid::new_v4());
        let (status, json) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn empty_group_size_blocks_with_focus() {
        let app = app(Layout::SinglePage);
        let id = create(&app).await;
        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/checkouts/{id}/draft"),
            Some(survey(Value::Null)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = call(&app, Method::POST, &format!("/api/v1/checkouts/{id}/next"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["data"]["focus"], "groupSize");
        assert_eq!(json["data"]["errors"]["groupSize"], "Minimum 2 people required");

        let (_, json) = call(&app, Method::GET, &format!("/api/v1/checkouts/{id}"), None).await;
        assert_eq!(json["data"]["step"], "survey");
        assert_eq!(json["data"]["focus"], "groupSize");
    }

    #[tokio::test]
    async fn single_page_focus_skips_earlier_declared_fields() {
        let app = app(Layout::SinglePage);
        let id = create(&app).await;
        let (status, json) = call(&app, Method::POST, &format!("/api/v1/checkouts/{id}/next"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["data"]["errors"]["firstName"], "First name is required");
        assert_eq!(json["data"]["focus"], "groupSize");
    }

    #[tokio::test]
    async fn invalid_update_body_is_rejected() {
        let app = app(Layout::Wizard);
        let id = create(&app).await;
        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/checkouts/{id}/draft"),
            Some(json!({"updates": []})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn back_from_first_step_conflicts() {
        let app = app(Layout::Wizard);
        let id = create(&app).await;
        let (status, _) = call(&app, Method::POST, &format!("/api/v1/checkouts/{id}/back"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test(start_paused = true)]
    async fn end_to_end_booking() {
        let app = app(Layout::SinglePage);
        let id = create(&app).await;
        let base = format!("/api/v1/checkouts/{id}");

        let (status, json) = call(&app, Method::PATCH, &format!("{base}/draft"), Some(survey(json!(4)))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["summary"]["total"], 600);
        assert_eq!(json["data"]["summary"]["date"], "October 20th, 2026");
        assert_eq!(json["data"]["summary"]["timeRange"], "5:00 PM - 11:00 PM");

        let (status, json) = call(&app, Method::POST, &format!("{base}/next"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["step"], "payment");

        let (status, json) = call(&app, Method::PATCH, &format!("{base}/draft"), Some(card())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["draft"]["card"]["cardNumber"], "4242 4242 4242 4242");
        assert_eq!(json["data"]["draft"]["card"]["expiry"], "12/28");
        assert!(json["data"]["draft"]["card"].get("cvc").is_none());

        let (status, json) = call(&app, Method::POST, &format!("{base}/payment"), None).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json["data"]["phase"], "processing");

        let (status, _) = call(&app, Method::POST, &format!("{base}/payment"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        tokio::time::sleep(Duration::from_millis(2100)).await;

        let (_, json) = call(&app, Method::GET, &base, None).await;
        let data = &json["data"];
        assert_eq!(data["phase"], "confirmed");
        assert_eq!(data["step"], "confirmed");
        assert!(data["draft"].is_null());
        assert_eq!(data["confirmation"]["total"], 600);
        assert_eq!(data["confirmation"]["title"], "Booking Confirmed!");

        let (status, _) = call(&app, Method::PATCH, &format!("{base}/draft"), Some(survey(json!(5)))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(&app, Method::DELETE, &base, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn openapi_is_served() {
        let app = app(Layout::Wizard);
        let (status, json) = call(&app, Method::GET, "/api-doc/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["paths"]["/api/v1/checkouts/{id}/payment"].is_object());
    }
}
