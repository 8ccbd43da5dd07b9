use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
    trace::TraceLayer,
};

use crate::auth::confirmation::ConfirmationRegistry;
use crate::auth::jwt::JwtManager;
use crate::auth::middleware::require_bearer;
use crate::auth::services::AuthService;
use crate::config::{Config, HttpConfig};
use crate::db::repositories::{AppealStore, UserStore};
use crate::handlers::appeal::create_appeal;
use crate::handlers::auth::{check_mail, sign_in, sign_up};
use crate::handlers::health::health;
use crate::handlers::user::{create_user, delete_user, get_user_by_email, get_user_by_id};
use crate::mail::Mailer;
use crate::services::{AppealService, RegistrationService, UserService};

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: AuthService,
    pub users: UserService,
    pub registration: RegistrationService,
    pub appeals: AppealService,
}

impl AppState {
    pub fn new(
        config: Config,
        user_store: Arc<dyn UserStore>,
        appeal_store: Arc<dyn AppealStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let jwt = Arc::new(JwtManager::from_config(&config.jwt));
        let users = UserService::new(user_store);
        let auth = AuthService::new(users.clone(), jwt);
        let registration = RegistrationService::new(
            users.clone(),
            auth.clone(),
            mailer.clone(),
            ConfirmationRegistry::new(),
            config.registration.confirmation_timeout(),
        );
        let appeals = AppealService::new(appeal_store, mailer, &config.appeal.documents_dir);

        Self {
            config: Arc::new(config),
            auth,
            users,
            registration,
            appeals,
        }
    }
}

fn cors_layer(http: &HttpConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = http
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Builds the complete application.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/appeal", post(create_appeal))
        .layer(DefaultBodyLimit::max(state.config.appeal.max_document_bytes))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let timed = Router::new()
        .route("/health", get(health))
        .route("/sign_in/mail", post(sign_in))
        .route("/sign_up/checkmail", post(check_mail))
        .route("/users", post(create_user))
        .route("/users/email", get(get_user_by_email))
        .route("/users/profile/{id}", get(get_user_by_id).delete(delete_user))
        .nest("/protected", protected)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.http.write_timeout(),
        ));

    // Held open until the confirmation code arrives or the registration times out.
    let handshake = Router::new().route("/sign_up", post(sign_up));

    Router::new()
        .merge(timed)
        .merge(handshake)
        .fallback_service(ServeDir::new(&state.config.http.static_dir))
        .layer(RequestBodyTimeoutLayer::new(state.config.http.read_timeout()))
        .layer(cors_layer(&state.config.http))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
