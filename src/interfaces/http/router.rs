//! API Router with Swagger UI

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    BookingService, CatalogService, IdentityService, MediaService, ObjectStore,
    SocialIdentityProvider,
};
use crate::config::{AppConfig, StorageBackendKind};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::SeaOrmRepositoryProvider;
use crate::interfaces::http::common::MessageResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};

use super::modules::request_id::request_id_middleware;
use super::modules::{accommodations, health, reservations, users};

/// Upper bound on one `POST /accommodation/file` body
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Everything the handlers need, wired once at startup.
#[derive(Clone)]
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub catalog: Arc<CatalogService>,
    pub media: Arc<MediaService>,
    pub booking: Arc<BookingService>,
    pub identity: Arc<IdentityService>,
    /// Served at `/media` when uploads land on the local filesystem
    pub media_dir: Option<PathBuf>,
}

impl ApiContext {
    pub fn new(
        db: DatabaseConnection,
        identity_provider: Arc<dyn SocialIdentityProvider>,
        store: Arc<dyn ObjectStore>,
        config: &AppConfig,
    ) -> Self {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let media_dir = match config.storage.backend {
            StorageBackendKind::Local => Some(config.storage.local_dir.clone()),
            StorageBackendKind::S3 => None,
        };

        Self {
            db,
            catalog: Arc::new(CatalogService::new(
                repos.clone(),
                config.catalog.default_limit,
            )),
            media: Arc::new(MediaService::new(store)),
            booking: Arc::new(BookingService::new(repos.clone())),
            identity: Arc::new(IdentityService::new(
                repos,
                identity_provider,
                JwtConfig::from(&config.security),
                config.kakao.default_profile_image.clone(),
            )),
            media_dir,
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token from /user/kakao/signin; the `Bearer ` prefix is optional",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        accommodations::list_accommodations,
        accommodations::get_accommodation,
        accommodations::create_accommodation,
        accommodations::upload_files,
        reservations::list_reservations,
        reservations::purchase,
        users::kakao_signin,
    ),
    components(
        schemas(
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            health::StorageHealth,
            accommodations::ListingListResponse,
            accommodations::ListingSummaryDto,
            accommodations::ListingDetailDto,
            accommodations::RoomTypeDto,
            accommodations::GradeDto,
            accommodations::CommentDto,
            accommodations::CreateListingRequest,
            accommodations::UnavailableDateDto,
            accommodations::UploadForm,
            accommodations::UploadResponse,
            reservations::ReservationHistoryResponse,
            reservations::ReservationResults,
            reservations::ReservationEntryDto,
            reservations::PurchaseRequestDto,
            users::SignInResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Accommodations", description = "Listing search, detail, creation and image upload"),
        (name = "Reservations", description = "Trip history and booking"),
        (name = "Users", description = "Social sign-in"),
    ),
    info(
        title = "Lodging Marketplace API",
        version = "1.0.0",
        description = "Listings, reviews, reservations and Kakao sign-in",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let auth_state = AuthState {
        identity: ctx.identity.clone(),
    };
    let login_required = || middleware::from_fn_with_state(auth_state.clone(), auth_middleware);

    // Accommodations: list/detail/upload public, create guarded
    let accommodation_routes = Router::new()
        .route(
            "/accommodation",
            get(accommodations::list_accommodations)
                .merge(post(accommodations::create_accommodation).route_layer(login_required())),
        )
        .route(
            "/accommodation/file",
            post(accommodations::upload_files).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/accommodation/{id}", get(accommodations::get_accommodation))
        .with_state(accommodations::AccommodationState {
            catalog: ctx.catalog.clone(),
            media: ctx.media.clone(),
        });

    // Reservations (protected)
    let reservation_routes = Router::new()
        .route("/reservation", get(reservations::list_reservations))
        .route("/reservation/purchase", post(reservations::purchase))
        .route_layer(login_required())
        .with_state(reservations::ReservationState {
            booking: ctx.booking.clone(),
        });

    // Users (public)
    let user_routes = Router::new()
        .route("/user/kakao/signin", post(users::kakao_signin))
        .with_state(users::UserState {
            identity: ctx.identity.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: ctx.db.clone(),
            started_at: Arc::new(Instant::now()),
            media_dir: ctx.media_dir.clone(),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(accommodation_routes)
        .merge(reservation_routes)
        .merge(user_routes);

    if let Some(dir) = ctx.media_dir {
        router = router.nest_service("/media", ServeDir::new(dir));
    }

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
