//! Accommodation API handlers
//!
//! Catalog search and detail are public; creating a listing requires a
//! session token. Image upload stores files and returns their URLs.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::PathRejection, Multipart, Path, RawQuery,
        State,
    },
    http::StatusCode,
    Extension, Json,
};
use tracing::{debug, warn};

use super::dto::{
    parse_listing_query, CreateListingRequest, ListingDetailDto, ListingListResponse,
    ListingParams, ListingSummaryDto, UploadForm, UploadResponse,
};
use crate::application::{CatalogService, MediaService, UploadFile};
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    ApiError, ErrorCode, MessageResponse, ValidatedJson, SUCCESS,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Multipart field carrying the uploaded files
pub const UPLOAD_FIELD: &str = "fileNames";

#[derive(Clone)]
pub struct AccommodationState {
    pub catalog: Arc<CatalogService>,
    pub media: Arc<MediaService>,
}

#[utoipa::path(
    get,
    path = "/accommodation",
    tag = "Accommodations",
    params(ListingParams),
    responses(
        (status = 200, description = "One page of listings", body = ListingListResponse),
        (status = 400, description = "KEY_ERROR or INVALID_VALUE", body = MessageResponse)
    )
)]
pub async fn list_accommodations(
    State(state): State<AccommodationState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ListingListResponse>, ApiError> {
    let query = parse_listing_query(raw.as_deref())?;
    let page = state.catalog.list(query).await?.map(ListingSummaryDto::from);

    Ok(Json(ListingListResponse {
        message: SUCCESS.to_string(),
        index: page.total_pages,
        data: page.items,
    }))
}

#[utoipa::path(
    get,
    path = "/accommodation/{id}",
    tag = "Accommodations",
    params(("id" = i32, Path, description = "Accommodation ID")),
    responses(
        (status = 200, description = "Listing detail", body = ListingDetailDto),
        (status = 404, description = "PAGE_NOT_FOUND", body = MessageResponse),
        (status = 500, description = "IMAGE_DOES_NOT_EXIST", body = MessageResponse)
    )
)]
pub async fn get_accommodation(
    State(state): State<AccommodationState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ListingDetailDto>, ApiError> {
    let Ok(Path(id)) = path else {
        return Err(ApiError::new(ErrorCode::PageNotFound));
    };

    let missing_image = || {
        ApiError::new(ErrorCode::ImageDoesNotExist)
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            .with_detail(format!("accommodation {} has no image", id))
    };

    let record = match state.catalog.detail(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return Err(ApiError::new(ErrorCode::PageNotFound)),
        Err(DomainError::Integrity(_)) => return Err(missing_image()),
        Err(e) => return Err(e.into()),
    };

    ListingDetailDto::from_record(record)
        .map(Json)
        .ok_or_else(missing_image)
}

#[utoipa::path(
    post,
    path = "/accommodation",
    tag = "Accommodations",
    security(("bearer_auth" = [])),
    request_body = CreateListingRequest,
    responses(
        (status = 200, description = "Listing created", body = MessageResponse),
        (status = 400, description = "KEY_ERROR, INVALID_VALUE or CATEGORY_DOES_NOT_EXIST", body = MessageResponse),
        (status = 401, description = "NEED_LOGIN, INVALID_TOKEN or INVALID_USER", body = MessageResponse)
    )
)]
pub async fn create_accommodation(
    State(state): State<AccommodationState>,
    Extension(host): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateListingRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.catalog.create(host.id, request.into()).await?;
    Ok(MessageResponse::success())
}

#[utoipa::path(
    post,
    path = "/accommodation/file",
    tag = "Accommodations",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Public URLs in upload order", body = UploadResponse),
        (status = 400, description = "IMAGE_DOES_NOT_EXIST or KEY_ERROR", body = MessageResponse)
    )
)]
pub async fn upload_files(
    State(state): State<AccommodationState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!(error = %e, "Upload is not a multipart form");
        ApiError::new(ErrorCode::KeyError)
    })?;

    let malformed = |e: axum::extract::multipart::MultipartError| {
        ApiError::new(ErrorCode::KeyError).with_detail(e.to_string())
    };

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await.map_err(malformed)?;
        files.push(UploadFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let file_urls = state.media.upload(files).await?;
    Ok(Json(UploadResponse { file_urls }))
}
