//! Error handling module for the favourites backend.
//!
//! Provides one closed error type with mapping to HTTP status codes and the
//! error response envelope. Internal-class errors never leak detail to the
//! client; whatever caused them is logged at the point of failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const ASSET_NOT_FOUND: &str = "ASSET_NOT_FOUND";
    pub const FAVOURITE_NOT_FOUND: &str = "FAVOURITE_NOT_FOUND";
    pub const NOT_OWNER: &str = "NOT_OWNER";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
///
/// Domain errors carry no payload and compare by identity; that keeps the
/// service layer free of string matching when it maps storage outcomes to
/// responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Authentication failed or the token is missing/invalid
    Unauthorized(String),
    /// Malformed or out-of-range request input
    Validation(String),
    /// No registry owns the referenced asset id
    AssetNotFound,
    /// No favourite with the given id
    FavouriteNotFound,
    /// The favourite belongs to a different user
    FavouriteNotOwned,
    /// A registry returned an asset no favourite on the page references
    FavouriteMissingForAsset,
    /// The favourite store rejected a write
    CouldNotSaveFavourite,
    /// Unclassified failure on a read path
    Unexpected,
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AssetNotFound => StatusCode::NOT_FOUND,
            AppError::FavouriteNotFound => StatusCode::NOT_FOUND,
            AppError::FavouriteNotOwned => StatusCode::UNAUTHORIZED,
            AppError::FavouriteMissingForAsset => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::CouldNotSaveFavourite => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::AssetNotFound => codes::ASSET_NOT_FOUND,
            AppError::FavouriteNotFound => codes::FAVOURITE_NOT_FOUND,
            AppError::FavouriteNotOwned => codes::NOT_OWNER,
            AppError::FavouriteMissingForAsset => codes::INTERNAL_ERROR,
            AppError::CouldNotSaveFavourite => codes::INTERNAL_ERROR,
            AppError::Unexpected => codes::INTERNAL_ERROR,
        }
    }

    /// Get the client-facing error message. The 500 class is collapsed to a
    /// generic message so internal detail stays in the logs.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::AssetNotFound => "Could not find asset with this id".to_string(),
            AppError::FavouriteNotFound => "Could not find favourite with this id".to_string(),
            AppError::FavouriteNotOwned => "Favourite is not under given user".to_string(),
            AppError::FavouriteMissingForAsset
            | AppError::CouldNotSaveFavourite
            | AppError::Unexpected => "Internal Server Error".to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
