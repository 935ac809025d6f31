use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::reservation::ReservationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Reservation(#[from] ReservationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Reservation(e) => reservation_status(e),
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

fn reservation_status(err: &ReservationError) -> StatusCode {
    match err {
        ReservationError::MissingField(_) | ReservationError::InvalidTime(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ReservationError::UnknownService | ReservationError::BookingNotFound => {
            StatusCode::NOT_FOUND
        }
        ReservationError::SlotUnavailable
        | ReservationError::SlotReserved
        | ReservationError::AlreadyCancelled
        | ReservationError::NotActive => StatusCode::CONFLICT,
        ReservationError::DepositRequired { .. } => StatusCode::PAYMENT_REQUIRED,
        ReservationError::Forbidden => StatusCode::FORBIDDEN,
        ReservationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
