//! Service index and the catch-all 404

use axum::{Json, extract::Request, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};

use crate::utils::{ApiResponse, AppError, ErrorCode};

fn available_endpoints() -> Value {
    json!({
        "auth": ["POST /api/signup", "POST /api/login"],
        "employees": [
            "GET /api/employees",
            "POST /api/employees",
            "GET /api/employees/search/by?department=&position=",
            "GET /api/employees/{id}",
            "PUT /api/employees/{id}",
            "DELETE /api/employees/{id}"
        ],
        "uploads": ["GET /uploads/{filename}"],
        "health": ["GET /health", "GET /health/detailed"]
    })
}

/// `GET /` - service info
pub async fn index() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success_with_message(
        "Employee directory API is running",
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": available_endpoints(),
        }),
    ))
}

/// Fallback for unmatched routes
pub async fn not_found(req: Request) -> impl IntoResponse {
    let err = AppError::with_message(ErrorCode::NotFound, "Route not found")
        .with_detail("path", req.uri().path())
        .with_detail("method", req.method().as_str())
        .with_detail("available_endpoints", available_endpoints());
    (StatusCode::NOT_FOUND, Json(ApiResponse::<()>::error(&err)))
}
