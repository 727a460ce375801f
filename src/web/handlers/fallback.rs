use crate::error::AppError;

/// Answers unmatched routes and unsupported methods with the 404 error page.
pub async fn not_found_handler() -> AppError {
    AppError::RouteNotFound
}
