//! Maps backend failures onto HTML error pages.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use folio_core::AppError;

use super::render::{ErrorPage, render};

/// An [`AppError`] raised while building a page.
#[derive(Debug)]
pub struct SiteError(pub AppError);

impl From<AppError> for SiteError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl SiteError {
    /// Status of the page shown for this error. A missing record stays a
    /// 404, every other upstream failure is a bad gateway.
    pub fn status_code(&self) -> StatusCode {
        match self.0.status {
            404 => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::BAD_GATEWAY {
            tracing::error!(error = %self.0, "Backend request failed");
        }

        let page = ErrorPage {
            code: status.as_u16(),
            message: self.0.user_message(),
        };
        match render(&page) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, page.message).into_response(),
        }
    }
}
