use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use snipx_core::errors::{ExError, ExErrorKind};

use crate::views;

/// Engine error on its way to becoming a response
///
/// Silent-deny kinds redirect to the listing root and a missing login
/// redirects to the login page. Anything unexpected becomes a generic 500
/// page; the error rides along in the response extensions so the request
/// middleware can log it.
#[derive(Debug)]
pub struct WebError(pub ExError);

impl From<ExError> for WebError {
    fn from(err: ExError) -> Self {
        WebError(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self.0.kind() {
            ExErrorKind::NotFound | ExErrorKind::Forbidden => Redirect::to("/").into_response(),
            ExErrorKind::Unauthorised => Redirect::to("/login/").into_response(),
            ExErrorKind::InvalidInput => (
                StatusCode::BAD_REQUEST,
                Html(views::error_page("The request could not be processed.").into_string()),
            )
                .into_response(),
            _ => {
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page("Something went wrong.").into_string()),
                )
                    .into_response();
                response.extensions_mut().insert(self.0);
                response
            }
        }
    }
}
