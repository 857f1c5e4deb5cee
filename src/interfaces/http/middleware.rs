//! Anti-forgery middleware (double-submit cookie)
//!
//! Every response from a protected router carries a `csrf_token` cookie and
//! every request gets the token in its extensions, so form views can echo
//! it. A `POST` must send the same value in `X-CSRF-Token`.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::infrastructure::crypto::csrf::{generate_token, is_well_formed, tokens_match};
use crate::interfaces::http::common::ApiResponse;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Anti-forgery token for the current request, stored in extensions.
///
/// Extract in handlers: `Extension(CsrfToken(token)): Extension<CsrfToken>`
#[derive(Clone, Debug)]
pub struct CsrfToken(pub String);

/// Value of cookie `name` from the `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn rejection() -> Response {
    let body = Json(ApiResponse::<()>::error(
        "The anti-forgery token is missing or does not match",
    ));
    (StatusCode::BAD_REQUEST, body).into_response()
}

pub async fn csrf_middleware(mut request: Request<Body>, next: Next) -> Response {
    let issued = cookie_value(request.headers(), CSRF_COOKIE)
        .filter(|token| is_well_formed(token))
        .map(String::from);

    if request.method() == Method::POST {
        let submitted = request
            .headers()
            .get(CSRF_HEADER)
            .and_then(|h| h.to_str().ok());

        let valid = match (submitted, issued.as_deref()) {
            (Some(submitted), Some(issued)) => tokens_match(submitted, issued),
            _ => false,
        };
        if !valid {
            warn!(uri = %request.uri(), "Rejected post with bad anti-forgery token");
            return rejection();
        }
    }

    let (token, fresh) = match issued {
        Some(token) => (token, false),
        None => (generate_token(), true),
    };
    request.extensions_mut().insert(CsrfToken(token.clone()));

    let mut response = next.run(request).await;

    if fresh {
        let cookie = format!("{CSRF_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}
