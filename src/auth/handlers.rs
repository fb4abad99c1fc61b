use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{CreatedUser, LoginRequest, LoginResponse, PublicUser, SignupRequest, SignupResponse},
        extractors::SESSION_COOKIE,
        services,
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signin", post(signin))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<LoginResponse>), AppError> {
    let Json(payload) = payload.map_err(|r| bad_body(r, services::LOGIN_FIELDS_REQUIRED))?;
    let out = services::login(state.users.as_ref(), &state.jwt, payload).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(&out.token, state.jwt.ttl().whole_seconds(), state.config.cookie_secure)?,
    );

    Ok((
        headers,
        Json(LoginResponse {
            success: true,
            token: out.token,
            message: "Login successful",
            role: out.user.role,
            user: PublicUser::from(&out.user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let Json(payload) = payload.map_err(|r| bad_body(r, services::SIGNUP_FIELDS_REQUIRED))?;
    let user = services::signup(state.users.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            message: "Signup successful",
            user: CreatedUser::from(&user),
        }),
    ))
}

fn session_cookie(token: &str, max_age: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.into()))
}

/// A body that is absent, not JSON, or not labelled as JSON reports the route's
/// required-fields message. Well-formed JSON with wrong field types keeps the
/// extractor's detail.
pub(crate) fn bad_body(rejection: JsonRejection, missing: &str) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) | JsonRejection::JsonSyntaxError(_) => {
            AppError::Validation(missing.to_string())
        }
        other => AppError::Validation(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_flags() {
        let v = session_cookie("abc", 86400, false).unwrap();
        let s = v.to_str().unwrap();
        assert!(s.starts_with("token=abc;"));
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("SameSite=Strict"));
        assert!(s.contains("Max-Age=86400"));
        assert!(!s.contains("Secure"));

        let v = session_cookie("abc", 60, true).unwrap();
        assert!(v.to_str().unwrap().ends_with("; Secure"));
    }
}
