use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

/// Caller identity, as established by the upstream auth gateway.
///
/// Authentication itself lives outside this service; by the time a request
/// reaches us the gateway has already verified the session and stamped the
/// user id into this header.
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match user_id {
            Some(user_id) => Ok(UserId(user_id.to_string())),
            None => Err(StatusCode::UNAUTHORIZED),
        }
    }
}
