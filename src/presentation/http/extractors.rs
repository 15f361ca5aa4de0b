// src/presentation/http/extractors.rs
use crate::application::{dto::Actor, error::ApplicationError};
use axum::{extract::FromRequestParts, http::request::Parts};

use super::error::HttpError;

/// Header carrying the caller's identity, set by the gateway in front of this
/// service.
pub const ACTOR_HEADER: &str = "x-actor-id";

#[derive(Debug, Clone)]
pub struct Authenticated(pub Actor);

#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<Actor>);

pub(crate) fn actor_from_parts(parts: &Parts) -> Option<Result<Actor, ApplicationError>> {
    let value = parts.headers.get(ACTOR_HEADER)?;
    let actor = value
        .to_str()
        .map_err(|_| ApplicationError::authentication("actor header is not valid text"))
        .and_then(Actor::new);
    Some(actor)
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = actor_from_parts(parts).unwrap_or_else(|| {
            Err(ApplicationError::authentication(format!(
                "missing {ACTOR_HEADER} header"
            )))
        })?;
        Ok(Self(actor))
    }
}

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(actor_from_parts(parts).transpose()?))
    }
}
