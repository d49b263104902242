//! Login and the capability gate in front of the protected routes.

use api_types::auth::{Login, LoginResponse};
use axum::{
    Json,
    extract::{Request, State, rejection::JsonRejection},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::Utc;
use engine::{Capability, EngineError};

use crate::{ServerError, server::ServerState, token::Identity};

impl Identity {
    /// Fails with 403 unless the identity's role grants `capability`.
    pub fn require(&self, capability: Capability) -> Result<(), ServerError> {
        if self.role.allows(capability) {
            Ok(())
        } else {
            Err(ServerError::Forbidden(format!(
                "role {} is not allowed to {}",
                self.role.as_str(),
                describe(capability)
            )))
        }
    }
}

fn describe(capability: Capability) -> &'static str {
    match capability {
        Capability::ViewBookings => "view bookings",
        Capability::BookRooms => "book rooms",
        Capability::AmendBookings => "amend bookings",
        Capability::ViewDashboard => "view the dashboard",
    }
}

pub(crate) fn wire_role(role: engine::Role) -> api_types::Role {
    match role {
        engine::Role::Admin => api_types::Role::Admin,
        engine::Role::Manager => api_types::Role::Manager,
        engine::Role::Customer => api_types::Role::Customer,
    }
}

/// Verifies the bearer token and stores the [`Identity`] in the request.
pub(crate) async fn authenticate(
    State(state): State<ServerState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(ServerError::Unauthorized("missing bearer token".to_string()));
    };

    let identity = state
        .tokens
        .verify(bearer.token(), Utc::now())
        .map_err(|err| {
            tracing::debug!("rejected token: {err}");
            ServerError::Unauthorized(err.to_string())
        })?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<Login>, JsonRejection>,
) -> Result<Json<LoginResponse>, ServerError> {
    let Json(payload) = payload?;
    let user = match state
        .engine
        .authenticate(&payload.uemail, &payload.upassword)
        .await
    {
        Ok(user) => user,
        Err(EngineError::KeyNotFound(_)) => {
            return Err(ServerError::Unauthorized(
                "invalid email or password".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(uid = user.uid, role = user.role.as_str(), "user logged in");
    let token = state.tokens.issue(user.uid, user.role, Utc::now());
    Ok(Json(LoginResponse {
        token,
        role: wire_role(user.role),
    }))
}

#[cfg(test)]
mod tests {
    use engine::Role;

    use super::*;

    #[test]
    fn manager_is_refused_amendments() {
        let identity = Identity {
            uid: 1,
            role: Role::Manager,
        };
        assert!(identity.require(Capability::BookRooms).is_ok());
        assert!(matches!(
            identity.require(Capability::AmendBookings),
            Err(ServerError::Forbidden(_))
        ));
    }
}
