mod basic;
mod bearer_token;

pub mod jwt;
pub mod rsa;

use actix_web::HttpRequest;

use crate::api;
use crate::session::SessionState;

use super::context::ServerContext;

/// Authenticates the request inside a handler, early-returning a 401 envelope
/// when the caller cannot be identified. Evaluates to the caller's
/// [`SessionState`].
#[macro_export]
macro_rules! auth_request {
    ($sc:expr, $req:expr) => {
        match $crate::server::auth::auth_request_raw($sc, &$req) {
            $crate::server::auth::AuthResult::Ok(session) => session,
            $crate::server::auth::AuthResult::Failed(msg) => {
                return $crate::server::handlers::convert_response::<()>(
                    $crate::api::Response::unauthorized(msg),
                )
            }
        }
    };
}

pub enum AuthResult {
    Ok(SessionState),
    Failed(String),
}

impl AuthResult {
    fn failed(msg: impl ToString) -> Self {
        Self::Failed(msg.to_string())
    }
}

/// Resolves the request's Authorization header to a session.
///
/// `Basic name:base64(password)` is checked against the account table and is
/// how the token endpoint bootstraps a session; `Bearer <jwt>` is what every
/// other endpoint expects. The resulting session carries the raw credential
/// as its token, so a session produced here is never anonymous.
pub fn auth_request_raw(sc: &ServerContext, req: &HttpRequest) -> AuthResult {
    let auth_header = match req.headers().get(api::HEADER_AUTHORIZATION) {
        Some(header) => match header.to_str() {
            Ok(s) => s.to_string(),
            Err(_) => return AuthResult::failed("invalid authorization header value"),
        },
        None => return AuthResult::failed("missing authorization"),
    };

    let fields = auth_header.split_whitespace().collect::<Vec<&str>>();
    if fields.len() != 2 {
        return AuthResult::failed("invalid authorization header format");
    }

    let auth_type = fields[0];
    let auth = fields[1].to_string();

    let result = match auth_type.to_lowercase().as_str() {
        "basic" => basic::auth_basic(sc, auth.clone()),
        "bearer" => bearer_token::auth_bearer_token(sc, auth.clone()),
        _ => return AuthResult::failed("unsupported authorization type"),
    };

    match result {
        Ok(user) => AuthResult::Ok(SessionState::authenticated(auth, user)),
        Err(e) => AuthResult::Failed(format!("{} auth failed: {e:#}", auth_type.to_lowercase())),
    }
}
