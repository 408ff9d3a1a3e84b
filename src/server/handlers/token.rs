use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};
use log::{debug, error};

use crate::api::user::TokenResponse;
use crate::api::Response;
use crate::auth_request;
use crate::server::context::ServerContext;
use crate::server::handlers::convert_response;
use crate::time::current_timestamp;

/// Issues a bearer token for the authenticated caller. This is the login
/// endpoint: the first request arrives with basic auth, everything after it
/// presents the token.
pub async fn get_token(req: HttpRequest, sc: Data<Arc<ServerContext>>) -> HttpResponse {
    let session = auth_request!(sc.as_ref(), req);

    debug!("Generate token for user: {}", session.user_data.name);
    match sc
        .jwt_generator
        .generate_token(&session.user_data, current_timestamp())
    {
        Ok(token) => convert_response::<TokenResponse>(Response::with_data(token)),
        Err(e) => {
            error!("Failed to generate token: {e:#}");
            convert_response::<TokenResponse>(Response::internal_server_error(
                "failed to generate token",
            ))
        }
    }
}
