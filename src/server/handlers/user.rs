use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};
use log::debug;

use crate::api::user::WhoamiResponse;
use crate::api::Response;
use crate::auth_request;
use crate::server::context::ServerContext;
use crate::server::handlers::convert_response;

/// Returns the authenticated caller's profile, the way the web application
/// hydrates its session after login.
pub async fn get_whoami(req: HttpRequest, sc: Data<Arc<ServerContext>>) -> HttpResponse {
    let session = auth_request!(sc.as_ref(), req);

    debug!("Whoami for user: {}", session.user_data.name);
    convert_response::<WhoamiResponse>(Response::with_data(WhoamiResponse {
        user: session.user_data,
    }))
}
