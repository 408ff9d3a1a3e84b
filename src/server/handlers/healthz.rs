use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};

use crate::api::{HealthResponse, Response};
use crate::server::context::ServerContext;
use crate::server::handlers::convert_response;

pub async fn get_healthz(_req: HttpRequest, _sc: Data<Arc<ServerContext>>) -> HttpResponse {
    convert_response::<HealthResponse>(Response::with_data(HealthResponse::now()))
}
