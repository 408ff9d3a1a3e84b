use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};

use crate::api::nav::RouteInfo;
use crate::api::{ListResponse, Response};
use crate::auth_request;
use crate::server::context::ServerContext;
use crate::server::handlers::convert_response;

/// Lists the flattened private route registry. Diagnostic surface for
/// operators checking what the policy subtraction runs against.
pub async fn get_routes(req: HttpRequest, sc: Data<Arc<ServerContext>>) -> HttpResponse {
    let _session = auth_request!(sc.as_ref(), req);

    let items: Vec<RouteInfo> = sc
        .router
        .private_routes()
        .routes()
        .iter()
        .map(|route| route.info())
        .collect();
    let total = items.len() as u64;
    convert_response::<ListResponse<RouteInfo>>(Response::with_data(ListResponse { items, total }))
}
