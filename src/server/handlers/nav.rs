use std::sync::Arc;

use actix_web::web::{Data, Query};
use actix_web::{HttpRequest, HttpResponse};
use log::debug;
use serde::Deserialize;

use crate::api::nav::NavItem;
use crate::api::user::AllowResponse;
use crate::api::{ListResponse, Response};
use crate::auth_request;
use crate::roles::Feature;
use crate::server::context::ServerContext;
use crate::server::handlers::convert_response;

/// Returns the sidebar entries the caller's role may navigate to.
pub async fn get_nav(req: HttpRequest, sc: Data<Arc<ServerContext>>) -> HttpResponse {
    let session = auth_request!(sc.as_ref(), req);

    let items = sc.router.evaluator().navigable_items(&session);
    let total = items.len() as u64;
    convert_response::<ListResponse<NavItem>>(Response::with_data(ListResponse { items, total }))
}

#[derive(Debug, Deserialize)]
pub struct CaniQuery {
    pub path: Option<String>,

    pub feature: Option<String>,
}

/// Answers "can the caller open this path" or "can the caller use this
/// feature". Unknown features are never available, they are not an error.
pub async fn get_cani(
    req: HttpRequest,
    query: Query<CaniQuery>,
    sc: Data<Arc<ServerContext>>,
) -> HttpResponse {
    let session = auth_request!(sc.as_ref(), req);
    let evaluator = sc.router.evaluator();

    let allow = match (&query.path, &query.feature) {
        (Some(path), None) => evaluator.is_path_authorized(&session, path),
        (None, Some(feature)) => match Feature::from_name(feature) {
            Some(feature) => evaluator.is_feature_available(&session, feature),
            None => false,
        },
        _ => {
            return convert_response::<AllowResponse>(Response::bad_request(
                "exactly one of 'path' and 'feature' is required",
            ));
        }
    };

    debug!(
        "Cani {:?}/{:?} for role '{}': {allow}",
        query.path, query.feature, session.user_data.role
    );
    convert_response::<AllowResponse>(Response::with_data(AllowResponse { allow }))
}
