use std::sync::Arc;

use actix_web::web::{Data, Path};
use actix_web::{HttpRequest, HttpResponse};
use log::debug;

use crate::api::nav::{PageInfo, PageResolution};
use crate::api::Response;
use crate::router::Dispatch;
use crate::server::auth::{auth_request_raw, AuthResult};
use crate::server::context::ServerContext;
use crate::server::handlers::convert_response;
use crate::session::SessionState;

/// Resolves a pathname the way the web application's router does.
///
/// Unauthenticated callers are not rejected here: they are served from the
/// public tree. Anything that resolves nowhere answers with the active
/// tree's default path, never an error.
pub async fn get_page(
    req: HttpRequest,
    path: Path<String>,
    sc: Data<Arc<ServerContext>>,
) -> HttpResponse {
    let session = match auth_request_raw(sc.as_ref(), &req) {
        AuthResult::Ok(session) => session,
        AuthResult::Failed(_) => SessionState::anonymous(),
    };

    let pathname = format!("/{}", path.trim_start_matches('/'));

    let resolution = match sc.router.dispatch(&session, &pathname) {
        Dispatch::Page(route) => PageResolution {
            page: Some(PageInfo {
                path: route.spec.path.to_string(),
                label: route.spec.label.to_string(),
                view: route.spec.view.to_string(),
            }),
            redirect: None,
        },
        Dispatch::Redirect(to) => PageResolution {
            page: None,
            redirect: Some(to.to_string()),
        },
    };

    debug!(
        "Dispatch '{pathname}' for role '{}': page={:?} redirect={:?}",
        session.user_data.role,
        resolution.page.as_ref().map(|p| p.view.as_str()),
        resolution.redirect
    );
    convert_response::<PageResolution>(Response::with_data(resolution))
}
