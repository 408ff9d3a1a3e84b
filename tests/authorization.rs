use std::sync::Arc;

use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use actix_web::web::{Data, Path, Query};
use actix_web::HttpResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;

use ideahub::api::nav::{NavItem, PageResolution};
use ideahub::api::user::{AllowResponse, TokenResponse, WhoamiResponse};
use ideahub::api::{self, ListResponse, Response};
use ideahub::code;
use ideahub::router::Router;
use ideahub::server::auth::jwt::{JwtTokenGenerator, JwtTokenValidator};
use ideahub::server::auth::rsa::generate_rsa_keys;
use ideahub::server::config::{ServerConfig, UserAccount};
use ideahub::server::context::ServerContext;
use ideahub::server::handlers::nav::CaniQuery;
use ideahub::server::handlers::{nav, pages, token, user};

fn account(name: &str, password: &str, salt: &str, role: &str, id: u64) -> UserAccount {
    UserAccount {
        name: name.to_string(),
        password: code::sha256(format!("{password}{salt}")),
        salt: salt.to_string(),
        role: role.to_string(),
        id,
        email: format!("{name}@magick.example"),
        phone: String::new(),
        profile: String::new(),
    }
}

fn test_context() -> Arc<ServerContext> {
    let mut cfg = ServerConfig::default();
    cfg.users
        .push(account("erin", "qa456", "qa_salt0001", "qa-coordinator", 7));
    cfg.users
        .push(account("sam", "test123", "staff_salt", "staff", 8));

    let (public_key, private_key) = generate_rsa_keys().unwrap();
    let jwt_generator = JwtTokenGenerator::new(&private_key, 600).unwrap();
    let jwt_validator = JwtTokenValidator::new(&public_key).unwrap();

    Arc::new(ServerContext {
        cfg,
        jwt_generator,
        jwt_validator,
        router: Router::load().unwrap(),
    })
}

async fn body_json<T>(resp: HttpResponse) -> Response<T>
where
    T: Serialize + DeserializeOwned,
{
    let body = to_bytes(resp.into_body()).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn basic_auth(name: &str, password: &str) -> String {
    format!("Basic {name}:{}", code::base64_encode(password))
}

async fn fetch_token(ctx: &Arc<ServerContext>, name: &str, password: &str) -> String {
    let req = TestRequest::default()
        .insert_header((api::HEADER_AUTHORIZATION, basic_auth(name, password)))
        .to_http_request();
    let resp = token::get_token(req, Data::new(ctx.clone())).await;
    let resp: Response<TokenResponse> = body_json(resp).await;
    assert_eq!(resp.code, api::STATUS_OK);
    resp.data.unwrap().token
}

fn bearer_request(token: &str) -> TestRequest {
    TestRequest::default().insert_header((api::HEADER_AUTHORIZATION, format!("Bearer {token}")))
}

async fn cani(ctx: &Arc<ServerContext>, token: &str, query: &str) -> bool {
    let req = bearer_request(token).to_http_request();
    let query = Query::<CaniQuery>::from_query(query).unwrap();
    let resp = nav::get_cani(req, query, Data::new(ctx.clone())).await;
    let resp: Response<AllowResponse> = body_json(resp).await;
    assert_eq!(resp.code, api::STATUS_OK);
    resp.data.unwrap().allow
}

async fn resolve(ctx: &Arc<ServerContext>, token: Option<&str>, pathname: &str) -> PageResolution {
    let req = match token {
        Some(token) => bearer_request(token),
        None => TestRequest::default(),
    }
    .to_http_request();
    let path = Path::from(pathname.trim_start_matches('/').to_string());
    let resp = pages::get_page(req, path, Data::new(ctx.clone())).await;
    let resp: Response<PageResolution> = body_json(resp).await;
    assert_eq!(resp.code, api::STATUS_OK);
    resp.data.unwrap()
}

#[actix_web::test]
async fn test_login_flow() {
    let ctx = test_context();

    let token = fetch_token(&ctx, "erin", "qa456").await;

    let req = bearer_request(&token).to_http_request();
    let resp = user::get_whoami(req, Data::new(ctx.clone())).await;
    let resp: Response<WhoamiResponse> = body_json(resp).await;
    assert_eq!(resp.code, api::STATUS_OK);

    let profile = resp.data.unwrap().user;
    assert_eq!(profile.name, "erin");
    assert_eq!(profile.role, "qa-coordinator");
    assert_eq!(profile.email, "erin@magick.example");
}

#[actix_web::test]
async fn test_login_rejects_bad_password() {
    let ctx = test_context();

    let req = TestRequest::default()
        .insert_header((api::HEADER_AUTHORIZATION, basic_auth("erin", "wrong")))
        .to_http_request();
    let resp = token::get_token(req, Data::new(ctx.clone())).await;
    let resp: Response<TokenResponse> = body_json(resp).await;
    assert_eq!(resp.code, api::STATUS_UNAUTHORIZED);
}

#[actix_web::test]
async fn test_navigation_follows_role() {
    let ctx = test_context();

    // QA coordinators lose the administration pages but keep insights
    let token = fetch_token(&ctx, "erin", "qa456").await;
    let req = bearer_request(&token).to_http_request();
    let resp = nav::get_nav(req, Data::new(ctx.clone())).await;
    let resp: Response<ListResponse<NavItem>> = body_json(resp).await;
    let hrefs: Vec<String> = resp
        .data
        .unwrap()
        .items
        .into_iter()
        .map(|i| i.href)
        .collect();
    assert_eq!(hrefs, vec!["/", "/ideas", "/departments", "/insights"]);

    // Administrators see the full sidebar
    let token = fetch_token(&ctx, "admin", "admin_password123").await;
    let req = bearer_request(&token).to_http_request();
    let resp = nav::get_nav(req, Data::new(ctx.clone())).await;
    let resp: Response<ListResponse<NavItem>> = body_json(resp).await;
    assert_eq!(resp.data.unwrap().items.len(), 6);
}

#[actix_web::test]
async fn test_cani_paths_and_features() {
    let ctx = test_context();
    let token = fetch_token(&ctx, "erin", "qa456").await;

    assert!(!cani(&ctx, &token, "path=/categories").await);
    assert!(!cani(&ctx, &token, "path=/users").await);
    assert!(cani(&ctx, &token, "path=/insights").await);
    assert!(cani(&ctx, &token, "path=/departments/42").await);
    assert!(!cani(&ctx, &token, "path=/departments/42/settings").await);
    assert!(!cani(&ctx, &token, "path=/departments/abc").await);

    assert!(cani(&ctx, &token, "feature=review-ideas").await);
    assert!(!cani(&ctx, &token, "feature=manage-users").await);
    // Unknown feature tokens are unavailable, not an error
    assert!(!cani(&ctx, &token, "feature=time-travel").await);
}

#[actix_web::test]
async fn test_cani_requires_exactly_one_subject() {
    let ctx = test_context();
    let token = fetch_token(&ctx, "erin", "qa456").await;

    let req = bearer_request(&token).to_http_request();
    let query = Query::<CaniQuery>::from_query("").unwrap();
    let resp = nav::get_cani(req, query, Data::new(ctx.clone())).await;
    let resp: Response<AllowResponse> = body_json(resp).await;
    assert_eq!(resp.code, api::STATUS_BAD_REQUEST);
}

#[actix_web::test]
async fn test_page_dispatch() {
    let ctx = test_context();
    let token = fetch_token(&ctx, "sam", "test123").await;

    // Staff may open a department page
    let resolution = resolve(&ctx, Some(&token), "/departments/42").await;
    assert_eq!(resolution.page.unwrap().view, "DepartmentDetail");

    // Department settings is excluded for staff: dashboard fallback
    let resolution = resolve(&ctx, Some(&token), "/departments/42/settings").await;
    assert!(resolution.page.is_none());
    assert_eq!(resolution.redirect.unwrap(), "/");

    // Unknown pathnames fall back the same way
    let resolution = resolve(&ctx, Some(&token), "/no/such/page").await;
    assert_eq!(resolution.redirect.unwrap(), "/");
}

#[actix_web::test]
async fn test_page_dispatch_anonymous() {
    let ctx = test_context();

    // Without a session the public tree is served
    let resolution = resolve(&ctx, None, "/login").await;
    assert_eq!(resolution.page.unwrap().view, "Login");

    // Private pages redirect to the login page
    let resolution = resolve(&ctx, None, "/ideas").await;
    assert_eq!(resolution.redirect.unwrap(), "/login");

    // A garbage token is served as anonymous, not rejected
    let resolution = resolve(&ctx, Some("garbage"), "/ideas").await;
    assert_eq!(resolution.redirect.unwrap(), "/login");
}

#[actix_web::test]
async fn test_protected_endpoints_reject_anonymous() {
    let ctx = test_context();

    let req = TestRequest::default().to_http_request();
    let resp = nav::get_nav(req, Data::new(ctx.clone())).await;
    assert_eq!(resp.status().as_u16(), 401);

    let req = bearer_request("garbage").to_http_request();
    let resp = user::get_whoami(req, Data::new(ctx.clone())).await;
    assert_eq!(resp.status().as_u16(), 401);
}
