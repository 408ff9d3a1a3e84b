use std::sync::Arc;
use std::time::Duration;

use actix_web::web::{self, Data};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use log::{info, warn};
use openssl::ssl::SslAcceptorBuilder;
use sd_notify::NotifyState;

use crate::api::{self, Response};

use super::context::ServerContext;
use super::handlers;

pub struct RestfulServer {
    bind: String,

    ssl: Option<SslAcceptorBuilder>,
    ctx: Arc<ServerContext>,

    keep_alive_secs: Option<u64>,
    workers: Option<u64>,
}

impl RestfulServer {
    pub fn new(bind: String, ctx: Arc<ServerContext>) -> Self {
        Self {
            bind,
            ssl: None,
            ctx,
            keep_alive_secs: None,
            workers: None,
        }
    }

    pub fn set_ssl(&mut self, ssl: SslAcceptorBuilder) {
        self.ssl = Some(ssl);
    }

    pub fn set_keep_alive_secs(&mut self, keep_alive_secs: u64) {
        self.keep_alive_secs = Some(keep_alive_secs);
    }

    pub fn set_workers(&mut self, workers: u64) {
        self.workers = Some(workers);
    }

    pub async fn run(mut self) -> Result<()> {
        let ctx = self.ctx.clone();
        let mut srv = HttpServer::new(move || {
            App::new()
                .app_data(Data::new(ctx.clone()))
                .route(api::TOKEN_PATH, web::get().to(handlers::token::get_token))
                .route(api::WHOAMI_PATH, web::get().to(handlers::user::get_whoami))
                .route(api::NAV_PATH, web::get().to(handlers::nav::get_nav))
                .route(api::CANI_PATH, web::get().to(handlers::nav::get_cani))
                .route(api::ROUTES_PATH, web::get().to(handlers::routes::get_routes))
                .service(
                    web::scope(api::PAGES_PATH)
                        .route("{path:.*}", web::get().to(handlers::pages::get_page)),
                )
                .route(
                    api::HEALTHZ_PATH,
                    web::get().to(handlers::healthz::get_healthz),
                )
                .default_service(web::route().to(Self::default_handler))
        });

        if let Some(ssl) = self.ssl.take() {
            info!("Binding to https://{}", self.bind);
            srv = srv.bind_openssl(&self.bind, ssl).context("bind with ssl")?
        } else {
            warn!("Using HTTP (without SSL). THIS IS DANGEROUS, DO NOT USE IN PRODUCTION");
            info!("Binding to http://{}", self.bind);
            srv = srv.bind(&self.bind).context("bind without ssl")?
        };

        if let Some(keep_alive) = self.keep_alive_secs {
            srv = srv.keep_alive(Duration::from_secs(keep_alive));
        }
        if let Some(workers) = self.workers {
            srv = srv.workers(workers as usize);
        }

        sd_notify::notify(true, &[NotifyState::Ready]).context("notify systemd")?;
        info!("Starting restful server");
        srv.run().await.context("run server")?;

        info!("Server stopped by user");
        Ok(())
    }

    async fn default_handler(req: HttpRequest) -> HttpResponse {
        let path = req.uri().path().to_string();
        let method = req.method().as_str().to_string();
        let resp: Response<()> = Response::not_found(format!("No route to {method} {path}"));
        HttpResponse::NotFound().json(resp)
    }
}
