mod cani;
mod login;
mod logout;
mod nav;
mod page;
mod password;
mod routes;
mod serve;
mod version;
mod whoami;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};

use crate::client::config::ClientConfig;
use crate::client::ApiClient;
use crate::config::ConfigArgs;
use crate::logs;
use crate::session::SessionState;

#[async_trait(?Send)]
pub trait RunCommand {
    async fn run(&self) -> Result<()>;
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Log level, one of: error, warn, info, debug.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl LogArgs {
    pub fn init(&self) -> Result<()> {
        logs::init(&self.log_level)
    }
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Cani(cani::CaniArgs),
    Login(login::LoginArgs),
    Logout(logout::LogoutArgs),
    Nav(nav::NavArgs),
    Page(page::PageArgs),
    Password(password::PasswordArgs),
    Routes(routes::RoutesArgs),
    Serve(serve::ServeArgs),
    Version(version::VersionArgs),
    Whoami(whoami::WhoamiArgs),
}

#[async_trait(?Send)]
impl RunCommand for App {
    async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Cani(args) => args.run().await,
            Commands::Login(args) => args.run().await,
            Commands::Logout(args) => args.run().await,
            Commands::Nav(args) => args.run().await,
            Commands::Page(args) => args.run().await,
            Commands::Password(args) => args.run().await,
            Commands::Routes(args) => args.run().await,
            Commands::Serve(args) => args.run().await,
            Commands::Version(args) => args.run().await,
            Commands::Whoami(args) => args.run().await,
        }
    }
}

/// Builds a client from the persisted login state. Commands that need a
/// session fail here with a hint instead of a bare 401 later.
pub(crate) fn build_session_client(config: &ConfigArgs) -> Result<ApiClient> {
    let cfg: ClientConfig = config.load("client")?;

    let session: SessionState = cfg.session_file().load()?;
    if !session.is_authenticated() {
        anyhow::bail!("not logged in, please run 'ideahub login' first");
    }

    let mut client = ApiClient::connect(&cfg.server)?;
    client.set_token(session.token);
    Ok(client)
}
