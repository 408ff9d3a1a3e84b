use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::config::ConfigArgs;
use crate::display;
use crate::server::config::ServerConfig;

use super::{LogArgs, RunCommand};

/// Start the portal server.
#[derive(Args)]
pub struct ServeArgs {
    /// Print server configuration data (JSON) and exit.
    #[arg(long)]
    pub print_config: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[async_trait(?Send)]
impl RunCommand for ServeArgs {
    async fn run(&self) -> Result<()> {
        self.log.init()?;

        let cfg: ServerConfig = self.config.load("server")?;

        if self.print_config {
            return display::pretty_json(cfg);
        }

        let ctx = cfg.build_ctx()?;
        let server = cfg.build_restful_server(ctx)?;
        server.run().await
    }
}
