use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::config::ConfigArgs;
use crate::display::{self, DisplayStyle};
use crate::router::Router;

use super::RunCommand;

/// List the flattened private route registry.
#[derive(Args)]
pub struct RoutesArgs {
    /// The display style.
    #[arg(short, long, default_value = "table")]
    pub output: DisplayStyle,

    /// Do not show the header row.
    #[arg(long)]
    pub headless: bool,

    /// Query the server instead of the local registry.
    #[arg(long)]
    pub remote: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait(?Send)]
impl RunCommand for RoutesArgs {
    async fn run(&self) -> Result<()> {
        let items = if self.remote {
            let client = super::build_session_client(&self.config)?;
            client.routes().await?
        } else {
            let router = Router::load()?;
            router
                .private_routes()
                .routes()
                .iter()
                .map(|route| route.info())
                .collect()
        };

        display::display_list(items, self.output, self.headless)
    }
}
