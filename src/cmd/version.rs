use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::client::ApiClient;
use crate::config::ConfigArgs;

use super::RunCommand;

/// Display client and server versions.
#[derive(Args)]
pub struct VersionArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait(?Send)]
impl RunCommand for VersionArgs {
    async fn run(&self) -> Result<()> {
        println!("Client version: {}", env!("CARGO_PKG_VERSION"));

        let cfg: ClientConfig = self.config.load("client")?;
        let client = ApiClient::connect(&cfg.server)?;
        match client.healthz().await {
            Ok(resp) => println!("Server version: {}", resp.version),
            Err(_) => println!("Server version: Unknown"),
        }

        Ok(())
    }
}
