use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::config::ConfigArgs;
use crate::display::{self, DisplayStyle};

use super::RunCommand;

/// List the navigation entries the current role may open.
#[derive(Args)]
pub struct NavArgs {
    /// The display style.
    #[arg(short, long, default_value = "table")]
    pub output: DisplayStyle,

    /// Do not show the header row.
    #[arg(long)]
    pub headless: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait(?Send)]
impl RunCommand for NavArgs {
    async fn run(&self) -> Result<()> {
        let client = super::build_session_client(&self.config)?;

        let items = client.nav().await?;
        display::display_list(items, self.output, self.headless)
    }
}
