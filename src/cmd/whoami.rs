use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::config::ConfigArgs;
use crate::display;

use super::RunCommand;

/// Display the profile of the currently logged-in user.
#[derive(Args)]
pub struct WhoamiArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait(?Send)]
impl RunCommand for WhoamiArgs {
    async fn run(&self) -> Result<()> {
        let client = super::build_session_client(&self.config)?;

        let user = client.whoami().await?;
        display::pretty_json(user)?;

        Ok(())
    }
}
