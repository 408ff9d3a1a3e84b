use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::config::ConfigArgs;

use super::RunCommand;

/// Resolve a pathname the way the web application's router would.
#[derive(Args)]
pub struct PageArgs {
    /// Pathname to resolve, e.g. "/ideas/12".
    pub pathname: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait(?Send)]
impl RunCommand for PageArgs {
    async fn run(&self) -> Result<()> {
        let client = super::build_session_client(&self.config)?;

        let resolution = client.resolve_page(&self.pathname).await?;
        match (resolution.page, resolution.redirect) {
            (Some(page), _) => {
                println!("{} => view '{}' ({})", page.path, page.view, page.label);
            }
            (None, Some(redirect)) => {
                println!("{} => redirect to {redirect}", self.pathname);
            }
            (None, None) => {
                // The server always fills one of the two; treat this as a
                // plain miss rather than failing the command
                println!("{} => no resolution", self.pathname);
            }
        }
        Ok(())
    }
}
