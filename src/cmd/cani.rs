use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;

use crate::config::ConfigArgs;

use super::RunCommand;

/// Check if the currently logged-in role may open a page or use a feature.
#[derive(Args)]
pub struct CaniArgs {
    /// Pathname to check, e.g. "/departments/42".
    pub path: Option<String>,

    /// Feature token to check instead of a pathname, e.g. "export-reports".
    #[arg(long)]
    pub feature: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait(?Send)]
impl RunCommand for CaniArgs {
    async fn run(&self) -> Result<()> {
        let client = super::build_session_client(&self.config)?;

        let allow = match (&self.path, &self.feature) {
            (Some(path), None) => client.cani_path(path).await?,
            (None, Some(feature)) => client.cani_feature(feature).await?,
            _ => bail!("please provide either a pathname or --feature"),
        };

        println!("{allow}");
        Ok(())
    }
}
