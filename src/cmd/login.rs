use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use log::info;

use crate::client::config::ClientConfig;
use crate::client::ApiClient;
use crate::config::ConfigArgs;
use crate::session::SessionState;

use super::RunCommand;

/// Authenticate against the portal server and persist the login state.
#[derive(Args)]
pub struct LoginArgs {
    /// Login as this user instead of the configured one.
    pub user: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait(?Send)]
impl RunCommand for LoginArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let user = self.user.as_ref().unwrap_or(&cfg.user);

        let mut client = ApiClient::connect(&cfg.server)?;

        let token = client
            .login(user, &cfg.password)
            .await
            .context("login to server")?;
        client.set_token(token.token.clone());

        // Hydrate the profile before anything reads the session
        let user_data = client.whoami().await.context("fetch profile")?;

        let mut session = SessionState::anonymous();
        session.login(token, user_data);
        cfg.session_file().save(&session)?;

        info!("Session saved");
        println!(
            "Logged in as {} ({})",
            session.user_data.name, session.user_data.role
        );
        Ok(())
    }
}
