use anyhow::{bail, Context, Result};

use crate::api::user::UserData;
use crate::code;

use super::super::context::ServerContext;

pub fn auth_basic(sc: &ServerContext, auth: String) -> Result<UserData> {
    let fields = auth.split(':').collect::<Vec<&str>>();
    if fields.len() != 2 {
        bail!("basic auth missing password");
    }

    let username = fields[0];
    let password = fields[1];
    let password = code::base64_decode_string(password).context("decode password base64")?;

    let account = match sc.find_account(username) {
        Some(account) => account,
        None => bail!("incorrect username or password"),
    };

    let hashed = code::sha256(format!("{password}{}", account.salt));
    if hashed != account.password {
        bail!("incorrect username or password");
    }

    Ok(account.user_data())
}
