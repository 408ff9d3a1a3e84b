use anyhow::Result;

use crate::api::user::UserData;
use crate::time::current_timestamp;

use super::super::context::ServerContext;

/// Validates a bearer token and rebuilds the caller's profile. Name and role
/// come from the token claims; the rest of the profile is filled from the
/// account table when the account still exists.
pub fn auth_bearer_token(sc: &ServerContext, auth: String) -> Result<UserData> {
    let token_user = sc.jwt_validator.validate_token(&auth, current_timestamp())?;

    let mut user = match sc.find_account(&token_user.name) {
        Some(account) => account.user_data(),
        None => UserData {
            name: token_user.name,
            ..Default::default()
        },
    };
    user.role = token_user.role;

    Ok(user)
}
