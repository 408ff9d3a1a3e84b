use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

use crate::code;

use super::RunCommand;

/// Generate the password and salt fields for a server account entry.
#[derive(Args)]
pub struct PasswordArgs {
    /// The plain password to hash.
    pub password: String,

    /// Length of the generated salt.
    #[arg(long, default_value = "24")]
    pub salt_length: usize,
}

#[async_trait(?Send)]
impl RunCommand for PasswordArgs {
    async fn run(&self) -> Result<()> {
        let salt = generate_salt(self.salt_length);
        let hash = code::sha256(format!("{}{salt}", self.password));

        println!("password = \"{hash}\"");
        println!("salt = \"{salt}\"");
        Ok(())
    }
}

fn generate_salt(length: usize) -> String {
    let mut rng = thread_rng();

    (0..length)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_salt() {
        let salt = generate_salt(24);
        assert_eq!(salt.len(), 24);
        assert!(salt.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
