use crate::router::Router;

use super::auth::jwt::{JwtTokenGenerator, JwtTokenValidator};
use super::config::{ServerConfig, UserAccount};

/// Everything a request handler needs: the static configuration, the token
/// machinery and the compiled router. Shared read-only across workers.
pub struct ServerContext {
    pub cfg: ServerConfig,

    pub jwt_generator: JwtTokenGenerator,
    pub jwt_validator: JwtTokenValidator,

    pub router: Router,
}

impl ServerContext {
    pub fn find_account(&self, name: &str) -> Option<&UserAccount> {
        self.cfg.users.iter().find(|u| u.name == name)
    }

    #[cfg(test)]
    pub fn new_test() -> Self {
        use super::auth::jwt::new_test_pair;
        use crate::code;

        let mut cfg = ServerConfig::default();
        cfg.users.push(UserAccount {
            name: String::from("erin"),
            // password: qa456
            password: code::sha256("qa456qa_salt0001"),
            salt: String::from("qa_salt0001"),
            role: String::from("qa-coordinator"),
            id: 7,
            email: String::from("erin@magick.example"),
            phone: String::new(),
            profile: String::new(),
        });
        cfg.users.push(UserAccount {
            name: String::from("sam"),
            // password: test123
            password: code::sha256("test123staff_salt"),
            salt: String::from("staff_salt"),
            role: String::from("staff"),
            id: 8,
            email: String::from("sam@magick.example"),
            phone: String::new(),
            profile: String::new(),
        });

        let (jwt_generator, jwt_validator) = new_test_pair();

        Self {
            cfg,
            jwt_generator,
            jwt_validator,
            router: Router::load().unwrap(),
        }
    }
}
