use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub identity_base_url: String,
    pub identity_service_key: String,
    pub identity_jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid port number"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .expect("IDENTITY_BASE_URL must be set"),
            identity_service_key: env::var("IDENTITY_SERVICE_KEY")
                .expect("IDENTITY_SERVICE_KEY must be set"),
            identity_jwt_secret: env::var("IDENTITY_JWT_SECRET")
                .expect("IDENTITY_JWT_SECRET must be set"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
