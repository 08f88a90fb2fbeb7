use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub websocket: WebSocketConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Origin policy for the live edit channel. An empty list accepts any
/// origin; a non-empty list rejects upgrades whose Origin header does not
/// match one of the entries exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketConfig {
    pub allowed_origins: Vec<String>,
}

impl WebSocketConfig {
    pub fn origin_allowed(&self, origin: Option<&str>) -> bool {
        if self.allowed_origins.is_empty() {
            return true;
        }
        match origin {
            Some(origin) => self.allowed_origins.iter().any(|o| o == origin),
            None => false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:scrawl.db".to_string()),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .unwrap_or(8080),
            },
            websocket: WebSocketConfig {
                allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|v| {
                        v.split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_origin_list_accepts_anything() {
        let cfg = WebSocketConfig {
            allowed_origins: vec![],
        };
        assert!(cfg.origin_allowed(None));
        assert!(cfg.origin_allowed(Some("http://evil.example")));
    }

    #[test]
    fn origin_list_is_exact_match() {
        let cfg = WebSocketConfig {
            allowed_origins: vec!["http://localhost:8080".to_string()],
        };
        assert!(cfg.origin_allowed(Some("http://localhost:8080")));
        assert!(!cfg.origin_allowed(Some("http://localhost:9090")));
        assert!(!cfg.origin_allowed(None));
    }
}
