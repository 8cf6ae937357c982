use std::env;

/// Connection settings for the Bedrock runtime. Built explicitly and passed
/// in; nothing below the client ever reads the environment.
#[derive(Debug, Clone, Default)]
pub struct BedrockConfig {
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl BedrockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Reads `AWS_REGION`/`AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY`, with
    /// `APP_`-prefixed variants taking precedence (some hosting platforms
    /// reserve the unprefixed names). Missing credentials leave the default
    /// AWS credential chain in charge.
    pub fn from_env() -> Self {
        let region = env::var("APP_AWS_REGION")
            .or_else(|_| env::var("AWS_REGION"))
            .ok();

        let explicit = |access: &str, secret: &str| -> Option<(String, String)> {
            match (env::var(access), env::var(secret)) {
                (Ok(a), Ok(s)) => Some((a, s)),
                _ => None,
            }
        };
        let credentials = explicit("APP_AWS_ACCESS_KEY_ID", "APP_AWS_SECRET_ACCESS_KEY")
            .or_else(|| explicit("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"));

        match credentials {
            Some((access_key, secret_key)) => BedrockConfig {
                region,
                access_key: Some(access_key),
                secret_key: Some(secret_key),
            },
            None => BedrockConfig {
                region,
                access_key: None,
                secret_key: None,
            },
        }
    }
}

/// Bind settings for the optional proxy server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        config
    }
}
