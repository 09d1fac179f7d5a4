use crate::errors::AppError;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// When unset the service keeps feedback in process memory.
    pub redis_url: Option<String>,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            redis_url: None,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGINS.to_string()],
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::EnvError(format!("PORT must be a port number: {e}")))?,
            None => DEFAULT_PORT,
        };

        let redis_url = lookup("REDIS_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let rate_limit_per_minute = match lookup("RATE_LIMIT_PER_MINUTE") {
            Some(raw) => {
                let limit = raw.trim().parse::<u32>().map_err(|e| {
                    AppError::EnvError(format!("RATE_LIMIT_PER_MINUTE must be an integer: {e}"))
                })?;
                if limit == 0 {
                    return Err(AppError::EnvError(
                        "RATE_LIMIT_PER_MINUTE must be greater than zero".into(),
                    ));
                }
                limit
            }
            None => DEFAULT_RATE_LIMIT_PER_MINUTE,
        };

        Ok(Self {
            port,
            redis_url,
            allowed_origins,
            rate_limit_per_minute,
        })
    }
}
