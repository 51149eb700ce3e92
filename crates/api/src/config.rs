use kontrola_db::SupabaseConfig;

/// Origins allowed to call the API. The first entry is echoed back to
/// callers whose origin is not on the list.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://www.kontrolavozidiel.sk",
    "https://kontrolavozidiel.sk",
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared through `AppState`; nothing reads the
/// environment after that.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared admin secret. `None` denies every admin request.
    pub admin_password: Option<String>,
    /// Allowed CORS origins, in fallback order.
    pub cors_origins: Vec<String>,
    /// Hosted store settings.
    pub supabase: SupabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `0.0.0.0`                       |
    /// | `PORT`                 | `3000`                          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    /// | `ADMIN_PASSWORD`       | unset                           |
    /// | `CORS_ORIGINS`         | [`DEFAULT_CORS_ORIGINS`]        |
    ///
    /// Store variables are read by [`SupabaseConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_password = std::env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty());

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .ok()
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(default_origins);

        Self {
            host,
            port,
            request_timeout_secs,
            admin_password,
            cors_origins,
            supabase: SupabaseConfig::from_env(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            request_timeout_secs: 30,
            admin_password: None,
            cors_origins: default_origins(),
            supabase: SupabaseConfig::default(),
        }
    }
}

fn default_origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
