use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub idp: IdpConfig,
    pub swagger: SwaggerConfig,
    pub minio: MinIOConfig,
    pub geocoding: GeocodingConfig,
    pub reports: ReportConfig,
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub jwks_cache_ttl: Duration,
    pub jwt_leeway: Duration,
}

/// Identity provider client configuration.
///
/// The service delegates credential handling to an external OIDC provider:
/// sign-in is a password grant against the issuer's token endpoint, sign-up
/// goes through the provider's management API with a client-credentials token.
#[derive(Debug, Clone)]
pub struct IdpConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub revocation_url: String,
    pub management_api_url: String,
    pub management_resource: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// MinIO/S3 storage configuration for report photo uploads
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL used when building photo URLs (defaults to endpoint)
    pub public_endpoint: String,
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// Bucket name for storing files
    pub bucket: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
    /// Prefix for publicly readable files (e.g., "public")
    pub public_prefix: String,
}

/// Address lookup configuration.
///
/// City and state qualifiers are appended to every query; the whole service
/// operates on a single municipality.
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub user_agent: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Hours a report stays visible after creation
    pub ttl_hours: i64,
    /// Max anonymous report submissions per IP per hour
    pub max_per_ip_per_hour: i64,
    /// Interval between expired-report sweeps
    pub sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            idp: IdpConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            minio: MinIOConfig::from_env()?,
            geocoding: GeocodingConfig::from_env()?,
            reports: ReportConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    // Default values for JWT authentication
    const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600; // 1 hour
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60; // 1 minute

    pub fn from_env() -> Result<Self, String> {
        let issuer = env::var("AUTH_ISSUER")
            .map_err(|_| "AUTH_ISSUER environment variable is required".to_string())?;

        let audience = env::var("AUTH_AUDIENCE")
            .map_err(|_| "AUTH_AUDIENCE environment variable is required".to_string())?;

        let jwks_cache_ttl_secs = env::var("JWKS_CACHE_TTL")
            .unwrap_or_else(|_| Self::DEFAULT_JWKS_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWKS_CACHE_TTL must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            issuer,
            audience,
            jwks_cache_ttl: Duration::from_secs(jwks_cache_ttl_secs),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl IdpConfig {
    pub fn from_env() -> Result<Self, String> {
        let client_id = env::var("IDP_CLIENT_ID")
            .map_err(|_| "IDP_CLIENT_ID environment variable is required".to_string())?;

        let client_secret = env::var("IDP_CLIENT_SECRET")
            .map_err(|_| "IDP_CLIENT_SECRET environment variable is required".to_string())?;

        // Token and revocation endpoints derive from the issuer unless overridden
        let issuer = env::var("AUTH_ISSUER")
            .map_err(|_| "AUTH_ISSUER environment variable is required".to_string())?;

        let token_url =
            env::var("IDP_TOKEN_URL").unwrap_or_else(|_| format!("{}/token", issuer));

        let revocation_url = env::var("IDP_REVOCATION_URL")
            .unwrap_or_else(|_| format!("{}/token/revocation", issuer));

        let management_api_url = env::var("IDP_MANAGEMENT_API_URL")
            .unwrap_or_else(|_| issuer.trim_end_matches("/oidc").to_string());

        let management_resource = env::var("IDP_MANAGEMENT_RESOURCE")
            .unwrap_or_else(|_| format!("{}/api", management_api_url));

        Ok(Self {
            client_id,
            client_secret,
            token_url,
            revocation_url,
            management_api_url,
            management_resource,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Ajude JF API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "API de coordenação de doações e alertas de Juiz de Fora".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MinIOConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint =
            env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint =
            env::var("MINIO_PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone());

        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let bucket = env::var("MINIO_BUCKET").unwrap_or_else(|_| "ajudejf-uploads".to_string());

        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        let public_prefix =
            env::var("MINIO_PUBLIC_PREFIX").unwrap_or_else(|_| "public".to_string());

        Ok(Self {
            endpoint,
            public_endpoint,
            access_key,
            secret_key,
            bucket,
            region,
            public_prefix,
        })
    }
}

impl GeocodingConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("GEOCODING_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let user_agent = env::var("GEOCODING_USER_AGENT")
            .unwrap_or_else(|_| "AjudeJF/1.0 (donation-coordination)".to_string());

        let city = env::var("GEOCODING_CITY").unwrap_or_else(|_| "Juiz de Fora".to_string());

        let state = env::var("GEOCODING_STATE").unwrap_or_else(|_| "MG".to_string());

        Ok(Self {
            base_url,
            user_agent,
            city,
            state,
        })
    }
}

impl ReportConfig {
    const DEFAULT_TTL_HOURS: i64 = 24;
    const DEFAULT_MAX_PER_IP_PER_HOUR: i64 = 5;
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600; // 1 hour

    pub fn from_env() -> Result<Self, String> {
        let ttl_hours = env::var("REPORT_TTL_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_TTL_HOURS.to_string())
            .parse::<i64>()
            .map_err(|_| "REPORT_TTL_HOURS must be a valid number".to_string())?;

        let max_per_ip_per_hour = env::var("REPORT_MAX_PER_IP_PER_HOUR")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_PER_IP_PER_HOUR.to_string())
            .parse::<i64>()
            .map_err(|_| "REPORT_MAX_PER_IP_PER_HOUR must be a valid number".to_string())?;

        let sweep_interval_secs = env::var("REPORT_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "REPORT_SWEEP_INTERVAL_SECS must be a valid number".to_string())?;

        Ok(Self {
            ttl_hours,
            max_per_ip_per_hour,
            sweep_interval_secs,
        })
    }
}
