//! Service configuration read from the environment

use std::env;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the service listens on
    pub bind_addr: String,
    /// Upper bound for multipart request bodies, in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Read settings from the environment.
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listen address (default: "0.0.0.0:8000")
    /// - `MAX_UPLOAD_BYTES`: multipart body cap (default: 50 MiB)
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            bind_addr,
            max_upload_bytes,
        }
    }
}

/// Remote media store settings.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Bucket receiving uploaded media
    pub bucket: String,
    /// Base URL under which uploaded objects are publicly reachable
    pub public_base_url: String,
}

impl MediaConfig {
    /// Read settings from the environment.
    ///
    /// # Environment Variables
    /// - `MEDIA_BUCKET_NAME`: target bucket (default: "clipstream-media")
    /// - `MEDIA_PUBLIC_URL`: public base URL (default: the bucket's S3 URL)
    pub fn from_env() -> Self {
        let bucket =
            env::var("MEDIA_BUCKET_NAME").unwrap_or_else(|_| "clipstream-media".to_string());

        let public_base_url = env::var("MEDIA_PUBLIC_URL")
            .unwrap_or_else(|_| format!("https://{}.s3.amazonaws.com", bucket));

        Self {
            bucket,
            public_base_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            env::remove_var("BIND_ADDR");
            env::remove_var("MAX_UPLOAD_BYTES");
            env::remove_var("MEDIA_BUCKET_NAME");
            env::remove_var("MEDIA_PUBLIC_URL");
        }
    }

    #[test]
    #[serial]
    fn server_defaults_when_env_is_empty() {
        clear_env();

        let config = ServerConfig::from_env();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    #[serial]
    fn media_public_url_follows_bucket_by_default() {
        clear_env();
        unsafe {
            env::set_var("MEDIA_BUCKET_NAME", "clips-prod");
        }

        let config = MediaConfig::from_env();
        assert_eq!(config.bucket, "clips-prod");
        assert_eq!(config.public_base_url, "https://clips-prod.s3.amazonaws.com");

        clear_env();
    }

    #[test]
    #[serial]
    fn media_public_url_override_wins() {
        clear_env();
        unsafe {
            env::set_var("MEDIA_BUCKET_NAME", "clips-prod");
            env::set_var("MEDIA_PUBLIC_URL", "https://cdn.clipstream.example");
        }

        let config = MediaConfig::from_env();
        assert_eq!(config.public_base_url, "https://cdn.clipstream.example");

        clear_env();
    }
}
