//! Application configuration loaded from environment variables.

use std::env;

use lookbook_core::domain::PostDefaults;
use lookbook_infra::PostFileConfig;

/// Where the post catalog gets its content.
#[derive(Debug, Clone)]
pub enum ContentBackend {
    /// Built-in sample posts, nothing written to disk.
    Seeded(PostDefaults),
    /// Rebuilt from the document directory; new posts are written through.
    Files(PostFileConfig),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub content: ContentBackend,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let files = PostFileConfig::from_env();

        let content = match env::var("CONTENT_BACKEND")
            .unwrap_or_else(|_| "seeded".to_string())
            .to_lowercase()
            .as_str()
        {
            "files" | "file" => ContentBackend::Files(files),
            "seeded" | "memory" => ContentBackend::Seeded(files.defaults),
            other => {
                tracing::warn!("Unknown CONTENT_BACKEND '{}', using seeded catalog", other);
                ContentBackend::Seeded(files.defaults)
            }
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            content,
        }
    }
}
