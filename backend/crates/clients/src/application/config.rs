//! Application Configuration
//!
//! Configuration for the Clients application layer.

/// Clients application configuration
#[derive(Debug, Clone)]
pub struct ClientsConfig {
    /// Page used when the query string carries none (or garbage)
    pub default_page: i64,
    /// Page size used when the query string carries none (or garbage)
    pub default_limit: i64,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
        }
    }
}

impl ClientsConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }
}
