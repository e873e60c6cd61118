// Runtime configuration handed to the application layer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub home_region: String,
    pub catalog_location: String,
    pub catalog_within: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            home_region: "Falmouth".to_string(),
            catalog_location: "Louisville, KY".to_string(),
            catalog_within: "25mi".to_string(),
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
