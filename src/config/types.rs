use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteEndpoints,
    #[serde(default)]
    pub kiosk: KioskTiming,
}

/// Remote collaborators the kiosk talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEndpoints {
    /// Content endpoint returning settings, buttons and events.
    #[serde(default)]
    pub content_url: String,
    /// Interaction append endpoint. Analytics are disabled when unset.
    #[serde(default)]
    pub interact_url: Option<String>,
    /// Base URL of the QR image renderer; the sign-up link is appended
    /// as the `data` query parameter.
    #[serde(default = "default_qr_base_url")]
    pub qr_base_url: String,
    /// Timeout for HTTP requests in seconds (default: 10).
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

/// Timer settings for the session state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KioskTiming {
    /// Seconds of inactivity before the screen resets (default: 300).
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Interval between spin-animation redraws in milliseconds (default: 50).
    #[serde(default = "default_spin_tick")]
    pub spin_tick_ms: u64,
}

fn default_qr_base_url() -> String {
    "https://api.qrserver.com/v1/create-qr-code/?size=300x300".to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_spin_tick() -> u64 {
    50
}

impl Default for RemoteEndpoints {
    fn default() -> Self {
        Self {
            content_url: String::new(),
            interact_url: None,
            qr_base_url: default_qr_base_url(),
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Default for KioskTiming {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: default_idle_timeout(),
            spin_tick_ms: default_spin_tick(),
        }
    }
}
