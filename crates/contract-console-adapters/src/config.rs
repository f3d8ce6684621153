use std::env;

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// JSON-RPC endpoint forwarding EIP-1193 wallet calls. `None` selects the
    /// deterministic in-memory provider.
    pub eip1193_proxy_url: Option<String>,
    /// JSON-RPC endpoint for contract calls. `None` selects the in-memory
    /// executor.
    pub executor_rpc_url: Option<String>,
    pub request_timeout_ms: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_poll_attempts: u32,
    pub abi_max_bytes: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            eip1193_proxy_url: None,
            executor_rpc_url: None,
            request_timeout_ms: 15_000,
            receipt_poll_interval_ms: 1_000,
            receipt_poll_attempts: 120,
            abi_max_bytes: 512 * 1024,
        }
    }
}

impl AdapterConfig {
    /// Defaults overridden by `CONTRACT_CONSOLE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("CONTRACT_CONSOLE_PROXY_URL") {
            if !url.is_empty() {
                config.eip1193_proxy_url = Some(url);
            }
        }
        if let Ok(url) = env::var("CONTRACT_CONSOLE_RPC_URL") {
            if !url.is_empty() {
                config.executor_rpc_url = Some(url);
            }
        }
        if let Some(v) = env_u64("CONTRACT_CONSOLE_TIMEOUT_MS") {
            config.request_timeout_ms = v;
        }
        if let Some(v) = env_u64("CONTRACT_CONSOLE_RECEIPT_POLL_MS") {
            config.receipt_poll_interval_ms = v;
        }
        if let Some(v) = env_u64("CONTRACT_CONSOLE_RECEIPT_POLL_ATTEMPTS") {
            config.receipt_poll_attempts = v as u32;
        }
        if let Some(v) = env_u64("CONTRACT_CONSOLE_ABI_MAX_BYTES") {
            config.abi_max_bytes = v as usize;
        }
        config
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
