//! Application state types.

use alloy::primitives::Address;

use contract_console_core::chains::DEFAULT_CHAIN;
use contract_console_core::Severity;

/// Preloadable example interface for the ABI input.
pub const SAMPLE_ABI: &str = r#"[
  {
    "inputs": [],
    "name": "getValue",
    "outputs": [{"type": "uint256"}],
    "stateMutability": "view",
    "type": "function"
  },
  {
    "inputs": [{"name": "value", "type": "uint256"}],
    "name": "setValue",
    "outputs": [],
    "stateMutability": "nonpayable",
    "type": "function"
  }
]"#;

/// Wallet session state.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub account: Option<Address>,
    pub chain_id: u64,
    pub is_connecting: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            account: None,
            chain_id: DEFAULT_CHAIN,
            is_connecting: false,
        }
    }
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}

/// Transient user-visible notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    /// `egui` clock time after which the toast disappears.
    pub expires_at: f64,
}

pub fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Info => egui::Color32::from_rgb(90, 160, 220),
        Severity::Success => egui::Color32::from_rgb(80, 200, 120),
        Severity::Error => egui::Color32::from_rgb(220, 80, 80),
    }
}
