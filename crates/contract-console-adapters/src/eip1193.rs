//! EIP-1193 wallet provider adapter.
//!
//! Two runtimes: a deterministic in-memory provider for tests and offline
//! demos, and an HTTP proxy that forwards wallet JSON-RPC calls to a local
//! signer bridge.

use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address};
use serde_json::{json, Value};

use contract_console_core::chains::is_supported_chain;
use contract_console_core::{PortError, ProviderEvent, ProviderPort};

use crate::config::AdapterConfig;
use crate::rpc;

#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    state: Arc<Mutex<ProviderState>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Deterministic,
    Proxy(ProxyRuntime),
}

#[derive(Debug, Clone)]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Clone)]
struct ProviderState {
    accounts: Vec<Address>,
    chain_id: u64,
    events: Vec<ProviderEvent>,
}

impl Default for ProviderState {
    fn default() -> Self {
        Self {
            accounts: vec!["0x1000000000000000000000000000000000000001"
                .parse()
                .expect("valid built-in deterministic account")],
            chain_id: 1,
            events: Vec::new(),
        }
    }
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(&AdapterConfig::default())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: &AdapterConfig) -> Self {
        let mode = match &config.eip1193_proxy_url {
            Some(base_url) => {
                let timeout = std::time::Duration::from_millis(config.request_timeout_ms);
                match reqwest::blocking::Client::builder().timeout(timeout).build() {
                    Ok(client) => ProviderMode::Proxy(ProxyRuntime {
                        base_url: base_url.clone(),
                        client,
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, "proxy client init failed, using deterministic provider");
                        ProviderMode::Deterministic
                    }
                }
            }
            None => ProviderMode::Deterministic,
        };
        Self {
            mode,
            state: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    pub fn deterministic() -> Self {
        Self {
            mode: ProviderMode::Deterministic,
            state: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    fn state(&self) -> Result<std::sync::MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|_| PortError::Transport("provider state poisoned".to_owned()))
    }

    /// Test affordance: simulate the wallet switching accounts.
    pub fn simulate_accounts_changed(&self, accounts: Vec<Address>) {
        if let Ok(mut state) = self.state.lock() {
            state.accounts = accounts.clone();
            state.events.push(ProviderEvent::AccountsChanged(accounts));
        }
    }

    /// Test affordance: simulate the wallet switching chains.
    pub fn simulate_chain_changed(&self, chain_id: u64) {
        if let Ok(mut state) = self.state.lock() {
            state.chain_id = chain_id;
            state.events.push(ProviderEvent::ChainChanged(chain_id));
        }
    }
}

impl ProviderPort for Eip1193Adapter {
    fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        match &self.mode {
            ProviderMode::Deterministic => {
                let state = self.state()?;
                if state.accounts.is_empty() {
                    return Err(PortError::NotConnected);
                }
                Ok(state.accounts.clone())
            }
            ProviderMode::Proxy(proxy) => {
                let result = rpc::call(
                    &proxy.client,
                    &proxy.base_url,
                    "eth_requestAccounts",
                    json!([]),
                )?;
                let accounts = parse_accounts(&result)?;
                if accounts.is_empty() {
                    return Err(PortError::NotConnected);
                }
                self.state()?.accounts = accounts.clone();
                Ok(accounts)
            }
        }
    }

    fn chain_id(&self) -> Result<u64, PortError> {
        match &self.mode {
            ProviderMode::Deterministic => Ok(self.state()?.chain_id),
            ProviderMode::Proxy(proxy) => {
                let result =
                    rpc::call(&proxy.client, &proxy.base_url, "eth_chainId", json!([]))?;
                let chain_id = parse_quantity(&result)?;
                self.state()?.chain_id = chain_id;
                Ok(chain_id)
            }
        }
    }

    fn switch_chain(&self, chain_id: u64) -> Result<(), PortError> {
        if !is_supported_chain(chain_id) {
            return Err(PortError::Validation(format!(
                "unsupported chain: {chain_id}"
            )));
        }
        match &self.mode {
            ProviderMode::Deterministic => {
                let mut state = self.state()?;
                state.chain_id = chain_id;
                state.events.push(ProviderEvent::ChainChanged(chain_id));
                Ok(())
            }
            ProviderMode::Proxy(proxy) => {
                rpc::call(
                    &proxy.client,
                    &proxy.base_url,
                    "wallet_switchEthereumChain",
                    json!([{ "chainId": format!("0x{chain_id:x}") }]),
                )?;
                let mut state = self.state()?;
                state.chain_id = chain_id;
                state.events.push(ProviderEvent::ChainChanged(chain_id));
                Ok(())
            }
        }
    }

    fn sign_message(&self, message: &str) -> Result<String, PortError> {
        let account = self
            .state()?
            .accounts
            .first()
            .copied()
            .ok_or(PortError::NotConnected)?;
        match &self.mode {
            ProviderMode::Deterministic => {
                // Stable fake signature keyed on signer and message.
                let digest = keccak256([account.as_slice(), message.as_bytes()].concat());
                Ok(format!("{digest}"))
            }
            ProviderMode::Proxy(proxy) => {
                let result = rpc::call(
                    &proxy.client,
                    &proxy.base_url,
                    "personal_sign",
                    json!([message, account]),
                )?;
                result
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| PortError::Transport("personal_sign: non-string result".to_owned()))
            }
        }
    }

    fn poll_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        Ok(std::mem::take(&mut self.state()?.events))
    }

    fn disconnect(&self) -> Result<(), PortError> {
        let mut state = self.state()?;
        state.accounts.clear();
        state.events.push(ProviderEvent::AccountsChanged(Vec::new()));
        Ok(())
    }
}

fn parse_accounts(result: &Value) -> Result<Vec<Address>, PortError> {
    let raw = result
        .as_array()
        .ok_or_else(|| PortError::Transport("eth_requestAccounts: non-array result".to_owned()))?;
    raw.iter()
        .map(|v| {
            v.as_str()
                .ok_or_else(|| PortError::Transport("account entry is not a string".to_owned()))?
                .parse()
                .map_err(|e| PortError::Transport(format!("invalid account address: {e}")))
        })
        .collect()
}

fn parse_quantity(result: &Value) -> Result<u64, PortError> {
    let raw = result
        .as_str()
        .ok_or_else(|| PortError::Transport("quantity is not a string".to_owned()))?;
    let digits = raw.trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .map_err(|e| PortError::Transport(format!("invalid quantity '{raw}': {e}")))
}
