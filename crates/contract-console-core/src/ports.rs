//! Port traits for the external collaborators the console depends on:
//! the wallet provider, the call executor, the notification sink and the
//! clock. Adapters (real or fake) implement these.

use alloy::primitives::Address;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{FunctionDescriptor, ParamValue};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("execution rejected: {0}")]
    Execution(String),
    #[error("no wallet connected")]
    NotConnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Account/chain change notifications, drained by the UI once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

pub trait ProviderPort {
    fn request_accounts(&self) -> Result<Vec<Address>, PortError>;
    fn chain_id(&self) -> Result<u64, PortError>;
    fn switch_chain(&self, chain_id: u64) -> Result<(), PortError>;
    fn sign_message(&self, message: &str) -> Result<String, PortError>;
    /// Drain pending account/chain change events in arrival order.
    fn poll_events(&self) -> Result<Vec<ProviderEvent>, PortError>;
    fn disconnect(&self) -> Result<(), PortError>;
}

/// Confirmation receipt of a submitted state-changing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub hash: String,
    /// On-chain status indicator; 1 means success.
    pub status: u64,
}

/// Handle to a submitted but not yet confirmed transaction.
pub trait TxHandle: Send {
    fn hash(&self) -> String;
    /// Block until confirmed. `Ok(None)` means the confirmation step yielded
    /// no receipt at all, which the dispatcher treats as fatal for the call.
    fn wait(&self) -> Result<Option<Receipt>, PortError>;
}

/// What the executor handed back: a decoded value for read-only calls, or a
/// waitable handle for state-changing ones. The dispatcher classifies on
/// this shape alone.
pub enum CallReturn {
    Value(Value),
    Submitted(Box<dyn TxHandle>),
}

impl std::fmt::Debug for CallReturn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallReturn::Value(value) => f.debug_tuple("Value").field(value).finish(),
            CallReturn::Submitted(handle) => {
                f.debug_tuple("Submitted").field(&handle.hash()).finish()
            }
        }
    }
}

pub trait ExecutorPort {
    fn invoke(
        &self,
        contract: Address,
        function: &FunctionDescriptor,
        args: &[ParamValue],
    ) -> Result<CallReturn, PortError>;
}

pub trait NotifierPort {
    fn notify(&self, title: &str, message: &str, severity: Severity);
}

pub trait ClockPort {
    fn now_iso8601(&self) -> Result<String, PortError>;
}
