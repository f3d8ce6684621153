#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use serde_json::{json, Value};

use contract_console_core::{
    validate_interface, CallReturn, ClockPort, Dispatcher, ExecutorPort, FunctionDescriptor,
    NotifierPort, ParamValue, PortError, Receipt, Severity, TxHandle,
};

/// What the fake executor should hand back for the next invocation.
#[derive(Debug, Clone)]
pub enum Scripted {
    Value(Value),
    Submitted {
        hash: String,
        receipt: Option<Receipt>,
    },
    Reject(String),
}

#[derive(Clone, Default)]
pub struct FakeExecutor {
    pub calls: Arc<Mutex<Vec<(String, Vec<ParamValue>)>>>,
    script: Arc<Mutex<VecDeque<Scripted>>>,
}

impl FakeExecutor {
    pub fn push(&self, next: Scripted) {
        self.script.lock().expect("script lock").push_back(next);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

struct FakeHandle {
    hash: String,
    receipt: Option<Receipt>,
}

impl TxHandle for FakeHandle {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn wait(&self) -> Result<Option<Receipt>, PortError> {
        Ok(self.receipt.clone())
    }
}

impl ExecutorPort for FakeExecutor {
    fn invoke(
        &self,
        _contract: Address,
        function: &FunctionDescriptor,
        args: &[ParamValue],
    ) -> Result<CallReturn, PortError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((function.name.clone(), args.to_vec()));

        let scripted = self.script.lock().expect("script lock").pop_front();
        match scripted {
            Some(Scripted::Value(v)) => Ok(CallReturn::Value(v)),
            Some(Scripted::Submitted { hash, receipt }) => {
                Ok(CallReturn::Submitted(Box::new(FakeHandle { hash, receipt })))
            }
            Some(Scripted::Reject(msg)) => Err(PortError::Execution(msg)),
            // Default behavior follows the declared mutability.
            None => {
                if function.mutability.is_read_only() {
                    Ok(CallReturn::Value(json!("ok")))
                } else {
                    let hash = format!("0x{:064x}", self.call_count());
                    Ok(CallReturn::Submitted(Box::new(FakeHandle {
                        hash: hash.clone(),
                        receipt: Some(Receipt { hash, status: 1 }),
                    })))
                }
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub messages: Arc<Mutex<Vec<(String, String, Severity)>>>,
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        self.messages
            .lock()
            .expect("messages lock")
            .push((title.to_owned(), message.to_owned(), severity));
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixedClock;

impl ClockPort for FixedClock {
    fn now_iso8601(&self) -> Result<String, PortError> {
        Ok("2026-08-28T12:00:00.000Z".to_owned())
    }
}

pub type TestDispatcher = Dispatcher<FakeExecutor, RecordingNotifier, FixedClock>;

pub fn new_dispatcher() -> (TestDispatcher, FakeExecutor, RecordingNotifier) {
    let executor = FakeExecutor::default();
    let notifier = RecordingNotifier::default();
    let dispatcher = Dispatcher::new(executor.clone(), notifier.clone(), FixedClock);
    (dispatcher, executor, notifier)
}

pub fn contract_address() -> Address {
    "0x000000000000000000000000000000000000CAFE"
        .parse()
        .expect("valid contract address")
}

pub fn interface_functions(raw: &str) -> Vec<FunctionDescriptor> {
    validate_interface(raw).expect("valid interface")
}

pub const TRANSFER_INTERFACE: &str = r#"[
  {
    "type": "function",
    "name": "transfer",
    "stateMutability": "nonpayable",
    "inputs": [
      {"name": "to", "type": "address"},
      {"name": "amount", "type": "uint256"}
    ],
    "outputs": [{"type": "bool"}]
  },
  {
    "type": "function",
    "name": "getValue",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [{"type": "uint256"}]
  }
]"#;
