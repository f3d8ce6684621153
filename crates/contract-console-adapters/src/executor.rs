//! Contract call executor adapter.
//!
//! Classifies calls by the declared mutability: `pure`/`view` resolve to an
//! immediate decoded value, everything else becomes a submitted transaction
//! handle the dispatcher waits on. The in-memory runtime is fully
//! deterministic and scriptable; the RPC runtime ABI-encodes calldata with
//! `alloy::dyn_abi` and talks JSON-RPC.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use alloy::dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, Param, StateMutability};
use alloy::primitives::{hex, keccak256, Address, B256};
use serde_json::{json, Value};

use contract_console_core::{
    CallReturn, ExecutorPort, FunctionDescriptor, Mutability, ParamDescriptor, ParamValue,
    PortError, Receipt, TxHandle,
};

use crate::config::AdapterConfig;
use crate::rpc;

/// Scripted confirmation outcome for the in-memory runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptOutcome {
    Success,
    Failed,
    /// Confirmation yields no receipt at all.
    Empty,
}

#[derive(Clone)]
pub struct CallExecutorAdapter {
    mode: ExecutorMode,
    caller: Arc<Mutex<Option<Address>>>,
}

#[derive(Clone)]
enum ExecutorMode {
    InMemory(Arc<Mutex<InMemoryChain>>),
    Rpc(RpcRuntime),
}

#[derive(Debug, Default)]
struct InMemoryChain {
    returns: HashMap<String, Value>,
    receipts: VecDeque<ReceiptOutcome>,
    tx_counter: u64,
}

#[derive(Clone)]
struct RpcRuntime {
    url: String,
    client: reqwest::blocking::Client,
    poll_interval: std::time::Duration,
    poll_attempts: u32,
}

impl Default for CallExecutorAdapter {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl CallExecutorAdapter {
    pub fn in_memory() -> Self {
        Self {
            mode: ExecutorMode::InMemory(Arc::new(Mutex::new(InMemoryChain::default()))),
            caller: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_config(config: &AdapterConfig) -> Result<Self, PortError> {
        let Some(url) = &config.executor_rpc_url else {
            return Ok(Self::in_memory());
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("rpc client init failed: {e}")))?;
        Ok(Self {
            mode: ExecutorMode::Rpc(RpcRuntime {
                url: url.clone(),
                client,
                poll_interval: std::time::Duration::from_millis(config.receipt_poll_interval_ms),
                poll_attempts: config.receipt_poll_attempts,
            }),
            caller: Arc::new(Mutex::new(None)),
        })
    }

    /// Account transactions are sent from (the connected wallet account).
    pub fn set_caller(&self, caller: Option<Address>) {
        if let Ok(mut slot) = self.caller.lock() {
            *slot = caller;
        }
    }

    /// In-memory affordance: fix the decoded value a read-only function
    /// resolves to.
    pub fn set_return(&self, function_name: &str, value: Value) {
        if let ExecutorMode::InMemory(chain) = &self.mode {
            if let Ok(mut chain) = chain.lock() {
                chain.returns.insert(function_name.to_owned(), value);
            }
        }
    }

    /// In-memory affordance: script the confirmation outcome of the next
    /// state-changing call.
    pub fn script_receipt(&self, outcome: ReceiptOutcome) {
        if let ExecutorMode::InMemory(chain) = &self.mode {
            if let Ok(mut chain) = chain.lock() {
                chain.receipts.push_back(outcome);
            }
        }
    }
}

impl ExecutorPort for CallExecutorAdapter {
    fn invoke(
        &self,
        contract: Address,
        function: &FunctionDescriptor,
        args: &[ParamValue],
    ) -> Result<CallReturn, PortError> {
        if function.inputs.len() != args.len() {
            return Err(PortError::Validation(format!(
                "argument count mismatch: expected {}, got {}",
                function.inputs.len(),
                args.len()
            )));
        }
        match &self.mode {
            ExecutorMode::InMemory(chain) => invoke_in_memory(chain, function, args),
            ExecutorMode::Rpc(runtime) => {
                let caller = self.caller.lock().ok().and_then(|slot| *slot);
                invoke_rpc(runtime, caller, contract, function, args)
            }
        }
    }
}

fn invoke_in_memory(
    chain: &Arc<Mutex<InMemoryChain>>,
    function: &FunctionDescriptor,
    args: &[ParamValue],
) -> Result<CallReturn, PortError> {
    let mut chain = chain
        .lock()
        .map_err(|_| PortError::Transport("in-memory chain poisoned".to_owned()))?;

    if function.mutability.is_read_only() {
        let value = chain
            .returns
            .get(&function.name)
            .cloned()
            .unwrap_or_else(|| {
                // Default read result: echo the arguments back.
                json!(args.iter().map(ToString::to_string).collect::<Vec<_>>())
            });
        return Ok(CallReturn::Value(value));
    }

    chain.tx_counter += 1;
    let digest = keccak256(format!("{}:{}", function.name, chain.tx_counter));
    let hash = format!("{digest}");
    let outcome = chain
        .receipts
        .pop_front()
        .unwrap_or(ReceiptOutcome::Success);
    Ok(CallReturn::Submitted(Box::new(InMemoryTxHandle {
        hash,
        outcome,
    })))
}

struct InMemoryTxHandle {
    hash: String,
    outcome: ReceiptOutcome,
}

impl TxHandle for InMemoryTxHandle {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn wait(&self) -> Result<Option<Receipt>, PortError> {
        match self.outcome {
            ReceiptOutcome::Success => Ok(Some(Receipt {
                hash: self.hash.clone(),
                status: 1,
            })),
            ReceiptOutcome::Failed => Ok(Some(Receipt {
                hash: self.hash.clone(),
                status: 0,
            })),
            ReceiptOutcome::Empty => Ok(None),
        }
    }
}

fn invoke_rpc(
    runtime: &RpcRuntime,
    caller: Option<Address>,
    contract: Address,
    function: &FunctionDescriptor,
    args: &[ParamValue],
) -> Result<CallReturn, PortError> {
    let calldata = encode_call(function, args)?;
    let data = hex::encode_prefixed(&calldata);

    if function.mutability.is_read_only() {
        let result = rpc::call(
            &runtime.client,
            &runtime.url,
            "eth_call",
            json!([{ "to": contract, "data": data }, "latest"]),
        )?;
        let raw = result
            .as_str()
            .ok_or_else(|| PortError::Transport("eth_call: non-string result".to_owned()))?;
        let bytes = hex::decode(raw)
            .map_err(|e| PortError::Transport(format!("eth_call: invalid hex: {e}")))?;
        return Ok(CallReturn::Value(decode_output(function, &bytes)?));
    }

    let from = caller.ok_or(PortError::NotConnected)?;
    let result = rpc::call(
        &runtime.client,
        &runtime.url,
        "eth_sendTransaction",
        json!([{ "from": from, "to": contract, "data": data }]),
    )?;
    let hash = result
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| PortError::Transport("eth_sendTransaction: non-string result".to_owned()))?;
    Ok(CallReturn::Submitted(Box::new(RpcTxHandle {
        runtime: runtime.clone(),
        hash,
    })))
}

struct RpcTxHandle {
    runtime: RpcRuntime,
    hash: String,
}

impl TxHandle for RpcTxHandle {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn wait(&self) -> Result<Option<Receipt>, PortError> {
        for _ in 0..self.runtime.poll_attempts {
            let result = rpc::call(
                &self.runtime.client,
                &self.runtime.url,
                "eth_getTransactionReceipt",
                json!([self.hash]),
            )?;
            if !result.is_null() {
                let status = result
                    .get("status")
                    .and_then(Value::as_str)
                    .map(|s| u64::from_str_radix(s.trim_start_matches("0x"), 16))
                    .transpose()
                    .map_err(|e| PortError::Transport(format!("invalid receipt status: {e}")))?
                    .unwrap_or(0);
                let hash = result
                    .get("transactionHash")
                    .and_then(Value::as_str)
                    .unwrap_or(&self.hash)
                    .to_owned();
                return Ok(Some(Receipt { hash, status }));
            }
            std::thread::sleep(self.runtime.poll_interval);
        }
        // Confirmation window exhausted with no receipt.
        Ok(None)
    }
}

/// ABI-encode one call from its descriptor and coerced arguments. This is
/// where pass-through values (e.g. `bytes32` strings) get real validation.
pub fn encode_call(function: &FunctionDescriptor, args: &[ParamValue]) -> Result<Vec<u8>, PortError> {
    let abi_function = to_abi_function(function);
    let mut values = Vec::with_capacity(args.len());
    for (input, arg) in function.inputs.iter().zip(args.iter()) {
        let ty: DynSolType = input
            .ty
            .parse()
            .map_err(|e| PortError::Validation(format!("unsupported type '{}': {e}", input.ty)))?;
        let value = to_dyn_value(&ty, arg).map_err(|e| {
            PortError::Validation(format!(
                "argument '{}' cannot be encoded: {e}",
                display_name(input)
            ))
        })?;
        values.push(value);
    }
    abi_function
        .abi_encode_input(&values)
        .map_err(|e| PortError::Validation(format!("abi encoding failed: {e}")))
}

fn display_name(input: &ParamDescriptor) -> &str {
    if input.name.is_empty() {
        &input.ty
    } else {
        &input.name
    }
}

fn to_abi_function(function: &FunctionDescriptor) -> Function {
    Function {
        name: function.name.clone(),
        inputs: function.inputs.iter().map(to_abi_param).collect(),
        outputs: function.outputs.iter().map(to_abi_param).collect(),
        state_mutability: match function.mutability {
            Mutability::Pure => StateMutability::Pure,
            Mutability::View => StateMutability::View,
            Mutability::NonPayable => StateMutability::NonPayable,
            Mutability::Payable => StateMutability::Payable,
        },
    }
}

fn to_abi_param(param: &ParamDescriptor) -> Param {
    Param {
        ty: param.ty.clone(),
        name: param.name.clone(),
        components: param.components.iter().map(to_abi_param).collect(),
        internal_type: None,
    }
}

fn to_dyn_value(ty: &DynSolType, value: &ParamValue) -> Result<DynSolValue, String> {
    match (ty, value) {
        (DynSolType::Uint(bits), ParamValue::Int(i)) => {
            if i.is_negative() {
                return Err(format!("negative value {i} for unsigned type"));
            }
            Ok(DynSolValue::Uint(i.into_raw(), *bits))
        }
        (DynSolType::Int(bits), ParamValue::Int(i)) => Ok(DynSolValue::Int(*i, *bits)),
        (DynSolType::Address, ParamValue::Address(a)) => Ok(DynSolValue::Address(*a)),
        (DynSolType::Bool, ParamValue::Bool(b)) => Ok(DynSolValue::Bool(*b)),
        (DynSolType::Bytes, ParamValue::Bytes(b)) => Ok(DynSolValue::Bytes(b.clone())),
        (DynSolType::String, ParamValue::String(s)) => Ok(DynSolValue::String(s.clone())),
        (DynSolType::FixedBytes(size), ParamValue::String(s)) => {
            let bytes =
                hex::decode(s).map_err(|e| format!("invalid hex for bytes{size}: {e}"))?;
            if bytes.len() != *size {
                return Err(format!(
                    "bytes{size} length mismatch: got {} bytes",
                    bytes.len()
                ));
            }
            let mut word = B256::ZERO;
            word.0[..*size].copy_from_slice(&bytes);
            Ok(DynSolValue::FixedBytes(word, *size))
        }
        (DynSolType::Array(inner), ParamValue::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(to_dyn_value(inner, item)?);
            }
            Ok(DynSolValue::Array(out))
        }
        (ty, value) => Err(format!("cannot encode {value} as {}", ty.sol_type_name())),
    }
}

fn decode_output(function: &FunctionDescriptor, bytes: &[u8]) -> Result<Value, PortError> {
    if function.outputs.is_empty() {
        return Ok(Value::Null);
    }
    let abi_function = to_abi_function(function);
    let decoded = abi_function
        .abi_decode_output(bytes, true)
        .map_err(|e| PortError::Transport(format!("output decoding failed: {e}")))?;
    let mut values: Vec<Value> = decoded.iter().map(dyn_to_json).collect();
    if values.len() == 1 {
        Ok(values.remove(0))
    } else {
        Ok(Value::Array(values))
    }
}

fn dyn_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => json!(b),
        DynSolValue::Int(i, _) => json!(i.to_string()),
        DynSolValue::Uint(u, _) => json!(u.to_string()),
        DynSolValue::Address(a) => json!(a.to_string()),
        DynSolValue::FixedBytes(word, size) => json!(hex::encode_prefixed(&word.0[..*size])),
        DynSolValue::Bytes(b) => json!(hex::encode_prefixed(b)),
        DynSolValue::String(s) => json!(s),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            Value::Array(items.iter().map(dyn_to_json).collect())
        }
        other => json!(format!("{other:?}")),
    }
}
