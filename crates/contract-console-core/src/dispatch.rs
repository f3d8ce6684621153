//! Call dispatch: coerce raw form text, invoke the executor, classify the
//! outcome and keep the transaction ledger. The dispatcher is the error
//! containment boundary for the whole call flow; nothing escapes it as an
//! `Err` or a panic.

use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use thiserror::Error;

use crate::coerce::{coerce, CoercionError};
use crate::domain::{CallResult, FunctionDescriptor, ParamValue, TransactionRecord, TxStatus};
use crate::ledger::TransactionLedger;
use crate::ports::{CallReturn, ClockPort, ExecutorPort, NotifierPort, PortError, Severity};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("parameter {param} ({ty}) invalid: {reason}")]
    ParamValidation {
        param: String,
        ty: String,
        reason: String,
    },
    #[error("call rejected: {0}")]
    Execution(#[from] PortError),
    #[error("transaction confirmed with an empty receipt")]
    EmptyReceipt,
}

/// Shared pending-transaction slot. The dispatcher publishes the submitted
/// hash here while waiting for confirmation so the UI can render a pending
/// banner without holding the dispatcher lock.
#[derive(Debug, Clone, Default)]
pub struct PendingTxSignal(Arc<Mutex<Option<String>>>);

impl PendingTxSignal {
    pub fn get(&self) -> Option<String> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }

    fn set(&self, hash: String) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(hash);
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = None;
        }
    }
}

pub struct Dispatcher<E, N, C>
where
    E: ExecutorPort,
    N: NotifierPort,
    C: ClockPort,
{
    executor: E,
    notifier: N,
    clock: C,
    ledger: TransactionLedger,
    pending_tx: PendingTxSignal,
}

impl<E, N, C> Dispatcher<E, N, C>
where
    E: ExecutorPort,
    N: NotifierPort,
    C: ClockPort,
{
    pub fn new(executor: E, notifier: N, clock: C) -> Self {
        Self {
            executor,
            notifier,
            clock,
            ledger: TransactionLedger::new(),
            pending_tx: PendingTxSignal::default(),
        }
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn pending_tx(&self) -> PendingTxSignal {
        self.pending_tx.clone()
    }

    /// Run one call end to end. Every failure path lands here as an error
    /// `CallResult` plus a notification; prior state (ledger, pending slot)
    /// stays valid for the next dispatch.
    pub fn dispatch(
        &mut self,
        contract: Address,
        function: &FunctionDescriptor,
        raw_params: &[String],
    ) -> CallResult {
        let result = self.try_dispatch(contract, function, raw_params);
        self.pending_tx.clear();
        match result {
            Ok(result) => {
                if let Some(hash) = result.tx_hash() {
                    self.notifier.notify(
                        "Transaction confirmed",
                        &format!("{}: {}", function.name, hash),
                        Severity::Success,
                    );
                }
                result
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(function = %function.name, %message, "dispatch failed");
                self.notifier
                    .notify("Call failed", &message, Severity::Error);
                CallResult::Error { message }
            }
        }
    }

    fn try_dispatch(
        &mut self,
        contract: Address,
        function: &FunctionDescriptor,
        raw_params: &[String],
    ) -> Result<CallResult, DispatchError> {
        let args = coerce_params(function, raw_params)?;
        tracing::debug!(
            function = %function.name,
            args = args.len(),
            read_only = function.mutability.is_read_only(),
            "invoking executor"
        );

        match self.executor.invoke(contract, function, &args)? {
            CallReturn::Value(value) => Ok(CallResult::Value {
                value,
                tx_hash: None,
            }),
            CallReturn::Submitted(handle) => {
                self.pending_tx.set(handle.hash());
                let receipt = handle.wait()?.ok_or(DispatchError::EmptyReceipt)?;
                let status = if receipt.status == 1 {
                    TxStatus::Success
                } else {
                    TxStatus::Failed
                };
                let timestamp = self.clock.now_iso8601()?;
                self.ledger.record(TransactionRecord {
                    function_name: function.name.clone(),
                    params: args,
                    tx_hash: receipt.hash.clone(),
                    status,
                    timestamp,
                });
                let summary = match status {
                    TxStatus::Success => "transaction succeeded",
                    TxStatus::Failed => "transaction failed",
                };
                Ok(CallResult::Value {
                    value: summary.into(),
                    tx_hash: Some(receipt.hash),
                })
            }
        }
    }
}

/// Trim and coerce every raw slot, index-aligned with the declared inputs.
/// The first bad slot fails the whole set; no executor contact happens.
/// A slot count that does not match the declared inputs fails here too:
/// a missing slot is treated as blank, a surplus rejects the call.
fn coerce_params(
    function: &FunctionDescriptor,
    raw_params: &[String],
) -> Result<Vec<ParamValue>, DispatchError> {
    if raw_params.len() > function.inputs.len() {
        return Err(DispatchError::ParamValidation {
            param: function.name.clone(),
            ty: "call".to_owned(),
            reason: format!(
                "expected {} parameters, got {}",
                function.inputs.len(),
                raw_params.len()
            ),
        });
    }
    let mut args = Vec::with_capacity(function.inputs.len());
    for (index, input) in function.inputs.iter().enumerate() {
        let trimmed = raw_params.get(index).map_or("", |raw| raw.trim());
        if trimmed.is_empty() {
            return Err(param_error(input, index, "value required".to_owned()));
        }
        let value = coerce(&input.ty, trimmed)
            .map_err(|e: CoercionError| param_error(input, index, e.to_string()))?;
        args.push(value);
    }
    Ok(args)
}

fn param_error(
    input: &crate::domain::ParamDescriptor,
    index: usize,
    reason: String,
) -> DispatchError {
    let param = if input.name.is_empty() {
        (index + 1).to_string()
    } else {
        input.name.clone()
    };
    DispatchError::ParamValidation {
        param,
        ty: input.ty.clone(),
        reason,
    }
}
