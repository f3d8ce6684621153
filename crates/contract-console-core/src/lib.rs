pub mod abi;
pub mod chains;
pub mod coerce;
pub mod dispatch;
pub mod domain;
pub mod form;
pub mod ledger;
pub mod ports;

pub use abi::{validate_interface, ValidationError};
pub use coerce::{coerce, type_description, type_hint, CoercionError};
pub use dispatch::{DispatchError, Dispatcher, PendingTxSignal};
pub use domain::{
    CallResult, FunctionDescriptor, Mutability, ParamDescriptor, ParamValue, TransactionRecord,
    TxStatus,
};
pub use form::{CallForm, FormError};
pub use ledger::TransactionLedger;
pub use ports::{
    CallReturn, ClockPort, ExecutorPort, NotifierPort, PortError, ProviderEvent, ProviderPort,
    Receipt, Severity, TxHandle,
};
