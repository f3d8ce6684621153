//! Minimal blocking JSON-RPC client shared by the provider proxy and the
//! RPC call executor.

use serde_json::{json, Value};

use contract_console_core::PortError;

pub(crate) fn call(
    client: &reqwest::blocking::Client,
    url: &str,
    method: &str,
    params: Value,
) -> Result<Value, PortError> {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });
    let response: Value = client
        .post(url)
        .json(&body)
        .send()
        .map_err(|e| PortError::Transport(format!("{method}: {e}")))?
        .json()
        .map_err(|e| PortError::Transport(format!("{method}: invalid response: {e}")))?;

    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown rpc error");
        return Err(PortError::Execution(format!("{method}: {message}")));
    }
    Ok(response.get("result").cloned().unwrap_or(Value::Null))
}
