use contract_console_core::{NotifierPort, Severity};

/// Notification sink backed by `tracing`. The GUI layers its own toasts on
/// top of dispatch results; this adapter keeps every outcome in the logs.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl NotifierPort for TracingNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(%title, %message, "notification"),
            Severity::Success => tracing::info!(%title, %message, "notification"),
            Severity::Error => tracing::error!(%title, %message, "notification"),
        }
    }
}
