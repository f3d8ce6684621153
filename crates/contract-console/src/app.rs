//! Main application state and update loop

use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use eframe::egui;

use contract_console_adapters::{
    AdapterConfig, CallExecutorAdapter, Eip1193Adapter, SystemClockAdapter, TracingNotifier,
};
use contract_console_core::chains::SUPPORTED_CHAINS;
use contract_console_core::{
    coerce::{type_description, type_hint},
    validate_interface, CallForm, CallResult, Dispatcher, FunctionDescriptor, PendingTxSignal,
    PortError, ProviderEvent, ProviderPort, Severity,
};
use contract_console_core::TransactionRecord;

use crate::state::{severity_color, SessionState, Toast, SAMPLE_ABI};
use crate::ui;

type ConsoleDispatcher = Dispatcher<CallExecutorAdapter, TracingNotifier, SystemClockAdapter>;

const TOAST_SECONDS: f64 = 5.0;

/// The main application state
pub struct App {
    provider: Eip1193Adapter,
    /// Executor handle kept alongside the dispatcher so the caller account
    /// can be updated without taking the dispatcher lock.
    executor: CallExecutorAdapter,
    dispatcher: Arc<Mutex<ConsoleDispatcher>>,
    pending_tx: PendingTxSignal,

    /// Async connect result receiver
    connect_result: Arc<Mutex<Option<Result<Vec<Address>, PortError>>>>,
    /// Async dispatch result receiver
    dispatch_result: Arc<Mutex<Option<CallResult>>>,

    session: SessionState,

    // Contract setup
    abi_json: String,
    contract_address_input: String,
    contract: Option<Address>,
    functions: Vec<FunctionDescriptor>,
    setup_error: Option<String>,
    abi_max_bytes: usize,

    // Call form
    form: CallForm,
    is_dispatching: bool,
    last_result: Option<CallResult>,
    tx_history: Vec<TransactionRecord>,

    // Message signing
    message_input: String,
    signature: Option<String>,

    toasts: Vec<Toast>,
}

impl App {
    /// Create a new App instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::from_config(AdapterConfig::from_env())
    }

    fn from_config(config: AdapterConfig) -> Self {
        let provider = Eip1193Adapter::with_config(&config);
        let executor = CallExecutorAdapter::with_config(&config).unwrap_or_else(|e| {
            tracing::error!(error = %e, "rpc executor init failed, using in-memory executor");
            CallExecutorAdapter::in_memory()
        });
        let dispatcher =
            ConsoleDispatcher::new(executor.clone(), TracingNotifier, SystemClockAdapter);
        let pending_tx = dispatcher.pending_tx();

        Self {
            provider,
            executor,
            dispatcher: Arc::new(Mutex::new(dispatcher)),
            pending_tx,
            connect_result: Arc::new(Mutex::new(None)),
            dispatch_result: Arc::new(Mutex::new(None)),
            session: SessionState::default(),
            abi_json: String::new(),
            contract_address_input: String::new(),
            contract: None,
            functions: Vec::new(),
            setup_error: None,
            abi_max_bytes: config.abi_max_bytes,
            form: CallForm::new(),
            is_dispatching: false,
            last_result: None,
            tx_history: Vec::new(),
            message_input: String::new(),
            signature: None,
            toasts: Vec::new(),
        }
    }

    fn push_toast(&mut self, ctx: &egui::Context, title: &str, message: &str, severity: Severity) {
        let now = ctx.input(|i| i.time);
        self.toasts.push(Toast {
            title: title.to_owned(),
            message: message.to_owned(),
            severity,
            expires_at: now + TOAST_SECONDS,
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.drain_provider_events(ctx);
        self.check_connect_result(ctx);
        self.check_dispatch_result(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            self.render_header(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                self.render_contract_setup(ui);
                if !self.functions.is_empty() {
                    self.render_call_form(ui);
                }
                self.render_results(ui);
                self.render_history(ui);
                self.render_message_signing(ui);
                ui.add_space(20.0);
            });
        });

        self.render_toasts(ctx);

        // Background threads finish between frames; keep polling while work
        // is outstanding.
        if self.is_dispatching || self.session.is_connecting {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

impl App {
    // -------------------------------------------------------------------------
    // ASYNC RESULT POLLING
    // -------------------------------------------------------------------------

    fn drain_provider_events(&mut self, ctx: &egui::Context) {
        let events = match self.provider.poll_events() {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "provider event poll failed");
                return;
            }
        };
        for event in events {
            match event {
                ProviderEvent::AccountsChanged(accounts) => match accounts.first() {
                    Some(account) => {
                        self.session.account = Some(*account);
                        self.executor.set_caller(Some(*account));
                        self.push_toast(
                            ctx,
                            "Account changed",
                            &account.to_string(),
                            Severity::Info,
                        );
                    }
                    None => {
                        self.teardown_session();
                        self.push_toast(
                            ctx,
                            "Wallet disconnected",
                            "No account connected",
                            Severity::Info,
                        );
                    }
                },
                ProviderEvent::ChainChanged(chain_id) => {
                    self.session.chain_id = chain_id;
                    let name = contract_console_core::chains::chain_name(chain_id)
                        .unwrap_or("unknown chain");
                    self.push_toast(ctx, "Network changed", name, Severity::Info);
                }
            }
        }
    }

    fn check_connect_result(&mut self, ctx: &egui::Context) {
        let result = self.connect_result.lock().ok().and_then(|mut r| r.take());
        let Some(result) = result else { return };
        self.session.is_connecting = false;
        match result {
            Ok(accounts) => match accounts.first() {
                Some(account) => {
                    self.session.account = Some(*account);
                    self.executor.set_caller(Some(*account));
                    if let Ok(chain_id) = self.provider.chain_id() {
                        self.session.chain_id = chain_id;
                    }
                    self.push_toast(
                        ctx,
                        "Wallet connected",
                        &account.to_string(),
                        Severity::Success,
                    );
                }
                None => {
                    self.push_toast(
                        ctx,
                        "Connection failed",
                        "Wallet returned no accounts",
                        Severity::Error,
                    );
                }
            },
            Err(e) => {
                self.push_toast(ctx, "Connection failed", &e.to_string(), Severity::Error);
            }
        }
    }

    fn check_dispatch_result(&mut self, ctx: &egui::Context) {
        let result = self.dispatch_result.lock().ok().and_then(|mut r| r.take());
        let Some(result) = result else { return };
        self.is_dispatching = false;
        if let Ok(dispatcher) = self.dispatcher.try_lock() {
            self.tx_history = dispatcher.ledger().all().to_vec();
        }
        match &result {
            CallResult::Error { message } => {
                let message = message.clone();
                self.push_toast(ctx, "Call failed", &message, Severity::Error);
            }
            CallResult::Value { tx_hash, .. } => {
                if let Some(hash) = tx_hash.clone() {
                    self.push_toast(
                        ctx,
                        "Transaction confirmed",
                        &ui::short_hash(&hash),
                        Severity::Success,
                    );
                }
            }
        }
        self.last_result = Some(result);
    }

    // -------------------------------------------------------------------------
    // ACTIONS
    // -------------------------------------------------------------------------

    /// Drop everything that depends on a connected wallet: the account, the
    /// loaded contract with its function set, the form, the last result and
    /// any signature. Without a wallet nothing remains callable.
    fn teardown_session(&mut self) {
        self.session.account = None;
        self.executor.set_caller(None);
        self.signature = None;
        self.contract = None;
        self.functions.clear();
        self.form.clear();
        self.last_result = None;
    }

    fn trigger_connect(&mut self) {
        if self.session.is_connecting {
            return;
        }
        self.session.is_connecting = true;
        let provider = self.provider.clone();
        let slot = Arc::clone(&self.connect_result);
        std::thread::spawn(move || {
            let result = provider.request_accounts();
            if let Ok(mut guard) = slot.lock() {
                *guard = Some(result);
            }
        });
    }

    fn disconnect(&mut self) {
        if let Err(e) = self.provider.disconnect() {
            tracing::warn!(error = %e, "disconnect failed");
        }
        // The AccountsChanged event drained next frame clears session state.
    }

    /// Parse the pasted ABI and target address, replacing the active
    /// interface set. Any failure leaves the previous setup untouched.
    fn initialize_contract(&mut self, ctx: &egui::Context) {
        self.setup_error = None;
        match self.try_initialize_contract() {
            Ok(count) => {
                self.form.clear();
                self.last_result = None;
                self.push_toast(
                    ctx,
                    "Contract loaded",
                    &format!("{count} callable function(s)"),
                    Severity::Success,
                );
            }
            Err(e) => {
                self.setup_error = Some(e.to_string());
            }
        }
    }

    fn try_initialize_contract(&mut self) -> eyre::Result<usize> {
        if self.abi_json.len() > self.abi_max_bytes {
            eyre::bail!(
                "ABI too large ({} bytes, limit {})",
                self.abi_json.len(),
                self.abi_max_bytes
            );
        }
        let address: Address = self
            .contract_address_input
            .trim()
            .parse()
            .map_err(|_| eyre::eyre!("invalid contract address"))?;
        let functions = validate_interface(&self.abi_json)?;
        let count = functions.len();
        self.contract = Some(address);
        self.functions = functions;
        Ok(count)
    }

    fn trigger_dispatch(&mut self) {
        let Some(contract) = self.contract else { return };
        let Some(function) = self.form.selected().cloned() else {
            return;
        };
        let raw_params = self.form.raw_params().to_vec();

        self.is_dispatching = true;
        self.last_result = None;
        let dispatcher = Arc::clone(&self.dispatcher);
        let slot = Arc::clone(&self.dispatch_result);
        std::thread::spawn(move || {
            let result = match dispatcher.lock() {
                Ok(mut dispatcher) => dispatcher.dispatch(contract, &function, &raw_params),
                Err(_) => CallResult::Error {
                    message: "dispatcher unavailable".to_owned(),
                },
            };
            if let Ok(mut guard) = slot.lock() {
                *guard = Some(result);
            }
        });
    }

    // -------------------------------------------------------------------------
    // RENDERING
    // -------------------------------------------------------------------------

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new("🖥 Contract Console")
                    .size(22.0)
                    .color(egui::Color32::from_rgb(0, 212, 170)),
            );
            ui.add_space(20.0);
            ui.separator();
            ui.add_space(10.0);

            ui.label("Network:");
            let selected_name = contract_console_core::chains::chain_name(self.session.chain_id)
                .unwrap_or("unknown chain");
            let mut switch_to: Option<u64> = None;
            egui::ComboBox::from_id_salt("chain_select")
                .selected_text(selected_name)
                .width(180.0)
                .show_ui(ui, |ui| {
                    for (chain_id, name) in SUPPORTED_CHAINS {
                        if ui
                            .selectable_label(*chain_id == self.session.chain_id, *name)
                            .clicked()
                        {
                            switch_to = Some(*chain_id);
                        }
                    }
                });
            if let Some(chain_id) = switch_to {
                if let Err(e) = self.provider.switch_chain(chain_id) {
                    tracing::warn!(error = %e, chain_id, "chain switch rejected");
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match self.session.account {
                    Some(account) => {
                        if ui::secondary_button(ui, "Disconnect").clicked() {
                            self.disconnect();
                        }
                        ui.label(
                            egui::RichText::new(ui::short_hash(&account.to_string())).monospace(),
                        );
                    }
                    None => {
                        if self.session.is_connecting {
                            ui.spinner();
                            ui.label("Connecting...");
                        } else if ui::primary_button(ui, "Connect Wallet").clicked() {
                            self.trigger_connect();
                        }
                    }
                }
            });
        });
    }

    fn render_contract_setup(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Contract Setup");
        ui.label("Paste a contract ABI and address, then call any function it declares.");
        ui.add_space(10.0);

        ui::card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("ABI (JSON):").strong());
                if ui::secondary_button(ui, "Load sample").clicked() {
                    self.abi_json = SAMPLE_ABI.to_owned();
                }
            });
            ui::multiline_input(ui, &mut self.abi_json, r#"[{"type": "function", ...}]"#, 6);

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Contract Address:").strong());
                ui::address_input(ui, &mut self.contract_address_input);
            });

            ui.add_space(8.0);
            let init_clicked = ui::primary_button(ui, "Initialize Contract").clicked();
            if init_clicked {
                let ctx = ui.ctx().clone();
                self.initialize_contract(&ctx);
            }

            if let Some(error) = self.setup_error.clone() {
                ui.add_space(5.0);
                ui::error_message(ui, &error);
            }
            if let Some(contract) = self.contract {
                ui.add_space(5.0);
                ui::success_message(
                    ui,
                    &format!(
                        "Loaded {} function(s) at {}",
                        self.functions.len(),
                        contract
                    ),
                );
            }
        });
    }

    fn render_call_form(&mut self, ui: &mut egui::Ui) {
        ui::section_header(ui, "Call a Function");

        ui::card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Function:");
                let selected_name = self
                    .form
                    .selected()
                    .map(|f| f.name.clone())
                    .unwrap_or_else(|| "select...".to_owned());
                let mut select: Option<String> = None;
                egui::ComboBox::from_id_salt("function_select")
                    .selected_text(selected_name)
                    .width(260.0)
                    .show_ui(ui, |ui| {
                        for function in &self.functions {
                            let label =
                                format!("{} ({})", function.name, function.mutability);
                            if ui.selectable_label(false, label).clicked() {
                                select = Some(function.name.clone());
                            }
                        }
                    });
                if let Some(name) = select {
                    if let Err(e) = self.form.select_function(&self.functions, &name) {
                        tracing::warn!(error = %e, "function selection failed");
                    }
                }
            });

            let Some(function) = self.form.selected().cloned() else {
                return;
            };

            ui.add_space(8.0);
            let mut edits: Vec<(usize, String)> = Vec::new();
            egui::Grid::new("param_inputs")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    for (index, input) in function.inputs.iter().enumerate() {
                        let label = if input.name.is_empty() {
                            format!("arg {} ({})", index + 1, input.ty)
                        } else {
                            format!("{} ({})", input.name, input.ty)
                        };
                        ui.label(label).on_hover_text(type_description(&input.ty));

                        let mut value = self
                            .form
                            .raw_params()
                            .get(index)
                            .cloned()
                            .unwrap_or_default();
                        if ui::param_input(ui, &mut value, type_hint(&input.ty)).changed() {
                            edits.push((index, value));
                        }
                        ui.end_row();
                    }
                });
            for (index, value) in edits {
                if let Err(e) = self.form.edit_param(index, value) {
                    tracing::warn!(error = %e, "parameter edit rejected");
                }
            }

            ui.add_space(8.0);
            let label = if function.mutability.is_read_only() {
                "Query"
            } else {
                "Send Transaction"
            };
            let ready =
                self.form.is_ready_to_submit() && !self.is_dispatching && self.contract.is_some();
            if ui::primary_button_enabled(ui, label, ready).clicked() {
                self.trigger_dispatch();
            }
        });
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        if self.is_dispatching {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.spinner();
                match self.pending_tx.get() {
                    Some(hash) => {
                        ui.label(format!(
                            "Waiting for confirmation of {}",
                            ui::short_hash(&hash)
                        ));
                    }
                    None => {
                        ui.label("Calling...");
                    }
                }
            });
        }

        if let Some(result) = &self.last_result {
            ui.add_space(10.0);
            match result {
                CallResult::Error { message } => ui::error_message(ui, message),
                CallResult::Value { .. } => {
                    ui::success_message(ui, &ui::format_call_result(result));
                    if let Some(hash) = result.tx_hash() {
                        ui::copyable_hash(ui, hash);
                    }
                }
            }
        }
    }

    fn render_history(&mut self, ui: &mut egui::Ui) {
        if self.tx_history.is_empty() {
            return;
        }
        ui.add_space(10.0);
        egui::CollapsingHeader::new(format!("Transaction History ({})", self.tx_history.len()))
            .default_open(true)
            .show(ui, |ui| {
                for record in &self.tx_history {
                    ui::card(ui, |ui| {
                        ui.horizontal(|ui| {
                            let status = match record.status {
                                contract_console_core::TxStatus::Success => {
                                    egui::RichText::new("✅ success")
                                        .color(egui::Color32::from_rgb(80, 200, 120))
                                }
                                contract_console_core::TxStatus::Failed => {
                                    egui::RichText::new("❌ failed")
                                        .color(egui::Color32::from_rgb(220, 80, 80))
                                }
                            };
                            ui.label(status);
                            ui.label(egui::RichText::new(&record.function_name).strong());
                            ui.label(
                                egui::RichText::new(ui::format_local_time(&record.timestamp))
                                    .weak(),
                            );
                        });
                        if !record.params.is_empty() {
                            let rendered: Vec<String> =
                                record.params.iter().map(|p| p.to_string()).collect();
                            ui.label(
                                egui::RichText::new(rendered.join(", "))
                                    .monospace()
                                    .small(),
                            );
                        }
                        ui::copyable_hash(ui, &record.tx_hash);
                    });
                    ui.add_space(4.0);
                }
            });
    }

    fn render_message_signing(&mut self, ui: &mut egui::Ui) {
        if !self.session.is_connected() {
            return;
        }
        ui::section_header(ui, "Sign a Message");
        ui::card(ui, |ui| {
            ui::multiline_input(ui, &mut self.message_input, "Message to sign", 2);
            ui.add_space(5.0);
            let can_sign = !self.message_input.trim().is_empty();
            let sign_clicked = ui::primary_button_enabled(ui, "Sign", can_sign).clicked();
            if sign_clicked {
                let ctx = ui.ctx().clone();
                match self.provider.sign_message(&self.message_input) {
                    Ok(signature) => self.signature = Some(signature),
                    Err(e) => {
                        self.signature = None;
                        self.push_toast(&ctx, "Signing failed", &e.to_string(), Severity::Error);
                    }
                }
            }
            if let Some(signature) = self.signature.clone() {
                ui.add_space(5.0);
                ui::copyable_hash(ui, &signature);
            }
        });
    }

    fn render_toasts(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.toasts.retain(|t| t.expires_at > now);
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    egui::Frame::none()
                        .fill(ui.visuals().extreme_bg_color)
                        .stroke(egui::Stroke::new(1.0, severity_color(toast.severity)))
                        .rounding(6.0)
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&toast.title)
                                    .strong()
                                    .color(severity_color(toast.severity)),
                            );
                            ui.label(egui::RichText::new(&toast.message).small());
                        });
                    ui.add_space(6.0);
                }
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
