use contract_console_adapters::Eip1193Adapter;
use contract_console_core::{ProviderEvent, ProviderPort};

#[test]
fn deterministic_provider_connects_with_a_fixed_account() {
    let provider = Eip1193Adapter::deterministic();
    let accounts = provider.request_accounts().expect("accounts");
    assert_eq!(accounts.len(), 1);
    assert_eq!(provider.chain_id().expect("chain id"), 1);
}

#[test]
fn switch_chain_rejects_unsupported_ids() {
    let provider = Eip1193Adapter::deterministic();
    let err = provider.switch_chain(31337).expect_err("must fail");
    assert!(err.to_string().contains("unsupported chain"));

    provider.switch_chain(137).expect("supported chain");
    assert_eq!(provider.chain_id().expect("chain id"), 137);
}

#[test]
fn events_are_drained_in_order() {
    let provider = Eip1193Adapter::deterministic();
    provider.switch_chain(5).expect("switch");
    provider.simulate_accounts_changed(Vec::new());

    let events = provider.poll_events().expect("events");
    assert_eq!(
        events,
        [
            ProviderEvent::ChainChanged(5),
            ProviderEvent::AccountsChanged(Vec::new()),
        ]
    );
    // Drained: a second poll is empty.
    assert!(provider.poll_events().expect("events").is_empty());
}

#[test]
fn disconnect_clears_accounts_and_notifies() {
    let provider = Eip1193Adapter::deterministic();
    provider.request_accounts().expect("accounts");
    provider.disconnect().expect("disconnect");

    let err = provider.request_accounts().expect_err("no accounts left");
    assert!(err.to_string().contains("no wallet connected"));
    let events = provider.poll_events().expect("events");
    assert_eq!(events, [ProviderEvent::AccountsChanged(Vec::new())]);
}

#[test]
fn deterministic_signature_is_stable_per_message() {
    let provider = Eip1193Adapter::deterministic();
    let a = provider.sign_message("hello").expect("sign");
    let b = provider.sign_message("hello").expect("sign");
    let c = provider.sign_message("other").expect("sign");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.starts_with("0x"));
}
