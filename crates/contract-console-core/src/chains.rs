//! Supported chain registry.

pub const SUPPORTED_CHAINS: &[(u64, &str)] = &[
    (1, "Ethereum Mainnet"),
    (5, "Goerli Testnet"),
    (137, "Polygon Mainnet"),
    (80001, "Mumbai Testnet"),
    (56, "Binance Smart Chain"),
];

pub const DEFAULT_CHAIN: u64 = 1;

pub fn is_supported_chain(chain_id: u64) -> bool {
    SUPPORTED_CHAINS.iter().any(|(id, _)| *id == chain_id)
}

pub fn chain_name(chain_id: u64) -> Option<&'static str> {
    SUPPORTED_CHAINS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, name)| *name)
}
