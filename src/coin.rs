use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of coins the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Coin {
    #[default]
    Bitcoin,
    Ethereum,
    MaticNetwork,
}

impl Coin {
    pub const ALL: [Coin; 3] = [Coin::Bitcoin, Coin::Ethereum, Coin::MaticNetwork];

    /// Identifier the backend expects in the `coin` query parameter.
    pub fn id(self) -> &'static str {
        match self {
            Coin::Bitcoin => "bitcoin",
            Coin::Ethereum => "ethereum",
            Coin::MaticNetwork => "matic-network",
        }
    }

    pub fn ticker(self) -> &'static str {
        match self {
            Coin::Bitcoin => "BTC",
            Coin::Ethereum => "ETH",
            Coin::MaticNetwork => "MATIC",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Coin::Bitcoin => "Bitcoin",
            Coin::Ethereum => "Ethereum",
            Coin::MaticNetwork => "Polygon",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_identifiers() {
        assert_eq!(Coin::Bitcoin.id(), "bitcoin");
        assert_eq!(Coin::Ethereum.id(), "ethereum");
        assert_eq!(Coin::MaticNetwork.id(), "matic-network");
    }

    #[test]
    fn test_serde_uses_kebab_case_ids() {
        let coin: Coin = serde_yaml::from_str("matic-network").expect("Failed to deserialize");
        assert_eq!(coin, Coin::MaticNetwork);
        assert_eq!(serde_yaml::to_string(&Coin::Bitcoin).unwrap().trim(), "bitcoin");
    }

    #[test]
    fn test_default_is_bitcoin() {
        assert_eq!(Coin::default(), Coin::Bitcoin);
    }
}
