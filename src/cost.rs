// SPDX-License-Identifier: Apache-2.0

use std::fmt::{
    self,
    Display,
    Formatter,
};
use std::iter;

/// An amount in the smallest on-chain unit (1 ada = 1,000,000 lovelace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Lovelace(pub u64);

impl Lovelace {
    /// The raw lovelace amount.
    #[must_use]
    pub fn to_lovelace(self) -> u64 {
        self.0
    }

    /// The amount converted to ada.
    #[must_use]
    pub fn to_ada(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl From<u64> for Lovelace {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Display for Lovelace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} lovelace", self.0)
    }
}

/// A named cost beyond the transaction fee and deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalCost {
    /// What the amount pays for.
    pub name: &'static str,
    /// The amount.
    pub amount: Lovelace,
}

/// The estimated cost of one transaction.
///
/// Amounts must be kept in lockstep with the protocol YAML the definition's
/// `protocol_spec` references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionCost {
    /// The network fee.
    pub tx_fee: Lovelace,
    /// A refundable deposit locked at an on-chain address, if any.
    pub min_deposit: Option<Lovelace>,
    /// Further costs, such as token minting deposits.
    pub additional_costs: Vec<AdditionalCost>,
}

impl TransactionCost {
    /// A cost consisting of the network fee only.
    #[must_use]
    pub fn fee(tx_fee: u64) -> Self {
        Self { tx_fee: Lovelace(tx_fee), ..Self::default() }
    }

    /// A cost with a network fee and a refundable deposit.
    #[must_use]
    pub fn fee_with_deposit(tx_fee: u64, min_deposit: u64) -> Self {
        Self {
            tx_fee: Lovelace(tx_fee),
            min_deposit: Some(Lovelace(min_deposit)),
            additional_costs: Vec::new(),
        }
    }

    /// The total amount the wallet must cover up front.
    #[must_use]
    pub fn total(&self) -> Lovelace {
        let sum = iter::once(self.tx_fee)
            .chain(self.min_deposit)
            .chain(self.additional_costs.iter().map(|cost| cost.amount))
            .map(Lovelace::to_lovelace)
            .sum();

        Lovelace(sum)
    }
}
