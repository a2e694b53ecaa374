use thiserror::Error;

use crate::{
    account::{Account, AccountId},
    card::Card,
};

pub mod in_memory_bank;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Account with ID {account_id} already exists")]
    DuplicateAccount { account_id: AccountId },
    #[error("Initial balance cannot be negative")]
    NegativeInitialBalance,
    #[error("No account registered for this card")]
    UnknownAccount,
}

/// Lookup interface the ATM talks to. A card's number keys the account on
/// the bank side.
pub trait Bank {
    /// True iff an account is registered for the card and its stored PIN
    /// matches `pin` exactly.
    fn validate_pin(&self, card: &Card, pin: &str) -> bool;

    fn account(&self, card: &Card) -> Result<&Account, BankError>;

    fn account_mut(&mut self, card: &Card) -> Result<&mut Account, BankError>;
}
