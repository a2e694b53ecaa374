use std::collections::{HashMap, hash_map::Entry};

use tracing::info;

use crate::{
    account::{Account, AccountId},
    card::Card,
};

use super::{Bank, BankError};

/// One registered account and its PIN. Keeping both in one record means a
/// PIN can never outlive or predate its account.
#[derive(Debug)]
struct AccountRecord {
    account: Account,
    pin: String,
}

/// Mock backend holding all registered accounts in memory.
#[derive(Debug, Default)]
pub struct InMemoryBank {
    records: HashMap<AccountId, AccountRecord>,
}

impl InMemoryBank {
    pub fn add_account(
        &mut self,
        account_id: impl Into<AccountId>,
        pin: impl Into<String>,
        initial_balance: i64,
    ) -> Result<(), BankError> {
        if initial_balance < 0 {
            return Err(BankError::NegativeInitialBalance);
        }
        match self.records.entry(account_id.into()) {
            Entry::Occupied(entry) => Err(BankError::DuplicateAccount {
                account_id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                info!(account_id = %entry.key(), balance = initial_balance, "account registered");
                let account = Account::new(entry.key().clone(), initial_balance);
                entry.insert(AccountRecord {
                    account,
                    pin: pin.into(),
                });
                Ok(())
            }
        }
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.records.values().map(|record| &record.account)
    }
}

impl Bank for InMemoryBank {
    fn validate_pin(&self, card: &Card, pin: &str) -> bool {
        self.records
            .get(card.number())
            .is_some_and(|record| record.pin == pin)
    }

    fn account(&self, card: &Card) -> Result<&Account, BankError> {
        self.records
            .get(card.number())
            .map(|record| &record.account)
            .ok_or(BankError::UnknownAccount)
    }

    fn account_mut(&mut self, card: &Card) -> Result<&mut Account, BankError> {
        self.records
            .get_mut(card.number())
            .map(|record| &mut record.account)
            .ok_or(BankError::UnknownAccount)
    }
}
