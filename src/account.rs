use thiserror::Error;

pub type AccountId = String;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Insufficient balance")]
    InsufficientFunds,
}

/// Balance ledger for a single account. Amounts are whole currency units;
/// the balance never goes below zero.
#[derive(Debug)]
pub struct Account {
    account_id: AccountId,
    balance: i64,
}

impl Account {
    pub fn new(account_id: impl Into<AccountId>, balance: i64) -> Self {
        Self {
            account_id: account_id.into(),
            balance,
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Adds `amount` to the balance and returns the new balance.
    pub fn deposit(&mut self, amount: i64) -> Result<i64, AccountError> {
        if amount <= 0 {
            return Err(AccountError::NonPositiveAmount);
        }
        self.balance += amount;
        Ok(self.balance)
    }

    /// Removes `amount` from the balance and returns the new balance.
    pub fn withdraw(&mut self, amount: i64) -> Result<i64, AccountError> {
        if amount <= 0 {
            return Err(AccountError::NonPositiveAmount);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(self.balance)
    }
}
