use std::mem;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    account::{Account, AccountError},
    bank::{Bank, BankError},
    card::Card,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A card is already inserted")]
    CardAlreadyInserted,
    #[error("No card inserted")]
    NoCardInserted,
    #[error("Invalid PIN")]
    InvalidPin,
    #[error("PIN not validated")]
    NotAuthenticated,
    #[error("Account not selected")]
    AccountNotSelected,
}

#[derive(Debug, Error)]
pub enum AtmError {
    #[error(transparent)]
    SessionErr(#[from] SessionError),
    #[error(transparent)]
    BankErr(#[from] BankError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Where a session currently stands. `Authenticated` can only be reached
/// with a card present and its account resolved against the bank, so the
/// two facts never drift apart.
#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Idle,
    CardInserted {
        card: Card,
    },
    Authenticated {
        card: Card,
    },
}

/// Session state machine for a single physical ATM.
///
/// Enforces the legal operation order: insert a card, authenticate with a
/// PIN, transact, eject. Owns its bank backend; one controller must only
/// ever serve one user at a time.
pub struct AtmController<B> {
    bank: B,
    state: SessionState,
}

impl<B: Bank> AtmController<B> {
    pub fn new(bank: B) -> Self {
        Self {
            bank,
            state: SessionState::Idle,
        }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// Starts a session. Fails if another card is still in the slot.
    pub fn insert_card(&mut self, card: Card) -> Result<(), AtmError> {
        if !matches!(self.state, SessionState::Idle) {
            return Err(SessionError::CardAlreadyInserted.into());
        }
        info!(card = %card.masked(), "card inserted");
        self.state = SessionState::CardInserted { card };
        Ok(())
    }

    /// Ends the session and returns the card, if one was inserted. Safe to
    /// call in any state.
    pub fn eject_card(&mut self) -> Option<Card> {
        match mem::take(&mut self.state) {
            SessionState::Idle => None,
            SessionState::CardInserted { card } | SessionState::Authenticated { card } => {
                info!(card = %card.masked(), "card ejected");
                Some(card)
            }
        }
    }

    /// Authenticates the inserted card. On a PIN mismatch the session is
    /// left exactly as it was, so the caller may retry.
    pub fn enter_pin(&mut self, pin: &str) -> Result<(), AtmError> {
        let card = match &self.state {
            SessionState::Idle => return Err(SessionError::NoCardInserted.into()),
            SessionState::CardInserted { card } | SessionState::Authenticated { card } => card,
        };
        if !self.bank.validate_pin(card, pin) {
            warn!(card = %card.masked(), "PIN rejected");
            return Err(SessionError::InvalidPin.into());
        }
        // the bank must know the account before the session may proceed
        self.bank.account(card)?;
        let card = card.clone();
        info!(card = %card.masked(), "PIN accepted");
        self.state = SessionState::Authenticated { card };
        Ok(())
    }

    /// Returns the account resolved during authentication.
    pub fn select_account(&self) -> Result<&Account, AtmError> {
        let SessionState::Authenticated { card } = &self.state else {
            return Err(SessionError::NotAuthenticated.into());
        };
        Ok(self.bank.account(card)?)
    }

    pub fn view_balance(&self) -> Result<i64, AtmError> {
        let SessionState::Authenticated { card } = &self.state else {
            return Err(SessionError::AccountNotSelected.into());
        };
        Ok(self.bank.account(card)?.balance())
    }

    /// Deposits into the authenticated account and returns the new balance.
    pub fn deposit(&mut self, amount: i64) -> Result<i64, AtmError> {
        let SessionState::Authenticated { card } = &self.state else {
            return Err(SessionError::AccountNotSelected.into());
        };
        let balance = self.bank.account_mut(card)?.deposit(amount)?;
        debug!(card = %card.masked(), balance, "deposit applied");
        Ok(balance)
    }

    /// Withdraws from the authenticated account and returns the new balance.
    pub fn withdraw(&mut self, amount: i64) -> Result<i64, AtmError> {
        let SessionState::Authenticated { card } = &self.state else {
            return Err(SessionError::AccountNotSelected.into());
        };
        let balance = self.bank.account_mut(card)?.withdraw(amount)?;
        debug!(card = %card.masked(), balance, "withdrawal applied");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use crate::bank::in_memory_bank::InMemoryBank;

    use super::*;

    const CARD_NUMBER: &str = "4539578763621486";

    fn test_atm() -> AtmController<InMemoryBank> {
        let mut bank = InMemoryBank::default();
        bank.add_account(CARD_NUMBER, "1234", 100).unwrap();
        AtmController::new(bank)
    }

    fn test_card() -> Card {
        Card::new(CARD_NUMBER).unwrap()
    }

    #[test]
    fn rejects_second_card() {
        let mut atm = test_atm();
        atm.insert_card(test_card()).unwrap();
        let err = atm.insert_card(test_card()).unwrap_err();
        assert!(matches!(
            err,
            AtmError::SessionErr(SessionError::CardAlreadyInserted)
        ));
    }

    #[test]
    fn eject_returns_card_and_resets() {
        let mut atm = test_atm();
        assert!(atm.eject_card().is_none());

        atm.insert_card(test_card()).unwrap();
        let card = atm.eject_card().unwrap();
        assert_eq!(card.number(), CARD_NUMBER);
        // eject is idempotent
        assert!(atm.eject_card().is_none());

        let err = atm.enter_pin("1234").unwrap_err();
        assert!(matches!(
            err,
            AtmError::SessionErr(SessionError::NoCardInserted)
        ));
    }

    #[test]
    fn wrong_pin_keeps_session_unauthenticated() {
        let mut atm = test_atm();
        atm.insert_card(test_card()).unwrap();
        let err = atm.enter_pin("0000").unwrap_err();
        assert!(matches!(err, AtmError::SessionErr(SessionError::InvalidPin)));
        assert!(!atm.is_authenticated());

        // the card stays in the slot, so a retry succeeds
        atm.enter_pin("1234").unwrap();
        assert!(atm.is_authenticated());
    }

    #[test]
    fn select_account_requires_authentication() {
        let mut atm = test_atm();
        atm.insert_card(test_card()).unwrap();
        let err = atm.select_account().unwrap_err();
        assert!(matches!(
            err,
            AtmError::SessionErr(SessionError::NotAuthenticated)
        ));

        atm.enter_pin("1234").unwrap();
        assert_eq!(atm.select_account().unwrap().account_id(), CARD_NUMBER);
    }

    #[test]
    fn transactions_require_authentication() {
        let mut atm = test_atm();
        assert!(matches!(
            atm.view_balance(),
            Err(AtmError::SessionErr(SessionError::AccountNotSelected))
        ));

        atm.insert_card(test_card()).unwrap();
        assert!(matches!(
            atm.view_balance(),
            Err(AtmError::SessionErr(SessionError::AccountNotSelected))
        ));
        assert!(matches!(
            atm.deposit(50),
            Err(AtmError::SessionErr(SessionError::AccountNotSelected))
        ));
        assert!(matches!(
            atm.withdraw(50),
            Err(AtmError::SessionErr(SessionError::AccountNotSelected))
        ));
    }

    #[test]
    fn missing_backend_account_fails_authentication() {
        // a backend that accepts any PIN but holds no accounts
        struct PinOnlyBank;
        impl Bank for PinOnlyBank {
            fn validate_pin(&self, _card: &Card, _pin: &str) -> bool {
                true
            }
            fn account(&self, _card: &Card) -> Result<&Account, BankError> {
                Err(BankError::UnknownAccount)
            }
            fn account_mut(&mut self, _card: &Card) -> Result<&mut Account, BankError> {
                Err(BankError::UnknownAccount)
            }
        }

        let mut atm = AtmController::new(PinOnlyBank);
        atm.insert_card(test_card()).unwrap();
        let err = atm.enter_pin("1234").unwrap_err();
        assert!(matches!(err, AtmError::BankErr(BankError::UnknownAccount)));
        assert!(!atm.is_authenticated());
    }

    #[test]
    fn propagates_amount_validation() {
        let mut atm = test_atm();
        atm.insert_card(test_card()).unwrap();
        atm.enter_pin("1234").unwrap();
        assert!(matches!(
            atm.deposit(-10),
            Err(AtmError::AccountErr(AccountError::NonPositiveAmount))
        ));
        assert!(matches!(
            atm.withdraw(-20),
            Err(AtmError::AccountErr(AccountError::NonPositiveAmount))
        ));
        assert_eq!(atm.view_balance().unwrap(), 100);
    }

    #[test]
    fn full_session_flow() {
        let mut atm = test_atm();
        atm.insert_card(test_card()).unwrap();
        atm.enter_pin("1234").unwrap();
        assert!(atm.is_authenticated());

        assert_eq!(atm.view_balance().unwrap(), 100);
        assert_eq!(atm.deposit(50).unwrap(), 150);
        assert_eq!(atm.withdraw(70).unwrap(), 80);

        let err = atm.withdraw(1000).unwrap_err();
        assert!(matches!(
            err,
            AtmError::AccountErr(AccountError::InsufficientFunds)
        ));
        assert_eq!(atm.view_balance().unwrap(), 80);

        atm.eject_card().unwrap();
        assert!(atm.view_balance().is_err());
    }
}
