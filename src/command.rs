use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::AccountId,
    card::{Card, CardError},
};

/// One operation of a scripted ATM session, as spelled in the script file.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionOp {
    AddAccount,
    InsertCard,
    EjectCard,
    EnterPin,
    SelectAccount,
    ViewBalance,
    Deposit,
    Withdraw,
}

#[derive(Debug, Error)]
pub enum SessionCommandError {
    #[error("A card number is required for {op:?}")]
    CardNumberRequired { op: SessionOp },
    #[error("A PIN is required for {op:?}")]
    PinRequired { op: SessionOp },
    #[error("An amount is required for {op:?}")]
    AmountRequired { op: SessionOp },
    #[error(transparent)]
    InvalidCard(#[from] CardError),
}

#[derive(Debug)]
pub enum SessionCommand {
    AddAccount {
        account_id: AccountId,
        pin: String,
        initial_balance: i64,
    },
    InsertCard(Card),
    EjectCard,
    EnterPin(String),
    SelectAccount,
    ViewBalance,
    Deposit(i64),
    Withdraw(i64),
}

impl SessionCommand {
    /// Builds a command from the raw fields of one script row, checking
    /// that the fields the operation needs are present. Amount signs are
    /// left for the account to validate.
    pub fn parse_command(
        op: SessionOp,
        card: Option<&str>,
        pin: Option<&str>,
        amount: Option<i64>,
    ) -> Result<Self, SessionCommandError> {
        match op {
            SessionOp::AddAccount => Ok(Self::AddAccount {
                account_id: Self::required_card(op, card)?.to_owned(),
                pin: Self::required_pin(op, pin)?.to_owned(),
                initial_balance: amount.unwrap_or(0),
            }),
            SessionOp::InsertCard => Ok(Self::InsertCard(Card::new(Self::required_card(
                op, card,
            )?)?)),
            SessionOp::EjectCard => Ok(Self::EjectCard),
            SessionOp::EnterPin => Ok(Self::EnterPin(Self::required_pin(op, pin)?.to_owned())),
            SessionOp::SelectAccount => Ok(Self::SelectAccount),
            SessionOp::ViewBalance => Ok(Self::ViewBalance),
            SessionOp::Deposit => Ok(Self::Deposit(Self::required_amount(op, amount)?)),
            SessionOp::Withdraw => Ok(Self::Withdraw(Self::required_amount(op, amount)?)),
        }
    }

    fn required_card(op: SessionOp, card: Option<&str>) -> Result<&str, SessionCommandError> {
        card.ok_or(SessionCommandError::CardNumberRequired { op })
    }

    fn required_pin(op: SessionOp, pin: Option<&str>) -> Result<&str, SessionCommandError> {
        pin.ok_or(SessionCommandError::PinRequired { op })
    }

    fn required_amount(op: SessionOp, amount: Option<i64>) -> Result<i64, SessionCommandError> {
        amount.ok_or(SessionCommandError::AmountRequired { op })
    }
}
