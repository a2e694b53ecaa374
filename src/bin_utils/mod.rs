//! Runs a whole scripted session against a fresh controller: parse each
//! row, apply it, report failures, print the surviving account states.

use std::io::{Read, Write};

use anyhow::Result;
use thiserror::Error;
use tracing::info;

use crate::{
    bank::{BankError, in_memory_bank::InMemoryBank},
    command::{SessionCommand, SessionCommandError},
    controller::{AtmController, AtmError},
};
use csv_parser::{CsvScriptParser, SessionRow};
use csv_printer::{AccountState, print_accounts};
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    CommandErr(#[from] SessionCommandError),
    #[error(transparent)]
    AtmErr(#[from] AtmError),
    #[error(transparent)]
    BankErr(#[from] BankError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ScriptError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvScriptParser::new(self.input);

        let mut atm = AtmController::new(InMemoryBank::default());

        for (line, row) in parser {
            if let Err(err) = apply_row(&mut atm, row) {
                (self.error_printer)(line, err);
            }
        }

        print_accounts(
            self.output,
            atm.bank().accounts().map(|account| AccountState {
                account_id: account.account_id().to_owned(),
                balance: account.balance(),
            }),
        )
    }
}

fn apply_row(atm: &mut AtmController<InMemoryBank>, row: SessionRow) -> Result<(), ScriptError> {
    let command =
        SessionCommand::parse_command(row.op, row.card.as_deref(), row.pin.as_deref(), row.amount)?;
    match command {
        SessionCommand::AddAccount {
            account_id,
            pin,
            initial_balance,
        } => atm.bank_mut().add_account(account_id, pin, initial_balance)?,
        SessionCommand::InsertCard(card) => atm.insert_card(card)?,
        SessionCommand::EjectCard => {
            atm.eject_card();
        }
        SessionCommand::EnterPin(pin) => atm.enter_pin(&pin)?,
        SessionCommand::SelectAccount => {
            atm.select_account()?;
        }
        SessionCommand::ViewBalance => {
            let balance = atm.view_balance()?;
            info!(balance, "balance viewed");
        }
        SessionCommand::Deposit(amount) => {
            atm.deposit(amount)?;
        }
        SessionCommand::Withdraw(amount) => {
            atm.withdraw(amount)?;
        }
    }
    Ok(())
}
