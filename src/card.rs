use thiserror::Error;

use crate::config::CARD_NUMBER_LEN;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Card number must be a 16-digit numeric string")]
    MalformedNumber,
    #[error("Card number failed the checksum validation")]
    ChecksumMismatch,
}

/// An ATM card, identified by its embossed number.
///
/// The number doubles as the account identifier on the bank side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    number: String,
}

impl Card {
    pub fn new(number: impl Into<String>) -> Result<Self, CardError> {
        let number = number.into();
        if number.len() != CARD_NUMBER_LEN || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::MalformedNumber);
        }
        if !luhn_checksum_valid(&number) {
            return Err(CardError::ChecksumMismatch);
        }
        Ok(Self { number })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Masked form for display and logs, e.g. `****-****-****-1486`.
    pub fn masked(&self) -> String {
        format!("****-****-****-{}", &self.number[CARD_NUMBER_LEN - 4..])
    }
}

/// Luhn check over an all-digit string: double every second digit from the
/// right, subtract 9 from results above 9, and the total must divide by 10.
fn luhn_checksum_valid(number: &str) -> bool {
    let sum: u32 = number
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}
