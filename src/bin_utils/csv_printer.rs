use std::io::Write;

use crate::account::AccountId;
use csv::Writer;
use serde::Serialize;

/// Final state of one registered account, as printed when a script ends.
#[derive(Debug, Serialize)]
pub struct AccountState {
    pub account_id: AccountId,
    pub balance: i64,
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountState>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for state in accounts {
        if let Err(err) = writer.serialize(state) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
