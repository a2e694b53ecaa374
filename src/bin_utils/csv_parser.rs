use std::io::Read;

use crate::command::SessionOp;
use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

/// One row of a session script: `op,card,pin,amount`. Fields an operation
/// does not use may be left empty or omitted entirely.
#[derive(Debug, Deserialize)]
pub struct SessionRow {
    pub op: SessionOp,
    pub card: Option<String>,
    pub pin: Option<String>,
    pub amount: Option<i64>,
}

/// Parses an ATM session script in CSV format
///
/// # Panics
///
/// If a row cannot be parsed
pub struct CsvScriptParser<R> {
    iter: DeserializeRecordsIntoIter<R, SessionRow>,
}

impl<R> CsvScriptParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvScriptParser<R>
where
    R: Read,
{
    type Item = (u64, SessionRow);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row.unwrap()))
    }
}
