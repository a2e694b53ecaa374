/// A user's ATM card. Construction validates the card number format and
/// checksum, so a [`card::Card`] value is always well formed.
pub mod card;

/// All logic related to account balance management.
pub mod account;

/// Bank backend interface, plus "in memory" mock implementation.
///
/// NOTE: The trait exists as an integration point, so the in-memory mock
/// could later be replaced with calls to a real banking API.
pub mod bank;

/// Session state machine for one physical ATM: card in, PIN, transact,
/// card out.
pub mod controller;

/// Commands describing one step of a scripted ATM session. Parsed from raw
/// row fields and executed by [`bin_utils`].
pub mod command;

/// Configuration settings for the ATM system.
pub mod config;

/// Glue for driving a whole session from a CSV script. Lives in the library
/// rather than the binary so the integration test can reuse it.
pub mod bin_utils;
