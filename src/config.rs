// Configuration settings for the ATM system

/// Bank name displayed by drivers.
pub const BANK_NAME: &str = "Global Bank";

/// Length of a valid card number, in digits.
pub const CARD_NUMBER_LEN: usize = 16;

/// Required length of a PIN. Stored PINs are compared exactly, so this is
/// informational only.
pub const PIN_LENGTH: usize = 4;

/// Maximum incorrect PIN attempts before a card lock. No component counts
/// attempts; the constant documents the advertised limit.
pub const MAX_PIN_ATTEMPTS: u32 = 3;

/// Maximum withdrawal per transaction. Not enforced by the controller.
pub const ATM_LIMIT: i64 = 1000;
