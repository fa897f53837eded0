use near_sdk::env::panic_str;
use near_sdk::FunctionError;

/// Contract errors
#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
pub enum PollError {
    /// operation is not allowed in the current registry state. Carries the reason.
    InvalidState(&'static str),
    InvalidOption,
    EmptyOptions,
    NotFound,
    NameTaken,
    AlreadyVoted,
    NotAdmin,
}

impl FunctionError for PollError {
    fn panic(&self) -> ! {
        match self {
            PollError::InvalidState(reason) => panic_str(&format!("invalid state: {}", reason)),
            PollError::InvalidOption => panic_str("invalid option"),
            PollError::EmptyOptions => panic_str("poll must have at least one option"),
            PollError::NotFound => panic_str("poll not found"),
            PollError::NameTaken => panic_str("poll name already used"),
            PollError::AlreadyVoted => panic_str("caller already voted in this poll"),
            PollError::NotAdmin => panic_str("not authorized: required admin"),
        }
    }
}
