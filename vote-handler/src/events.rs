use near_sdk::env;
use near_sdk::serde::Serialize;
use near_sdk::AccountId;

const STANDARD: &str = "vote-handler";
const VERSION: &str = "1.0.0";

/// NEP-297 event envelope.
#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct NearEvent<'a, T: Serialize> {
    standard: &'a str,
    version: &'a str,
    event: &'a str,
    data: T,
}

impl<T: Serialize> NearEvent<'_, T> {
    fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(s) => env::log_str(&format!("EVENT_JSON:{}", s)),
            Err(_) => env::panic_str("can't serialize event"),
        }
    }
}

fn emit_event<T: Serialize>(event: &str, data: T) {
    NearEvent {
        standard: STANDARD,
        version: VERSION,
        event,
        data,
    }
    .emit();
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct PollStarted<'a> {
    name: &'a str,
    options: &'a [String],
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct PollRef<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct VoteCast<'a> {
    name: &'a str,
    option: &'a str,
    voter: &'a AccountId,
}

pub(crate) fn emit_start_poll(name: &str, options: &[String]) {
    emit_event("start_poll", PollStarted { name, options });
}

pub(crate) fn emit_pause_poll(name: &str) {
    emit_event("pause_poll", PollRef { name });
}

pub(crate) fn emit_resume_poll(name: &str) {
    emit_event("resume_poll", PollRef { name });
}

pub(crate) fn emit_vote(name: &str, option: &str, voter: &AccountId) {
    emit_event("vote", VoteCast { name, option, voter });
}
