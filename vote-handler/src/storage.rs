use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::BorshStorageKey;

/// Sequence number of a poll. Never reused, even when a poll name is.
pub type PollId = u64;

/// Helper structure for keys of the persistent collections.
#[derive(BorshSerialize, BorshStorageKey)]
pub enum StorageKey {
    Polls,
    Voters,
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(target_arch = "wasm32"), derive(Debug))]
#[serde(crate = "near_sdk::serde")]
pub enum Status {
    Active,
    Paused,
}

#[derive(BorshSerialize, BorshDeserialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug, Clone))]
pub struct Poll {
    pub id: PollId,
    pub options: Vec<String>,
    /// vote count per option, aligned with `options` by index.
    pub votes: Vec<u64>,
    pub status: Status,
    /// block time in milliseconds
    pub created_at: u64,
}

impl Poll {
    pub fn new(id: PollId, options: Vec<String>, created_at: u64) -> Self {
        Self {
            id,
            votes: vec![0; options.len()],
            options,
            status: Status::Active,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    pub fn option_index(&self, option: &str) -> Option<usize> {
        self.options.iter().position(|o| o == option)
    }
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default, Clone)]
#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
#[serde(crate = "near_sdk::serde")]
pub struct Config {
    /// If true, a new poll can take the name of a superseded poll, replacing its record.
    /// The name of the current poll can never be taken.
    #[serde(default)]
    pub allow_name_reuse: bool,
    /// If true, an account can vote only once per poll.
    #[serde(default)]
    pub one_vote_per_account: bool,
}

/// Poll tally: options and vote counts aligned by index.
#[derive(Serialize, Deserialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
#[serde(crate = "near_sdk::serde")]
pub struct Stats {
    pub options: Vec<String>,
    pub votes: Vec<u64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
#[serde(crate = "near_sdk::serde")]
pub struct PollInfo {
    pub name: String,
    pub options: Vec<String>,
    pub votes: Vec<u64>,
    pub status: Status,
    pub created_at: u64,
    /// true if this is the current poll of the registry.
    pub current: bool,
}

impl PollInfo {
    pub(crate) fn new(name: String, poll: Poll, current: bool) -> Self {
        Self {
            name,
            options: poll.options,
            votes: poll.votes,
            status: poll.status,
            created_at: poll.created_at,
            current,
        }
    }
}
