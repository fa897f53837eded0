use std::collections::HashSet;

use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::{LookupSet, UnorderedMap};
use near_sdk::{env, near_bindgen, AccountId, PanicOnDefault};

pub use crate::errors::*;
pub use crate::storage::*;

mod errors;
mod events;
mod storage;

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 1000;

const NO_POLL: PollError = PollError::InvalidState("no poll started");

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct Contract {
    /// Accounts authorized to start, pause and resume polls.
    /// If empty, anyone can manage polls.
    pub admins: Vec<AccountId>,
    pub config: Config,
    /// every poll ever started, keyed by name
    pub polls: UnorderedMap<String, Poll>,
    /// name of the current poll: the last one started.
    pub current: Option<String>,
    pub next_poll_id: PollId,
    /// (poll, voter) pairs. Only recorded when `config.one_vote_per_account` is set.
    pub voters: LookupSet<(PollId, AccountId)>,
}

// Implement the contract structure
#[near_bindgen]
impl Contract {
    /// @admins: accounts authorized to manage polls. Empty list makes poll management public.
    /// @config: registry options, defaults to `Config::default()`.
    #[init]
    pub fn new(admins: Vec<AccountId>, config: Option<Config>) -> Self {
        Self {
            admins,
            config: config.unwrap_or_default(),
            polls: UnorderedMap::new(StorageKey::Polls),
            current: None,
            next_poll_id: 1,
            voters: LookupSet::new(StorageKey::Voters),
        }
    }

    /**********
     * QUERIES
     **********/

    /// Returns true if there is a current poll and it is accepting votes.
    pub fn is_poll_active(&self) -> bool {
        self.current_poll()
            .map(|(_, p)| p.is_active())
            .unwrap_or(false)
    }

    /// Returns options of the current poll, active or paused.
    #[handle_result]
    pub fn get_current_options(&self) -> Result<Vec<String>, PollError> {
        self.current_poll().map(|(_, p)| p.options)
    }

    #[handle_result]
    pub fn get_current_poll_name(&self) -> Result<String, PollError> {
        self.current.clone().ok_or(NO_POLL)
    }

    /// Returns the tally of the poll `name`, current or superseded.
    #[handle_result]
    pub fn get_stats(&self, name: String) -> Result<Stats, PollError> {
        let p = self.polls.get(&name).ok_or(PollError::NotFound)?;
        Ok(Stats {
            options: p.options,
            votes: p.votes,
        })
    }

    /// returns None if poll is not found
    pub fn get_poll(&self, name: String) -> Option<PollInfo> {
        let current = self.is_current(&name);
        self.polls
            .get(&name)
            .map(|p| PollInfo::new(name, p, current))
    }

    /// Lists polls in storage order: creation order, except that a poll started under a
    /// reused name takes the slot of the poll it replaced.
    /// If limit is not specified, default is used: 100.
    pub fn polls(&self, from_index: Option<u64>, limit: Option<u32>) -> Vec<PollInfo> {
        let from_index = from_index.unwrap_or(0);
        if from_index >= self.polls.len() {
            return Vec::new();
        }
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        self.polls
            .iter()
            .skip(from_index as usize)
            .take(limit as usize)
            .map(|(name, p)| {
                let current = self.is_current(&name);
                PollInfo::new(name, p, current)
            })
            .collect()
    }

    /// Number of polls ever started, minus the ones replaced by name reuse.
    pub fn polls_len(&self) -> u64 {
        self.polls.len()
    }

    /// Returns true if `account` voted in the current poll.
    /// Votes are only tracked when `one_vote_per_account` is enabled.
    pub fn has_voted(&self, account: AccountId) -> bool {
        match self.current_poll() {
            Ok((_, p)) => self.voters.contains(&(p.id, account)),
            Err(_) => false,
        }
    }

    pub fn config(&self) -> Config {
        self.config.clone()
    }

    pub fn admins(&self) -> Vec<AccountId> {
        self.admins.clone()
    }

    /************
     * FUNCTIONS
     ************/

    /// Starts a new poll and makes it current. The previous poll keeps its stats.
    /// Fails if:
    /// - the current poll is active (it must be paused first)
    /// - `options` is empty, has an empty string or a duplicate
    /// - `name` is the current poll name, or any used name when name reuse is disabled
    #[handle_result]
    pub fn start_poll(&mut self, name: String, options: Vec<String>) -> Result<(), PollError> {
        self.check_admin()?;
        if let Ok((_, p)) = self.current_poll() {
            if p.is_active() {
                return Err(PollError::InvalidState("current poll must be paused"));
            }
        }
        validate_options(&options)?;
        if self.is_current(&name) {
            return Err(PollError::NameTaken);
        }
        if !self.config.allow_name_reuse && self.polls.get(&name).is_some() {
            return Err(PollError::NameTaken);
        }

        let poll = Poll::new(self.next_poll_id, options, env::block_timestamp_ms());
        self.next_poll_id += 1;
        self.polls.insert(&name, &poll);
        events::emit_start_poll(&name, &poll.options);
        self.current = Some(name);
        Ok(())
    }

    #[handle_result]
    pub fn pause_poll(&mut self) -> Result<(), PollError> {
        self.check_admin()?;
        let (name, mut poll) = self.current_poll()?;
        if !poll.is_active() {
            return Err(PollError::InvalidState("poll is already paused"));
        }
        poll.status = Status::Paused;
        self.polls.insert(&name, &poll);
        events::emit_pause_poll(&name);
        Ok(())
    }

    #[handle_result]
    pub fn resume_poll(&mut self) -> Result<(), PollError> {
        self.check_admin()?;
        let (name, mut poll) = self.current_poll()?;
        if poll.is_active() {
            return Err(PollError::InvalidState("poll is already active"));
        }
        poll.status = Status::Active;
        self.polls.insert(&name, &poll);
        events::emit_resume_poll(&name);
        Ok(())
    }

    /// Casts a vote for `option` in the current poll. The voter is the predecessor account.
    /// Fails if there is no active poll or the option is not part of it.
    #[handle_result]
    pub fn vote(&mut self, option: String) -> Result<(), PollError> {
        let (name, mut poll) = self.current_poll()?;
        if !poll.is_active() {
            return Err(PollError::InvalidState("poll is paused"));
        }
        let idx = poll.option_index(&option).ok_or(PollError::InvalidOption)?;
        let voter = env::predecessor_account_id();
        if self.config.one_vote_per_account && !self.voters.insert(&(poll.id, voter.clone())) {
            return Err(PollError::AlreadyVoted);
        }

        poll.votes[idx] += 1;
        self.polls.insert(&name, &poll);
        events::emit_vote(&name, &option, &voter);
        Ok(())
    }

    /**********
     * ADMIN
     **********/

    #[handle_result]
    pub fn add_admins(&mut self, admins: Vec<AccountId>) -> Result<(), PollError> {
        self.check_admin()?;
        for a in admins {
            if !self.admins.contains(&a) {
                self.admins.push(a);
            }
        }
        Ok(())
    }

    /// Any admin can remove any other admin. Removing all admins opens poll management
    /// to everyone.
    #[handle_result]
    pub fn remove_admins(&mut self, admins: Vec<AccountId>) -> Result<(), PollError> {
        self.check_admin()?;
        self.admins.retain(|a| !admins.contains(a));
        Ok(())
    }

    /// Updates the registry config. Applies to subsequent calls only.
    #[handle_result]
    pub fn set_config(&mut self, config: Config) -> Result<(), PollError> {
        self.check_admin()?;
        self.config = config;
        Ok(())
    }

    /**********
     * INTERNAL
     **********/

    fn check_admin(&self) -> Result<(), PollError> {
        if self.admins.is_empty() || self.admins.contains(&env::predecessor_account_id()) {
            Ok(())
        } else {
            Err(PollError::NotAdmin)
        }
    }

    fn is_current(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
    }

    /// Returns the current poll together with its name.
    fn current_poll(&self) -> Result<(String, Poll), PollError> {
        let name = self.current.clone().ok_or(NO_POLL)?;
        let poll = self
            .polls
            .get(&name)
            .unwrap_or_else(|| env::panic_str("current poll not stored"));
        Ok((name, poll))
    }
}

fn validate_options(options: &[String]) -> Result<(), PollError> {
    if options.is_empty() {
        return Err(PollError::EmptyOptions);
    }
    let mut seen = HashSet::with_capacity(options.len());
    for o in options {
        if o.is_empty() || !seen.insert(o.as_str()) {
            return Err(PollError::InvalidOption);
        }
    }
    Ok(())
}
