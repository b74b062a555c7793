//! Per-connection subscription manager.
//!
//! Tracks which token addresses a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::AccountAddress;

/// Manages the set of token subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed token addresses. If `subscribe_all` is true, this set
    /// is ignored.
    tokens: HashSet<AccountAddress>,
    /// Whether the client subscribes to all tokens (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds token addresses to the subscription set. `"*"` enables the
    /// wildcard.
    pub fn subscribe(&mut self, tokens: &[AccountAddress], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for token in tokens {
            self.tokens.insert(*token);
        }
    }

    /// Removes token addresses from the subscription set.
    pub fn unsubscribe(&mut self, tokens: &[AccountAddress]) {
        for token in tokens {
            self.tokens.remove(token);
        }
    }

    /// Returns `true` if the given token address matches the
    /// subscription filter.
    #[must_use]
    pub fn matches(&self, token: AccountAddress) -> bool {
        self.subscribe_all || self.tokens.contains(&token)
    }

    /// Returns the number of explicitly subscribed token addresses.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(AccountAddress::derive_account("ws-a")));
    }

    #[test]
    fn subscribe_specific_token() {
        let mut mgr = SubscriptionManager::new();
        let token = AccountAddress::derive_account("ws-b");
        mgr.subscribe(&[token], false);
        assert!(mgr.matches(token));
        assert!(!mgr.matches(AccountAddress::derive_account("ws-c")));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(AccountAddress::derive_account("ws-d")));
        assert!(mgr.matches(AccountAddress::derive_account("ws-e")));
    }

    #[test]
    fn unsubscribe_removes_token() {
        let mut mgr = SubscriptionManager::new();
        let token = AccountAddress::derive_account("ws-f");
        mgr.subscribe(&[token], false);
        assert!(mgr.matches(token));
        mgr.unsubscribe(&[token]);
        assert!(!mgr.matches(token));
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(
            &[
                AccountAddress::derive_account("ws-g"),
                AccountAddress::derive_account("ws-h"),
            ],
            false,
        );
        assert_eq!(mgr.count(), 2);
    }
}
