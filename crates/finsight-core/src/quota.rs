//! Tier quota policy
//!
//! Free sessions are capped on stored transactions and on user-authored chat
//! messages; premium sessions are unbounded. The policy only answers
//! questions. Callers decide what to tell the user and how to truncate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::SubscriptionTier;

pub const DEFAULT_FREE_TRANSACTIONS: usize = 100;
pub const DEFAULT_FREE_CHAT_MESSAGES: usize = 5;

/// What is being counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaKind {
    /// Transactions in the store
    Transactions,
    /// Messages sent by the user to the advisor
    ChatMessages,
}

impl QuotaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::ChatMessages => "chat_messages",
        }
    }
}

impl std::fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-tier ceilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaPolicy {
    pub free_transactions: usize,
    pub free_chat_messages: usize,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            free_transactions: DEFAULT_FREE_TRANSACTIONS,
            free_chat_messages: DEFAULT_FREE_CHAT_MESSAGES,
        }
    }
}

impl QuotaPolicy {
    /// Ceiling for a tier, `None` when unbounded
    pub fn ceiling(&self, tier: SubscriptionTier, kind: QuotaKind) -> Option<usize> {
        if tier.is_premium() {
            return None;
        }
        Some(match kind {
            QuotaKind::Transactions => self.free_transactions,
            QuotaKind::ChatMessages => self.free_chat_messages,
        })
    }

    /// Whether one more item may be added on top of `current`
    pub fn allow_more(&self, tier: SubscriptionTier, current: usize, kind: QuotaKind) -> bool {
        let allowed = match self.ceiling(tier, kind) {
            Some(ceiling) => current < ceiling,
            None => true,
        };
        if !allowed {
            debug!("Quota reached for {} tier: {} {}", tier, current, kind);
        }
        allowed
    }

    /// Items left before the ceiling, `None` when unbounded
    pub fn remaining(&self, tier: SubscriptionTier, current: usize, kind: QuotaKind) -> Option<usize> {
        self.ceiling(tier, kind)
            .map(|ceiling| ceiling.saturating_sub(current))
    }

    /// How many of `requested` new items fit under the ceiling
    pub fn admit(
        &self,
        tier: SubscriptionTier,
        current: usize,
        requested: usize,
        kind: QuotaKind,
    ) -> usize {
        match self.remaining(tier, current, kind) {
            Some(left) => requested.min(left),
            None => requested,
        }
    }
}

/// Check against the default ceilings
pub fn allow_more(tier: SubscriptionTier, current: usize, kind: QuotaKind) -> bool {
    QuotaPolicy::default().allow_more(tier, current, kind)
}
