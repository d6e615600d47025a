//! In-memory badge ledger.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::UserId;
use crate::domain::badges::badges_for_total;
use crate::domain::ports::{BadgeLedger, BadgeLedgerError};

#[derive(Debug, Default)]
struct MemberTally {
    completions: u64,
    awarded: HashSet<String>,
}

/// Per-member completion tallies with idempotent milestone awards.
#[derive(Debug, Default)]
pub struct InMemoryBadgeLedger {
    tallies: RwLock<HashMap<UserId, MemberTally>>,
}

impl InMemoryBadgeLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BadgeLedger for InMemoryBadgeLedger {
    async fn record_completion(&self, user: UserId) -> Result<Vec<String>, BadgeLedgerError> {
        let mut tallies = self.tallies.write().await;
        let tally = tallies.entry(user).or_default();
        tally.completions += 1;
        let newly: Vec<String> = badges_for_total(tally.completions)
            .into_iter()
            .filter(|badge| !tally.awarded.contains(*badge))
            .map(str::to_owned)
            .collect();
        for badge in &newly {
            tally.awarded.insert(badge.clone());
        }
        Ok(newly)
    }

    async fn record_uncompletion(&self, user: UserId) -> Result<(), BadgeLedgerError> {
        let mut tallies = self.tallies.write().await;
        let tally = tallies.entry(user).or_default();
        tally.completions = tally.completions.saturating_sub(1);
        Ok(())
    }
}
