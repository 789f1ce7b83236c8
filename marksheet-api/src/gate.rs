//! Access Gate
//!
//! Decides whether a presented (roll, credential) pair may read result
//! rows, and serves the authorized set. The credential gates the SET, not
//! per-row visibility: one matching record unlocks every row for that
//! roll. Denial is a silent empty result rather than an error, so an
//! invalid credential is indistinguishable from a roll that does not
//! exist.
//!
//! The same store query backs both the full-results and the basic-info
//! lookups; they differ only in what they project from the match.

use std::sync::Arc;

use marksheet_core::{BasicInfo, MarksheetResult, ResultRecord};
use marksheet_storage::ResultStore;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The caller may read every row for the roll.
    Granted,
    /// No matching record and no override: the caller sees nothing.
    Denied,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// Credential policy over a record store.
#[derive(Clone)]
pub struct AccessGate {
    store: Arc<dyn ResultStore>,
    override_code: String,
}

impl AccessGate {
    pub fn new(store: Arc<dyn ResultStore>, override_code: impl Into<String>) -> Self {
        Self {
            store,
            override_code: override_code.into(),
        }
    }

    /// The reserved override code this gate honors.
    pub fn override_code(&self) -> &str {
        &self.override_code
    }

    /// Decide whether the pair may read the roll's rows.
    ///
    /// Granted when some record with the roll matches the credential
    /// (contact column, override code, or the record's own teacher-code
    /// column), or when the presented credential textually equals the
    /// override code even if the roll has no records at all.
    pub async fn decide(&self, roll: i64, credential: &str) -> MarksheetResult<AccessDecision> {
        if credential == self.override_code {
            return Ok(AccessDecision::Granted);
        }

        let witness = self
            .store
            .find_authorized(roll, credential, &self.override_code)
            .await?;

        Ok(if witness.is_some() {
            AccessDecision::Granted
        } else {
            AccessDecision::Denied
        })
    }

    /// The full result set for the roll, or an empty set on denial.
    pub async fn authorize(&self, roll: i64, credential: &str) -> MarksheetResult<Vec<ResultRecord>> {
        match self.decide(roll, credential).await? {
            AccessDecision::Granted => self.store.find_by_roll(roll).await,
            AccessDecision::Denied => {
                tracing::debug!(roll, "access denied, serving empty result set");
                Ok(Vec::new())
            }
        }
    }

    /// The descriptive projection of the first matching record.
    ///
    /// Unlike [`authorize`](Self::authorize), a bare override credential
    /// does not conjure a record: a roll with no matching record yields
    /// `None`, which callers surface as not-found.
    pub async fn basic_info(&self, roll: i64, credential: &str) -> MarksheetResult<Option<BasicInfo>> {
        let matched = self
            .store
            .find_authorized(roll, credential, &self.override_code)
            .await?;
        Ok(matched.map(|record| record.basic_info()))
    }
}
