//! In-memory lead filtering.
//!
//! The full lead list is fetched once and narrowed here by a free-text query
//! and an optional status. Filtering is pure: the same records and criteria
//! always produce the same, order-preserving subsequence.

use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;
use crate::domain::types::{LeadStatus, TypeConstraintError};

/// Text query plus optional status used to narrow the lead list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring; empty matches every lead.
    pub query: String,
    /// Exact status to keep; `None` keeps every status.
    pub status: Option<LeadStatus>,
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            status: None,
        }
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builds criteria from raw request input.
    ///
    /// The query is trimmed. A missing, blank or `"all"` status means no
    /// status filter; any other unknown value is rejected.
    pub fn from_input(
        query: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        let query = query.map(str::trim).unwrap_or_default().to_string();
        let status = match status.map(str::trim) {
            None | Some("") => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(s.parse()?),
        };
        Ok(Self { query, status })
    }

    /// `true` when the criteria keep every lead.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.status.is_none()
    }

    /// Returns whether `lead` satisfies both the query and the status rule.
    pub fn matches(&self, lead: &Lead) -> bool {
        self.matches_status(lead) && self.matches_query(&self.query.to_lowercase(), lead)
    }

    fn matches_status(&self, lead: &Lead) -> bool {
        self.status.is_none_or(|status| lead.status == status)
    }

    // `needle` must already be lower-cased.
    fn matches_query(&self, needle: &str, lead: &Lead) -> bool {
        if needle.is_empty() {
            return true;
        }
        [
            &lead.first_name,
            &lead.last_name,
            &lead.email,
            &lead.phone,
            &lead.source,
        ]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(needle))
    }
}

/// Returns the leads matching `criteria`, keeping their original order.
pub fn filter_leads(records: &[Lead], criteria: &FilterCriteria) -> Vec<Lead> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    let needle = criteria.query.to_lowercase();
    records
        .iter()
        .filter(|lead| criteria.matches_status(lead) && criteria.matches_query(&needle, lead))
        .cloned()
        .collect()
}

/// Owns a record list and memoizes its last filtered view.
///
/// Every [`FilterCache::replace_records`] bumps a generation counter; the
/// view is rebuilt only when the generation or the criteria changed since
/// the last call, so staleness checks never walk the records. The output
/// always equals [`filter_leads`] over [`FilterCache::records`].
#[derive(Debug, Default)]
pub struct FilterCache {
    records: Vec<Lead>,
    generation: u64,
    computed_for: Option<(u64, FilterCriteria)>,
    visible: Vec<Lead>,
    recomputations: usize,
}

impl FilterCache {
    pub fn new(records: Vec<Lead>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Lead] {
        &self.records
    }

    /// Swaps in a freshly fetched list, invalidating the view.
    pub fn replace_records(&mut self, records: Vec<Lead>) {
        self.records = records;
        self.generation += 1;
    }

    pub fn view(&mut self, criteria: &FilterCriteria) -> &[Lead] {
        let fresh = matches!(
            &self.computed_for,
            Some((generation, computed)) if *generation == self.generation && computed == criteria
        );
        if !fresh {
            log::debug!(
                "Recomputing lead view for {} records, query {:?}, status {:?}",
                self.records.len(),
                criteria.query,
                criteria.status
            );
            self.visible = filter_leads(&self.records, criteria);
            self.computed_for = Some((self.generation, criteria.clone()));
            self.recomputations += 1;
        }
        &self.visible
    }

    /// Number of times the view was rebuilt.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
