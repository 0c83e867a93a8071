use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{LeadId, LeadStatus};

/// A sales lead as stored in the lead list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Lead {
    /// Builds an insertable copy of this lead; the store assigns a new id and timestamps.
    #[must_use]
    pub fn duplicate(&self) -> NewLead {
        NewLead {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            source: self.source.clone(),
            status: self.status,
            notes: self.notes.clone(),
        }
    }

    /// "First Last", whichever parts are present.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NewLead {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub notes: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl NewLead {
    #[must_use]
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        source: Option<String>,
        status: LeadStatus,
        notes: Option<String>,
    ) -> Self {
        Self {
            first_name: normalize(first_name),
            last_name: normalize(last_name),
            email: normalize(email.map(|s| s.to_lowercase())),
            phone: normalize(phone),
            source: normalize(source),
            status,
            notes: normalize(notes),
        }
    }
}

/// Full replacement of the editable lead fields.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UpdateLead {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub notes: Option<String>,
}

impl UpdateLead {
    #[must_use]
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        source: Option<String>,
        status: LeadStatus,
        notes: Option<String>,
    ) -> Self {
        Self {
            first_name: normalize(first_name),
            last_name: normalize(last_name),
            email: normalize(email.map(|s| s.to_lowercase())),
            phone: normalize(phone),
            source: normalize(source),
            status,
            notes: normalize(notes),
        }
    }
}
