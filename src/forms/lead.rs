use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{NewLead, UpdateLead};
use crate::domain::types::{LeadEmail, LeadNotes, LeadStatus, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for creating or editing a lead.
pub struct LeadForm {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub first_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub source: Option<String>,
    /// One of the lead statuses; blank means `new`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(length(max = 4096))]
    pub notes: Option<String>,
}

/// Validated and normalized lead fields.
#[derive(Debug, PartialEq)]
pub struct LeadPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<LeadEmail>,
    pub phone: Option<PhoneNumber>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub notes: Option<LeadNotes>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl TryFrom<LeadForm> for LeadPayload {
    type Error = FormError;

    fn try_from(form: LeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let email = non_blank(form.email)
            .map(LeadEmail::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let phone = non_blank(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;
        let status = match non_blank(form.status) {
            Some(status) => status
                .parse::<LeadStatus>()
                .map_err(|_| FormError::InvalidStatus(status.trim().to_string()))?,
            None => LeadStatus::default(),
        };
        let notes = non_blank(form.notes)
            .map(LeadNotes::new)
            .transpose()
            .ok()
            .flatten();

        Ok(Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email,
            phone,
            source: form.source,
            status,
            notes,
        })
    }
}

impl LeadPayload {
    pub fn into_new_lead(self) -> NewLead {
        NewLead::new(
            self.first_name,
            self.last_name,
            self.email.map(String::from),
            self.phone.map(String::from),
            self.source,
            self.status,
            self.notes.map(String::from),
        )
    }

    pub fn into_update(self) -> UpdateLead {
        UpdateLead::new(
            self.first_name,
            self.last_name,
            self.email.map(String::from),
            self.phone.map(String::from),
            self.source,
            self.status,
            self.notes.map(String::from),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> LeadForm {
        LeadForm {
            first_name: Some(" Ann ".to_string()),
            last_name: Some("Lee".to_string()),
            email: Some("Ann@Example.com".to_string()),
            phone: Some("+1 (415) 555-2671".to_string()),
            source: Some("Website".to_string()),
            status: Some("Contacted".to_string()),
            notes: Some("<i>warm</i><script>x</script>".to_string()),
        }
    }

    #[test]
    fn form_is_normalized_into_new_lead() {
        let payload = LeadPayload::try_from(form()).unwrap();
        let lead = payload.into_new_lead();
        assert_eq!(lead.first_name.as_deref(), Some("Ann"));
        assert_eq!(lead.email.as_deref(), Some("ann@example.com"));
        assert_eq!(lead.phone.as_deref(), Some("+14155552671"));
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.notes.as_deref(), Some("<i>warm</i>"));
    }

    #[test]
    fn blank_fields_are_absent_and_status_defaults_to_new() {
        let payload = LeadPayload::try_from(LeadForm {
            email: Some("  ".to_string()),
            status: Some("".to_string()),
            ..LeadForm::default()
        })
        .unwrap();
        assert_eq!(payload.email, None);
        assert_eq!(payload.status, LeadStatus::New);
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let bad_email = LeadForm {
            email: Some("nope".to_string()),
            ..LeadForm::default()
        };
        assert!(matches!(
            LeadPayload::try_from(bad_email),
            Err(FormError::InvalidEmail)
        ));

        let bad_phone = LeadForm {
            phone: Some("call me".to_string()),
            ..LeadForm::default()
        };
        assert!(matches!(
            LeadPayload::try_from(bad_phone),
            Err(FormError::InvalidPhoneNumber)
        ));

        let bad_status = LeadForm {
            status: Some("archived".to_string()),
            ..LeadForm::default()
        };
        assert!(matches!(
            LeadPayload::try_from(bad_status),
            Err(FormError::InvalidStatus(_))
        ));

        let too_long = LeadForm {
            first_name: Some("x".repeat(200)),
            ..LeadForm::default()
        };
        assert!(matches!(
            LeadPayload::try_from(too_long),
            Err(FormError::Validation(_))
        ));
    }
}
