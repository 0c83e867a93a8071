use serde::Deserialize;

use crate::domain::types::LeadId;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize)]
/// Selection submitted for a bulk action.
pub struct BulkDeleteForm {
    #[serde(default)]
    pub ids: Vec<i32>,
}

/// Validated selection; keeps the submitted order and any repeated ids.
#[derive(Debug, PartialEq)]
pub struct BulkDeletePayload {
    pub ids: Vec<LeadId>,
}

impl BulkDeletePayload {
    /// Validates `form` against the configured selection limit.
    pub fn parse(form: BulkDeleteForm, limit: usize) -> Result<Self, FormError> {
        if form.ids.is_empty() {
            return Err(FormError::EmptySelection);
        }
        if form.ids.len() > limit {
            return Err(FormError::TooManyIds {
                selected: form.ids.len(),
                limit,
            });
        }
        let ids = form
            .ids
            .into_iter()
            .map(|id| LeadId::new(id).map_err(|_| FormError::InvalidLeadId))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(ids: &[i32]) -> BulkDeleteForm {
        BulkDeleteForm { ids: ids.to_vec() }
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let payload = BulkDeletePayload::parse(form(&[3, 1, 3]), 10).unwrap();
        let raw: Vec<i32> = payload.ids.iter().map(|id| id.get()).collect();
        assert_eq!(raw, vec![3, 1, 3]);
    }

    #[test]
    fn rejects_bad_selections() {
        assert!(matches!(
            BulkDeletePayload::parse(form(&[]), 10),
            Err(FormError::EmptySelection)
        ));
        assert!(matches!(
            BulkDeletePayload::parse(form(&[1, 2, 3]), 2),
            Err(FormError::TooManyIds {
                selected: 3,
                limit: 2
            })
        ));
        assert!(matches!(
            BulkDeletePayload::parse(form(&[1, 0]), 10),
            Err(FormError::InvalidLeadId)
        ));
    }
}
