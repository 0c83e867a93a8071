//! Diesel implementation of the lead reader and writer.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::lead::{Lead, NewLead, UpdateLead};
use crate::domain::types::LeadId;
use crate::models::lead::{
    Lead as DbLead, NewLead as DbNewLead, UpdateLead as DbUpdateLead,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, LeadReader, LeadWriter};

fn into_domain(lead: DbLead) -> RepositoryResult<Lead> {
    Lead::try_from(lead).map_err(RepositoryError::from)
}

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let lead = leads::table
            .find(id.get())
            .first::<DbLead>(&mut conn)
            .optional()?;

        lead.map(into_domain).transpose()
    }

    fn list_leads(&self) -> RepositoryResult<Vec<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        leads::table
            .order(leads::id.asc())
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let insertable: DbNewLead = new_lead.into();
        let created = diesel::insert_into(leads::table)
            .values(&insertable)
            .get_result::<DbLead>(&mut conn)?;

        into_domain(created)
    }

    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewLead> = new_leads.iter().map(Into::into).collect();

        conn.transaction(|conn| {
            diesel::insert_into(leads::table)
                .values(&insertables)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }

    fn update_lead(&self, id: LeadId, updates: &UpdateLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let changeset = DbUpdateLead::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(leads::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbLead>(&mut conn)?;

        into_domain(updated)
    }

    fn delete_lead(&self, id: LeadId) -> RepositoryResult<()> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(leads::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
