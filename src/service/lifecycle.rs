use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::types::{Department, Organization, Role, Status, User};

/// Rows that carry the final/archived lifecycle flags.
pub trait Lifecycle {
    const ENTITY: &'static str;

    fn is_final(&self) -> bool;
    fn is_archived(&self) -> bool;
    fn set_state(&mut self, is_final: bool, is_archived: bool, status: Status, now: DateTime<Utc>);
}

macro_rules! impl_lifecycle {
    ($ty:ty, $entity:literal) => {
        impl Lifecycle for $ty {
            const ENTITY: &'static str = $entity;

            fn is_final(&self) -> bool {
                self.is_final
            }

            fn is_archived(&self) -> bool {
                self.is_archived
            }

            fn set_state(
                &mut self,
                is_final: bool,
                is_archived: bool,
                status: Status,
                now: DateTime<Utc>,
            ) {
                self.is_final = is_final;
                self.is_archived = is_archived;
                self.status = status;
                self.updated_at = now;
            }
        }
    };
}

impl_lifecycle!(Organization, "organization");
impl_lifecycle!(Department, "department");
impl_lifecycle!(Role, "role");
impl_lifecycle!(User, "user");

/// One-way flip from draft to final.
pub fn finalize<T: Lifecycle>(row: &mut T, now: DateTime<Utc>) -> Result<()> {
    if row.is_final() {
        return Err(Error::bad_request(format!("{} is already final", T::ENTITY)));
    }
    let archived = row.is_archived();
    let status = if archived { Status::Archived } else { Status::Active };
    row.set_state(true, archived, status, now);
    Ok(())
}

pub fn archive<T: Lifecycle>(row: &mut T, now: DateTime<Utc>) -> Result<()> {
    if row.is_archived() {
        return Err(Error::bad_request(format!("{} is already archived", T::ENTITY)));
    }
    row.set_state(row.is_final(), true, Status::Archived, now);
    Ok(())
}

pub fn unarchive<T: Lifecycle>(row: &mut T, now: DateTime<Utc>) -> Result<()> {
    if !row.is_archived() {
        return Err(Error::bad_request(format!("{} is not archived", T::ENTITY)));
    }
    let status = if row.is_final() { Status::Active } else { Status::Created };
    row.set_state(row.is_final(), false, status, now);
    Ok(())
}
