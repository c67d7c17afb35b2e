use uuid::Uuid;

use crate::error::AppError;

/// A record with exactly one owning account.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// The single authorization rule for owned records: the subject must be the owner.
///
/// Call it after the record has been loaded (so a missing record is reported
/// as `NotFound`) and before anything is written.
pub fn ensure_owner<R: Owned + ?Sized>(subject: Uuid, resource: &R) -> Result<(), AppError> {
    if resource.owner_id() == subject {
        Ok(())
    } else {
        log::debug!(
            "Subject {} denied access to a record owned by {}",
            subject,
            resource.owner_id()
        );
        Err(AppError::Forbidden)
    }
}
