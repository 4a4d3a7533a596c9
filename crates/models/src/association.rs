use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A dog-breeding association record, either approved (registry) or awaiting
/// approval (pending queue). The `id` is assigned by the service and is
/// unique within its containing collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Association {
    pub id: u64,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub breed: String,
}

/// Create/update input model: no id, which is assigned server-side.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociationDraft {
    pub name: String,
    pub contact: String,
    pub address: String,
    pub breed: String,
}

impl AssociationDraft {
    /// Check every field against its length bounds. Bounds count Unicode
    /// characters, not bytes; association names are routinely Czech.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_len("name", &self.name, 3, 200)?;
        check_len("contact", &self.contact, 5, 100)?;
        check_len("address", &self.address, 3, 200)?;
        check_len("breed", &self.breed, 2, 100)?;
        Ok(())
    }

    /// Build a full record from this draft under the given id.
    pub fn into_association(self, id: u64) -> Association {
        Association {
            id,
            name: self.name,
            contact: self.contact,
            address: self.address,
            breed: self.breed,
        }
    }
}

fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), ModelError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ModelError::Validation(format!(
            "{field} must be {min} to {max} characters, got {len}"
        )));
    }
    Ok(())
}
