//! Profile Entity
//!
//! A client profile owned by exactly one user (`managed_by`, immutable).
//! Anamnesis and measurements are opaque practitioner payloads carried
//! as JSON, shape-checked at the boundary only.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ProfileId, UserId};
use serde_json::Value;

use crate::domain::value_object::full_name::FullName;
use crate::error::{ClientsError, ClientsResult};

/// Identifying data of the person behind a profile
#[derive(Debug, Clone)]
pub struct PersonalData {
    pub full_name: FullName,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    /// Contact email of the client; distinct from any login email
    pub contact_email: Option<String>,
}

/// Profile entity
#[derive(Debug, Clone)]
pub struct Profile {
    pub profile_id: ProfileId,
    /// Owning user; never reassigned
    pub managed_by: UserId,
    pub personal_data: PersonalData,
    /// Free-form clinical record, JSON object
    pub anamnesis: Value,
    /// Measurement entries, JSON array
    pub measurements: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new profile for the given owner. Missing anamnesis and
    /// measurements default to `{}` and `[]`.
    pub fn create(
        managed_by: UserId,
        personal_data: PersonalData,
        anamnesis: Option<Value>,
        measurements: Option<Value>,
    ) -> ClientsResult<Self> {
        let anamnesis = anamnesis.unwrap_or_else(|| Value::Object(Default::default()));
        if !anamnesis.is_object() {
            return Err(ClientsError::Validation(
                "Anamnesis must be a JSON object".to_string(),
            ));
        }

        let measurements = measurements.unwrap_or_else(|| Value::Array(Vec::new()));
        if !measurements.is_array() {
            return Err(ClientsError::Validation(
                "Measurements must be a JSON array".to_string(),
            ));
        }

        let now = Utc::now();

        Ok(Self {
            profile_id: ProfileId::new(),
            managed_by,
            personal_data,
            anamnesis,
            measurements,
            created_at: now,
            updated_at: now,
        })
    }
}
