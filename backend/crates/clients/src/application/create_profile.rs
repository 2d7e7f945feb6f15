//! Create Profile Use Case

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::id::UserId;
use serde_json::Value;

use crate::domain::entity::profile::{PersonalData, Profile};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::full_name::FullName;
use crate::error::ClientsResult;

/// Create profile input
pub struct CreateProfileInput {
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub contact_email: Option<String>,
    pub anamnesis: Option<Value>,
    pub measurements: Option<Value>,
}

/// Create profile use case
pub struct CreateProfileUseCase<P>
where
    P: ProfileRepository,
{
    repo: Arc<P>,
}

impl<P> CreateProfileUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: UserId, input: CreateProfileInput) -> ClientsResult<Profile> {
        let full_name = FullName::new(input.full_name)?;

        let profile = Profile::create(
            owner,
            PersonalData {
                full_name,
                birth_date: input.birth_date,
                gender: input.gender,
                phone: input.phone,
                contact_email: input.contact_email,
            },
            input.anamnesis,
            input.measurements,
        )?;

        self.repo.create(&profile).await?;

        tracing::info!(profile_id = %profile.profile_id, owner = %owner, "Profile created");

        Ok(profile)
    }
}
