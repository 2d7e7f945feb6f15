//! List Profiles Use Case
//!
//! Owner-scoped, paginated listing with a compact projection.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::config::ClientsConfig;
use crate::domain::entity::profile::Profile;
use crate::domain::repository::ProfileRepository;
use crate::error::ClientsResult;

/// Raw pagination parameters, straight from the query string
pub struct ListProfilesInput {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Listing projection of one profile
pub struct ProfileSummary {
    pub id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub last_update: DateTime<Utc>,
}

/// One page of profiles plus pagination metadata
pub struct ProfilePage {
    pub data: Vec<ProfileSummary>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

/// List profiles use case
pub struct ListProfilesUseCase<P>
where
    P: ProfileRepository,
{
    repo: Arc<P>,
    config: Arc<ClientsConfig>,
}

impl<P> ListProfilesUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(repo: Arc<P>, config: Arc<ClientsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, owner: UserId, input: ListProfilesInput) -> ClientsResult<ProfilePage> {
        let page = normalize(input.page, self.config.default_page);
        let limit = normalize(input.limit, self.config.default_limit);
        // Saturating: page is attacker-controlled and may be i64::MAX
        let offset = page.saturating_sub(1).saturating_mul(limit);

        let (profiles, total_items) = tokio::try_join!(
            self.repo.list_by_owner(&owner, offset, limit),
            self.repo.count_by_owner(&owner),
        )?;

        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };

        Ok(ProfilePage {
            data: profiles.into_iter().map(summarize).collect(),
            current_page: page,
            total_pages,
            total_items,
        })
    }
}

/// Non-numeric and non-positive values fall back to the default, so a
/// hostile query string can never produce a negative offset.
fn normalize(raw: Option<String>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn summarize(profile: Profile) -> ProfileSummary {
    ProfileSummary {
        id: profile.profile_id.to_string(),
        full_name: profile.personal_data.full_name.into_db(),
        email: profile.personal_data.contact_email,
        last_update: profile.updated_at,
    }
}
