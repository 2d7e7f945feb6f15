//! Form Use Cases

use std::sync::Arc;

use auth::UserRole;
use kernel::id::FormId;

use crate::domain::entity::form::{Form, Question};
use crate::domain::repository::FormRepository;
use crate::error::{ClientsError, ClientsResult};

/// Get form use case
pub struct GetFormUseCase<F>
where
    F: FormRepository,
{
    repo: Arc<F>,
}

impl<F> GetFormUseCase<F>
where
    F: FormRepository,
{
    pub fn new(repo: Arc<F>) -> Self {
        Self { repo }
    }

    /// A malformed id is a plain not-found, same as an unknown one
    pub async fn execute(&self, form_id: &str) -> ClientsResult<Form> {
        let Ok(form_id) = FormId::parse(form_id) else {
            return Err(ClientsError::FormNotFound);
        };

        self.repo
            .find_by_id(&form_id)
            .await?
            .ok_or(ClientsError::FormNotFound)
    }
}

/// Create form input
pub struct CreateFormInput {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

/// Create form use case (administrators only)
pub struct CreateFormUseCase<F>
where
    F: FormRepository,
{
    repo: Arc<F>,
}

impl<F> CreateFormUseCase<F>
where
    F: FormRepository,
{
    pub fn new(repo: Arc<F>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, actor_role: UserRole, input: CreateFormInput) -> ClientsResult<Form> {
        if !actor_role.is_admin() {
            return Err(ClientsError::AdminOnly);
        }

        let form = Form::create(input.name, input.version, input.description, input.questions)?;

        // A concurrent duplicate version surfaces here via the unique
        // constraint translation in the repository
        self.repo.create(&form).await?;

        tracing::info!(form_id = %form.form_id, version = %form.version, "Form created");

        Ok(form)
    }
}
