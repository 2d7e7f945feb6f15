//! Form Entity
//!
//! A versioned questionnaire definition. Versions are unique across the
//! whole catalogue; submissions reference forms by version string.

use chrono::{DateTime, Utc};
use kernel::id::FormId;
use serde::{Deserialize, Serialize};

use crate::error::{ClientsError, ClientsResult};

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
    Text,
}

impl QuestionKind {
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::MultipleChoice)
    }
}

/// One question of a form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub kind: QuestionKind,
    /// Choice alternatives; only meaningful for choice kinds
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl Question {
    /// Options are mandatory for choice kinds and forbidden otherwise
    fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("Question text cannot be empty".to_string());
        }

        if self.kind.is_choice() && self.options.is_empty() {
            return Err(format!(
                "Question \"{}\" is a choice question and needs options",
                self.text
            ));
        }

        if !self.kind.is_choice() && !self.options.is_empty() {
            return Err(format!(
                "Question \"{}\" is a text question and cannot carry options",
                self.text
            ));
        }

        Ok(())
    }
}

/// Form entity
#[derive(Debug, Clone)]
pub struct Form {
    pub form_id: FormId,
    pub name: String,
    /// Unique catalogue version, e.g. "anamnese-v2"
    pub version: String,
    pub description: Option<String>,
    /// Ordered questions
    pub questions: Vec<Question>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// Create a new form definition, validating every question
    pub fn create(
        name: String,
        version: String,
        description: Option<String>,
        questions: Vec<Question>,
    ) -> ClientsResult<Self> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ClientsError::Validation(
                "Form name cannot be empty".to_string(),
            ));
        }

        let version = version.trim().to_string();
        if version.is_empty() {
            return Err(ClientsError::Validation(
                "Form version cannot be empty".to_string(),
            ));
        }

        if questions.is_empty() {
            return Err(ClientsError::Validation(
                "A form needs at least one question".to_string(),
            ));
        }

        for question in &questions {
            question.validate().map_err(ClientsError::Validation)?;
        }

        let now = Utc::now();

        Ok(Self {
            form_id: FormId::new(),
            name,
            version,
            description,
            questions,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}
