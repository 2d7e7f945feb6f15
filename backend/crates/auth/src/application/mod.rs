//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod password_reset;
pub mod register;
pub mod verify_email;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase, PublicUser};
pub use password_reset::{RequestPasswordResetUseCase, ResetPasswordInput, ResetPasswordUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use verify_email::VerifyEmailUseCase;
