use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Payment provider error: {0}")]
    PaymentProvider(String),

    #[error("Account already has an active or lifetime plan")]
    AlreadyEntitled,

    #[error("Promo code must not be empty")]
    EmptyCode,

    #[error("Invalid or already used promo code")]
    InvalidOrUsedCode,

    #[error("Not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
