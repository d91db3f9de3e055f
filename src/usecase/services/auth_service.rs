use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::account::MIN_PASSWORD_LEN;
use crate::domain::entities::form::looks_like_email;
use crate::infra::http::client::{ApiClient, ApiError};

pub const SIGN_IN_PATH: &str = "auth/signin";
pub const FORGOT_PASSWORD_PATH: &str = "auth/forgot-password";
pub const VERIFY_OTP_PATH: &str = "auth/verify-otp";
pub const RESET_PASSWORD_PATH: &str = "auth/reset-password";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthInputError {
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("enter your password")]
    MissingPassword,
    #[error("the code is 4 to 8 digits")]
    InvalidOtp,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Input(#[from] AuthInputError),
    #[error("wrong email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Api(ApiError),
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct OtpBody<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
struct ResetBody<'a> {
    email: &'a str,
    otp: &'a str,
    password: &'a str,
}

pub fn validate_email(email: &str) -> Result<&str, AuthInputError> {
    let email = email.trim();
    if looks_like_email(email) {
        Ok(email)
    } else {
        Err(AuthInputError::InvalidEmail)
    }
}

pub fn validate_otp(otp: &str) -> Result<&str, AuthInputError> {
    let otp = otp.trim();
    let digits = otp.chars().all(|ch| ch.is_ascii_digit());
    if digits && (4..=8).contains(&otp.len()) {
        Ok(otp)
    } else {
        Err(AuthInputError::InvalidOtp)
    }
}

pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), AuthInputError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthInputError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(AuthInputError::PasswordMismatch);
    }
    Ok(())
}

/// Sign-in and the OTP password reset flow. None of these calls need an
/// existing session.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = validate_email(email)?;
        if password.is_empty() {
            return Err(AuthInputError::MissingPassword.into());
        }

        let response: SignInResponse = self
            .api
            .post_json(SIGN_IN_PATH, &Credentials { email, password })
            .await
            .map_err(|err| match err {
                ApiError::Unauthorized => AuthError::InvalidCredentials,
                other => AuthError::Api(other),
            })?;
        log::info!("signed in as {email}");
        Ok(response.token)
    }

    pub async fn request_otp(&self, email: &str) -> Result<(), AuthError> {
        let email = validate_email(email)?;
        self.api
            .post_unit(FORGOT_PASSWORD_PATH, &EmailBody { email })
            .await
            .map_err(AuthError::Api)?;
        log::info!("password reset code requested for {email}");
        Ok(())
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), AuthError> {
        let email = validate_email(email)?;
        let otp = validate_otp(otp)?;
        self.api
            .post_unit(VERIFY_OTP_PATH, &OtpBody { email, otp })
            .await
            .map_err(AuthError::Api)
    }

    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), AuthError> {
        let email = validate_email(email)?;
        let otp = validate_otp(otp)?;
        validate_new_password(new_password, confirmation)?;
        self.api
            .post_unit(
                RESET_PASSWORD_PATH,
                &ResetBody {
                    email,
                    otp,
                    password: new_password,
                },
            )
            .await
            .map_err(AuthError::Api)?;
        log::info!("password reset for {email}");
        Ok(())
    }
}
