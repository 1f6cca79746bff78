//! Handlers for the auth engine operations.
//!
//! Each handler validates input (the engine trusts the caller for that),
//! invokes the engine, and maps the outcome: accepted outcomes are 200s
//! carrying the navigation signal as `redirect`, rejected outcomes are
//! 4xx JSON errors.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use hrportal_auth::{
    AuthEngine, ChangePasswordOutcome, ForgotPasswordOutcome, LoginOutcome,
    ResetPasswordOutcome, VerifyOtpOutcome,
};
use hrportal_core::Route;

use crate::app::dto::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
    VerifyOtpRequest,
};
use crate::app::errors::{auth_error_to_response, json_error};
use crate::app::validation;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .route("/forgot-password", post(forgot_password))
        .route("/verify-otp", post(verify_otp))
        .route("/reset-password", post(reset_password))
}

async fn login(
    Extension(engine): Extension<Arc<AuthEngine>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    if let Err(resp) = validation::require_non_empty("username", &req.username)
        .and_then(|()| validation::require_non_empty("password", &req.password))
    {
        return resp;
    }

    match engine.login(&req.username, &req.password).await {
        Ok(outcome @ LoginOutcome::Success {
            must_change_password,
        }) => Json(json!({
            "outcome": "success",
            "must_change_password": must_change_password,
            "redirect": outcome.next_route().map(Route::as_path),
        }))
        .into_response(),
        Ok(LoginOutcome::InvalidCredentials) => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "please check your username and password",
        ),
        Err(err) => auth_error_to_response(err),
    }
}

async fn logout(Extension(engine): Extension<Arc<AuthEngine>>) -> Response {
    match engine.logout() {
        Ok(()) => Json(json!({
            "outcome": "logged_out",
            "redirect": Route::Login.as_path(),
        }))
        .into_response(),
        Err(err) => auth_error_to_response(err),
    }
}

async fn change_password(
    Extension(engine): Extension<Arc<AuthEngine>>,
    Json(req): Json<ChangePasswordRequest>,
) -> Response {
    if let Err(resp) = validation::require_non_empty("old password", &req.old_password)
        .and_then(|()| validation::validate_new_password(&req.new_password, &req.confirm_password))
    {
        return resp;
    }

    match engine
        .change_password(&req.old_password, &req.new_password)
        .await
    {
        Ok(outcome @ ChangePasswordOutcome::Success) => Json(json!({
            "outcome": "success",
            "redirect": outcome.next_route().map(Route::as_path),
        }))
        .into_response(),
        Ok(ChangePasswordOutcome::WrongOldPassword) => json_error(
            StatusCode::UNAUTHORIZED,
            "wrong_old_password",
            "the old password you entered is incorrect",
        ),
        Err(err) => auth_error_to_response(err),
    }
}

async fn forgot_password(
    Extension(engine): Extension<Arc<AuthEngine>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Response {
    if let Err(resp) = validation::validate_email(&req.email) {
        return resp;
    }

    match engine.forgot_password(&req.email).await {
        // The fixed code goes straight back to the caller: demo
        // transparency standing in for a delivery channel.
        Ok(ForgotPasswordOutcome::Sent { otp }) => Json(json!({
            "outcome": "sent",
            "otp": otp,
        }))
        .into_response(),
        Ok(ForgotPasswordOutcome::UserNotFound) => json_error(
            StatusCode::NOT_FOUND,
            "user_not_found",
            "no account is associated with this email",
        ),
        Err(err) => auth_error_to_response(err),
    }
}

async fn verify_otp(
    Extension(engine): Extension<Arc<AuthEngine>>,
    Json(req): Json<VerifyOtpRequest>,
) -> Response {
    if let Err(resp) = validation::validate_email(&req.email)
        .and_then(|()| validation::validate_otp(&req.otp))
    {
        return resp;
    }

    match engine.verify_otp(&req.email, &req.otp).await {
        Ok(VerifyOtpOutcome::Verified) => {
            Json(json!({ "outcome": "verified" })).into_response()
        }
        Ok(VerifyOtpOutcome::Invalid) => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_otp",
            "the code you entered is incorrect",
        ),
        Err(err) => auth_error_to_response(err),
    }
}

async fn reset_password(
    Extension(engine): Extension<Arc<AuthEngine>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Response {
    if let Err(resp) = validation::validate_email(&req.email)
        .and_then(|()| validation::validate_new_password(&req.new_password, &req.confirm_password))
    {
        return resp;
    }

    match engine.reset_password(&req.email, &req.new_password).await {
        Ok(outcome @ ResetPasswordOutcome::Success) => Json(json!({
            "outcome": "success",
            "redirect": outcome.next_route().map(Route::as_path),
        }))
        .into_response(),
        Ok(ResetPasswordOutcome::Failure) => json_error(
            StatusCode::BAD_REQUEST,
            "reset_failed",
            "could not reset password",
        ),
        Err(err) => auth_error_to_response(err),
    }
}
