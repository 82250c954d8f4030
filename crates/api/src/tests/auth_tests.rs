// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::{AuthenticatedUser, verify_scheduler_token};
use crate::error::ApiError;

#[test]
fn test_valid_email_authenticates() {
    let user = AuthenticatedUser::from_email("approver@university.edu").expect("valid email");
    assert_eq!(user.email, "approver@university.edu");
}

#[test]
fn test_malformed_email_is_refused() {
    let err = AuthenticatedUser::from_email("not-an-address").expect_err("auth fails");
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_matching_scheduler_token_is_accepted() {
    assert!(verify_scheduler_token("sweep-secret", Some("sweep-secret")).is_ok());
}

#[test]
fn test_missing_scheduler_token_is_an_authentication_failure() {
    let err = verify_scheduler_token("sweep-secret", None).expect_err("auth fails");
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_wrong_scheduler_token_is_unauthorized() {
    let err = verify_scheduler_token("sweep-secret", Some("guess")).expect_err("auth fails");
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}
