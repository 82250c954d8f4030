// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{validate_email, validate_interval, validate_title};
use chrono::{Duration, Utc};

#[test]
fn test_valid_email_accepted() {
    assert!(validate_email("requester@university.edu").is_ok());
}

#[test]
fn test_empty_email_rejected() {
    assert!(validate_email("").is_err());
}

#[test]
fn test_malformed_email_rejected() {
    assert!(validate_email("no-at-sign").is_err());
    assert!(validate_email("@missing-local").is_err());
    assert!(validate_email("missing-domain@").is_err());
    assert!(validate_email("two@at@signs").is_err());
}

#[test]
fn test_interval_must_be_forward() {
    let now = Utc::now();
    assert!(validate_interval(now, now + Duration::hours(1)).is_ok());
    assert!(validate_interval(now, now).is_err());
    assert!(validate_interval(now, now - Duration::minutes(1)).is_err());
}

#[test]
fn test_title_must_be_non_empty_and_bounded() {
    assert!(validate_title("Thesis defense").is_ok());
    assert!(validate_title("").is_err());
    assert!(validate_title("   ").is_err());
    assert!(validate_title(&"x".repeat(201)).is_err());
}
