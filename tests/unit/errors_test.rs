use linkshelf::types::errors::*;

// === ValidationError Tests ===

#[test]
fn validation_error_display_variants() {
    assert_eq!(
        ValidationError::MissingFields.to_string(),
        "Please fill in both fields"
    );
    assert_eq!(
        ValidationError::InvalidUrl.to_string(),
        "Please enter a valid URL (e.g., https://example.com)"
    );
}

// === StoreError Tests ===

#[test]
fn store_error_display_variants() {
    assert_eq!(
        StoreError::Backend("constraint failed".to_string()).to_string(),
        "Row store error: constraint failed"
    );
    assert_eq!(
        StoreError::NotFound("bm-1".to_string()).to_string(),
        "Bookmark not found: bm-1"
    );
    assert_eq!(
        StoreError::Unavailable("connection reset".to_string()).to_string(),
        "Row store unavailable: connection reset"
    );
}

#[test]
fn store_error_message_is_user_facing() {
    assert_eq!(StoreError::Backend("constraint failed".to_string()).message(), "constraint failed");
    assert_eq!(StoreError::NotFound("bm-1".to_string()).message(), "Bookmark no longer exists");
}

#[test]
fn store_error_from_rusqlite() {
    let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StoreError::Backend(_)));
}

// === FeedError Tests ===

#[test]
fn feed_error_display_variants() {
    assert_eq!(FeedError::Lagged(3).to_string(), "Change feed lagged: 3 events dropped");
    assert_eq!(FeedError::Closed.to_string(), "Change feed closed");
    assert_eq!(
        FeedError::SubscribeFailed("empty owner filter".to_string()).to_string(),
        "Change feed subscribe failed: empty owner filter"
    );
}

// === DashboardError Tests ===

#[test]
fn dashboard_error_sources() {
    use std::error::Error;

    let err = DashboardError::Unauthenticated {
        redirect_to: "/login".to_string(),
    };
    assert_eq!(err.to_string(), "Not authenticated, redirect to /login");
    assert!(err.source().is_none());

    let err: DashboardError = StoreError::Unavailable("down".to_string()).into();
    assert!(err.source().is_some());

    let err: DashboardError = FeedError::Closed.into();
    assert_eq!(err.to_string(), "Failed to subscribe: Change feed closed");
}

// === SubmitError / DeleteError Tests ===

#[test]
fn submit_error_shows_validation_message_verbatim() {
    let err: SubmitError = ValidationError::MissingFields.into();
    assert_eq!(err.to_string(), "Please fill in both fields");
}

#[test]
fn delete_error_display_variants() {
    let err: DeleteError = StoreError::Unavailable("down".to_string()).into();
    assert_eq!(err.to_string(), "Failed to delete bookmark: Row store unavailable: down");
    assert_eq!(DeleteError::Unmounted.to_string(), "Bookmark view is no longer mounted");
    assert_eq!(
        DeleteError::NotListed("b1".to_string()).to_string(),
        "Bookmark is not in your list: b1"
    );
}

// === AuthError / SettingsError Tests ===

#[test]
fn auth_and_settings_error_display() {
    assert_eq!(AuthError::NotAuthenticated.to_string(), "Not authenticated");
    assert_eq!(
        SettingsError::InvalidKey("nope".to_string()).to_string(),
        "Invalid settings key: nope"
    );
}

#[test]
fn errors_implement_error_trait() {
    let errs: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(ValidationError::InvalidUrl),
        Box::new(StoreError::NotFound("x".to_string())),
        Box::new(FeedError::Closed),
        Box::new(AuthError::NotAuthenticated),
        Box::new(SubmitError::Busy),
        Box::new(DeleteError::Unmounted),
        Box::new(SettingsError::IoError("disk".to_string())),
    ];
    assert_eq!(errs.len(), 7);
}
