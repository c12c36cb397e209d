use std::fmt;

// === ValidationError ===

/// Errors raised by local form validation. These never reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title or URL is empty after trimming.
    MissingFields,
    /// The URL does not parse as an absolute URL.
    InvalidUrl,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFields => write!(f, "Please fill in both fields"),
            ValidationError::InvalidUrl => {
                write!(f, "Please enter a valid URL (e.g., https://example.com)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// === StoreError ===

/// Errors returned by the row store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected the request (constraint violation, bad query).
    Backend(String),
    /// No row with the given ID exists.
    NotFound(String),
    /// The backend could not be reached.
    Unavailable(String),
}

impl StoreError {
    /// Message suitable for showing to the user.
    pub fn message(&self) -> &str {
        match self {
            StoreError::Backend(msg) | StoreError::Unavailable(msg) => msg,
            StoreError::NotFound(_) => "Bookmark no longer exists",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "Row store error: {}", msg),
            StoreError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            StoreError::Unavailable(msg) => write!(f, "Row store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

// === FeedError ===

/// Errors related to change-feed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The subscriber fell behind and the given number of events were dropped.
    Lagged(u64),
    /// The feed source went away.
    Closed,
    /// The subscription could not be established.
    SubscribeFailed(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Lagged(n) => write!(f, "Change feed lagged: {} events dropped", n),
            FeedError::Closed => write!(f, "Change feed closed"),
            FeedError::SubscribeFailed(msg) => write!(f, "Change feed subscribe failed: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

// === AuthError ===

/// Errors related to the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No user is signed in.
    NotAuthenticated,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
        }
    }
}

impl std::error::Error for AuthError {}

// === DashboardError ===

/// Errors raised while opening the bookmark dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// No current user; the visitor must be sent to the login flow.
    Unauthenticated { redirect_to: String },
    /// The initial snapshot could not be loaded.
    Store(StoreError),
    /// The change-feed subscription could not be established.
    Feed(FeedError),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Unauthenticated { redirect_to } => {
                write!(f, "Not authenticated, redirect to {}", redirect_to)
            }
            DashboardError::Store(e) => write!(f, "Failed to load bookmarks: {}", e),
            DashboardError::Feed(e) => write!(f, "Failed to subscribe: {}", e),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Unauthenticated { .. } => None,
            DashboardError::Store(e) => Some(e),
            DashboardError::Feed(e) => Some(e),
        }
    }
}

impl From<StoreError> for DashboardError {
    fn from(err: StoreError) -> Self {
        DashboardError::Store(err)
    }
}

impl From<FeedError> for DashboardError {
    fn from(err: FeedError) -> Self {
        DashboardError::Feed(err)
    }
}

// === SubmitError ===

/// Errors returned by an add-bookmark submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Local validation failed; no backend call was made.
    Validation(ValidationError),
    /// The row store rejected the insert.
    Store(StoreError),
    /// A submission is already in flight.
    Busy,
    /// The view was torn down.
    Unmounted,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Validation(e) => write!(f, "{}", e),
            SubmitError::Store(e) => write!(f, "Failed to add bookmark: {}", e),
            SubmitError::Busy => write!(f, "A bookmark is already being added"),
            SubmitError::Unmounted => write!(f, "Bookmark view is no longer mounted"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Validation(e) => Some(e),
            SubmitError::Store(e) => Some(e),
            SubmitError::Busy | SubmitError::Unmounted => None,
        }
    }
}

impl From<ValidationError> for SubmitError {
    fn from(err: ValidationError) -> Self {
        SubmitError::Validation(err)
    }
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        SubmitError::Store(err)
    }
}

// === DeleteError ===

/// Errors returned by the delete action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteError {
    /// The row store rejected the delete.
    Store(StoreError),
    /// The id is not in the signed-in user's list.
    NotListed(String),
    /// The view was torn down.
    Unmounted,
}

impl fmt::Display for DeleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteError::Store(e) => write!(f, "Failed to delete bookmark: {}", e),
            DeleteError::NotListed(id) => write!(f, "Bookmark is not in your list: {}", id),
            DeleteError::Unmounted => write!(f, "Bookmark view is no longer mounted"),
        }
    }
}

impl std::error::Error for DeleteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeleteError::Store(e) => Some(e),
            DeleteError::NotListed(_) | DeleteError::Unmounted => None,
        }
    }
}

impl From<StoreError> for DeleteError {
    fn from(err: StoreError) -> Self {
        DeleteError::Store(err)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
