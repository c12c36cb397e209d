//! Add-bookmark form state and validation.
//!
//! Submission is split into [`AddBookmarkForm::begin_submit`] and
//! [`AddBookmarkForm::finish_submit`] so an owner holding the form behind a
//! `RefCell` can release it while the insert is in flight.
//! [`AddBookmarkForm::submit`] chains both for callers that own the form directly.

use tracing::warn;
use url::Url;

use crate::services::row_store::RowStore;
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::{StoreError, SubmitError, ValidationError};

pub const ADD_FAILED_FALLBACK: &str = "Failed to add bookmark";

/// Trimmed, validated form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub title: String,
    pub url: String,
}

impl ValidatedInput {
    pub fn into_new_bookmark(self, user_id: impl Into<String>) -> NewBookmark {
        NewBookmark::new(self.title, self.url, user_id)
    }
}

/// Validates raw title and URL text.
///
/// Both fields must be non-empty after trimming, then the URL must parse
/// as an absolute URL.
pub fn validate_input(title: &str, url: &str) -> Result<ValidatedInput, ValidationError> {
    let title = title.trim();
    let url = url.trim();

    if title.is_empty() || url.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    // `Url::parse` has no base, so relative references are rejected.
    if Url::parse(url).is_err() {
        return Err(ValidationError::InvalidUrl);
    }

    Ok(ValidatedInput {
        title: title.to_string(),
        url: url.to_string(),
    })
}

/// State of the add-bookmark entry dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddBookmarkForm {
    pub title: String,
    pub url: String,
    /// Inline error shown above the fields.
    pub error: Option<String>,
    pub is_loading: bool,
    pub is_open: bool,
}

impl AddBookmarkForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn validate(&self) -> Result<ValidatedInput, ValidationError> {
        validate_input(&self.title, &self.url)
    }

    /// Starts a submission: clears the previous error, validates, and marks
    /// the form loading. Validation failures are written to `error`.
    pub fn begin_submit(&mut self) -> Result<ValidatedInput, SubmitError> {
        if self.is_loading {
            return Err(SubmitError::Busy);
        }
        self.error = None;

        match self.validate() {
            Ok(input) => {
                self.is_loading = true;
                Ok(input)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(SubmitError::Validation(e))
            }
        }
    }

    /// Completes a submission with the row store's answer.
    ///
    /// On success the fields are cleared, the dialog closes and `on_added`
    /// receives the stored record. On failure the backend message is shown
    /// and the entered values are kept.
    pub fn finish_submit<F>(
        &mut self,
        result: Result<Bookmark, StoreError>,
        on_added: F,
    ) -> Result<Bookmark, SubmitError>
    where
        F: FnOnce(Bookmark),
    {
        self.is_loading = false;
        match result {
            Ok(bookmark) => {
                self.title.clear();
                self.url.clear();
                self.close();
                on_added(bookmark.clone());
                Ok(bookmark)
            }
            Err(e) => {
                warn!(error = %e, "adding bookmark failed");
                let message = e.message();
                self.error = Some(if message.is_empty() {
                    ADD_FAILED_FALLBACK.to_string()
                } else {
                    message.to_string()
                });
                Err(SubmitError::Store(e))
            }
        }
    }

    /// Validates and submits the form to `store` on behalf of `user_id`.
    pub async fn submit<F>(
        &mut self,
        store: &dyn RowStore,
        user_id: &str,
        on_added: F,
    ) -> Result<Bookmark, SubmitError>
    where
        F: FnOnce(Bookmark),
    {
        let input = self.begin_submit()?;
        let result = store.insert(input.into_new_bookmark(user_id)).await;
        self.finish_submit(result, on_added)
    }
}
