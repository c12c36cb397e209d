//! Bookmark dashboard: the view that owns the list, the form and the delete action.
//!
//! State lives in one `Rc<RefCell<ViewState>>` owned by [`Dashboard`].
//! Event handlers work through a [`DashboardHandle`], which holds only a
//! `Weak`. Each async operation releases its borrow before awaiting and
//! upgrades again afterwards, so a completion that lands after teardown
//! finds nothing to mutate.
//!
//! Everything here runs on one thread. [`Dashboard::open`] spawns the feed
//! pump with `tokio::task::spawn_local` and must be called inside a
//! `tokio::task::LocalSet`.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::managers::add_bookmark_form::AddBookmarkForm;
use crate::managers::bookmark_card::{list_heading, render_list, BookmarkCard, ListView};
use crate::managers::bookmark_list::BookmarkList;
use crate::services::change_feed::Subscription;
use crate::services::identity::require_user;
use crate::services::row_store::RowStore;
use crate::types::bookmark::Bookmark;
use crate::types::errors::{DashboardError, DeleteError, StoreError, SubmitError};
use crate::types::feed::FeedStatus;
use crate::types::session::UserSession;

pub const DELETE_CONFIRM_PROMPT: &str = "Are you sure you want to delete this bookmark?";
pub const DELETE_FAILED_NOTICE: &str = "Failed to delete bookmark";

/// Blocking yes/no prompt shown before a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// A delete for this id is already in flight.
    AlreadyPending,
}

struct ViewState {
    user: UserSession,
    list: BookmarkList,
    form: AddBookmarkForm,
    deleting: HashSet<String>,
    notice: Option<String>,
    feed_status: FeedStatus,
}

/// The mounted bookmark view for the signed-in user.
pub struct Dashboard {
    state: Rc<RefCell<ViewState>>,
    store: Rc<dyn RowStore>,
    pump: Option<JoinHandle<()>>,
}

impl Dashboard {
    /// Mounts the view: resolves the user, subscribes to their feed, loads
    /// the snapshot and starts applying pushed events.
    ///
    /// The subscription is opened before the snapshot is read, so changes
    /// committed in between are delivered rather than lost; replaying them
    /// over the snapshot is harmless because every apply is keyed by id.
    pub async fn open(ctx: &AppContext) -> Result<Self, DashboardError> {
        let user = require_user(ctx.identity.as_ref()).await.map_err(|e| {
            debug!(error = %e, "no session, redirecting to login");
            DashboardError::Unauthenticated {
                redirect_to: ctx.settings.login_path.clone(),
            }
        })?;

        let subscription = ctx.feed.subscribe(&user.user_id).await?;
        let snapshot = ctx.store.select_by_owner(&user.user_id).await?;
        info!(user_id = %user.user_id, count = snapshot.len(), "dashboard mounted");

        let state = Rc::new(RefCell::new(ViewState {
            user,
            list: BookmarkList::from_snapshot(snapshot),
            form: AddBookmarkForm::new(),
            deleting: HashSet::new(),
            notice: None,
            feed_status: FeedStatus::Live,
        }));
        let pump = tokio::task::spawn_local(pump_feed(Rc::downgrade(&state), subscription));

        Ok(Self {
            state,
            store: ctx.store.clone(),
            pump: Some(pump),
        })
    }

    pub fn handle(&self) -> DashboardHandle {
        DashboardHandle {
            state: Rc::downgrade(&self.state),
            store: self.store.clone(),
        }
    }

    pub fn user(&self) -> UserSession {
        self.state.borrow().user.clone()
    }

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.state.borrow().list.bookmarks().to_vec()
    }

    pub fn list_view(&self) -> ListView {
        let state = self.state.borrow();
        render_list(state.list.bookmarks(), &state.deleting)
    }

    /// One card per bookmark, in list order.
    pub fn cards(&self) -> Vec<BookmarkCard> {
        let state = self.state.borrow();
        state
            .list
            .bookmarks()
            .iter()
            .map(|b| BookmarkCard::from_bookmark(b, state.deleting.contains(&b.id)))
            .collect()
    }

    /// "N Bookmarks" heading, or `None` while the list is empty.
    pub fn heading(&self) -> Option<String> {
        let count = self.state.borrow().list.len();
        (count > 0).then(|| list_heading(count))
    }

    pub fn form(&self) -> AddBookmarkForm {
        self.state.borrow().form.clone()
    }

    pub fn notice(&self) -> Option<String> {
        self.state.borrow().notice.clone()
    }

    pub fn feed_status(&self) -> FeedStatus {
        self.state.borrow().feed_status
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.state.borrow().deleting.contains(id)
    }

    pub async fn submit(&self) -> Result<Bookmark, SubmitError> {
        self.handle().submit().await
    }

    pub async fn delete(
        &self,
        id: &str,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, DeleteError> {
        self.handle().delete(id, confirm).await
    }

    /// Tears the view down and waits until the feed subscription is released.
    pub async fn close(mut self) {
        self.state.borrow_mut().feed_status = FeedStatus::Closed;
        if let Some(pump) = self.pump.take() {
            pump.abort();
            // Resolves once the aborted task, and the subscription it owns, is dropped.
            let _ = pump.await;
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
        debug!("dashboard torn down");
    }
}

/// Weak handle for event handlers. Operations fail with `Unmounted`
/// (or become no-ops) once the dashboard is gone.
#[derive(Clone)]
pub struct DashboardHandle {
    state: Weak<RefCell<ViewState>>,
    store: Rc<dyn RowStore>,
}

impl DashboardHandle {
    pub fn is_mounted(&self) -> bool {
        self.state.strong_count() > 0
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> Option<R> {
        let state = self.state.upgrade()?;
        let mut state = state.borrow_mut();
        Some(f(&mut state))
    }

    pub fn set_title(&self, title: &str) -> bool {
        self.with_state(|s| s.form.set_title(title)).is_some()
    }

    pub fn set_url(&self, url: &str) -> bool {
        self.with_state(|s| s.form.set_url(url)).is_some()
    }

    pub fn open_form(&self) -> bool {
        self.with_state(|s| s.form.open()).is_some()
    }

    pub fn close_form(&self) -> bool {
        self.with_state(|s| s.form.close()).is_some()
    }

    pub fn dismiss_notice(&self) -> bool {
        self.with_state(|s| s.notice = None).is_some()
    }

    /// Submits the form. On success the stored record is admitted to the
    /// list right away; the matching feed insert is then a no-op.
    pub async fn submit(&self) -> Result<Bookmark, SubmitError> {
        let (input, user_id) = self
            .with_state(|s| {
                s.form
                    .begin_submit()
                    .map(|input| (input, s.user.user_id.clone()))
            })
            .ok_or(SubmitError::Unmounted)??;

        let result = self.store.insert(input.into_new_bookmark(user_id)).await;

        let Some(state) = self.state.upgrade() else {
            debug!("insert completed after teardown");
            return result.map_err(SubmitError::from);
        };
        let mut guard = state.borrow_mut();
        let view = &mut *guard;
        let list = &mut view.list;
        view.form.finish_submit(result, |bookmark| {
            list.admit(bookmark);
        })
    }

    /// Deletes a bookmark after confirmation. The entry leaves the list as
    /// soon as the store confirms; on failure it stays and a notice is set.
    ///
    /// Only ids in this view's list can be deleted, and the store is asked
    /// to delete them on behalf of the signed-in user.
    pub async fn delete(
        &self,
        id: &str,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, DeleteError> {
        let (listed, pending, user_id) = self
            .with_state(|s| {
                (
                    s.list.contains(id),
                    s.deleting.contains(id),
                    s.user.user_id.clone(),
                )
            })
            .ok_or(DeleteError::Unmounted)?;
        if !listed {
            warn!(id, user_id = %user_id, "delete requested for a bookmark not in this list");
            return Err(DeleteError::NotListed(id.to_string()));
        }
        if pending {
            return Ok(DeleteOutcome::AlreadyPending);
        }
        if !confirm.confirm(DELETE_CONFIRM_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.with_state(|s| s.deleting.insert(id.to_string()))
            .ok_or(DeleteError::Unmounted)?;

        let result = match self.store.delete(id, &user_id).await {
            // Already gone from the store; there is nothing left to delete.
            Err(StoreError::NotFound(_)) => {
                debug!(id, "bookmark already deleted");
                Ok(())
            }
            other => other,
        };

        let Some(state) = self.state.upgrade() else {
            debug!(id, "delete completed after teardown");
            return result.map(|_| DeleteOutcome::Deleted).map_err(DeleteError::from);
        };
        let mut view = state.borrow_mut();
        view.deleting.remove(id);
        match result {
            Ok(()) => {
                view.list.remove(id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                warn!(id, error = %e, "deleting bookmark failed");
                view.notice = Some(DELETE_FAILED_NOTICE.to_string());
                Err(DeleteError::Store(e))
            }
        }
    }
}

/// Applies pushed events to the list until the view goes away or delivery
/// fails. Failures are not retried.
async fn pump_feed(state: Weak<RefCell<ViewState>>, mut subscription: Box<dyn Subscription>) {
    loop {
        let next = subscription.next_event().await;
        let Some(view) = state.upgrade() else {
            break;
        };
        match next {
            Some(Ok(event)) => {
                let changed = view.borrow_mut().list.apply(&event);
                debug!(kind = ?event.kind(), id = event.id(), changed, "feed event");
            }
            Some(Err(e)) => {
                warn!(error = %e, "change feed failed, showing last known state");
                view.borrow_mut().feed_status = FeedStatus::Degraded;
                break;
            }
            None => break,
        }
    }
    subscription.unsubscribe();
}
