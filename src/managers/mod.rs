// linkshelf view-state managers
// The dashboard owns the bookmark list and the add-bookmark form; cards are pure presentation.

pub mod add_bookmark_form;
pub mod bookmark_card;
pub mod bookmark_list;
pub mod dashboard;
