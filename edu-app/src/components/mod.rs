//! Modal dialogs.
//!
//! A modal holds a private draft while open. Nothing outside the modal sees
//! the draft until [`Modal::save`] hands it back; [`Modal::cancel`] throws
//! it away.

mod profile_edit;
mod subject_select;

pub use profile_edit::ProfileEditModal;
pub use subject_select::SubjectSelectModal;

/// Confirm/cancel dialog over a draft value.
pub trait Modal {
    type Value;

    fn is_open(&self) -> bool;

    /// Opens the dialog with a fresh draft.
    fn open(&mut self);

    /// Whether the save button is enabled.
    fn can_save(&self) -> bool;

    /// Commits the draft and closes. Returns `None` and stays open while
    /// [`Modal::can_save`] is false, or when the dialog is closed.
    fn save(&mut self) -> Option<Self::Value>;

    /// Closes without committing.
    fn cancel(&mut self);
}
