use edu_core::{ProfileField, UserProfile};

use super::Modal;

/// Profile editor. The draft starts as a copy of the current profile and
/// save is always enabled; the fields are not validated.
#[derive(Debug, Clone, Default)]
pub struct ProfileEditModal {
    original: UserProfile,
    draft: Option<UserProfile>,
}

impl ProfileEditModal {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            original: profile,
            draft: None,
        }
    }

    /// Profile the next [`Modal::open`] copies from.
    pub fn reset_to(
        &mut self,
        profile: UserProfile,
    ) {
        self.original = profile;
    }

    pub fn draft(&self) -> Option<&UserProfile> {
        self.draft.as_ref()
    }

    /// Edits one field of the draft. Ignored while closed.
    pub fn set_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) {
        if let Some(draft) = self.draft.as_mut() {
            draft.set_field(field, value);
        }
    }
}

impl Modal for ProfileEditModal {
    type Value = UserProfile;

    fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    fn open(&mut self) {
        self.draft = Some(self.original.clone());
    }

    fn can_save(&self) -> bool {
        self.is_open()
    }

    fn save(&mut self) -> Option<UserProfile> {
        let saved = self.draft.take()?;
        self.original = saved.clone();
        Some(saved)
    }

    fn cancel(&mut self) {
        self.draft = None;
    }
}
