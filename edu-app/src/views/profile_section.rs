//! The profile card of the my-page.

use edu_core::{ErrorClass, ProfileError, ProfileField, ProfileStore, UserProfile};
use tracing::warn;

use crate::components::{Modal, ProfileEditModal};
use crate::state::{PROFILE_REENTRY, StatusMessage};

/// Counters shown next to the profile card. Fixed values; nothing tracks
/// them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStats {
    pub coin: u32,
    pub explorations: u32,
    pub days_together: u32,
}

pub const PROFILE_STATS: ProfileStats = ProfileStats {
    coin: 1000,
    explorations: 5,
    days_together: 324,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSectionView {
    /// `"{username}님"`
    pub greeting: String,
    pub profile_name: String,
    pub profile_color: String,
    /// `"{high_school} {grade}학년 {score}등급"`
    pub school_line: String,
    pub dream: String,
    pub stats: ProfileStats,
}

impl ProfileSectionView {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            greeting: format!("{}님", profile.username),
            profile_name: profile.profile_name.clone(),
            profile_color: profile.profile_color.clone(),
            school_line: profile.school_line(),
            dream: profile.dream.clone(),
            stats: PROFILE_STATS,
        }
    }
}

pub struct ProfileSection {
    profiles: ProfileStore,
    editor: ProfileEditModal,
    status: Option<StatusMessage>,
}

impl ProfileSection {
    pub fn new(profiles: ProfileStore) -> Self {
        Self {
            profiles,
            editor: ProfileEditModal::default(),
            status: None,
        }
    }

    /// Reads the stored profile.
    ///
    /// A record that cannot be deserialized is treated as absent: the
    /// section renders nothing and [`Self::status`] asks for re-entry. Store
    /// failures are returned.
    pub async fn mount(&mut self) -> Result<(), ProfileError> {
        match self.profiles.load_profile().await {
            Ok(profile) => {
                self.status = None;
                if let Some(profile) = profile {
                    self.editor.reset_to(profile);
                }
                Ok(())
            }
            Err(e) if e.class() == ErrorClass::Deserialization => {
                warn!(error = %e, "stored profile ignored");
                self.status = Some(StatusMessage::notification(PROFILE_REENTRY));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// `None` until a profile has been loaded or saved.
    pub fn render(&self) -> Option<ProfileSectionView> {
        self.profiles.current().map(ProfileSectionView::from_profile)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn editor(&self) -> &ProfileEditModal {
        &self.editor
    }

    /// Opens the editor on a copy of the current profile, or on an empty
    /// profile when re-entry was requested.
    pub fn open_editor(&mut self) -> bool {
        if self.profiles.current().is_none() && self.status.is_none() {
            return false;
        }
        self.editor.open();
        true
    }

    pub fn edit_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) {
        self.editor.set_field(field, value);
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Commits the editor draft to the store. Returns `false` when the
    /// editor was not open.
    pub async fn save_edit(&mut self) -> Result<bool, ProfileError> {
        let Some(profile) = self.editor.save() else {
            return Ok(false);
        };
        self.profiles.save_profile(profile).await?;
        self.status = None;
        Ok(true)
    }
}
