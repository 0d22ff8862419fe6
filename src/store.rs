//! The profile store: which profile is active, plus every profile's fields.

use tracing::debug;

use crate::error::StoreError;
use crate::profile::{ProfileFields, ProfileKind};

/// Session-wide editing state. Starts on [`ProfileKind::Link`] with every
/// field empty (Wi-Fi encryption defaults to WPA).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileStore {
    active: ProfileKind,
    fields: ProfileFields,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ProfileKind {
        self.active
    }

    /// Switches the active profile. Stored values are kept as they are.
    pub fn set_active_profile(&mut self, profile: ProfileKind) {
        debug!(from = %self.active, to = %profile, "switching profile");
        self.active = profile;
    }

    /// Writes a raw value into a field. Content is validated only when a
    /// payload is generated, so half-typed input never blocks editing.
    pub fn set_field(&mut self, profile: ProfileKind, field: &str, value: &str) -> Result<(), StoreError> {
        self.fields.set(profile, field, value)?;
        debug!(profile = %profile, field, "field updated");
        Ok(())
    }

    pub fn field(&self, profile: ProfileKind, field: &str) -> Option<&str> {
        self.fields.get(profile, field)
    }

    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }
}
