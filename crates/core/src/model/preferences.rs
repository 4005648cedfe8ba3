use serde::{Deserialize, Serialize};

/// User preferences persisted across sessions.
///
/// Both flags default to enabled; any unreadable persisted record is replaced
/// by `Preferences::default()` at the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub sound_enabled: bool,
    pub communication_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            communication_enabled: true,
        }
    }
}

impl Preferences {
    /// Copy with the sound flag flipped.
    #[must_use]
    pub fn with_sound_toggled(self) -> Self {
        Self {
            sound_enabled: !self.sound_enabled,
            ..self
        }
    }

    /// Copy with the communication flag flipped.
    #[must_use]
    pub fn with_communication_toggled(self) -> Self {
        Self {
            communication_enabled: !self.communication_enabled,
            ..self
        }
    }
}
