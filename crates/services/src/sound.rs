/// Fire-and-forget audio feedback boundary.
///
/// Implementations must never surface playback failures to the caller; a
/// platform without audio output simply does nothing.
pub trait SoundPlayer: Send + Sync {
    /// Cue for a correct selection.
    fn positive_cue(&self);

    /// Cue for an incorrect selection.
    fn negative_cue(&self);
}

/// No-op player for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn positive_cue(&self) {}

    fn negative_cue(&self) {}
}
