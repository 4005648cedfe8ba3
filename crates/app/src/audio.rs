//! Desktop sound cues, synthesized on a dedicated audio thread.
//!
//! The quiz loop only sees the fire-and-forget `SoundPlayer` trait; if there
//! is no output device the cues are silently dropped.

use std::sync::mpsc;
use std::thread;

use rodio::OutputStream;
use rodio::buffer::SamplesBuffer;
use tracing::debug;

use services::SoundPlayer;

const SAMPLE_RATE: usize = 44_100;

#[derive(Debug, Clone, Copy)]
enum Cue {
    Positive,
    Negative,
}

/// `SoundPlayer` backed by rodio. The output stream lives on its own thread
/// because it is not `Send`; the player itself is just a channel sender.
pub struct RodioSoundPlayer {
    sender: mpsc::Sender<Cue>,
}

impl RodioSoundPlayer {
    #[must_use]
    pub fn spawn() -> Self {
        let (sender, receiver) = mpsc::channel::<Cue>();

        let spawned = thread::Builder::new().name("audio".into()).spawn(move || {
            let Ok((_stream, handle)) = OutputStream::try_default() else {
                debug!("no audio output device; sound cues disabled");
                while receiver.recv().is_ok() {}
                return;
            };
            while let Ok(cue) = receiver.recv() {
                let samples = match cue {
                    Cue::Positive => correct_cue_samples(),
                    Cue::Negative => incorrect_cue_samples(),
                };
                let source = SamplesBuffer::new(1, SAMPLE_RATE as u32, samples);
                let _ = handle.play_raw(source);
            }
        });
        if spawned.is_err() {
            debug!("audio thread failed to start; sound cues disabled");
        }

        Self { sender }
    }
}

impl SoundPlayer for RodioSoundPlayer {
    fn positive_cue(&self) {
        let _ = self.sender.send(Cue::Positive);
    }

    fn negative_cue(&self) {
        let _ = self.sender.send(Cue::Negative);
    }
}

fn tone_samples(freq: f32, duration_sec: f32, shape: fn(f32) -> f32) -> Vec<f32> {
    let sample_count = (duration_sec * SAMPLE_RATE as f32) as usize;
    (0..sample_count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            // linear fade-out keeps the cue from clicking
            let envelope = 1.0 - i as f32 / sample_count as f32;
            0.3 * envelope * shape(freq * t)
        })
        .collect()
}

fn sine(phase: f32) -> f32 {
    (2.0 * std::f32::consts::PI * phase).sin()
}

fn triangle(phase: f32) -> f32 {
    let cycle = phase.fract();
    if cycle < 0.5 {
        4.0 * cycle - 1.0
    } else {
        3.0 - 4.0 * cycle
    }
}

/// Ascending C5–E5–G5 arpeggio.
fn correct_cue_samples() -> Vec<f32> {
    let mut out = Vec::new();
    for freq in [523.25, 659.25, 783.99] {
        out.extend(tone_samples(freq, 0.12, sine));
    }
    out
}

/// Descending triangle sweep.
fn incorrect_cue_samples() -> Vec<f32> {
    let mut out = Vec::new();
    for freq in [400.0, 300.0, 200.0] {
        out.extend(tone_samples(freq, 0.13, triangle));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_render_to_bounded_samples() {
        for samples in [correct_cue_samples(), incorrect_cue_samples()] {
            assert!(!samples.is_empty());
            assert!(samples.iter().all(|sample| sample.abs() <= 0.3));
        }
    }

    #[test]
    fn sending_cues_never_panics_without_a_device() {
        let player = RodioSoundPlayer::spawn();
        player.positive_cue();
        player.negative_cue();
    }
}
