//! Synthesized UI sound cues.
//!
//! A single lazily opened output stream mixes short synthesized tones:
//! a rising whoosh for navigation, a major-triad chime for a correct
//! answer, a low buzz for a wrong one. If no output device is available
//! the player degrades to silence.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Nav,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy)]
enum Wave {
    Sine,
    Triangle,
    Saw,
}

/// One active tone: a linear frequency sweep with exponential-ish decay.
struct Voice {
    wave: Wave,
    freq_start: f32,
    freq_end: f32,
    amplitude: f32,
    duration: f32,
    delay: f32,
    elapsed: f32,
    phase: f32,
}

impl Voice {
    fn sample(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return 0.0;
        }
        let t = (self.elapsed - self.delay) / self.duration;
        if t >= 1.0 {
            return 0.0;
        }
        let freq = self.freq_start + (self.freq_end - self.freq_start) * t;
        self.phase = (self.phase + freq * dt) % 1.0;
        let raw = match self.wave {
            Wave::Sine => (self.phase * std::f32::consts::TAU).sin(),
            Wave::Triangle => 4.0 * (self.phase - 0.5).abs() - 1.0,
            Wave::Saw => 2.0 * self.phase - 1.0,
        };
        let envelope = (1.0 - t).powi(2);
        raw * self.amplitude * envelope
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

pub struct CuePlayer {
    // None when no output device could be opened; play() is then a no-op.
    _stream: Option<cpal::Stream>,
    voices: Arc<Mutex<Vec<Voice>>>,
}

impl CuePlayer {
    pub fn new() -> Self {
        let voices: Arc<Mutex<Vec<Voice>>> = Arc::new(Mutex::new(Vec::new()));
        let stream = Self::open_stream(voices.clone());
        if stream.is_none() {
            log::debug!("no audio output device; sound cues disabled");
        }
        Self {
            _stream: stream,
            voices,
        }
    }

    fn open_stream(voices: Arc<Mutex<Vec<Voice>>>) -> Option<cpal::Stream> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;
        let config = device.default_output_config().ok()?;
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let dt = 1.0 / sample_rate;

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut voices = match voices.lock() {
                        Ok(v) => v,
                        Err(_) => return,
                    };
                    for frame in data.chunks_mut(channels) {
                        let mixed: f32 = voices.iter_mut().map(|v| v.sample(dt)).sum();
                        for out in frame.iter_mut() {
                            *out = mixed;
                        }
                    }
                    voices.retain(|v| !v.finished());
                },
                |err| log::debug!("cue output stream error: {err}"),
                None,
            )
            .ok()?;
        stream.play().ok()?;
        Some(stream)
    }

    pub fn play(&self, cue: Cue) {
        let Ok(mut voices) = self.voices.lock() else {
            return;
        };
        match cue {
            Cue::Nav => {
                voices.push(tone(Wave::Sine, 200.0, 600.0, 0.05, 0.3, 0.0));
            }
            Cue::Correct => {
                // C5 / E5 / G5 staggered into a chime.
                voices.push(tone(Wave::Sine, 523.25, 523.25, 0.10, 1.0, 0.0));
                voices.push(tone(Wave::Triangle, 659.25, 659.25, 0.08, 1.0, 0.1));
                voices.push(tone(Wave::Sine, 783.99, 783.99, 0.08, 1.0, 0.2));
            }
            Cue::Wrong => {
                voices.push(tone(Wave::Saw, 100.0, 50.0, 0.10, 0.3, 0.0));
            }
        }
    }
}

impl Default for CuePlayer {
    fn default() -> Self {
        Self::new()
    }
}

fn tone(wave: Wave, freq_start: f32, freq_end: f32, amplitude: f32, duration: f32, delay: f32) -> Voice {
    Voice {
        wave,
        freq_start,
        freq_end,
        amplitude,
        duration,
        delay,
        elapsed: 0.0,
        phase: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_is_silent_during_delay() {
        let mut voice = tone(Wave::Sine, 440.0, 440.0, 0.1, 0.5, 0.2);
        assert_eq!(voice.sample(0.01), 0.0);
        assert!(!voice.finished());
    }

    #[test]
    fn test_voice_finishes_after_duration() {
        let mut voice = tone(Wave::Sine, 440.0, 440.0, 0.1, 0.1, 0.0);
        let dt = 1.0 / 44_100.0;
        let mut steps = 0;
        while !voice.finished() && steps < 10_000 {
            voice.sample(dt);
            steps += 1;
        }
        assert!(voice.finished());
    }

    #[test]
    fn test_voice_envelope_decays() {
        let mut voice = tone(Wave::Sine, 440.0, 440.0, 1.0, 1.0, 0.0);
        let dt = 1.0 / 44_100.0;
        let mut peak_early: f32 = 0.0;
        let mut peak_late: f32 = 0.0;
        for i in 0..44_100 {
            let s = voice.sample(dt).abs();
            if i < 4_410 {
                peak_early = peak_early.max(s);
            } else if i > 39_690 {
                peak_late = peak_late.max(s);
            }
        }
        assert!(peak_early > peak_late);
    }
}
