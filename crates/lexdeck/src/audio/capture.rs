//! Microphone capture.
//!
//! One `MicCapture` owns one live cpal input stream. The stream is
//! released by dropping the capture, so every exit path (stop, cancel,
//! error) gives the device back unconditionally.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

pub struct MicCapture {
    // Held only to keep the stream alive; dropping it releases the mic.
    _stream: cpal::Stream,
    samples: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
}

/// Finalized mono capture buffer.
pub struct CaptureBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl MicCapture {
    /// Open the default input device and start capturing immediately.
    /// Failure here is the native equivalent of a denied microphone
    /// permission: no stream is created and nothing needs cleanup.
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .context("No microphone available")?;
        let config = device
            .default_input_config()
            .context("Microphone has no usable configuration")?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        let samples: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = samples.clone();

        let stream = device
            .build_input_stream(
                &config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let mut buf = match sink.lock() {
                        Ok(buf) => buf,
                        Err(_) => return,
                    };
                    if channels > 1 {
                        buf.extend(
                            data.chunks(channels)
                                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
                        );
                    } else {
                        buf.extend_from_slice(data);
                    }
                },
                |err| log::error!("microphone stream error: {err}"),
                None,
            )
            .context("Could not open microphone stream")?;
        stream.play().context("Could not start microphone stream")?;

        Ok(Self {
            _stream: stream,
            samples,
            sample_rate,
        })
    }

    /// Stop capturing and hand back everything recorded so far. Consumes
    /// the capture, which drops the stream and releases the microphone.
    pub fn finish(self) -> CaptureBuffer {
        let samples = self
            .samples
            .lock()
            .map(|buf| buf.clone())
            .unwrap_or_default();
        CaptureBuffer {
            samples,
            sample_rate: self.sample_rate,
        }
    }
}

/// Encode a capture buffer as 16-bit mono WAV bytes.
pub fn encode_wav(buffer: &CaptureBuffer) -> Result<Vec<u8>> {
    if buffer.samples.is_empty() {
        anyhow::bail!("Nothing was recorded");
    }
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).context("Could not create WAV writer")?;
        for &sample in &buffer.samples {
            let clamped = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(clamped)
                .context("Could not write WAV sample")?;
        }
        writer.finalize().context("Could not finalize WAV data")?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wav_rejects_empty_buffer() {
        let buffer = CaptureBuffer {
            samples: Vec::new(),
            sample_rate: 44_100,
        };
        assert!(encode_wav(&buffer).is_err());
    }

    #[test]
    fn test_encode_wav_produces_riff_header() {
        let buffer = CaptureBuffer {
            samples: vec![0.0, 0.5, -0.5, 1.0, -1.0],
            sample_rate: 16_000,
        };
        let bytes = encode_wav(&buffer).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // Header (44 bytes) plus 2 bytes per sample.
        assert_eq!(bytes.len(), 44 + buffer.samples.len() * 2);
    }

    #[test]
    fn test_encode_wav_clamps_out_of_range_samples() {
        let buffer = CaptureBuffer {
            samples: vec![2.0, -2.0],
            sample_rate: 16_000,
        };
        let bytes = encode_wav(&buffer).unwrap();
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
    }
}
