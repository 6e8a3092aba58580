/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All fixed sounds are generated as in-memory WAV buffers at init time;
/// the DEFCON alarm is pitched per level when it fires.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile with `--no-default-features` or without "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

use crate::sim::event::FrameEvent;

/// One playable effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sfx {
    KeyClick,
    LineBeep,
    Granted,
    Denied,
    Alarm(u8),
    Complete,
    Place,
}

impl Sfx {
    /// The effect a frame event should make, if any.
    pub fn for_event(event: &FrameEvent) -> Option<Sfx> {
        match event {
            FrameEvent::KeyClick => Some(Sfx::KeyClick),
            FrameEvent::LineSubmitted | FrameEvent::SideChosen(_) => Some(Sfx::LineBeep),
            FrameEvent::AccessGranted => Some(Sfx::Granted),
            FrameEvent::AccessDenied | FrameEvent::CellOccupied => Some(Sfx::Denied),
            FrameEvent::DefconChanged(level) => Some(Sfx::Alarm(*level)),
            FrameEvent::SimulationComplete => Some(Sfx::Complete),
            FrameEvent::MarkPlaced { .. } => Some(Sfx::Place),
            FrameEvent::ScreenEntered(_) => None,
        }
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Sfx;

    const SAMPLE_RATE: u32 = 22050;
    const TAU: f32 = 2.0 * std::f32::consts::PI;

    /// Pre-generated WAV buffers for each sound effect.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_click: Arc<Vec<u8>>,
        sfx_beep: Arc<Vec<u8>>,
        sfx_granted: Arc<Vec<u8>>,
        sfx_denied: Arc<Vec<u8>>,
        sfx_complete: Arc<Vec<u8>>,
        sfx_place: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!(error = %e, "no audio output, sound disabled");
                    return None;
                }
            };

            // ── Generate all sound buffers ──
            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_click: Arc::new(make_wav(&gen_click())),
                sfx_beep: Arc::new(make_wav(&gen_blip(880.0, 0.06, 0.2))),
                sfx_granted: Arc::new(make_wav(&gen_granted())),
                sfx_denied: Arc::new(make_wav(&gen_denied())),
                sfx_complete: Arc::new(make_wav(&gen_complete())),
                sfx_place: Arc::new(make_wav(&gen_blip(660.0, 0.05, 0.25))),
            })
        }

        pub fn play(&self, sfx: Sfx) {
            match sfx {
                Sfx::KeyClick => self.play_buf(self.sfx_click.as_ref().clone()),
                Sfx::LineBeep => self.play_buf(self.sfx_beep.as_ref().clone()),
                Sfx::Granted => self.play_buf(self.sfx_granted.as_ref().clone()),
                Sfx::Denied => self.play_buf(self.sfx_denied.as_ref().clone()),
                Sfx::Complete => self.play_buf(self.sfx_complete.as_ref().clone()),
                Sfx::Place => self.play_buf(self.sfx_place.as_ref().clone()),
                Sfx::Alarm(level) => self.play_buf(make_wav(&gen_alarm(level))),
            }
        }

        fn play_buf(&self, buf: Vec<u8>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                if let Ok(src) = rodio::Decoder::new(Cursor::new(buf)) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators: all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    fn samples_for(duration: f32) -> usize {
        (SAMPLE_RATE as f32 * duration) as usize
    }

    /// Simple sine blip at given frequency and duration
    pub(super) fn gen_blip(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = samples_for(duration);
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32); // linear fade out
                (t * freq * TAU).sin() * env * volume
            })
            .collect()
    }

    /// Teletype key: a few milliseconds of decaying noise
    pub(super) fn gen_click() -> Vec<f32> {
        let n = samples_for(0.012);
        let mut rng: u32 = 12345;
        (0..n)
            .map(|i| {
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - i as f32 / n as f32).powf(3.0);
                noise * env * 0.15
            })
            .collect()
    }

    /// Access granted: ascending two-note chime
    pub(super) fn gen_granted() -> Vec<f32> {
        let pairs = [(784.0_f32, 0.08), (1047.0, 0.18)]; // G5, C6
        let mut samples = Vec::new();
        for &(freq, dur) in &pairs {
            let n = samples_for(dur);
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = (t * freq * TAU).sin() * 0.7 + (t * freq * 2.0 * TAU).sin() * 0.3;
                samples.push(wave * env * 0.3);
            }
        }
        samples
    }

    /// Access denied: low square buzz
    pub(super) fn gen_denied() -> Vec<f32> {
        let freq = 110.0_f32;
        let n = samples_for(0.3);
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let square = if (t * freq * TAU).sin() >= 0.0 { 1.0 } else { -1.0 };
                let env = 1.0 - (i as f32 / n as f32) * 0.5;
                square * env * 0.15
            })
            .collect()
    }

    /// DEFCON alarm: two-tone siren, higher as the level drops
    pub(super) fn gen_alarm(level: u8) -> Vec<f32> {
        let base = 400.0 + (5u8.saturating_sub(level)) as f32 * 120.0;
        let mut samples = Vec::new();
        for freq in [base, base * 1.25, base, base * 1.25] {
            let n = samples_for(0.09);
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.4;
                let wave = (t * freq * TAU).sin() * 0.7 + (t * freq * 3.0 * TAU).sin() * 0.3;
                samples.push(wave * env * 0.25);
            }
        }
        samples
    }

    /// Simulation complete: slow descending tone
    pub(super) fn gen_complete() -> Vec<f32> {
        let notes = [523.0_f32, 440.0, 349.0, 262.0]; // C5→A4→F4→C4
        let note_dur = 0.16;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = samples_for(note_dur);
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.3;
                samples.push((t * freq * TAU).sin() * env * 0.3);
            }
        }
        // Final fade
        let fade_len = samples.len() / 4;
        let total = samples.len();
        for (i, s) in samples.iter_mut().enumerate().skip(total - fade_len) {
            *s *= (total - i) as f32 / fade_len as f32;
        }
        samples
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder: wraps f32 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    pub(super) fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2; // 16-bit = 2 bytes per sample
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        // RIFF header
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt chunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        buf.extend_from_slice(&1u16.to_le_bytes());  // PCM format
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _sfx: Sfx) {}
}
