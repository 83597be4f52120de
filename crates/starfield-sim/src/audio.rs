//! Audio bus: turns thrust state and keyboard notes into start/stop events.
//!
//! Synthesis happens outside the engine. The bus only tracks what is sounding
//! so that every start gets exactly one stop, and repeated stops are no-ops.
//! Timers run on simulation time.

use log::debug;

use starfield_core::config::FlightSettings;
use starfield_core::constants::{RUMBLE_AUTO_STOP_MS, RUMBLE_FREQUENCIES};
use starfield_core::enums::OscillatorType;
use starfield_core::events::{AudioEvent, Voice};

#[derive(Debug, Default)]
pub struct AudioBus {
    /// Sim time the current rumble started, if one is sounding.
    rumble_started_at: Option<f64>,
    /// Frequencies with a sounding note.
    notes: Vec<f64>,
    pending: Vec<AudioEvent>,
}

impl AudioBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-frame rumble update.
    ///
    /// The auto-stop timer fires first, so a rumble that ran out while thrust
    /// is still held restarts in the same frame.
    pub fn update_rumble(&mut self, thrusting: bool, now_ms: f64) {
        if let Some(started) = self.rumble_started_at {
            if now_ms - started >= RUMBLE_AUTO_STOP_MS {
                debug!("Rumble auto-stop after {:.0} ms", now_ms - started);
                self.stop_rumble();
            }
        }

        if thrusting {
            self.start_rumble(now_ms);
        } else {
            self.stop_rumble();
        }
    }

    /// Start the rumble unless it is already sounding.
    pub fn start_rumble(&mut self, now_ms: f64) {
        if self.rumble_started_at.is_some() {
            return;
        }
        self.rumble_started_at = Some(now_ms);
        self.pending.push(AudioEvent::RumbleStart {
            voices: [
                Voice {
                    frequency: RUMBLE_FREQUENCIES[0],
                    waveform: OscillatorType::Sawtooth,
                    detune: 0.0,
                },
                Voice {
                    frequency: RUMBLE_FREQUENCIES[1],
                    waveform: OscillatorType::Square,
                    detune: 0.0,
                },
            ],
        });
    }

    /// Stop the rumble. No-op when nothing is sounding.
    pub fn stop_rumble(&mut self) {
        if self.rumble_started_at.take().is_some() {
            self.pending.push(AudioEvent::RumbleStop);
        }
    }

    pub fn is_rumbling(&self) -> bool {
        self.rumble_started_at.is_some()
    }

    /// Start a two-voice note using the current oscillator settings.
    /// A frequency that is already sounding is left alone.
    pub fn note_on(&mut self, frequency: f64, settings: &FlightSettings) {
        if self.notes.contains(&frequency) {
            return;
        }
        self.notes.push(frequency);
        self.pending.push(AudioEvent::NoteStart {
            frequency,
            voices: [
                Voice {
                    frequency,
                    waveform: settings.oscillator_type_1,
                    detune: settings.oscillator_detune_1,
                },
                Voice {
                    frequency,
                    waveform: settings.oscillator_type_2,
                    detune: settings.oscillator_detune_2,
                },
            ],
        });
    }

    /// Stop a note. No-op when the frequency is not sounding.
    pub fn note_off(&mut self, frequency: f64) {
        if let Some(idx) = self.notes.iter().position(|&f| f == frequency) {
            self.notes.swap_remove(idx);
            self.pending.push(AudioEvent::NoteStop { frequency });
        }
    }

    /// Number of notes currently sounding.
    pub fn active_notes(&self) -> usize {
        self.notes.len()
    }

    /// Take the events produced since the last drain.
    pub fn drain(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_starts(events: &[AudioEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, AudioEvent::RumbleStart { .. }))
            .count()
    }

    #[test]
    fn test_rumble_starts_once_while_thrusting() {
        let mut bus = AudioBus::new();
        bus.update_rumble(true, 0.0);
        bus.update_rumble(true, 16.0);
        bus.update_rumble(true, 32.0);
        let events = bus.drain();
        assert_eq!(count_starts(&events), 1);
        assert!(bus.is_rumbling());

        match &events[0] {
            AudioEvent::RumbleStart { voices } => {
                assert_eq!(voices[0].frequency, 50.0);
                assert_eq!(voices[0].waveform, OscillatorType::Sawtooth);
                assert_eq!(voices[1].frequency, 30.0);
                assert_eq!(voices[1].waveform, OscillatorType::Square);
            }
            other => panic!("expected RumbleStart, got {other:?}"),
        }
    }

    #[test]
    fn test_rumble_release_and_double_stop() {
        let mut bus = AudioBus::new();
        bus.update_rumble(true, 0.0);
        bus.update_rumble(false, 16.0);
        bus.update_rumble(false, 32.0);
        bus.stop_rumble();
        assert_eq!(
            bus.drain().last(),
            Some(&AudioEvent::RumbleStop),
            "release should stop the rumble"
        );

        bus.update_rumble(false, 48.0);
        assert!(bus.drain().is_empty(), "stopping a silent rumble is a no-op");
    }

    #[test]
    fn test_rumble_auto_stop_restarts_while_held() {
        let mut bus = AudioBus::new();
        bus.update_rumble(true, 0.0);
        bus.drain();

        bus.update_rumble(true, 2999.0);
        assert!(bus.drain().is_empty());

        bus.update_rumble(true, 3000.0);
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], AudioEvent::RumbleStop);
        assert!(matches!(events[1], AudioEvent::RumbleStart { .. }));
    }

    #[test]
    fn test_notes_use_settings() {
        let mut bus = AudioBus::new();
        let settings = FlightSettings {
            oscillator_type_1: OscillatorType::Sine,
            oscillator_detune_2: 25.0,
            ..Default::default()
        };

        bus.note_on(440.0, &settings);
        bus.note_on(440.0, &settings);
        assert_eq!(bus.active_notes(), 1);

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        match &events[0] {
            AudioEvent::NoteStart { frequency, voices } => {
                assert_eq!(*frequency, 440.0);
                assert_eq!(voices[0].waveform, OscillatorType::Sine);
                assert_eq!(voices[0].detune, -10.0);
                assert_eq!(voices[1].waveform, OscillatorType::Triangle);
                assert_eq!(voices[1].detune, 25.0);
            }
            other => panic!("expected NoteStart, got {other:?}"),
        }
    }

    #[test]
    fn test_note_off_is_guarded() {
        let mut bus = AudioBus::new();
        bus.note_on(261.63, &FlightSettings::default());
        bus.drain();

        bus.note_off(261.63);
        bus.note_off(261.63);
        bus.note_off(523.25);
        assert_eq!(
            bus.drain(),
            vec![AudioEvent::NoteStop { frequency: 261.63 }]
        );
        assert_eq!(bus.active_notes(), 0);
    }
}
