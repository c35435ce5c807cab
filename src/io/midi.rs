//! MIDI template loading
//!
//! Renders a Standard MIDI File into a frame-rate pitch vector. The core
//! depends on the projection contract established here: at each frame, the
//! HIGHEST simultaneously active note is taken as the frame's pitch
//! (monophonic projection), and `0` marks frames with no active note.

use std::fs;
use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::contour::PitchContour;
use crate::error::MatchError;

const DEFAULT_TEMPO_US_PER_BEAT: f64 = 500_000.0;

#[derive(Debug, Clone, Copy)]
struct NoteEvent {
    time_seconds: f64,
    pitch: u8,
    on: bool,
}

/// Render MIDI bytes into a pitch contour at the given frame rate
///
/// Timing follows the reference dataset's conventions: the first
/// `set_tempo` event found anywhere in the file sets the tempo for the
/// whole rendering (default 500000 us per beat when none is present), and
/// each track's delta times are accumulated independently. A `note_on`
/// with velocity 0 counts as a `note_off`.
///
/// A file with no note events renders to an empty contour.
///
/// # Errors
///
/// Returns `ProcessingError` if the bytes are not a valid SMF.
pub fn render_midi(bytes: &[u8], frame_rate: f32) -> Result<PitchContour, MatchError> {
    if frame_rate <= 0.0 {
        return Err(MatchError::InvalidInput(format!(
            "Frame rate must be positive, got {}",
            frame_rate
        )));
    }

    let smf = Smf::parse(bytes)
        .map_err(|e| MatchError::ProcessingError(format!("Invalid MIDI file: {}", e)))?;

    let seconds_per_tick = seconds_per_tick(&smf);

    let mut events = Vec::new();
    for track in &smf.tracks {
        let mut track_ticks = 0u64;
        for event in track {
            track_ticks += u64::from(event.delta.as_int());
            if let TrackEventKind::Midi { message, .. } = event.kind {
                let time_seconds = track_ticks as f64 * seconds_per_tick;
                match message {
                    MidiMessage::NoteOn { key, vel } => events.push(NoteEvent {
                        time_seconds,
                        pitch: key.as_int(),
                        on: vel.as_int() > 0,
                    }),
                    MidiMessage::NoteOff { key, .. } => events.push(NoteEvent {
                        time_seconds,
                        pitch: key.as_int(),
                        on: false,
                    }),
                    _ => {}
                }
            }
        }
    }

    Ok(project_monophonic(&mut events, frame_rate))
}

/// Load a MIDI template file and render it at the given frame rate
///
/// # Errors
///
/// Returns `NotFound` if the file cannot be read, `ProcessingError` if it
/// is not valid MIDI.
pub fn load_midi_template(path: &Path, frame_rate: f32) -> Result<PitchContour, MatchError> {
    let bytes = fs::read(path).map_err(|e| {
        MatchError::NotFound(format!("Cannot read MIDI file '{}': {}", path.display(), e))
    })?;

    let contour = render_midi(&bytes, frame_rate)?;
    log::debug!(
        "Rendered '{}' to {} frames at {} Hz",
        path.display(),
        contour.len(),
        frame_rate
    );

    Ok(contour)
}

fn seconds_per_tick(smf: &Smf) -> f64 {
    // First set_tempo found anywhere wins; 120 BPM when none is present.
    let mut tempo = DEFAULT_TEMPO_US_PER_BEAT;
    'outer: for track in &smf.tracks {
        for event in track {
            if let TrackEventKind::Meta(MetaMessage::Tempo(t)) = event.kind {
                tempo = f64::from(t.as_int());
                break 'outer;
            }
        }
    }

    match smf.header.timing {
        Timing::Metrical(ticks_per_beat) => {
            (tempo / 1_000_000.0) / f64::from(ticks_per_beat.as_int())
        }
        Timing::Timecode(fps, subframe) => 1.0 / (fps.as_f32() as f64 * f64::from(subframe)),
    }
}

/// Sample the note-event stream at the frame rate, keeping the highest
/// active pitch per frame
fn project_monophonic(events: &mut [NoteEvent], frame_rate: f32) -> PitchContour {
    if events.is_empty() {
        return Vec::new();
    }

    events.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));

    let max_time = events[events.len() - 1].time_seconds;
    let num_frames = (max_time * f64::from(frame_rate)) as usize + 1;

    let mut contour = Vec::with_capacity(num_frames);
    let mut active = [false; 128];
    let mut next_event = 0;

    for frame_idx in 0..num_frames {
        let frame_time = frame_idx as f64 / f64::from(frame_rate);

        while next_event < events.len() && events[next_event].time_seconds <= frame_time {
            let event = events[next_event];
            active[event.pitch as usize] = event.on;
            next_event += 1;
        }

        let highest = active.iter().rposition(|&on| on);
        contour.push(match highest {
            Some(pitch) => pitch as f32,
            None => 0.0,
        });
    }

    contour
}

#[cfg(test)]
mod tests {
    use super::*;
    use midly::{
        num::{u15, u28, u4, u7},
        Format, Header, Smf, Timing, TrackEvent, TrackEventKind,
    };

    fn note_on(delta: u32, key: u8, vel: u8) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::from(delta),
            kind: TrackEventKind::Midi {
                channel: u4::from(0),
                message: MidiMessage::NoteOn {
                    key: u7::from(key),
                    vel: u7::from(vel),
                },
            },
        }
    }

    fn note_off(delta: u32, key: u8) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::from(delta),
            kind: TrackEventKind::Midi {
                channel: u4::from(0),
                message: MidiMessage::NoteOff {
                    key: u7::from(key),
                    vel: u7::from(0),
                },
            },
        }
    }

    fn end_of_track() -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::from(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        }
    }

    fn smf_bytes(tracks: Vec<Vec<TrackEvent<'static>>>) -> Vec<u8> {
        let header = Header::new(Format::SingleTrack, Timing::Metrical(u15::from(480)));
        let mut smf = Smf::new(header);
        smf.tracks = tracks;
        let mut bytes = Vec::new();
        smf.write_std(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_single_note_renders_constant_pitch() {
        // One beat of middle C at the default 120 BPM = 0.5 s
        let bytes = smf_bytes(vec![vec![
            note_on(0, 60, 64),
            note_off(480, 60),
            end_of_track(),
        ]]);

        let contour = render_midi(&bytes, 31.25).unwrap();
        assert_eq!(contour.len(), 16);
        assert!(contour.iter().all(|&v| v == 60.0));
    }

    #[test]
    fn test_highest_active_pitch_wins() {
        // A held C major chord: the projection must pick the top note
        let bytes = smf_bytes(vec![vec![
            note_on(0, 60, 64),
            note_on(0, 64, 64),
            note_on(0, 67, 64),
            note_off(480, 60),
            note_off(0, 64),
            note_off(0, 67),
            end_of_track(),
        ]]);

        let contour = render_midi(&bytes, 31.25).unwrap();
        assert!(!contour.is_empty());
        // All frames up to the release carry the chord's top note
        assert!(contour[..contour.len() - 1].iter().all(|&v| v == 67.0));
    }

    #[test]
    fn test_gap_between_notes_is_silence() {
        // Note, one beat of rest, note
        let bytes = smf_bytes(vec![vec![
            note_on(0, 60, 64),
            note_off(480, 60),
            note_on(480, 62, 64),
            note_off(480, 62),
            end_of_track(),
        ]]);

        let contour = render_midi(&bytes, 31.25).unwrap();
        // Rest frames between the two notes are sentinel
        assert!(contour.contains(&0.0));
        assert!(contour.contains(&60.0));
        assert!(contour.contains(&62.0));
    }

    #[test]
    fn test_note_on_velocity_zero_is_note_off() {
        let bytes = smf_bytes(vec![vec![
            note_on(0, 60, 64),
            note_on(480, 60, 0),
            note_on(480, 62, 64),
            note_off(480, 62),
            end_of_track(),
        ]]);

        let contour = render_midi(&bytes, 31.25).unwrap();
        // The 60 must have been released before the 62 started
        let idx62 = contour.iter().position(|&v| v == 62.0).unwrap();
        assert!(contour[..idx62].contains(&0.0));
    }

    #[test]
    fn test_no_notes_renders_empty() {
        let bytes = smf_bytes(vec![vec![end_of_track()]]);
        assert!(render_midi(&bytes, 31.25).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        let err = render_midi(b"not a midi file", 31.25).unwrap_err();
        assert!(matches!(err, MatchError::ProcessingError(_)));
    }

    #[test]
    fn test_invalid_frame_rate_rejected() {
        let bytes = smf_bytes(vec![vec![end_of_track()]]);
        assert!(render_midi(&bytes, 0.0).is_err());
    }
}
