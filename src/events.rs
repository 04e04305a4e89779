pub mod format;

pub use self::format::TrackFormat;
use crate::error::{RetimeError, RtResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// A single timed event (one subtitle line) in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub is_comment: bool,
}

impl Event {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            is_comment: false,
        }
    }

    pub fn comment(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            is_comment: true,
        }
    }

    pub fn shifted(&self, delta_ms: i64) -> Self {
        Self {
            start: self.start + delta_ms,
            end: self.end + delta_ms,
            is_comment: self.is_comment,
        }
    }
}

/// A subtitle frame as reported by a container demuxer, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp: f64,
    pub duration: f64,
}

/// Converts demuxer frame timestamps into millisecond events.
///
/// Timestamps and durations arrive in seconds; the container's timecode scale
/// is given in nanoseconds (1_000_000 for the common default).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimecodeScale {
    factor: f64,
}

impl TimecodeScale {
    pub fn from_nanos(timecode_scale: u64) -> Self {
        Self {
            factor: timecode_scale as f64 / 1000.0,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn to_event(&self, timestamp: f64, duration: f64) -> Event {
        Event::new(
            (self.factor * timestamp) as i64,
            (self.factor * (timestamp + duration)) as i64,
        )
    }

    pub fn to_events(&self, frames: &[Frame]) -> Vec<Event> {
        frames
            .iter()
            .map(|f| self.to_event(f.timestamp, f.duration))
            .collect()
    }
}

impl Default for TimecodeScale {
    fn default() -> Self {
        Self::from_nanos(1_000_000)
    }
}

/// Shifts every event by `delta_ms`, rounded to the nearest millisecond.
pub fn shift_events(events: &[Event], delta_ms: f64) -> Vec<Event> {
    let delta = delta_ms.round() as i64;
    events.iter().map(|e| e.shifted(delta)).collect()
}

pub fn load_track<P: AsRef<Path>>(path: P) -> RtResult<Vec<Event>> {
    let path = path.as_ref();
    let format = TrackFormat::from_path(path)?;
    debug!("Loading {} track from {}", format, path.display());

    let file = File::open(path)?;
    let events = read_track(BufReader::new(file), format)?;

    debug!("   -> {} events", events.len());
    Ok(events)
}

pub fn read_track<R: Read>(reader: R, format: TrackFormat) -> RtResult<Vec<Event>> {
    let events: Vec<Event> = read_records(reader, format)?;

    if let Some((idx, bad)) = events.iter().enumerate().find(|(_, e)| e.end < e.start) {
        return Err(RetimeError::Validation(format!(
            "event #{} ends before it starts ({} > {})",
            idx, bad.start, bad.end
        )));
    }

    Ok(events)
}

/// Loads demuxer frames (`timestamp,duration` in seconds) and rescales them
/// into events with the container's timecode scale.
pub fn load_frames<P: AsRef<Path>>(path: P, scale: TimecodeScale) -> RtResult<Vec<Event>> {
    let path = path.as_ref();
    let format = TrackFormat::from_path(path)?;
    debug!(
        "Loading {} frames from {} (x{} ms/s)",
        format,
        path.display(),
        scale.factor()
    );

    let file = File::open(path)?;
    let frames = read_frames(BufReader::new(file), format)?;
    Ok(scale.to_events(&frames))
}

pub fn read_frames<R: Read>(reader: R, format: TrackFormat) -> RtResult<Vec<Frame>> {
    let frames: Vec<Frame> = read_records(reader, format)?;

    let bad = frames
        .iter()
        .position(|f| !f.timestamp.is_finite() || !f.duration.is_finite() || f.duration < 0.0);
    if let Some(idx) = bad {
        return Err(RetimeError::Validation(format!(
            "frame #{} has a non-finite timestamp or a negative duration",
            idx
        )));
    }

    Ok(frames)
}

fn read_records<T: DeserializeOwned, R: Read>(reader: R, format: TrackFormat) -> RtResult<Vec<T>> {
    let records: Vec<T> = match format {
        TrackFormat::Csv => {
            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .flexible(true)
                .from_reader(reader);
            rdr.deserialize().collect::<Result<_, _>>()?
        }
        TrackFormat::Json => serde_json::from_reader(reader)?,
    };
    Ok(records)
}

pub fn save_track<P: AsRef<Path>>(path: P, events: &[Event]) -> RtResult<()> {
    let path = path.as_ref();
    let format = TrackFormat::from_path(path)?;
    let file = File::create(path)?;
    write_track(BufWriter::new(file), format, events)?;
    debug!("Wrote {} events to {}", events.len(), path.display());
    Ok(())
}

pub fn write_track<W: Write>(mut writer: W, format: TrackFormat, events: &[Event]) -> RtResult<()> {
    match format {
        TrackFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            for e in events {
                wtr.serialize(e)?;
            }
            wtr.flush()?;
        }
        TrackFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, events)?;
            writer.flush()?;
        }
    }
    Ok(())
}
