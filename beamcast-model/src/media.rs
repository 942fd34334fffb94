//! Program and buffer descriptors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The live program currently behind a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramInfo {
    /// Program identifier.
    pub pid: String,
    /// Scheduled start of the program.
    pub start: DateTime<Utc>,
    /// Scheduled length, milliseconds.
    pub duration: u64,
}

impl ProgramInfo {
    /// Scheduled length in whole seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration as f64 / 1000.0
    }
}

/// The window of a live stream that can currently be seeked into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekableRange {
    /// Earliest reachable position, seconds.
    pub start: f64,
    /// Latest reachable position, seconds. For live this is the edge.
    pub end: f64,
}

impl SeekableRange {
    /// Width of the window, never negative.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Whether `pos` falls inside the window.
    pub fn contains(&self, pos: f64) -> bool {
        pos >= self.start && pos <= self.end
    }
}

/// Seconds of media buffered ahead of the playhead, per stream.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferLengths {
    /// Buffered video, seconds.
    pub video: f64,
    /// Buffered audio, seconds.
    pub audio: f64,
}

impl BufferLengths {
    /// The effective buffer is bounded by the shorter stream.
    pub fn effective(&self) -> f64 {
        self.video.min(self.audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seekable_range_never_reports_negative_width() {
        let r = SeekableRange { start: 100.0, end: 40.0 };
        assert_eq!(r.duration(), 0.0);
        let r = SeekableRange { start: 40.0, end: 100.0 };
        assert_eq!(r.duration(), 60.0);
        assert!(r.contains(40.0));
        assert!(r.contains(100.0));
        assert!(!r.contains(100.5));
    }

    #[test]
    fn effective_buffer_takes_the_shorter_stream() {
        let b = BufferLengths { video: 8.0, audio: 5.5 };
        assert_eq!(b.effective(), 5.5);
    }
}
