//! Reader-driven decoding.
//!
//! _Requires Cargo feature `std`._
//!
//! A [`Decoder`] owns a byte [`Source`], either a [`Live`] device or a
//! [`Playback`] of a recorded session, and is driven by repeated calls to
//! [`Decoder::step`]. Each call performs a single framing step and decodes at
//! most one sentence into an [`Aircraft`](crate::aircraft::Aircraft), so the
//! caller stays in control of its polling cadence.
//!
//! # Example
//!
//! ```
//! let file = std::fs::File::open("garmin_g3x_data1.txt")?;
//! let mut decoder = Decoder::new(Playback::new(file));
//! let mut aircraft = Aircraft::default();
//!
//! while !decoder.abort_signal().is_raised() {
//!     match decoder.step(&mut aircraft) {
//!         Ok(_) => render(&aircraft),
//!         Err(e) if e.is_fatal() => break,
//!         Err(_) => continue,
//!     }
//! }
//! ```

pub mod decoder;
pub mod signal;
pub mod source;

use std::{io, path::PathBuf, string::String, time::Duration};

use thiserror::Error;

use crate::sans::{counters::Cause, frame::UnknownSentence, sentence::Kind};

pub use decoder::{Decoder, Step};
pub use signal::AbortSignal;
pub use source::{Device, Live, Mode, Playback, Source};

extern crate std;

/// Errors occurring while decoding from a source.
///
/// Malformed and unknown sentences are recoverable: decoding resynchronizes on
/// the next call. The others are fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the byte source. The abort signal has been raised.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The abort signal was raised before this call.
    #[error("Decoding was aborted.")]
    Aborted,
    /// A recognized sentence was truncated or had an unsupported version.
    #[error("Malformed {kind:?} sentence ({cause:?}).")]
    Malformed { kind: Kind, cause: Cause },
    /// An unrecognized sentence identifier.
    #[error(transparent)]
    Unknown(#[from] UnknownSentence),
    /// The configured mode does not match the source.
    #[error("Configured for {expected:?} but the source is {found:?}.")]
    ModeMismatch { expected: Mode, found: Mode },
}

impl Error {
    /// Whether decoding cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Aborted | Self::ModeMismatch { .. }
        )
    }
}

/// Settings consumed when opening a source and driving a decoder.
///
/// The decoder reads `mode` and `playback_delay` (see
/// [`Decoder::from_config`]). The remaining fields describe the device or
/// recording to open, which is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// Serial device path.
    pub port: String,
    pub baud_rate: u32,
    /// Recording to replay in playback mode.
    pub playback_file: PathBuf,
    /// Upper bound on a single read from a live device.
    pub read_timeout: Duration,
    /// Delay inserted after attitude and unknown sentences in playback mode.
    pub playback_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Live,
            port: "/dev/ttyS0".into(),
            baud_rate: 115_200,
            playback_file: "garmin_g3x_data1.txt".into(),
            read_timeout: Duration::from_secs(1),
            playback_delay: Duration::from_millis(10),
        }
    }
}
