//! Per-session sentence tallies.

use super::sentence::Kind;

/// Why a recognized sentence was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    /// Fewer bytes arrived than the sentence's fixed length.
    ShortRead,
    /// The version byte did not match the supported layout.
    Version,
}

/// Monotonic counts of accepted, malformed, and unrecognized sentences.
///
/// Counts are never reset over the lifetime of a decoder.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Counters {
    pub good: u64,
    pub malformed: u64,
    pub short_reads: u64,
    pub version_mismatches: u64,
    /// Kind of the most recent malformed sentence.
    pub last_malformed: Option<Kind>,
    pub unknown: u64,
    /// Raw identifier byte of the most recent unrecognized sentence.
    pub last_unknown: Option<u8>,
    malformed_by_kind: [u64; 5],
}

impl Counters {
    pub fn accept(&mut self) {
        self.good += 1;
    }

    pub fn reject(&mut self, kind: Kind, cause: Cause) {
        self.malformed += 1;
        self.malformed_by_kind[kind as usize] += 1;
        self.last_malformed = Some(kind);

        match cause {
            Cause::ShortRead => self.short_reads += 1,
            Cause::Version => self.version_mismatches += 1,
        }
    }

    pub fn unrecognized(&mut self, id: u8) {
        self.unknown += 1;
        self.last_unknown = Some(id);
    }

    /// Number of malformed sentences of one kind.
    pub fn malformed_of(&self, kind: Kind) -> u64 {
        self.malformed_by_kind[kind as usize]
    }
}
