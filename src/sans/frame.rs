//! States locating sentence boundaries and dispatching on identifiers.

use core::marker::PhantomData;

use either::Either::{self, Left, Right};
use thiserror::Error;

use super::sentence::{Agl, Attitude, Engine, Gps, Nav, Sentence, VersionError};

/// Sentinel opening a sentence tagged by an identifier byte.
pub const TAGGED_SENTINEL: u8 = b'=';
/// Sentinel opening the GPS sentence, which carries no identifier byte.
pub const GPS_SENTINEL: u8 = b'@';

/// An identifier byte not matching any supported sentence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unknown sentence identifier ({id:#04x}).")]
pub struct UnknownSentence {
    /// The raw identifier byte.
    pub id: u8,
}

/// State token to scan for the start of a sentence.
#[derive(Debug)]
pub struct Scan;

impl Scan {
    /// Transition to another state by examining a single byte.
    ///
    /// Returns this state again if the byte is not a sentinel, in which case it
    /// has been discarded.
    pub fn advance(self, r: [u8; 1]) -> Either<Self, Sentinel> {
        match r[0] {
            GPS_SENTINEL => Right(Sentinel::Gps(Payload::new())),
            TAGGED_SENTINEL => Right(Sentinel::Tagged(Tag(()))),
            _ => Left(self),
        }
    }
}

/// A successor state after meeting a sentinel byte.
#[derive(Debug)]
pub enum Sentinel {
    Gps(Payload<Gps>),
    Tagged(Tag),
}

/// State token to decode a sentence identifier.
#[derive(Debug)]
pub struct Tag(pub(super) ());

impl Tag {
    /// Transition to another state by decoding an identifier byte.
    ///
    /// The letter `C` identifies a heartbeat, equivalent to identifier `0`.
    /// Any other byte is read as a decimal digit.
    ///
    /// Returns a payload state token for the identified sentence.
    pub fn advance(self, r: [u8; 1]) -> Result<AnyPayload, UnknownSentence> {
        let payload = match id(r[0]) {
            Some(0) => AnyPayload::Heartbeat(Scan),
            Some(1) => AnyPayload::Attitude(Payload::new()),
            Some(2) => AnyPayload::Nav(Payload::new()),
            Some(3) => AnyPayload::Engine(Payload::new()),
            Some(7) => AnyPayload::Agl(Payload::new()),
            _ => Err(UnknownSentence { id: r[0] })?,
        };

        Ok(payload)
    }
}

/// Map an identifier byte to its numeric identifier.
fn id(r: u8) -> Option<u8> {
    match r {
        b'C' => Some(0),
        b'0'..=b'9' => Some(r - b'0'),
        _ => None,
    }
}

/// State token to decode the fixed-length payload of a sentence `T`.
#[derive(Debug)]
pub struct Payload<T> {
    _phantom: PhantomData<T>,
}

impl<T> Payload<T> {
    fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    /// Give up on this sentence after a short read.
    ///
    /// Returns the successor state token.
    pub fn abandon(self) -> Scan {
        Scan
    }
}

impl<T: Sentence> Payload<T> {
    /// Transition to another state by decoding a complete payload.
    ///
    /// Returns the decoded sentence, unless its version byte is unsupported,
    /// and a successor state token.
    pub fn advance(self, r: T::From) -> (Result<T, VersionError>, Scan) {
        (T::decode(r), Scan)
    }
}

/// A `Payload` state token for a tagged sentence.
#[derive(Debug)]
pub enum AnyPayload {
    /// A heartbeat carries no payload.
    Heartbeat(Scan),
    Attitude(Payload<Attitude>),
    Nav(Payload<Nav>),
    Engine(Payload<Engine>),
    Agl(Payload<Agl>),
}
