//! Single-step decoder over a byte source.

use std::{
    io::{self, Write},
    thread,
    time::Duration,
    vec::Vec,
};

use either::Either::{Left, Right};
use tracing::{debug, error, trace, warn};

use crate::{
    aircraft::Aircraft,
    sans::{
        counters::{Cause, Counters},
        frame::{AnyPayload, GPS_SENTINEL, Payload, Scan, Sentinel, TAGGED_SENTINEL, Tag},
        sentence::{Kind, Record, Sentence},
        smoothing::Smoothing,
    },
};

use super::{
    Config, Error,
    signal::AbortSignal,
    source::{Mode, Source, take},
};

extern crate std;

/// The outcome of a successful [`Decoder::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A sentence was decoded into the aircraft state.
    Decoded(Kind),
    /// A heartbeat was received.
    Heartbeat,
    /// No complete sentence was available. A playback source has been rewound
    /// if it was exhausted.
    Idle,
}

/// Decodes sentences from a source into an aircraft state, one per call.
///
/// Accepted sentences may be mirrored byte-for-byte to a recorder, producing a
/// recording that can later be replayed through a [`Playback`](super::Playback)
/// source.
#[derive(Debug)]
pub struct Decoder<S, W = io::Sink> {
    source: S,
    recorder: Option<W>,
    smoothing: Smoothing,
    counters: Counters,
    abort: AbortSignal,
    playback_delay: Duration,
    last_sentence: Vec<u8>,
}

impl<S: Source> Decoder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            recorder: None,
            smoothing: Smoothing::new(),
            counters: Counters::default(),
            abort: AbortSignal::new(),
            playback_delay: Config::default().playback_delay,
            last_sentence: Vec::new(),
        }
    }

    /// Create a decoder using the pacing in `config`.
    ///
    /// Fails if `config` selects a different mode than `source` operates in.
    pub fn from_config(source: S, config: &Config) -> Result<Self, Error> {
        let found = source.mode();

        if found != config.mode {
            Err(Error::ModeMismatch {
                expected: config.mode,
                found,
            })?;
        }

        Ok(Self::new(source).with_playback_delay(config.playback_delay))
    }
}

impl<S: Source, W: Write> Decoder<S, W> {
    /// Mirror accepted sentences, including their sentinel and identifier
    /// bytes, to a writer.
    pub fn record_to<V: Write>(self, recorder: V) -> Decoder<S, V> {
        Decoder {
            source: self.source,
            recorder: Some(recorder),
            smoothing: self.smoothing,
            counters: self.counters,
            abort: self.abort,
            playback_delay: self.playback_delay,
            last_sentence: self.last_sentence,
        }
    }

    /// Share an abort signal with the owning scheduler.
    pub fn with_abort_signal(mut self, abort: AbortSignal) -> Self {
        self.abort = abort;
        self
    }

    pub fn with_playback_delay(mut self, delay: Duration) -> Self {
        self.playback_delay = delay;
        self
    }

    pub fn abort_signal(&self) -> &AbortSignal {
        &self.abort
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn smoothing(&self) -> &Smoothing {
        &self.smoothing
    }

    /// Bytes of the most recently read payload, which may be incomplete.
    pub fn last_sentence(&self) -> &[u8] {
        &self.last_sentence
    }

    pub fn recorder(&self) -> Option<&W> {
        self.recorder.as_ref()
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Perform one framing step, decoding at most one sentence into
    /// `aircraft`.
    ///
    /// Bytes preceding a sentinel are discarded. If the source has no data,
    /// returns [`Step::Idle`] (rewinding a playback source first). Source
    /// faults raise the abort signal, after which every call fails with
    /// [`Error::Aborted`].
    pub fn step(&mut self, aircraft: &mut Aircraft) -> Result<Step, Error> {
        if self.abort.is_raised() {
            Err(Error::Aborted)?;
        }

        match self.frame(aircraft) {
            Err(Error::Io(e)) => {
                error!(error = %e, "source fault, aborting");
                self.abort.raise();
                Err(Error::Io(e))
            }
            result => result,
        }
    }

    fn frame(&mut self, aircraft: &mut Aircraft) -> Result<Step, Error> {
        let mut state = Scan;

        let sentinel = loop {
            let Some(r) = self.byte()? else {
                if self.source.mode() == Mode::Playback {
                    debug!("end of recording, rewinding");
                    self.source.restart()?;
                }

                return Ok(Step::Idle);
            };

            state = match state.advance(r) {
                Left(state) => state,
                Right(sentinel) => break sentinel,
            };
        };

        match sentinel {
            Sentinel::Gps(payload) => self.sentence(payload, &[GPS_SENTINEL], aircraft),
            Sentinel::Tagged(tag) => self.tagged(tag, aircraft),
        }
    }

    fn tagged(&mut self, tag: Tag, aircraft: &mut Aircraft) -> Result<Step, Error> {
        let Some(r) = self.byte()? else {
            debug!("sentinel without identifier");
            return Ok(Step::Idle);
        };

        let head = [TAGGED_SENTINEL, r[0]];

        let payload = match tag.advance(r) {
            Ok(payload) => payload,
            Err(e) => {
                debug!(id = e.id, "unknown sentence");
                self.counters.unrecognized(e.id);

                match self.source.mode() {
                    Mode::Live => self.source.discard_input()?,
                    Mode::Playback => self.pace(),
                }

                Err(e)?
            }
        };

        match payload {
            AnyPayload::Heartbeat(_) => {
                trace!("heartbeat");
                Ok(Step::Heartbeat)
            }
            AnyPayload::Attitude(p) => self.sentence(p, &head, aircraft),
            AnyPayload::Nav(p) => self.sentence(p, &head, aircraft),
            AnyPayload::Engine(p) => self.sentence(p, &head, aircraft),
            AnyPayload::Agl(p) => self.sentence(p, &head, aircraft),
        }
    }

    fn sentence<T, const N: usize>(
        &mut self,
        payload: Payload<T>,
        head: &[u8],
        aircraft: &mut Aircraft,
    ) -> Result<Step, Error>
    where
        T: Sentence<From = [u8; N]> + Into<Record>,
    {
        let mut r = [0; N];
        let n = take(&mut self.source, &mut r)?;

        self.last_sentence.clear();
        self.last_sentence.extend_from_slice(&r[..n]);

        if n != N {
            payload.abandon();

            // A truncated GPS sentence is dropped without being counted.
            if T::KIND == Kind::Gps {
                debug!(read = n, "incomplete GPS sentence");
                return Ok(Step::Idle);
            }

            return Err(self.reject(T::KIND, Cause::ShortRead));
        }

        let (sentence, _) = payload.advance(r);

        let Ok(sentence) = sentence else {
            return Err(self.reject(T::KIND, Cause::Version));
        };

        trace!(kind = ?T::KIND, "decoded sentence");
        self.counters.accept();
        self.record(head, &r);

        aircraft.apply(sentence.into(), &mut self.smoothing);

        if T::KIND == Kind::Attitude {
            self.pace();
        }

        Ok(Step::Decoded(T::KIND))
    }

    fn reject(&mut self, kind: Kind, cause: Cause) -> Error {
        warn!(?kind, ?cause, "malformed sentence");
        self.counters.reject(kind, cause);
        Error::Malformed { kind, cause }
    }

    /// Read a single byte, if one is available.
    fn byte(&mut self) -> Result<Option<[u8; 1]>, Error> {
        let mut r = [0];
        let n = take(&mut self.source, &mut r)?;
        Ok((n == 1).then_some(r))
    }

    /// Slow a playback source to a realistic rate.
    fn pace(&self) {
        if self.source.mode() == Mode::Playback && !self.playback_delay.is_zero() {
            thread::sleep(self.playback_delay);
        }
    }

    fn record(&mut self, head: &[u8], payload: &[u8]) {
        let Some(recorder) = &mut self.recorder else {
            return;
        };

        let written = recorder
            .write_all(head)
            .and_then(|()| recorder.write_all(payload));

        if let Err(e) = written {
            warn!(error = %e, "failed to record sentence");
        }
    }
}
