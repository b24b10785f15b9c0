//! I/O-free finite-state machine for framing and decoding sentences.
//!
//! This module is intended for applications that own their byte source in an
//! unusual way (for example on embedded systems). See [`crate::avec`] for a
//! decoder driving these states from a reader.
//!
//! # Architecture
//!
//! All states are represented by a zero-size, non-copy token. Once enough bytes
//! are ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any extracted
//! data.
//!
//! Framing begins at [`Decoder`], which consumes one byte at a time until it
//! meets a sentinel: `@` opens the GPS sentence, while `=` opens a sentence
//! tagged by a following identifier byte. Any other byte is discarded, which is
//! how a corrupted stream resynchronizes. Once a sentence is identified, its
//! payload token advances over exactly the sentence's fixed number of bytes.
//!
//! Some areas of the decoding process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Detecting short reads. A payload token must only be advanced with a fully
//! read sentence; otherwise, call `abandon` and count the sentence as
//! malformed.
//!
//! - Rewinding or flushing the byte source when no data is available, or when
//! an unrecognized sentence is met.
//!
//! Checksums carried by some sentences are not verified.

pub mod counters;
pub mod field;
pub mod frame;
pub mod sentence;
pub mod smoothing;

/// Entrypoint to the finite-state machine.
pub type Decoder = frame::Scan;
