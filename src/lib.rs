#![no_std]

//! A decoder for the serial telemetry stream of Garmin's G3X avionics display
//! units.
//!
//! The stream interleaves fixed-length ASCII sentences carrying attitude, air
//! data, navigation, engine, and GPS data. Framing and field decoding are
//! implemented as an I/O-free finite-state machine in [`sans`], while [`avec`]
//! drives that machine from a live device or a recorded session and writes the
//! results into an [`aircraft::Aircraft`] state.
//!
//! Most users should begin with [`avec::Decoder`].
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the reader-based decoder and aircraft state (default).

#[cfg(feature = "std")]
pub mod aircraft;
#[cfg(feature = "std")]
pub mod avec;
pub mod sans;
