//! Byte sources feeding a decoder.

use std::io::{self, ErrorKind, Read, Seek, SeekFrom};

extern crate std;

/// How a source behaves when it runs dry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A device whose reads time out when no data is available.
    #[default]
    Live,
    /// A recording replayed from the start whenever it is exhausted.
    Playback,
}

/// An ordered stream of raw bytes, owned by a decoder.
///
/// A read returning no bytes, or failing with [`io::ErrorKind::TimedOut`] or
/// [`io::ErrorKind::WouldBlock`], means no data is currently available. Any
/// other error is a fault of the underlying connection.
pub trait Source: Read {
    fn mode(&self) -> Mode;

    /// Prepare for further reads after the source yielded no bytes.
    fn restart(&mut self) -> io::Result<()>;

    /// Drop bytes already buffered by the source, so decoding does not fall
    /// behind real time.
    fn discard_input(&mut self) -> io::Result<()>;
}

/// A recorded session, replayed from the start once exhausted.
#[derive(Debug)]
pub struct Playback<R> {
    inner: R,
}

impl<R: Read + Seek> Playback<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Playback<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> Source for Playback<R> {
    fn mode(&self) -> Mode {
        Mode::Playback
    }

    fn restart(&mut self) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(0)).map(drop)
    }

    fn discard_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A connection to a live display unit, typically a serial port opened with a
/// read timeout.
pub trait Device: Read {
    /// Discard bytes received but not yet read.
    fn clear_input(&mut self) -> io::Result<()>;
}

/// A live device. Running dry is the normal state between sentences.
#[derive(Debug)]
pub struct Live<D> {
    device: D,
}

impl<D: Device> Live<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn get_ref(&self) -> &D {
        &self.device
    }

    pub fn get_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_inner(self) -> D {
        self.device
    }
}

impl<D: Read> Read for Live<D> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.device.read(buf)
    }
}

impl<D: Device> Source for Live<D> {
    fn mode(&self) -> Mode {
        Mode::Live
    }

    fn restart(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn discard_input(&mut self) -> io::Result<()> {
        self.device.clear_input()
    }
}

/// Read until `buf` is full or the source runs dry.
///
/// Returns the number of bytes read. A count short of the buffer length means
/// no more data was available.
pub(crate) fn take(r: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut n = 0;

    while n < buf.len() {
        match r.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(k) => n += k,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => break,
            Err(e) => Err(e)?,
        }
    }

    Ok(n)
}
