//! Bounded moving averages for noisy channels.

use tinyvec::ArrayVec;

/// A moving-average window holding at most `N` samples.
///
/// Each observation is appended before the mean is taken, and the oldest
/// sample is evicted only once the window is full. At steady state the mean
/// therefore covers `N` samples, and the window holds `N - 1` between calls.
#[derive(Debug, Clone, Default)]
pub struct Window<const N: usize> {
    samples: ArrayVec<[f64; N]>,
}

impl<const N: usize> Window<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample, returning the mean of the window including it.
    pub fn observe(&mut self, value: f64) -> f64 {
        self.samples.push(value);

        let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;

        if self.samples.len() == N {
            self.samples.remove(0);
        }

        mean
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// A smoothed channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Pitch,
    SlipSkid,
    AngleOfAttack,
    VerticalSpeed,
}

/// One window per smoothed channel.
#[derive(Debug, Clone, Default)]
pub struct Smoothing {
    pitch: Window<10>,
    slip_skid: Window<10>,
    angle_of_attack: Window<20>,
    vertical_speed: Window<50>,
}

impl Smoothing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample to a channel, returning its current average.
    pub fn observe(&mut self, channel: Channel, value: f64) -> f64 {
        match channel {
            Channel::Pitch => self.pitch.observe(value),
            Channel::SlipSkid => self.slip_skid.observe(value),
            Channel::AngleOfAttack => self.angle_of_attack.observe(value),
            Channel::VerticalSpeed => self.vertical_speed.observe(value),
        }
    }

    /// Number of samples a channel currently holds.
    pub fn len(&self, channel: Channel) -> usize {
        match channel {
            Channel::Pitch => self.pitch.len(),
            Channel::SlipSkid => self.slip_skid.len(),
            Channel::AngleOfAttack => self.angle_of_attack.len(),
            Channel::VerticalSpeed => self.vertical_speed.len(),
        }
    }
}
