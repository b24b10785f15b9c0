//! Aircraft state written by decoded sentences.
//!
//! _Requires Cargo feature `std`._

use crate::sans::{
    field::TimeOfDay,
    sentence::{Agl, Attitude, Engine, Gps, Nav, Record},
    smoothing::{Channel, Smoothing},
};

extern crate std;

/// Standard sea-level pressure, in inches of mercury.
const STANDARD_PRESSURE: f64 = 29.9213;
/// Change in inches of mercury per foot of altitude.
const PRESSURE_LAPSE: f64 = 0.00108;
/// Feet per minute to miles per hour.
const FPM_TO_MPH: f64 = 0.0113636;

/// Aircraft state shared with a display renderer.
///
/// Decoding writes into this state; aside from the vertical speed and ground
/// speed it derives itself, it never reads from it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Aircraft {
    /// UTC time of the most recent sentence.
    pub time: TimeOfDay,

    pub roll: f64,
    pub pitch: f64,
    /// Magnetic heading in degrees.
    pub heading: i32,
    pub turn_rate: f64,
    pub slip_skid: f64,
    pub vert_g: f64,
    pub aoa: f64,

    /// Indicated airspeed in miles per hour.
    pub ias: f64,
    /// True airspeed in miles per hour.
    pub tas: f64,
    /// Ground speed in miles per hour.
    pub ground_speed: f64,
    /// Flight path angle in degrees, from vertical speed and ground speed.
    pub ground_angle: f64,

    /// Pressure altitude in feet.
    pub pressure_altitude: i32,
    /// Altimeter setting in inches of mercury.
    pub baro: f64,
    /// Altimeter setting less standard pressure.
    pub baro_diff: f64,
    /// Indicated altitude in feet, corrected for the altimeter setting.
    pub altitude: i32,
    /// Barometric altitude in feet.
    pub baro_altitude: i32,
    pub density_altitude: i32,
    /// Feet above ground level.
    pub agl: i32,
    /// Vertical speed in feet per minute.
    pub vsi: f64,
    /// Outside air temperature in Fahrenheit.
    pub oat: f64,

    pub gps: Gps,
    pub nav: NavBugs,
    pub engine: EngineState,
    pub fuel: FuelState,
}

/// Autopilot reference settings.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NavBugs {
    pub heading_bug: i32,
    pub altitude_bug: i32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EngineState {
    pub rpm: i32,
    pub cylinders: u8,
    pub oil_pressure: i32,
    pub oil_temp: f64,
    pub fuel_pressure: f64,
    pub fuel_flow: f64,
    pub manifold_pressure: f64,
    pub coolant_temp: f64,
    pub egt: [f64; 6],
    pub cht: [f64; 6],
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FuelState {
    pub levels: [f64; 4],
}

impl Aircraft {
    /// Write a decoded sentence into the aircraft state, smoothing noisy
    /// channels.
    pub fn apply(&mut self, record: Record, smoothing: &mut Smoothing) {
        match record {
            Record::Gps(s) => self.apply_gps(s),
            Record::Attitude(s) => self.apply_attitude(s, smoothing),
            Record::Nav(s) => self.apply_nav(s),
            Record::Agl(s) => self.apply_agl(s),
            Record::Engine(s) => self.apply_engine(s),
        }
    }

    fn apply_gps(&mut self, s: Gps) {
        self.time = s.time;
        self.gps = s;

        let climb = self.vsi * FPM_TO_MPH;
        self.ground_angle = climb.atan2(self.ground_speed).to_degrees();
    }

    fn apply_attitude(&mut self, s: Attitude, smoothing: &mut Smoothing) {
        self.time = s.time;
        self.roll = s.roll;

        // Missing samples leave the previous average in place.
        if let Some(pitch) = s.pitch {
            self.pitch = smoothing.observe(Channel::Pitch, pitch);
        }

        self.ias = s.ias;
        self.pressure_altitude = s.pressure_altitude;
        self.oat = s.oat;

        self.aoa = match s.aoa {
            Some(aoa) => smoothing.observe(Channel::AngleOfAttack, aoa),
            None => 0.0,
        };

        self.heading = s.heading;
        self.baro = s.baro;
        self.baro_diff = self.baro - STANDARD_PRESSURE;
        self.altitude =
            (f64::from(self.pressure_altitude) + self.baro_diff / PRESSURE_LAPSE) as i32;
        self.baro_altitude = self.altitude;

        if let Some(vs) = s.vertical_speed {
            let mean = smoothing.observe(Channel::VerticalSpeed, vs);
            self.vsi = mean.round_ties_even() * 10.0;
        }

        self.turn_rate = s.turn_rate;
        self.vert_g = s.vert_g;

        if let Some(slip) = s.slip_skid {
            self.slip_skid = smoothing.observe(Channel::SlipSkid, slip);
        }
    }

    fn apply_nav(&mut self, s: Nav) {
        self.time = s.time;
        self.density_altitude = s.density_altitude;
        self.tas = s.tas;
        self.nav.heading_bug = s.heading_bug;
        self.nav.altitude_bug = s.altitude_bug;
    }

    fn apply_agl(&mut self, s: Agl) {
        self.time = s.time;
        self.agl = s.agl;
        self.ground_speed = s.ground_speed;
    }

    fn apply_engine(&mut self, s: Engine) {
        self.time = s.time;

        let engine = &mut self.engine;
        engine.rpm = s.rpm;
        engine.cylinders = 4;
        engine.oil_pressure = s.oil_pressure;
        engine.fuel_pressure = s.fuel_pressure;
        engine.coolant_temp = s.coolant_temp;
        engine.oil_temp = s.oil_temp;
        engine.fuel_flow = s.fuel_flow;
        engine.manifold_pressure = s.manifold_pressure;
        engine.egt = s.egt;
        engine.cht = s.cht;

        self.fuel.levels = s.fuel_levels;
    }
}
