//! Sentence layouts and their decoded records.
//!
//! Each sentence is a fixed-length run of ASCII sub-fields. Layouts are
//! expressed as packed structs of byte arrays, so a mismatch between a layout
//! and its sentence length fails to compile.

use thiserror::Error;
use zerocopy::FromBytes;

use super::field::{TimeOfDay, fahrenheit, marker, number, number_or_zero, scaled, scaled_or_zero};

/// Knots to statute miles per hour.
const KNOTS_TO_MPH: f64 = 1.15078;
/// Metres to feet.
const METRES_TO_FEET: f64 = 3.28084;

/// The version byte of a sentence did not match the supported layout.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unsupported sentence version ({found:#04x}).")]
pub struct VersionError {
    pub found: u8,
}

fn check_version(version: u8) -> Result<(), VersionError> {
    if version == b'1' {
        Ok(())
    } else {
        Err(VersionError { found: version })
    }
}

/// The kind of a decoded sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Gps,
    Attitude,
    Nav,
    Agl,
    Engine,
}

/// A fixed-length sentence decoded from its payload bytes.
pub trait Sentence: Sized {
    /// The payload bytes following the sentinel (and identifier).
    type From;

    const KIND: Kind;

    /// Decode a complete payload.
    fn decode(r: Self::From) -> Result<Self, VersionError>;
}

/// Position, altitude, and velocity from the `@` sentence.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Gps {
    pub time: TimeOfDay,
    /// `N` or `S`.
    pub lat_hemisphere: char,
    pub lat_deg: i32,
    pub lat_min: f64,
    /// `E` or `W`.
    pub lon_hemisphere: char,
    pub lon_deg: i32,
    pub lon_min: f64,
    /// Feet above mean sea level.
    pub altitude: f64,
    /// `E` or `W`.
    pub ew_direction: char,
    pub ew_velocity: f64,
    /// `N` or `S`.
    pub ns_direction: char,
    pub ns_velocity: f64,
    /// `U` or `D`.
    pub vertical_direction: char,
    /// Negative when descending.
    pub vertical_velocity: f64,
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct GpsLayout {
    _year: [u8; 2],
    _month: [u8; 2],
    _day: [u8; 2],
    hour: [u8; 2],
    minute: [u8; 2],
    second: [u8; 2],
    lat_hemisphere: [u8; 1],
    lat_deg: [u8; 2],
    lat_min: [u8; 5],
    lon_hemisphere: [u8; 1],
    lon_deg: [u8; 3],
    lon_min: [u8; 5],
    _position_status: [u8; 1],
    _horizontal_error: [u8; 3],
    altitude: [u8; 6],
    ew_direction: [u8; 1],
    ew_velocity: [u8; 4],
    ns_direction: [u8; 1],
    ns_velocity: [u8; 4],
    vertical_direction: [u8; 1],
    vertical_velocity: [u8; 4],
    _terminator: [u8; 2],
}

impl Sentence for Gps {
    type From = [u8; 56];

    const KIND: Kind = Kind::Gps;

    fn decode(r: Self::From) -> Result<Self, VersionError> {
        let GpsLayout {
            hour,
            minute,
            second,
            lat_hemisphere,
            lat_deg,
            lat_min,
            lon_hemisphere,
            lon_deg,
            lon_min,
            altitude,
            ew_direction,
            ew_velocity,
            ns_direction,
            ns_velocity,
            vertical_direction,
            vertical_velocity,
            ..
        } = zerocopy::transmute!(r);

        let vertical_direction = marker(vertical_direction);
        let sign = if vertical_direction == 'D' { -1.0 } else { 1.0 };

        Ok(Self {
            time: TimeOfDay::from_fields(hour, minute, second),
            lat_hemisphere: marker(lat_hemisphere),
            lat_deg: number_or_zero(&lat_deg),
            lat_min: scaled_or_zero(&lat_min, 0.001),
            lon_hemisphere: marker(lon_hemisphere),
            lon_deg: number_or_zero(&lon_deg),
            lon_min: scaled_or_zero(&lon_min, 0.001),
            altitude: scaled_or_zero(&altitude, METRES_TO_FEET),
            ew_direction: marker(ew_direction),
            ew_velocity: scaled_or_zero(&ew_velocity, 0.1),
            ns_direction: marker(ns_direction),
            ns_velocity: scaled_or_zero(&ns_velocity, 0.1),
            vertical_direction,
            vertical_velocity: scaled_or_zero(&vertical_velocity, 0.01) * sign,
        })
    }
}

/// Attitude and air data (identifier `1`).
///
/// Channels that are smoothed downstream keep `None` for placeholders, since
/// a missing sample is treated differently from a zero one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Attitude {
    pub time: TimeOfDay,
    /// Degrees.
    pub pitch: Option<f64>,
    /// Degrees.
    pub roll: f64,
    /// Magnetic heading in degrees.
    pub heading: i32,
    /// Indicated airspeed in miles per hour.
    pub ias: f64,
    /// Pressure altitude in feet.
    pub pressure_altitude: i32,
    /// Degrees per second.
    pub turn_rate: f64,
    /// Lateral acceleration in g.
    pub slip_skid: Option<f64>,
    /// Vertical acceleration in g.
    pub vert_g: f64,
    pub aoa: Option<f64>,
    /// Vertical speed in tens of feet per minute.
    pub vertical_speed: Option<f64>,
    /// Outside air temperature in Fahrenheit.
    pub oat: f64,
    /// Altimeter setting in inches of mercury, or zero if absent.
    pub baro: f64,
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct AttitudeLayout {
    version: u8,
    hour: [u8; 2],
    minute: [u8; 2],
    second: [u8; 2],
    _second_fraction: [u8; 2],
    pitch: [u8; 4],
    roll: [u8; 5],
    heading: [u8; 3],
    airspeed: [u8; 4],
    pressure_altitude: [u8; 6],
    turn_rate: [u8; 4],
    lateral_acceleration: [u8; 3],
    vertical_acceleration: [u8; 3],
    aoa: [u8; 2],
    vertical_speed: [u8; 4],
    oat: [u8; 3],
    altimeter_setting: [u8; 3],
    _checksum: [u8; 2],
    _terminator: [u8; 2],
}

impl Sentence for Attitude {
    type From = [u8; 57];

    const KIND: Kind = Kind::Attitude;

    fn decode(r: Self::From) -> Result<Self, VersionError> {
        let AttitudeLayout {
            version,
            hour,
            minute,
            second,
            pitch,
            roll,
            heading,
            airspeed,
            pressure_altitude,
            turn_rate,
            lateral_acceleration,
            vertical_acceleration,
            aoa,
            vertical_speed,
            oat,
            altimeter_setting,
            ..
        } = zerocopy::transmute!(r);

        check_version(version)?;

        Ok(Self {
            time: TimeOfDay::from_fields(hour, minute, second),
            pitch: scaled(&pitch, 0.1),
            roll: scaled_or_zero(&roll, 0.1),
            heading: number_or_zero(&heading),
            ias: scaled_or_zero(&airspeed, 0.1 * KNOTS_TO_MPH),
            pressure_altitude: number_or_zero(&pressure_altitude),
            turn_rate: scaled_or_zero(&turn_rate, 0.1),
            slip_skid: scaled(&lateral_acceleration, 0.01),
            vert_g: scaled_or_zero(&vertical_acceleration, 0.1),
            aoa: number(&aoa).map(f64::from),
            vertical_speed: number(&vertical_speed).map(f64::from),
            oat: fahrenheit(&oat, 1.0),
            baro: number(&altimeter_setting).map_or(0.0, |x| (f64::from(x) + 2750.0) / 100.0),
        })
    }
}

/// Air data and autopilot references (identifier `2`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Nav {
    pub time: TimeOfDay,
    /// True airspeed in miles per hour.
    pub tas: f64,
    /// Density altitude in feet.
    pub density_altitude: i32,
    pub heading_bug: i32,
    pub altitude_bug: i32,
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct NavLayout {
    version: u8,
    hour: [u8; 2],
    minute: [u8; 2],
    second: [u8; 2],
    _second_fraction: [u8; 2],
    tas: [u8; 4],
    density_altitude: [u8; 6],
    heading_bug: [u8; 3],
    altitude_bug: [u8; 6],
    _airspeed_bug: [u8; 4],
    _vertical_speed_bug: [u8; 4],
    _checksum: [u8; 2],
    _terminator: [u8; 2],
}

impl Sentence for Nav {
    type From = [u8; 40];

    const KIND: Kind = Kind::Nav;

    fn decode(r: Self::From) -> Result<Self, VersionError> {
        let NavLayout {
            version,
            hour,
            minute,
            second,
            tas,
            density_altitude,
            heading_bug,
            altitude_bug,
            ..
        } = zerocopy::transmute!(r);

        check_version(version)?;

        Ok(Self {
            time: TimeOfDay::from_fields(hour, minute, second),
            tas: scaled_or_zero(&tas, 0.1 * KNOTS_TO_MPH),
            density_altitude: number_or_zero(&density_altitude),
            heading_bug: number_or_zero(&heading_bug),
            altitude_bug: number_or_zero(&altitude_bug),
        })
    }
}

/// Height above ground and groundspeed (identifier `7`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Agl {
    pub time: TimeOfDay,
    /// Feet above ground level.
    pub agl: i32,
    /// Miles per hour.
    pub ground_speed: f64,
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct AglLayout {
    version: u8,
    hour: [u8; 2],
    minute: [u8; 2],
    second: [u8; 2],
    _second_fraction: [u8; 2],
    agl: [u8; 3],
    ground_speed: [u8; 4],
    _checksum: [u8; 2],
    _terminator: [u8; 2],
}

impl Sentence for Agl {
    type From = [u8; 20];

    const KIND: Kind = Kind::Agl;

    fn decode(r: Self::From) -> Result<Self, VersionError> {
        let AglLayout {
            version,
            hour,
            minute,
            second,
            agl,
            ground_speed,
            ..
        } = zerocopy::transmute!(r);

        check_version(version)?;

        Ok(Self {
            time: TimeOfDay::from_fields(hour, minute, second),
            agl: number(&agl).map_or(0, |x| x * 100),
            ground_speed: scaled_or_zero(&ground_speed, 0.1 * KNOTS_TO_MPH),
        })
    }
}

/// Engine and fuel data (identifier `3`).
///
/// Temperatures are in Fahrenheit. Channels are indexed from cylinder or tank
/// one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Engine {
    pub time: TimeOfDay,
    pub rpm: i32,
    pub oil_pressure: i32,
    pub oil_temp: f64,
    pub fuel_pressure: f64,
    pub fuel_flow: f64,
    pub manifold_pressure: f64,
    pub coolant_temp: f64,
    pub egt: [f64; 6],
    pub cht: [f64; 6],
    pub fuel_levels: [f64; 4],
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct EngineLayout {
    _version: u8,
    hour: [u8; 2],
    minute: [u8; 2],
    second: [u8; 2],
    _second_fraction: [u8; 2],
    oil_pressure: [u8; 3],
    oil_temp: [u8; 4],
    rpm: [u8; 4],
    _unused: [u8; 4],
    manifold_pressure: [u8; 3],
    fuel_flow: [u8; 3],
    _unused2: [u8; 3],
    fuel_pressure: [u8; 3],
    fuel_quantity1: [u8; 3],
    fuel_quantity2: [u8; 3],
    _fuel_remaining: [u8; 3],
    _volts1: [u8; 3],
    _volts2: [u8; 3],
    _amps1: [u8; 4],
    _hobbs: [u8; 5],
    _tach: [u8; 5],
    cht6: [u8; 4],
    egt6: [u8; 4],
    cht5: [u8; 4],
    egt5: [u8; 4],
    cht4: [u8; 4],
    egt4: [u8; 4],
    cht3: [u8; 4],
    egt3: [u8; 4],
    cht2: [u8; 4],
    egt2: [u8; 4],
    cht1: [u8; 4],
    egt1: [u8; 4],
    _tit1: [u8; 4],
    _tit2: [u8; 4],
    _elevator_trim: [u8; 6],
    _flaps: [u8; 6],
    _carb_temp: [u8; 6],
    _coolant_pressure: [u8; 6],
    coolant_temp: [u8; 5],
    _coolant_temp_units: [u8; 1],
    _amps2: [u8; 6],
    _aileron_trim: [u8; 6],
    _rudder_trim: [u8; 6],
    fuel_quantity3: [u8; 5],
    _fuel_quantity3_units: [u8; 1],
    fuel_quantity4: [u8; 5],
    _fuel_quantity4_units: [u8; 1],
    _unused3: [u8; 18],
    _discretes: [u8; 4],
    _unused4: [u8; 12],
    _checksum: [u8; 2],
    _terminator: [u8; 2],
}

impl Sentence for Engine {
    type From = [u8; 219];

    const KIND: Kind = Kind::Engine;

    /// The engine sentence carries a version byte, but it is not checked.
    fn decode(r: Self::From) -> Result<Self, VersionError> {
        let EngineLayout {
            hour,
            minute,
            second,
            oil_pressure,
            oil_temp,
            rpm,
            manifold_pressure,
            fuel_flow,
            fuel_pressure,
            fuel_quantity1,
            fuel_quantity2,
            cht6,
            egt6,
            cht5,
            egt5,
            cht4,
            egt4,
            cht3,
            egt3,
            cht2,
            egt2,
            cht1,
            egt1,
            coolant_temp,
            fuel_quantity3,
            fuel_quantity4,
            ..
        } = zerocopy::transmute!(r);

        let temps = |channels: [[u8; 4]; 6]| channels.map(|r| fahrenheit(&r, 1.0));
        let tenths = |r: &[u8]| scaled_or_zero(r, 0.1);

        Ok(Self {
            time: TimeOfDay::from_fields(hour, minute, second),
            rpm: number_or_zero(&rpm),
            oil_pressure: number_or_zero(&oil_pressure),
            oil_temp: fahrenheit(&oil_temp, 1.0),
            fuel_pressure: tenths(&fuel_pressure),
            fuel_flow: tenths(&fuel_flow),
            manifold_pressure: tenths(&manifold_pressure),
            coolant_temp: fahrenheit(&coolant_temp, 10.0),
            egt: temps([egt1, egt2, egt3, egt4, egt5, egt6]),
            cht: temps([cht1, cht2, cht3, cht4, cht5, cht6]),
            fuel_levels: [
                tenths(&fuel_quantity1),
                tenths(&fuel_quantity2),
                tenths(&fuel_quantity3),
                tenths(&fuel_quantity4),
            ],
        })
    }
}

/// A decoded sentence of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Gps(Gps),
    Attitude(Attitude),
    Nav(Nav),
    Agl(Agl),
    Engine(Engine),
}

impl Record {
    pub fn kind(&self) -> Kind {
        match self {
            Record::Gps(_) => Kind::Gps,
            Record::Attitude(_) => Kind::Attitude,
            Record::Nav(_) => Kind::Nav,
            Record::Agl(_) => Kind::Agl,
            Record::Engine(_) => Kind::Engine,
        }
    }
}

macro_rules! record_from {
    ($($t:ident),*) => {
        $(
            impl From<$t> for Record {
                fn from(s: $t) -> Self {
                    Record::$t(s)
                }
            }
        )*
    };
}

record_from!(Gps, Attitude, Nav, Agl, Engine);
