#![allow(dead_code)]

use std::{
    io::{self, Cursor, Read},
    time::Duration,
};

use g3x::avec::{Decoder, Device, Live, Playback};

/// Concatenate sub-fields into a sentence payload, terminated by CR LF.
pub fn payload(fields: &[&str], len: usize) -> Vec<u8> {
    let mut r: Vec<u8> = fields.concat().into_bytes();
    r.extend_from_slice(b"\r\n");
    assert_eq!(r.len(), len, "payload length");
    r
}

/// Prefix a payload with its tagged sentinel and identifier.
pub fn tagged(id: u8, payload: &[u8]) -> Vec<u8> {
    let mut r = vec![b'=', id];
    r.extend_from_slice(payload);
    r
}

pub struct AttitudeFields<'a> {
    pub version: &'a str,
    pub time: &'a str,
    pub pitch: &'a str,
    pub roll: &'a str,
    pub heading: &'a str,
    pub airspeed: &'a str,
    pub pressure_altitude: &'a str,
    pub turn_rate: &'a str,
    pub lateral_acceleration: &'a str,
    pub vertical_acceleration: &'a str,
    pub aoa: &'a str,
    pub vertical_speed: &'a str,
    pub oat: &'a str,
    pub altimeter_setting: &'a str,
}

impl Default for AttitudeFields<'_> {
    fn default() -> Self {
        Self {
            version: "1",
            time: "12345600",
            pitch: "+045",
            roll: "-0123",
            heading: "270",
            airspeed: "1000",
            pressure_altitude: "005500",
            turn_rate: "+010",
            lateral_acceleration: "-05",
            vertical_acceleration: "+10",
            aoa: "07",
            vertical_speed: "+050",
            oat: "+15",
            altimeter_setting: "243",
        }
    }
}

impl AttitudeFields<'_> {
    pub fn payload(&self) -> Vec<u8> {
        payload(
            &[
                self.version,
                self.time,
                self.pitch,
                self.roll,
                self.heading,
                self.airspeed,
                self.pressure_altitude,
                self.turn_rate,
                self.lateral_acceleration,
                self.vertical_acceleration,
                self.aoa,
                self.vertical_speed,
                self.oat,
                self.altimeter_setting,
                "7F",
            ],
            57,
        )
    }

    pub fn sentence(&self) -> Vec<u8> {
        tagged(b'1', &self.payload())
    }
}

pub struct GpsFields<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub latitude: &'a str,
    pub longitude: &'a str,
    pub status: &'a str,
    pub altitude: &'a str,
    pub ew_velocity: &'a str,
    pub ns_velocity: &'a str,
    pub vertical_velocity: &'a str,
}

impl Default for GpsFields<'_> {
    fn default() -> Self {
        Self {
            date: "240618",
            time: "140509",
            latitude: "N4712345",
            longitude: "W12254321",
            status: "3005",
            altitude: "+00300",
            ew_velocity: "E0123",
            ns_velocity: "N0045",
            vertical_velocity: "D0150",
        }
    }
}

impl GpsFields<'_> {
    pub fn payload(&self) -> Vec<u8> {
        payload(
            &[
                self.date,
                self.time,
                self.latitude,
                self.longitude,
                self.status,
                self.altitude,
                self.ew_velocity,
                self.ns_velocity,
                self.vertical_velocity,
            ],
            56,
        )
    }

    pub fn sentence(&self) -> Vec<u8> {
        let mut r = vec![b'@'];
        r.extend_from_slice(&self.payload());
        r
    }
}

pub fn nav_payload(version: &str) -> Vec<u8> {
    payload(
        &[
            version, "12345700", "1200", "+04500", "090", "008500", "____", "____", "00",
        ],
        40,
    )
}

pub fn agl_payload(version: &str, agl: &str, ground_speed: &str) -> Vec<u8> {
    payload(&[version, "12345800", agl, ground_speed, "00"], 20)
}

pub fn engine_payload() -> Vec<u8> {
    let mut temps = String::new();
    for cylinder in (1..=6).rev() {
        temps.push_str(&format!("{:04}", 180 + cylinder));
        temps.push_str(&format!("{:04}", 700 + cylinder));
    }

    payload(
        &[
            "1",
            "12345900",
            "065",
            "0180",
            "2400",
            "____",
            "245",
            "085",
            "___",
            "055",
            "150",
            "140",
            "290",
            "138",
            "137",
            "+125",
            "01234",
            "01200",
            temps.as_str(),
            "________",
            "______".repeat(4).as_str(),
            "+0850C",
            "______".repeat(3).as_str(),
            "00120G",
            "00110G",
            "_".repeat(18).as_str(),
            "0000",
            "_".repeat(12).as_str(),
            "00",
        ],
        219,
    )
}

pub fn playback(bytes: Vec<u8>) -> Decoder<Playback<Cursor<Vec<u8>>>> {
    let source = Playback::new(Cursor::new(bytes));
    Decoder::new(source).with_playback_delay(Duration::ZERO)
}

/// A serial device stand-in. Reads time out once its data is exhausted.
#[derive(Debug)]
pub struct MockDevice {
    pub data: Cursor<Vec<u8>>,
    pub cleared: usize,
    pub disconnected: bool,
}

impl MockDevice {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: Cursor::new(data),
            cleared: 0,
            disconnected: false,
        }
    }
}

impl Read for MockDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.disconnected {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "device unplugged",
            ));
        }

        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out")),
            n => Ok(n),
        }
    }
}

impl Device for MockDevice {
    fn clear_input(&mut self) -> io::Result<()> {
        self.cleared += 1;
        self.data.set_position(self.data.get_ref().len() as u64);
        Ok(())
    }
}

pub fn live(bytes: Vec<u8>) -> Decoder<Live<MockDevice>> {
    Decoder::new(Live::new(MockDevice::new(bytes)))
}

pub fn assert_close(found: f64, expected: f64) {
    assert!(
        (found - expected).abs() < 1e-9,
        "expected {expected}, found {found}"
    );
}
