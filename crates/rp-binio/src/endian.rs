//! Byte order detection and primitive I/O.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};

/// Largest leading marker accepted by the probe. The first record of a valid
/// file is a 16 byte block header.
const PROBE_MAX: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

impl Endian {
    /// Guess the byte order from the first four bytes of a file.
    ///
    /// Big-endian wins when both interpretations are plausible.
    pub fn detect(first_marker: [u8; 4]) -> Option<Self> {
        let plausible = |v: i32| (0..PROBE_MAX).contains(&v);
        if plausible(i32::from_be_bytes(first_marker)) {
            Some(Endian::Big)
        } else if plausible(i32::from_le_bytes(first_marker)) {
            Some(Endian::Little)
        } else {
            None
        }
    }

    pub fn read_i32<R: Read + ?Sized>(self, r: &mut R) -> io::Result<i32> {
        match self {
            Endian::Big => r.read_i32::<BigEndian>(),
            Endian::Little => r.read_i32::<LittleEndian>(),
        }
    }

    pub fn read_f32<R: Read + ?Sized>(self, r: &mut R) -> io::Result<f32> {
        match self {
            Endian::Big => r.read_f32::<BigEndian>(),
            Endian::Little => r.read_f32::<LittleEndian>(),
        }
    }

    pub fn read_f64<R: Read + ?Sized>(self, r: &mut R) -> io::Result<f64> {
        match self {
            Endian::Big => r.read_f64::<BigEndian>(),
            Endian::Little => r.read_f64::<LittleEndian>(),
        }
    }

    pub fn write_i32<W: Write + ?Sized>(self, w: &mut W, v: i32) -> io::Result<()> {
        match self {
            Endian::Big => w.write_i32::<BigEndian>(v),
            Endian::Little => w.write_i32::<LittleEndian>(v),
        }
    }

    pub fn write_f32<W: Write + ?Sized>(self, w: &mut W, v: f32) -> io::Result<()> {
        match self {
            Endian::Big => w.write_f32::<BigEndian>(v),
            Endian::Little => w.write_f32::<LittleEndian>(v),
        }
    }

    pub fn write_f64<W: Write + ?Sized>(self, w: &mut W, v: f64) -> io::Result<()> {
        match self {
            Endian::Big => w.write_f64::<BigEndian>(v),
            Endian::Little => w.write_f64::<LittleEndian>(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_header_marker_in_both_orders() {
        assert_eq!(Endian::detect(16_i32.to_be_bytes()), Some(Endian::Big));
        assert_eq!(Endian::detect(16_i32.to_le_bytes()), Some(Endian::Little));
        assert_eq!(Endian::detect([0x7f, 0x45, 0x4c, 0x46]), None);
        assert_eq!(Endian::detect(20_i32.to_be_bytes()), None);
    }

    #[test]
    fn primitives_round_trip() {
        for endian in [Endian::Big, Endian::Little] {
            let mut buf = Vec::new();
            endian.write_i32(&mut buf, -7).unwrap();
            endian.write_f32(&mut buf, 1.5).unwrap();
            endian.write_f64(&mut buf, -2.25).unwrap();
            let mut r = &buf[..];
            assert_eq!(endian.read_i32(&mut r).unwrap(), -7);
            assert_eq!(endian.read_f32(&mut r).unwrap(), 1.5);
            assert_eq!(endian.read_f64(&mut r).unwrap(), -2.25);
        }
    }
}
