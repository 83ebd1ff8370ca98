use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Write};
use std::{error, fmt};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use sketch_traits::Codec;

use crate::interner::Interner;
use crate::sketch::{Histogram, LabelRegister, Sketch};

const MAGIC: u32 = 0x544D_5354; // "TMST"

#[derive(Debug)]
pub enum EncodeError {
    Io(io::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Io(e) => write!(f, "failed to encode sketch: {e}"),
        }
    }
}

impl error::Error for EncodeError {}

#[derive(Debug)]
pub enum DecodeError {
    BadMagic,
    Truncated,
    InvalidUtf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::BadMagic => write!(f, "input is not a timesketch binary blob"),
            DecodeError::Truncated => write!(f, "input is truncated"),
            DecodeError::InvalidUtf8 => write!(f, "label or label value is not valid utf-8"),
        }
    }
}

impl error::Error for DecodeError {}

fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    let bytes = s.as_bytes();
    w.write_u32::<BigEndian>(bytes.len() as u32)?;
    w.write_all(bytes)
}

fn read_string<R: Read>(r: &mut R) -> Result<String, DecodeError> {
    let len = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf).map_err(|_| DecodeError::Truncated)?;
    String::from_utf8(buf).map_err(|_| DecodeError::InvalidUtf8)
}

fn write_histogram<W: Write>(w: &mut W, hist: &Histogram) -> io::Result<()> {
    w.write_u32::<BigEndian>(hist.len() as u32)?;
    for (&bin, &count) in hist {
        w.write_i64::<BigEndian>(bin)?;
        w.write_u64::<BigEndian>(count)?;
    }
    Ok(())
}

fn read_histogram<R: Read>(r: &mut R) -> Result<Histogram, DecodeError> {
    let n = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
    let mut hist = Histogram::new();
    for _ in 0..n {
        let bin = r.read_i64::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
        let count = r.read_u64::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
        hist.insert(bin, count);
    }
    Ok(hist)
}

impl Codec for Sketch {
    type EncodeError = EncodeError;
    type DecodeError = DecodeError;

    fn encode(&self) -> Result<Vec<u8>, Self::EncodeError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf).map_err(EncodeError::Io)?;
        Ok(buf)
    }

    fn decode(bytes: &[u8]) -> Result<Self, Self::DecodeError> {
        let mut cursor = Cursor::new(bytes);
        Sketch::read_from(&mut cursor)
    }
}

impl Sketch {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<BigEndian>(MAGIC)?;
        w.write_f64::<BigEndian>(self.resolution)?;
        w.write_i64::<BigEndian>(self.max_time)?;

        w.write_u32::<BigEndian>(self.time_moduli.len() as u32)?;
        for (label, &modulus) in &self.time_moduli {
            write_string(w, label)?;
            w.write_u64::<BigEndian>(modulus)?;
        }

        w.write_u32::<BigEndian>(self.global.len() as u32)?;
        for (&time, hist) in &self.global {
            w.write_i64::<BigEndian>(time)?;
            write_histogram(w, hist)?;
        }

        w.write_u32::<BigEndian>(self.registers.len() as u32)?;
        for (label, register) in &self.registers {
            write_string(w, label)?;

            let values = register.interner.values();
            w.write_u32::<BigEndian>(values.len() as u32)?;
            for value in values {
                write_string(w, value)?;
            }

            w.write_u32::<BigEndian>(register.by_time.len() as u32)?;
            for (&time, by_id) in &register.by_time {
                w.write_i64::<BigEndian>(time)?;
                w.write_u32::<BigEndian>(by_id.len() as u32)?;
                for (&id, hist) in by_id {
                    w.write_u32::<BigEndian>(id)?;
                    write_histogram(w, hist)?;
                }
            }
        }

        Ok(())
    }

    fn read_from<R: Read>(r: &mut R) -> Result<Self, DecodeError> {
        let magic = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
        if magic != MAGIC {
            return Err(DecodeError::BadMagic);
        }
        let resolution = r.read_f64::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
        let max_time = r.read_i64::<BigEndian>().map_err(|_| DecodeError::Truncated)?;

        let num_labels = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
        let mut time_moduli = BTreeMap::new();
        for _ in 0..num_labels {
            let label = read_string(r)?;
            let modulus = r.read_u64::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
            time_moduli.insert(label, modulus);
        }

        let num_times = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
        let mut global = BTreeMap::new();
        for _ in 0..num_times {
            let time = r.read_i64::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
            global.insert(time, read_histogram(r)?);
        }

        let num_registers = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
        let mut registers = BTreeMap::new();
        for _ in 0..num_registers {
            let label = read_string(r)?;

            let num_values = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
            let mut values = Vec::with_capacity(num_values as usize);
            for _ in 0..num_values {
                values.push(read_string(r)?);
            }
            let interner = Interner::from_values(values);

            let num_times = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
            let mut by_time = BTreeMap::new();
            for _ in 0..num_times {
                let time = r.read_i64::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
                let num_ids = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
                let mut by_id = BTreeMap::new();
                for _ in 0..num_ids {
                    let id = r.read_u32::<BigEndian>().map_err(|_| DecodeError::Truncated)?;
                    by_id.insert(id, read_histogram(r)?);
                }
                by_time.insert(time, by_id);
            }

            registers.insert(label, LabelRegister { interner, by_time });
        }

        Ok(Sketch {
            resolution,
            max_time,
            time_moduli,
            global,
            registers,
        })
    }
}
