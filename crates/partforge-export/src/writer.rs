//! Low-level record writer
//!
//! All numbers are little-endian. Strings are a LEB128 byte length followed
//! by UTF-8 bytes.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use partforge_core::{Bounds, Color, Mat4x4, Quat, Vec2, Vec3, Vec4};

use crate::format::EntryType;

/// Append-only writer for `.mu` records and bitmap payloads
pub struct MuWriter<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> MuWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Total bytes handed to the underlying writer
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn write_entry(&mut self, entry: EntryType) -> io::Result<()> {
        self.write_i32(entry.code())
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.inner.write_i32::<LittleEndian>(value)?;
        self.bytes_written += 4;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.inner.write_f32::<LittleEndian>(value)?;
        self.bytes_written += 4;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_u8(value)?;
        self.bytes_written += 1;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> io::Result<()> {
        self.write_u8(u8::from(value))
    }

    /// Element count or pool index, rejected if it does not fit an `i32`
    pub fn write_count(&mut self, value: usize) -> io::Result<()> {
        let value = i32::try_from(value).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("count {value} exceeds the format's 32-bit range"),
            )
        })?;
        self.write_i32(value)
    }

    pub fn write_string(&mut self, value: &str) -> io::Result<()> {
        let bytes = value.as_bytes();
        let mut len = bytes.len();
        loop {
            let mut byte = (len & 0x7F) as u8;
            len >>= 7;
            if len != 0 {
                byte |= 0x80;
            }
            self.write_u8(byte)?;
            if len == 0 {
                break;
            }
        }
        self.inner.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    pub fn write_vec2(&mut self, v: Vec2) -> io::Result<()> {
        self.write_f32(v.x)?;
        self.write_f32(v.y)
    }

    pub fn write_vec3(&mut self, v: Vec3) -> io::Result<()> {
        self.write_f32(v.x)?;
        self.write_f32(v.y)?;
        self.write_f32(v.z)
    }

    pub fn write_vec4(&mut self, v: Vec4) -> io::Result<()> {
        self.write_f32(v.x)?;
        self.write_f32(v.y)?;
        self.write_f32(v.z)?;
        self.write_f32(v.w)
    }

    pub fn write_quat(&mut self, q: Quat) -> io::Result<()> {
        self.write_f32(q.x)?;
        self.write_f32(q.y)?;
        self.write_f32(q.z)?;
        self.write_f32(q.w)
    }

    pub fn write_color(&mut self, c: Color) -> io::Result<()> {
        self.write_f32(c.r)?;
        self.write_f32(c.g)?;
        self.write_f32(c.b)?;
        self.write_f32(c.a)
    }

    /// Center then size
    pub fn write_bounds(&mut self, b: Bounds) -> io::Result<()> {
        self.write_vec3(b.center)?;
        self.write_vec3(b.size)
    }

    /// Row-major, m00 first
    pub fn write_matrix(&mut self, m: &Mat4x4) -> io::Result<()> {
        for value in m.to_flat() {
            self.write_f32(value)?;
        }
        Ok(())
    }

    /// Raw bytes with no length prefix
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}
