use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::drivers::error::PlotError;
/// Fixed-width numeric encoding of a single sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleEncoding {
    U8,
    I8,
    U16Le,
    U16Be,
    I16Le,
    I16Be,
    U32Le,
    U32Be,
    I32Le,
    I32Be,
    F32Le,
    F32Be,
    F64Le,
    F64Be,
}
/// How integer samples are turned into floating point values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleScale {
    /// Keep the integer value as-is.
    #[default]
    Raw,
    /// Map the integer range onto [-1, 1).
    FullScale,
}
impl SampleEncoding {
    pub const ALL: [SampleEncoding; 14] = [
        SampleEncoding::U8,
        SampleEncoding::I8,
        SampleEncoding::U16Le,
        SampleEncoding::U16Be,
        SampleEncoding::I16Le,
        SampleEncoding::I16Be,
        SampleEncoding::U32Le,
        SampleEncoding::U32Be,
        SampleEncoding::I32Le,
        SampleEncoding::I32Be,
        SampleEncoding::F32Le,
        SampleEncoding::F32Be,
        SampleEncoding::F64Le,
        SampleEncoding::F64Be,
    ];
    /// Width of one sample in bytes.
    pub fn width(self) -> usize {
        match self {
            SampleEncoding::U8 | SampleEncoding::I8 => 1,
            SampleEncoding::U16Le
            | SampleEncoding::U16Be
            | SampleEncoding::I16Le
            | SampleEncoding::I16Be => 2,
            SampleEncoding::U32Le
            | SampleEncoding::U32Be
            | SampleEncoding::I32Le
            | SampleEncoding::I32Be
            | SampleEncoding::F32Le
            | SampleEncoding::F32Be => 4,
            SampleEncoding::F64Le | SampleEncoding::F64Be => 8,
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            SampleEncoding::U8 => "u8",
            SampleEncoding::I8 => "i8",
            SampleEncoding::U16Le => "u16le",
            SampleEncoding::U16Be => "u16be",
            SampleEncoding::I16Le => "i16le",
            SampleEncoding::I16Be => "i16be",
            SampleEncoding::U32Le => "u32le",
            SampleEncoding::U32Be => "u32be",
            SampleEncoding::I32Le => "i32le",
            SampleEncoding::I32Be => "i32be",
            SampleEncoding::F32Le => "f32le",
            SampleEncoding::F32Be => "f32be",
            SampleEncoding::F64Le => "f64le",
            SampleEncoding::F64Be => "f64be",
        }
    }
    pub fn is_float(self) -> bool {
        matches!(
            self,
            SampleEncoding::F32Le
                | SampleEncoding::F32Be
                | SampleEncoding::F64Le
                | SampleEncoding::F64Be
        )
    }
    /// Integer value that maps to zero and the magnitude that maps to 1.0 under
    /// [`SampleScale::FullScale`].
    fn full_scale(self) -> (f64, f64) {
        match self {
            SampleEncoding::U8 => (128.0, 128.0),
            SampleEncoding::I8 => (0.0, 128.0),
            SampleEncoding::U16Le | SampleEncoding::U16Be => (32768.0, 32768.0),
            SampleEncoding::I16Le | SampleEncoding::I16Be => (0.0, 32768.0),
            SampleEncoding::U32Le | SampleEncoding::U32Be => (2147483648.0, 2147483648.0),
            SampleEncoding::I32Le | SampleEncoding::I32Be => (0.0, 2147483648.0),
            _ => (0.0, 1.0),
        }
    }
    /// Representable integer range, `None` for float encodings.
    fn integer_bounds(self) -> Option<(f64, f64)> {
        match self {
            SampleEncoding::U8 => Some((0.0, u8::MAX as f64)),
            SampleEncoding::I8 => Some((i8::MIN as f64, i8::MAX as f64)),
            SampleEncoding::U16Le | SampleEncoding::U16Be => Some((0.0, u16::MAX as f64)),
            SampleEncoding::I16Le | SampleEncoding::I16Be => {
                Some((i16::MIN as f64, i16::MAX as f64))
            }
            SampleEncoding::U32Le | SampleEncoding::U32Be => Some((0.0, u32::MAX as f64)),
            SampleEncoding::I32Le | SampleEncoding::I32Be => {
                Some((i32::MIN as f64, i32::MAX as f64))
            }
            _ => None,
        }
    }
    /// Decode one sample. `bytes` must hold exactly `self.width()` bytes.
    pub fn decode(self, bytes: &[u8], scale: SampleScale) -> f64 {
        let raw = match self {
            SampleEncoding::U8 => bytes[0] as f64,
            SampleEncoding::I8 => bytes[0] as i8 as f64,
            SampleEncoding::U16Le => u16::from_le_bytes(fixed(bytes)) as f64,
            SampleEncoding::U16Be => u16::from_be_bytes(fixed(bytes)) as f64,
            SampleEncoding::I16Le => i16::from_le_bytes(fixed(bytes)) as f64,
            SampleEncoding::I16Be => i16::from_be_bytes(fixed(bytes)) as f64,
            SampleEncoding::U32Le => u32::from_le_bytes(fixed(bytes)) as f64,
            SampleEncoding::U32Be => u32::from_be_bytes(fixed(bytes)) as f64,
            SampleEncoding::I32Le => i32::from_le_bytes(fixed(bytes)) as f64,
            SampleEncoding::I32Be => i32::from_be_bytes(fixed(bytes)) as f64,
            SampleEncoding::F32Le => f32::from_le_bytes(fixed(bytes)) as f64,
            SampleEncoding::F32Be => f32::from_be_bytes(fixed(bytes)) as f64,
            SampleEncoding::F64Le => f64::from_le_bytes(fixed(bytes)),
            SampleEncoding::F64Be => f64::from_be_bytes(fixed(bytes)),
        };
        match scale {
            SampleScale::FullScale if !self.is_float() => {
                let (zero, magnitude) = self.full_scale();
                (raw - zero) / magnitude
            }
            _ => raw,
        }
    }
    /// Append `value` to `out`, clamping and rounding for integer encodings.
    pub fn encode(self, value: f64, scale: SampleScale, out: &mut Vec<u8>) {
        let value = match (scale, self.integer_bounds()) {
            (SampleScale::FullScale, Some(_)) => {
                let (zero, magnitude) = self.full_scale();
                value * magnitude + zero
            }
            _ => value,
        };
        let value = match self.integer_bounds() {
            Some((lo, hi)) => value.round().clamp(lo, hi),
            None => value,
        };
        match self {
            SampleEncoding::U8 => out.push(value as u8),
            SampleEncoding::I8 => out.push(value as i8 as u8),
            SampleEncoding::U16Le => out.extend_from_slice(&(value as u16).to_le_bytes()),
            SampleEncoding::U16Be => out.extend_from_slice(&(value as u16).to_be_bytes()),
            SampleEncoding::I16Le => out.extend_from_slice(&(value as i16).to_le_bytes()),
            SampleEncoding::I16Be => out.extend_from_slice(&(value as i16).to_be_bytes()),
            SampleEncoding::U32Le => out.extend_from_slice(&(value as u32).to_le_bytes()),
            SampleEncoding::U32Be => out.extend_from_slice(&(value as u32).to_be_bytes()),
            SampleEncoding::I32Le => out.extend_from_slice(&(value as i32).to_le_bytes()),
            SampleEncoding::I32Be => out.extend_from_slice(&(value as i32).to_be_bytes()),
            SampleEncoding::F32Le => out.extend_from_slice(&(value as f32).to_le_bytes()),
            SampleEncoding::F32Be => out.extend_from_slice(&(value as f32).to_be_bytes()),
            SampleEncoding::F64Le => out.extend_from_slice(&value.to_le_bytes()),
            SampleEncoding::F64Be => out.extend_from_slice(&value.to_be_bytes()),
        }
    }
}
fn fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}
impl fmt::Display for SampleEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for SampleEncoding {
    type Err = PlotError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SampleEncoding::ALL
            .iter()
            .copied()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| PlotError::InvalidFormat(format!("unknown sample encoding `{s}`")))
    }
}
/// Layout of a raw buffer: optional header, then interleaved frames of
/// `channel_count` samples each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformFormat {
    pub encoding: SampleEncoding,
    pub channel_count: usize,
    pub header_offset: usize,
    pub scale: SampleScale,
}
impl WaveformFormat {
    pub fn new(encoding: SampleEncoding, channel_count: usize) -> Self {
        Self {
            encoding,
            channel_count,
            ..Self::default()
        }
    }
    pub fn with_header_offset(mut self, header_offset: usize) -> Self {
        self.header_offset = header_offset;
        self
    }
    pub fn with_scale(mut self, scale: SampleScale) -> Self {
        self.scale = scale;
        self
    }
    pub fn sample_width(&self) -> usize {
        self.encoding.width()
    }
    /// Bytes per interleaved frame.
    pub fn frame_size(&self) -> usize {
        self.channel_count.saturating_mul(self.sample_width())
    }
    pub fn validate(&self) -> Result<(), PlotError> {
        if self.channel_count == 0 {
            return Err(PlotError::InvalidFormat(
                "channel count must be at least 1".into(),
            ));
        }
        if self.channel_count.checked_mul(self.sample_width()).is_none() {
            return Err(PlotError::InvalidFormat(format!(
                "{} channel(s) of {} do not fit in a frame",
                self.channel_count, self.encoding
            )));
        }
        Ok(())
    }
}
impl Default for WaveformFormat {
    fn default() -> Self {
        // Little-endian 16-bit words, single channel, no header.
        Self {
            encoding: SampleEncoding::U16Le,
            channel_count: 1,
            header_offset: 0,
            scale: SampleScale::Raw,
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn widths_match_encodings() {
        assert_eq!(SampleEncoding::U8.width(), 1);
        assert_eq!(SampleEncoding::I16Be.width(), 2);
        assert_eq!(SampleEncoding::F32Le.width(), 4);
        assert_eq!(SampleEncoding::F64Be.width(), 8);
    }
    #[test]
    fn decodes_little_and_big_endian() {
        let le = SampleEncoding::U16Le.decode(&[0x44, 0x09], SampleScale::Raw);
        let be = SampleEncoding::U16Be.decode(&[0x09, 0x44], SampleScale::Raw);
        assert_eq!(le, 0x944 as f64);
        assert_eq!(be, 0x944 as f64);
        let neg = SampleEncoding::I16Le.decode(&(-2i16).to_le_bytes(), SampleScale::Raw);
        assert_eq!(neg, -2.0);
    }
    #[test]
    fn full_scale_maps_into_unit_range() {
        let min = SampleEncoding::I16Le.decode(&i16::MIN.to_le_bytes(), SampleScale::FullScale);
        let mid = SampleEncoding::U16Le.decode(&32768u16.to_le_bytes(), SampleScale::FullScale);
        let byte = SampleEncoding::U8.decode(&[0], SampleScale::FullScale);
        assert_eq!(min, -1.0);
        assert_eq!(mid, 0.0);
        assert_eq!(byte, -1.0);
    }
    #[test]
    fn encode_clamps_integer_range() {
        let mut out = Vec::new();
        SampleEncoding::I8.encode(300.0, SampleScale::Raw, &mut out);
        SampleEncoding::I8.encode(-300.0, SampleScale::Raw, &mut out);
        assert_eq!(out, vec![127u8, 128u8]);
    }
    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("F32LE".parse::<SampleEncoding>().unwrap(), SampleEncoding::F32Le);
        assert_eq!(" i16be ".parse::<SampleEncoding>().unwrap(), SampleEncoding::I16Be);
        assert!("u24le".parse::<SampleEncoding>().is_err());
        for encoding in SampleEncoding::ALL {
            assert_eq!(encoding.to_string().parse::<SampleEncoding>().unwrap(), encoding);
        }
    }
    #[test]
    fn zero_channels_is_rejected() {
        let format = WaveformFormat::new(SampleEncoding::I16Le, 0);
        assert!(matches!(format.validate(), Err(PlotError::InvalidFormat(_))));
        assert_eq!(WaveformFormat::new(SampleEncoding::I16Le, 3).frame_size(), 6);
    }
    #[test]
    fn oversized_frame_is_rejected() {
        let format = WaveformFormat::new(SampleEncoding::I16Le, usize::MAX / 2 + 1);
        assert!(matches!(format.validate(), Err(PlotError::InvalidFormat(_))));
        assert_eq!(format.frame_size(), usize::MAX);
    }
}
