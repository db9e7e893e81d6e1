use std::fmt;
use std::ops::Range;
use log::{debug, warn};
use serde::Serialize;
use crate::drivers::error::PlotError;
use crate::drivers::format::{SampleEncoding, SampleScale, WaveformFormat};
/// Non-fatal findings of a decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// Trailing bytes that did not fill a whole frame were ignored.
    TruncatedInput { trailing_bytes: usize },
    /// Not a single complete frame was present.
    BufferTooSmall { usable_bytes: usize, frame_size: usize },
}
impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::TruncatedInput { trailing_bytes } => write!(
                f,
                "ignored {trailing_bytes} trailing byte(s) that do not form a complete frame"
            ),
            DecodeWarning::BufferTooSmall {
                usable_bytes,
                frame_size,
            } => write!(
                f,
                "buffer holds {usable_bytes} byte(s) of data, less than one {frame_size}-byte frame"
            ),
        }
    }
}
/// Lazy view of one channel inside an interleaved buffer.
///
/// Sample `n` lives at `header_offset + n * frame_size + channel_index * sample_width`.
#[derive(Clone, Copy, Debug)]
pub struct SampleSeries<'a> {
    bytes: &'a [u8],
    encoding: SampleEncoding,
    scale: SampleScale,
    channel_index: usize,
    first_offset: usize,
    frame_size: usize,
    frame_count: usize,
}
impl<'a> SampleSeries<'a> {
    /// A series with no samples.
    pub fn empty() -> Self {
        Self {
            bytes: &[],
            encoding: SampleEncoding::U8,
            scale: SampleScale::Raw,
            channel_index: 0,
            first_offset: 0,
            frame_size: 1,
            frame_count: 0,
        }
    }
    pub fn sample_count(&self) -> usize {
        self.frame_count
    }
    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }
    pub fn channel_index(&self) -> usize {
        self.channel_index
    }
    pub fn sample_at(&self, index: usize) -> Result<f64, PlotError> {
        if index >= self.frame_count {
            return Err(PlotError::IndexOutOfRange {
                index,
                len: self.frame_count,
            });
        }
        Ok(self.read(index))
    }
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter_range(0..self.frame_count)
    }
    /// Samples in `range`, clipped to the series length.
    pub fn iter_range(&self, range: Range<usize>) -> impl Iterator<Item = f64> + '_ {
        let end = range.end.min(self.frame_count);
        let start = range.start.min(end);
        (start..end).map(move |n| self.read(n))
    }
    fn read(&self, n: usize) -> f64 {
        let start = self.first_offset + n * self.frame_size;
        let width = self.encoding.width();
        self.encoding
            .decode(&self.bytes[start..start + width], self.scale)
    }
}
/// Result of [`decode_channel`].
#[derive(Clone, Debug)]
pub struct Decoded<'a> {
    pub series: SampleSeries<'a>,
    pub warnings: Vec<DecodeWarning>,
}
pub fn decode_channel<'a>(
    bytes: &'a [u8],
    format: &WaveformFormat,
    channel_index: usize,
) -> Result<Decoded<'a>, PlotError> {
    format.validate()?;
    if channel_index >= format.channel_count {
        return Err(PlotError::InvalidChannelIndex {
            index: channel_index,
            channel_count: format.channel_count,
        });
    }
    if bytes.len() < format.header_offset {
        return Err(PlotError::HeaderExceedsBuffer {
            header_offset: format.header_offset,
            buffer_len: bytes.len(),
        });
    }
    let usable = bytes.len() - format.header_offset;
    let frame_size = format.frame_size();
    let frame_count = usable / frame_size;
    let trailing = usable % frame_size;
    let mut warnings = Vec::new();
    if frame_count == 0 && usable > 0 {
        warnings.push(DecodeWarning::BufferTooSmall {
            usable_bytes: usable,
            frame_size,
        });
    } else if trailing > 0 {
        warnings.push(DecodeWarning::TruncatedInput {
            trailing_bytes: trailing,
        });
    }
    for warning in &warnings {
        warn!("channel {channel_index}: {warning}");
    }
    debug!(
        "decoded channel {}/{} as {} ({} frames of {} bytes, header {})",
        channel_index,
        format.channel_count,
        format.encoding,
        frame_count,
        frame_size,
        format.header_offset
    );
    Ok(Decoded {
        series: SampleSeries {
            bytes,
            encoding: format.encoding,
            scale: format.scale,
            channel_index,
            first_offset: format.header_offset + channel_index * format.sample_width(),
            frame_size,
            frame_count,
        },
        warnings,
    })
}
/// Build an interleaved buffer from per-channel samples (channels x samples).
/// The header region is zero-filled.
pub fn encode_frames(format: &WaveformFormat, channels: &[Vec<f64>]) -> Result<Vec<u8>, PlotError> {
    format.validate()?;
    if channels.len() != format.channel_count {
        return Err(PlotError::InvalidFormat(format!(
            "expected {} channel(s), got {}",
            format.channel_count,
            channels.len()
        )));
    }
    let frames = channels.first().map(|c| c.len()).unwrap_or(0);
    if channels.iter().any(|c| c.len() != frames) {
        return Err(PlotError::InvalidFormat(
            "all channels must hold the same number of samples".into(),
        ));
    }
    let mut out = Vec::with_capacity(format.header_offset + frames * format.frame_size());
    out.resize(format.header_offset, 0);
    for n in 0..frames {
        for channel in channels {
            format.encoding.encode(channel[n], format.scale, &mut out);
        }
    }
    Ok(out)
}
