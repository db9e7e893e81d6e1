use thiserror::Error;
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("channel index {index} is out of range for {channel_count} channel(s)")]
    InvalidChannelIndex { index: usize, channel_count: usize },
    #[error("sample index {index} is out of range for {len} sample(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("header offset {header_offset} exceeds buffer length {buffer_len}")]
    HeaderExceedsBuffer {
        header_offset: usize,
        buffer_len: usize,
    },
    #[error("invalid waveform format: {0}")]
    InvalidFormat(String),
    #[error("surface size {width}x{height} cannot be drawn on")]
    InvalidSurface { width: u32, height: u32 },
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for PlotError {
    fn from(value: image::ImageError) -> Self {
        PlotError::Plot(value.to_string())
    }
}
