use log::info;
use serde::Serialize;
use crate::drivers::buffer::RawBuffer;
use crate::drivers::cache::{GeometryCache, GeometryKey};
use crate::drivers::decoder::{decode_channel, DecodeWarning};
use crate::drivers::error::PlotError;
use crate::drivers::format::WaveformFormat;
use crate::drivers::plot::{BitmapSurface, PlotStyle};
use crate::drivers::render::{compute_geometry, draw_geometry, render, RenderResult};
use crate::drivers::surface::Surface;
/// Outcome of one decode + render call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotReport {
    pub channel_index: usize,
    pub sample_count: usize,
    pub render: RenderResult,
    pub warnings: Vec<DecodeWarning>,
}
impl PlotReport {
    /// Human-readable notices for display next to the plot.
    pub fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self.warnings.iter().map(|w| w.to_string()).collect();
        if self.render.empty {
            messages.push(format!("no data for channel {}", self.channel_index));
        }
        messages
    }
}
/// Decode `channel_index` of `bytes` and draw it on `surface`.
pub fn plot_channel<S: Surface + ?Sized>(
    surface: &mut S,
    bytes: &[u8],
    channel_index: usize,
    format: &WaveformFormat,
) -> Result<PlotReport, PlotError> {
    let decoded = decode_channel(bytes, format, channel_index)?;
    let render = render(surface, &decoded.series)?;
    Ok(PlotReport {
        channel_index,
        sample_count: decoded.series.sample_count(),
        render,
        warnings: decoded.warnings,
    })
}
/// Caller-owned plotting state: the active format plus a geometry cache.
#[derive(Debug, Default)]
pub struct ChannelPlotter {
    format: WaveformFormat,
    cache: GeometryCache,
}
impl ChannelPlotter {
    pub fn new(format: WaveformFormat) -> Self {
        Self {
            format,
            cache: GeometryCache::new(),
        }
    }
    pub fn format(&self) -> &WaveformFormat {
        &self.format
    }
    pub fn set_format(&mut self, format: WaveformFormat) {
        if format != self.format {
            self.cache.invalidate();
        }
        self.format = format;
    }
    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }
    pub fn plot<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        buffer: &RawBuffer,
        channel_index: usize,
    ) -> Result<PlotReport, PlotError> {
        let decoded = decode_channel(buffer, &self.format, channel_index)?;
        let key = GeometryKey {
            buffer: buffer.id(),
            channel_index,
            width: surface.width(),
            height: surface.height(),
            format: self.format,
        };
        let geometry = self.cache.get_or_try_insert_with(key, || {
            compute_geometry(&decoded.series, key.width, key.height)
        })?;
        let render = draw_geometry(surface, geometry)?;
        info!(
            "plotted channel {} ({} samples, {} points)",
            channel_index,
            decoded.series.sample_count(),
            render.points_drawn
        );
        Ok(PlotReport {
            channel_index,
            sample_count: decoded.series.sample_count(),
            render,
            warnings: decoded.warnings,
        })
    }
}
/// Plot one channel into a fresh bitmap and encode it as PNG.
pub fn render_channel_png(
    bytes: &[u8],
    format: &WaveformFormat,
    channel_index: usize,
    style: PlotStyle,
) -> Result<(Vec<u8>, PlotReport), PlotError> {
    let mut surface = BitmapSurface::new(style)?;
    surface.set_channel(channel_index);
    let report = plot_channel(&mut surface, bytes, channel_index, format)?;
    Ok((surface.to_png()?, report))
}
