// src/drivers/mod.rs
pub mod buffer;
pub mod cache;
pub mod decoder;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod plot;
pub mod render;
pub mod surface;
pub use buffer::{BufferId, RawBuffer};
pub use cache::{GeometryCache, GeometryKey};
pub use decoder::{decode_channel, encode_frames, DecodeWarning, Decoded, SampleSeries};
pub use error::PlotError;
pub use format::{SampleEncoding, SampleScale, WaveformFormat};
pub use pipeline::{plot_channel, render_channel_png, ChannelPlotter, PlotReport};
pub use plot::{BitmapSurface, PlotStyle, MAX_SURFACE_DIMENSION};
pub use render::{compute_geometry, draw_geometry, render, PlotGeometry, RenderResult};
pub use surface::{DrawCommand, PlotPoint, RecordingSurface, Surface};
