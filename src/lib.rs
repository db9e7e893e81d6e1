//! Decode interleaved binary sample buffers and draw one channel as a line plot.
//!
//! The caller owns the bytes, the surface and any state between calls; see
//! [`drivers::plot_channel`] for the stateless entry point and
//! [`drivers::ChannelPlotter`] for the cached one.
pub mod config;
pub mod drivers;
