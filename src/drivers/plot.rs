use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use crate::drivers::error::PlotError;
use crate::drivers::surface::{PlotPoint, Surface};
/// Largest bitmap side in pixels.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    /// Stroke colours, picked by channel index.
    pub palette: Vec<[u8; 3]>,
    pub stroke_width: u32,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: [10, 10, 10],
            palette: vec![
                [255, 0, 0],
                [0, 255, 0],
                [0, 0, 255],
                [0, 255, 255],
                [255, 0, 255],
            ],
            stroke_width: 1,
        }
    }
}
impl PlotStyle {
    /// Both sides must lie in `1..=MAX_SURFACE_DIMENSION`.
    pub fn validate(&self) -> Result<(), PlotError> {
        let in_bounds = |side: u32| (1..=MAX_SURFACE_DIMENSION).contains(&side);
        if !in_bounds(self.width) || !in_bounds(self.height) {
            return Err(PlotError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
    pub fn stroke_for(&self, channel_index: usize) -> [u8; 3] {
        if self.palette.is_empty() {
            return [255, 255, 255];
        }
        self.palette[channel_index % self.palette.len()]
    }
}
fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}
/// RGB pixel buffer drawn through the plotters bitmap backend.
pub struct BitmapSurface {
    style: PlotStyle,
    stroke: [u8; 3],
    pixels: Vec<u8>,
}
impl BitmapSurface {
    pub fn new(style: PlotStyle) -> Result<Self, PlotError> {
        style.validate()?;
        let pixels = vec![0u8; (style.width as usize) * (style.height as usize) * 3];
        let stroke = style.stroke_for(0);
        Ok(Self {
            style,
            stroke,
            pixels,
        })
    }
    pub fn style(&self) -> &PlotStyle {
        &self.style
    }
    /// Use the palette colour of `channel_index` for subsequent lines.
    pub fn set_channel(&mut self, channel_index: usize) {
        self.stroke = self.style.stroke_for(channel_index);
    }
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.style.width || y >= self.style.height {
            return None;
        }
        let at = ((y as usize) * (self.style.width as usize) + x as usize) * 3;
        Some([self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]])
    }
    pub fn to_png(&self) -> Result<Vec<u8>, PlotError> {
        encode_png(&self.pixels, self.style.width, self.style.height)
    }
    fn to_pixel(&self, point: &PlotPoint) -> (i32, i32) {
        let max_x = self.style.width.saturating_sub(1) as f32;
        let max_y = self.style.height.saturating_sub(1) as f32;
        (
            point.x.round().clamp(0.0, max_x) as i32,
            point.y.round().clamp(0.0, max_y) as i32,
        )
    }
}
impl Surface for BitmapSurface {
    fn width(&self) -> u32 {
        self.style.width
    }
    fn height(&self) -> u32 {
        self.style.height
    }
    fn clear(&mut self) -> Result<(), PlotError> {
        let size = (self.style.width, self.style.height);
        let background = rgb(self.style.background);
        let root = BitMapBackend::with_buffer(&mut self.pixels, size).into_drawing_area();
        root.fill(&background)?;
        root.present()?;
        Ok(())
    }
    fn draw_polyline(&mut self, points: &[PlotPoint]) -> Result<(), PlotError> {
        let pixels: Vec<(i32, i32)> = points.iter().map(|p| self.to_pixel(p)).collect();
        let size = (self.style.width, self.style.height);
        let color = rgb(self.stroke);
        let stroke_width = self.style.stroke_width.max(1);
        let root = BitMapBackend::with_buffer(&mut self.pixels, size).into_drawing_area();
        match pixels.as_slice() {
            [] => {}
            [only] => {
                root.draw(&Circle::new(*only, stroke_width, color.filled()))?;
            }
            _ => {
                root.draw(&PathElement::new(
                    pixels,
                    color.stroke_width(stroke_width),
                ))?;
            }
        }
        root.present()?;
        Ok(())
    }
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PlotError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| PlotError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
