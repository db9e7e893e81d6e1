use log::debug;
use serde::Serialize;
use crate::drivers::decoder::SampleSeries;
use crate::drivers::error::PlotError;
use crate::drivers::surface::{PlotPoint, Surface};
/// Relative half-height given to a flat signal so the vertical scale never collapses.
pub const FLAT_SIGNAL_EPSILON: f64 = 1e-6;
/// Screen geometry for one channel. Holds at most `2 * width` points.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotGeometry {
    pub points: Vec<PlotPoint>,
    /// Value range mapped onto the surface height, `None` when nothing is plotted.
    pub value_range: Option<(f64, f64)>,
    pub downsampled: bool,
}
impl PlotGeometry {
    fn empty() -> Self {
        Self {
            points: Vec::new(),
            value_range: None,
            downsampled: false,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderResult {
    pub empty: bool,
    pub value_range: Option<(f64, f64)>,
    pub downsampled: bool,
    pub points_drawn: usize,
}
#[derive(Clone, Copy, Debug)]
struct Extreme {
    index: usize,
    value: f64,
}
/// Minimum and maximum of one bucket.
#[derive(Clone, Copy, Debug)]
struct Bucket {
    min: Extreme,
    max: Extreme,
}
impl Bucket {
    fn start(index: usize, value: f64) -> Self {
        let e = Extreme { index, value };
        Self { min: e, max: e }
    }
    fn push(&mut self, index: usize, value: f64) {
        if value < self.min.value {
            self.min = Extreme { index, value };
        }
        if value > self.max.value {
            self.max = Extreme { index, value };
        }
    }
}
fn ensure_surface(width: u32, height: u32) -> Result<(), PlotError> {
    if width == 0 || height == 0 {
        return Err(PlotError::InvalidSurface { width, height });
    }
    Ok(())
}
fn merge_range(range: Option<(f64, f64)>, lo: f64, hi: f64) -> Option<(f64, f64)> {
    Some(match range {
        Some((a, b)) => (a.min(lo), b.max(hi)),
        None => (lo, hi),
    })
}
fn widen_flat((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        return (lo, hi);
    }
    let eps = FLAT_SIGNAL_EPSILON * lo.abs().max(1.0);
    ((lo - eps).max(f64::MIN), (hi + eps).min(f64::MAX))
}
/// Maps values onto `[0, height]`, larger values nearer the top.
///
/// Works on halved operands so ranges wider than `f64::MAX` stay finite.
struct YAxis {
    half_lo: f64,
    half_span: f64,
    height: f64,
}
impl YAxis {
    fn new((lo, hi): (f64, f64), height: u32) -> Self {
        Self {
            half_lo: lo / 2.0,
            half_span: hi / 2.0 - lo / 2.0,
            height: height as f64,
        }
    }
    fn map(&self, value: f64) -> f32 {
        (self.height * (1.0 - (value / 2.0 - self.half_lo) / self.half_span)) as f32
    }
}
/// Turn a series into screen points for a `width` x `height` surface.
///
/// When there are more samples than pixel columns the series is split into
/// `width` buckets by index (the last one takes the remainder) and each bucket
/// contributes its minimum and maximum, in the order they occurred. Otherwise
/// every sample becomes one point at `x = i * width / sample_count`.
/// Non-finite samples are skipped.
pub fn compute_geometry(
    series: &SampleSeries<'_>,
    width: u32,
    height: u32,
) -> Result<PlotGeometry, PlotError> {
    ensure_surface(width, height)?;
    let count = series.sample_count();
    let columns = width as usize;
    if count == 0 {
        return Ok(PlotGeometry::empty());
    }
    if count <= columns {
        let mut range = None;
        for value in series.iter().filter(|v| v.is_finite()) {
            range = merge_range(range, value, value);
        }
        let Some(range) = range.map(widen_flat) else {
            return Ok(PlotGeometry::empty());
        };
        let axis = YAxis::new(range, height);
        let step = width as f64 / count as f64;
        let points = series
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| PlotPoint::new((i as f64 * step) as f32, axis.map(v)))
            .collect();
        return Ok(PlotGeometry {
            points,
            value_range: Some(range),
            downsampled: false,
        });
    }
    let bucket_len = count / columns;
    let mut buckets: Vec<Option<Bucket>> = Vec::with_capacity(columns);
    let mut range = None;
    for b in 0..columns {
        let start = b * bucket_len;
        let end = if b + 1 == columns { count } else { start + bucket_len };
        let mut bucket: Option<Bucket> = None;
        for (offset, value) in series.iter_range(start..end).enumerate() {
            if !value.is_finite() {
                continue;
            }
            let index = start + offset;
            match bucket.as_mut() {
                Some(bucket) => bucket.push(index, value),
                None => bucket = Some(Bucket::start(index, value)),
            }
        }
        if let Some(bucket) = &bucket {
            range = merge_range(range, bucket.min.value, bucket.max.value);
        }
        buckets.push(bucket);
    }
    let Some(range) = range.map(widen_flat) else {
        return Ok(PlotGeometry::empty());
    };
    let axis = YAxis::new(range, height);
    let mut points = Vec::with_capacity(columns * 2);
    for (column, bucket) in buckets.iter().enumerate() {
        let Some(bucket) = bucket else { continue };
        let x = column as f32;
        let (first, second) = if bucket.min.index <= bucket.max.index {
            (bucket.min, bucket.max)
        } else {
            (bucket.max, bucket.min)
        };
        points.push(PlotPoint::new(x, axis.map(first.value)));
        if first.index != second.index {
            points.push(PlotPoint::new(x, axis.map(second.value)));
        }
    }
    Ok(PlotGeometry {
        points,
        value_range: Some(range),
        downsampled: true,
    })
}
/// Clear the surface and draw the geometry as one polyline.
pub fn draw_geometry<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &PlotGeometry,
) -> Result<RenderResult, PlotError> {
    ensure_surface(surface.width(), surface.height())?;
    surface.clear()?;
    if !geometry.is_empty() {
        surface.draw_polyline(&geometry.points)?;
    }
    Ok(RenderResult {
        empty: geometry.is_empty(),
        value_range: geometry.value_range,
        downsampled: geometry.downsampled,
        points_drawn: geometry.points.len(),
    })
}
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    series: &SampleSeries<'_>,
) -> Result<RenderResult, PlotError> {
    let geometry = compute_geometry(series, surface.width(), surface.height())?;
    debug!(
        "rendering {} sample(s) as {} point(s) on {}x{} (downsampled: {})",
        series.sample_count(),
        geometry.points.len(),
        surface.width(),
        surface.height(),
        geometry.downsampled
    );
    draw_geometry(surface, &geometry)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::decoder::{decode_channel, encode_frames};
    use crate::drivers::format::{SampleEncoding, WaveformFormat};
    use crate::drivers::surface::{DrawCommand, RecordingSurface};
    fn f64_buffer(values: &[f64]) -> Vec<u8> {
        let format = WaveformFormat::new(SampleEncoding::F64Le, 1);
        encode_frames(&format, &[values.to_vec()]).unwrap()
    }
    fn render_values(values: &[f64], width: u32, height: u32) -> (RenderResult, RecordingSurface) {
        let bytes = f64_buffer(values);
        let format = WaveformFormat::new(SampleEncoding::F64Le, 1);
        let decoded = decode_channel(&bytes, &format, 0).unwrap();
        let mut surface = RecordingSurface::new(width, height);
        let result = render(&mut surface, &decoded.series).unwrap();
        (result, surface)
    }
    #[test]
    fn empty_series_only_clears() {
        let mut surface = RecordingSurface::new(100, 50);
        let result = render(&mut surface, &SampleSeries::empty()).unwrap();
        assert!(result.empty);
        assert_eq!(result.points_drawn, 0);
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
    }
    #[test]
    fn zero_sized_surface_is_invalid() {
        let mut surface = RecordingSurface::new(0, 50);
        let err = render(&mut surface, &SampleSeries::empty()).unwrap_err();
        assert!(matches!(err, PlotError::InvalidSurface { width: 0, height: 50 }));
        assert!(surface.commands().is_empty());
    }
    #[test]
    fn one_point_per_sample_when_it_fits() {
        let values: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let (result, surface) = render_values(&values, 100, 60);
        assert!(!result.downsampled);
        assert!(!result.empty);
        let points = surface.plotted_points();
        assert_eq!(points.len(), 40);
        assert_eq!(result.points_drawn, 40);
        for pair in points.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!(pair[1].y < pair[0].y, "larger values must sit higher");
        }
        assert_eq!(points[0].y, 60.0);
        assert_eq!(points[39].y, 0.0);
        assert_eq!(result.value_range, Some((0.0, 39.0)));
    }
    #[test]
    fn downsampling_keeps_extremes() {
        let mut values: Vec<f64> = (0..10_000).map(|i| (i as f64 * 0.01).sin()).collect();
        values[4321] = 25.0;
        values[777] = -30.0;
        let (result, surface) = render_values(&values, 200, 80);
        assert!(result.downsampled);
        let points = surface.plotted_points();
        assert!(points.len() <= 400);
        assert_eq!(result.value_range, Some((-30.0, 25.0)));
        assert!(points.iter().any(|p| p.y == 0.0), "peak must survive");
        assert!(points.iter().any(|p| p.y == 80.0), "trough must survive");
        assert!(points.iter().all(|p| p.x >= 0.0 && p.x < 200.0));
    }
    #[test]
    fn last_bucket_absorbs_remainder() {
        let mut values = vec![0.0; 25];
        values[24] = 9.0;
        let (result, surface) = render_values(&values, 10, 10);
        assert!(result.downsampled);
        let points = surface.plotted_points();
        let last = points.last().unwrap();
        assert_eq!(last.x, 9.0);
        assert_eq!(last.y, 0.0);
    }
    #[test]
    fn flat_signal_stays_finite() {
        let (result, surface) = render_values(&[3.5; 20], 50, 40);
        let (lo, hi) = result.value_range.unwrap();
        assert!(lo < 3.5 && hi > 3.5);
        for p in surface.plotted_points() {
            assert!(p.y.is_finite());
            assert!((p.y - 20.0).abs() < 1e-3);
        }
        let (single, surface) = render_values(&[-7.0], 50, 40);
        assert_eq!(single.points_drawn, 1);
        assert!(surface.plotted_points()[0].y.is_finite());
    }
    #[test]
    fn extreme_range_stays_finite() {
        let (result, surface) = render_values(&[-1e308, 0.0, 1e308], 10, 10);
        assert_eq!(result.value_range, Some((-1e308, 1e308)));
        let ys: Vec<f32> = surface.plotted_points().iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![10.0, 5.0, 0.0]);
        let (flat, surface) = render_values(&[f64::MAX; 4], 10, 10);
        let (lo, hi) = flat.value_range.unwrap();
        assert!(lo < hi && hi.is_finite());
        assert!(surface.plotted_points().iter().all(|p| p.y.is_finite()));
    }
    #[test]
    fn non_finite_samples_are_skipped() {
        let (result, surface) = render_values(&[1.0, f64::NAN, 2.0, f64::INFINITY], 10, 10);
        assert_eq!(result.points_drawn, 2);
        assert_eq!(result.value_range, Some((1.0, 2.0)));
        assert_eq!(surface.plotted_points().len(), 2);
        let (all_bad, _) = render_values(&[f64::NAN; 30], 10, 10);
        assert!(all_bad.empty);
    }
    #[test]
    fn geometry_is_bounded_by_width() {
        let values: Vec<f64> = (0..5000).map(|i| ((i * 7919) % 113) as f64).collect();
        let bytes = f64_buffer(&values);
        let format = WaveformFormat::new(SampleEncoding::F64Le, 1);
        let series = decode_channel(&bytes, &format, 0).unwrap().series;
        for width in [1u32, 3, 64, 999] {
            let geometry = compute_geometry(&series, width, 10).unwrap();
            assert!(geometry.points.len() <= 2 * width as usize);
        }
    }
}
