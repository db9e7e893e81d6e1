use serde::Serialize;
use crate::drivers::error::PlotError;
/// Screen-space point in pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f32,
    pub y: f32,
}
impl PlotPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
/// Caller-owned drawing target.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self) -> Result<(), PlotError>;
    /// Connect consecutive points with straight segments.
    fn draw_polyline(&mut self, points: &[PlotPoint]) -> Result<(), PlotError>;
}
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", content = "points", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Polyline(Vec<PlotPoint>),
}
/// Surface that keeps the issued commands so a host can replay them.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}
impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
    /// All polyline points issued so far, in order.
    pub fn plotted_points(&self) -> Vec<PlotPoint> {
        self.commands
            .iter()
            .flat_map(|c| match c {
                DrawCommand::Polyline(points) => points.as_slice(),
                DrawCommand::Clear => &[][..],
            })
            .copied()
            .collect()
    }
}
impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
    fn clear(&mut self) -> Result<(), PlotError> {
        self.commands.push(DrawCommand::Clear);
        Ok(())
    }
    fn draw_polyline(&mut self, points: &[PlotPoint]) -> Result<(), PlotError> {
        self.commands.push(DrawCommand::Polyline(points.to_vec()));
        Ok(())
    }
}
