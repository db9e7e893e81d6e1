use serde::{Deserialize, Serialize};
use crate::drivers::{PlotError, PlotStyle, WaveformFormat};
/// Everything needed to turn a buffer into a picture. Missing JSON fields
/// fall back to their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub format: WaveformFormat,
    pub style: PlotStyle,
}
impl PlotConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
    pub fn validate(&self) -> Result<(), PlotError> {
        self.format.validate()?;
        self.style.validate()
    }
}
