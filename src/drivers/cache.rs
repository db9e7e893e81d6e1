use log::trace;
use crate::drivers::buffer::BufferId;
use crate::drivers::format::WaveformFormat;
use crate::drivers::render::PlotGeometry;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryKey {
    pub buffer: BufferId,
    pub channel_index: usize,
    pub width: u32,
    pub height: u32,
    pub format: WaveformFormat,
}
/// Remembers the geometry of the last plot. Any change of buffer, channel,
/// surface size or format replaces the entry.
#[derive(Debug, Default)]
pub struct GeometryCache {
    entry: Option<(GeometryKey, PlotGeometry)>,
    hits: u64,
    misses: u64,
}
impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }
    /// Return the cached geometry for `key`, computing and storing it on a miss.
    /// A stale entry is dropped even when `compute` fails.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: GeometryKey,
        compute: impl FnOnce() -> Result<PlotGeometry, E>,
    ) -> Result<&PlotGeometry, E> {
        let entry = match self.entry.take() {
            Some((cached, geometry)) if cached == key => {
                self.hits += 1;
                trace!("geometry cache hit for channel {}", key.channel_index);
                (cached, geometry)
            }
            _ => {
                self.misses += 1;
                (key, compute()?)
            }
        };
        let (_, geometry) = self.entry.insert(entry);
        Ok(geometry)
    }
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
    pub fn hits(&self) -> u64 {
        self.hits
    }
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
