use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);
/// Process-unique identity of a [`RawBuffer`]. Clones share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(u64);
/// Immutable bytes handed over by the caller, e.g. one file selection.
#[derive(Clone, Debug)]
pub struct RawBuffer {
    id: BufferId,
    bytes: Arc<[u8]>,
}
impl RawBuffer {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: BufferId(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed)),
            bytes: bytes.into(),
        }
    }
    pub fn id(&self) -> BufferId {
        self.id
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
impl Deref for RawBuffer {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}
impl From<Vec<u8>> for RawBuffer {
    fn from(value: Vec<u8>) -> Self {
        RawBuffer::new(value)
    }
}
