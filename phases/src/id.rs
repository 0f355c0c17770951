//! Ids for use in typed collections.

/// Position of a program in its table, in document order.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct LightId(u32);

impl From<LightId> for usize {
    fn from(id: LightId) -> usize {
        id.0 as usize
    }
}

impl From<usize> for LightId {
    fn from(val: usize) -> LightId {
        Self(val as u32)
    }
}
