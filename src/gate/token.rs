use std::fmt;

/// Identifies one mount of the contact gate.
///
/// Every render of the profile route issues a new token. Scheduled work carries the
/// token it was created under and is dropped when it no longer matches the mounted gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountToken(u64);

impl MountToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MountToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gate#{}", self.0)
    }
}
