// Reads of storage that may never have been written.
//
// The default build performs a real load so a memory checker sees the use
// of an undefined value. With the `sentinel` feature the load is replaced
// by an explicit `Observed::Unknown` marker.

use std::fmt;
use std::mem::MaybeUninit;

/// Result of reading a slot that may be uninitialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    /// Whatever bits the slot held.
    Value(i32),
    /// Stand-in for an indeterminate value.
    Unknown,
}

impl Observed {
    /// `Unknown` is never positive.
    pub fn is_positive(self) -> bool {
        matches!(self, Observed::Value(v) if v > 0)
    }
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observed::Value(v) => write!(f, "{v}"),
            Observed::Unknown => f.write_str("unknown"),
        }
    }
}

/// Loads the slot whether or not it was ever written.
///
/// __Note:__
///
/// Reading an unwritten `MaybeUninit` as an `i32` is undefined behaviour.
/// This function sits outside what the language can keep safe and exists
/// only so an external checker has something to report.
#[cfg(not(feature = "sentinel"))]
pub fn read_indeterminate(slot: &MaybeUninit<i32>) -> Observed {
    // SAFETY: none; `slot` may be uninitialized. The volatile load keeps the
    // read in the binary so memcheck can flag it.
    let value = unsafe { std::ptr::read_volatile(slot.as_ptr()) };
    Observed::Value(value)
}

/// Never touches the slot and reports [`Observed::Unknown`].
#[cfg(feature = "sentinel")]
pub fn read_indeterminate(_slot: &MaybeUninit<i32>) -> Observed {
    Observed::Unknown
}
