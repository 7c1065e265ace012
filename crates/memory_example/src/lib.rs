#[cfg(test)]
mod tests;

// Home of the memory checker demonstrations: one heap block that is never
// freed and a pair of reads from storage that was never written.
//
// Both defects are the point of this crate. Run the binary under
//  valgrind --leak-check=full --track-origins=yes
// and both should show up in the report.

mod indeterminate;

pub use indeterminate::{Observed, read_indeterminate};

use std::io::{self, Write};
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of integers in the block that is leaked.
pub const LEAKED_LEN: usize = 10;

/// Number of integers in the partially initialized block.
pub const PARTIAL_LEN: usize = 5;

/// Value written to element 0 of the partially initialized block.
pub const PARTIAL_FIRST: i32 = 100;

// only a count; storing the pointer would keep the block reachable
static LEAKED: AtomicUsize = AtomicUsize::new(0);

/// Number of blocks leaked by [`cause_leak`] so far in this process.
pub fn leaked_allocations() -> usize {
    LEAKED.load(Ordering::Relaxed)
}

/// Allocates [`LEAKED_LEN`] integers, writes element 0, reports the address
/// and returns without ever freeing the block.
///
/// The returned value is the block's address, for display only.
pub fn cause_leak(out: &mut impl Write) -> io::Result<usize> {
    let mut leaky_array = Box::<[i32]>::new_uninit_slice(LEAKED_LEN);
    // just to use it briefly
    leaky_array[0].write(1);

    let leaked: &'static mut [MaybeUninit<i32>] = Box::leak(leaky_array);
    let address = leaked.as_ptr();
    LEAKED.fetch_add(1, Ordering::Relaxed);

    log::debug!("leaking {} bytes", leaked.len() * size_of::<i32>());
    writeln!(out, "Leaky function called. Memory allocated at: {address:p}")?;

    Ok(address as usize)
}

/// Branches on a scalar that was never assigned, then reads an unwritten
/// element of a [`PartialBuffer`] and frees it.
///
/// Which branch message is printed is not defined.
pub fn use_uninitialized_memory(out: &mut impl Write) -> io::Result<()> {
    let uninitialized_value = MaybeUninit::<i32>::uninit();

    if read_indeterminate(&uninitialized_value).is_positive() {
        writeln!(out, "Uninitialized value is positive.")?;
    } else {
        writeln!(out, "Uninitialized value is not positive (or garbage).")?;
    }

    let partially_initialized = PartialBuffer::new();
    let second = partially_initialized.second();
    writeln!(out, "Value at index 1: {second} (potentially uninitialized)")?;

    drop(partially_initialized);
    Ok(())
}

/// Runs both demonstrations between the start and finish banners.
pub fn run(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Starting memory_example program.")?;

    cause_leak(out)?;
    use_uninitialized_memory(out)?;

    writeln!(out, "memory_example program finished.")?;
    out.flush()
}

/// Heap block of [`PARTIAL_LEN`] integers where only element 0 is written.
///
/// The block is freed when the value is dropped.
pub struct PartialBuffer {
    slots: Box<[MaybeUninit<i32>]>,
}

impl PartialBuffer {
    pub fn new() -> Self {
        let mut slots = Box::<[i32]>::new_uninit_slice(PARTIAL_LEN);
        slots[0].write(PARTIAL_FIRST);
        // slots 1 through 4 are left uninitialized
        Self { slots }
    }

    pub fn first(&self) -> i32 {
        // SAFETY: slot 0 is written in `new` and never modified.
        unsafe { self.slots[0].assume_init() }
    }

    /// Reads slot 1, which is never written.
    pub fn second(&self) -> Observed {
        read_indeterminate(&self.slots[1])
    }
}

impl Default for PartialBuffer {
    fn default() -> Self {
        Self::new()
    }
}
