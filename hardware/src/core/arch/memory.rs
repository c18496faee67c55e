//! Word-addressed memory.
//!
//! Instruction memory and data memory are two separate instances of
//! [`Memory`]. Both are zero-filled and have the same fixed depth. Every
//! access is bounds-checked and reports the faulting address instead of
//! wrapping or panicking.

use crate::common::{AccessType, SimError, Word};

/// A fixed-depth array of machine words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    words: Vec<Word>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` words.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
        }
    }

    /// Depth in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` for a zero-depth memory.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Copies `image` to address 0 onwards.
    ///
    /// # Errors
    ///
    /// [`SimError::ProgramTooLarge`] if the image does not fit.
    pub fn load_image(&mut self, image: &[Word]) -> Result<(), SimError> {
        if image.len() > self.words.len() {
            return Err(SimError::ProgramTooLarge {
                words: image.len(),
                capacity: self.words.len(),
            });
        }
        self.words[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Translates a word address into an index, checking bounds.
    fn index(&self, addr: Word, access: AccessType) -> Result<usize, SimError> {
        usize::try_from(addr)
            .ok()
            .filter(|&idx| idx < self.words.len())
            .ok_or_else(|| self.out_of_bounds(addr, access))
    }

    /// The error reported for an `access` to `addr` outside this memory.
    pub fn out_of_bounds(&self, addr: Word, access: AccessType) -> SimError {
        SimError::AddressOutOfBounds {
            access,
            address: i64::from(addr),
            size: self.words.len(),
        }
    }

    /// Reads the word at `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfBounds`] tagged with `access`.
    pub fn read(&self, addr: Word, access: AccessType) -> Result<Word, SimError> {
        let idx = self.index(addr, access)?;
        Ok(self.words[idx])
    }

    /// Writes `val` at `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfBounds`] for a store outside memory.
    pub fn write(&mut self, addr: Word, val: Word) -> Result<(), SimError> {
        let idx = self.index(addr, AccessType::Write)?;
        self.words[idx] = val;
        Ok(())
    }

    /// Checks that a store to `addr` would succeed without performing it.
    pub fn check_write(&self, addr: Word) -> Result<(), SimError> {
        self.index(addr, AccessType::Write).map(|_| ())
    }

    /// The first `count` words (clamped to the depth).
    pub fn prefix(&self, count: usize) -> &[Word] {
        &self.words[..count.min(self.words.len())]
    }
}
