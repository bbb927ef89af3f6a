//! Storage abstraction for the removable media card
//!
//! The navigation core only ever lists directories and reads small
//! descriptor files. Both are synchronous: the card backends answer within
//! a frame budget and the core has no backpressure of its own.

/// One entry reported by [`Storage::list_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry<'a> {
    /// File or directory name (no path components).
    pub name: &'a str,
    /// `true` for directories.
    pub is_dir: bool,
}

/// Storage trait for file system access
pub trait Storage {
    /// Error type
    type Error: core::fmt::Debug;
    /// File type
    type File: File<Error = Self::Error>;

    /// Open file for reading
    fn open_file(&mut self, path: &str) -> Result<Self::File, Self::Error>;

    /// Check if path exists
    fn exists(&mut self, path: &str) -> Result<bool, Self::Error>;

    /// Call `visit` for every entry of the directory at `path`.
    ///
    /// Order is whatever the backend returns.
    fn list_dir(
        &mut self,
        path: &str,
        visit: &mut dyn FnMut(DirEntry<'_>),
    ) -> Result<(), Self::Error>;

    /// Read up to `buf.len()` bytes from the start of the file at `path`.
    ///
    /// Returns the number of bytes read, which is short only at end of file.
    fn read_prefix(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut file = self.open_file(path)?;
        let mut filled = 0usize;
        while let Some(rest) = buf.get_mut(filled..) {
            if rest.is_empty() {
                break;
            }
            let n = file.read(rest)?;
            if n == 0 {
                break;
            }
            filled = filled.saturating_add(n);
        }
        Ok(filled)
    }
}

/// File trait for reading files
pub trait File {
    /// Error type
    type Error: core::fmt::Debug;

    /// Read from current position
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Get file size
    fn size(&self) -> u64;
}
