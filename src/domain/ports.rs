use crate::utils::error::Result;

/// Whole-file access by path. Inventories are small enough to be read and
/// written in one piece.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
