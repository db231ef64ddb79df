use std::io;

use thiserror::Error;

/// Errors surfaced while loading a rom image. Loading is the only
/// operation that can fail; once a program is running the engine never
/// raises.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("rom image is {size} bytes but only {capacity} fit above the reserved region")]
    TooLarge { size: usize, capacity: usize },

    #[error("failed to read rom image")]
    Io(#[from] io::Error),
}
