// Service exports
pub mod clock;
pub mod directory;

pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{DirectoryError, InMemoryDirectory, TransporterDirectory};
