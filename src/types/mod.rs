pub mod errors;

pub use errors::{ArchiveError, IntakeError, IntakeResult};
