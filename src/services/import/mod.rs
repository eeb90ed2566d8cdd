pub mod archive;
pub mod executor;
pub mod types;

pub use archive::{ArchivePhotoRecord, ArchiveStore, PhotoArchive};
pub use executor::BulkImportExecutor;
pub use types::{
    ImportAssignment, ImportControl, ImportFailure, ImportOutcome, ImportReport, ImportStatus,
    UploadedFile,
};
