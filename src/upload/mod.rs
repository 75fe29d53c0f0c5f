//! Post-session upload of the recorded tracks

pub mod pipeline;
pub mod uploader;

pub use pipeline::{UploadOutcome, UploadPipeline};
pub use uploader::{ArchiveUploader, HttpArchiveUploader, UploadResponse};
