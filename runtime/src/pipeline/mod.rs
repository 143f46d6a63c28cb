pub mod context;
pub mod document_manager;
pub mod extractor;
pub mod kind;
pub mod pipeline;

pub mod utils;

pub use document_manager::{DocumentManager, FileRepository, FsFileRepository};
pub use extractor::{DocumentExtractor, ExtractError, FormatExtractor};
pub use kind::DocumentKind;
pub use pipeline::{Pipeline, Upload};
