// Resume intake: turns an uploaded PDF into plain text for prompt interpolation.

pub mod handlers;
pub mod pdf;
pub mod upload;

pub use pdf::{extract_resume_text_async, PdfError};
pub use upload::UploadForm;
