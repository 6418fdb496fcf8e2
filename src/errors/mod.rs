pub mod types;

pub use types::{AppError, RenderError, UploadError};
