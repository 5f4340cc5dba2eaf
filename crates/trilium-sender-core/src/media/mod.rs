//! Image preparation for uploads.

mod scale;
mod upload;

pub use scale::{scale_image, scale_image_with, ScaleOptions, JPEG_MIME_TYPE};
pub use upload::UploadBody;
