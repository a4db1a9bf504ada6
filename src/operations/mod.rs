pub mod capture_upload_op;
pub mod image_upload_op;

pub use capture_upload_op::Uploader;
pub use image_upload_op::{HttpUploader, ImageSink, UploadReceipt};
