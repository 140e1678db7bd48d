//! Database models

pub mod image;

pub use image::{ImageRecord, ImageRecordCreate};
