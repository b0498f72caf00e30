//! Services used by the handlers

pub mod images;

pub use images::{ImageStore, ImageUpload};
