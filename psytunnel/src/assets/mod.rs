/// Source image loading and normalization.
pub mod source;
