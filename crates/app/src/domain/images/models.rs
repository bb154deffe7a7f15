//! Image Models

/// Image metadata. The blob itself is only ever fetched one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    pub image_id: i32,
    pub product_id: i32,
    pub title: Option<String>,
    pub content_type: String,
    pub byte_len: i64,
}

/// Raw image bytes with their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// New Image Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub product_id: i32,
    pub title: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}
