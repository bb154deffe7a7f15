//! Size Models

/// Size Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    pub size_id: i32,
    pub label: String,
}

/// New Size Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSize {
    pub label: String,
}
