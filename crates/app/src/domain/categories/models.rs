//! Category Models

/// Category Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: i32,
    pub title: String,
    /// Size chart the category's products are sized against.
    pub size_id: Option<i32>,
}

/// New Category Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub title: String,
    pub size_id: Option<i32>,
}
