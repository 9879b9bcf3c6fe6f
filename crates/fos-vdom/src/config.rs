//! Tree configuration

/// Options for a [`DomTree`](crate::DomTree)
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Tag used when an element is created without one
    pub default_tag: String,
    /// Arena slots reserved up front
    pub initial_capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_tag: "div".to_string(),
            initial_capacity: 64,
        }
    }
}

impl TreeConfig {
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
