//! A `Sample` request type with the `to_parts()` accessor the generator emits
//! for it. `accessor_matches_generator_output` keeps the two in sync.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub a: Option<String>,
    pub b: Vec<String>,
    pub c: Option<i32>,
    pub published_at: Option<String>,
}

impl Sample {
    /// Returns a comma-separated list of the fields that are currently set.
    pub fn to_parts(&self) -> String {
        let mut parts = String::new();
        if self.a.is_some() {
            parts.push_str("a,");
        }
        if !self.b.is_empty() {
            parts.push_str("b,");
        }
        if self.c.is_some() {
            parts.push_str("c,");
        }
        if self.published_at.is_some() {
            parts.push_str("publishedAt,");
        }
        if parts.ends_with(',') {
            parts.pop();
        }
        parts
    }
}
