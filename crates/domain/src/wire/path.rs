//! Field paths such as `schedule.profiles[0].switchPoints[1].startTimeMinutes`.

use std::fmt;

/// One step into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

/// Location of a field relative to the root of a JSON document.
///
/// The empty path denotes the document itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The path of the document itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-key path.
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Key(name.into())])
    }

    /// Extend with an object key.
    #[must_use]
    pub fn then_key(mut self, name: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(name.into()));
        self
    }

    /// Extend with an array index.
    #[must_use]
    pub fn then_index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    /// Append every segment of `rest` after this path.
    #[must_use]
    pub fn join(mut self, rest: &Self) -> Self {
        self.0.extend(rest.0.iter().cloned());
        self
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<document>");
        }
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(name) if position == 0 => f.write_str(name)?,
                PathSegment::Key(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(name: &str) -> Self {
        Self::key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_keys_and_indices() {
        let path = FieldPath::key("schedule")
            .then_key("profiles")
            .then_index(0)
            .then_key("switchPoints")
            .then_index(12)
            .then_key("startTimeMinutes");
        assert_eq!(
            path.to_string(),
            "schedule.profiles[0].switchPoints[12].startTimeMinutes"
        );
    }

    #[test]
    fn should_display_placeholder_for_root() {
        assert!(FieldPath::root().is_root());
        assert_eq!(FieldPath::root().to_string(), "<document>");
    }

    #[test]
    fn should_join_paths_in_order() {
        let inner = FieldPath::key("on");
        let path = FieldPath::key("state").join(&inner);
        assert_eq!(path.to_string(), "state.on");
        assert_eq!(path.segments().len(), 2);
    }

    #[test]
    fn should_keep_root_when_joining_root() {
        let path = FieldPath::key("value").join(&FieldPath::root());
        assert_eq!(path, FieldPath::key("value"));
    }
}
