//! Common types used across CLI modules

/// Reference to a project: either its numeric id or a title prefix
///
/// The backend assigns integer ids, but titles are what users remember;
/// anything that does not parse as an integer is treated as a title prefix
/// and resolved against the project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    /// Numeric project id
    Id(i64),
    /// Title prefix that should uniquely identify a project
    Title(String),
}

impl ProjectRef {
    /// Parse a string into a ProjectRef
    pub fn parse(input: &str) -> Self {
        if let Ok(id) = input.parse::<i64>() {
            ProjectRef::Id(id)
        } else {
            ProjectRef::Title(input.to_string())
        }
    }

    /// Get the id if this reference is numeric
    pub fn as_id(&self) -> Option<i64> {
        match self {
            ProjectRef::Id(id) => Some(*id),
            ProjectRef::Title(_) => None,
        }
    }
}

impl std::fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectRef::Id(id) => write!(f, "{}", id),
            ProjectRef::Title(title) => write!(f, "{}", title),
        }
    }
}

impl From<&str> for ProjectRef {
    fn from(s: &str) -> Self {
        ProjectRef::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_parses_as_id() {
        assert_eq!(ProjectRef::parse("42"), ProjectRef::Id(42));
        assert_eq!(ProjectRef::parse("42").as_id(), Some(42));
    }

    #[test]
    fn non_numeric_input_is_a_title() {
        let reference = ProjectRef::parse("AI Amenities Map");
        assert_eq!(
            reference,
            ProjectRef::Title("AI Amenities Map".to_string())
        );
        assert_eq!(reference.as_id(), None);
    }
}
