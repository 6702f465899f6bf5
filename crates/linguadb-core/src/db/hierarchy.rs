use crate::{registry::RelationError, RELATION_SEP};

///
/// RelationHierarchy
///
/// First-level relation names mapped to their remaining nested paths.
/// Keys keep first-occurrence order so traversal is deterministic; a
/// single-segment path contributes an empty group, not an empty string.
///

#[derive(Debug, Default, Eq, PartialEq)]
pub struct RelationHierarchy {
    groups: Vec<(String, Vec<String>)>,
}

impl RelationHierarchy {
    /// Group relation paths by their first segment, stripping it from
    /// the remainder. Any empty segment (leading, trailing, or doubled
    /// separator) rejects the whole input.
    pub fn parse<I, P>(paths: I) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let parts: Vec<&str> = path.split(RELATION_SEP).collect();
            if parts.iter().any(|part| part.is_empty()) {
                return Err(RelationError::InvalidPath(path.to_string()));
            }

            let root = parts[0];
            let nest = parts[1..].join(RELATION_SEP);

            let index = match groups.iter().position(|(name, _)| name == root) {
                Some(index) => index,
                None => {
                    groups.push((root.to_string(), Vec::new()));
                    groups.len() - 1
                }
            };
            if !nest.is_empty() {
                groups[index].1.push(nest);
            }
        }

        Ok(Self { groups })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// First-level names with their nested paths, in first-occurrence
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, nested)| (name.as_str(), nested.as_slice()))
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(group, _)| group == name)
            .map(|(_, nested)| nested.as_slice())
    }
}
