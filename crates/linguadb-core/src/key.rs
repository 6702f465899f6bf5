use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// RecordId
///
/// An entity primary key in its text form. All side-table addressing,
/// filtering, and equality happens on this representation regardless of
/// the key type the owning entity uses internally.
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// impl_record_id_from
macro_rules! impl_record_id_from {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl From<$type> for RecordId {
                fn from(id: $type) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

impl_record_id_from!(i8, i16, i32, i64, u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::RecordId;

    #[test]
    fn numeric_and_text_ids_compare_in_text_form() {
        assert_eq!(RecordId::from(42_u64), RecordId::from("42"));
        assert_eq!(RecordId::from(-7_i32), RecordId::new("-7"));
        assert_ne!(RecordId::from(42_u64), RecordId::from("042"));
    }

    #[test]
    fn display_matches_inner_text() {
        assert_eq!(RecordId::from(5_u8).to_string(), "5");
        assert_eq!(RecordId::new("eu").as_str(), "eu");
    }
}
