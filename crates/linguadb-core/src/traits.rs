use crate::{key::RecordId, model::EntityModel};

///
/// Path
/// Fully-qualified type path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EntityKind
///
/// Static schema binding for a record type participating in translation.
///

pub trait EntityKind: Path {
    const MODEL: &'static EntityModel;
}

///
/// EntityValue
///
/// Object-safe instance surface the engines traverse and mutate.
///
/// Ids are always presented in text form; relation access goes through
/// the declared accessor table rather than any reflective lookup, so a
/// name that is not a relation of the type simply yields
/// [`Related::None`].
///

pub trait EntityValue {
    /// Runtime model for this instance's type.
    fn model(&self) -> &'static EntityModel;

    /// Primary key rendered as text.
    fn record_id(&self) -> RecordId;

    /// Current value of a text-valued field, if the instance has one by
    /// that name.
    fn text_field(&self, field: &str) -> Option<String>;

    /// Overwrite a text-valued field; returns false when the instance
    /// has no such field.
    fn set_text_field(&mut self, field: &str, value: &str) -> bool;

    /// Access a declared relation for traversal.
    fn relation_mut(&mut self, relation: &str) -> Related<'_>;

    /// Stable external name of this instance's type.
    fn entity_name(&self) -> &'static str {
        self.model().entity_name
    }
}

///
/// Related
///
/// Result of a relation access: absent, one record, or a materialized
/// ordered collection.
///

pub enum Related<'a> {
    None,
    One(&'a mut dyn EntityValue),
    Many(Vec<&'a mut dyn EntityValue>),
}

impl<'a> Related<'a> {
    /// Lift an optional to-one relation into an accessor result.
    pub fn from_option<E: EntityValue>(value: Option<&'a mut E>) -> Self {
        match value {
            Some(entity) => Self::One(entity),
            None => Self::None,
        }
    }

    /// Materialize a to-many relation as an ordered accessor result.
    pub fn from_slice<E: EntityValue>(values: &'a mut [E]) -> Self {
        Self::Many(
            values
                .iter_mut()
                .map(|entity| entity as &mut dyn EntityValue)
                .collect(),
        )
    }
}
