use crate::{key::RecordId, traits::EntityValue};
use thiserror::Error as ThisError;

///
/// ContextError
///

#[derive(Debug, ThisError)]
pub enum ContextError {
    #[error("context must contain at least one instance")]
    Empty,
}

///
/// Context
///
/// Operand of every engine call: one record or a homogeneous ordered
/// list. Bulk query results enter as `Many`; the first instance
/// determines the entity type of the whole context.
///

pub enum Context<'a> {
    One(&'a mut dyn EntityValue),
    Many(Vec<&'a mut dyn EntityValue>),
}

///
/// Normalized
///
/// Uniform view of a context: one entity type, N ordered ids.
///

pub(crate) struct Normalized {
    pub entity: &'static str,
    pub ids: Vec<RecordId>,
    pub plural: bool,
}

impl<'a> Context<'a> {
    pub fn one<E: EntityValue>(entity: &'a mut E) -> Self {
        Self::One(entity)
    }

    pub fn many<E: EntityValue>(entities: &'a mut [E]) -> Self {
        Self::Many(
            entities
                .iter_mut()
                .map(|entity| entity as &mut dyn EntityValue)
                .collect(),
        )
    }

    /// Normalize to (entity type, ordered ids, plural flag). An empty
    /// plural context carries no entity type and is rejected.
    pub(crate) fn normalize(&self) -> Result<Normalized, ContextError> {
        match self {
            Self::One(entity) => Ok(Normalized {
                entity: entity.entity_name(),
                ids: vec![entity.record_id()],
                plural: false,
            }),
            Self::Many(entities) => {
                let first = entities.first().ok_or(ContextError::Empty)?;
                Ok(Normalized {
                    entity: first.entity_name(),
                    ids: entities.iter().map(|entity| entity.record_id()).collect(),
                    plural: true,
                })
            }
        }
    }

    /// Shared view of every instance, in context order.
    pub(crate) fn instances(&self) -> Vec<&dyn EntityValue> {
        match self {
            Self::One(entity) => vec![&**entity],
            Self::Many(entities) => entities.iter().map(|entity| &**entity).collect(),
        }
    }

    /// Mutable view of every instance, in context order.
    pub(crate) fn instances_mut<'s>(&'s mut self) -> Vec<&'s mut (dyn EntityValue + 'a)> {
        match self {
            Self::One(entity) => vec![&mut **entity],
            Self::Many(entities) => entities.iter_mut().map(|entity| &mut **entity).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Context, ContextError};
    use crate::test_fixtures::city;

    #[test]
    fn singular_context_normalizes_to_one_id() {
        let mut cologne = city(7, "Cologne", "Kölner");
        let context = Context::one(&mut cologne);
        let normalized = context.normalize().expect("singular context is valid");

        assert_eq!(normalized.entity, "City");
        assert_eq!(normalized.ids, [7.into()]);
        assert!(!normalized.plural);
    }

    #[test]
    fn plural_context_keeps_instance_order() {
        let mut cities = vec![city(2, "Munich", "Münchner"), city(1, "Cologne", "Kölner")];
        let context = Context::many(&mut cities);
        let normalized = context.normalize().expect("plural context is valid");

        assert_eq!(normalized.entity, "City");
        assert_eq!(normalized.ids, [2.into(), 1.into()]);
        assert!(normalized.plural);
    }

    #[test]
    fn empty_plural_context_is_rejected() {
        let mut none: Vec<crate::test_fixtures::City> = Vec::new();
        let context = Context::many(&mut none);
        assert!(matches!(context.normalize(), Err(ContextError::Empty)));
    }
}
