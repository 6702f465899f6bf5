use crate::{
    error::Error,
    model::{EntityModel, RelationModel, TranslatableSpec},
};
use convert_case::{Case, Casing};
use std::collections::HashMap;
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("entity `{0}` is not registered")]
    UnknownEntity(String),

    #[error("entity `{0}` is already registered")]
    AlreadyRegistered(String),

    #[error("entity `{0}` is not translatable")]
    NotTranslatable(String),
}

///
/// RelationError
///

#[derive(Debug, ThisError)]
pub enum RelationError {
    #[error("`{relation}` is not a relation of entity `{entity}`")]
    UnknownRelation { entity: String, relation: String },

    #[error("`{0}` is not a valid relation path")]
    InvalidPath(String),
}

///
/// EntityRegistry
///
/// Registered entity models plus facts derived once at registration
/// time: the resolved translatable-field set and the reverse query name
/// of the implicit `translations` relation. Built at startup; read-only
/// afterwards.
///

#[derive(Default)]
pub struct EntityRegistry {
    entities: HashMap<&'static str, RegisteredEntity>,
}

struct RegisteredEntity {
    model: &'static EntityModel,
    /// `None` when the type never declared translation support.
    translatable_fields: Option<Vec<&'static str>>,
    translations_related_name: String,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model. The translatable-field set is resolved here and
    /// stays fixed for the registry's lifetime.
    pub fn register(&mut self, model: &'static EntityModel) -> Result<(), SchemaError> {
        if self.entities.contains_key(model.entity_name) {
            return Err(SchemaError::AlreadyRegistered(model.entity_name.to_string()));
        }

        let translatable_fields = match model.translatable {
            TranslatableSpec::NotTranslatable => None,
            TranslatableSpec::Auto => Some(
                model
                    .fields
                    .iter()
                    .filter(|field| field.kind.is_translatable_default())
                    .map(|field| field.name)
                    .collect(),
            ),
            TranslatableSpec::Explicit(fields) => Some(fields.to_vec()),
        };

        self.entities.insert(
            model.entity_name,
            RegisteredEntity {
                model,
                translatable_fields,
                translations_related_name: model.entity_name.to_case(Case::Snake),
            },
        );

        Ok(())
    }

    fn entry(&self, entity: &str) -> Result<&RegisteredEntity, SchemaError> {
        self.entities
            .get(entity)
            .ok_or_else(|| SchemaError::UnknownEntity(entity.to_string()))
    }

    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn model(&self, entity: &str) -> Result<&'static EntityModel, SchemaError> {
        Ok(self.entry(entity)?.model)
    }

    /// Look up a declared relation edge by forward name.
    pub fn relation(&self, entity: &str, relation: &str) -> Result<&'static RelationModel, Error> {
        let model = self.model(entity)?;
        model.relation(relation).ok_or_else(|| {
            RelationError::UnknownRelation {
                entity: entity.to_string(),
                relation: relation.to_string(),
            }
            .into()
        })
    }

    /// True when the type declared translation support.
    pub fn is_translatable(&self, entity: &str) -> Result<bool, SchemaError> {
        Ok(self.entry(entity)?.translatable_fields.is_some())
    }

    /// The resolved translatable-field set, in declaration order.
    pub fn translatable_fields(&self, entity: &str) -> Result<&[&'static str], SchemaError> {
        self.entry(entity)?
            .translatable_fields
            .as_deref()
            .ok_or_else(|| SchemaError::NotTranslatable(entity.to_string()))
    }

    /// Reverse query name of the implicit `translations` relation.
    pub fn translations_related_name(&self, entity: &str) -> Result<&str, SchemaError> {
        Ok(&self.entry(entity)?.translations_related_name)
    }

    /// The translatable entity whose `translations` reverse name matches
    /// `name`. Used by stores interpreting composed related names.
    #[must_use]
    pub fn entity_for_translations_name(&self, name: &str) -> Option<&'static EntityModel> {
        self.entities.values().find_map(|entry| {
            (entry.translatable_fields.is_some() && entry.translations_related_name == name)
                .then_some(entry.model)
        })
    }
}
