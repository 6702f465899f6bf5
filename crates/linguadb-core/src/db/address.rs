use crate::{
    error::Error,
    registry::{EntityRegistry, RelationError},
    RELATION_SEP, TRANSLATIONS_RELATION,
};

/// Compose the reverse query name a side-table query uses to filter the
/// final type of `path` back to `entity`.
///
/// Resolution walks right to left: the reverse name for `a__b__c` is the
/// reverse name of `b__c` scoped to `a`'s target, joined with the
/// reverse name of `a` scoped to `entity`. The special trailing
/// `translations` segment resolves to the owning entity's reverse name
/// in the side table and only exists for translatable types.
pub fn resolve_related_name(
    registry: &EntityRegistry,
    entity: &str,
    path: &str,
) -> Result<String, Error> {
    let (root, branch) = match path.split_once(RELATION_SEP) {
        Some((root, branch)) => (root, Some(branch)),
        None => (path, None),
    };
    if root.is_empty() {
        return Err(RelationError::InvalidPath(path.to_string()).into());
    }

    if root == TRANSLATIONS_RELATION && branch.is_none() {
        if !registry.is_translatable(entity)? {
            return Err(RelationError::UnknownRelation {
                entity: entity.to_string(),
                relation: TRANSLATIONS_RELATION.to_string(),
            }
            .into());
        }
        return Ok(registry.translations_related_name(entity)?.to_string());
    }

    let relation = registry.relation(entity, root)?;
    match branch {
        Some(branch) => {
            let nested = resolve_related_name(registry, relation.target, branch)?;
            Ok(format!("{nested}{RELATION_SEP}{}", relation.reverse_name))
        }
        None => Ok(relation.reverse_name.to_string()),
    }
}
