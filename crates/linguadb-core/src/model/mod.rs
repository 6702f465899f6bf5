pub mod entity;
pub mod field;
pub mod relation;

pub use entity::{EntityModel, TranslatableSpec};
pub use field::{FieldKind, FieldModel};
pub use relation::RelationModel;
