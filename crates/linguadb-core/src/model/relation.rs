///
/// RelationModel
///
/// Statically declared relation edge. `reverse_name` is the name a query
/// on `target` filters by to get back to the declaring entity; composed
/// related names are built from these, right to left.
///

#[derive(Debug)]
pub struct RelationModel {
    /// Forward accessor name on the declaring entity.
    pub name: &'static str,
    /// Entity name of the related type.
    pub target: &'static str,
    /// Reverse query name scoped to the related type.
    pub reverse_name: &'static str,
    /// Whether the forward accessor yields a collection.
    pub many: bool,
}
