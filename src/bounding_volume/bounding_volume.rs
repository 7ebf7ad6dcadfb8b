/// A volume enclosing some geometry, which can be grown to enclose more.
///
/// Implementors must make [`Self::merged`] the smallest volume of their kind containing both
/// operands, so that merging the volumes of a set of triangles in any order gives the same result.
pub trait BoundingVolume {
    /// Is `other` entirely inside of `self`?
    fn contains(&self, other: &Self) -> bool;

    /// Grows `self` so it also encloses `other`.
    fn merge(&mut self, other: &Self);

    /// The smallest volume enclosing both `self` and `other`.
    fn merged(&self, other: &Self) -> Self;
}
