use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};

/// An axis-aligned box given by its two extreme corners.
///
/// Every triangle and every BVH node carries one. A box is [empty](Aabb::is_empty) when `mins`
/// exceeds `maxs` on some axis, which is the case of [`Aabb::new_invalid`]: merging anything into
/// that box yields the bounds of the merged thing exactly, so it is the starting point of every
/// union.
///
/// ```rust
/// use meshbvh3d::bounding_volume::{Aabb, BoundingVolume};
/// use meshbvh3d::math::Point;
///
/// let tri = Aabb::from_points([
///     Point::new(1.0, 2.0, 3.0),
///     Point::new(-1.0, 0.0, 5.0),
///     Point::new(0.0, 1.0, 4.0),
/// ]);
/// assert_eq!(tri.mins, Point::new(-1.0, 0.0, 3.0));
/// assert_eq!(tri.maxs, Point::new(1.0, 2.0, 5.0));
///
/// assert!(Aabb::new_invalid().is_empty());
/// assert_eq!(Aabb::new_invalid().merged(&tri), tri);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Aabb {
    /// The corner with the smallest coordinates.
    pub mins: Point<Real>,
    /// The corner with the largest coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// An AABB with the given corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Self {
        Self { mins, maxs }
    }

    /// The empty AABB: `mins` is `Real::MAX` and `maxs` is `-Real::MAX` on every axis.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Point::from(Vector::repeat(Real::MAX)),
            Point::from(Vector::repeat(-Real::MAX)),
        )
    }

    /// The smallest AABB containing all the given points.
    ///
    /// This is [`Aabb::new_invalid`] if there are no points.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        pts.into_iter().fold(Self::new_invalid(), |aabb, pt| Self {
            mins: aabb.mins.inf(&pt),
            maxs: aabb.maxs.sup(&pt),
        })
    }

    /// Same as [`Aabb::from_points`], from point references.
    pub fn from_points_ref<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        Self::from_points(pts.into_iter().copied())
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The coordinate of the center along the `axis`-th axis: `(mins[axis] + maxs[axis]) * 0.5`.
    #[inline]
    pub fn center_along(&self, axis: usize) -> Real {
        (self.mins[axis] + self.maxs[axis]) * 0.5
    }

    /// The size of this AABB along each axis, `maxs - mins`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Are all the coordinates of both corners finite?
    ///
    /// [`Aabb::new_invalid`] is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.mins
            .coords
            .iter()
            .chain(self.maxs.coords.iter())
            .all(|e| e.is_finite())
    }

    /// Is `mins` greater than `maxs` along at least one axis?
    ///
    /// A single point isn’t empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..DIM).any(|i| self.mins[i] > self.maxs[i])
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn contains(&self, other: &Self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= other.mins[i] && other.maxs[i] <= self.maxs[i])
    }

    #[inline]
    fn merge(&mut self, other: &Self) {
        *self = self.merged(other);
    }

    #[inline]
    fn merged(&self, other: &Self) -> Self {
        Self::new(self.mins.inf(&other.mins), self.maxs.sup(&other.maxs))
    }
}
