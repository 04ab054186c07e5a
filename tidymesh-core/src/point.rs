//! Point and vector types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Unit normal of a polygon given as an ordered cycle of positions.
///
/// Uses Newell's method, which is exact for planar polygons and gives a
/// best-fit normal for slightly warped ones. Returns `None` when the polygon
/// has (numerically) zero area.
pub fn newell_normal<'a, I>(positions: I) -> Option<Vector3f>
where
    I: IntoIterator<Item = &'a Point3f>,
    I::IntoIter: Clone,
{
    let iter = positions.into_iter();
    let mut n = Vector3f::zeros();
    for (a, b) in iter.clone().zip(iter.cycle().skip(1)) {
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    let len = n.magnitude();
    if len > 1e-12 && len.is_finite() {
        Some(n / len)
    } else {
        None
    }
}
