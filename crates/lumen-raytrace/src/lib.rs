#![warn(missing_docs)]

//! Rays and analytic ray-primitive intersection for lumen.
//!
//! Every intersector works in the primitive's own frame: scene code maps a
//! world ray through the inverse of an object's world matrix before calling in,
//! and maps the returned point and normal back out.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin and direction
//! - [`Aabb3`] - Axis-aligned bounding boxes for broadphase rejection
//! - [`intersect`] - Ray-primitive intersection for spheres, planes, cones and triangles
//!
//! # Example
//!
//! ```ignore
//! use lumen_math::{Point3, Vec3};
//! use lumen_raytrace::{intersect::{intersect_sphere, Sphere}, Ray};
//!
//! let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
//! let hits = intersect_sphere(&ray, &Sphere::at_origin(1.0));
//! assert!((hits[0].point.z - 1.0).abs() < 1e-12);
//! ```

mod aabb;
pub mod intersect;
mod ray;

pub use aabb::Aabb3;
pub use intersect::SurfaceHit;
pub use ray::Ray;
