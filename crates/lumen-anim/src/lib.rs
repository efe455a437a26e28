#![warn(missing_docs)]

//! Keyframe animation for lumen scenes.
//!
//! An [`Animator`] snapshots the local translation and rotation of every
//! scene node at the first and last frame of a [`FrameRange`], then eases
//! each node between the two as frames advance.
//!
//! # Example
//!
//! ```ignore
//! use lumen_anim::{Animator, FrameRange};
//!
//! let mut anim = Animator::new(FrameRange { min: 1, max: 30 })?;
//! anim.capture_start(&scene);
//! scene.set_local_position(arm, Vec3::new(0.0, 2.0, 0.0))?;
//! anim.capture_end(&scene);
//! anim.play_through(&mut scene, |scene, frame| render(scene, frame))?;
//! ```

mod animator;
pub mod easing;
pub mod error;

pub use animator::{Animator, FrameRange, KeyFrame, PlayState};
pub use easing::Easing;
pub use error::{AnimError, Result};
