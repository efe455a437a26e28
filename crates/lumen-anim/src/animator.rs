//! Two-keyframe animator.

use lumen_math::Vec3;
use lumen_scene::{NodeId, Scene};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::easing::Easing;
use crate::error::{AnimError, Result};

/// Local translation and rotation of one node at one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyFrame {
    /// Node the pose belongs to.
    pub node: NodeId,
    /// Frame index.
    pub frame: u32,
    /// Local translation.
    pub translation: Vec3,
    /// Local Euler rotation in degrees.
    pub rotation: Vec3,
}

/// Inclusive frame timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameRange {
    /// First frame.
    pub min: u32,
    /// Last frame; also the interpolation total.
    pub max: u32,
}

impl Default for FrameRange {
    fn default() -> Self {
        Self { min: 1, max: 60 }
    }
}

impl FrameRange {
    /// Validate the range.
    pub fn validate(&self) -> Result<()> {
        if self.max < self.min || self.max == 0 {
            return Err(AnimError::InvalidFrameRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Whether `frame` lies in the range.
    pub fn contains(&self, frame: u32) -> bool {
        (self.min..=self.max).contains(&frame)
    }

    /// Number of frames in the range.
    pub fn len(&self) -> u32 {
        self.max.saturating_sub(self.min) + 1
    }

    /// Always `false` for a validated range.
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }
}

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Not advancing.
    #[default]
    Idle,
    /// Advancing on each [`Animator::advance_frame`].
    Playing,
}

/// Interpolates every node of a scene between a captured start and end pose.
#[derive(Debug, Clone)]
pub struct Animator {
    state: PlayState,
    range: FrameRange,
    current_frame: u32,
    easing: Easing,
    start: Vec<KeyFrame>,
    end: Vec<KeyFrame>,
    start_set: bool,
    end_set: bool,
}

impl Default for Animator {
    fn default() -> Self {
        let range = FrameRange::default();
        Self {
            state: PlayState::Idle,
            range,
            current_frame: range.min,
            easing: Easing::default(),
            start: Vec::new(),
            end: Vec::new(),
            start_set: false,
            end_set: false,
        }
    }
}

impl Animator {
    /// Animator over `range`, idle at its first frame.
    pub fn new(range: FrameRange) -> Result<Self> {
        range.validate()?;
        Ok(Self {
            range,
            current_frame: range.min,
            ..Self::default()
        })
    }

    /// Use a different easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Playback state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Whether the animator is playing.
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Frame the next [`Animator::advance_frame`] will apply.
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// First frame.
    pub fn min_frame(&self) -> u32 {
        self.range.min
    }

    /// Last frame.
    pub fn max_frame(&self) -> u32 {
        self.range.max
    }

    /// Frame range.
    pub fn range(&self) -> FrameRange {
        self.range
    }

    /// Easing curve.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Change the easing curve.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Start keyframes.
    pub fn start_keyframes(&self) -> &[KeyFrame] {
        &self.start
    }

    /// End keyframes.
    pub fn end_keyframes(&self) -> &[KeyFrame] {
        &self.end
    }

    /// Whether a start pose has been captured.
    pub fn start_captured(&self) -> bool {
        self.start_set
    }

    /// Whether an end pose has been captured.
    pub fn end_captured(&self) -> bool {
        self.end_set
    }

    fn snapshot(scene: &Scene, frame: u32) -> Vec<KeyFrame> {
        scene
            .iter()
            .map(|(node, n)| KeyFrame {
                node,
                frame,
                translation: n.pose().position,
                rotation: n.pose().rotation,
            })
            .collect()
    }

    /// Record every node's pose as the start keyframes.
    ///
    /// Invalidates a previously captured end pose.
    pub fn capture_start(&mut self, scene: &Scene) {
        self.start = Self::snapshot(scene, self.range.min);
        self.start_set = true;
        self.end_set = false;
        debug!(keyframes = self.start.len(), frame = self.range.min, "captured start");
    }

    /// Record every node's pose as the end keyframes.
    pub fn capture_end(&mut self, scene: &Scene) {
        self.end = Self::snapshot(scene, self.range.max);
        self.end_set = true;
        debug!(keyframes = self.end.len(), frame = self.range.max, "captured end");
    }

    /// Start playback from the first frame.
    ///
    /// When the captures differ in size both are discarded, the animator
    /// stays idle and [`AnimError::KeyframeMismatch`] is returned.
    pub fn play(&mut self) -> Result<()> {
        if self.start.len() != self.end.len() {
            let err = AnimError::KeyframeMismatch {
                start: self.start.len(),
                end: self.end.len(),
            };
            warn!(%err, "cannot play");
            self.start.clear();
            self.end.clear();
            self.start_set = false;
            self.end_set = false;
            self.state = PlayState::Idle;
            return Err(err);
        }
        self.state = PlayState::Playing;
        self.current_frame = self.range.min;
        info!(min = self.range.min, max = self.range.max, "playing");
        Ok(())
    }

    /// Stop playback, keeping the current frame.
    pub fn stop(&mut self) {
        self.state = PlayState::Idle;
    }

    /// Jump to `frame`. Ignored while playing.
    pub fn set_current_frame(&mut self, frame: u32) -> Result<()> {
        if !self.range.contains(frame) {
            return Err(AnimError::FrameOutOfRange {
                frame,
                min: self.range.min,
                max: self.range.max,
            });
        }
        if self.is_playing() {
            debug!(frame, "ignoring frame change while playing");
            return Ok(());
        }
        self.current_frame = frame;
        Ok(())
    }

    /// Replace the frame range, clamping the current frame into it.
    pub fn set_range(&mut self, range: FrameRange) -> Result<()> {
        range.validate()?;
        self.range = range;
        self.current_frame = self.current_frame.clamp(range.min, range.max);
        Ok(())
    }

    fn ready(&self, scene: &Scene) -> bool {
        self.is_playing()
            && self.start_set
            && self.end_set
            && !self.start.is_empty()
            && self.start.len() == self.end.len()
            && self.start.len() == scene.len()
            && self
                .start
                .iter()
                .zip(&self.end)
                .all(|(s, e)| s.node == e.node && scene.node(s.node).is_some())
    }

    /// Apply the interpolated pose for the current frame, then step forward,
    /// wrapping to the first frame after the last.
    ///
    /// Does nothing unless playing with matching captures of the live scene.
    pub fn advance_frame(&mut self, scene: &mut Scene) {
        if !self.ready(scene) {
            if self.is_playing() {
                debug!(frame = self.current_frame, "captures do not match the scene, frame skipped");
            }
            return;
        }

        let current = self.current_frame as f64;
        let total = self.range.max as f64;
        let ease = |s: &Vec3, e: &Vec3| {
            Vec3::new(
                self.easing.apply(current, s.x, e.x - s.x, total),
                self.easing.apply(current, s.y, e.y - s.y, total),
                self.easing.apply(current, s.z, e.z - s.z, total),
            )
        };

        for (s, e) in self.start.iter().zip(&self.end) {
            let translation = ease(&s.translation, &e.translation);
            let rotation = ease(&s.rotation, &e.rotation);
            if let Err(err) = scene
                .set_local_position(s.node, translation)
                .and_then(|_| scene.set_local_rotation(s.node, rotation))
            {
                warn!(node = ?s.node, %err, "keyframe not applied");
            }
        }

        self.current_frame += 1;
        if self.current_frame > self.range.max {
            self.current_frame = self.range.min;
        }
    }

    /// Play once through the whole range, calling `render` after each frame
    /// is applied, then stop.
    pub fn play_through<E>(
        &mut self,
        scene: &mut Scene,
        mut render: impl FnMut(&Scene, u32) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E>
    where
        E: From<AnimError>,
    {
        self.play()?;
        for _ in self.range.min..=self.range.max {
            let frame = self.current_frame;
            self.advance_frame(scene);
            if let Err(err) = render(scene, frame) {
                self.stop();
                return Err(err);
            }
        }
        self.stop();
        Ok(())
    }
}
