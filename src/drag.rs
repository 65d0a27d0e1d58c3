//! Pointer drag gestures
//!
//! `DragController` is the gesture state machine shared by the dock manager
//! and the splitter. It knows nothing about what is being dragged: the
//! caller hit-tests, arms the controller with a target, and interprets the
//! commit or cancel it gets back.
//!
//! ```text
//! Idle --press--> Armed --motion past threshold--> Dragging
//!   ^               |                                 |
//!   |            release (click)              release (commit)
//!   +---------------+----- capture lost / abort ------+ (cancel)
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Orientation, Point, Rect};

/// Pixels the pointer must travel before a press becomes a drag
pub const DEFAULT_DRAG_THRESHOLD: i32 = 3;

/// Slack around sashes when hit-testing a press
pub const DEFAULT_HIT_TOLERANCE: i32 = 2;

/// How a drag is previewed while in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HintMode {
    /// Draw an outline of the prospective result; apply on release
    #[default]
    Outline,
    /// Apply the new sizes on every motion
    LiveResize,
}

/// Everything remembered about one gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragState<T> {
    pub target: T,
    /// Where the pointer went down
    pub press: Point,
    /// Sash position or dock size at press time
    pub start_offset: i32,
    /// Latest pointer position
    pub current: Point,
    /// Live hint rectangle, if the caller computed one
    pub hint: Option<Rect>,
}

impl<T> DragState<T> {
    pub fn delta(&self) -> Point {
        Point::new(self.current.x - self.press.x, self.current.y - self.press.y)
    }

    pub fn delta_along(&self, orientation: Orientation) -> i32 {
        self.delta().along(orientation)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase<T> {
    Idle,
    Armed(DragState<T>),
    Dragging(DragState<T>),
}

/// What a pointer move did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMotion {
    /// No gesture, or still inside the threshold
    None,
    /// The threshold was just crossed
    Started,
    Moved,
}

/// A finished drag, ready to be applied to the model
#[derive(Debug, Clone, PartialEq)]
pub struct DragCommit<T> {
    pub target: T,
    pub start: Point,
    pub end: Point,
    pub start_offset: i32,
}

impl<T> DragCommit<T> {
    pub fn delta_along(&self, orientation: Orientation) -> i32 {
        self.end.along(orientation) - self.start.along(orientation)
    }
}

/// How a gesture ended
#[derive(Debug, Clone, PartialEq)]
pub enum DragEnd<T> {
    /// Release without a gesture in progress
    Nothing,
    /// Press and release without crossing the threshold
    Click { target: T, point: Point },
    Commit(DragCommit<T>),
}

/// Gesture state machine
#[derive(Debug, Clone)]
pub struct DragController<T> {
    phase: Phase<T>,
    pub threshold: i32,
    pub tolerance: i32,
    pub hint_mode: HintMode,
}

impl<T> Default for DragController<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD, DEFAULT_HIT_TOLERANCE)
    }
}

impl<T> DragController<T> {
    pub fn new(threshold: i32, tolerance: i32) -> Self {
        Self {
            phase: Phase::Idle,
            threshold: threshold.max(0),
            tolerance: tolerance.max(0),
            hint_mode: HintMode::Outline,
        }
    }

    pub fn with_hint_mode(mut self, mode: HintMode) -> Self {
        self.hint_mode = mode;
        self
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.phase, Phase::Armed(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// The gesture in progress, armed or dragging
    pub fn state(&self) -> Option<&DragState<T>> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Armed(state) | Phase::Dragging(state) => Some(state),
        }
    }

    pub fn target(&self) -> Option<&T> {
        self.state().map(|state| &state.target)
    }

    pub fn set_hint(&mut self, hint: Option<Rect>) {
        if let Phase::Dragging(state) = &mut self.phase {
            state.hint = hint;
        }
    }

    /// Arm the controller. Ignored (returns false) while a drag is running.
    pub fn press(&mut self, target: T, point: Point, start_offset: i32) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.phase = Phase::Armed(DragState {
            target,
            press: point,
            start_offset,
            current: point,
            hint: None,
        });
        true
    }

    pub fn motion(&mut self, point: Point) -> DragMotion {
        let threshold = self.threshold;
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => DragMotion::None,
            Phase::Armed(mut state) => {
                state.current = point;
                let delta = state.delta();
                if delta.x.abs() > threshold || delta.y.abs() > threshold {
                    self.phase = Phase::Dragging(state);
                    DragMotion::Started
                } else {
                    self.phase = Phase::Armed(state);
                    DragMotion::None
                }
            }
            Phase::Dragging(mut state) => {
                state.current = point;
                self.phase = Phase::Dragging(state);
                DragMotion::Moved
            }
        }
    }

    pub fn release(&mut self, point: Point) -> DragEnd<T> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => DragEnd::Nothing,
            Phase::Armed(state) => DragEnd::Click {
                target: state.target,
                point,
            },
            Phase::Dragging(state) => DragEnd::Commit(DragCommit {
                target: state.target,
                start: state.press,
                end: point,
                start_offset: state.start_offset,
            }),
        }
    }

    /// The host lost pointer capture mid-gesture
    pub fn capture_lost(&mut self) -> Option<DragState<T>> {
        self.abort()
    }

    /// Drop the gesture, returning what was in flight
    pub fn abort(&mut self) -> Option<DragState<T>> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => None,
            Phase::Armed(state) | Phase::Dragging(state) => Some(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_motion_stays_armed() {
        let mut drag = DragController::default();
        drag.press("sash", Point::new(100, 100), 200);
        assert_eq!(drag.motion(Point::new(102, 101)), DragMotion::None);
        assert!(drag.is_armed());
    }

    #[test]
    fn test_release_after_threshold_commits() {
        let mut drag = DragController::default();
        drag.press("sash", Point::new(200, 300), 200);
        assert_eq!(drag.motion(Point::new(220, 300)), DragMotion::Started);
        assert_eq!(drag.motion(Point::new(250, 300)), DragMotion::Moved);

        match drag.release(Point::new(250, 300)) {
            DragEnd::Commit(commit) => {
                assert_eq!(commit.target, "sash");
                assert_eq!(commit.start_offset, 200);
                assert_eq!(commit.delta_along(Orientation::Horizontal), 50);
            }
            other => panic!("expected commit, got {:?}", other),
        }
        assert!(drag.is_idle());
    }

    #[test]
    fn test_release_while_armed_is_click() {
        let mut drag = DragController::default();
        drag.press(7u32, Point::new(10, 10), 0);
        assert_eq!(
            drag.release(Point::new(11, 10)),
            DragEnd::Click {
                target: 7,
                point: Point::new(11, 10)
            }
        );
    }

    #[test]
    fn test_capture_lost_cancels() {
        let mut drag = DragController::default();
        drag.press("pane", Point::new(0, 0), 0);
        drag.motion(Point::new(40, 0));
        let cancelled = drag.capture_lost().unwrap();
        assert_eq!(cancelled.target, "pane");
        assert!(drag.is_idle());
        assert_eq!(drag.release(Point::new(40, 0)), DragEnd::Nothing);
    }

    #[test]
    fn test_press_ignored_while_dragging() {
        let mut drag = DragController::default();
        drag.press(1, Point::new(0, 0), 0);
        drag.motion(Point::new(0, 30));
        assert!(!drag.press(2, Point::new(5, 5), 0));
        assert_eq!(drag.target(), Some(&1));
    }
}
