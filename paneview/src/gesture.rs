use crate::{SwipeDirection, TextDirection};

/// Thresholds for turning a drag into a swipe.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeConfig {
    /// Minimum travel along the dominant axis.
    pub min_distance: f32,
    /// The dominant axis must exceed the other one by this factor.
    pub dominance_ratio: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_distance: 20.0,
            dominance_ratio: 1.5,
        }
    }
}

/// Classifies a completed drag by its dominant direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeClassifier {
    config: SwipeConfig,
}

impl SwipeClassifier {
    pub fn new(config: SwipeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SwipeConfig {
        self.config
    }

    /// Returns `None` for short drags and for drags that are neither clearly horizontal nor
    /// clearly vertical. Positive `dx` is rightward, positive `dy` downward.
    pub fn classify(&self, dx: f32, dy: f32) -> Option<SwipeDirection> {
        if !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        let (ax, ay) = (dx.abs(), dy.abs());
        let ratio = self.config.dominance_ratio.max(1.0);

        if ax >= self.config.min_distance && ax >= ay * ratio {
            return Some(if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            });
        }
        if ay >= self.config.min_distance && ay >= ax * ratio {
            return Some(if dy > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            });
        }
        None
    }
}

/// The swipe that closes a slide-in panel: toward the edge it slid in from.
pub fn close_direction(text_direction: TextDirection) -> SwipeDirection {
    match text_direction {
        TextDirection::Ltr => SwipeDirection::Right,
        TextDirection::Rtl => SwipeDirection::Left,
    }
}
