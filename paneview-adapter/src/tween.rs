/// Fully shown, in per-mille.
pub const PROGRESS_SHOWN: u32 = 1000;

/// Eased per-mille progress of a script-driven slide.
///
/// Used where no rendering-layer transition exists to interpolate for us (the ribbon): the
/// renderer samples it every frame while an animation is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: u32,
    pub to: u32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: u32, to: u32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from: from.min(PROGRESS_SHOWN),
            to: to.min(PROGRESS_SHOWN),
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Progress at `now_ms`, in `0..=PROGRESS_SHOWN`.
    pub fn sample(&self, now_ms: u64) -> u32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);

        let from = self.from as f32;
        let to = self.to as f32;
        let v = from + (to - from) * eased;
        (v.round().max(0.0) as u32).min(PROGRESS_SHOWN)
    }

    /// Continues from wherever the slide is now toward a new target.
    pub fn retarget(&mut self, now_ms: u64, new_to: u32, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, self.easing);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
