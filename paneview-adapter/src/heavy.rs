use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Acquisition {
    duration_hint_ms: u64,
    acquired_at_ms: u64,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeMap<u64, Acquisition>,
}

/// The shared "heavy animation in flight" counter.
///
/// While any token is held, low-priority layout work should stay suspended. Handles are cheap
/// to clone and all clones observe the same counter; create one per UI tree and pass it to
/// every coordinator that animates.
///
/// The counter is the number of live acquisitions, so it can't go negative: releasing an id
/// twice is a logged no-op.
#[derive(Clone, Default)]
pub struct HeavyAnimations {
    inner: Rc<RefCell<Registry>>,
}

impl fmt::Debug for HeavyAnimations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeavyAnimations")
            .field("active", &self.active_count())
            .finish()
    }
}

impl HeavyAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a heavy animation. The returned token releases on drop.
    pub fn acquire(&self, duration_hint_ms: u64, now_ms: u64) -> HeavyAnimationToken {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id;
        reg.next_id = reg.next_id.wrapping_add(1);
        reg.active.insert(
            id,
            Acquisition {
                duration_hint_ms,
                acquired_at_ms: now_ms,
            },
        );
        vtrace!(id, duration_hint_ms, active = reg.active.len(), "heavy animation acquired");
        HeavyAnimationToken {
            id,
            owner: self.clone(),
        }
    }

    pub fn release(&self, token: HeavyAnimationToken) {
        drop(token);
    }

    /// Releases by id. Returns `false` if the id was not active (already released).
    pub fn release_id(&self, id: u64) -> bool {
        let mut reg = self.inner.borrow_mut();
        if reg.active.remove(&id).is_none() {
            vwarn!(id, "heavy animation released twice");
            return false;
        }
        vtrace!(id, active = reg.active.len(), "heavy animation released");
        true
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn is_animating(&self) -> bool {
        self.active_count() > 0
    }

    /// Acquisitions held longer than their declared duration at `now_ms`.
    ///
    /// Useful for diagnostics; the owners stay responsible for releasing.
    pub fn overdue(&self, now_ms: u64) -> usize {
        self.inner
            .borrow()
            .active
            .values()
            .filter(|a| now_ms.saturating_sub(a.acquired_at_ms) > a.duration_hint_ms)
            .count()
    }
}

/// A scoped heavy-animation acquisition. Released exactly once: explicitly via
/// [`HeavyAnimations::release`] or implicitly when dropped.
#[must_use = "dropping the token ends the heavy animation immediately"]
pub struct HeavyAnimationToken {
    id: u64,
    owner: HeavyAnimations,
}

impl HeavyAnimationToken {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for HeavyAnimationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeavyAnimationToken")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for HeavyAnimationToken {
    fn drop(&mut self) {
        self.owner.release_id(self.id);
    }
}
