use alloc::vec::Vec;

use crate::key::{KeyMap, ListKey};

/// One story as far as the ribbon preview cares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryEntry {
    /// Restricted to a privileged audience (e.g. close friends).
    pub privileged: bool,
}

/// A peer's story collection: ordered ids, loaded records and the read cursor.
#[derive(Clone, Debug)]
pub struct PeerStories<S> {
    pub ordered_ids: Vec<S>,
    pub by_id: KeyMap<S, StoryEntry>,
    /// Newest id the user has seen. `None` means nothing was read yet.
    pub last_read_id: Option<S>,
}

impl<S: ListKey + Ord> PeerStories<S> {
    pub fn new(ordered_ids: Vec<S>, last_read_id: Option<S>) -> Self {
        Self {
            ordered_ids,
            by_id: KeyMap::new(),
            last_read_id,
        }
    }

    pub fn with_entry(mut self, id: S, entry: StoryEntry) -> Self {
        self.by_id.insert(id, entry);
        self
    }

    /// `true` if any loaded privileged story is newer than the read cursor.
    ///
    /// Ids without a loaded record never count.
    pub fn has_unseen_privileged(&self) -> bool {
        self.ordered_ids.iter().any(|id| {
            let Some(entry) = self.by_id.get(id) else {
                return false;
            };
            let is_read = self.last_read_id.as_ref().is_some_and(|last| id <= last);
            entry.privileged && !is_read
        })
    }
}

/// Picks the peers shown as preview avatars.
///
/// A single-entry list is shown as is. Otherwise the current user and unresolvable ids are
/// skipped, the first `limit` are kept, and the result is reversed so the most recent peer is
/// drawn last (on top).
pub fn preview_peers<K: ListKey>(
    ordered_peer_ids: &[K],
    current_user: &K,
    limit: usize,
    mut is_resolvable: impl FnMut(&K) -> bool,
) -> Vec<K> {
    if let [only] = ordered_peer_ids {
        return if is_resolvable(only) {
            alloc::vec![only.clone()]
        } else {
            Vec::new()
        };
    }

    let mut peers: Vec<K> = ordered_peer_ids
        .iter()
        .filter(|id| *id != current_user && is_resolvable(*id))
        .take(limit)
        .cloned()
        .collect();
    peers.reverse();
    peers
}

/// Per preview peer: does it have unseen privileged stories?
///
/// Peers without a loaded collection map to `false`. Recomputed per pass, nothing is cached.
pub fn unseen_privileged<'a, K: ListKey, S: ListKey + Ord + 'a>(
    peers: &[K],
    mut stories: impl FnMut(&K) -> Option<&'a PeerStories<S>>,
) -> KeyMap<K, bool> {
    peers
        .iter()
        .map(|peer| {
            let flag = stories(peer).is_some_and(PeerStories::has_unseen_privileged);
            (peer.clone(), flag)
        })
        .collect()
}
