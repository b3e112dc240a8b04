//=========================================================================
// Collision System
//=========================================================================
//
// Pairwise contact bookkeeping for edge-triggered collision hooks.
//
// The table remembers, per ordered pair and scene, whether the pair was
// touching on the previous evaluation. `transition` compares against the
// fresh overlap result and reports only the edges:
// ```text
//   was    now    →  event
//   false  true   →  Enter
//   true   false  →  Leave
//   same   same   →  none
// ```
// Geometry is not stored here; the scene manager reads colliders from
// the objects each time a pair is evaluated.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::trace;

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== Contact =============================================================

/// A touching-state edge for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Enter,
    Leave,
}

//=== CollisionSystem =====================================================

type PairKey<S> = (S, String, String);

/// Edge detector over ordered object pairs.
pub struct CollisionSystem<S: SceneKey> {
    touching: HashMap<PairKey<S>, bool>,
    inter_object: bool,
}

impl<S: SceneKey> CollisionSystem<S> {
    pub fn new() -> Self {
        Self {
            touching: HashMap::new(),
            inter_object: false,
        }
    }

    /// Whether object-versus-object pairs are evaluated in addition to
    /// object-versus-camera pairs.
    pub fn inter_object(&self) -> bool {
        self.inter_object
    }

    pub fn set_inter_object(&mut self, enabled: bool) {
        self.inter_object = enabled;
    }

    /// Records the fresh overlap result for `(a, b)` in `scene` and
    /// returns the edge, if any.
    pub fn transition(&mut self, scene: S, a: &str, b: &str, touching: bool) -> Option<Contact> {
        let key = (scene, a.to_string(), b.to_string());
        let was = self.touching.get(&key).copied().unwrap_or(false);
        self.touching.insert(key, touching);

        match (was, touching) {
            (false, true) => {
                trace!("{} entered {} in {:?}", a, b, scene);
                Some(Contact::Enter)
            }
            (true, false) => {
                trace!("{} left {} in {:?}", a, b, scene);
                Some(Contact::Leave)
            }
            _ => None,
        }
    }

    pub fn is_touching(&self, scene: S, a: &str, b: &str) -> bool {
        self.touching
            .get(&(scene, a.to_string(), b.to_string()))
            .copied()
            .unwrap_or(false)
    }

    /// Forgets both orderings of the pair, so a pair that still overlaps
    /// fires `Enter` on its next evaluation.
    pub fn reset(&mut self, scene: S, a: &str, b: &str) {
        self.touching.remove(&(scene, a.to_string(), b.to_string()));
        self.touching.remove(&(scene, b.to_string(), a.to_string()));
    }

    /// Forgets every pair in `scene` that involves `id`.
    pub fn purge(&mut self, scene: S, id: &str) {
        self.touching
            .retain(|(s, a, b), _| !(*s == scene && (a == id || b == id)));
    }

    /// Number of pairs currently recorded as touching.
    pub fn contact_count(&self) -> usize {
        self.touching.values().filter(|&&t| t).count()
    }
}

impl<S: SceneKey> Default for CollisionSystem<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        World,
        Lobby,
    }

    impl SceneKey for TestScene {}

    #[test]
    fn approach_then_retreat_fires_each_edge_once() {
        let mut c = CollisionSystem::new();
        let overlaps = [false, true, true, true, false, false];
        let events: Vec<_> = overlaps
            .iter()
            .filter_map(|&t| c.transition(TestScene::World, "npc0", "camera", t))
            .collect();
        assert_eq!(events, vec![Contact::Enter, Contact::Leave]);
    }

    #[test]
    fn pairs_are_tracked_per_scene() {
        let mut c = CollisionSystem::new();
        assert_eq!(
            c.transition(TestScene::World, "church", "camera", true),
            Some(Contact::Enter)
        );
        assert_eq!(
            c.transition(TestScene::Lobby, "church", "camera", true),
            Some(Contact::Enter)
        );
        assert!(c.is_touching(TestScene::World, "church", "camera"));
        assert_eq!(c.contact_count(), 2);
    }

    #[test]
    fn reset_rearms_enter_for_both_orderings() {
        let mut c = CollisionSystem::new();
        c.transition(TestScene::World, "enemy1", "bullet", true);
        c.transition(TestScene::World, "bullet", "enemy1", true);

        c.reset(TestScene::World, "enemy1", "bullet");

        assert_eq!(
            c.transition(TestScene::World, "enemy1", "bullet", true),
            Some(Contact::Enter)
        );
        assert_eq!(
            c.transition(TestScene::World, "bullet", "enemy1", true),
            Some(Contact::Enter)
        );
    }

    #[test]
    fn purge_forgets_every_pair_with_id() {
        let mut c = CollisionSystem::new();
        c.transition(TestScene::World, "enemy1", "camera", true);
        c.transition(TestScene::World, "enemy1", "bullet", true);
        c.transition(TestScene::World, "npc0", "camera", true);
        c.transition(TestScene::Lobby, "enemy1", "camera", true);

        c.purge(TestScene::World, "enemy1");

        assert!(!c.is_touching(TestScene::World, "enemy1", "camera"));
        assert!(!c.is_touching(TestScene::World, "enemy1", "bullet"));
        assert!(c.is_touching(TestScene::World, "npc0", "camera"));
        assert!(c.is_touching(TestScene::Lobby, "enemy1", "camera"));
    }

    #[test]
    fn inter_object_checks_start_disabled() {
        let mut c = CollisionSystem::<TestScene>::new();
        assert!(!c.inter_object());
        c.set_inter_object(true);
        assert!(c.inter_object());
    }
}
