//! Entity storage
//!
//! A contiguous `Vec` kept sorted by id. Ids are handed out monotonically
//! and never reused, so a handle either resolves to the same entity or to
//! nothing once that entity has been compacted away.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Create an entity and return its handle
    pub fn spawn(&mut self, position: Vec2, size: Vec2, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.entities.push(Entity::new(id, position, size, kind));
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(move |i| &mut self.entities[i])
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    /// All stored entities in id order, including ones pending compaction
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.active)
    }

    /// Handles of active entities matching `pred`, in id order
    pub fn ids_where(&self, pred: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        self.active().filter(|e| pred(e)).map(|e| e.id).collect()
    }

    pub fn count_active(&self, pred: impl Fn(&Entity) -> bool) -> usize {
        self.active().filter(|e| pred(e)).count()
    }

    /// The single paddle / player entity
    pub fn paddle(&self) -> Option<&Entity> {
        self.active().find(|e| e.is_paddle())
    }

    pub fn paddle_mut(&mut self) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.active && e.is_paddle())
    }

    /// Physically remove inactive entities. Returns how many were dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.active);
        before - self.entities.len()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> EntityKind {
        EntityKind::Enemy { score_value: 1 }
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut store = EntityStore::new();
        let a = store.spawn(Vec2::ZERO, Vec2::ONE, enemy());
        let b = store.spawn(Vec2::new(3.0, 0.0), Vec2::ONE, enemy());
        assert_ne!(a, b);
        assert_eq!(store.get(b).map(|e| e.position.x), Some(3.0));
    }

    #[test]
    fn test_handles_survive_compaction() {
        let mut store = EntityStore::new();
        let a = store.spawn(Vec2::ZERO, Vec2::ONE, enemy());
        let b = store.spawn(Vec2::new(1.0, 0.0), Vec2::ONE, enemy());
        let c = store.spawn(Vec2::new(2.0, 0.0), Vec2::ONE, enemy());

        store.get_mut(b).unwrap().active = false;
        assert_eq!(store.count_active(|_| true), 2);
        assert_eq!(store.len(), 3);

        assert_eq!(store.compact(), 1);
        assert!(store.get(b).is_none());
        assert_eq!(store.get(a).unwrap().id, a);
        assert_eq!(store.get(c).unwrap().position.x, 2.0);
    }

    #[test]
    fn test_ids_not_reused() {
        let mut store = EntityStore::new();
        let a = store.spawn(Vec2::ZERO, Vec2::ONE, enemy());
        store.get_mut(a).unwrap().active = false;
        store.compact();
        let b = store.spawn(Vec2::ZERO, Vec2::ONE, enemy());
        assert!(b > a);
    }
}
