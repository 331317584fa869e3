//! Entity storage.
//!
//! `EntityStore` wraps the hecs world together with the bookkeeping the world
//! alone cannot answer: insertion order of targets (for FIFO eviction and
//! ordered collision checks) and which logical entity owns each render
//! surface. It has no game behaviour of its own.

use std::collections::{HashMap, VecDeque};

use glam::DVec3;
use hecs::{Entity, World};

use pigpen_core::components::{Particle, Projectile, Renderable, Target};
use pigpen_core::constants::TARGET_SURFACES;
use pigpen_core::enums::{EntityKind, ParticleTint};
use pigpen_core::events::SimEvent;
use pigpen_core::types::{EntityId, Position, RenderHandle, Velocity};

/// The logical entity behind a render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub kind: EntityKind,
    pub entity: Entity,
}

/// Render handle allocation and the handle → owner lookup.
#[derive(Debug, Default)]
pub struct RenderRegistry {
    next_handle: u32,
    owners: HashMap<RenderHandle, Owner>,
}

impl RenderRegistry {
    fn allocate(&mut self, owner: Owner) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.owners.insert(handle, owner);
        handle
    }

    fn release(&mut self, handle: RenderHandle) {
        self.owners.remove(&handle);
    }

    /// Owning entity of a surface, if the surface is live.
    pub fn owner(&self, handle: RenderHandle) -> Option<Owner> {
        self.owners.get(&handle).copied()
    }

    /// Number of live surfaces.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Owns every live target, projectile and particle.
#[derive(Default)]
pub struct EntityStore {
    world: World,
    registry: RenderRegistry,
    /// Live targets, oldest first.
    target_order: VecDeque<Entity>,
    next_spawn_seq: u64,
    /// Scene add/remove notifications not yet handed out.
    scene_events: Vec<SimEvent>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for systems that update components in place.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn registry(&self) -> &RenderRegistry {
        &self.registry
    }

    /// Resolve a surface to its owner.
    pub fn owner_of(&self, handle: RenderHandle) -> Option<Owner> {
        self.registry.owner(handle)
    }

    /// Insert a target with one render surface per hit part.
    pub fn insert_target(&mut self, position: DVec3, velocity: DVec3, phase: f64, facing: f64) -> Entity {
        let spawn_seq = self.next_spawn_seq;
        self.next_spawn_seq += 1;

        let entity = self.world.reserve_entity();
        let handles = self.allocate_handles(entity, EntityKind::Target, TARGET_SURFACES.len());
        self.world.spawn_at(
            entity,
            (
                Position(position),
                Velocity(velocity),
                Target {
                    phase,
                    facing,
                    spawn_seq,
                },
                Renderable {
                    kind: EntityKind::Target,
                    handles,
                },
            ),
        );
        self.target_order.push_back(entity);
        entity
    }

    /// Insert a projectile in flight.
    pub fn insert_projectile(&mut self, position: DVec3, velocity: DVec3) -> Entity {
        let entity = self.world.reserve_entity();
        let handles = self.allocate_handles(entity, EntityKind::Projectile, 1);
        self.world.spawn_at(
            entity,
            (
                Position(position),
                Velocity(velocity),
                Projectile,
                Renderable {
                    kind: EntityKind::Projectile,
                    handles,
                },
            ),
        );
        entity
    }

    /// Insert one burst fragment.
    pub fn insert_particle(
        &mut self,
        position: DVec3,
        velocity: DVec3,
        life: u32,
        tint: ParticleTint,
    ) -> Entity {
        let entity = self.world.reserve_entity();
        let handles = self.allocate_handles(entity, EntityKind::Particle, 1);
        self.world.spawn_at(
            entity,
            (
                Position(position),
                Velocity(velocity),
                Particle { life, tint },
                Renderable {
                    kind: EntityKind::Particle,
                    handles,
                },
            ),
        );
        entity
    }

    /// Remove an entity and its render surfaces. Returns false if it was already gone.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let renderable = match self.world.remove_one::<Renderable>(entity) {
            Ok(r) => r,
            Err(_) => return false,
        };
        for handle in renderable.handles {
            self.registry.release(handle);
            self.scene_events.push(SimEvent::Removed {
                handle,
                kind: renderable.kind,
            });
        }
        if renderable.kind == EntityKind::Target {
            self.target_order.retain(|&e| e != entity);
        }
        self.world.despawn(entity).is_ok()
    }

    /// Remove the longest-lived target.
    pub fn evict_oldest_target(&mut self) -> Option<Entity> {
        let oldest = self.target_order.front().copied()?;
        self.remove(oldest);
        Some(oldest)
    }

    /// Live targets, oldest first.
    pub fn targets_in_order(&self) -> impl Iterator<Item = Entity> + '_ {
        self.target_order.iter().copied()
    }

    pub fn target_count(&self) -> usize {
        self.target_order.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    pub fn particle_count(&self) -> usize {
        self.world.query::<&Particle>().iter().count()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    /// Current position of an entity, if it is live.
    pub fn position(&self, entity: Entity) -> Option<DVec3> {
        self.world.get::<&Position>(entity).ok().map(|p| p.0)
    }

    /// Hand out scene add/remove notifications accumulated so far.
    pub fn drain_scene_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.scene_events)
    }

    fn allocate_handles(&mut self, entity: Entity, kind: EntityKind, count: usize) -> Vec<RenderHandle> {
        (0..count)
            .map(|_| {
                let handle = self.registry.allocate(Owner { kind, entity });
                self.scene_events.push(SimEvent::Added { handle, kind });
                handle
            })
            .collect()
    }
}

/// External id for an hecs entity.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_owns_one_surface_per_part() {
        let mut store = EntityStore::new();
        let e = store.insert_target(DVec3::ZERO, DVec3::ZERO, 0.0, 0.0);

        let handles = store.world().get::<&Renderable>(e).unwrap().handles.clone();
        assert_eq!(handles.len(), TARGET_SURFACES.len());
        for handle in handles {
            let owner = store.owner_of(handle).unwrap();
            assert_eq!(owner.entity, e);
            assert_eq!(owner.kind, EntityKind::Target);
        }
    }

    #[test]
    fn test_remove_releases_surfaces_and_emits_events() {
        let mut store = EntityStore::new();
        let e = store.insert_projectile(DVec3::ZERO, DVec3::Z);
        let added = store.drain_scene_events();
        assert_eq!(added.len(), 1);
        assert!(matches!(added[0], SimEvent::Added { kind: EntityKind::Projectile, .. }));

        assert!(store.remove(e));
        assert!(store.registry().is_empty());
        assert!(!store.contains(e));
        let removed = store.drain_scene_events();
        assert!(matches!(removed[0], SimEvent::Removed { kind: EntityKind::Projectile, .. }));

        // Second removal is a no-op.
        assert!(!store.remove(e));
        assert!(store.drain_scene_events().is_empty());
    }

    #[test]
    fn test_targets_kept_in_insertion_order() {
        let mut store = EntityStore::new();
        let a = store.insert_target(DVec3::ZERO, DVec3::ZERO, 0.0, 0.0);
        let b = store.insert_target(DVec3::X, DVec3::ZERO, 0.0, 0.0);
        let c = store.insert_target(DVec3::Y, DVec3::ZERO, 0.0, 0.0);

        store.remove(b);
        let order: Vec<Entity> = store.targets_in_order().collect();
        assert_eq!(order, vec![a, c]);

        assert_eq!(store.evict_oldest_target(), Some(a));
        assert_eq!(store.target_count(), 1);
        assert_eq!(store.targets_in_order().next(), Some(c));
    }

    #[test]
    fn test_spawn_seq_is_monotonic() {
        let mut store = EntityStore::new();
        let a = store.insert_target(DVec3::ZERO, DVec3::ZERO, 0.0, 0.0);
        store.remove(a);
        let b = store.insert_target(DVec3::ZERO, DVec3::ZERO, 0.0, 0.0);
        let seq = store.world().get::<&Target>(b).unwrap().spawn_seq;
        assert_eq!(seq, 1);
    }

    #[test]
    fn test_counts_by_kind() {
        let mut store = EntityStore::new();
        store.insert_target(DVec3::ZERO, DVec3::ZERO, 0.0, 0.0);
        store.insert_projectile(DVec3::ZERO, DVec3::Z);
        store.insert_projectile(DVec3::ZERO, DVec3::Z);
        store.insert_particle(DVec3::ZERO, DVec3::Y, 30, ParticleTint::Pink);
        assert_eq!(store.target_count(), 1);
        assert_eq!(store.projectile_count(), 2);
        assert_eq!(store.particle_count(), 1);
    }
}
