//! Fixed-capacity dense stores for dynamic entities
//!
//! Both stores keep their live elements packed at the front and remove by
//! swapping the last element into the vacated slot. Objects additionally get
//! a stable `ObjectId` from a versioned `slotmap` that maps it to the current
//! dense index, so cross-object references survive the index shuffling.

use slotmap::{SlotMap, new_key_type};

use super::state::{GameObject, Spark};
use crate::consts::{MAX_OBJECTS, MAX_SPARKS};

new_key_type! {
    /// Stable reference to an object in the registry
    pub struct ObjectId;
}

/// Dense object array with swap-remove and stable ids
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    objects: Vec<GameObject>,
    /// Id to current dense index
    handles: SlotMap<ObjectId, usize>,
    capacity: usize,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::with_capacity(MAX_OBJECTS)
    }
}

impl ObjectRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
            handles: SlotMap::with_capacity_and_key(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.objects.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add an object, returning its id and dense index.
    /// Returns `None` (and drops the object) when the registry is full.
    pub fn add(&mut self, mut object: GameObject) -> Option<(ObjectId, usize)> {
        if self.is_full() {
            log::trace!("Object registry full, dropping {:?}", object.model);
            return None;
        }

        let index = self.objects.len();
        let id = self.handles.insert(index);
        object.id = Some(id);
        self.objects.push(object);
        Some((id, index))
    }

    /// Remove the object at `index`; the last object moves into its place
    pub fn remove(&mut self, index: usize) -> GameObject {
        let removed = self.objects.swap_remove(index);
        if let Some(id) = removed.id {
            self.handles.remove(id);
        }
        if let Some(moved) = self.objects.get(index).and_then(|o| o.id) {
            if let Some(dense) = self.handles.get_mut(moved) {
                *dense = index;
            }
        }
        removed
    }

    /// Dense index of a live object, `None` once it has been removed
    pub fn resolve(&self, id: ObjectId) -> Option<usize> {
        self.handles.get(id).copied()
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.resolve(id).map(|i| &self.objects[i])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.resolve(id).map(move |i| &mut self.objects[i])
    }

    /// Drop every object whose alive counter reached zero
    pub fn cull(&mut self) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.objects.len() {
            if self.objects[i].alive <= 0 {
                self.remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, GameObject> {
        self.objects.iter_mut()
    }

    pub fn as_slice(&self) -> &[GameObject] {
        &self.objects
    }
}

impl std::ops::Index<usize> for ObjectRegistry {
    type Output = GameObject;

    fn index(&self, index: usize) -> &GameObject {
        &self.objects[index]
    }
}

impl std::ops::IndexMut<usize> for ObjectRegistry {
    fn index_mut(&mut self, index: usize) -> &mut GameObject {
        &mut self.objects[index]
    }
}

/// Dense spark array with swap-remove
#[derive(Debug, Clone)]
pub struct SparkRegistry {
    sparks: Vec<Spark>,
    capacity: usize,
}

impl Default for SparkRegistry {
    fn default() -> Self {
        Self::with_capacity(MAX_SPARKS)
    }
}

impl SparkRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparks: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns false when the store is full and the spark was dropped
    pub fn add(&mut self, spark: Spark) -> bool {
        if self.sparks.len() >= self.capacity {
            return false;
        }
        self.sparks.push(spark);
        true
    }

    pub fn remove(&mut self, index: usize) -> Spark {
        self.sparks.swap_remove(index)
    }

    pub fn cull(&mut self) -> usize {
        let before = self.sparks.len();
        let mut i = 0;
        while i < self.sparks.len() {
            if self.sparks[i].life <= 0 {
                self.sparks.swap_remove(i);
            } else {
                i += 1;
            }
        }
        before - self.sparks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Spark> {
        self.sparks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Spark> {
        self.sparks.iter_mut()
    }
}
