//! In-memory host for tests and simple embeddings

use crate::host::{Anchor, Host, MeasuredOverride, PlaceableRef, ShapeDescriptor};
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Measured prefill callback: shape, start velocity, end velocity, shape kind override
pub type MeasuredPrefill =
    Box<dyn Fn(&ShapeDescriptor, f64, Option<f64>, Option<&str>) -> MeasuredOverride>;

#[derive(Debug, Clone)]
struct SceneObject {
    anchor: Anchor,
    shape: Option<ShapeDescriptor>,
}

/// A flat scene of named placeables
///
/// Positions can be changed between generation calls to simulate moving
/// sources and targets.
pub struct Scene {
    grid_size: f64,
    objects: HashMap<String, SceneObject>,
    prefill: Option<MeasuredPrefill>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(grid_size: f64) -> Self {
        Self {
            grid_size,
            objects: HashMap::new(),
            prefill: None,
        }
    }

    /// Add or replace a placeable object
    pub fn add_object(&mut self, id: impl Into<String>, anchor: Anchor) {
        self.objects.insert(id.into(), SceneObject {
            anchor,
            shape: None,
        });
    }

    /// Add or replace a measured region
    pub fn add_measured(&mut self, id: impl Into<String>, anchor: Anchor, shape: ShapeDescriptor) {
        self.objects.insert(id.into(), SceneObject {
            anchor,
            shape: Some(shape),
        });
    }

    /// Move a placeable, returns `false` if it does not exist
    pub fn move_object(&mut self, id: &str, x: f64, y: f64) -> bool {
        match self.objects.get_mut(id) {
            Some(object) => {
                object.anchor.x = x;
                object.anchor.y = y;
                true
            }
            None => false,
        }
    }

    /// Remove a placeable from the scene
    pub fn remove_object(&mut self, id: &str) -> bool {
        self.objects.remove(id).is_some()
    }

    /// Install a measured prefill callback
    pub fn with_prefill<F>(mut self, prefill: F) -> Self
    where
        F: Fn(&ShapeDescriptor, f64, Option<f64>, Option<&str>) -> MeasuredOverride + 'static,
    {
        self.prefill = Some(Box::new(prefill));
        self
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("grid_size", &self.grid_size)
            .field("objects", &self.objects)
            .field("prefill", &self.prefill.is_some())
            .finish()
    }
}

impl Host for Scene {
    fn resolve_placeable(&self, id: &str) -> Option<PlaceableRef> {
        self.objects.get(id).map(|object| PlaceableRef {
            id: id.to_string(),
            shape: object.shape.clone(),
        })
    }

    fn anchor_position(&self, placeable: &PlaceableRef) -> Option<Anchor> {
        self.objects.get(&placeable.id).map(|object| object.anchor)
    }

    fn grid_size(&self) -> f64 {
        self.grid_size
    }

    fn measured_prefill(
        &self,
        shape: &ShapeDescriptor,
        velocity_start: f64,
        velocity_end: Option<f64>,
        kind: Option<&str>,
    ) -> MeasuredOverride {
        match &self.prefill {
            Some(prefill) => prefill(shape, velocity_start, velocity_end, kind),
            None => {
                debug!("No measured prefill installed for shape '{}'", shape.kind);
                MeasuredOverride::default()
            }
        }
    }
}
