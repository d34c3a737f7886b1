//! Scene container and the layered intersection engine.
//!
//! A scene is a flat list of primitives scanned linearly for every ray. Hits
//! are not reduced to the nearest one: up to [`TOP_K`] of the closest hits are
//! kept, sorted, and composited front to back so translucent surfaces stack.

use crate::{Color, Primitive, Ray};

/// Number of nearest hits that contribute to a pixel.
pub const TOP_K: usize = 8;

/// Candidate buffer size; trimmed back to `TOP_K` whenever it fills up.
const CAPACITY: usize = TOP_K * 2;

/// Reflection depth used by [`Scene::trace`].
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Distances at or below this are treated as misses.
pub const HIT_EPSILON: f32 = 1e-9;

/// How far a reflected ray's origin is pushed along its direction before it
/// is traced, so it does not immediately hit the surface it left.
pub const DEFAULT_REFLECTION_OFFSET: f32 = 1.0;

/// Stable handle to a primitive in a [`Scene`].
///
/// Handles are never reused within a scene, so a removed primitive's id stays
/// dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(u64);

/// A hit retained for compositing.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f32,
    color: Color,
}

impl Candidate {
    const EMPTY: Candidate = Candidate {
        distance: 0.0,
        color: Color::TRANSPARENT,
    };
}

/// An insertion-ordered collection of primitives.
///
/// The scene is read-only while tracing; `add` and `remove` take `&mut self`,
/// so the borrow checker keeps edits out of an in-flight render.
pub struct Scene {
    primitives: Vec<(PrimitiveId, Box<dyn Primitive>)>,
    next_id: u64,
    reflection_offset: f32,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            next_id: 0,
            reflection_offset: DEFAULT_REFLECTION_OFFSET,
        }
    }

    /// Set how far reflected rays are nudged before being traced.
    pub fn with_reflection_offset(mut self, offset: f32) -> Self {
        self.reflection_offset = offset;
        self
    }

    /// Add a primitive and return its handle.
    pub fn add<P: Primitive + 'static>(&mut self, primitive: P) -> PrimitiveId {
        self.add_boxed(Box::new(primitive))
    }

    /// Add an already boxed primitive and return its handle.
    pub fn add_boxed(&mut self, primitive: Box<dyn Primitive>) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.primitives.push((id, primitive));
        log::debug!("Added primitive {:?} ({} in scene)", id, self.primitives.len());
        id
    }

    /// Remove a primitive by handle.
    ///
    /// The last primitive is moved into the freed slot, so insertion order is
    /// not preserved across removals. Returns `None` for unknown handles.
    pub fn remove(&mut self, id: PrimitiveId) -> Option<Box<dyn Primitive>> {
        let index = self.primitives.iter().position(|(pid, _)| *pid == id)?;
        let (_, primitive) = self.primitives.swap_remove(index);
        log::debug!("Removed primitive {:?} ({} left)", id, self.primitives.len());
        Some(primitive)
    }

    /// Check whether a handle refers to a primitive in this scene.
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.primitives.iter().any(|(pid, _)| *pid == id)
    }

    /// Look up a primitive by handle.
    pub fn get(&self, id: PrimitiveId) -> Option<&dyn Primitive> {
        self.primitives
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p.as_ref())
    }

    /// Handles in scan order.
    pub fn ids(&self) -> impl Iterator<Item = PrimitiveId> + '_ {
        self.primitives.iter().map(|(id, _)| *id)
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Trace a ray with the default reflection depth.
    pub fn trace(&self, ray: &Ray) -> Color {
        self.trace_with_depth(ray, DEFAULT_MAX_DEPTH)
    }

    /// Trace a ray and composite everything it hits into one color.
    ///
    /// Every primitive is queried. The nearest [`TOP_K`] hits are retained in
    /// a buffer of twice that size which is partially reordered whenever it
    /// fills, so the scan costs O(N·K) rather than a full sort. A reflective
    /// hit that can still make the top K is shaded with a recursive trace of
    /// its reflected ray, `max_depth` bounding the recursion. The survivors
    /// are sorted by distance and folded front to back with
    /// [`Color::overlay`], stopping once the result is opaque.
    ///
    /// Returns [`Color::TRANSPARENT`] when nothing is hit.
    pub fn trace_with_depth(&self, ray: &Ray, max_depth: u32) -> Color {
        let mut hits = [Candidate::EMPTY; CAPACITY];
        let mut len = 0;

        for (_, primitive) in &self.primitives {
            if len == CAPACITY {
                keep_nearest(&mut hits[..len]);
                len = TOP_K;
            }

            let Some(hit) = primitive.intersect(ray) else {
                continue;
            };
            if hit.distance.is_nan() || hit.distance <= HIT_EPSILON {
                continue;
            }

            hits[len] = Candidate {
                distance: hit.distance,
                color: hit.color,
            };
            len += 1;

            if hit.reflectivity == 0 || max_depth == 0 {
                continue;
            }

            // Not worth a bounce if it can no longer reach the top K
            let closer = hits[..len]
                .iter()
                .filter(|c| c.distance < hit.distance)
                .count();
            if closer >= TOP_K {
                len -= 1;
                continue;
            }

            let bounce = hit.reflected.advanced(self.reflection_offset);
            let reflected_color = self.trace_with_depth(&bounce, max_depth - 1);
            hits[len - 1].color = hit.color.overlay_reflection(reflected_color, hit.reflectivity);
        }

        if len > TOP_K {
            keep_nearest(&mut hits[..len]);
            len = TOP_K;
        }

        composite(&mut hits[..len])
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Move the `TOP_K` smallest distances to the front (unordered).
///
/// `hits` must hold more than `TOP_K` entries.
fn keep_nearest(hits: &mut [Candidate]) {
    hits.select_nth_unstable_by(TOP_K, |a, b| a.distance.total_cmp(&b.distance));
}

/// Sort by distance and fold nearest-first with the "over" operator.
fn composite(hits: &mut [Candidate]) -> Color {
    hits.sort_unstable_by(|a, b| a.distance.total_cmp(&b.distance));

    let mut layers = hits.iter();
    let Some(front) = layers.next() else {
        return Color::TRANSPARENT;
    };

    let mut result = front.color;
    for layer in layers {
        if result.is_opaque() {
            break;
        }
        result = result.overlay(layer.color);
    }
    result
}
