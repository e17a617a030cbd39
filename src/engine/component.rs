//! Component value types and the closed component model.
//!
//! Every component is a plain data record carried by the storage engine but
//! never interpreted by it: the renderer pulls GPU handles out of
//! [`Renderable`], the simulation step reads [`Physics`], and so on. No
//! component depends on another component's layout.
//!
//! ## Dispatch model
//! The component universe is closed. [`ComponentKind`] is the runtime type
//! tag and [`Component`] is the tagged union of all value types, so every
//! dispatch in the storage layer is a `match` resolved statically rather than
//! a lookup through runtime reflection. Adding a component type means adding
//! a variant to both enums and a column arm in `archetype.rs`; the compiler
//! then points at every site that needs extending.

use glam::Vec3;

use crate::engine::types::Signature;

/// Opaque handle to a compiled shader program owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque handle to an uploaded model (vertex/index buffers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u32);

/// Opaque handle to an uploaded texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Axis-aligned bounding box used as a collision hitbox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

/// Spatial placement of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub location: Vec3,
    /// Euler rotation, radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

/// Everything the renderer needs to draw an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Renderable {
    /// Shader program to bind.
    pub shader: ShaderHandle,
    /// Model geometry to draw.
    pub model: ModelHandle,
    /// Textures bound in unit order.
    pub textures: Vec<TextureHandle>,
}

/// A point light source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    /// Light color.
    pub color: Vec3,
    /// Distance attenuation factor.
    pub attenuation: f32,
}

/// Kinematic state integrated by the physics step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    /// Current velocity.
    pub velocity: Vec3,
    /// Current acceleration.
    pub acceleration: Vec3,
    /// Speed clamp applied after integration.
    pub max_speed: f32,
}

/// Collision participation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collidable {
    /// Hitbox in local space.
    pub hitbox: Aabb,
}

/// Runtime tag for a component type.
///
/// Declaration order is the registration order used everywhere a deterministic
/// component ordering is needed (column layout, read-back tuples).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ComponentKind {
    /// [`Transform`]
    Transform = 0,
    /// [`Renderable`]
    Renderable = 1,
    /// [`PointLight`]
    PointLight = 2,
    /// [`Physics`]
    Physics = 3,
    /// [`Collidable`]
    Collidable = 4,
}

impl ComponentKind {
    /// All kinds, in registration order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Transform,
        ComponentKind::Renderable,
        ComponentKind::PointLight,
        ComponentKind::Physics,
        ComponentKind::Collidable,
    ];

    /// Number of registered component kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Signature bit for this kind.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::Renderable => "Renderable",
            ComponentKind::PointLight => "PointLight",
            ComponentKind::Physics => "Physics",
            ComponentKind::Collidable => "Collidable",
        }
    }
}

/// A component value tagged with its kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// A [`Transform`] value.
    Transform(Transform),
    /// A [`Renderable`] value.
    Renderable(Renderable),
    /// A [`PointLight`] value.
    PointLight(PointLight),
    /// A [`Physics`] value.
    Physics(Physics),
    /// A [`Collidable`] value.
    Collidable(Collidable),
}

impl Component {
    /// Returns the kind tag of this value.
    #[inline]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Transform(_) => ComponentKind::Transform,
            Component::Renderable(_) => ComponentKind::Renderable,
            Component::PointLight(_) => ComponentKind::PointLight,
            Component::Physics(_) => ComponentKind::Physics,
            Component::Collidable(_) => ComponentKind::Collidable,
        }
    }

    /// Borrows the inner [`Transform`], if this is one.
    pub fn as_transform(&self) -> Option<&Transform> {
        match self {
            Component::Transform(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the inner [`Renderable`], if this is one.
    pub fn as_renderable(&self) -> Option<&Renderable> {
        match self {
            Component::Renderable(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the inner [`PointLight`], if this is one.
    pub fn as_point_light(&self) -> Option<&PointLight> {
        match self {
            Component::PointLight(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the inner [`Physics`], if this is one.
    pub fn as_physics(&self) -> Option<&Physics> {
        match self {
            Component::Physics(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the inner [`Collidable`], if this is one.
    pub fn as_collidable(&self) -> Option<&Collidable> {
        match self {
            Component::Collidable(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Transform> for Component {
    fn from(value: Transform) -> Self {
        Component::Transform(value)
    }
}

impl From<Renderable> for Component {
    fn from(value: Renderable) -> Self {
        Component::Renderable(value)
    }
}

impl From<PointLight> for Component {
    fn from(value: PointLight) -> Self {
        Component::PointLight(value)
    }
}

impl From<Physics> for Component {
    fn from(value: Physics) -> Self {
        Component::Physics(value)
    }
}

impl From<Collidable> for Component {
    fn from(value: Collidable) -> Self {
        Component::Collidable(value)
    }
}

/// Builds the signature covering the kinds present in `components`.
///
/// Duplicate kinds collapse into one bit; callers that must reject duplicates
/// compare the signature length against the tuple length.
pub fn signature_of(components: &[Component]) -> Signature {
    components.iter().map(Component::kind).collect()
}
