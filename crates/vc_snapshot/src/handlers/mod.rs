//! Hand-written component serializers.
//!
//! Some components cannot be reflected generically: their properties are
//! expensive, only valid mid-frame, or form cycles. A [`ComponentHandler`]
//! emits a fixed set of members for such a component instead.
//!
//! The [`HandlerRegistry`] is consulted before generic reflection. Custom
//! handlers are tried first, in registration order, then the built-ins:
//!
//! - [`TransformHandler`]: spatial transforms.
//! - [`CameraHandler`]: cameras, from an allow-list.
//! - [`UiDocumentHandler`]: UI documents, without their visual tree.
//! - [`HostileHandler`]: every component the classifier marks hostile.

// -----------------------------------------------------------------------------
// Modules

mod camera;
mod hostile;
mod transform;
mod ui_document;

// -----------------------------------------------------------------------------
// Exports

pub use camera::CameraHandler;
pub use hostile::HostileHandler;
pub use transform::TransformHandler;
pub use ui_document::{UiDocumentHandler, VISUAL_TREE_NOTE};

// -----------------------------------------------------------------------------
// ComponentHandler

use vc_host::HostObject;
use vc_host::info::TypeDesc;
use vc_host::registry::TypeRegistry;

use crate::context::SnapshotContext;
use crate::node::NodeMap;

/// A serializer for the components of specific types.
///
/// Member reads should go through [`SnapshotContext::read`] or
/// [`SnapshotContext::copy_member`], which contain host failures. A panic
/// escaping [`serialize`](Self::serialize) is caught by the engine, which then
/// degrades the component to its identity.
///
/// # Examples
///
/// ```
/// use vc_host::HostObject;
/// use vc_host::info::TypeDesc;
/// use vc_snapshot::handlers::{ComponentHandler, TypeMatch};
/// use vc_snapshot::{NodeMap, SnapshotContext};
///
/// struct HealthHandler;
///
/// impl ComponentHandler for HealthHandler {
///     fn name(&self) -> &str {
///         "health"
///     }
///
///     fn matches(&self, cx: &SnapshotContext<'_>, desc: &TypeDesc) -> bool {
///         TypeMatch::Exact("Game.Health").test(cx.registry(), desc)
///     }
///
///     fn serialize(&self, cx: &SnapshotContext<'_>, obj: &dyn HostObject) -> NodeMap {
///         let mut map = NodeMap::new();
///         cx.copy_member(obj, "current", &mut map);
///         map
///     }
/// }
/// ```
pub trait ComponentHandler: Send + Sync {
    /// A short name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns `true` if this handler serializes components of `desc`.
    fn matches(&self, cx: &SnapshotContext<'_>, desc: &TypeDesc) -> bool;

    /// Produces the `properties` map of `obj`.
    fn serialize(&self, cx: &SnapshotContext<'_>, obj: &dyn HostObject) -> NodeMap;

    /// Whether documents produced by this handler are flagged as hostile.
    fn marks_hostile(&self) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// TypeMatch

/// How a handler selects its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatch {
    /// Exactly the type at this full path.
    Exact(&'static str),
    /// The type at this full path, or any type deriving from it.
    DerivesFrom(&'static str),
}

impl TypeMatch {
    pub fn test(self, registry: &TypeRegistry, desc: &TypeDesc) -> bool {
        match self {
            TypeMatch::Exact(path) => desc.path() == path,
            TypeMatch::DerivesFrom(path) => registry.is_or_derives_from(desc.id(), path),
        }
    }
}

// -----------------------------------------------------------------------------
// HandlerRegistry

/// The ordered handler list of a [`SnapshotEngine`](crate::SnapshotEngine).
pub struct HandlerRegistry {
    custom: Vec<Box<dyn ComponentHandler>>,
    builtin: Vec<Box<dyn ComponentHandler>>,
}

impl HandlerRegistry {
    /// Creates a registry without any handler.
    pub fn empty() -> Self {
        Self {
            custom: Vec::new(),
            builtin: Vec::new(),
        }
    }

    /// Creates a registry with the built-in handlers.
    pub fn with_builtin() -> Self {
        Self {
            custom: Vec::new(),
            builtin: vec![
                Box::new(TransformHandler),
                Box::new(CameraHandler),
                Box::new(UiDocumentHandler),
                Box::new(HostileHandler),
            ],
        }
    }

    /// Registers a custom handler.
    ///
    /// Custom handlers take priority over the built-ins, and over custom
    /// handlers registered later.
    pub fn push(&mut self, handler: impl ComponentHandler + 'static) {
        self.custom.push(Box::new(handler));
    }

    /// Returns the first handler matching `desc`.
    pub fn find(&self, cx: &SnapshotContext<'_>, desc: &TypeDesc) -> Option<&dyn ComponentHandler> {
        self.iter().find(|handler| handler.matches(cx, desc))
    }

    /// Iterates handlers in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ComponentHandler> {
        self.custom
            .iter()
            .chain(self.builtin.iter())
            .map(|handler| &**handler)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.custom.len() + self.builtin.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl core::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|handler| handler.name()))
            .finish()
    }
}
