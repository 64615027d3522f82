use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use thiserror::Error;

use crate::HostValue;
use crate::info::HostTypeId;

// -----------------------------------------------------------------------------
// AccessError

/// Failure to read a member of a host instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("member `{0}` does not exist")]
    MissingMember(String),

    #[error("member `{member}` threw: {message}")]
    Threw { member: String, message: String },

    #[error("member `{0}` is only available during an active simulation")]
    NotSimulating(String),

    #[error("`{0}` is not supported by this object")]
    Unsupported(&'static str),

    #[error("host access panicked: {0}")]
    Panicked(String),
}

// -----------------------------------------------------------------------------
// Identity

/// Asset state of an identity-bearing object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AssetPath {
    /// A scene instance, no asset path is reported.
    #[default]
    NotAnAsset,
    /// An asset whose path could not be resolved.
    Unknown,
    Known(String),
}

/// Stable identity and display name of a host instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    name: String,
    instance_id: i64,
    asset_path: AssetPath,
}

impl Identity {
    #[inline]
    pub fn new(name: impl Into<String>, instance_id: i64) -> Self {
        Self {
            name: name.into(),
            instance_id,
            asset_path: AssetPath::NotAnAsset,
        }
    }

    /// Marks the identity as an asset, `None` meaning the path is unknown.
    pub fn with_asset_path(mut self, path: Option<String>) -> Self {
        self.asset_path = match path {
            Some(path) => AssetPath::Known(path),
            None => AssetPath::Unknown,
        };
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn instance_id(&self) -> i64 {
        self.instance_id
    }

    #[inline]
    pub const fn asset_path(&self) -> &AssetPath {
        &self.asset_path
    }
}

// -----------------------------------------------------------------------------
// HostObject

/// A borrowed handle to an instance owned by the host.
///
/// Every accessor may fail: some members only hold meaningful state while
/// the host runs a simulation, and reading them otherwise errors or panics.
/// Callers are expected to contain both.
pub trait HostObject: Send + Sync {
    /// Returns the runtime type of the instance.
    fn host_type(&self) -> HostTypeId;

    /// Returns the identity of identity-bearing objects (components,
    /// scene nodes, assets). Plain value types return `None`.
    fn identity(&self) -> Option<Identity> {
        None
    }

    /// Reads a field or property by name.
    fn read(&self, member: &str) -> Result<HostValue, AccessError>;

    /// Returns the host's string form of the instance.
    fn display_string(&self) -> Result<String, AccessError> {
        Err(AccessError::Unsupported("display_string"))
    }

    /// Returns the enabled state of behaviours.
    fn enabled(&self) -> Option<bool> {
        None
    }

    /// Returns the identity of the scene node owning a component.
    fn owner(&self) -> Option<Identity> {
        None
    }

    /// Returns the components attached to a scene node.
    fn components(&self) -> Vec<Arc<dyn HostObject>> {
        Vec::new()
    }
}
