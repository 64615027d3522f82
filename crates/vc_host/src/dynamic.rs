use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::hash::HashMap;
use crate::info::HostTypeId;
use crate::{AccessError, HostObject, HostValue, Identity};

type Getter = Arc<dyn Fn() -> Result<HostValue, AccessError> + Send + Sync>;

enum MemberSlot {
    Value(HostValue),
    Getter(Getter),
    Fails(AccessError),
}

// -----------------------------------------------------------------------------
// DynamicObject

/// An in-memory [`HostObject`].
///
/// Members are constant values, lazy getters or scripted failures.
/// Getters are evaluated on every read, which lets instance graphs refer
/// back to themselves without building the cycle eagerly.
///
/// # Examples
///
/// ```
/// use vc_host::info::HostTypeId;
/// use vc_host::{AccessError, DynamicObject, HostObject, Identity};
///
/// let runner = DynamicObject::new(HostTypeId::new(52))
///     .with_identity(Identity::new("Runner", 42))
///     .with_value("IsServer", true)
///     .with_failure("Tick", AccessError::NotSimulating("Tick".into()));
///
/// assert_eq!(runner.read("IsServer").unwrap().as_bool(), Some(true));
/// assert!(runner.read("Tick").is_err());
/// assert!(matches!(runner.read("Missing"), Err(AccessError::MissingMember(_))));
/// ```
pub struct DynamicObject {
    ty: HostTypeId,
    identity: Option<Identity>,
    enabled: Option<bool>,
    owner: Option<Identity>,
    display: Option<String>,
    members: HashMap<Box<str>, MemberSlot>,
    components: Vec<Arc<dyn HostObject>>,
}

impl DynamicObject {
    pub fn new(ty: HostTypeId) -> Self {
        Self {
            ty,
            identity: None,
            enabled: None,
            owner: None,
            display: None,
            members: HashMap::default(),
            components: Vec::new(),
        }
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_owner(mut self, owner: Identity) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the string returned by [`HostObject::display_string`].
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_value(mut self, name: &str, value: impl Into<HostValue>) -> Self {
        self.members.insert(name.into(), MemberSlot::Value(value.into()));
        self
    }

    pub fn with_getter(
        mut self,
        name: &str,
        getter: impl Fn() -> Result<HostValue, AccessError> + Send + Sync + 'static,
    ) -> Self {
        self.members
            .insert(name.into(), MemberSlot::Getter(Arc::new(getter)));
        self
    }

    /// Makes every read of `name` fail with `error`.
    pub fn with_failure(mut self, name: &str, error: AccessError) -> Self {
        self.members.insert(name.into(), MemberSlot::Fails(error));
        self
    }

    pub fn with_component(mut self, component: Arc<dyn HostObject>) -> Self {
        self.components.push(component);
        self
    }

    #[inline]
    pub fn into_arc(self) -> Arc<dyn HostObject> {
        Arc::new(self)
    }
}

impl HostObject for DynamicObject {
    fn host_type(&self) -> HostTypeId {
        self.ty
    }

    fn identity(&self) -> Option<Identity> {
        self.identity.clone()
    }

    fn read(&self, member: &str) -> Result<HostValue, AccessError> {
        match self.members.get(member) {
            Some(MemberSlot::Value(value)) => Ok(value.clone()),
            Some(MemberSlot::Getter(getter)) => getter(),
            Some(MemberSlot::Fails(error)) => Err(error.clone()),
            None => Err(AccessError::MissingMember(member.to_string())),
        }
    }

    fn display_string(&self) -> Result<String, AccessError> {
        self.display
            .clone()
            .ok_or(AccessError::Unsupported("display_string"))
    }

    fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    fn owner(&self) -> Option<Identity> {
        self.owner.clone()
    }

    fn components(&self) -> Vec<Arc<dyn HostObject>> {
        self.components.clone()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::DynamicObject;
    use crate::info::HostTypeId;
    use crate::{HostObject, HostValue, Identity};

    const NODE: HostTypeId = HostTypeId::new(3);

    #[test]
    fn getter_is_evaluated_per_read() {
        let counter = Arc::new(core::sync::atomic::AtomicI64::new(0));
        let c = counter.clone();
        let obj = DynamicObject::new(NODE).with_getter("count", move || {
            Ok(HostValue::Int(
                c.fetch_add(1, core::sync::atomic::Ordering::Relaxed),
            ))
        });

        assert_eq!(obj.read("count").unwrap().as_i64(), Some(0));
        assert_eq!(obj.read("count").unwrap().as_i64(), Some(1));
    }

    #[test]
    fn components_are_shared() {
        let child = DynamicObject::new(NODE)
            .with_identity(Identity::new("Child", 2))
            .into_arc();
        let node = DynamicObject::new(NODE).with_component(child.clone());

        let components = node.components();
        assert_eq!(components.len(), 1);
        assert!(Arc::ptr_eq(&components[0], &child));
        assert!(node.display_string().is_err());
    }
}
