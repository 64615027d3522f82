//! A small Unity-like host model with Fusion-like networking types.

use alloc::sync::Arc;

use vc_host::info::{EnumInfo, HostTypeId, MemberInfo, PrimitiveKind, TypeDesc, TypeKind};
use vc_host::registry::TypeRegistry;
use vc_host::traits::ScalarConversion;
use vc_host::{
    AccessError, DynamicObject, HostObject, HostValue, Identity, Scalar, VectorKind,
};

use crate::SnapshotEngine;

pub mod ids {
    use vc_host::info::HostTypeId;

    macro_rules! ids {
        ($($name:ident = $bits:literal),* $(,)?) => {
            $(pub const $name: HostTypeId = HostTypeId::new($bits);)*
        };
    }

    ids! {
        // System
        BOOL = 1,
        INT = 2,
        UINT = 3,
        FLOAT = 4,
        STRING = 5,
        INT_ARRAY = 6,

        // UnityEngine
        OBJECT = 10,
        COMPONENT = 11,
        BEHAVIOUR = 12,
        MONO_BEHAVIOUR = 13,
        SCRIPTABLE_OBJECT = 14,
        GAME_OBJECT = 15,
        VECTOR3 = 16,
        QUATERNION = 17,
        COLOR = 18,
        MATRIX4X4 = 19,
        TRANSFORM = 20,
        RECT_TRANSFORM = 21,
        CAMERA = 22,
        RENDERING_PATH = 23,
        CLEAR_FLAGS = 24,

        // UnityEngine.UIElements
        UI_DOCUMENT = 30,
        PANEL_SETTINGS = 31,
        VISUAL_TREE_ASSET = 32,
        VISUAL_ELEMENT = 33,

        // Fusion
        SIMULATION_BEHAVIOUR = 40,
        NETWORK_BEHAVIOUR = 41,
        NETWORK_OBJECT = 42,
        NETWORK_ID = 43,
        PLAYER_REF = 44,
        TICK = 45,
        NETWORK_BOOL = 46,
        NETWORK_OBJECT_TYPE_ID = 47,
        NETWORK_TYPE_ID_KIND = 48,
        NETWORK_PREFAB_ID = 49,
        NETWORK_OBJECT_GUID = 50,
        AUTHORITY_MODE = 51,
        NETWORK_RNG = 52,
        NETWORK_OBJECT_ARRAY = 53,
        NETWORK_STRING = 54,
        NETWORK_COUNTER = 55,

        // Game
        PLAYER_CONTROLLER = 60,
        INVENTORY = 61,
        STATS = 62,
        BASE_WEAPON = 63,
        SWORD = 64,
        TREE_NODE = 65,
        ROUTE = 66,
    }
}

// -----------------------------------------------------------------------------
// Registry

fn unity(id: HostTypeId, name: &str) -> vc_host::info::TypeDescBuilder {
    TypeDesc::builder(id, name).namespace("UnityEngine")
}

fn fusion(id: HostTypeId, name: &str) -> vc_host::info::TypeDescBuilder {
    TypeDesc::builder(id, name).namespace("Fusion")
}

fn game(id: HostTypeId, name: &str) -> vc_host::info::TypeDescBuilder {
    TypeDesc::builder(id, name).namespace("Game")
}

fn public_field(name: &str, ty: HostTypeId) -> MemberInfo {
    MemberInfo::field(name, ty).public()
}

fn public_property(name: &str, ty: HostTypeId) -> MemberInfo {
    MemberInfo::property(name, ty).public()
}

fn network_bool_to_scalar(obj: &dyn vc_host::HostObject) -> Result<Scalar, AccessError> {
    obj.read("_value")?
        .as_i64()
        .map(|v| Scalar::Bool(v != 0))
        .ok_or(AccessError::Unsupported("NetworkBool"))
}

pub fn registry() -> TypeRegistry {
    use ids::*;

    let primitive = |id, name: &str, kind| {
        TypeDesc::builder(id, name)
            .namespace("System")
            .kind(TypeKind::Primitive(kind))
            .build()
    };
    let value_type = |id, name: &str| unity(id, name).kind(TypeKind::Struct).build();

    let types = [
        primitive(BOOL, "Boolean", PrimitiveKind::Bool),
        primitive(INT, "Int32", PrimitiveKind::Int),
        primitive(UINT, "UInt32", PrimitiveKind::UInt),
        primitive(FLOAT, "Single", PrimitiveKind::Float),
        primitive(STRING, "String", PrimitiveKind::String),
        TypeDesc::builder(INT_ARRAY, "Int32[]")
            .namespace("System")
            .kind(TypeKind::Array(INT))
            .build(),
        // UnityEngine roots
        unity(OBJECT, "Object")
            .member(public_property("name", STRING))
            .build(),
        unity(COMPONENT, "Component")
            .base(OBJECT)
            .member(public_property("transform", TRANSFORM))
            .member(public_property("gameObject", GAME_OBJECT))
            .build(),
        unity(BEHAVIOUR, "Behaviour")
            .base(COMPONENT)
            .member(public_property("enabled", BOOL))
            .build(),
        unity(MONO_BEHAVIOUR, "MonoBehaviour")
            .base(BEHAVIOUR)
            .build(),
        unity(SCRIPTABLE_OBJECT, "ScriptableObject")
            .base(OBJECT)
            .build(),
        unity(GAME_OBJECT, "GameObject").base(OBJECT).build(),
        value_type(VECTOR3, "Vector3"),
        value_type(QUATERNION, "Quaternion"),
        value_type(COLOR, "Color"),
        value_type(MATRIX4X4, "Matrix4x4"),
        unity(TRANSFORM, "Transform")
            .base(COMPONENT)
            .members([
                public_property("position", VECTOR3),
                public_property("rotation", QUATERNION),
                public_property("parent", TRANSFORM),
                public_property("localToWorldMatrix", MATRIX4X4),
            ])
            .build(),
        unity(RECT_TRANSFORM, "RectTransform")
            .base(TRANSFORM)
            .build(),
        unity(CAMERA, "Camera")
            .base(BEHAVIOUR)
            .members([
                public_property("fieldOfView", FLOAT),
                public_property("renderingPath", RENDERING_PATH),
                public_property("projectionMatrix", MATRIX4X4),
            ])
            .build(),
        unity(RENDERING_PATH, "RenderingPath")
            .kind(TypeKind::Enum(EnumInfo::new([
                ("UsePlayerSettings", -1),
                ("VertexLit", 0),
                ("Forward", 1),
                ("DeferredShading", 3),
            ])))
            .build(),
        unity(CLEAR_FLAGS, "CameraClearFlags")
            .kind(TypeKind::Enum(EnumInfo::new([
                ("Skybox", 1),
                ("SolidColor", 2),
                ("Depth", 3),
                ("Nothing", 4),
            ])))
            .build(),
        // UnityEngine.UIElements
        TypeDesc::builder(UI_DOCUMENT, "UIDocument")
            .namespace("UnityEngine.UIElements")
            .base(MONO_BEHAVIOUR)
            .members([
                public_property("panelSettings", PANEL_SETTINGS),
                public_property("visualTreeAsset", VISUAL_TREE_ASSET),
                public_property("sortingOrder", FLOAT),
                public_property("parentUI", UI_DOCUMENT),
                public_property("rootVisualElement", VISUAL_ELEMENT),
            ])
            .build(),
        TypeDesc::builder(PANEL_SETTINGS, "PanelSettings")
            .namespace("UnityEngine.UIElements")
            .base(SCRIPTABLE_OBJECT)
            .build(),
        TypeDesc::builder(VISUAL_TREE_ASSET, "VisualTreeAsset")
            .namespace("UnityEngine.UIElements")
            .base(SCRIPTABLE_OBJECT)
            .build(),
        TypeDesc::builder(VISUAL_ELEMENT, "VisualElement")
            .namespace("UnityEngine.UIElements")
            .members([
                public_property("parent", VISUAL_ELEMENT),
                public_property("name", STRING),
            ])
            .build(),
        // Fusion
        fusion(SIMULATION_BEHAVIOUR, "SimulationBehaviour")
            .base(MONO_BEHAVIOUR)
            .member(public_property("Runner", OBJECT))
            .build(),
        fusion(NETWORK_BEHAVIOUR, "NetworkBehaviour")
            .base(SIMULATION_BEHAVIOUR)
            .members([
                public_property("Object", NETWORK_OBJECT),
                public_property("HasStateAuthority", BOOL),
            ])
            .build(),
        fusion(NETWORK_OBJECT, "NetworkObject")
            .base(MONO_BEHAVIOUR)
            .member(public_property("Id", NETWORK_ID))
            .build(),
        fusion(NETWORK_ID, "NetworkId")
            .kind(TypeKind::Struct)
            .members([public_field("Raw", UINT), public_property("IsValid", BOOL)])
            .build(),
        fusion(PLAYER_REF, "PlayerRef")
            .kind(TypeKind::Struct)
            .members([
                public_property("Raw", INT),
                public_property("PlayerId", INT),
                public_property("IsRealPlayer", BOOL),
            ])
            .build(),
        fusion(TICK, "Tick")
            .kind(TypeKind::Struct)
            .member(public_field("Raw", INT))
            .build(),
        fusion(NETWORK_BOOL, "NetworkBool")
            .kind(TypeKind::Struct)
            .member(MemberInfo::field("_value", INT))
            .with_trait(ScalarConversion::new(network_bool_to_scalar))
            .build(),
        fusion(NETWORK_OBJECT_TYPE_ID, "NetworkObjectTypeId")
            .kind(TypeKind::Struct)
            .members([
                public_property("Kind", NETWORK_TYPE_ID_KIND),
                public_property("IsValid", BOOL),
                public_property("IsPrefab", BOOL),
                public_property("AsPrefabId", NETWORK_PREFAB_ID),
            ])
            .build(),
        fusion(NETWORK_TYPE_ID_KIND, "NetworkTypeIdKind")
            .kind(TypeKind::Enum(EnumInfo::new([
                ("Invalid", 0),
                ("Prefab", 1),
                ("SceneObject", 2),
                ("InternalStruct", 3),
                ("Custom", 4),
            ])))
            .build(),
        fusion(NETWORK_PREFAB_ID, "NetworkPrefabId")
            .kind(TypeKind::Struct)
            .member(public_field("RawValue", UINT))
            .build(),
        fusion(NETWORK_OBJECT_GUID, "NetworkObjectGuid")
            .kind(TypeKind::Struct)
            .member(public_field("RawGuidValue", INT_ARRAY))
            .build(),
        fusion(AUTHORITY_MODE, "AuthorityMode")
            .kind(TypeKind::Enum(EnumInfo::new([
                ("Server", 0),
                ("Client", 1),
                ("Shared", 2),
            ])))
            .build(),
        fusion(NETWORK_RNG, "NetworkRNG")
            .kind(TypeKind::Struct)
            .member(MemberInfo::field("_state", UINT))
            .build(),
        fusion(NETWORK_STRING, "NetworkString")
            .kind(TypeKind::Struct)
            .member(public_property("Value", STRING))
            .build(),
        fusion(NETWORK_COUNTER, "NetworkCounter")
            .kind(TypeKind::Struct)
            .members([public_property("Value", INT), public_field("Raw", INT)])
            .build(),
        TypeDesc::builder(NETWORK_OBJECT_ARRAY, "NetworkObject[]")
            .kind(TypeKind::Array(NETWORK_OBJECT))
            .build(),
        // Game
        game(PLAYER_CONTROLLER, "PlayerController")
            .base(NETWORK_BEHAVIOUR)
            .members([
                public_property("Owner", PLAYER_REF),
                public_field("Id", NETWORK_ID),
                public_field("Spawned", TICK),
                public_field("Target", NETWORK_OBJECT),
                public_field("Missing", NETWORK_OBJECT),
                public_field("Rng", NETWORK_RNG),
                public_field("IsReady", NETWORK_BOOL),
                public_field("TypeId", NETWORK_OBJECT_TYPE_ID),
                public_field("PendingTypeId", NETWORK_OBJECT_TYPE_ID),
                public_field("Guid", NETWORK_OBJECT_GUID),
                public_field("Mode", AUTHORITY_MODE),
                public_field("Squad", NETWORK_OBJECT_ARRAY),
                public_field("Nickname", STRING),
                public_field("Broken", INT),
                public_field("Focus", OBJECT),
                MemberInfo::field("_secret", INT).serialize_field(),
            ])
            .build(),
        game(INVENTORY, "Inventory")
            .base(MONO_BEHAVIOUR)
            .members([
                public_field("label", STRING),
                public_property("count", INT),
                MemberInfo::field("_cached", INT).serialize_field(),
                MemberInfo::field("_internal", INT),
                MemberInfo::field("<Auto>k__BackingField", INT)
                    .serialize_field()
                    .compiler_generated(),
                public_property("Item", INT).indexed(),
                public_property("sink", INT).write_only(),
                public_field("instances", INT).static_member(),
                public_property("transform", TRANSFORM),
                public_property("localToWorld", MATRIX4X4),
                public_field("position", VECTOR3),
                public_field("stats", STATS),
            ])
            .build(),
        game(STATS, "Stats")
            .kind(TypeKind::Struct)
            .members([public_field("hp", INT), public_field("speed", FLOAT)])
            .build(),
        game(BASE_WEAPON, "BaseWeapon")
            .base(MONO_BEHAVIOUR)
            .members([public_field("damage", INT), public_field("weight", FLOAT)])
            .build(),
        game(SWORD, "Sword")
            .base(BASE_WEAPON)
            .members([public_field("damage", FLOAT), public_field("sharpness", FLOAT)])
            .build(),
        game(TREE_NODE, "TreeNode")
            .members([public_field("label", STRING), public_field("next", TREE_NODE)])
            .build(),
        game(ROUTE, "Route")
            .base(MONO_BEHAVIOUR)
            .member(public_field("start", TREE_NODE))
            .build(),
    ];

    let mut registry = TypeRegistry::new();
    for desc in types {
        registry.register(desc);
    }
    registry
}

pub fn engine() -> SnapshotEngine {
    SnapshotEngine::new(Arc::new(registry()))
}

// -----------------------------------------------------------------------------
// Values

pub fn network_object(name: &str, instance_id: i64) -> HostValue {
    HostValue::object(
        DynamicObject::new(ids::NETWORK_OBJECT)
            .with_identity(Identity::new(name, instance_id))
            .with_failure("Id", AccessError::NotSimulating("Id".into())),
    )
}

pub fn network_id(raw: u32, valid: bool) -> HostValue {
    HostValue::object(
        DynamicObject::new(ids::NETWORK_ID)
            .with_value("Raw", raw)
            .with_value("IsValid", valid),
    )
}

pub fn player_ref(raw: i32) -> HostValue {
    HostValue::object(
        DynamicObject::new(ids::PLAYER_REF)
            .with_value("Raw", raw)
            .with_value("PlayerId", raw - 1)
            .with_value("IsRealPlayer", raw > 0),
    )
}

pub fn tick(raw: i32) -> HostValue {
    HostValue::object(DynamicObject::new(ids::TICK).with_value("Raw", raw))
}

pub fn network_bool(value: bool) -> HostValue {
    HostValue::object(DynamicObject::new(ids::NETWORK_BOOL).with_value("_value", i32::from(value)))
}

pub fn prefab_type_id() -> HostValue {
    let prefab_id = DynamicObject::new(ids::NETWORK_PREFAB_ID)
        .with_value("RawValue", 153_u32)
        .with_display("[Index:152]");
    HostValue::object(
        DynamicObject::new(ids::NETWORK_OBJECT_TYPE_ID)
            .with_value(
                "Kind",
                HostValue::Enum {
                    ty: ids::NETWORK_TYPE_ID_KIND,
                    value: 1,
                },
            )
            .with_value("IsValid", true)
            .with_value("IsPrefab", true)
            .with_value("AsPrefabId", HostValue::object(prefab_id)),
    )
}

/// The type id of an object that was not spawned yet.
pub fn pending_type_id() -> HostValue {
    HostValue::object(
        DynamicObject::new(ids::NETWORK_OBJECT_TYPE_ID)
            .with_value(
                "Kind",
                HostValue::Enum {
                    ty: ids::NETWORK_TYPE_ID_KIND,
                    value: 0,
                },
            )
            .with_value("IsValid", false)
            .with_value("IsPrefab", false)
            .with_failure(
                "AsPrefabId",
                AccessError::Threw {
                    member: "AsPrefabId".into(),
                    message: "not a prefab".into(),
                },
            ),
    )
}

pub fn network_string(value: &str) -> HostValue {
    HostValue::object(DynamicObject::new(ids::NETWORK_STRING).with_value("Value", value))
}

/// Exposes both a `Value` and a `Raw` accessor.
pub fn network_counter(value: i32, raw: i32) -> HostValue {
    HostValue::object(
        DynamicObject::new(ids::NETWORK_COUNTER)
            .with_value("Value", value)
            .with_value("Raw", raw),
    )
}

pub const GUID: &str = "8d3c2f0a9b6e4c1d";

pub fn object_guid() -> HostValue {
    HostValue::object(
        DynamicObject::new(ids::NETWORK_OBJECT_GUID)
            .with_value(
                "RawGuidValue",
                HostValue::Array {
                    elem: ids::INT,
                    items: vec![HostValue::Int(1), HostValue::Int(2)],
                },
            )
            .with_display(GUID),
    )
}

/// A hostile value no strategy understands.
pub fn rng() -> HostValue {
    HostValue::object(DynamicObject::new(ids::NETWORK_RNG).with_value("_state", 77_u32))
}

pub fn squad(items: Vec<HostValue>) -> HostValue {
    HostValue::Array {
        elem: ids::NETWORK_OBJECT,
        items,
    }
}

pub fn player_controller() -> DynamicObject {
    DynamicObject::new(ids::PLAYER_CONTROLLER)
        .with_identity(Identity::new("Player", 4242))
        .with_enabled(true)
        .with_owner(Identity::new("PlayerRoot", 4000))
        .with_getter("Runner", || panic!("Runner read outside of a simulation"))
        .with_failure("Object", AccessError::NotSimulating("Object".into()))
        .with_value("Owner", player_ref(3))
        .with_value("Id", network_id(17, true))
        .with_value("Spawned", tick(1200))
        .with_value("Target", network_object("Crate", 900))
        .with_value("Missing", HostValue::Null)
        .with_value("Rng", rng())
        .with_value("IsReady", network_bool(true))
        .with_value("TypeId", prefab_type_id())
        .with_value("PendingTypeId", pending_type_id())
        .with_value("Guid", object_guid())
        .with_value(
            "Mode",
            HostValue::Enum {
                ty: ids::AUTHORITY_MODE,
                value: 2,
            },
        )
        .with_value(
            "Squad",
            squad(vec![
                network_object("A", 111),
                HostValue::Null,
                network_object("B", 222),
            ]),
        )
        .with_value("Nickname", "ace")
        .with_failure(
            "Broken",
            AccessError::Threw {
                member: "Broken".into(),
                message: "boom".into(),
            },
        )
        .with_value("Focus", network_id(9, false))
        .with_value("_secret", 5)
}

pub fn inventory() -> DynamicObject {
    let stats = DynamicObject::new(ids::STATS)
        .with_value("hp", 30)
        .with_value("speed", 1.5);

    DynamicObject::new(ids::INVENTORY)
        .with_identity(Identity::new("Backpack", 77))
        .with_value("label", "backpack")
        .with_value("count", 3)
        .with_value("_cached", 9)
        .with_value("_internal", 1)
        .with_value("<Auto>k__BackingField", 2)
        .with_getter("Item", || panic!("indexer read without an index"))
        .with_value("instances", 12)
        .with_value("position", HostValue::vector(VectorKind::Vector3, &[1.0, 2.0, 3.0]))
        .with_value("stats", HostValue::object(stats))
}

/// A linked chain of nodes with no end, produced lazily.
pub fn endless_chain(index: i64) -> HostValue {
    HostValue::object(
        DynamicObject::new(ids::TREE_NODE)
            .with_value("label", format!("node {index}"))
            .with_getter("next", move || Ok(endless_chain(index + 1))),
    )
}

// -----------------------------------------------------------------------------
// Faulty accessors

/// The host accessor a [`Faulty`] object panics in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Identity,
    Enabled,
    Owner,
}

/// Wraps an object, panicking in one accessor other than `read`.
pub struct Faulty {
    inner: DynamicObject,
    fault: Fault,
}

impl Faulty {
    pub fn new(inner: DynamicObject, fault: Fault) -> Self {
        Self { inner, fault }
    }
}

impl HostObject for Faulty {
    fn host_type(&self) -> HostTypeId {
        self.inner.host_type()
    }

    fn identity(&self) -> Option<Identity> {
        if self.fault == Fault::Identity {
            panic!("instance was destroyed");
        }
        self.inner.identity()
    }

    fn read(&self, member: &str) -> Result<HostValue, AccessError> {
        self.inner.read(member)
    }

    fn display_string(&self) -> Result<String, AccessError> {
        self.inner.display_string()
    }

    fn enabled(&self) -> Option<bool> {
        if self.fault == Fault::Enabled {
            panic!("behaviour is not attached");
        }
        self.inner.enabled()
    }

    fn owner(&self) -> Option<Identity> {
        if self.fault == Fault::Owner {
            panic!("owner is not spawned");
        }
        self.inner.owner()
    }

    fn components(&self) -> Vec<Arc<dyn HostObject>> {
        self.inner.components()
    }
}
