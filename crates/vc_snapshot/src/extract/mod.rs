//! Extraction of meaningful values out of hostile values.
//!
//! Hostile values cannot be reflected generically. [`extract`] instead runs
//! an ordered list of [`Strategy`]s, each recognising one shape of value,
//! and returns the result of the first one that succeeds.
//!
//! A strategy that fails to read the value, or panics while doing so, is
//! treated as not applicable and the next one is tried. When none applies
//! the value is *unextractable* and callers omit it, which is distinct from
//! an explicit null.

// -----------------------------------------------------------------------------
// Modules

mod strategies;

// -----------------------------------------------------------------------------
// Exports

pub use strategies::Strategy;

// -----------------------------------------------------------------------------
// extract

use vc_host::HostValue;
use vc_host::info::HostTypeId;

use crate::context::SnapshotContext;
use crate::error::contain;
use crate::node::SerializedNode;

/// Extracts `value`, returning `None` when it is unextractable.
///
/// `declared` is the member type the value was read through, used only for
/// diagnostics; strategies always inspect the runtime type.
///
/// Null is returned as [`SerializedNode::Null`] without running any strategy.
pub fn extract(
    cx: &SnapshotContext<'_>,
    value: &HostValue,
    declared: Option<HostTypeId>,
) -> Option<SerializedNode> {
    extract_with_strategy(cx, value, declared).map(|(_, node)| node)
}

/// Like [`extract`], also returning the strategy that matched.
///
/// Null values report no strategy.
pub fn extract_with_strategy(
    cx: &SnapshotContext<'_>,
    value: &HostValue,
    declared: Option<HostTypeId>,
) -> Option<(Option<Strategy>, SerializedNode)> {
    if value.is_null() {
        return Some((None, SerializedNode::Null));
    }

    for strategy in Strategy::ORDER {
        match contain(|| strategy.apply(cx, value)) {
            Ok(Some(node)) => return Some((Some(strategy), node)),
            Ok(None) => {}
            Err(e) => log::trace!("extraction strategy {strategy:?} failed: {e}"),
        }
    }

    let ty = value.runtime_type().or(declared);
    log::debug!(
        "no extraction strategy applies to a value of {}",
        ty.map_or_else(|| "an unknown type".to_owned(), |ty| cx.type_name(ty)),
    );
    None
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use vc_host::{AccessError, DynamicObject, HostValue};

    use super::{Strategy, extract, extract_with_strategy};
    use crate::cache::AccessPolicy;
    use crate::error::DiagnosticSink;
    use crate::node::SerializedNode;
    use crate::normalize::normalize;
    use crate::testing::{self, ids};

    fn run(value: &HostValue) -> Option<(Option<Strategy>, SerializedNode)> {
        let engine = testing::engine();
        let sink = DiagnosticSink::new();
        let cx = engine.context(AccessPolicy::PUBLIC_ONLY, &sink);
        extract_with_strategy(&cx, value, None)
    }

    fn to_json(value: &HostValue) -> Option<Value> {
        let (_, node) = run(value)?;
        Some(normalize(&node, &DiagnosticSink::new()))
    }

    #[test]
    fn hostile_array_keeps_order_and_nulls() {
        let squad = testing::squad(vec![
            testing::network_object("A", 111),
            HostValue::Null,
            testing::network_object("B", 222),
        ]);
        assert_eq!(
            to_json(&squad),
            Some(json!([
                { "name": "A", "instanceID": 111 },
                null,
                { "name": "B", "instanceID": 222 },
            ]))
        );
    }

    #[test]
    fn hostile_array_drops_unextractable_elements() {
        let squad = testing::squad(vec![
            testing::network_object("A", 111),
            testing::rng(),
            HostValue::Null,
        ]);
        assert_eq!(
            to_json(&squad),
            Some(json!([{ "name": "A", "instanceID": 111 }, null]))
        );
    }

    #[test]
    fn composite_identifier() {
        assert_eq!(
            to_json(&testing::prefab_type_id()),
            Some(json!({
                "kind": "Prefab",
                "isValid": true,
                "isPrefab": true,
                "prefabId": "[Index:152]",
            }))
        );
        // Not spawned yet: still a result, without a prefab id.
        assert_eq!(
            to_json(&testing::pending_type_id()),
            Some(json!({ "kind": "Invalid", "isValid": false, "isPrefab": false }))
        );
    }

    #[test]
    fn composite_without_prefab_flag() {
        let id = DynamicObject::new(ids::NETWORK_OBJECT_TYPE_ID)
            .with_value(
                "Kind",
                HostValue::Enum {
                    ty: ids::NETWORK_TYPE_ID_KIND,
                    value: 2,
                },
            )
            .with_value("IsValid", true)
            .with_getter("IsPrefab", || panic!("prefab table not loaded"));
        assert_eq!(
            to_json(&HostValue::object(id)),
            Some(json!({ "kind": "SceneObject", "isValid": true }))
        );
    }

    #[test]
    fn raw_values_carry_type_extras() {
        assert_eq!(
            to_json(&testing::player_ref(3)),
            Some(json!({ "raw": 3, "playerId": 2, "isRealPlayer": true }))
        );
        assert_eq!(
            to_json(&testing::network_id(17, false)),
            Some(json!({ "raw": 17, "isValid": false }))
        );
        assert_eq!(to_json(&testing::tick(64)), Some(json!({ "raw": 64 })));
    }

    #[test]
    fn first_matching_strategy_wins() {
        let cases = [
            (testing::network_object("Crate", 9), Strategy::Reference),
            (testing::object_guid(), Strategy::Guid),
            (testing::prefab_type_id(), Strategy::Composite),
            (testing::squad(Vec::new()), Strategy::HostileArray),
            (testing::network_bool(false), Strategy::Conversion),
            (testing::network_string("lobby"), Strategy::Value),
            (testing::network_counter(4, 40), Strategy::Value),
            (testing::tick(1), Strategy::Raw),
            (
                HostValue::Enum {
                    ty: ids::AUTHORITY_MODE,
                    value: 1,
                },
                Strategy::Enum,
            ),
        ];
        for (value, expected) in cases {
            let (strategy, _) = run(&value).unwrap();
            assert_eq!(strategy, Some(expected), "{value:?}");
        }

        let (_, node) = run(&testing::network_bool(false)).unwrap();
        assert_eq!(node, SerializedNode::Bool(false));
        let (_, node) = run(&testing::object_guid()).unwrap();
        assert_eq!(node, SerializedNode::String(testing::GUID.into()));
    }

    #[test]
    fn value_accessors_become_scalars() {
        assert_eq!(to_json(&testing::network_string("lobby")), Some(json!("lobby")));
        // `Value` is tried before `Raw`.
        assert_eq!(to_json(&testing::network_counter(4, 40)), Some(json!(4)));

        // A failing `Value` falls through to `Raw`.
        let counter = DynamicObject::new(ids::NETWORK_COUNTER)
            .with_getter("Value", || panic!("counter is not replicated"))
            .with_value("Raw", 40);
        assert_eq!(
            run(&HostValue::object(counter)).map(|(strategy, _)| strategy),
            Some(Some(Strategy::Raw))
        );
    }

    #[test]
    fn enums_become_integers() {
        let mode = HostValue::Enum {
            ty: ids::AUTHORITY_MODE,
            value: 2,
        };
        assert_eq!(to_json(&mode), Some(json!(2)));
    }

    #[test]
    fn null_is_not_unextractable() {
        assert_eq!(run(&HostValue::Null), Some((None, SerializedNode::Null)));
        assert_eq!(run(&testing::rng()), None);
    }

    #[test]
    fn failing_strategies_fall_through() {
        let panicking = DynamicObject::new(ids::NETWORK_ID)
            .with_getter("Raw", || panic!("simulation is not running"))
            .with_value("IsValid", true);
        assert_eq!(run(&HostValue::object(panicking)), None);

        // The guid display fails, nothing later applies.
        let guid = DynamicObject::new(ids::NETWORK_OBJECT_GUID).with_failure(
            "RawGuidValue",
            AccessError::NotSimulating("RawGuidValue".into()),
        );
        assert_eq!(run(&HostValue::object(guid)), None);
    }

    #[test]
    fn plain_extract_matches_strategy_result() {
        let engine = testing::engine();
        let sink = DiagnosticSink::new();
        let cx = engine.context(AccessPolicy::PUBLIC_ONLY, &sink);
        assert_eq!(
            extract(&cx, &testing::tick(5), Some(ids::TICK)),
            run(&testing::tick(5)).map(|(_, node)| node)
        );
    }
}
