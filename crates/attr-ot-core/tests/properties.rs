//! Algebraic properties of the reconciliation operations, checked over a
//! fixed universe of attribute maps covering scalars, nested values, and
//! deletion markers.

use attr_ot_core::{compose, diff, invert, transform, AttributeMap};
use serde_json::json;

fn attrs(value: serde_json::Value) -> AttributeMap {
    AttributeMap::from_json(value).expect("fixture must be a JSON object")
}

/// Updates exercised pairwise by every property below.
fn updates() -> Vec<AttributeMap> {
    vec![
        attrs(json!({})),
        attrs(json!({"bold": true})),
        attrs(json!({"bold": null})),
        attrs(json!({"bold": false, "italic": true})),
        attrs(json!({"color": "red"})),
        attrs(json!({"color": "blue", "bold": true})),
        attrs(json!({"font": {"family": "mono", "size": 12}})),
        attrs(json!({"font": {"family": "serif"}, "color": null})),
        attrs(json!({"list": [1, 2, {"deep": true}]})),
        attrs(json!({"italic": null, "size": 14})),
    ]
}

fn bases() -> Vec<AttributeMap> {
    vec![
        attrs(json!({})),
        attrs(json!({"bold": true})),
        attrs(json!({"color": "blue", "size": 12})),
        attrs(json!({"font": {"family": "mono", "size": 12}, "bold": false})),
    ]
}

/// Treat the absent result and the empty map as the same attribute state.
fn materialize(state: Option<AttributeMap>) -> AttributeMap {
    state.unwrap_or_default()
}

/// Apply an update delta to a concrete state (deletions finalized).
fn apply(state: &AttributeMap, update: Option<&AttributeMap>) -> AttributeMap {
    materialize(compose(Some(state), update, false))
}

#[test]
fn diff_of_a_state_with_itself_is_absent() {
    for m in updates() {
        assert_eq!(diff(Some(&m), Some(&m)), None, "diff({m}, {m})");
    }
}

#[test]
fn diff_is_a_recipe_from_a_to_b() {
    // diff relates concrete attribute states, so the fixtures are finalized
    // (markers applied) before diffing.
    let states: Vec<AttributeMap> = updates()
        .iter()
        .map(|m| apply(&AttributeMap::new(), Some(m)))
        .collect();
    for a in &states {
        for b in &states {
            let delta = diff(Some(a), Some(b));
            assert_eq!(&apply(a, delta.as_ref()), b, "diff({a}, {b})");
        }
    }
}

#[test]
fn invert_undoes_an_applied_update() {
    for base in bases() {
        for update in updates() {
            let inverse = invert(Some(&update), Some(&base));
            let applied = apply(&base, Some(&update));
            let restored = apply(&applied, Some(&inverse));
            assert_eq!(restored, base, "invert({update}, {base})");
        }
    }
}

#[test]
fn invert_composed_into_update_cancels_out() {
    for base in bases() {
        for update in updates() {
            let inverse = invert(Some(&update), Some(&base));
            let cancelled = compose(Some(&update), Some(&inverse), false);
            let restored = apply(&base, cancelled.as_ref());
            assert_eq!(restored, apply(&base, None), "invert({update}, {base})");
        }
    }
}

#[test]
fn transform_without_priority_echoes_b() {
    for a in updates() {
        for b in updates() {
            assert_eq!(transform(Some(&a), Some(&b), false), Some(b.clone()));
        }
    }
}

#[test]
fn transform_with_priority_never_reclaims_a_key() {
    for a in updates() {
        for b in updates() {
            if let Some(residual) = transform(Some(&a), Some(&b), true) {
                assert!(!residual.is_empty(), "empty map must be the absent result");
                for key in residual.keys() {
                    assert!(
                        !a.contains_key(key),
                        "transform({a}, {b}, true) re-emitted claimed key {key}"
                    );
                }
            }
        }
    }
}

#[test]
fn priority_transform_pair_converges() {
    // One replica applies a, then b transformed against a with priority; the
    // other applies b, then a transformed against b without priority. Both
    // must land on the same state from any base.
    for base in bases() {
        for a in updates() {
            for b in updates() {
                let ours = transform(Some(&a), Some(&b), true);
                let theirs = transform(Some(&b), Some(&a), false);

                let via_a = apply(&apply(&base, Some(&a)), ours.as_ref());
                let via_b = apply(&apply(&base, Some(&b)), theirs.as_ref());
                assert_eq!(via_a, via_b, "diverged for a={a}, b={b}, base={base}");
            }
        }
    }
}

#[test]
fn symmetric_priority_converges_without_conflicting_claims() {
    // When neither side contradicts the other on a shared key, both replicas
    // may transform with priority and still converge.
    for base in bases() {
        for a in updates() {
            for b in updates() {
                let conflicting = a
                    .keys()
                    .any(|key| b.contains_key(key) && a.get(key) != b.get(key));
                if conflicting {
                    continue;
                }

                let via_a = apply(
                    &apply(&base, Some(&a)),
                    transform(Some(&a), Some(&b), true).as_ref(),
                );
                let via_b = apply(
                    &apply(&base, Some(&b)),
                    transform(Some(&b), Some(&a), true).as_ref(),
                );
                assert_eq!(via_a, via_b, "diverged for a={a}, b={b}, base={base}");
            }
        }
    }
}

#[test]
fn operations_never_return_an_empty_map() {
    for a in updates() {
        for b in updates() {
            if let Some(result) = compose(Some(&a), Some(&b), false) {
                assert!(!result.is_empty());
            }
            if let Some(result) = compose(Some(&a), Some(&b), true) {
                assert!(!result.is_empty());
            }
            if let Some(result) = diff(Some(&a), Some(&b)) {
                assert!(!result.is_empty());
            }
            if let Some(result) = transform(Some(&a), Some(&b), true) {
                assert!(!result.is_empty());
            }
        }
    }
}
