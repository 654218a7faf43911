//! Reconciliation algebra over attribute maps.
//!
//! Four pure operations let independently produced attribute updates be
//! combined into one consistent result, and let an applied update be undone:
//!
//! | Operation | Answers |
//! |-----------|---------|
//! | [`compose`] | what is the state after applying an update onto a base? |
//! | [`diff`] | what minimal update turns state `a` into state `b`? |
//! | [`invert`] | what update undoes an applied update? |
//! | [`transform`] | what remains of update `b` after concurrent update `a` applied? |
//!
//! All four treat their inputs as immutable and allocate their outputs; none
//! can fail. `None` in an argument position is the absent / non-map input,
//! which [`compose`], [`diff`], and [`invert`] treat as an empty map.
//! `None` in a result is the "no change" sentinel; apart from the verbatim
//! pass-through branches of [`transform`], a returned map is never empty.
//! [`invert`] alone returns a plain map, where empty means "nothing to undo".

use crate::map::AttributeMap;
use crate::value::AttributeValue;

static EMPTY: AttributeMap = AttributeMap::new();

fn non_empty(map: AttributeMap) -> Option<AttributeMap> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Fold `update` onto `base`, producing the attribute state after the update.
///
/// `update` wins wherever it speaks; keys it is silent on keep their `base`
/// value. With `keep_remove = false`, deletion markers in `update` are
/// finalized: the marked keys are dropped from the result instead of being
/// recorded. With `keep_remove = true` the markers survive, so the result is
/// itself a reusable delta.
///
/// Returns `None` when the composed state has no keys.
#[must_use]
pub fn compose(
    base: Option<&AttributeMap>,
    update: Option<&AttributeMap>,
    keep_remove: bool,
) -> Option<AttributeMap> {
    let base = base.unwrap_or(&EMPTY);
    let update = update.unwrap_or(&EMPTY);

    let mut attributes = update.clone();
    if !keep_remove {
        attributes.retain(|_, value| !value.is_remove());
    }
    for (key, value) in base {
        if !update.contains_key(key) {
            attributes.insert(key.clone(), value.clone());
        }
    }

    tracing::trace!(
        base = base.len(),
        update = update.len(),
        keep_remove,
        result = attributes.len(),
        "composed attributes"
    );
    non_empty(attributes)
}

/// Compute the minimal update that turns state `a` into state `b`.
///
/// For every key where the two states disagree (by deep equality), the result
/// carries `b`'s value, or the deletion marker where `b` omits the key. Keys
/// the states agree on are omitted.
///
/// Returns `None` when the states are attribute-equal; otherwise the result
/// satisfies `compose(a, diff(a, b), false) == b` up to attribute equality.
#[must_use]
pub fn diff(a: Option<&AttributeMap>, b: Option<&AttributeMap>) -> Option<AttributeMap> {
    let a = a.unwrap_or(&EMPTY);
    let b = b.unwrap_or(&EMPTY);

    let mut attributes = AttributeMap::new();
    for key in a.keys().chain(b.keys()) {
        if a.get(key) != b.get(key) {
            let value = b.get(key).cloned().unwrap_or(AttributeValue::Remove);
            attributes.insert(key.clone(), value);
        }
    }

    tracing::trace!(
        a = a.len(),
        b = b.len(),
        result = attributes.len(),
        "diffed attributes"
    );
    non_empty(attributes)
}

/// Compute the update that undoes `update`, given the `base` it was applied to.
///
/// Keys that `update` changed get their original `base` value back; keys that
/// `update` introduced (absent from `base`) map to the deletion marker. Keys
/// `update` never touched, and keys where `update` and `base` already agreed,
/// are omitted.
///
/// Unlike the other operations this always returns a map: an empty map is the
/// meaningful "nothing to undo" result, and callers check emptiness directly.
#[must_use]
pub fn invert(update: Option<&AttributeMap>, base: Option<&AttributeMap>) -> AttributeMap {
    let update = update.unwrap_or(&EMPTY);
    let base = base.unwrap_or(&EMPTY);

    let mut inverted = AttributeMap::new();
    for (key, base_value) in base {
        if let Some(update_value) = update.get(key) {
            if update_value != base_value {
                inverted.insert(key.clone(), base_value.clone());
            }
        }
    }
    for key in update.keys() {
        if !base.contains_key(key) {
            inverted.insert(key.clone(), AttributeValue::Remove);
        }
    }

    tracing::trace!(
        update = update.len(),
        base = base.len(),
        result = inverted.len(),
        "inverted attributes"
    );
    inverted
}

/// Transform concurrent update `b` against already-applied update `a`.
///
/// Both updates derive from the same base state. With `priority = false` the
/// last-applied update wins outright, so `b` passes through verbatim, even
/// where the two disagree on a key. This is a deliberate last-write-wins
/// policy, not a missing merge. With `priority = true`, `a` is authoritative
/// on every key it defines (a deletion marker counts as a definition), and
/// the result is `b` restricted to the keys `a` leaves unclaimed.
///
/// An absent `a` leaves nothing to transform against, so `b` passes through
/// as-is. An absent `b` leaves no update to produce: the result is `None`,
/// as it is when the priority-filtered residual comes out empty.
#[must_use]
pub fn transform(
    a: Option<&AttributeMap>,
    b: Option<&AttributeMap>,
    priority: bool,
) -> Option<AttributeMap> {
    let Some(a) = a else {
        return b.cloned();
    };
    let b = b?;
    if !priority {
        return Some(b.clone());
    }

    let mut attributes = AttributeMap::new();
    for (key, value) in b {
        if !a.contains_key(key) {
            attributes.insert(key.clone(), value.clone());
        }
    }

    tracing::trace!(
        a = a.len(),
        b = b.len(),
        result = attributes.len(),
        "transformed attributes"
    );
    non_empty(attributes)
}
