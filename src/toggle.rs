//! Pure set algebra over ordered value pools.
//!
//! Pools are ordered `Vec`s, not hash sets: the selection pool's order is
//! caller-visible (it is what the host renders as "the selection"), so every
//! operation here preserves the existing order and appends new values in
//! their given order. Nothing mutates its inputs.

/// Symmetric difference (XOR) between `values` and `pool`.
///
/// Values already in the pool are removed, absent ones are appended.
/// `toggle(&[a, b], &[a]) == [b]`.
pub fn toggle<V: Clone + PartialEq>(values: &[V], pool: &[V]) -> Vec<V> {
    let mut next: Vec<V> = pool
        .iter()
        .filter(|v| !values.contains(v))
        .cloned()
        .collect();
    next.extend(values.iter().filter(|v| !pool.contains(v)).cloned());
    next
}

/// Toggle driven by a caller-known prior state instead of per-value
/// membership.
///
/// `was_selected == false` appends every value not already present;
/// `was_selected == true` filters every given value out of the pool. This is
/// the only safe variant for batch toggles derived from one user click (a
/// branch activation toggling all its descendant leaves atomically): raw XOR
/// cannot express "I already know whether this group is currently fully
/// selected" when the group is partially present.
pub fn toggle_with_status_control<V: Clone + PartialEq>(
    was_selected: bool,
    values: &[V],
    pool: &[V],
) -> Vec<V> {
    if was_selected {
        pool.iter()
            .filter(|v| !values.contains(v))
            .cloned()
            .collect()
    } else {
        let mut next = pool.to_vec();
        next.extend(values.iter().filter(|v| !pool.contains(v)).cloned());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_removes_present_and_appends_absent() {
        assert_eq!(toggle(&["a", "b"], &["a"]), vec!["b"]);
        assert_eq!(toggle(&["x"], &[]), vec!["x"]);
        assert_eq!(toggle(&["x"], &["x"]), Vec::<&str>::new());
    }

    #[test]
    fn xor_preserves_pool_order() {
        assert_eq!(toggle(&["b"], &["c", "b", "a"]), vec!["c", "a"]);
        assert_eq!(toggle(&["d", "e"], &["c", "a"]), vec!["c", "a", "d", "e"]);
    }

    #[test]
    fn status_control_appends_missing_when_not_selected() {
        assert_eq!(
            toggle_with_status_control(false, &["a", "b"], &["c"]),
            vec!["c", "a", "b"]
        );
        // Already-present values are not duplicated.
        assert_eq!(
            toggle_with_status_control(false, &["a", "b"], &["b"]),
            vec!["b", "a"]
        );
    }

    #[test]
    fn status_control_filters_when_selected() {
        assert_eq!(
            toggle_with_status_control(true, &["a", "b"], &["a", "b", "c"]),
            vec!["c"]
        );
        assert_eq!(
            toggle_with_status_control(true, &["a"], &[]),
            Vec::<&str>::new()
        );
    }

    #[test]
    fn inputs_are_left_untouched() {
        let pool = vec![1, 2, 3];
        let _ = toggle(&[2], &pool);
        let _ = toggle_with_status_control(true, &[2], &pool);
        assert_eq!(pool, vec![1, 2, 3]);
    }
}
