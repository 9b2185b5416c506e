//! Generic set reconciliation.
//!
//! The canonical record may legitimately be an incomplete subset of the
//! remote history, so this building block is additive-or-updating only:
//! a matched canonical entity becomes an update, an unmatched one becomes
//! an add, and remote entries the canonical record has no knowledge of are
//! never scheduled for deletion. Skills are the sole section where
//! deletions are computed, and they are handled by `profile-skills`.
//!
//! A matched entity whose remote data already agrees with the canonical
//! one lands in `unchanged`: re-diffing after a successful apply must
//! yield an empty plan.

/// A canonical entity with no remote counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAddition<T> {
    pub data: T,
    /// Short human-readable identity for previews and logs, e.g.
    /// "Acme: Backend Developer".
    pub label: String,
}

/// A canonical entity matched to an existing remote entry whose data
/// differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetUpdate<T> {
    pub remote_id: i64,
    pub new_data: T,
    pub label: String,
}

/// An add/update plan for one set-reconciled section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDiff<T> {
    pub to_add: Vec<SetAddition<T>>,
    pub to_update: Vec<SetUpdate<T>>,
    /// Labels of matched entities already in their target state.
    pub unchanged: Vec<String>,
}

impl<T> Default for SetDiff<T> {
    fn default() -> Self {
        Self {
            to_add: Vec::new(),
            to_update: Vec::new(),
            unchanged: Vec::new(),
        }
    }
}

impl<T> SetDiff<T> {
    /// Whether applying this plan would mutate anything.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty()
    }
}

/// Reconcile canonical entities against a remote list.
///
/// `match_fn` resolves a canonical entity to the remote id of its
/// counterpart (0-or-1 — a total function, never a fuzzy score),
/// `is_current` decides whether a matched remote entry already carries the
/// canonical data, `map_fn` translates the entity into the platform
/// payload, and `label_fn` names it for previews and logs.
pub fn compute_set_diff<C, R, T>(
    canonical: &[C],
    remote: &[R],
    match_fn: impl Fn(&C, &[R]) -> Option<i64>,
    remote_id: impl Fn(&R) -> i64,
    is_current: impl Fn(&C, &R) -> bool,
    map_fn: impl Fn(&C) -> T,
    label_fn: impl Fn(&C) -> String,
) -> SetDiff<T> {
    let mut diff = SetDiff::default();
    for entity in canonical {
        match match_fn(entity, remote) {
            Some(id) => {
                let matched = remote.iter().find(|r| remote_id(r) == id);
                match matched {
                    Some(r) if is_current(entity, r) => diff.unchanged.push(label_fn(entity)),
                    _ => diff.to_update.push(SetUpdate {
                        remote_id: id,
                        new_data: map_fn(entity),
                        label: label_fn(entity),
                    }),
                }
            }
            None => diff.to_add.push(SetAddition {
                data: map_fn(entity),
                label: label_fn(entity),
            }),
        }
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn diff_by_name<'a>(
        canonical: &[(&'a str, &'a str)],
        remote: &[(i64, &'a str, &'a str)],
    ) -> SetDiff<String> {
        compute_set_diff(
            canonical,
            remote,
            |c, rs| rs.iter().find(|(_, name, _)| *name == c.0).map(|(id, ..)| *id),
            |r| r.0,
            |c, r| c.1 == r.2,
            |c| c.1.to_string(),
            |c| c.0.to_string(),
        )
    }

    #[test]
    fn splits_add_update_unchanged() {
        let canonical = vec![("alpha", "v2"), ("beta", "v1"), ("gamma", "v1")];
        let remote = vec![(10, "alpha", "v1"), (11, "gamma", "v1")];

        let diff = diff_by_name(&canonical, &remote);

        assert_eq!(diff.to_update.len(), 1);
        assert_eq!(diff.to_update[0].remote_id, 10);
        assert_eq!(diff.to_update[0].new_data, "v2");
        assert_eq!(diff.to_add.len(), 1);
        assert_eq!(diff.to_add[0].label, "beta");
        assert_eq!(diff.unchanged, vec!["gamma"]);
    }

    #[test]
    fn never_produces_deletions() {
        // Remote entries without a canonical counterpart are simply not
        // part of the plan.
        let diff = diff_by_name(&[], &[(10, "stale", "v1")]);
        assert!(diff.is_empty());
        assert!(diff.unchanged.is_empty());
    }

    #[test]
    fn fully_converged_plan_is_empty() {
        let canonical = vec![("alpha", "v1")];
        let remote = vec![(10, "alpha", "v1")];
        let diff = diff_by_name(&canonical, &remote);
        assert!(diff.is_empty());
        assert_eq!(diff.unchanged, vec!["alpha"]);
    }
}
