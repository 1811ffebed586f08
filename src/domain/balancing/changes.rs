use crate::domain::balancing::cost::Assignment;
use crate::domain::participant::Side;
use std::collections::HashMap;

/// Flags, per participant id in `current`, whether they switched sides since `previous`.
///
/// No previous assignment yields an empty map. Participants absent from
/// `previous` are reported as unchanged.
pub fn detect_changes(
    previous: Option<&Assignment>,
    current: &Assignment,
) -> HashMap<String, bool> {
    let Some(previous) = previous else {
        return HashMap::new();
    };

    let mut changes = HashMap::with_capacity(current.team_a.len() + current.team_b.len());
    for side in [Side::A, Side::B] {
        for p in current.team(side) {
            let moved = previous.side_of(&p.id) == Some(side.opposite());
            changes.insert(p.id.clone(), moved);
        }
    }
    changes
}

/// Name-keyed variant of [`detect_changes`].
///
/// Participants sharing a display name collapse into one entry, which is why
/// [`detect_changes`] keys by id.
pub fn detect_changes_by_name(
    previous: Option<&Assignment>,
    current: &Assignment,
) -> HashMap<String, bool> {
    let Some(previous) = previous else {
        return HashMap::new();
    };

    let was_on = |side: Side, name: &str| previous.team(side).iter().any(|p| p.name == name);
    let is_on = |side: Side, name: &str| current.team(side).iter().any(|p| p.name == name);

    current
        .participants()
        .map(|p| {
            let name = p.name.as_str();
            let moved = (was_on(Side::A, name) && is_on(Side::B, name))
                || (was_on(Side::B, name) && is_on(Side::A, name));
            (p.name.clone(), moved)
        })
        .collect()
}
