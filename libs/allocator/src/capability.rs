//! Capability matching between session requirements and room equipment.

use std::collections::BTreeSet;

use crate::domain::Capability;

/// Returns true iff every required capability is offered by the room.
///
/// An empty requirement set is satisfied by any room.
pub fn satisfies(required: &BTreeSet<Capability>, available: &BTreeSet<Capability>) -> bool {
    required.is_subset(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use Capability::{Beamer, Flipchart, Whiteboard};

    #[rstest]
    #[case::empty_requirement(&[], &[], true)]
    #[case::empty_requirement_equipped_room(&[], &[Beamer, Whiteboard], true)]
    #[case::exact_match(&[Beamer], &[Beamer], true)]
    #[case::subset(&[Beamer], &[Beamer, Flipchart], true)]
    #[case::missing(&[Whiteboard], &[Beamer, Flipchart], false)]
    #[case::partially_missing(&[Beamer, Whiteboard], &[Beamer], false)]
    #[case::bare_room(&[Flipchart], &[], false)]
    fn test_satisfies(
        #[case] required: &[Capability],
        #[case] available: &[Capability],
        #[case] expected: bool,
    ) {
        let required: BTreeSet<_> = required.iter().copied().collect();
        let available: BTreeSet<_> = available.iter().copied().collect();
        assert_eq!(satisfies(&required, &available), expected);
    }
}
