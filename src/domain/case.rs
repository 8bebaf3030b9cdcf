//! A playable case: the map plus the clue bindings.

use crate::domain::location::LocationTree;
use crate::domain::suspects::SuspectIndex;

#[derive(Debug)]
pub struct Case {
    pub title: String,
    pub map: LocationTree,
    pub suspects: SuspectIndex,
}

impl Case {
    pub fn new(title: impl Into<String>, map: LocationTree, suspects: SuspectIndex) -> Self {
        Self {
            title: title.into(),
            map,
            suspects,
        }
    }
}
