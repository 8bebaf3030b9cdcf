//! Arena-backed binary map of locations.

use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Handle of a location inside its [`LocationTree`].
pub type LocationId = Index;

/// A branch of the location tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Data payload of a map node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    name: String,
    clue: Option<String>,
}

impl Location {
    /// Build a location. An empty clue is treated as no clue.
    pub fn build(name: impl Into<String>, clue: Option<&str>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyLocationName);
        }
        let clue = clue.filter(|c| !c.is_empty()).map(str::to_string);
        Ok(Self { name, clue })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.clue {
            Some(clue) => write!(f, "{} [{}]", self.name, clue),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Tree node in the arena; children are owned by index.
#[derive(Debug)]
pub struct LocationNode {
    pub location: Location,
    pub left: Option<LocationId>,
    pub right: Option<LocationId>,
}

impl LocationNode {
    fn child(&self, side: Direction) -> Option<LocationId> {
        match side {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Binary map of locations.
///
/// Every node is reachable from the single root and has at most one parent,
/// so the structure stays acyclic. The tree is built once and then only read
/// while a session borrows it.
#[derive(Debug)]
pub struct LocationTree {
    arena: Arena<LocationNode>,
    root: Option<LocationId>,
}

impl Default for LocationTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_root(&mut self, location: Location) -> DomainResult<LocationId> {
        if let Some(root) = self.root {
            return Err(DomainError::RootAlreadySet(self.name_of(root).to_string()));
        }
        let idx = self.arena.insert(LocationNode {
            location,
            left: None,
            right: None,
        });
        self.root = Some(idx);
        Ok(idx)
    }

    /// Attach `location` as the `side` child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(
        &mut self,
        parent: LocationId,
        side: Direction,
        location: Location,
    ) -> DomainResult<LocationId> {
        let parent_node = self
            .arena
            .get(parent)
            .ok_or_else(|| DomainError::UnknownLocation(format!("{:?}", parent)))?;
        if parent_node.child(side).is_some() {
            return Err(DomainError::SlotOccupied {
                location: parent_node.location.name.clone(),
                side,
            });
        }

        let idx = self.arena.insert(LocationNode {
            location,
            left: None,
            right: None,
        });
        if let Some(parent_node) = self.arena.get_mut(parent) {
            match side {
                Direction::Left => parent_node.left = Some(idx),
                Direction::Right => parent_node.right = Some(idx),
            }
        }
        Ok(idx)
    }

    pub fn attach_left(&mut self, parent: LocationId, location: Location) -> DomainResult<LocationId> {
        self.attach(parent, Direction::Left, location)
    }

    pub fn attach_right(&mut self, parent: LocationId, location: Location) -> DomainResult<LocationId> {
        self.attach(parent, Direction::Right, location)
    }

    pub fn root(&self) -> Option<LocationId> {
        self.root
    }

    pub fn get_node(&self, idx: LocationId) -> Option<&LocationNode> {
        self.arena.get(idx)
    }

    pub fn location(&self, idx: LocationId) -> DomainResult<&Location> {
        self.arena
            .get(idx)
            .map(|node| &node.location)
            .ok_or_else(|| DomainError::UnknownLocation(format!("{:?}", idx)))
    }

    fn name_of(&self, idx: LocationId) -> &str {
        self.arena
            .get(idx)
            .map(|node| node.location.name())
            .unwrap_or("?")
    }

    pub fn has_left(&self, idx: LocationId) -> bool {
        self.child(idx, Direction::Left).is_some()
    }

    pub fn has_right(&self, idx: LocationId) -> bool {
        self.child(idx, Direction::Right).is_some()
    }

    pub fn child(&self, idx: LocationId, side: Direction) -> Option<LocationId> {
        self.arena.get(idx).and_then(|node| node.child(side))
    }

    pub fn left_of(&self, idx: LocationId) -> DomainResult<LocationId> {
        self.step(idx, Direction::Left)
    }

    pub fn right_of(&self, idx: LocationId) -> DomainResult<LocationId> {
        self.step(idx, Direction::Right)
    }

    /// Follow one edge, failing when the child is absent.
    pub fn step(&self, idx: LocationId, side: Direction) -> DomainResult<LocationId> {
        self.child(idx, side).ok_or_else(|| DomainError::NoPath {
            location: self.name_of(idx).to_string(),
            side,
        })
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(LocationId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                for child in [node.left, node.right].into_iter().flatten() {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }

    pub fn iter(&self) -> PreOrderIterator {
        PreOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    /// Release every location, children before parents.
    ///
    /// Returns the number of locations released; an empty tree releases none.
    #[instrument(level = "debug", skip(self))]
    pub fn teardown(&mut self) -> usize {
        let order: Vec<LocationId> = self.iter_postorder().map(|(idx, _)| idx).collect();
        let released = order
            .into_iter()
            .filter_map(|idx| self.arena.remove(idx))
            .count();
        self.root = None;
        debug!("teardown released {} locations", released);
        released
    }

    /// Render the map for display, annotating locations with their clues.
    pub fn to_display_tree(&self) -> Tree<String> {
        fn build(tree: &LocationTree, idx: LocationId) -> Tree<String> {
            let mut out = Tree::new(tree.name_and_clue(idx));
            if let Some(node) = tree.get_node(idx) {
                for child in [node.left, node.right].into_iter().flatten() {
                    out.push(build(tree, child));
                }
            }
            out
        }

        match self.root {
            Some(root) => build(self, root),
            None => Tree::new("(empty map)".to_string()),
        }
    }

    fn name_and_clue(&self, idx: LocationId) -> String {
        self.arena
            .get(idx)
            .map(|node| node.location.to_string())
            .unwrap_or_default()
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a LocationTree,
    stack: Vec<LocationId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a LocationTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (LocationId, &'a LocationNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                // right first so that left is visited first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a LocationTree,
    stack: Vec<(LocationId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a LocationTree) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (LocationId, &'a LocationNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, expanded)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                if expanded {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                self.stack.extend(node.right.map(|idx| (idx, false)));
                self.stack.extend(node.left.map(|idx| (idx, false)));
            }
        }
        None
    }
}
