//! Dynamic AABB tree.
//!
//! A self-balancing binary tree over "fat" body bounds. Leaves hold one body
//! each; internal nodes hold the union of their children and a cached
//! height. Nodes live in an arena with a free list and are addressed by
//! index, so parent links are plain indices rather than shared pointers.
//!
//! After every insert and remove, each internal node satisfies
//! `bounds == left.bounds ∪ right.bounds` and
//! `|height(left) - height(right)| <= 1`.

use log::{trace, warn};
use rustc_hash::FxHashMap;

use crate::collision::AABB;
use crate::common::PhysicsConfig;
use crate::debug::{DebugColor, DebugSurface};
use crate::error::CollisionError;
use crate::math::Ray;
use crate::objects::{Body, BodyId};

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// Seconds of travel covered by the velocity margin of a fat box.
const VELOCITY_LOOKAHEAD: f64 = 0.032;

#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// Fat bounds for leaves, union of the children otherwise.
    pub bounds: AABB,
    /// 0 for leaves.
    pub height: i32,
    /// Set on leaves only.
    pub body: Option<BodyId>,
}

impl TreeNode {
    fn leaf(body: BodyId, bounds: AABB) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            bounds,
            height: 0,
            body: Some(body),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct DynamicTree {
    nodes: Vec<TreeNode>,
    free_list: Vec<NodeId>,
    root: Option<NodeId>,
    leaves: FxHashMap<BodyId, NodeId>,
    world_bounds: AABB,
}

impl DynamicTree {
    pub fn new(world_bounds: AABB) -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            root: None,
            leaves: FxHashMap::default(),
            world_bounds,
        }
    }

    pub fn world_bounds(&self) -> AABB {
        self.world_bounds
    }

    pub fn set_world_bounds(&mut self, world_bounds: AABB) {
        self.world_bounds = world_bounds;
    }

    /// Number of tracked bodies.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.leaves.contains_key(&id)
    }

    /// Height of the root, 0 for an empty tree or a single leaf.
    pub fn height(&self) -> i32 {
        self.root.map_or(0, |root| self.nodes[root].height)
    }

    /// Fat bounds stored for a tracked body.
    pub fn fat_bounds(&self, id: BodyId) -> Option<AABB> {
        self.leaves.get(&id).map(|&node| self.nodes[node].bounds)
    }

    /// Inserts a leaf for `body` with its bounds grown by `padding`.
    /// A body that is already tracked is reinserted.
    pub fn track_body(&mut self, body: &Body, padding: f64) -> Result<(), CollisionError> {
        if self.contains(body.id()) {
            self.untrack_body(body.id())?;
        }
        let node = self.alloc_node(TreeNode::leaf(body.id(), body.bounds().pad(padding)));
        self.leaves.insert(body.id(), node);
        self.insert_leaf(node)
    }

    /// Removes the body's leaf. Returns false, and logs, if it was not tracked.
    pub fn untrack_body(&mut self, id: BodyId) -> Result<bool, CollisionError> {
        let Some(node) = self.leaves.remove(&id) else {
            warn!("cannot untrack body {id}: not in the dynamic tree");
            return Ok(false);
        };
        self.remove_leaf(node)?;
        self.free_node(node);
        Ok(true)
    }

    /// Refreshes the leaf of a moved body. Returns true when it was reinserted.
    ///
    /// A body whose tight bounds leave the world bounds is untracked. A body
    /// still inside its fat bounds is left alone. Otherwise the leaf is
    /// reinserted with `bounds_padding` plus, for non-fixed bodies, a margin
    /// on the side the body is travelling toward.
    pub fn update_body(&mut self, body: &Body, config: &PhysicsConfig) -> Result<bool, CollisionError> {
        let Some(&node) = self.leaves.get(&body.id()) else {
            warn!("cannot update body {}: not in the dynamic tree", body.id());
            return Ok(false);
        };

        let tight = body.bounds();
        if !self.world_bounds.contains(&tight) {
            warn!("body {} left the world bounds, removing it from the dynamic tree", body.id());
            self.untrack_body(body.id())?;
            return Ok(false);
        }

        if self.nodes[node].bounds.contains(&tight) {
            return Ok(false);
        }

        self.remove_leaf(node)?;

        let mut fat = tight.pad(config.bounds_padding);
        if !body.is_fixed() {
            let margin = body.velocity * (VELOCITY_LOOKAHEAD * config.dynamic_tree_velocity_multiplier);
            if margin.x < 0.0 {
                fat.left += margin.x;
            } else {
                fat.right += margin.x;
            }
            if margin.y < 0.0 {
                fat.top += margin.y;
            } else {
                fat.bottom += margin.y;
            }
        }

        let leaf = &mut self.nodes[node];
        leaf.bounds = fat;
        leaf.parent = None;
        self.insert_leaf(node)?;
        trace!("reinserted body {} into the dynamic tree", body.id());
        Ok(true)
    }

    /// Calls `callback` for every tracked body, other than `body` itself,
    /// whose fat bounds overlap the body's tight bounds. The search is
    /// exhaustive: pre-order, left subtree before right.
    pub fn query<F: FnMut(BodyId)>(&self, body: &Body, mut callback: F) {
        let Some(root) = self.root else {
            return;
        };
        let bounds = body.bounds();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if !node.bounds.overlaps(&bounds) {
                continue;
            }
            match node.body {
                Some(other) if other != body.id() => callback(other),
                Some(_) => {}
                None => {
                    stack.extend(node.right);
                    stack.extend(node.left);
                }
            }
        }
    }

    /// Calls `callback` for every tracked body whose fat bounds the ray
    /// enters within `max`. Traversal stops as soon as the callback returns
    /// true; the return value reports whether that happened.
    pub fn ray_cast_query<F: FnMut(BodyId) -> bool>(&self, ray: &Ray, max: f64, mut callback: F) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if !node.bounds.ray_cast(ray, max) {
                continue;
            }
            match node.body {
                Some(body) => {
                    if callback(body) {
                        return true;
                    }
                }
                None => {
                    stack.extend(node.right);
                    stack.extend(node.left);
                }
            }
        }
        false
    }

    /// Draws internal nodes in gray and leaves in green.
    pub fn debug_draw(&self, surface: &mut dyn DebugSurface) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            let color = if node.is_leaf() { DebugColor::GREEN } else { DebugColor::GRAY };
            surface.aabb(&node.bounds, color);
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /// Checks links, bounds, heights and balance of the whole tree.
    pub fn validate(&self) -> Result<(), CollisionError> {
        let Some(root) = self.root else {
            return if self.leaves.is_empty() {
                Ok(())
            } else {
                Err(corrupted(0, "leaves tracked in an empty tree"))
            };
        };
        if self.nodes[root].parent.is_some() {
            return Err(corrupted(root, "root has a parent"));
        }

        let mut leaf_count = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_leaf() {
                let body = node.body.ok_or_else(|| corrupted(id, "leaf without a body"))?;
                if self.leaves.get(&body) != Some(&id) {
                    return Err(corrupted(id, "leaf not indexed by its body"));
                }
                if node.height != 0 {
                    return Err(corrupted(id, "leaf height is not zero"));
                }
                leaf_count += 1;
                continue;
            }

            let (left, right) = self.children(id)?;
            let (l, r) = (&self.nodes[left], &self.nodes[right]);
            if l.parent != Some(id) || r.parent != Some(id) {
                return Err(corrupted(id, "child does not point back to its parent"));
            }
            if node.height != 1 + l.height.max(r.height) {
                return Err(corrupted(id, "stale height"));
            }
            if (l.height - r.height).abs() > 1 {
                return Err(corrupted(id, "unbalanced"));
            }
            if node.bounds != l.bounds.combine(&r.bounds) {
                return Err(corrupted(id, "bounds are not the union of the children"));
            }
            stack.push(left);
            stack.push(right);
        }

        if leaf_count != self.leaves.len() {
            return Err(corrupted(root, "leaf count does not match the body index"));
        }
        Ok(())
    }

    fn alloc_node(&mut self, node: TreeNode) -> NodeId {
        match self.free_list.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn free_node(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        node.parent = None;
        node.left = None;
        node.right = None;
        node.body = None;
        node.height = -1;
        self.free_list.push(id);
    }

    fn children(&self, id: NodeId) -> Result<(NodeId, NodeId), CollisionError> {
        let node = &self.nodes[id];
        match (node.left, node.right) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => Err(corrupted(id, "internal node is missing a child")),
        }
    }

    /// Points whichever slot of `parent` held `old` at `new`, or makes
    /// `new` the root.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) -> Result<(), CollisionError> {
        let Some(parent) = parent else {
            self.root = Some(new);
            return Ok(());
        };
        let node = &mut self.nodes[parent];
        if node.left == Some(old) {
            node.left = Some(new);
        } else if node.right == Some(old) {
            node.right = Some(new);
        } else {
            return Err(corrupted(parent, "node is not a child of its parent"));
        }
        Ok(())
    }

    fn insert_leaf(&mut self, leaf: NodeId) -> Result<(), CollisionError> {
        let Some(root) = self.root else {
            self.root = Some(leaf);
            self.nodes[leaf].parent = None;
            return Ok(());
        };

        // Find the best sibling with the surface area heuristic.
        let leaf_bounds = self.nodes[leaf].bounds;
        let mut sibling = root;
        while !self.nodes[sibling].is_leaf() {
            let (left, right) = self.children(sibling)?;

            let area = self.nodes[sibling].bounds.perimeter();
            let combined_area = self.nodes[sibling].bounds.combine(&leaf_bounds).perimeter();

            let cost = 2.0 * combined_area;
            let inheritance_cost = 2.0 * (combined_area - area);

            let cost_left = self.child_insertion_cost(left, &leaf_bounds, inheritance_cost);
            let cost_right = self.child_insertion_cost(right, &leaf_bounds, inheritance_cost);

            // Stopping higher up would hang a lone leaf beside a deep subtree.
            if cost < cost_left && cost < cost_right && self.nodes[sibling].height <= 1 {
                break;
            }

            sibling = if cost_left < cost_right { left } else { right };
        }

        let old_parent = self.nodes[sibling].parent;
        let new_parent = self.alloc_node(TreeNode {
            parent: old_parent,
            left: Some(sibling),
            right: Some(leaf),
            bounds: leaf_bounds.combine(&self.nodes[sibling].bounds),
            height: self.nodes[sibling].height + 1,
            body: None,
        });
        self.replace_child(old_parent, sibling, new_parent)?;
        self.nodes[sibling].parent = Some(new_parent);
        self.nodes[leaf].parent = Some(new_parent);

        self.fix_upwards(Some(new_parent))
    }

    fn child_insertion_cost(&self, child: NodeId, leaf_bounds: &AABB, inheritance: f64) -> f64 {
        let node = &self.nodes[child];
        let combined = leaf_bounds.combine(&node.bounds).perimeter();
        if node.is_leaf() {
            combined + inheritance
        } else {
            (combined - node.bounds.perimeter()) + inheritance
        }
    }

    fn remove_leaf(&mut self, leaf: NodeId) -> Result<(), CollisionError> {
        if self.root == Some(leaf) {
            self.root = None;
            return Ok(());
        }

        let parent = self.nodes[leaf]
            .parent
            .ok_or_else(|| corrupted(leaf, "non-root leaf without a parent"))?;
        let grand_parent = self.nodes[parent].parent;
        let (left, right) = self.children(parent)?;
        let sibling = if left == leaf { right } else { left };

        self.replace_child(grand_parent, parent, sibling)?;
        self.nodes[sibling].parent = grand_parent;
        self.free_node(parent);
        self.nodes[leaf].parent = None;

        self.fix_upwards(grand_parent)
    }

    /// Walks from `start` to the root, rebalancing and refitting each node.
    fn fix_upwards(&mut self, start: Option<NodeId>) -> Result<(), CollisionError> {
        let mut current = start;
        while let Some(id) = current {
            let id = self.balance(id)?;

            let (left, right) = self.children(id)?;
            let height = 1 + self.nodes[left].height.max(self.nodes[right].height);
            let bounds = self.nodes[left].bounds.combine(&self.nodes[right].bounds);
            let node = &mut self.nodes[id];
            node.height = height;
            node.bounds = bounds;

            current = node.parent;
        }
        Ok(())
    }

    /// Single rotation promoting the taller child of `a` when the heights of
    /// its children differ by more than one. Returns the subtree root.
    fn balance(&mut self, a: NodeId) -> Result<NodeId, CollisionError> {
        if self.nodes[a].is_leaf() || self.nodes[a].height < 2 {
            return Ok(a);
        }

        let (b, c) = self.children(a)?;
        let balance = self.nodes[c].height - self.nodes[b].height;

        if balance > 1 {
            // Rotate C up.
            let (f, g) = self.children(c)?;
            let a_parent = self.nodes[a].parent;
            self.nodes[c].left = Some(a);
            self.nodes[c].parent = a_parent;
            self.nodes[a].parent = Some(c);
            self.replace_child(a_parent, a, c)?;

            let (keep, moved) = if self.nodes[f].height > self.nodes[g].height { (f, g) } else { (g, f) };
            self.nodes[c].right = Some(keep);
            self.nodes[a].right = Some(moved);
            self.nodes[moved].parent = Some(a);
            self.refit_pair(a, b, moved, c, keep);
            return Ok(c);
        }

        if balance < -1 {
            // Rotate B up.
            let (d, e) = self.children(b)?;
            let a_parent = self.nodes[a].parent;
            self.nodes[b].left = Some(a);
            self.nodes[b].parent = a_parent;
            self.nodes[a].parent = Some(b);
            self.replace_child(a_parent, a, b)?;

            let (keep, moved) = if self.nodes[d].height > self.nodes[e].height { (d, e) } else { (e, d) };
            self.nodes[b].right = Some(keep);
            self.nodes[a].left = Some(moved);
            self.nodes[moved].parent = Some(a);
            self.refit_pair(a, c, moved, b, keep);
            return Ok(b);
        }

        Ok(a)
    }

    /// After a rotation: `lowered` now has children `stayed` and `moved`,
    /// `raised` has children `lowered` and `keep`.
    fn refit_pair(&mut self, lowered: NodeId, stayed: NodeId, moved: NodeId, raised: NodeId, keep: NodeId) {
        let lowered_bounds = self.nodes[stayed].bounds.combine(&self.nodes[moved].bounds);
        let lowered_height = 1 + self.nodes[stayed].height.max(self.nodes[moved].height);
        self.nodes[lowered].bounds = lowered_bounds;
        self.nodes[lowered].height = lowered_height;

        self.nodes[raised].bounds = lowered_bounds.combine(&self.nodes[keep].bounds);
        self.nodes[raised].height = 1 + lowered_height.max(self.nodes[keep].height);
    }
}

impl Default for DynamicTree {
    fn default() -> Self {
        Self::new(AABB::everything())
    }
}

fn corrupted(node: NodeId, reason: &'static str) -> CollisionError {
    CollisionError::TreeCorrupted { node, reason }
}
