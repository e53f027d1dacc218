//! Two dimensional R-tree over integer bounding boxes.
//!
//! Guttman's scheme with the quadratic split: inserts descend by least area
//! enlargement, overfull nodes split in two, removal condenses underfull nodes
//! and reinserts their entries. All data lives in leaves at the same depth.

use std::mem;

use crate::bbox::BoundingBox;

pub const DEFAULT_MAX_ENTRIES: usize = 16;
pub const DEFAULT_MIN_ENTRIES: usize = DEFAULT_MAX_ENTRIES / 2;

type Id = u64;

#[derive(Debug)]
enum Node {
    Leaf(Vec<(BoundingBox, Id)>),
    Internal(Vec<(BoundingBox, Box<Node>)>),
}

impl Node {
    fn len(&self) -> usize {
        match self {
            Node::Leaf(entries) => entries.len(),
            Node::Internal(children) => children.len(),
        }
    }

    fn cover(&self) -> BoundingBox {
        match self {
            Node::Leaf(entries) => cover_of(entries),
            Node::Internal(children) => cover_of(children),
        }
    }

    /// Moves every data entry below this node into `out`.
    fn drain_into(self, out: &mut Vec<(BoundingBox, Id)>) {
        match self {
            Node::Leaf(entries) => out.extend(entries),
            Node::Internal(children) => {
                for (_, child) in children {
                    (*child).drain_into(out);
                }
            }
        }
    }
}

fn cover_of<T>(entries: &[(BoundingBox, T)]) -> BoundingBox {
    let mut iter = entries.iter().map(|(rect, _)| *rect);
    let first = iter.next().unwrap_or_default();
    iter.fold(first, |acc, rect| acc.union(&rect))
}

fn enlargement(cover: &BoundingBox, rect: &BoundingBox) -> u64 {
    cover.union(rect).area() - cover.area()
}

#[derive(Debug)]
pub struct RTree {
    root: Node,
    len: usize,
    max_entries: usize,
    min_entries: usize,
}

impl Default for RTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RTree {
    pub fn new() -> RTree {
        RTree::with_node_limits(DEFAULT_MAX_ENTRIES, DEFAULT_MIN_ENTRIES)
    }

    /// Panics unless `1 <= min_entries` and `2 * min_entries <= max_entries + 1`,
    /// the condition for a split of `max_entries + 1` entries to be possible.
    pub fn with_node_limits(max_entries: usize, min_entries: usize) -> RTree {
        assert!(min_entries >= 1, "min_entries must be > 0");
        assert!(
            2 * min_entries <= max_entries + 1,
            "min_entries ({min_entries}) too large for max_entries ({max_entries})"
        );

        RTree {
            root: Node::Leaf(Vec::new()),
            len: 0,
            max_entries,
            min_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, rect: BoundingBox, id: Id) {
        self.insert_entry(rect, id);
        self.len += 1;
    }

    /// Inserts at the leaf level and grows a new root when the old one splits.
    fn insert_entry(&mut self, rect: BoundingBox, id: Id) {
        let split = insert_rec(
            &mut self.root,
            rect,
            id,
            self.max_entries,
            self.min_entries,
        );

        if let Some(sibling) = split {
            let old_root = mem::replace(&mut self.root, Node::Internal(Vec::new()));
            self.root = Node::Internal(vec![
                (old_root.cover(), Box::new(old_root)),
                (sibling.cover(), Box::new(sibling)),
            ]);
        }
    }

    /// Calls `visit` with the id of every entry overlapping `rect` until it
    /// returns `false`. Returns the number of entries visited.
    pub fn search<F: FnMut(Id) -> bool>(&self, rect: &BoundingBox, mut visit: F) -> usize {
        let mut found = 0;
        search_rec(&self.root, rect, &mut found, &mut visit);
        found
    }

    pub fn search_count(&self, rect: &BoundingBox) -> usize {
        self.search(rect, |_| true)
    }

    /// Removes the entry with this id and box. Returns `false` if it is absent.
    pub fn remove(&mut self, rect: &BoundingBox, id: Id) -> bool {
        let mut orphans = Vec::new();
        if !remove_rec(&mut self.root, rect, id, self.min_entries, &mut orphans) {
            return false;
        }

        for (orphan_rect, orphan_id) in orphans {
            self.insert_entry(orphan_rect, orphan_id);
        }

        let only_child = match &mut self.root {
            Node::Internal(children) if children.len() == 1 => children.pop(),
            _ => None,
        };
        if let Some((_, child)) = only_child {
            self.root = *child;
        }

        self.len -= 1;
        true
    }

    pub fn remove_all(&mut self) {
        self.root = Node::Leaf(Vec::new());
        self.len = 0;
    }

    /// Number of levels from the root down to the leaves, inclusive.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.root;
        while let Node::Internal(children) = node {
            match children.first() {
                Some((_, child)) => node = child.as_ref(),
                None => break,
            }
            height += 1;
        }
        height
    }
}

fn insert_rec(
    node: &mut Node,
    rect: BoundingBox,
    id: Id,
    max_entries: usize,
    min_entries: usize,
) -> Option<Node> {
    match node {
        Node::Leaf(entries) => {
            entries.push((rect, id));
            split_overfull(entries, max_entries, min_entries).map(Node::Leaf)
        }
        Node::Internal(children) => {
            let index = pick_branch(children, &rect);

            let split = insert_rec(&mut children[index].1, rect, id, max_entries, min_entries);

            match split {
                None => {
                    children[index].0 = children[index].0.union(&rect);
                    None
                }
                Some(sibling) => {
                    children[index].0 = children[index].1.cover();
                    children.push((sibling.cover(), Box::new(sibling)));
                    split_overfull(children, max_entries, min_entries).map(Node::Internal)
                }
            }
        }
    }
}

/// Child needing the least enlargement to take `rect`; ties go to the smaller child.
fn pick_branch<T>(children: &[(BoundingBox, T)], rect: &BoundingBox) -> usize {
    let mut best = 0;
    let mut best_key = (u64::MAX, u64::MAX);

    for (index, (cover, _)) in children.iter().enumerate() {
        let key = (enlargement(cover, rect), cover.area());
        if key < best_key {
            best = index;
            best_key = key;
        }
    }

    best
}

fn split_overfull<T>(
    entries: &mut Vec<(BoundingBox, T)>,
    max_entries: usize,
    min_entries: usize,
) -> Option<Vec<(BoundingBox, T)>> {
    if entries.len() <= max_entries {
        return None;
    }

    let (keep, moved) = quadratic_split(mem::take(entries), min_entries);
    *entries = keep;
    Some(moved)
}

/// The pair wasting the most area when covered together.
fn pick_seeds<T>(entries: &[(BoundingBox, T)]) -> (usize, usize) {
    let mut seeds = (0, 1);
    let mut worst = i128::MIN;

    for a in 0..entries.len() {
        for b in a + 1..entries.len() {
            let (ra, rb) = (&entries[a].0, &entries[b].0);
            let waste = ra.union(rb).area() as i128 - ra.area() as i128 - rb.area() as i128;
            if waste > worst {
                worst = waste;
                seeds = (a, b);
            }
        }
    }

    seeds
}

fn quadratic_split<T>(
    mut entries: Vec<(BoundingBox, T)>,
    min_entries: usize,
) -> (Vec<(BoundingBox, T)>, Vec<(BoundingBox, T)>) {
    let (seed_a, seed_b) = pick_seeds(&entries);

    // seed_b > seed_a, so removing it first leaves seed_a in place
    let second = entries.swap_remove(seed_b);
    let first = entries.swap_remove(seed_a);

    let mut covers = [first.0, second.0];
    let mut groups = [vec![first], vec![second]];

    while !entries.is_empty() {
        let remaining = entries.len();
        if groups[0].len() + remaining <= min_entries {
            groups[0].append(&mut entries);
            break;
        }
        if groups[1].len() + remaining <= min_entries {
            groups[1].append(&mut entries);
            break;
        }

        let mut next = 0;
        let mut best_diff = 0;
        let mut growth = (0, 0);
        for (index, (rect, _)) in entries.iter().enumerate() {
            let d0 = enlargement(&covers[0], rect);
            let d1 = enlargement(&covers[1], rect);
            let diff = d0.abs_diff(d1);
            if index == 0 || diff > best_diff {
                next = index;
                best_diff = diff;
                growth = (d0, d1);
            }
        }

        let group = if growth.0 != growth.1 {
            usize::from(growth.1 < growth.0)
        } else if covers[0].area() != covers[1].area() {
            usize::from(covers[1].area() < covers[0].area())
        } else {
            usize::from(groups[1].len() < groups[0].len())
        };

        let entry = entries.swap_remove(next);
        covers[group] = covers[group].union(&entry.0);
        groups[group].push(entry);
    }

    let [a, b] = groups;
    (a, b)
}

fn search_rec<F: FnMut(Id) -> bool>(
    node: &Node,
    rect: &BoundingBox,
    found: &mut usize,
    visit: &mut F,
) -> bool {
    match node {
        Node::Leaf(entries) => {
            for (entry_rect, id) in entries {
                if entry_rect.intersects(rect) {
                    *found += 1;
                    if !visit(*id) {
                        return false;
                    }
                }
            }
        }
        Node::Internal(children) => {
            for (cover, child) in children {
                if cover.intersects(rect) && !search_rec(child, rect, found, visit) {
                    return false;
                }
            }
        }
    }

    true
}

fn remove_rec(
    node: &mut Node,
    rect: &BoundingBox,
    id: Id,
    min_entries: usize,
    orphans: &mut Vec<(BoundingBox, Id)>,
) -> bool {
    match node {
        Node::Leaf(entries) => {
            match entries.iter().position(|(r, i)| *i == id && r == rect) {
                Some(index) => {
                    entries.swap_remove(index);
                    true
                }
                None => false,
            }
        }
        Node::Internal(children) => {
            for index in 0..children.len() {
                if !children[index].0.intersects(rect) {
                    continue;
                }
                if !remove_rec(&mut children[index].1, rect, id, min_entries, orphans) {
                    continue;
                }

                if children[index].1.len() < min_entries {
                    let (_, child) = children.swap_remove(index);
                    (*child).drain_into(orphans);
                } else {
                    children[index].0 = children[index].1.cover();
                }
                return true;
            }
            false
        }
    }
}
