// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Insert a few boxes, watch the root split and grow, query, then remove
//! objects until the tree merges back into a single leaf.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example quadtree_basics`

use kurbo::{Point, Rect, Size};
use understory_quadtree::{QuadTree, QuadTreeConfig};

fn main() {
    env_logger::init();

    let config = QuadTreeConfig::new(Size::new(10.0, 10.0), 2);
    let mut tree: QuadTree<Rect> = QuadTree::with_config(config).unwrap();

    let a = tree.insert(Rect::new(0.0, 0.0, 5.0, 5.0));
    let b = tree.insert(Rect::new(5.0, 0.0, 10.0, 5.0));
    println!(
        "two objects: nodes={} root={:?}",
        tree.node_count(),
        tree.root_bounds()
    );

    let c = tree.insert(Rect::new(0.0, 5.0, 5.0, 10.0));
    println!("third object splits the root: nodes={}", tree.node_count());

    let far = tree.insert(Rect::new(90.0, 90.0, 95.0, 95.0));
    println!(
        "far object grows the root: nodes={} root={:?}",
        tree.node_count(),
        tree.root_bounds()
    );

    let hits: Vec<_> = tree
        .query(Rect::new(0.0, 0.0, 6.0, 6.0))
        .map(|(id, r)| (id, *r))
        .collect();
    println!("query (0,0)-(6,6): {hits:?}");
    let at = Point::new(92.0, 92.0);
    println!("point {at:?}: {} hit(s)", tree.query_point(at).count());

    for id in [far, c, b] {
        let removed = tree.remove(id).unwrap();
        println!(
            "removed {removed:?}: objects={} nodes={} root={:?}",
            tree.object_count(),
            tree.node_count(),
            tree.root_bounds()
        );
    }
    assert!(tree.contains(a));
    println!("{tree:?}");
}
