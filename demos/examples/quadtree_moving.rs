// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving objects.
//!
//! A handful of bodies share their bounds with the tree through `Rc<Cell<Rect>>`.
//! Each frame they drift, the tree is told with `relocate`, and overlapping pairs
//! are found with a broad-phase query.
//!
//! Run:
//! - `RUST_LOG=understory_quadtree=trace cargo run -p understory_demos --example quadtree_moving`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Rect, Size, Vec2};
use understory_quadtree::{QuadTree, QuadTreeConfig};

struct Body {
    bounds: Rc<Cell<Rect>>,
    velocity: Vec2,
}

fn main() {
    env_logger::init();

    let config = QuadTreeConfig::default()
        .with_min_leaf_size(Size::new(8.0, 8.0))
        .with_max_objects_per_leaf(2);
    let mut tree: QuadTree<Rc<Cell<Rect>>> = QuadTree::with_config(config).unwrap();

    let mut bodies = Vec::new();
    let mut ids = Vec::new();
    for i in 0..12_u32 {
        let x = f64::from(i % 4) * 30.0;
        let y = f64::from(i / 4) * 30.0;
        let bounds = Rc::new(Cell::new(Rect::from_origin_size((x, y), (6.0, 6.0))));
        ids.push(tree.insert(bounds.clone()));
        let velocity = Vec2::new(f64::from(i % 3) * 4.0 - 4.0, f64::from(i % 5) * 3.0 - 6.0);
        bodies.push(Body { bounds, velocity });
    }

    for frame in 0..8 {
        let mut moved = 0;
        for (body, id) in bodies.iter().zip(&ids) {
            body.bounds.set(body.bounds.get() + body.velocity);
            if tree.relocate(*id).unwrap() {
                moved += 1;
            }
        }

        let mut pairs = 0;
        for (id, body) in ids.iter().zip(&bodies) {
            pairs += tree
                .query(body.bounds.get())
                .filter(|(other, _)| other != id)
                .count();
        }
        log::info!(
            "frame {frame}: {moved} node changes, {} overlapping pairs, {} nodes, root {:?}",
            pairs / 2,
            tree.node_count(),
            tree.root_bounds()
        );
        println!(
            "frame {frame}: nodes={} pairs={} root={:?}",
            tree.node_count(),
            pairs / 2,
            tree.root_bounds()
        );
    }

    // With every object gone the tree merges back into one empty leaf.
    for id in ids {
        tree.remove(id).unwrap();
    }
    println!("empty: nodes={} objects={}", tree.node_count(), tree.object_count());
}
