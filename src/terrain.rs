//! Static block index.
//!
//! Blocks are bucketed by grid column so a collision query only looks at the
//! handful of columns a rectangle spans. Query results keep load order, which
//! is the order the resolver clamps against.

use std::collections::HashMap;

use crate::entities::{Block, Rect};

#[derive(Clone, Debug, Default)]
pub struct Terrain {
    blocks: Vec<Block>,
    cell_size: i32,
    columns: HashMap<i32, Vec<usize>>,
}

impl Terrain {
    pub fn new(blocks: Vec<Block>, cell_size: i32) -> Self {
        let cell_size = cell_size.max(1);
        let mut columns: HashMap<i32, Vec<usize>> = HashMap::new();
        for (i, block) in blocks.iter().enumerate() {
            for col in column_span(&block.rect, cell_size) {
                columns.entry(col).or_default().push(i);
            }
        }
        Self { blocks, cell_size, columns }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Blocks whose rectangles overlap `rect`, in load order.
    pub fn overlapping(&self, rect: &Rect) -> Vec<Rect> {
        if rect.width <= 0 || rect.height <= 0 {
            return Vec::new();
        }
        let mut hits: Vec<usize> = column_span(rect, self.cell_size)
            .filter_map(|col| self.columns.get(&col))
            .flatten()
            .copied()
            .filter(|&i| self.blocks[i].rect.overlaps(rect))
            .collect();
        hits.sort_unstable();
        hits.dedup();
        hits.into_iter().map(|i| self.blocks[i].rect).collect()
    }

    pub fn any_overlap(&self, rect: &Rect) -> bool {
        !self.overlapping(rect).is_empty()
    }
}

fn column_span(rect: &Rect, cell_size: i32) -> std::ops::RangeInclusive<i32> {
    let first = rect.left().div_euclid(cell_size);
    let last = (rect.right() - 1).max(rect.left()).div_euclid(cell_size);
    first..=last
}
