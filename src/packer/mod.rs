//! 1-D constraint packer: lays out an ordered sequence of items along
//! a single axis, the same problem the column-of-windows and
//! window-of-tags layouts in the workspace hierarchy both reduce to.

use std::collections::HashMap;

pub type ItemId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Packable {
    pub id: ItemId,
    pub coord: f64,
}

pub struct Packer {
    header_height: f64,
    max_space: f64,
    order: Vec<ItemId>,
    items: HashMap<ItemId, Packable>,
    next_id: ItemId,
}

impl Packer {
    pub fn new(header_height: f64, max_space: f64) -> Self {
        Self {
            header_height,
            max_space,
            order: Vec::new(),
            items: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn header_height(&self) -> f64 {
        self.header_height
    }

    pub fn max_space(&self) -> f64 {
        self.max_space
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn items_in_order(&self) -> Vec<Packable> {
        self.order.iter().map(|id| self.items[id]).collect()
    }

    pub fn get(&self, id: ItemId) -> Option<Packable> {
        self.items.get(&id).copied()
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.order.iter().position(|i| *i == id)
    }

    /// `pack(new_items)`: place each new item in the middle of the
    /// currently tallest (by following-gap extent) item, ties take the
    /// first. Growth rounds to an integer coordinate.
    pub fn pack(&mut self, count: usize) -> Vec<ItemId> {
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.next_id;
            self.next_id += 1;
            if self.order.is_empty() {
                self.items.insert(id, Packable { id, coord: 0.0 });
                self.order.push(id);
                created.push(id);
                continue;
            }
            let tallest_idx = self.tallest_gap_index();
            let start = self.order[tallest_idx];
            let start_coord = self.items[&start].coord;
            let end_coord = if tallest_idx + 1 < self.order.len() {
                self.items[&self.order[tallest_idx + 1]].coord
            } else {
                self.max_space
            };
            let mid = ((start_coord + end_coord) / 2.0).round();
            self.items.insert(id, Packable { id, coord: mid });
            self.order.insert(tallest_idx + 1, id);
            created.push(id);
        }
        created
    }

    fn tallest_gap_index(&self) -> usize {
        let mut best_idx = 0;
        let mut best_extent = f64::MIN;
        for (idx, id) in self.order.iter().enumerate() {
            let start = self.items[id].coord;
            let end = if idx + 1 < self.order.len() {
                self.items[&self.order[idx + 1]].coord
            } else {
                self.max_space
            };
            let extent = end - start;
            if extent > best_extent {
                best_extent = extent;
                best_idx = idx;
            }
        }
        best_idx
    }

    /// `move_to`: clamp into range, bubble items below down, falling back
    /// to bubbling items above up if that overflows `max_space`. Fails
    /// (no change) only if neither direction fits.
    pub fn move_to(&mut self, id: ItemId, new_coord: f64) -> bool {
        let Some(idx) = self.index_of(id) else { return false };
        let clamped = new_coord.clamp(0.0, self.max_space);

        let mut down = self.order.clone();
        let down_coords = self.bubble_down_from(idx, clamped);
        if let Some(coords) = down_coords {
            self.apply_coords(&down, &coords);
            return true;
        }
        let up_coords = self.bubble_up_from(idx, clamped);
        if let Some(coords) = up_coords {
            self.apply_coords(&mut down, &coords);
            return true;
        }
        false
    }

    /// Push `order[idx..]` down so item `idx` sits at `target`, each
    /// later item at least `header_height` after the previous. `None` if
    /// the cascade would overflow `max_space`.
    fn bubble_down_from(&self, idx: usize, target: f64) -> Option<Vec<f64>> {
        let mut coords = vec![0.0; self.order.len()];
        for (i, id) in self.order.iter().enumerate().take(idx) {
            coords[i] = self.items[id].coord;
        }
        let min_coord = if idx > 0 { coords[idx - 1] + self.header_height } else { 0.0 };
        coords[idx] = target.max(min_coord);
        for i in idx + 1..self.order.len() {
            let min_coord = coords[i - 1] + self.header_height;
            let natural = self.items[&self.order[i]].coord;
            coords[i] = natural.max(min_coord);
        }
        if coords.last().copied().unwrap_or(0.0) > self.max_space {
            return None;
        }
        Some(coords)
    }

    /// Push `order[..=idx]` up so item `idx` sits at `target`, each
    /// earlier item at least `header_height` before the next. `None` if
    /// the cascade would underflow below 0.
    fn bubble_up_from(&self, idx: usize, target: f64) -> Option<Vec<f64>> {
        let mut coords = vec![0.0; self.order.len()];
        for (i, id) in self.order.iter().enumerate().skip(idx + 1) {
            coords[i] = self.items[id].coord;
        }
        coords[idx] = target;
        for i in (0..idx).rev() {
            let max_coord = coords[i + 1] - self.header_height;
            let natural = self.items[&self.order[i]].coord;
            coords[i] = natural.min(max_coord);
        }
        if coords.first().copied().unwrap_or(0.0) < 0.0 {
            return None;
        }
        Some(coords)
    }

    fn apply_coords(&mut self, order: &[ItemId], coords: &[f64]) {
        for (id, coord) in order.iter().zip(coords.iter()) {
            if let Some(item) = self.items.get_mut(id) {
                item.coord = *coord;
            }
        }
    }

    /// `grow`: split `extra` in half, bubble one half down and the other
    /// up, each clamped to the neighbour's `header_height`; keep whatever
    /// fraction of each half actually fits.
    pub fn grow(&mut self, id: ItemId, extra: f64) {
        let Some(idx) = self.index_of(id) else { return };
        let half = extra / 2.0;
        let coord = self.items[&id].coord;

        if idx + 1 < self.order.len() {
            let next_id = self.order[idx + 1];
            let next_coord = self.items[&next_id].coord;
            let room = (next_coord - coord - self.header_height).max(0.0);
            let applied = half.min(room);
            if applied > 0.0 {
                self.move_down_from(idx + 1, applied);
            }
        }
        if idx > 0 {
            let prev_id = self.order[idx - 1];
            let prev_coord = self.items[&prev_id].coord;
            let room = (coord - prev_coord - self.header_height).max(0.0);
            let applied = half.min(room);
            if applied > 0.0 {
                self.move_up_from(idx - 1, applied);
            }
        }
    }

    fn move_down_from(&mut self, start_idx: usize, amount: f64) {
        for id in &self.order[start_idx..] {
            if let Some(item) = self.items.get_mut(id) {
                item.coord = (item.coord + amount).min(self.max_space);
            }
        }
    }

    fn move_up_from(&mut self, end_idx: usize, amount: f64) {
        for id in &self.order[..=end_idx] {
            if let Some(item) = self.items.get_mut(id) {
                item.coord = (item.coord - amount).max(0.0);
            }
        }
    }

    /// `minimize_all_except`: target item goes to 0; items above it stack
    /// at successive `header_height` multiples; items below pack tight
    /// against `max_space`.
    pub fn minimize_all_except(&mut self, id: ItemId) {
        let Some(idx) = self.index_of(id) else { return };
        for (i, item_id) in self.order.iter().enumerate() {
            let coord = if i < idx {
                i as f64 * self.header_height
            } else if i == idx {
                0.0
            } else {
                let from_end = (self.order.len() - 1 - i) as f64;
                self.max_space - (from_end + 1.0) * self.header_height
            };
            if let Some(item) = self.items.get_mut(item_id) {
                item.coord = coord;
            }
        }
    }

    /// `maximize`: the target item first, coord 0; every other item at
    /// `max_space` (fully occluded behind it).
    pub fn maximize(&mut self, id: ItemId) {
        let Some(idx) = self.index_of(id) else { return };
        self.order.remove(idx);
        self.order.insert(0, id);
        for (i, item_id) in self.order.iter().enumerate() {
            let coord = if i == 0 { 0.0 } else { self.max_space };
            if let Some(item) = self.items.get_mut(item_id) {
                item.coord = coord;
            }
        }
    }

    /// `space_evenly`: uniform gap `(max_space - n*header_height) / n`.
    pub fn space_evenly(&mut self) {
        let n = self.order.len();
        if n == 0 {
            return;
        }
        let gap = (self.max_space - n as f64 * self.header_height) / n as f64;
        let mut coord = 0.0;
        for id in self.order.clone() {
            if let Some(item) = self.items.get_mut(&id) {
                item.coord = coord;
            }
            coord += self.header_height + gap;
        }
    }

    /// `repack_items_below_limit`: bubble up anything that ended up past
    /// `max_space` back into range.
    pub fn repack_items_below_limit(&mut self) {
        for idx in (0..self.order.len()).rev() {
            let id = self.order[idx];
            let coord = self.items[&id].coord;
            if coord > self.max_space {
                let target = self.max_space - self.header_height * (self.order.len() - idx) as f64;
                let _ = self.bubble_up_from(idx, target.max(0.0)).map(|coords| {
                    let order = self.order.clone();
                    self.apply_coords(&order, &coords)
                });
            }
        }
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        if let Some(idx) = self.index_of(id) {
            self.order.remove(idx);
            self.items.remove(&id);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
