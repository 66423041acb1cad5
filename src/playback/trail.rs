use std::collections::VecDeque;

use crate::types::Vec3;

/// Bounded path history in display units, oldest point first.
///
/// A point is only recorded once the body has moved more than `min_spacing`
/// from the last recorded point, so trail density does not depend on the
/// emission rate.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec3>,
    capacity: usize,
    min_spacing: f64,
}

impl Trail {
    pub fn new(capacity: usize, min_spacing: f64) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
            min_spacing,
        }
    }

    /// Offer a new position. Returns whether it was recorded.
    pub fn push(&mut self, pos: Vec3) -> bool {
        let accepted = match self.points.back() {
            None => true,
            Some(last) => (pos - last).norm() > self.min_spacing,
        };
        if accepted {
            self.points.push_back(pos);
        }
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
        accepted
    }

    pub fn last(&self) -> Option<&Vec3> {
        self.points.back()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter()
    }
}
