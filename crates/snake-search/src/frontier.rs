//! Best-first frontier with one live member per head position.
//!
//! `BinaryHeap` cannot remove arbitrary entries, so replacement is lazy: every heap entry carries
//! the stamp it was inserted with, the member map holds the stamp of the live state for each head,
//! and entries whose stamp no longer matches are dropped when they surface on `pop`.

use core::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use snake_core::Position;

use crate::{Goal, SearchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    g: u32,
    stamp: u64,
    head: Position,
}

impl OpenEntry {
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.g, self.stamp)
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
struct Member {
    stamp: u64,
    state: SearchState,
}

/// What [`Frontier::offer`] did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// No member shared the candidate's head.
    Inserted,
    /// A member with the same head but strictly higher cost was replaced.
    Replaced,
    /// A member with the same head and lower or equal cost was kept.
    Rejected,
}

/// Priority queue ordered by `cost + manhattan(head, target)`, then cost, then insertion order.
#[derive(Debug)]
pub struct Frontier {
    goal: Goal,
    open: BinaryHeap<OpenEntry>,
    members: BTreeMap<Position, Member>,
    next_stamp: u64,
    high_water: usize,
}

impl Frontier {
    pub fn new(goal: Goal) -> Self {
        Self {
            goal,
            open: BinaryHeap::new(),
            members: BTreeMap::new(),
            next_stamp: 0,
            high_water: 0,
        }
    }

    pub fn priority(&self, state: &SearchState) -> u32 {
        state.cost().saturating_add(self.goal.heuristic(state))
    }

    /// Insert unconditionally, replacing any member with the same head.
    pub fn insert(&mut self, state: SearchState) {
        let head = state.dominance_key();
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        self.open.push(OpenEntry {
            f: self.priority(&state),
            g: state.cost(),
            stamp,
            head,
        });
        self.members.insert(head, Member { stamp, state });
        self.high_water = self.high_water.max(self.members.len());
    }

    /// Insert unless a member with the same head is at least as cheap.
    pub fn offer(&mut self, state: SearchState) -> Offer {
        let head = state.dominance_key();
        let outcome = match self.members.get(&head) {
            Some(existing) if existing.state.cost() <= state.cost() => return Offer::Rejected,
            Some(_) => Offer::Replaced,
            None => Offer::Inserted,
        };
        self.remove(head);
        self.insert(state);
        outcome
    }

    /// Pop the member with the lowest priority.
    pub fn pop(&mut self) -> Option<SearchState> {
        while let Some(entry) = self.open.pop() {
            let live = self
                .members
                .get(&entry.head)
                .is_some_and(|m| m.stamp == entry.stamp);
            if !live {
                // Stale heap entry.
                continue;
            }
            return self.members.remove(&entry.head).map(|m| m.state);
        }
        None
    }

    pub fn contains(&self, head: Position) -> bool {
        self.members.contains_key(&head)
    }

    pub fn get(&self, head: Position) -> Option<&SearchState> {
        self.members.get(&head).map(|m| &m.state)
    }

    /// Remove the member at `head`. Its heap entry goes stale and is skipped later.
    pub fn remove(&mut self, head: Position) -> Option<SearchState> {
        self.members.remove(&head).map(|m| m.state)
    }

    /// Live members in head order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchState> {
        self.members.values().map(|m| &m.state)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Largest number of live members held at once.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
