//! Rotation state without any timers or I/O.
//!
//! Each order moves one way through `unseen -> queued -> displayed -> shown`.
//! [`Rotation`] tracks where every order is and reports which orders were just
//! promoted, so the owner can start their dwell timers. Time is passed in explicitly.

use crate::model::{OrderId, ReadyOrder};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;

/// An order on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub order: ReadyOrder,
    /// When the order entered the display, not when it was fetched.
    pub start_time: Instant,
}

#[derive(Debug)]
pub struct Rotation {
    slots: usize,
    dwell: Duration,
    /// Latest successful poll, by id.
    known: HashMap<OrderId, ReadyOrder>,
    /// Known orders waiting for a slot, oldest first.
    queue: VecDeque<OrderId>,
    /// At most `slots` entries, in promotion order.
    displayed: Vec<DisplayEntry>,
    /// Orders whose dwell elapsed. Never displayed or queued again.
    shown: BTreeSet<OrderId>,
}

impl Rotation {
    pub fn new(slots: usize, dwell: Duration) -> Self {
        Self {
            slots,
            dwell,
            known: HashMap::new(),
            queue: VecDeque::new(),
            displayed: Vec::with_capacity(slots),
            shown: BTreeSet::new(),
        }
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Replaces the known-ready set with `orders` and fills free slots.
    ///
    /// Returns the ids promoted into the display, in promotion order.
    pub fn apply_poll(&mut self, orders: Vec<ReadyOrder>, now: Instant) -> Vec<OrderId> {
        let mut known = HashMap::with_capacity(orders.len());
        let mut arrival = Vec::with_capacity(orders.len());
        for order in orders {
            if !known.contains_key(&order.order_id) {
                arrival.push(order.order_id);
                known.insert(order.order_id, order);
            }
        }

        // Queued orders that vanished lose their place; they queue at the back if they return.
        self.queue.retain(|id| known.contains_key(id));
        let queued: HashSet<OrderId> = self.queue.iter().copied().collect();
        for id in arrival {
            if !queued.contains(&id) && !self.is_displayed(id) && !self.shown.contains(&id) {
                self.queue.push_back(id);
            }
        }

        // Displayed orders keep their slot and start time even when they vanish.
        for entry in &mut self.displayed {
            if let Some(fresh) = known.get(&entry.order.order_id) {
                entry.order = fresh.clone();
            }
        }

        self.known = known;
        self.promote(now)
    }

    /// Moves a displayed order to the shown history and fills the freed slot.
    ///
    /// Returns `None` when `id` is not on display.
    pub fn expire(&mut self, id: OrderId, now: Instant) -> Option<Vec<OrderId>> {
        let position = self.displayed.iter().position(|e| e.order.order_id == id)?;
        self.displayed.remove(position);
        self.shown.insert(id);
        Some(self.promote(now))
    }

    fn promote(&mut self, now: Instant) -> Vec<OrderId> {
        let mut promoted = Vec::new();
        while self.displayed.len() < self.slots {
            let Some(id) = self.queue.pop_front() else {
                break;
            };
            // Queue entries are always known; the check keeps a broken invariant from panicking.
            let Some(order) = self.known.get(&id) else {
                continue;
            };
            self.displayed.push(DisplayEntry {
                order: order.clone(),
                start_time: now,
            });
            promoted.push(id);
        }
        promoted
    }

    pub fn is_displayed(&self, id: OrderId) -> bool {
        self.displayed.iter().any(|e| e.order.order_id == id)
    }

    pub fn is_shown(&self, id: OrderId) -> bool {
        self.shown.contains(&id)
    }

    pub fn displayed(&self) -> &[DisplayEntry] {
        &self.displayed
    }

    pub fn queued(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.queue.iter().copied()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    pub fn shown(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.shown.iter().copied()
    }

    /// Time left on screen for `entry`, never below zero.
    pub fn remaining(&self, entry: &DisplayEntry, now: Instant) -> Duration {
        self.dwell
            .saturating_sub(now.saturating_duration_since(entry.start_time))
    }
}

/// Formats a remaining time as `m:ss`, rounding partial seconds up.
pub fn format_remaining(remaining: Duration) -> String {
    let seconds = remaining.as_millis().div_ceil(1000);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DWELL: Duration = Duration::from_secs(120);

    fn orders(ids: &[u64]) -> Vec<ReadyOrder> {
        ids.iter().map(|&id| ReadyOrder::new(id, None)).collect()
    }

    fn displayed_ids(rotation: &Rotation) -> Vec<u64> {
        rotation.displayed().iter().map(|e| e.order.order_id.0).collect()
    }

    fn queued_ids(rotation: &Rotation) -> Vec<u64> {
        rotation.queued().map(|id| id.0).collect()
    }

    #[test]
    fn test_fills_slots_in_arrival_order() {
        let now = Instant::now();
        let mut rotation = Rotation::new(2, DWELL);

        let promoted = rotation.apply_poll(orders(&[1, 2, 3]), now);

        assert_eq!(promoted, vec![OrderId(1), OrderId(2)]);
        assert_eq!(displayed_ids(&rotation), vec![1, 2]);
        assert_eq!(queued_ids(&rotation), vec![3]);
    }

    #[test]
    fn test_expiry_promotes_and_never_readmits() {
        let start = Instant::now();
        let mut rotation = Rotation::new(2, DWELL);
        rotation.apply_poll(orders(&[1, 2, 3]), start);

        let promoted = rotation.expire(OrderId(1), start + DWELL).unwrap();
        assert_eq!(promoted, vec![OrderId(3)]);
        assert_eq!(displayed_ids(&rotation), vec![2, 3]);
        assert!(rotation.is_shown(OrderId(1)));
        assert_eq!(rotation.queued_count(), 0);

        let promoted = rotation.apply_poll(orders(&[1, 2, 3]), start + DWELL);
        assert!(promoted.is_empty());
        assert_eq!(queued_ids(&rotation), Vec::<u64>::new());
        assert!(!rotation.is_displayed(OrderId(1)));
    }

    #[test]
    fn test_reordered_payload_keeps_queue_order() {
        let now = Instant::now();
        let mut rotation = Rotation::new(1, DWELL);
        rotation.apply_poll(orders(&[1, 2, 3]), now);

        rotation.apply_poll(orders(&[3, 2, 1, 4]), now);

        assert_eq!(displayed_ids(&rotation), vec![1]);
        assert_eq!(queued_ids(&rotation), vec![2, 3, 4]);
    }

    #[test]
    fn test_unchanged_payload_is_a_no_op() {
        let now = Instant::now();
        let mut rotation = Rotation::new(2, DWELL);
        rotation.apply_poll(orders(&[5, 6, 7]), now);
        let before = (displayed_ids(&rotation), queued_ids(&rotation));

        let promoted = rotation.apply_poll(orders(&[5, 6, 7]), now + Duration::from_secs(5));

        assert!(promoted.is_empty());
        assert_eq!((displayed_ids(&rotation), queued_ids(&rotation)), before);
        assert_eq!(rotation.displayed()[0].start_time, now);
    }

    #[test]
    fn test_vanished_display_keeps_slot_and_queued_order_requeues_at_back() {
        let now = Instant::now();
        let mut rotation = Rotation::new(1, DWELL);
        rotation.apply_poll(orders(&[1, 2, 3]), now);

        // 1 is on display and disappears; 2 is queued and disappears.
        rotation.apply_poll(orders(&[3]), now);
        assert_eq!(displayed_ids(&rotation), vec![1]);
        assert_eq!(queued_ids(&rotation), vec![3]);

        rotation.apply_poll(orders(&[2, 3]), now);
        assert_eq!(queued_ids(&rotation), vec![3, 2]);
    }

    #[test]
    fn test_duplicate_ids_in_one_payload_count_once() {
        let now = Instant::now();
        let mut rotation = Rotation::new(2, DWELL);

        rotation.apply_poll(orders(&[8, 8, 9, 8]), now);

        assert_eq!(displayed_ids(&rotation), vec![8, 9]);
        assert_eq!(rotation.queued_count(), 0);
    }

    #[test]
    fn test_expire_unknown_is_none() {
        let mut rotation = Rotation::new(2, DWELL);
        assert!(rotation.expire(OrderId(42), Instant::now()).is_none());
        assert!(!rotation.is_shown(OrderId(42)));
    }

    #[test]
    fn test_remaining_and_format() {
        let start = Instant::now();
        let mut rotation = Rotation::new(2, DWELL);
        rotation.apply_poll(orders(&[1]), start);
        let entry = rotation.displayed()[0].clone();

        assert_eq!(rotation.remaining(&entry, start), DWELL);
        assert_eq!(
            rotation.remaining(&entry, start + Duration::from_millis(500)),
            Duration::from_millis(119_500)
        );
        assert_eq!(rotation.remaining(&entry, start + DWELL * 2), Duration::ZERO);

        assert_eq!(format_remaining(DWELL), "2:00");
        assert_eq!(format_remaining(Duration::from_millis(119_500)), "2:00");
        assert_eq!(format_remaining(Duration::from_millis(59_001)), "1:00");
        assert_eq!(format_remaining(Duration::from_secs(9)), "0:09");
        assert_eq!(format_remaining(Duration::ZERO), "0:00");
    }
}
