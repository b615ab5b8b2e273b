use crate::world::EnemyId;
use sim_core::Tick;
use std::collections::BTreeMap;

/// Tick-keyed schedule of recurring attack hits, one pending entry per
/// attached enemy.
///
/// Entries carry generational `EnemyId`s, so a hit scheduled for an enemy
/// that has since been removed resolves to nothing at drain time even if
/// `cancel` was never called for it.
#[derive(Clone, Debug, Default)]
pub struct AttackSchedule {
    due: BTreeMap<Tick, Vec<EnemyId>>,
}

impl AttackSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, tick: Tick, id: EnemyId) {
        self.due.entry(tick).or_default().push(id);
    }

    /// Remove every pending entry owned by the given enemy.
    pub fn cancel(&mut self, id: EnemyId) {
        self.due.retain(|_, ids| {
            ids.retain(|&pending| pending != id);
            !ids.is_empty()
        });
    }

    /// Take all entries due at or before `tick`, in due order.
    pub fn drain_due(&mut self, tick: Tick) -> Vec<(Tick, EnemyId)> {
        let later = self.due.split_off(&(tick + 1));
        let due = std::mem::replace(&mut self.due, later);
        due.into_iter()
            .flat_map(|(t, ids)| ids.into_iter().map(move |id| (t, id)))
            .collect()
    }

    /// Push every pending entry `by` ticks into the future, preserving each
    /// entry's remaining delay. Used to suspend attacks for a freeze window.
    pub fn defer_all(&mut self, by: u64) {
        let old = std::mem::take(&mut self.due);
        for (t, ids) in old {
            self.due.entry(t + by).or_default().extend(ids);
        }
    }

    pub fn clear(&mut self) {
        self.due.clear();
    }

    pub fn pending(&self) -> usize {
        self.due.values().map(Vec::len).sum()
    }

    /// Next due tick for the given enemy, if any. Test and debug aid.
    pub fn next_due(&self, id: EnemyId) -> Option<Tick> {
        self.due
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(&t, _)| t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Enemy;
    use crate::config::EnemyKind;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<EnemyId> {
        let mut arena: SlotMap<EnemyId, Enemy> = SlotMap::with_key();
        (0..n)
            .map(|_| {
                arena.insert(Enemy {
                    kind: EnemyKind::Small,
                    hp: 1,
                    max_hp: 1,
                    x: 0.0,
                    y: 0.0,
                    base_y: 0.0,
                    bob_tick: 0,
                    speed: 0.0,
                    attached: false,
                })
            })
            .collect()
    }

    #[test]
    fn drains_in_due_order() {
        let ids = ids(3);
        let mut sched = AttackSchedule::new();
        sched.schedule(30, ids[0]);
        sched.schedule(10, ids[1]);
        sched.schedule(20, ids[2]);

        let due = sched.drain_due(20);
        assert_eq!(due, vec![(10, ids[1]), (20, ids[2])]);
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.next_due(ids[0]), Some(30));
    }

    #[test]
    fn cancel_removes_only_the_owner() {
        let ids = ids(2);
        let mut sched = AttackSchedule::new();
        sched.schedule(10, ids[0]);
        sched.schedule(10, ids[1]);

        sched.cancel(ids[0]);
        assert_eq!(sched.drain_due(10), vec![(10, ids[1])]);
    }

    #[test]
    fn defer_preserves_remaining_delay() {
        let ids = ids(2);
        let mut sched = AttackSchedule::new();
        sched.schedule(10, ids[0]);
        sched.schedule(100, ids[1]);

        sched.defer_all(180);
        assert_eq!(sched.next_due(ids[0]), Some(190));
        assert_eq!(sched.next_due(ids[1]), Some(280));
    }
}
