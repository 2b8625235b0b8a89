use crate::models::snapshot::Snapshot;

/// Ordered snapshot sequence plus the current cursor. The sequence is fixed
/// per load; every transition is a bounded increment, decrement or jump, so
/// the cursor is always in range whenever the sequence is non-empty.
#[derive(Debug, Default)]
pub struct NavigationState {
    snapshots: Vec<Snapshot>,
    cursor: Option<usize>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the snapshots sorted newest-first and reset the cursor to the
    /// newest entry. Ties on date keep their original index order.
    pub fn load(&mut self, mut raw: Vec<Snapshot>) {
        raw.sort_by(|a, b| b.date.cmp(&a.date));
        self.cursor = if raw.is_empty() { None } else { Some(0) };
        self.snapshots = raw;
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|i| self.snapshots.get(i))
    }

    /// Jump to an index. Out-of-range requests are silently ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.snapshots.len() {
            self.cursor = Some(index);
        }
    }

    /// Advance towards older snapshots. No-op at the end of the sequence.
    pub fn next(&mut self) {
        if let Some(i) = self.cursor {
            if i + 1 < self.snapshots.len() {
                self.cursor = Some(i + 1);
            }
        }
    }

    /// Retreat towards newer snapshots. No-op at the start of the sequence.
    pub fn previous(&mut self) {
        if let Some(i) = self.cursor {
            if i > 0 {
                self.cursor = Some(i - 1);
            }
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self.cursor, Some(i) if i + 1 < self.snapshots.len())
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.cursor, Some(i) if i > 0)
    }

    /// Display number for the current snapshot: the oldest is iteration #1,
    /// the newest is #len.
    pub fn display_number(&self) -> Option<usize> {
        self.cursor.map(|i| self.snapshots.len() - i)
    }
}
