use shared_types::CandidateRecord;

/// Per-row review lifecycle. A row in `Processing` has its buttons disabled;
/// rows stay independent, so reviewing one candidate never blocks the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Pending,
    Processing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    pub record: CandidateRecord,
    pub state: ReviewState,
}

/// The admin candidate queue: unconfirmed detections plus their in-flight
/// review state. Verified or rejected candidates leave the list immediately;
/// a failed action returns its row to `Pending` so it can be retried.
#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    entries: Vec<ReviewEntry>,
}

impl ReviewQueue {
    /// Install a freshly fetched candidate list, dropping all review state.
    pub fn replace(&mut self, candidates: Vec<CandidateRecord>) {
        self.entries = candidates
            .into_iter()
            .map(|record| ReviewEntry {
                record,
                state: ReviewState::Pending,
            })
            .collect();
    }

    pub fn entries(&self) -> &[ReviewEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_processing(&self, id: i64) -> bool {
        self.entries
            .iter()
            .any(|e| e.record.id == id && e.state == ReviewState::Processing)
    }

    /// Mark a candidate as in flight. Returns `false` when the candidate is
    /// unknown or already being processed; callers skip the request then.
    pub fn begin(&mut self, id: i64) -> bool {
        match self.entry_mut(id) {
            Some(entry) if entry.state == ReviewState::Pending => {
                entry.state = ReviewState::Processing;
                true
            }
            _ => false,
        }
    }

    /// The action succeeded; the candidate leaves the queue.
    pub fn finish_success(&mut self, id: i64) {
        self.entries.retain(|e| e.record.id != id);
    }

    /// The action failed; the row becomes actionable again.
    pub fn finish_failure(&mut self, id: i64) {
        if let Some(entry) = self.entry_mut(id) {
            entry.state = ReviewState::Pending;
        }
    }

    fn entry_mut(&mut self, id: i64) -> Option<&mut ReviewEntry> {
        self.entries.iter_mut().find(|e| e.record.id == id)
    }
}
