use std::collections::BTreeMap;

use log::debug;

use crate::storage::{KeyValueStore, StorageService};

pub const ATTEMPT_KEY: &str = "quiz_attempt";
pub const FINISHED_KEY: &str = "quiz_finished";

/// Question id -> selected choice id.
pub type Attempt = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fresh,
    InProgress,
    Finished,
}

/// Owns the in-progress answers and the finished flag, and mirrors both into
/// storage.
///
/// Once finished, the attempt is kept in memory for feedback but is never
/// written again until [`QuizState::reset`].
#[derive(Debug)]
pub struct QuizState<S> {
    storage: StorageService<S>,
    attempt_key: String,
    finished_key: String,
    attempt: Attempt,
    phase: Phase,
}

impl<S: KeyValueStore> QuizState<S> {
    pub fn new(storage: StorageService<S>) -> Self {
        Self::with_keys(storage, ATTEMPT_KEY, FINISHED_KEY)
    }

    pub fn with_keys(
        storage: StorageService<S>,
        attempt_key: impl Into<String>,
        finished_key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            attempt_key: attempt_key.into(),
            finished_key: finished_key.into(),
            attempt: Attempt::new(),
            phase: Phase::Fresh,
        }
    }

    /// A finished attempt is never resumed: it resets instead.
    pub fn load(&mut self) {
        if self.storage.load::<bool>(&self.finished_key) == Some(true) {
            debug!("Previous attempt was finished, starting over");
            self.reset();
            return;
        }
        if let Some(attempt) = self.storage.load::<Attempt>(&self.attempt_key) {
            debug!("Restored {} answer(s)", attempt.len());
            self.attempt = attempt;
            self.phase = Phase::InProgress;
        }
    }

    fn save(&mut self) {
        if !self.is_finished() {
            self.storage.save(&self.attempt_key, &self.attempt);
        }
    }

    pub fn mark_finished(&mut self) {
        self.phase = Phase::Finished;
        self.storage.save(&self.finished_key, &true);
        self.storage.remove(&self.attempt_key);
    }

    pub fn reset(&mut self) {
        self.attempt.clear();
        self.phase = Phase::Fresh;
        self.storage.remove(&self.attempt_key);
        self.storage.remove(&self.finished_key);
    }

    pub fn set_answer(&mut self, question_id: &str, choice_id: &str) {
        self.attempt
            .insert(question_id.to_string(), choice_id.to_string());
        if !self.is_finished() {
            self.phase = Phase::InProgress;
        }
        self.save();
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.attempt.get(question_id).map(String::as_str)
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn storage(&self) -> &StorageService<S> {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn fresh() -> QuizState<MemoryStore> {
        let mut state = QuizState::new(StorageService::new(MemoryStore::new()));
        state.load();
        state
    }

    fn persisted_attempt(state: &QuizState<MemoryStore>) -> Option<Attempt> {
        state.storage().load(ATTEMPT_KEY)
    }

    #[test]
    fn starts_fresh_without_stored_data() {
        let state = fresh();
        assert_eq!(state.phase(), Phase::Fresh);
        assert!(state.attempt().is_empty());
        assert!(!state.is_finished());
    }

    #[test]
    fn set_answer_is_readable_and_persisted() {
        let mut state = fresh();
        state.set_answer("1", "c");
        state.set_answer("2", "a");
        state.set_answer("2", "b");

        assert_eq!(state.answer("1"), Some("c"));
        assert_eq!(state.answer("2"), Some("b"));
        assert_eq!(state.answer("3"), None);
        assert_eq!(state.phase(), Phase::InProgress);
        assert_eq!(persisted_attempt(&state).as_ref(), Some(state.attempt()));
    }

    #[test]
    fn load_restores_in_progress_attempt() {
        let mut first = fresh();
        first.set_answer("1", "c");
        let store = first.storage().store().clone();

        let mut second = QuizState::new(StorageService::new(store));
        second.load();
        assert_eq!(second.answer("1"), Some("c"));
        assert_eq!(second.phase(), Phase::InProgress);
    }

    #[test]
    fn finishing_removes_attempt_and_blocks_later_writes() {
        let mut state = fresh();
        state.set_answer("1", "c");
        state.mark_finished();

        assert_eq!(state.phase(), Phase::Finished);
        assert_eq!(state.answer("1"), Some("c"));
        assert_eq!(persisted_attempt(&state), None);
        assert_eq!(state.storage().load::<bool>(FINISHED_KEY), Some(true));

        state.set_answer("2", "a");
        assert_eq!(persisted_attempt(&state), None);
    }

    #[test]
    fn load_after_finish_matches_reset() {
        let mut state = fresh();
        state.set_answer("1", "c");
        state.mark_finished();
        let store = state.storage().store().clone();

        let mut reloaded = QuizState::new(StorageService::new(store));
        reloaded.load();

        assert_eq!(reloaded.phase(), Phase::Fresh);
        assert!(reloaded.attempt().is_empty());
        assert!(!reloaded.is_finished());
        assert_eq!(reloaded.storage().load::<bool>(FINISHED_KEY), None);
        assert_eq!(persisted_attempt(&reloaded), None);
    }

    #[test]
    fn finished_flag_wins_over_a_stale_attempt_record() {
        let mut storage = StorageService::new(MemoryStore::new());
        storage.save(ATTEMPT_KEY, &Attempt::from([("1".into(), "a".into())]));
        storage.save(FINISHED_KEY, &true);

        let mut state = QuizState::new(storage);
        state.load();
        assert_eq!(state.phase(), Phase::Fresh);
        assert_eq!(persisted_attempt(&state), None);
    }

    #[test]
    fn reset_clears_memory_and_storage() {
        let mut state = fresh();
        state.set_answer("1", "c");
        state.mark_finished();
        state.reset();

        assert_eq!(state.phase(), Phase::Fresh);
        assert_eq!(state.storage().load::<bool>(FINISHED_KEY), None);

        state.set_answer("1", "a");
        assert_eq!(
            persisted_attempt(&state),
            Some(Attempt::from([("1".into(), "a".into())]))
        );
    }

    #[test]
    fn custom_keys_are_used() {
        let mut state =
            QuizState::with_keys(StorageService::new(MemoryStore::new()), "a", "f");
        state.set_answer("1", "c");
        assert!(state.storage().load::<Attempt>("a").is_some());
        assert!(persisted_attempt(&state).is_none());
    }

    #[test]
    fn adopting_an_empty_stored_attempt_is_in_progress() {
        let mut storage = StorageService::new(MemoryStore::new());
        storage.save(ATTEMPT_KEY, &Attempt::new());

        let mut state = QuizState::new(storage);
        state.load();
        assert_eq!(state.phase(), Phase::InProgress);
        assert!(state.attempt().is_empty());

        state.reset();
        assert_eq!(state.phase(), Phase::Fresh);
    }

    #[test]
    fn malformed_attempt_loads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(ATTEMPT_KEY, "[1, 2").unwrap();
        let mut state = QuizState::new(StorageService::new(store));
        state.load();
        assert_eq!(state.phase(), Phase::Fresh);
    }
}
