use super::{Record, RecordId};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Picks a random record from `pool` whose id is not in `excluded_ids`.
pub fn next_quiz_question<T: Record + Clone>(
    pool: &[T],
    excluded_ids: &HashSet<RecordId>,
) -> Option<T> {
    next_quiz_question_with(pool, excluded_ids, &mut rand::thread_rng())
}

/// Same as [`next_quiz_question`] with a caller-supplied random source.
pub fn next_quiz_question_with<T, R>(
    pool: &[T],
    excluded_ids: &HashSet<RecordId>,
    rng: &mut R,
) -> Option<T>
where
    T: Record + Clone,
    R: Rng + ?Sized,
{
    let candidates: Vec<&T> = pool
        .iter()
        .filter(|record| !excluded_ids.contains(&record.id()))
        .collect();

    candidates.choose(rng).map(|record| (*record).clone())
}

/// Per-request quiz session: the candidate pool plus the ids already asked.
///
/// The excluded set only grows; the client resubmits it with every request.
#[derive(Debug, Clone)]
pub struct QuizState<T> {
    candidate_pool: Vec<T>,
    excluded_ids: HashSet<RecordId>,
}

impl<T: Record + Clone> QuizState<T> {
    pub fn new(candidate_pool: Vec<T>, excluded_ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            candidate_pool,
            excluded_ids: excluded_ids.into_iter().collect(),
        }
    }

    pub fn excluded_ids(&self) -> &HashSet<RecordId> {
        &self.excluded_ids
    }

    /// Marks `id` as asked. Returns false if it was already excluded.
    pub fn exclude(&mut self, id: RecordId) -> bool {
        self.excluded_ids.insert(id)
    }

    pub fn remaining(&self) -> usize {
        self.candidate_pool
            .iter()
            .filter(|record| !self.excluded_ids.contains(&record.id()))
            .count()
    }

    pub fn next(&self) -> Option<T> {
        next_quiz_question(&self.candidate_pool, &self.excluded_ids)
    }

    pub fn next_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        next_quiz_question_with(&self.candidate_pool, &self.excluded_ids, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::DynamicRecord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn pool(ids: &[i64]) -> Vec<DynamicRecord> {
        ids.iter()
            .map(|id| DynamicRecord::from_json(json!({"id": id, "question": "?"})).unwrap())
            .collect()
    }

    #[test]
    fn test_never_returns_excluded_question() {
        let pool = pool(&[1, 2, 3, 4]);
        let excluded: HashSet<RecordId> = [1, 3].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let picked = next_quiz_question_with(&pool, &excluded, &mut rng).unwrap();
            assert!(!excluded.contains(&picked.id()));
        }
    }

    #[test]
    fn test_exhausted_pool_returns_none() {
        let pool = pool(&[1, 2]);
        let excluded: HashSet<RecordId> = [1, 2, 5].into_iter().collect();
        assert!(next_quiz_question(&pool, &excluded).is_none());
        assert!(next_quiz_question::<DynamicRecord>(&[], &HashSet::new()).is_none());
    }

    #[test]
    fn test_every_candidate_can_be_picked() {
        let pool = pool(&[1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();

        for _ in 0..300 {
            seen.insert(next_quiz_question_with(&pool, &HashSet::new(), &mut rng).unwrap().id());
        }

        assert_eq!(seen, [1, 2, 3].into_iter().collect());
    }

    #[test]
    fn test_state_walks_pool_without_repeats() {
        let mut state = QuizState::new(pool(&[10, 20, 30]), [20]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut asked = Vec::new();

        while let Some(question) = state.next_with(&mut rng) {
            assert!(state.exclude(question.id()));
            asked.push(question.id());
        }

        asked.sort();
        assert_eq!(asked, vec![10, 30]);
        assert_eq!(state.remaining(), 0);
        assert!(!state.exclude(10));
        assert_eq!(state.excluded_ids().len(), 3);
    }
}
