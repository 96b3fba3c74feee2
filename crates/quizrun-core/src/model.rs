//! Core data model types for quizrun.
//!
//! A [`ProblemSet`] is plain owned data: cloning it deep-copies every
//! question and answer, and its order is the presentation order.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Problem {
    /// Text shown to the respondent.
    pub question: String,
    /// Answer compared against the respondent's input.
    pub answer: String,
}

impl Problem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Exact, case-sensitive comparison after trimming surrounding whitespace
    /// on both sides.
    pub fn is_correct(&self, given: &str) -> bool {
        given.trim() == self.answer.trim()
    }
}

/// An ordered collection of problems for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemSet {
    problems: Vec<Problem>,
}

impl ProblemSet {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    /// Build a set from `(question, answer)` pairs.
    pub fn from_pairs<I, Q, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(q, a)| Problem::new(q, a))
            .collect()
    }

    /// Permute the problems in place, uniformly over all orderings.
    ///
    /// The random source is explicit so callers can seed it.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.problems.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Problem> {
        self.problems.get(index)
    }

    /// Iterate in presentation order. Restartable: iterating twice without a
    /// shuffle in between yields the same order.
    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }

    pub fn as_slice(&self) -> &[Problem] {
        &self.problems
    }

    pub fn into_inner(self) -> Vec<Problem> {
        self.problems
    }
}

impl FromIterator<Problem> for ProblemSet {
    fn from_iter<T: IntoIterator<Item = Problem>>(iter: T) -> Self {
        Self {
            problems: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ProblemSet {
    type Item = &'a Problem;
    type IntoIter = std::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.iter()
    }
}

impl IntoIterator for ProblemSet {
    type Item = Problem;
    type IntoIter = std::vec::IntoIter<Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.into_iter()
    }
}

/// Settings for a single session run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    timeout: Option<Duration>,
}

impl SessionConfig {
    /// No deadline: the session ends only once every problem is answered.
    pub fn unlimited() -> Self {
        Self { timeout: None }
    }

    /// Deadline of `secs` seconds. `0` disables the deadline.
    pub fn from_timeout_secs(secs: u64) -> Self {
        Self::unlimited().with_timeout(Duration::from_secs(secs))
    }

    /// Set the deadline. A zero duration disables it rather than expiring
    /// immediately.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// The armed deadline, if any. Never `Some(Duration::ZERO)`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn arithmetic() -> ProblemSet {
        ProblemSet::from_pairs([("5+8", "13"), ("6*3", "18"), ("9-4", "5"), ("2+2", "4")])
    }

    #[test]
    fn is_correct_trims_but_is_case_sensitive() {
        let p = Problem::new("capital of France", " Paris ");
        assert!(p.is_correct("Paris"));
        assert!(p.is_correct("  Paris\n"));
        assert!(!p.is_correct("paris"));
        assert!(!p.is_correct("Pa ris"));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let original = arithmetic();
        let mut shuffled = original.clone();
        let mut rng = StdRng::seed_from_u64(7);
        shuffled.shuffle(&mut rng);

        assert_eq!(shuffled.len(), original.len());
        let mut a: Vec<_> = original.iter().cloned().collect();
        let mut b: Vec<_> = shuffled.iter().cloned().collect();
        a.sort_by(|x, y| x.question.cmp(&y.question));
        b.sort_by(|x, y| x.question.cmp(&y.question));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_with_same_seed_is_deterministic() {
        let mut first = arithmetic();
        let mut second = arithmetic();
        first.shuffle(&mut StdRng::seed_from_u64(42));
        second.shuffle(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_reaches_every_ordering() {
        let base = ProblemSet::from_pairs([("a", "1"), ("b", "2"), ("c", "3")]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let mut set = base.clone();
            set.shuffle(&mut rng);
            let order: Vec<String> = set.iter().map(|p| p.question.clone()).collect();
            seen.insert(order);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn shuffle_small_sets_is_noop() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut empty = ProblemSet::default();
        empty.shuffle(&mut rng);
        assert!(empty.is_empty());

        let mut single = ProblemSet::from_pairs([("only", "one")]);
        single.shuffle(&mut rng);
        assert_eq!(single.get(0), Some(&Problem::new("only", "one")));
    }

    #[test]
    fn clone_does_not_alias() {
        let original = ProblemSet::from_pairs([("5+8", "13"), ("6*3", "18")]);
        let snapshot = original.clone();
        let mut copy = original.clone().into_inner();
        copy[0] = Problem::new("6-4", "2");
        copy[1].answer.push('!');

        assert_eq!(original, snapshot);
        assert_ne!(ProblemSet::new(copy), original);
    }

    #[test]
    fn iteration_is_restartable() {
        let set = arithmetic();
        let first: Vec<_> = set.iter().collect();
        let second: Vec<_> = (&set).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_timeout_means_unlimited() {
        assert_eq!(SessionConfig::from_timeout_secs(0).timeout(), None);
        assert_eq!(
            SessionConfig::unlimited()
                .with_timeout(Duration::ZERO)
                .timeout(),
            None
        );
        assert_eq!(
            SessionConfig::from_timeout_secs(30).timeout(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(SessionConfig::default(), SessionConfig::unlimited());
    }
}
