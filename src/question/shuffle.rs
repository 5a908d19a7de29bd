use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::model::Question;

/// Reorders the questions of a new session.
pub trait Shuffler {
    fn shuffle(&mut self, questions: &mut [Question]);
}

/// Uniform random permutation backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Same seed, same order. Used by `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, questions: &mut [Question]) {
        questions.shuffle(&mut self.rng);
    }
}

/// Keeps source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShuffle;

impl Shuffler for NoShuffle {
    fn shuffle(&mut self, _questions: &mut [Question]) {}
}

impl<F> Shuffler for F
where
    F: FnMut(&mut [Question]),
{
    fn shuffle(&mut self, questions: &mut [Question]) {
        self(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::OptionLabel;

    fn numbered(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                text: format!("Q{i}"),
                options: ["a".into(), "b".into(), "c".into(), "d".into()],
                correct: OptionLabel::A,
                explanation: String::new(),
                subject: "General".into(),
                difficulty: "Medium".into(),
            })
            .collect()
    }

    fn texts(qs: &[Question]) -> Vec<String> {
        qs.iter().map(|q| q.text.clone()).collect()
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut first = numbered(20);
        let mut second = numbered(20);
        RandomShuffler::seeded(7).shuffle(&mut first);
        RandomShuffler::seeded(7).shuffle(&mut second);
        assert_eq!(texts(&first), texts(&second));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut qs = numbered(20);
        RandomShuffler::from_os_rng().shuffle(&mut qs);
        let mut got = texts(&qs);
        got.sort();
        let mut want = texts(&numbered(20));
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn no_shuffle_keeps_order() {
        let mut qs = numbered(5);
        NoShuffle.shuffle(&mut qs);
        assert_eq!(texts(&qs), texts(&numbered(5)));
    }

    #[test]
    fn closure_shuffler() {
        let mut qs = numbered(3);
        let mut reverse = |qs: &mut [Question]| qs.reverse();
        reverse.shuffle(&mut qs);
        assert_eq!(texts(&qs), ["Q2", "Q1", "Q0"]);
    }
}
