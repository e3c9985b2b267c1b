//! A letter-sequence hidden Markov model estimated from paired
//! ground-truth/noisy words, decoded with the Viterbi algorithm. Hidden
//! states are true letters, observations are the noisy letters a flawed
//! reader produced.

use itertools::izip;
use log::info;
use std::collections::HashMap;

/// Probability tables estimated by [`LetterHmm::train`].
#[derive(Debug, Clone, Default)]
pub struct LetterHmm {
    /// P(first hidden letter).
    initial: HashMap<char, f64>,
    /// P(current hidden letter | previous hidden letter), keyed
    /// (previous, current).
    transition: HashMap<(char, char), f64>,
    /// P(observed letter | hidden letter), keyed (hidden, observed).
    emission: HashMap<(char, char), f64>,
}

impl LetterHmm {
    /// Estimates all three tables by relative frequency over the given
    /// (truth, observed) word pairs. Words are compared position by
    /// position; a pair's surplus letters beyond the shorter word are
    /// ignored.
    pub fn train<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut word_count = 0usize;
        let mut initial_counts: HashMap<char, usize> = HashMap::new();
        let mut transition_counts: HashMap<(char, char), usize> = HashMap::new();
        let mut emission_counts: HashMap<(char, char), usize> = HashMap::new();
        // denominators: occurrences of the conditioned letter
        let mut transition_totals: HashMap<char, usize> = HashMap::new();
        let mut emission_totals: HashMap<char, usize> = HashMap::new();

        for (truth, observed) in pairs {
            word_count += 1;
            let mut previous = None;
            for (hidden, seen) in truth.chars().zip(observed.chars()) {
                *emission_counts.entry((hidden, seen)).or_default() += 1;
                *emission_totals.entry(hidden).or_default() += 1;
                match previous {
                    None => *initial_counts.entry(hidden).or_default() += 1,
                    Some(prev) => {
                        *transition_counts.entry((prev, hidden)).or_default() += 1;
                        *transition_totals.entry(prev).or_default() += 1;
                    }
                }
                previous = Some(hidden);
            }
        }
        info!("Trained letter HMM on {word_count} word pairs");

        let initial = initial_counts
            .into_iter()
            .map(|(letter, n)| (letter, n as f64 / word_count as f64))
            .collect();
        let transition = transition_counts
            .into_iter()
            .map(|((prev, cur), n)| ((prev, cur), n as f64 / transition_totals[&prev] as f64))
            .collect();
        let emission = emission_counts
            .into_iter()
            .map(|((hidden, seen), n)| ((hidden, seen), n as f64 / emission_totals[&hidden] as f64))
            .collect();
        Self {
            initial,
            transition,
            emission,
        }
    }

    fn emission_probability(&self, hidden: char, seen: char) -> f64 {
        self.emission.get(&(hidden, seen)).copied().unwrap_or(0.0)
    }

    fn transition_probability(&self, previous: char, current: char) -> f64 {
        self.transition
            .get(&(previous, current))
            .copied()
            .unwrap_or(0.0)
    }

    /// Most likely hidden word for a noisy observation (Viterbi). The
    /// hidden domain is the set of letters seen in initial position during
    /// training; ties break toward the alphabetically smaller letter so
    /// decoding is deterministic.
    pub fn decode(&self, observed: &str) -> String {
        let observed: Vec<char> = observed.chars().collect();
        let mut domain: Vec<char> = self.initial.keys().copied().collect();
        domain.sort_unstable();
        if observed.is_empty() || domain.is_empty() {
            return String::new();
        }

        let mut scores: HashMap<char, f64> = domain
            .iter()
            .map(|&letter| {
                (
                    letter,
                    self.initial[&letter] * self.emission_probability(letter, observed[0]),
                )
            })
            .collect();
        let mut backpointers: Vec<HashMap<char, char>> = Vec::with_capacity(observed.len() - 1);

        for &seen in &observed[1..] {
            let mut next_scores = HashMap::new();
            let mut pointers = HashMap::new();
            for &current in &domain {
                let mut best = (domain[0], 0.0);
                for &previous in &domain {
                    let p = scores[&previous]
                        * self.transition_probability(previous, current)
                        * self.emission_probability(current, seen);
                    if p > best.1 {
                        best = (previous, p);
                    }
                }
                next_scores.insert(current, best.1);
                pointers.insert(current, best.0);
            }
            scores = next_scores;
            backpointers.push(pointers);
        }

        let mut last = domain[0];
        let mut best = 0.0;
        for &letter in &domain {
            if scores[&letter] > best {
                best = scores[&letter];
                last = letter;
            }
        }

        let mut sequence = vec![last];
        for pointers in backpointers.iter().rev() {
            last = pointers[&last];
            sequence.push(last);
        }
        sequence.reverse();
        sequence.into_iter().collect()
    }
}

/// Counts positions where the noisy letter differs from the truth but the
/// decoded letter matches it, i.e. genuine corrections.
pub fn corrected_letters(truth: &str, observed: &str, decoded: &str) -> usize {
    izip!(truth.chars(), observed.chars(), decoded.chars())
        .filter(|&(t, o, d)| t != o && t == d)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn frequencies_become_probabilities() {
        let model = LetterHmm::train([("ab", "ab"), ("ab", "ob"), ("ba", "ba")]);
        // 2 of 3 words start with 'a'
        assert_close(model.initial[&'a'], 2.0 / 3.0);
        assert_close(model.initial[&'b'], 1.0 / 3.0);
        // both transitions out of 'a' go to 'b'
        assert_close(model.transition[&('a', 'b')], 1.0);
        assert_close(model.transition[&('b', 'a')], 1.0);
        // 'a' is misread as 'o' once out of three occurrences
        assert_close(model.emission[&('a', 'a')], 2.0 / 3.0);
        assert_close(model.emission[&('a', 'o')], 1.0 / 3.0);
        assert_close(model.emission[&('b', 'b')], 1.0);
    }

    #[test]
    fn noiseless_words_decode_to_themselves() {
        let model = LetterHmm::train([("ab", "ab"), ("ba", "ba")]);
        assert_eq!(model.decode("ab"), "ab");
        assert_eq!(model.decode("ba"), "ba");
    }

    #[test]
    fn consistent_noise_is_corrected() {
        // 'c' is sometimes misread as 'o'; transitions only allow "cat"
        let pairs = [
            ("cat", "cat"),
            ("cat", "oat"),
            ("cat", "cat"),
            ("at", "at"),
            ("ta", "ta"),
        ];
        let model = LetterHmm::train(pairs);
        assert_eq!(model.decode("oat"), "cat");
    }

    #[test]
    fn empty_observation_decodes_to_empty() {
        let model = LetterHmm::train([("ab", "ab")]);
        assert_eq!(model.decode(""), "");
    }

    #[test]
    fn corrected_letters_counts_only_real_fixes() {
        // position 1: observed wrong, decoded right -> counted
        // position 2: observed wrong, decoded also wrong -> not counted
        assert_eq!(corrected_letters("abc", "axy", "abz"), 1);
        assert_eq!(corrected_letters("abc", "abc", "abc"), 0);
        assert_eq!(corrected_letters("", "", ""), 0);
    }
}
