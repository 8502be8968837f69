use rand::Rng;
use rand::seq::SliceRandom;

use crate::words::{WordPair, distinct_translations};

/// Sampling rounds allowed per required option before falling back to the
/// distinct translations that were never drawn.
pub const MAX_SAMPLING_ROUNDS: usize = 32;

/// Build the shuffled answer options for `correct`.
///
/// Translations are drawn uniformly with replacement from `words` until
/// `min(wanted, words.len())` unique options exist. A list dominated by
/// duplicate translations can make that target unreachable, so drawing stops
/// after a bounded number of rounds and any missing slots are filled from the
/// distinct translations not yet chosen. The result never exceeds the number
/// of distinct translations and always holds `correct.translation` once.
pub fn build_options<R: Rng>(
    words: &[WordPair],
    correct: &WordPair,
    wanted: usize,
    rng: &mut R,
) -> Vec<String> {
    let target = wanted.min(words.len()).max(1);
    let mut options: Vec<String> = vec![correct.translation.clone()];

    let mut rounds = 0;
    let max_rounds = target * MAX_SAMPLING_ROUNDS;
    while options.len() < target && rounds < max_rounds && !words.is_empty() {
        rounds += 1;
        let pick = &words[rng.gen_range(0..words.len())].translation;
        if !options.contains(pick) {
            options.push(pick.clone());
        }
    }

    if options.len() < target {
        let mut missing: Vec<&str> = distinct_translations(words)
            .into_iter()
            .filter(|t| !options.iter().any(|o| o.as_str() == *t))
            .collect();
        missing.shuffle(rng);
        let room = target - options.len();
        options.extend(missing.into_iter().take(room).map(str::to_string));
    }

    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn words(pairs: &[(&str, &str)]) -> Vec<WordPair> {
        pairs.iter().map(|(t, tr)| WordPair::new(*t, *tr)).collect()
    }

    #[test]
    fn test_option_count_matches_target() {
        let list = words(&[
            ("a", "1"),
            ("b", "2"),
            ("c", "3"),
            ("d", "4"),
            ("e", "5"),
            ("f", "6"),
            ("g", "7"),
        ]);
        let mut rng = SmallRng::seed_from_u64(7);
        for wanted in [2, 4, 6] {
            for correct in &list {
                let options = build_options(&list, correct, wanted, &mut rng);
                assert_eq!(options.len(), wanted);
                assert_eq!(
                    options.iter().filter(|o| **o == correct.translation).count(),
                    1
                );
            }
        }
    }

    #[test]
    fn test_small_list_clamps_to_list_size() {
        let list = words(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let mut rng = SmallRng::seed_from_u64(1);
        let options = build_options(&list, &list[0], 6, &mut rng);
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn test_duplicate_translations_terminate() {
        // Six entries but only two distinct translations: the naive loop
        // would never reach six unique options.
        let list = words(&[
            ("a", "same"),
            ("b", "same"),
            ("c", "same"),
            ("d", "same"),
            ("e", "same"),
            ("f", "other"),
        ]);
        let mut rng = SmallRng::seed_from_u64(3);
        let options = build_options(&list, &list[0], 6, &mut rng);
        let mut sorted = options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["other".to_string(), "same".to_string()]);
    }

    #[test]
    fn test_single_word_list() {
        let list = words(&[("only", "yagona")]);
        let mut rng = SmallRng::seed_from_u64(11);
        let options = build_options(&list, &list[0], 4, &mut rng);
        assert_eq!(options, vec!["yagona".to_string()]);
    }

    #[test]
    fn test_options_are_unique() {
        let list = words(&[
            ("a", "1"),
            ("b", "1"),
            ("c", "2"),
            ("d", "3"),
            ("e", "3"),
            ("f", "4"),
            ("g", "5"),
        ]);
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..50 {
            let options = build_options(&list, &list[2], 6, &mut rng);
            let mut deduped = options.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), options.len());
            assert_eq!(options.len(), 5);
        }
    }
}
