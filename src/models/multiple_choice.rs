//! Multiple-choice questions built from the words of a running session.
use super::Word;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Correct answer plus at most three distractors.
pub const MAX_OPTIONS: usize = 4;

/// Which side of a word is asked about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionDirection {
    /// Show the meaning, pick the word.
    #[default]
    MeaningToWord,
    /// Toss a coin for every question.
    Random,
}

/// The side shown to the learner as the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptSide {
    Word,
    Meaning,
}

#[derive(Clone, Debug)]
pub struct MultipleChoiceQuestion {
    pub shown: PromptSide,
    pub prompt: String,
    pub answer: String,
    pub options: Vec<String>,
}

impl MultipleChoiceQuestion {
    /// Builds the question for `deck[index]`.
    ///
    /// Distractors come from the other words of the same deck, drawn without
    /// replacement. Texts equal to an option already taken are skipped, so a
    /// small deck simply yields fewer options.
    pub fn build<R: Rng + ?Sized>(
        deck: &[Word],
        index: usize,
        direction: QuestionDirection,
        rng: &mut R,
    ) -> Option<Self> {
        let target = deck.get(index)?;

        let shown = match direction {
            QuestionDirection::MeaningToWord => PromptSide::Meaning,
            QuestionDirection::Random => {
                if rng.random_bool(0.5) {
                    PromptSide::Word
                } else {
                    PromptSide::Meaning
                }
            }
        };

        let answer_side = |word: &Word| match shown {
            PromptSide::Meaning => word.word.clone(),
            PromptSide::Word => word.meaning.clone(),
        };
        let prompt = match shown {
            PromptSide::Meaning => target.meaning.clone(),
            PromptSide::Word => target.word.clone(),
        };
        let answer = answer_side(target);

        let mut pool: Vec<String> = deck
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, word)| answer_side(word))
            .collect();
        pool.shuffle(rng);

        let mut options = vec![answer.clone()];
        for candidate in pool {
            if options.len() == MAX_OPTIONS {
                break;
            }
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }
        options.shuffle(rng);

        Some(Self {
            shown,
            prompt,
            answer,
            options,
        })
    }

    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListId, WordId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn deck(size: usize) -> Vec<Word> {
        (0..size)
            .map(|i| Word {
                id: WordId(i as i64 + 1),
                owner_id: "local".to_string(),
                list_id: ListId(1),
                word: format!("word{i}"),
                meaning: format!("meaning{i}"),
                correct_count: 0,
                incorrect_count: 0,
            })
            .collect()
    }

    #[test]
    fn test_options_contain_answer_once_and_never_repeat() {
        for size in 1..8 {
            let words = deck(size);
            for seed in 0..20 {
                let mut rng = StdRng::seed_from_u64(seed);
                for index in 0..size {
                    let question = MultipleChoiceQuestion::build(
                        &words,
                        index,
                        QuestionDirection::Random,
                        &mut rng,
                    )
                    .unwrap();

                    assert!(question.options.len() <= MAX_OPTIONS);
                    assert_eq!(question.options.len(), size.min(MAX_OPTIONS));
                    let hits = question
                        .options
                        .iter()
                        .filter(|o| **o == question.answer)
                        .count();
                    assert_eq!(hits, 1);

                    let mut unique = question.options.clone();
                    unique.sort();
                    unique.dedup();
                    assert_eq!(unique.len(), question.options.len());
                }
            }
        }
    }

    #[test]
    fn test_meaning_to_word_shows_meaning() {
        let words = deck(4);
        let mut rng = StdRng::seed_from_u64(3);
        let question =
            MultipleChoiceQuestion::build(&words, 2, QuestionDirection::MeaningToWord, &mut rng)
                .unwrap();

        assert_eq!(question.shown, PromptSide::Meaning);
        assert_eq!(question.prompt, "meaning2");
        assert_eq!(question.answer, "word2");
        assert!(question.options.iter().all(|o| o.starts_with("word")));
    }

    #[test]
    fn test_duplicate_texts_are_not_offered_twice() {
        let mut words = deck(3);
        words[1].word = "word0".to_string();
        let mut rng = StdRng::seed_from_u64(11);
        let question =
            MultipleChoiceQuestion::build(&words, 0, QuestionDirection::MeaningToWord, &mut rng)
                .unwrap();

        assert_eq!(question.options.len(), 2);
    }

    #[test]
    fn test_out_of_range_index() {
        let words = deck(2);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(
            MultipleChoiceQuestion::build(&words, 2, QuestionDirection::Random, &mut rng)
                .is_none()
        );
    }
}
