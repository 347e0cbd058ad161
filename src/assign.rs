use crate::languages::LanguageGroup;
use crate::trim::SENTENCE_BATCH;

/// The language and sequence number assigned to one surviving chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceLabel {
    pub language: String,
    pub sentence: u32,
}

/// Label every chunk of a trimmed, validated sequence.
///
/// More than one batch means an interleaved full recording: languages cycle
/// fastest and the sentence number advances once per full cycle. A single
/// batch is a solo pass in the group's final language. An arity-2 recording
/// of exactly two batches is read as one interleaved pass, matching the
/// volume threshold that trimmed it.
pub fn assign_labels(
    count: usize,
    group: &LanguageGroup,
    start_sentence: u32,
) -> Vec<SentenceLabel> {
    (0..count)
        .map(|index| label_at(index, count, group, start_sentence))
        .collect()
}

/// Label for the chunk at one trimmed index.
pub fn label_at(
    index: usize,
    count: usize,
    group: &LanguageGroup,
    start_sentence: u32,
) -> SentenceLabel {
    if count > SENTENCE_BATCH {
        SentenceLabel {
            language: group.language_at(index).to_string(),
            sentence: start_sentence + (index / group.arity()) as u32,
        }
    } else {
        SentenceLabel {
            language: group.solo_language().to_string(),
            sentence: start_sentence + index as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(codes: &[&str]) -> LanguageGroup {
        LanguageGroup::new(codes.iter().copied())
    }

    #[test]
    fn test_solo_batch_uses_final_language() {
        let group = group_of(&["EN", "DE"]);
        let labels = assign_labels(50, &group, 0);

        assert_eq!(labels.len(), 50);
        assert!(labels.iter().all(|l| l.language == "DE"));
        for (i, label) in labels.iter().enumerate() {
            assert_eq!(label.sentence, i as u32);
        }
    }

    #[test]
    fn test_solo_batch_honors_start_offset() {
        let group = group_of(&["EN", "RU"]);
        let labels = assign_labels(50, &group, 250);

        assert_eq!(labels[0].sentence, 250);
        assert_eq!(labels[49].sentence, 299);
    }

    #[test]
    fn test_interleaved_cycles_languages_fastest() {
        let group = group_of(&["PB", "EN", "FR"]);
        let labels = assign_labels(150, &group, 0);

        for (i, label) in labels.iter().enumerate() {
            assert_eq!(label.language, group.language_at(i));
            assert_eq!(label.sentence, (i / 3) as u32);
        }
        assert_eq!(labels[0].sentence, 0);
        assert_eq!(labels[2].sentence, 0);
        assert_eq!(labels[3].sentence, 1);
        assert_eq!(labels[149].sentence, 49);
    }

    #[test]
    fn test_interleaved_honors_start_offset() {
        let group = group_of(&["EN", "DE"]);
        let labels = assign_labels(100, &group, 100);

        assert_eq!(labels[0].sentence, 100);
        assert_eq!(labels[1].sentence, 100);
        assert_eq!(labels[99].sentence, 149);
    }

    #[test]
    fn test_two_batches_arity_two_reads_as_interleaved() {
        let group = group_of(&["EN", "DE"]);
        let labels = assign_labels(100, &group, 0);

        assert_eq!(labels[0].language, "EN");
        assert_eq!(labels[1].language, "DE");
        assert_eq!(labels[98].language, "EN");
        assert_eq!(labels[99].language, "DE");
        assert_eq!(labels[99].sentence, 49);
    }
}
