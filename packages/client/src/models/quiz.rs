use serde::{Deserialize, Serialize};

/// A single quiz prompt. The question set is fetched once per match and
/// never mutated; order is significant end-to-end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerError {
    OutOfRange { index: usize, len: usize },
    Unanswered { index: usize },
    NotNumeric { index: usize },
}

impl std::fmt::Display for AnswerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerError::OutOfRange { index, len } => {
                write!(f, "Answer index {} is out of range for {} questions", index, len)
            }
            AnswerError::Unanswered { index } => {
                write!(f, "Question {} has no answer yet", index + 1)
            }
            AnswerError::NotNumeric { index } => {
                write!(f, "Answer to question {} is not an integer", index + 1)
            }
        }
    }
}

impl std::error::Error for AnswerError {}

/// The player's in-progress answers, one slot per question.
///
/// Slots hold raw input so the presentation layer can round-trip whatever the
/// player typed; validation happens once, on [`AnswerBuffer::parsed`]. The
/// buffer length is fixed at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerBuffer {
    slots: Vec<String>,
}

impl AnswerBuffer {
    pub fn new(len: usize) -> Self {
        AnswerBuffer {
            slots: vec![String::new(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    /// Replaces exactly one slot, leaving all others untouched.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<(), AnswerError> {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(AnswerError::OutOfRange { index, len }),
        }
    }

    /// Validates and converts the whole buffer to integers, in question order.
    ///
    /// Each slot is trimmed of surrounding whitespace and must then parse as a
    /// signed decimal integer (`i64`). Empty slots and non-integer input
    /// (including decimals, which are rejected rather than truncated) fail
    /// with the first offending slot's index. No slot is mutated.
    pub fn parsed(&self) -> Result<Vec<i64>, AnswerError> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let trimmed = slot.trim();
                if trimmed.is_empty() {
                    return Err(AnswerError::Unanswered { index });
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| AnswerError::NotNumeric { index })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_buffer_is_all_unanswered() {
        let buffer = AnswerBuffer::new(3);

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.get(0), Some(""));
        assert_eq!(
            buffer.parsed().unwrap_err(),
            AnswerError::Unanswered { index: 0 }
        );
    }

    #[test]
    fn test_set_replaces_exactly_one_slot() {
        let mut buffer = AnswerBuffer::new(3);

        buffer.set(1, "42").unwrap();

        assert_eq!(buffer.get(0), Some(""));
        assert_eq!(buffer.get(1), Some("42"));
        assert_eq!(buffer.get(2), Some(""));
    }

    #[test]
    fn test_set_out_of_range_is_rejected() {
        let mut buffer = AnswerBuffer::new(2);

        let err = buffer.set(2, "7").unwrap_err();

        assert_eq!(err, AnswerError::OutOfRange { index: 2, len: 2 });
        assert_eq!(buffer, AnswerBuffer::new(2));
    }

    #[test]
    fn test_parsed_reports_first_offending_slot() {
        let mut buffer = AnswerBuffer::new(3);
        buffer.set(0, "4").unwrap();
        buffer.set(1, "abc").unwrap();

        assert_eq!(
            buffer.parsed().unwrap_err(),
            AnswerError::NotNumeric { index: 1 }
        );
    }

    #[test]
    fn test_parsed_accepts_signed_and_padded_integers() {
        let mut buffer = AnswerBuffer::new(3);
        buffer.set(0, "  4 ").unwrap();
        buffer.set(1, "-17").unwrap();
        buffer.set(2, "+3").unwrap();

        assert_eq!(buffer.parsed().unwrap(), vec![4, -17, 3]);
    }

    #[test]
    fn test_parsed_rejects_decimals_instead_of_truncating() {
        let mut buffer = AnswerBuffer::new(1);
        buffer.set(0, "4.5").unwrap();

        assert_eq!(
            buffer.parsed().unwrap_err(),
            AnswerError::NotNumeric { index: 0 }
        );
    }

    proptest! {
        #[test]
        fn buffer_length_never_changes_under_in_range_writes(
            len in 1usize..12,
            writes in prop::collection::vec(
                (any::<prop::sample::Index>(), "-?[0-9]{0,4}"),
                0..40,
            ),
        ) {
            let mut buffer = AnswerBuffer::new(len);
            for (index, value) in &writes {
                buffer.set(index.index(len), value.as_str()).unwrap();
                prop_assert_eq!(buffer.len(), len);
            }
        }

        #[test]
        fn out_of_range_writes_never_mutate(
            len in 0usize..8,
            index in 8usize..64,
            value in "-?[0-9]{0,4}",
        ) {
            let mut buffer = AnswerBuffer::new(len);
            let before = buffer.clone();

            prop_assert!(buffer.set(index, value.as_str()).is_err());
            prop_assert_eq!(buffer, before);
        }
    }
}
