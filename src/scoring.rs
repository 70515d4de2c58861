/// Per-letter verdict used for the letter tiles shown after a submission
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Missing,
}

/// Case-insensitive exact match. No whitespace or punctuation folding.
pub fn is_match(input: &str, target: &str) -> bool {
    input.to_lowercase() == target.to_lowercase()
}

/// Compare `input` to `target` position by position.
/// Yields one outcome per target letter; letters not typed yet are `Missing`.
pub fn letter_marks(input: &str, target: &str) -> Vec<Outcome> {
    let mut typed = input.chars().flat_map(char::to_lowercase);
    target
        .chars()
        .flat_map(char::to_lowercase)
        .map(|expected| match typed.next() {
            Some(c) if c == expected => Outcome::Correct,
            Some(_) => Outcome::Incorrect,
            None => Outcome::Missing,
        })
        .collect()
}

/// Rounded percentage of `correct` over `total`; `None` when nothing was attempted
pub fn percentage(correct: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    Some(((correct as f64 / total as f64) * 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(is_match("apple", "apple"));
        assert!(!is_match("aple", "apple"));
        assert!(!is_match("apples", "apple"));
    }

    #[test]
    fn test_case_insensitive() {
        for (input, target) in [("wednesday", "Wednesday"), ("rhythm", "rhythm"), ("Banan", "banana")] {
            let lower = is_match(&input.to_lowercase(), target);
            let upper = is_match(&input.to_uppercase(), target);
            assert_eq!(is_match(input, target), lower);
            assert_eq!(lower, upper);
        }
        assert!(is_match("WEDNESDAY", "Wednesday"));
    }

    #[test]
    fn test_no_whitespace_normalization() {
        assert!(!is_match("apple ", "apple"));
        assert!(!is_match(" apple", "apple"));
    }

    #[test]
    fn test_empty_input() {
        assert!(!is_match("", "apple"));
        assert!(is_match("", ""));
    }

    #[test]
    fn test_letter_marks() {
        use Outcome::*;
        assert_eq!(
            letter_marks("aple", "apple"),
            vec![Correct, Correct, Incorrect, Incorrect, Missing]
        );
        assert_eq!(letter_marks("WED", "wed"), vec![Correct, Correct, Correct]);
        assert_eq!(letter_marks("", "ab"), vec![Missing, Missing]);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), None);
        assert_eq!(percentage(3, 3), Some(100));
        assert_eq!(percentage(2, 3), Some(67));
        assert_eq!(percentage(1, 3), Some(33));
        assert_eq!(percentage(0, 5), Some(0));
    }
}
