#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PracticeState {
    pub target: Option<String>,
    pub correct: u32,
    pub incorrect: u32,
}

impl PracticeState {
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Percentage of counted keystrokes that hit the target. `None` until the
    /// first keystroke is counted.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.correct as f64 / total as f64 * 100.0)
    }

    pub fn score_line(&self) -> String {
        let counts = format!("Correct: {} | Incorrect: {}", self.correct, self.incorrect);
        match self.accuracy() {
            Some(accuracy) => format!("{counts} | Accuracy: {accuracy:.1}%"),
            None => counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(correct: u32, incorrect: u32) -> PracticeState {
        PracticeState {
            target: None,
            correct,
            incorrect,
        }
    }

    #[test]
    fn test_fresh_state_has_no_accuracy() {
        let s = PracticeState::default();
        assert_eq!(s.accuracy(), None);
        assert_eq!(s.score_line(), "Correct: 0 | Incorrect: 0");
    }

    #[test]
    fn test_accuracy_three_of_four() {
        let s = state(3, 1);
        assert_eq!(s.accuracy(), Some(75.0));
        assert_eq!(s.score_line(), "Correct: 3 | Incorrect: 1 | Accuracy: 75.0%");
    }

    #[test]
    fn test_accuracy_rounds_to_one_decimal() {
        assert_eq!(
            state(1, 2).score_line(),
            "Correct: 1 | Incorrect: 2 | Accuracy: 33.3%"
        );
        assert_eq!(
            state(2, 1).score_line(),
            "Correct: 2 | Incorrect: 1 | Accuracy: 66.7%"
        );
    }

    #[test]
    fn test_all_incorrect() {
        assert_eq!(
            state(0, 4).score_line(),
            "Correct: 0 | Incorrect: 4 | Accuracy: 0.0%"
        );
    }
}
