use std::{fmt, str::FromStr};

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnswerId(Uuid);

impl QuestionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AnswerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl FromStr for AnswerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id: AnswerId,
    text: String,
    is_correct: bool,
}

/// Question text and answers as handed to `create` and `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub answers: Vec<Answer>,
}

impl Draft {
    pub fn new(text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            text: text.into(),
            answers,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.trim().is_empty() {
            writeln!(f, "(no question text)")?;
        } else {
            writeln!(f, "{}", self.text)?;
        }
        for (i, answer) in self.answers.iter().enumerate() {
            writeln!(f, "{}) {}", i + 1, answer)?;
        }
        write!(f, "\n{}", self.summary())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_correct {
            write!(f, "{} ✅", self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

impl Question {
    pub fn new(text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            id: QuestionId::generate(),
            text: text.into(),
            answers,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct()).count()
    }

    /// "4 answers, 1 correct"; the correct part is left out when nothing is marked.
    pub fn summary(&self) -> String {
        let count = self.answers.len();
        let noun = if count == 1 { "answer" } else { "answers" };
        match self.correct_count() {
            0 => format!("{count} {noun}"),
            correct => format!("{count} {noun}, {correct} correct"),
        }
    }

    pub(crate) fn replace(&mut self, text: String, answers: Vec<Answer>) {
        self.text = text;
        self.answers = answers;
    }
}

impl Answer {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self::with_id(AnswerId::generate(), text, is_correct)
    }

    pub fn with_id(id: AnswerId, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id,
            text: text.into(),
            is_correct,
        }
    }

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_strings() {
        let id = QuestionId::generate();
        assert_eq!(id.to_string().parse::<QuestionId>().unwrap(), id);
        assert!("not-an-id".parse::<QuestionId>().is_err());
    }

    #[test]
    fn summary_mentions_correct_answers_only_when_marked() {
        let unmarked = Question::new("Q", vec![Answer::new("a", false)]);
        assert_eq!(unmarked.summary(), "1 answer");

        let marked = Question::new(
            "Q",
            vec![Answer::new("a", false), Answer::new("b", true)],
        );
        assert_eq!(marked.summary(), "2 answers, 1 correct");
    }

    #[test]
    fn card_lists_numbered_answers() {
        let question = Question::new(
            "Which planet is known as the Red Planet?",
            vec![Answer::new("Venus", false), Answer::new("Mars", true)],
        );
        let card = question.to_string();
        assert!(card.starts_with("Which planet is known as the Red Planet?\n"));
        assert!(card.contains("1) Venus\n"));
        assert!(card.contains("2) Mars ✅\n"));
        assert!(card.ends_with("2 answers, 1 correct"));
    }

    #[test]
    fn whitespace_only_answer_is_blank() {
        assert!(Answer::new("   ", false).is_blank());
        assert!(!Answer::new(" Rome ", true).is_blank());
    }
}
