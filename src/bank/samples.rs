use super::question::{Answer, Question};

/// Questions a brand new bank starts with when seeding is on.
pub fn starter_questions() -> Vec<Question> {
    vec![
        question(
            "What is the capital of France?",
            &[
                ("London", false),
                ("Paris", true),
                ("Berlin", false),
                ("Madrid", false),
            ],
        ),
        question(
            "Which planet is known as the Red Planet?",
            &[("Venus", false), ("Mars", true), ("Jupiter", false)],
        ),
        question(
            "What is the largest ocean on Earth?",
            &[
                ("Atlantic Ocean", false),
                ("Indian Ocean", false),
                ("Pacific Ocean", true),
                ("Arctic Ocean", false),
            ],
        ),
    ]
}

fn question(text: &str, answers: &[(&str, bool)]) -> Question {
    Question::new(
        text,
        answers
            .iter()
            .map(|(text, correct)| Answer::new(*text, *correct))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_starter_question_has_exactly_one_correct_answer() {
        let questions = starter_questions();
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.correct_count() == 1));
    }
}
