use tracing::debug;

use super::question::{Answer, Draft, Question, QuestionId};

/// Ordered, exclusively owned collection of questions. Newest questions come first.
///
/// Every operation is total: unknown ids and blank answers are absorbed
/// silently instead of being reported. A stored question never has more
/// than one correct answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    query: String,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank holding `questions` in the given display order.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions,
            query: String::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn create(&mut self, draft: Draft) -> QuestionId {
        let question = Question::new(draft.text, normalize(draft.answers));
        let id = *question.id();
        debug!(%id, answers = question.answers().len(), "Creating question");
        self.questions.insert(0, question);
        id
    }

    pub fn update(&mut self, id: &QuestionId, draft: Draft) {
        match self.questions.iter_mut().find(|q| q.id() == id) {
            Some(question) => {
                debug!(%id, "Updating question");
                question.replace(draft.text, normalize(draft.answers));
            }
            None => debug!(%id, "Update of unknown question ignored"),
        }
    }

    pub fn remove(&mut self, id: &QuestionId) {
        let before = self.questions.len();
        self.questions.retain(|q| q.id() != id);
        if self.questions.len() < before {
            debug!(%id, "Removed question");
        }
    }

    /// Questions whose text contains `query`, ignoring case, in display order.
    pub fn search(&self, query: &str) -> Vec<&Question> {
        if query.is_empty() {
            return self.questions.iter().collect();
        }
        let needle = query.to_lowercase();
        self.questions
            .iter()
            .filter(|q| q.text().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// `search` with the current query.
    pub fn visible(&self) -> Vec<&Question> {
        self.search(&self.query)
    }
}

/// Drops blank answers and keeps only the first correct flag.
fn normalize(answers: Vec<Answer>) -> Vec<Answer> {
    let mut seen_correct = false;
    answers
        .into_iter()
        .filter(|a| !a.is_blank())
        .map(|a| {
            if !a.is_correct() {
                a
            } else if seen_correct {
                Answer::with_id(*a.id(), a.text(), false)
            } else {
                seen_correct = true;
                a
            }
        })
        .collect()
}
