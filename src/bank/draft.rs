use std::fmt;

use super::question::{Answer, AnswerId, Draft, Question};

/// Fewest answer slots a draft may hold.
pub const MIN_ANSWERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSlot {
    id: AnswerId,
    text: String,
}

impl AnswerSlot {
    fn empty() -> Self {
        Self {
            id: AnswerId::generate(),
            text: String::new(),
        }
    }

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A question being edited.
///
/// The correct answer is a single optional slot id, so the draft can never
/// hold more than one correct answer. Slots are only turned back into
/// per-answer flags by [`QuestionDraft::into_draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    text: String,
    slots: Vec<AnswerSlot>,
    correct: Option<AnswerId>,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionDraft {
    /// Empty question text and two empty, unselected answers.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            slots: (0..MIN_ANSWERS).map(|_| AnswerSlot::empty()).collect(),
            correct: None,
        }
    }

    pub fn from_question(question: &Question) -> Self {
        let mut slots: Vec<AnswerSlot> = question
            .answers()
            .iter()
            .map(|a| AnswerSlot {
                id: *a.id(),
                text: a.text().to_owned(),
            })
            .collect();
        while slots.len() < MIN_ANSWERS {
            slots.push(AnswerSlot::empty());
        }

        Self {
            text: question.text().to_owned(),
            slots,
            correct: question
                .answers()
                .iter()
                .find(|a| a.is_correct())
                .map(|a| *a.id()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn slots(&self) -> &[AnswerSlot] {
        &self.slots
    }

    pub fn slot_at(&self, index: usize) -> Option<&AnswerSlot> {
        self.slots.get(index)
    }

    pub fn correct(&self) -> Option<&AnswerId> {
        self.correct.as_ref()
    }

    pub fn is_correct(&self, id: &AnswerId) -> bool {
        self.correct.as_ref() == Some(id)
    }

    pub fn can_remove(&self) -> bool {
        self.slots.len() > MIN_ANSWERS
    }

    /// Appends an empty, unselected slot and returns its id.
    pub fn add_answer(&mut self) -> AnswerId {
        let slot = AnswerSlot::empty();
        let id = slot.id;
        self.slots.push(slot);
        id
    }

    /// Blocked while only [`MIN_ANSWERS`] slots remain.
    pub fn remove_answer(&mut self, id: &AnswerId) {
        if !self.can_remove() {
            return;
        }
        self.slots.retain(|s| &s.id != id);
        if self.is_correct(id) {
            self.correct = None;
        }
    }

    pub fn set_answer_text(&mut self, id: &AnswerId, text: impl Into<String>) {
        if let Some(slot) = self.slots.iter_mut().find(|s| &s.id == id) {
            slot.text = text.into();
        }
    }

    /// Selects `id` as the only correct answer.
    pub fn mark_correct(&mut self, id: &AnswerId) {
        if self.slots.iter().any(|s| &s.id == id) {
            self.correct = Some(*id);
        }
    }

    pub fn into_draft(self) -> Draft {
        let correct = self.correct;
        let answers = self
            .slots
            .into_iter()
            .map(|slot| {
                let is_correct = correct == Some(slot.id);
                Answer::with_id(slot.id, slot.text, is_correct)
            })
            .collect();
        Draft::new(self.text, answers)
    }
}

impl fmt::Display for QuestionDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            writeln!(f, "Question: (empty)")?;
        } else {
            writeln!(f, "Question: {}", self.text)?;
        }
        writeln!(f, "Answer options:")?;
        for (i, slot) in self.slots.iter().enumerate() {
            let mark = if self.is_correct(&slot.id) { '◉' } else { '○' };
            let text = if slot.text.is_empty() {
                "(empty)"
            } else {
                slot.text.as_str()
            };
            writeln!(f, "{mark} {}. {text}", i + 1)?;
        }
        write!(f, "The selected option is the correct answer.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_ids(draft: &QuestionDraft) -> Vec<AnswerId> {
        draft.slots().iter().map(|s| *s.id()).collect()
    }

    #[test]
    fn new_draft_has_two_empty_unselected_slots() {
        let draft = QuestionDraft::new();
        assert_eq!(draft.text(), "");
        assert_eq!(draft.slots().len(), MIN_ANSWERS);
        assert!(draft.slots().iter().all(|s| s.text().is_empty()));
        assert!(draft.correct().is_none());
        assert_ne!(draft.slots()[0].id(), draft.slots()[1].id());
    }

    #[test]
    fn removal_is_blocked_at_two_slots() {
        let mut draft = QuestionDraft::new();
        let ids = slot_ids(&draft);

        draft.remove_answer(&ids[0]);
        draft.remove_answer(&ids[1]);

        assert_eq!(slot_ids(&draft), ids);
    }

    #[test]
    fn added_slot_can_be_removed_again() {
        let mut draft = QuestionDraft::new();
        let extra = draft.add_answer();
        assert_eq!(draft.slots().len(), 3);
        assert!(draft.can_remove());
        assert!(draft.slot_at(2).unwrap().text().is_empty());
        assert!(!draft.is_correct(&extra));

        draft.remove_answer(&extra);
        assert_eq!(draft.slots().len(), 2);
        assert!(!draft.can_remove());
    }

    #[test]
    fn marking_correct_is_exclusive() {
        let mut draft = QuestionDraft::new();
        let ids = slot_ids(&draft);
        draft.set_answer_text(&ids[0], "A");
        draft.set_answer_text(&ids[1], "B");

        draft.mark_correct(&ids[0]);
        draft.mark_correct(&ids[1]);

        let saved = draft.into_draft();
        let correct: Vec<_> = saved
            .answers
            .iter()
            .filter(|a| a.is_correct())
            .map(Answer::text)
            .collect();
        assert_eq!(correct, ["B"]);
        assert!(!saved.answers[0].is_correct());
    }

    #[test]
    fn marking_unknown_slot_keeps_selection() {
        let mut draft = QuestionDraft::new();
        let ids = slot_ids(&draft);
        draft.mark_correct(&ids[1]);
        draft.mark_correct(&AnswerId::generate());
        assert_eq!(draft.correct(), Some(&ids[1]));
    }

    #[test]
    fn removing_selected_slot_clears_selection() {
        let mut draft = QuestionDraft::new();
        let extra = draft.add_answer();
        draft.mark_correct(&extra);
        draft.remove_answer(&extra);
        assert!(draft.correct().is_none());
    }

    #[test]
    fn opening_a_question_copies_it_and_pads_to_two_slots() {
        let question = Question::new("Capital of Italy?", vec![Answer::new("Rome", true)]);
        let draft = QuestionDraft::from_question(&question);

        assert_eq!(draft.text(), "Capital of Italy?");
        assert_eq!(draft.slots().len(), MIN_ANSWERS);
        assert_eq!(draft.slots()[0].id(), question.answers()[0].id());
        assert_eq!(draft.slots()[1].text(), "");
        assert_eq!(draft.correct(), Some(question.answers()[0].id()));
    }

    #[test]
    fn first_flagged_answer_wins_when_opening() {
        let question = Question::new(
            "Q",
            vec![
                Answer::new("a", false),
                Answer::new("b", true),
                Answer::new("c", true),
            ],
        );
        let draft = QuestionDraft::from_question(&question);
        assert_eq!(draft.correct(), Some(question.answers()[1].id()));
        assert_eq!(draft.into_draft().answers.iter().filter(|a| a.is_correct()).count(), 1);
    }

    #[test]
    fn rendering_marks_the_selected_option() {
        let mut draft = QuestionDraft::new();
        let ids = slot_ids(&draft);
        draft.set_text("Capital of Italy?");
        draft.set_answer_text(&ids[0], "Rome");
        draft.mark_correct(&ids[0]);

        let rendered = draft.to_string();
        assert!(rendered.contains("Question: Capital of Italy?\n"));
        assert!(rendered.contains("◉ 1. Rome\n"));
        assert!(rendered.contains("○ 2. (empty)\n"));
    }
}
