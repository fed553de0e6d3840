use std::fmt;

use super::question::{QuestionId, QuestionPatch, QuestionRecord};
use super::DraftError;

/// The editing buffer of a single quiz.
///
/// Questions are kept in authoring order, which is also the display order.
/// Every mutation goes through the draft so the structural invariants hold
/// no matter what the caller sends: ids are unique, points are positive and
/// `correct_index` always points into `options`.
#[derive(Debug, Clone)]
pub struct QuizDraft {
    questions: Vec<QuestionRecord>,
    next_id: QuestionId,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuizDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.questions.is_empty() {
            return writeln!(f, "No questions yet.");
        }
        for (i, question) in self.questions.iter().enumerate() {
            write!(f, "Question {}: {}", i + 1, question)?;
        }
        write!(
            f,
            "{} question(s), {} point(s) total",
            self.questions.len(),
            self.total_points()
        )
    }
}

impl QuizDraft {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            next_id: 1,
        }
    }

    /// A draft holding the example question a new authoring session opens with.
    pub fn seeded() -> Self {
        let example = QuestionRecord::with_fields(
            1,
            1,
            "What is the value of 7×(3+2)?".to_owned(),
            ["21", "14", "35", "45"].map(String::from).to_vec(),
            2,
        );
        Self {
            questions: vec![example],
            next_id: 2,
        }
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&QuestionRecord> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Summed as `u64` so any number of `u32` point values fits.
    pub fn total_points(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.points())).sum()
    }

    /// Appends a default multiple-choice question.
    ///
    /// Ids come from a counter that only moves forward, so an id is never
    /// handed out twice during the draft's lifetime.
    pub fn add_question(&mut self) -> &QuestionRecord {
        let id = self.next_id;
        self.next_id += 1;
        self.questions.push(QuestionRecord::new(id));
        &self.questions[self.questions.len() - 1]
    }

    /// Merges `patch` into the question with `id`.
    ///
    /// The merged result is validated first; on error nothing is written.
    pub fn update_question(
        &mut self,
        id: QuestionId,
        patch: QuestionPatch,
    ) -> Result<(), DraftError> {
        let question = self.find_mut(id)?;

        if patch.points == Some(0) {
            return Err(DraftError::InvalidPoints);
        }
        let len = patch
            .options
            .as_ref()
            .map_or(question.options().len(), Vec::len);
        let index = patch.correct_index.unwrap_or(question.correct_index());
        if index >= len {
            return Err(DraftError::OutOfRange { index, len });
        }

        question.apply(patch);
        Ok(())
    }

    /// Removes the question with `id`. Unknown ids are ignored.
    pub fn remove_question(&mut self, id: QuestionId) -> Option<QuestionRecord> {
        let position = self.position(id)?;
        Some(self.questions.remove(position))
    }

    pub fn set_correct_option(&mut self, id: QuestionId, index: usize) -> Result<(), DraftError> {
        let question = self.find_mut(id)?;
        check_index(index, question.options().len())?;
        question.set_correct_index(index);
        Ok(())
    }

    pub fn update_option(
        &mut self,
        id: QuestionId,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DraftError> {
        let question = self.find_mut(id)?;
        check_index(index, question.options().len())?;
        question.set_option(index, text.into());
        Ok(())
    }

    /// Moves the question with `id` to position `to`, shifting the others.
    pub fn move_question(&mut self, id: QuestionId, to: usize) -> Result<(), DraftError> {
        let from = self.position(id).ok_or(DraftError::NotFound(id))?;
        check_index(to, self.questions.len())?;
        let question = self.questions.remove(from);
        self.questions.insert(to, question);
        Ok(())
    }

    fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    fn find_mut(&mut self, id: QuestionId) -> Result<&mut QuestionRecord, DraftError> {
        self.questions
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or(DraftError::NotFound(id))
    }
}

fn check_index(index: usize, len: usize) -> Result<(), DraftError> {
    if index < len {
        Ok(())
    } else {
        Err(DraftError::OutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(draft: &QuizDraft) -> Vec<QuestionId> {
        draft.questions().iter().map(QuestionRecord::id).collect()
    }

    fn draft_with(count: usize) -> QuizDraft {
        let mut draft = QuizDraft::new();
        for _ in 0..count {
            draft.add_question();
        }
        draft
    }

    #[test]
    fn add_to_empty_draft() {
        let mut draft = QuizDraft::new();
        draft.add_question();

        assert_eq!(draft.len(), 1);
        let first = &draft.questions()[0];
        assert_eq!(first.id(), 1);
        assert_eq!(first.options().len(), 4);
        assert_eq!(first.correct_index(), 0);
        assert_eq!(first.points(), 10);
    }

    #[test]
    fn delete_middle_then_add() {
        let mut draft = draft_with(3);
        draft.remove_question(2);
        assert_eq!(ids(&draft), vec![1, 3]);

        let added = draft.add_question().id();
        assert_eq!(added, 4);
        assert_eq!(ids(&draft), vec![1, 3, 4]);
    }

    #[test]
    fn removed_ids_are_never_reissued() {
        let mut draft = draft_with(3);
        draft.remove_question(3);
        draft.remove_question(2);

        assert_eq!(draft.add_question().id(), 4);
    }

    #[test]
    fn ids_stay_unique_across_mixed_operations() {
        let mut draft = QuizDraft::new();
        for round in 0..10u32 {
            draft.add_question();
            draft.add_question();
            if round % 3 == 0 {
                draft.remove_question(round + 1);
            }
        }
        let unique: HashSet<_> = ids(&draft).into_iter().collect();
        assert_eq!(unique.len(), draft.len());
    }

    #[test]
    fn removal_is_idempotent() {
        let mut draft = draft_with(3);

        assert!(draft.remove_question(2).is_some());
        assert!(draft.remove_question(2).is_none());
        assert_eq!(ids(&draft), vec![1, 3]);
    }

    #[test]
    fn update_merges_patch_and_keeps_order() {
        let mut draft = draft_with(3);
        draft
            .update_question(2, QuestionPatch::new().prompt("Capital of France?").points(3))
            .unwrap();

        assert_eq!(ids(&draft), vec![1, 2, 3]);
        let updated = draft.get(2).unwrap();
        assert_eq!(updated.prompt(), "Capital of France?");
        assert_eq!(updated.points(), 3);
        assert_eq!(draft.get(1).unwrap().prompt(), "");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut draft = draft_with(1);

        assert_eq!(
            draft.update_question(9, QuestionPatch::new().prompt("x")),
            Err(DraftError::NotFound(9))
        );
    }

    #[test]
    fn update_rejects_zero_points() {
        let mut draft = draft_with(1);

        assert_eq!(
            draft.update_question(1, QuestionPatch::new().points(0)),
            Err(DraftError::InvalidPoints)
        );
        assert_eq!(draft.get(1).unwrap().points(), 10);
    }

    #[test]
    fn total_points_does_not_overflow() {
        let mut draft = draft_with(3);
        for id in 1..=3 {
            draft
                .update_question(id, QuestionPatch::new().points(u32::MAX))
                .unwrap();
        }

        assert_eq!(draft.total_points(), 3 * u64::from(u32::MAX));
        assert!(draft
            .to_string()
            .ends_with("3 question(s), 12884901885 point(s) total"));
    }

    #[test]
    fn shrinking_options_below_correct_index_is_rejected() {
        let mut draft = draft_with(1);
        draft.set_correct_option(1, 3).unwrap();

        let result = draft.update_question(1, QuestionPatch::new().options(["Yes", "No"]));

        assert_eq!(result, Err(DraftError::OutOfRange { index: 3, len: 2 }));
        assert_eq!(draft.get(1).unwrap().options().len(), 4);
    }

    #[test]
    fn shrinking_options_with_new_correct_index_is_accepted() {
        let mut draft = draft_with(1);
        draft.set_correct_option(1, 3).unwrap();

        draft
            .update_question(1, QuestionPatch::new().options(["Yes", "No"]).correct_index(1))
            .unwrap();

        let question = draft.get(1).unwrap();
        assert_eq!(question.options(), &["Yes", "No"]);
        assert_eq!(question.correct_option(), Some("No"));
    }

    #[test]
    fn empty_option_list_is_rejected() {
        let mut draft = draft_with(1);

        assert_eq!(
            draft.update_question(1, QuestionPatch::new().options(Vec::<String>::new())),
            Err(DraftError::OutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn set_correct_option_within_bounds() {
        let mut draft = draft_with(2);
        draft.set_correct_option(2, 1).unwrap();

        let question = draft.get(2).unwrap();
        assert_eq!(question.correct_index(), 1);
        assert!(question.correct_index() < question.options().len());
        assert_eq!(ids(&draft), vec![1, 2]);
    }

    #[test]
    fn set_correct_option_out_of_range() {
        let mut draft = draft_with(1);

        assert_eq!(
            draft.set_correct_option(1, 4),
            Err(DraftError::OutOfRange { index: 4, len: 4 })
        );
        assert_eq!(draft.get(1).unwrap().correct_index(), 0);
        assert_eq!(draft.set_correct_option(7, 0), Err(DraftError::NotFound(7)));
    }

    #[test]
    fn update_option_replaces_single_text() {
        let mut draft = draft_with(3);
        draft.set_correct_option(2, 2).unwrap();
        draft.update_option(2, 1, "Paris").unwrap();

        assert_eq!(ids(&draft), vec![1, 2, 3]);
        assert_eq!(draft.get(1).unwrap().options()[1], "Option B");
        assert_eq!(draft.get(3).unwrap().options()[1], "Option B");
        let question = draft.get(2).unwrap();
        assert_eq!(
            question.options(),
            &["Option A", "Paris", "Option C", "Option D"]
        );
        assert_eq!(question.correct_index(), 2);
        assert_eq!(
            draft.update_option(2, 4, "x"),
            Err(DraftError::OutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn move_question_reorders() {
        let mut draft = draft_with(4);
        draft.move_question(4, 0).unwrap();
        assert_eq!(ids(&draft), vec![4, 1, 2, 3]);

        draft.move_question(1, 3).unwrap();
        assert_eq!(ids(&draft), vec![4, 2, 3, 1]);

        assert_eq!(
            draft.move_question(2, 4),
            Err(DraftError::OutOfRange { index: 4, len: 4 })
        );
        assert_eq!(draft.move_question(8, 0), Err(DraftError::NotFound(8)));
    }

    #[test]
    fn seeded_draft_holds_example_question() {
        let mut draft = QuizDraft::seeded();

        let example = &draft.questions()[0];
        assert_eq!(example.id(), 1);
        assert_eq!(example.points(), 1);
        assert_eq!(example.correct_option(), Some("35"));
        assert_eq!(draft.add_question().id(), 2);
        assert_eq!(draft.total_points(), 11);
    }

    #[test]
    fn preview_lists_questions_in_order() {
        let mut draft = QuizDraft::seeded();
        draft.add_question();
        let preview = draft.to_string();

        let first = preview.find("Question 1: What is the value").unwrap();
        let second = preview.find("Question 2: (no prompt yet)").unwrap();
        assert!(first < second);
        assert!(preview.ends_with("2 question(s), 11 point(s) total"));
        assert_eq!(QuizDraft::new().to_string(), "No questions yet.\n");
    }
}
