//! Assessment collection and the draft editor behind the "Create Assessment" dialog.
//!
//! The store is an ordered list mutated by whole-record replacement. A `Draft` is
//! the uncommitted copy edited by the dialog; question edits only touch the draft
//! until `AssessmentStore::commit` persists it.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{Assessment, AssessmentForm, AssessmentPatch, Question, QuestionType};
use crate::error::{AppError, AppResult};
use crate::util::IdClock;

const BLANK_CHOICES: usize = 4;

#[derive(Debug, Default)]
pub struct AssessmentStore {
    items: Vec<Assessment>,
    ids: IdClock,
}

impl AssessmentStore {
    pub fn new(seed: Vec<Assessment>) -> Self {
        Self { items: seed, ids: IdClock::new() }
    }

    pub fn list(&self) -> &[Assessment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: &str) -> Option<&Assessment> {
        self.items.iter().find(|a| a.id == id)
    }

    /// Append a new record. No field validation: empty titles are accepted.
    #[instrument(level = "debug", skip(self, form), fields(title = %form.title))]
    pub fn create(&mut self, form: AssessmentForm) -> Assessment {
        let a = Assessment { id: self.ids.next_id(), form };
        info!(target: "assessment", id = %a.id, questions = a.form.questions.len(), "Assessment created");
        self.items.push(a.clone());
        a
    }

    /// Shallow-merge `patch` into the record with `id`. Last write wins.
    #[instrument(level = "debug", skip(self, patch))]
    pub fn update(&mut self, id: &str, patch: AssessmentPatch) -> AppResult<Assessment> {
        let slot = self
            .items
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found("assessment", id))?;
        patch.apply_to(&mut slot.form);
        info!(target: "assessment", %id, "Assessment updated");
        Ok(slot.clone())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, id: &str) -> AppResult<Assessment> {
        let pos = self
            .items
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::not_found("assessment", id))?;
        let removed = self.items.remove(pos);
        info!(target: "assessment", %id, remaining = self.items.len(), "Assessment deleted");
        Ok(removed)
    }

    /// Persist a draft verbatim: update its source record, or create a new one.
    pub fn commit(&mut self, draft: Draft) -> AppResult<Assessment> {
        match draft.source_id {
            Some(id) => self.update(&id, draft.form.into()),
            None => Ok(self.create(draft.form)),
        }
    }
}

/// In-progress copy of an assessment being edited in the dialog.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: Uuid,
    /// Id of the record this draft edits; `None` for a new assessment.
    pub source_id: Option<String>,
    pub form: AssessmentForm,
    pub question_type: QuestionType,
    pub editing_question: Option<String>,
}

impl Draft {
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id: None,
            form: AssessmentForm::default(),
            question_type: QuestionType::MultipleChoice,
            editing_question: None,
        }
    }

    pub fn editing(source: &Assessment) -> Self {
        Self {
            source_id: Some(source.id.clone()),
            form: source.form.clone(),
            ..Self::blank()
        }
    }

    pub fn question(&self, id: &str) -> AppResult<&Question> {
        self.form
            .questions
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| AppError::not_found("question", id))
    }

    fn question_mut(&mut self, id: &str) -> AppResult<&mut Question> {
        self.form
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| AppError::not_found("question", id))
    }

    /// Append a fresh question of `kind` to the end of this draft and select it for editing.
    pub fn add_question(&mut self, kind: QuestionType, id: String) -> &Question {
        let options = (kind == QuestionType::MultipleChoice).then(|| vec![String::new(); BLANK_CHOICES]);
        self.question_type = kind;
        self.editing_question = Some(id.clone());
        self.form.questions.push(Question {
            id,
            kind,
            question: String::new(),
            options,
            correct_answer: None,
            points: 1,
            required: true,
        });
        let last = self.form.questions.len() - 1;
        &self.form.questions[last]
    }

    /// Replace the question carrying the same id, in place.
    pub fn edit_question(&mut self, question: Question) -> AppResult<&Question> {
        let pos = self
            .form
            .questions
            .iter()
            .position(|q| q.id == question.id)
            .ok_or_else(|| AppError::not_found("question", question.id.clone()))?;
        self.question_type = question.kind;
        self.editing_question = None;
        self.form.questions[pos] = question;
        Ok(&self.form.questions[pos])
    }

    /// Unknown ids are ignored.
    pub fn delete_question(&mut self, id: &str) {
        self.form.questions.retain(|q| q.id != id);
        if self.editing_question.as_deref() == Some(id) {
            self.editing_question = None;
        }
    }

    pub fn set_option(&mut self, question_id: &str, index: usize, text: String) -> AppResult<&Question> {
        let q = self.question_mut(question_id)?;
        q.set_option(index, text)?;
        Ok(q)
    }

    pub fn add_option(&mut self, question_id: &str) -> AppResult<&Question> {
        let q = self.question_mut(question_id)?;
        q.add_option();
        Ok(q)
    }

    pub fn remove_option(&mut self, question_id: &str, index: usize) -> AppResult<&Question> {
        let q = self.question_mut(question_id)?;
        q.remove_option(index)?;
        Ok(q)
    }
}

impl Question {
    /// Change option `index` only.
    pub fn set_option(&mut self, index: usize, text: String) -> AppResult<()> {
        let slot = self
            .options
            .as_mut()
            .and_then(|opts| opts.get_mut(index))
            .ok_or_else(|| AppError::Validation(format!("option index {index} out of range")))?;
        *slot = text;
        Ok(())
    }

    pub fn add_option(&mut self) {
        self.options.get_or_insert_with(Vec::new).push(String::new());
    }

    pub fn remove_option(&mut self, index: usize) -> AppResult<()> {
        match self.options.as_mut() {
            Some(opts) if index < opts.len() => {
                opts.remove(index);
                Ok(())
            }
            _ => Err(AppError::Validation(format!("option index {index} out of range"))),
        }
    }
}

/// Open drafts keyed by id, plus the clock that names new questions.
#[derive(Debug, Default)]
pub struct DraftBook {
    drafts: HashMap<Uuid, Draft>,
    question_ids: IdClock,
}

impl DraftBook {
    pub fn open(&mut self, source: Option<&Assessment>) -> Draft {
        let draft = match source {
            Some(a) => Draft::editing(a),
            None => Draft::blank(),
        };
        debug!(target: "assessment", draft = %draft.id, source = ?draft.source_id, "Draft opened");
        self.drafts.insert(draft.id, draft.clone());
        draft
    }

    pub fn get(&self, id: Uuid) -> AppResult<&Draft> {
        self.drafts.get(&id).ok_or_else(|| AppError::not_found("draft", id.to_string()))
    }

    pub fn get_mut(&mut self, id: Uuid) -> AppResult<&mut Draft> {
        self.drafts.get_mut(&id).ok_or_else(|| AppError::not_found("draft", id.to_string()))
    }

    pub fn add_question(&mut self, id: Uuid, kind: QuestionType) -> AppResult<Question> {
        let qid = self.question_ids.next_id();
        let draft = self.get_mut(id)?;
        Ok(draft.add_question(kind, qid).clone())
    }

    /// Remove the draft (commit or discard).
    pub fn take(&mut self, id: Uuid) -> AppResult<Draft> {
        self.drafts.remove(&id).ok_or_else(|| AppError::not_found("draft", id.to_string()))
    }

    /// Put back a draft taken for a commit that failed.
    pub fn insert(&mut self, draft: Draft) {
        self.drafts.insert(draft.id, draft);
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }
}
