//! Application state: in-memory stores behind async locks, plus loaded config.
//!
//! This module owns:
//!   - the assessment collection and the open drafts
//!   - the chat transcript and its delayed assistant reply
//!   - the submission review list
//!   - the quiz generator form
//!
//! Each store has its own lock; no method holds two locks at once.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::assessments::{AssessmentStore, Draft, DraftBook};
use crate::chat::Transcript;
use crate::config::{load_config_from_env, AppConfig};
use crate::domain::{
    Assessment, AssessmentForm, AssessmentPatch, Message, Question, QuestionType, QuizRequest, Sender,
    Submission,
};
use crate::error::AppResult;
use crate::grading::{SubmissionBook, SubmissionStats};
use crate::quiz::{QuizAccepted, QuizPatch};
use crate::seeds::{seed_assessments, seed_submissions};

pub struct AppState {
    pub config: AppConfig,
    pub assessments: RwLock<AssessmentStore>,
    pub drafts: RwLock<DraftBook>,
    pub transcript: Arc<RwLock<Transcript>>,
    pub submissions: RwLock<SubmissionBook>,
    pub quiz: RwLock<QuizRequest>,
}

impl AppState {
    /// Build state from env config and seed data.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::with_config(load_config_from_env())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let assessments = seed_assessments();
        let submissions = seed_submissions();
        info!(
            target: "edu_assistant",
            assessments = assessments.len(),
            submissions = submissions.len(),
            reply_delay_ms = config.chat.reply_delay_ms,
            "Startup inventory"
        );
        Self {
            transcript: Arc::new(RwLock::new(Transcript::new(&config.chat.greeting))),
            assessments: RwLock::new(AssessmentStore::new(assessments)),
            drafts: RwLock::new(DraftBook::default()),
            submissions: RwLock::new(SubmissionBook::new(submissions)),
            quiz: RwLock::new(QuizRequest::default()),
            config,
        }
    }

    //
    // Assessments
    //

    pub async fn list_assessments(&self) -> Vec<Assessment> {
        self.assessments.read().await.list().to_vec()
    }

    pub async fn get_assessment(&self, id: &str) -> AppResult<Assessment> {
        self.assessments
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| crate::error::AppError::not_found("assessment", id))
    }

    pub async fn create_assessment(&self, form: AssessmentForm) -> Assessment {
        self.assessments.write().await.create(form)
    }

    pub async fn update_assessment(&self, id: &str, patch: AssessmentPatch) -> AppResult<Assessment> {
        self.assessments.write().await.update(id, patch)
    }

    pub async fn delete_assessment(&self, id: &str) -> AppResult<Assessment> {
        self.assessments.write().await.delete(id)
    }

    /// Questions in delivery order: shuffled when the assessment asks for it.
    #[instrument(level = "debug", skip(self))]
    pub async fn question_order(&self, id: &str) -> AppResult<Vec<Question>> {
        let a = self.get_assessment(id).await?;
        let mut questions = a.form.questions;
        if a.form.settings.randomize_questions {
            questions.shuffle(&mut rand::thread_rng());
        }
        Ok(questions)
    }

    //
    // Drafts
    //

    #[instrument(level = "debug", skip(self))]
    pub async fn open_draft(&self, source_id: Option<&str>) -> AppResult<Draft> {
        let source = match source_id {
            Some(id) => Some(self.get_assessment(id).await?),
            None => None,
        };
        Ok(self.drafts.write().await.open(source.as_ref()))
    }

    pub async fn get_draft(&self, id: Uuid) -> AppResult<Draft> {
        self.drafts.read().await.get(id).cloned()
    }

    pub async fn patch_draft(&self, id: Uuid, patch: AssessmentPatch) -> AppResult<Draft> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(id)?;
        patch.apply_to(&mut draft.form);
        Ok(draft.clone())
    }

    pub async fn discard_draft(&self, id: Uuid) -> AppResult<Draft> {
        self.drafts.write().await.take(id)
    }

    pub async fn add_question(&self, id: Uuid, kind: QuestionType) -> AppResult<Question> {
        self.drafts.write().await.add_question(id, kind)
    }

    pub async fn edit_question(&self, id: Uuid, question: Question) -> AppResult<Question> {
        let mut drafts = self.drafts.write().await;
        drafts.get_mut(id)?.edit_question(question).cloned()
    }

    pub async fn delete_question(&self, id: Uuid, question_id: &str) -> AppResult<Draft> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(id)?;
        draft.delete_question(question_id);
        Ok(draft.clone())
    }

    pub async fn set_option(&self, id: Uuid, question_id: &str, index: usize, text: String) -> AppResult<Question> {
        let mut drafts = self.drafts.write().await;
        drafts.get_mut(id)?.set_option(question_id, index, text).cloned()
    }

    pub async fn add_option(&self, id: Uuid, question_id: &str) -> AppResult<Question> {
        let mut drafts = self.drafts.write().await;
        drafts.get_mut(id)?.add_option(question_id).cloned()
    }

    pub async fn remove_option(&self, id: Uuid, question_id: &str, index: usize) -> AppResult<Question> {
        let mut drafts = self.drafts.write().await;
        drafts.get_mut(id)?.remove_option(question_id, index).cloned()
    }

    /// Persist the draft into the collection. The draft leaves the book before the
    /// commit, so a second commit of the same id is a 404; a failed commit puts it back.
    #[instrument(level = "info", skip(self))]
    pub async fn commit_draft(&self, id: Uuid) -> AppResult<Assessment> {
        let draft = self.drafts.write().await.take(id)?;
        let result = self.assessments.write().await.commit(draft.clone());
        match result {
            Ok(saved) => {
                info!(target: "assessment", draft = %id, assessment = %saved.id, "Draft committed");
                Ok(saved)
            }
            Err(e) => {
                self.drafts.write().await.insert(draft);
                Err(e)
            }
        }
    }

    //
    // Chat
    //

    pub async fn chat_history(&self) -> Vec<Message> {
        self.transcript.read().await.messages().to_vec()
    }

    /// Append a user message now and the canned assistant reply after the configured delay.
    /// Blank text returns `None` and schedules nothing.
    #[instrument(level = "info", skip(self, text), fields(text_len = text.len()))]
    pub async fn send_chat(&self, text: &str) -> Option<Message> {
        let sent = self.transcript.write().await.send(text)?;

        let transcript = Arc::clone(&self.transcript);
        let delay = self.config.chat.reply_delay();
        let reply = self.config.chat.reply_text.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            transcript.write().await.append(reply, Sender::Ai);
        });
        Some(sent)
    }

    //
    // Submissions
    //

    pub async fn list_submissions(&self) -> Vec<Submission> {
        self.submissions.read().await.list().to_vec()
    }

    pub async fn submission_stats(&self) -> SubmissionStats {
        self.submissions.read().await.stats()
    }

    pub async fn set_grade(&self, id: u32, grade: u8) -> AppResult<Submission> {
        self.submissions.write().await.set_grade(id, grade)
    }

    pub async fn set_feedback(&self, id: u32, feedback: String) -> AppResult<Submission> {
        self.submissions.write().await.set_feedback(id, feedback)
    }

    //
    // Quiz generator
    //

    pub async fn quiz_form(&self) -> QuizRequest {
        self.quiz.read().await.clone()
    }

    pub async fn patch_quiz(&self, patch: QuizPatch) -> QuizRequest {
        let mut q = self.quiz.write().await;
        q.apply(patch);
        q.clone()
    }

    pub async fn add_quiz_tag(&self, tag: &str) -> QuizRequest {
        let mut q = self.quiz.write().await;
        q.add_tag(tag);
        q.clone()
    }

    pub async fn remove_quiz_tag(&self, tag: &str) -> QuizRequest {
        let mut q = self.quiz.write().await;
        q.remove_tag(tag);
        q.clone()
    }

    pub async fn generate_quiz(&self) -> AppResult<QuizAccepted> {
        self.quiz.read().await.generate(self.config.quiz.max_questions)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::AssessmentSettings;

    fn state() -> AppState {
        AppState::with_config(AppConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_appends_user_then_reply_after_delay() {
        let st = state();
        let before = st.chat_history().await.len();

        let sent = st.send_chat("What is a limit?").await.unwrap();
        let now = st.chat_history().await;
        assert_eq!(now.len(), before + 1);
        assert_eq!(now.last().unwrap(), &sent);
        assert_eq!(sent.sender, Sender::User);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(st.chat_history().await.len(), before + 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let after = st.chat_history().await;
        assert_eq!(after.len(), before + 2);
        assert_eq!(after[before].sender, Sender::User);
        assert_eq!(after[before + 1].sender, Sender::Ai);
        assert_eq!(after[before + 1].text, st.config.chat.reply_text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_chat_schedules_nothing() {
        let st = state();
        let before = st.chat_history().await.len();
        assert!(st.send_chat("   ").await.is_none());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(st.chat_history().await.len(), before);
    }

    #[tokio::test]
    async fn test_commit_draft_persists_questions_verbatim() {
        let st = state();
        let draft = st.open_draft(None).await.unwrap();
        st.patch_draft(draft.id, AssessmentPatch { title: Some("Unit test".into()), ..Default::default() })
            .await
            .unwrap();
        let q = st.add_question(draft.id, QuestionType::MultipleChoice).await.unwrap();
        st.set_option(draft.id, &q.id, 0, "A".into()).await.unwrap();
        let expected = st.get_draft(draft.id).await.unwrap().form.questions;

        let before = st.list_assessments().await.len();
        let saved = st.commit_draft(draft.id).await.unwrap();
        assert_eq!(st.list_assessments().await.len(), before + 1);
        assert_eq!(saved.form.title, "Unit test");
        assert_eq!(saved.form.questions, expected);
        assert!(st.get_draft(draft.id).await.is_err());
    }

    #[tokio::test]
    async fn test_commit_editing_draft_updates_in_place() {
        let st = state();
        let draft = st.open_draft(Some("2")).await.unwrap();
        st.add_question(draft.id, QuestionType::Essay).await.unwrap();
        let saved = st.commit_draft(draft.id).await.unwrap();
        assert_eq!(saved.id, "2");
        let all = st.list_assessments().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].form.questions.len(), 1);
        assert!(all[0].form.questions.is_empty());
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_draft() {
        let st = state();
        let draft = st.open_draft(Some("1")).await.unwrap();
        st.delete_assessment("1").await.unwrap();
        assert!(st.commit_draft(draft.id).await.is_err());
        assert!(st.get_draft(draft.id).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_commits_create_one_record() {
        let st = Arc::new(state());
        let draft = st.open_draft(None).await.unwrap();
        let before = st.list_assessments().await.len();

        let guard = st.assessments.write().await;
        let a = tokio::spawn({
            let st = Arc::clone(&st);
            async move { st.commit_draft(draft.id).await }
        });
        let b = tokio::spawn({
            let st = Arc::clone(&st);
            async move { st.commit_draft(draft.id).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(guard);

        let results = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(crate::error::AppError::NotFound { .. }))));
        assert_eq!(st.list_assessments().await.len(), before + 1);
        assert!(st.get_draft(draft.id).await.is_err());
    }

    #[tokio::test]
    async fn test_question_order_without_randomize_is_stable() {
        let st = state();
        let draft = st.open_draft(Some("1")).await.unwrap();
        for _ in 0..5 {
            st.add_question(draft.id, QuestionType::ShortAnswer).await.unwrap();
        }
        let saved = st.commit_draft(draft.id).await.unwrap();
        let order = st.question_order("1").await.unwrap();
        assert_eq!(order, saved.form.questions);

        let patch = AssessmentPatch {
            settings: Some(AssessmentSettings { randomize_questions: true, ..Default::default() }),
            ..Default::default()
        };
        st.update_assessment("1", patch).await.unwrap();
        let mut shuffled: Vec<_> = st.question_order("1").await.unwrap().into_iter().map(|q| q.id).collect();
        let mut ids: Vec<_> = saved.form.questions.into_iter().map(|q| q.id).collect();
        shuffled.sort();
        ids.sort();
        assert_eq!(shuffled, ids);
    }

    #[tokio::test]
    async fn test_quiz_form_flow() {
        let st = state();
        st.add_quiz_tag("geometry").await;
        st.add_quiz_tag("geometry").await;
        assert!(st.generate_quiz().await.is_err());
        st.patch_quiz(QuizPatch { topic: Some("Triangles".into()), ..Default::default() }).await;
        let ok = st.generate_quiz().await.unwrap();
        assert_eq!(ok.request.tags, vec!["geometry"]);
    }
}
