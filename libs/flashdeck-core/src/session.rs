//! Practice session progression.
//!
//! A session draws questions one at a time from a shuffled working set. In
//! multiple-choice mode missed cards are collected and asked again in retry
//! passes until every card has been answered correctly. Reveal mode cycles
//! through the working set until the caller stops it.

use crate::error::SessionError;
use crate::selector::select_questions;
use crate::store::PracticeStore;
use crate::types::{Flashcard, FlashcardAnswer, PracticeMode, QuestionCount};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt::Display;

/// Upper bound on skipped entries while drawing one question.
pub const MAX_DRAW_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Active,
    /// Active, restricted to previously missed cards.
    RetryPass,
    Finished,
}

/// The card currently shown, with its answer options in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub flashcard: Flashcard,
    /// Empty in reveal mode.
    pub answers: Vec<FlashcardAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RevealStep {
    Revealed(String),
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    /// Size of the initial working set.
    pub questions: usize,
    pub perfect: bool,
}

/// Emitted after every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SessionEvent {
    Started {
        category_id: i64,
        mode: PracticeMode,
        questions: usize,
    },
    QuestionPresented {
        flashcard_id: i64,
        retry_pass: bool,
    },
    AnswerEvaluated {
        flashcard_id: i64,
        correct: bool,
        correct_answer_text: String,
    },
    RetryPassStarted {
        questions: usize,
    },
    AnswerRevealed {
        flashcard_id: i64,
        text: String,
    },
    Finished(SessionSummary),
    Stopped,
    Failed {
        message: String,
    },
}

type Listener = Box<dyn FnMut(&SessionEvent)>;

#[derive(Debug, Clone, Copy)]
struct SessionConfig {
    category_id: i64,
    mode: PracticeMode,
    count: QuestionCount,
}

/// Question-by-question practice driver over an injected store.
pub struct PracticeSession<S, R = StdRng> {
    store: S,
    rng: R,
    listeners: Vec<Listener>,
    config: Option<SessionConfig>,
    state: SessionState,
    working_set: Vec<Flashcard>,
    queue: VecDeque<Flashcard>,
    used: HashSet<i64>,
    incorrect: Vec<Flashcard>,
    current: Option<Question>,
    correct_answers: u32,
    incorrect_answers: u32,
    questions: usize,
    in_flight: bool,
    revealed: Option<String>,
}

impl<S: PracticeStore> PracticeSession<S, StdRng> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_os_rng())
    }
}

impl<S: PracticeStore, R: Rng> PracticeSession<S, R> {
    pub fn with_rng(store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            listeners: Vec::new(),
            config: None,
            state: SessionState::Idle,
            working_set: Vec::new(),
            queue: VecDeque::new(),
            used: HashSet::new(),
            incorrect: Vec::new(),
            current: None,
            correct_answers: 0,
            incorrect_answers: 0,
            questions: 0,
            in_flight: false,
            revealed: None,
        }
    }

    /// Register a callback invoked with every [`SessionEvent`].
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active | SessionState::RetryPass)
    }

    pub fn is_retry_pass(&self) -> bool {
        self.state == SessionState::RetryPass
    }

    pub fn mode(&self) -> Option<PracticeMode> {
        self.config.map(|c| c.mode)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn incorrect_answers(&self) -> u32 {
        self.incorrect_answers
    }

    /// Cards missed in the current pass, pending retry.
    pub fn incorrect_list(&self) -> &[Flashcard] {
        &self.incorrect
    }

    pub fn working_set(&self) -> &[Flashcard] {
        &self.working_set
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    pub fn is_answer_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn revealed_answer(&self) -> Option<&str> {
        self.revealed.as_deref()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct_answers: self.correct_answers,
            incorrect_answers: self.incorrect_answers,
            questions: self.questions,
            perfect: self.incorrect_answers == 0,
        }
    }

    /// Select questions for `category_id` and present the first one.
    pub fn start(
        &mut self,
        category_id: i64,
        mode: PracticeMode,
        count: QuestionCount,
    ) -> Result<(), SessionError> {
        if self.is_active() {
            return Err(SessionError::AlreadyActive);
        }
        self.launch(SessionConfig {
            category_id,
            mode,
            count,
        })
    }

    /// Run a fresh selection with the previous category, mode and count.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        let config = match (self.state, self.config) {
            (SessionState::Idle, _) | (_, None) => return Err(SessionError::NotStarted),
            (_, Some(config)) => config,
        };
        self.launch(config)
    }

    /// Discard the session. Persisted stats already written are kept.
    pub fn stop(&mut self) {
        if self.state == SessionState::Idle {
            return;
        }
        self.state = SessionState::Idle;
        self.config = None;
        self.working_set.clear();
        self.queue.clear();
        self.used.clear();
        self.incorrect.clear();
        self.current = None;
        self.in_flight = false;
        self.revealed = None;
        tracing::debug!("practice session stopped");
        self.emit(SessionEvent::Stopped);
    }

    /// Evaluate the selected answer for the current question (multiple-choice only).
    ///
    /// The session stays in the feedback phase until [`advance`](Self::advance) is
    /// called; further submissions are rejected meanwhile.
    pub fn submit_answer(&mut self, answer: &FlashcardAnswer) -> Result<AnswerFeedback, SessionError> {
        self.require_mode(PracticeMode::MultipleChoice)?;
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }
        if self.in_flight {
            return Err(SessionError::AnswerInFlight);
        }

        let question = self.current.as_ref().ok_or(SessionError::NotActive)?;
        if answer.flashcard_id != question.flashcard.id {
            return Err(SessionError::ForeignAnswer {
                answer_id: answer.id,
                flashcard_id: question.flashcard.id,
            });
        }
        let card = question.flashcard.clone();
        let correct_answer_text = question
            .answers
            .iter()
            .filter(|a| a.is_correct)
            .min_by_key(|a| a.id)
            .map(|a| a.text.clone())
            .unwrap_or_default();

        self.in_flight = true;
        if answer.is_correct {
            if !self.is_retry_pass() {
                self.correct_answers += 1;
            }
            self.incorrect.retain(|c| c.id != card.id);
        } else {
            self.incorrect_answers += 1;
            if !self.incorrect.iter().any(|c| c.id == card.id) {
                self.incorrect.push(card.clone());
            }
        }

        self.emit(SessionEvent::AnswerEvaluated {
            flashcard_id: card.id,
            correct: answer.is_correct,
            correct_answer_text: correct_answer_text.clone(),
        });

        // Counters above stay applied even if the write fails.
        if let Err(e) = self.store.update_flashcard_stats(card.id, answer.is_correct) {
            tracing::error!(flashcard_id = card.id, error = %e, "failed to persist answer");
            return Err(self.fail(store_error(e)));
        }

        Ok(AnswerFeedback {
            correct: answer.is_correct,
            correct_answer_text,
        })
    }

    /// Leave the feedback phase and present the next question, entering a retry
    /// pass or finishing when the working set is exhausted.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        self.require_mode(PracticeMode::MultipleChoice)?;
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }
        if !self.in_flight && self.current.is_some() {
            return Err(SessionError::NothingToAdvance);
        }

        match self.next_unused()? {
            Some(card) => self.present(card)?,
            None if !self.incorrect.is_empty() => self.begin_retry_pass()?,
            None => self.finish(),
        }

        self.in_flight = false;
        Ok(self.state)
    }

    /// Reveal the current answer, or move on to another card if already revealed.
    pub fn toggle_reveal(&mut self) -> Result<RevealStep, SessionError> {
        self.require_mode(PracticeMode::Flashcard)?;
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }
        let current_id = self
            .current
            .as_ref()
            .map(|q| q.flashcard.id)
            .ok_or(SessionError::NotActive)?;

        if self.revealed.is_some() {
            let card = match self.next_unused()? {
                Some(card) => card,
                None => {
                    self.used.clear();
                    self.refill_queue(Some(current_id));
                    self.next_unused()?.ok_or(SessionError::NoQuestions)?
                }
            };
            self.present(card)?;
            self.revealed = None;
            return Ok(RevealStep::Next);
        }

        let text = self.store.get_correct_answer_text(current_id).map_err(|e| {
            tracing::error!(flashcard_id = current_id, error = %e, "failed to load answer");
            store_error(e)
        })?;
        self.revealed = Some(text.clone());
        self.emit(SessionEvent::AnswerRevealed {
            flashcard_id: current_id,
            text: text.clone(),
        });
        Ok(RevealStep::Revealed(text))
    }

    fn launch(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        let pool = self
            .store
            .get_flashcards_by_category(config.category_id)
            .map_err(|e| {
                tracing::error!(category_id = config.category_id, error = %e, "failed to load flashcards");
                store_error(e)
            })?;
        if pool.is_empty() {
            return Err(SessionError::NoFlashcards(config.category_id));
        }

        let selected = select_questions(pool, config.count, config.mode, &mut self.rng);
        if selected.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        self.config = Some(config);
        self.questions = selected.len();
        self.working_set = selected;
        self.used.clear();
        self.incorrect.clear();
        self.correct_answers = 0;
        self.incorrect_answers = 0;
        self.in_flight = false;
        self.revealed = None;
        self.current = None;
        self.state = SessionState::Active;
        self.refill_queue(None);

        tracing::info!(
            category_id = config.category_id,
            mode = %config.mode,
            questions = self.questions,
            "practice session started"
        );
        self.emit(SessionEvent::Started {
            category_id: config.category_id,
            mode: config.mode,
            questions: self.questions,
        });

        match self.next_unused()? {
            Some(card) => self.present(card),
            None => Err(SessionError::NoQuestions),
        }
    }

    fn begin_retry_pass(&mut self) -> Result<(), SessionError> {
        self.working_set = std::mem::take(&mut self.incorrect);
        self.used.clear();
        self.refill_queue(None);
        self.state = SessionState::RetryPass;

        tracing::debug!(questions = self.working_set.len(), "retry pass started");
        self.emit(SessionEvent::RetryPassStarted {
            questions: self.working_set.len(),
        });

        match self.next_unused()? {
            Some(card) => self.present(card),
            None => {
                self.finish();
                Ok(())
            }
        }
    }

    fn finish(&mut self) {
        self.state = SessionState::Finished;
        self.current = None;
        self.queue.clear();
        let summary = self.summary();
        tracing::info!(
            correct = summary.correct_answers,
            incorrect = summary.incorrect_answers,
            "practice session finished"
        );
        self.emit(SessionEvent::Finished(summary));
    }

    /// Pop the next card of this pass that has not been used yet.
    fn next_unused(&mut self) -> Result<Option<Flashcard>, SessionError> {
        let mut skipped = 0;
        while let Some(card) = self.queue.pop_front() {
            if !self.used.contains(&card.id) {
                return Ok(Some(card));
            }
            skipped += 1;
            if skipped > MAX_DRAW_ATTEMPTS {
                return Err(self.fail(SessionError::SamplingExhausted { attempts: skipped }));
            }
        }
        Ok(None)
    }

    fn present(&mut self, card: Flashcard) -> Result<(), SessionError> {
        let mut answers = Vec::new();
        if self.mode() == Some(PracticeMode::MultipleChoice) {
            answers = match self.store.get_answers_for_flashcard(card.id) {
                Ok(answers) => answers,
                Err(e) => {
                    tracing::error!(flashcard_id = card.id, error = %e, "failed to load answers");
                    self.queue.push_front(card);
                    return Err(self.fail(store_error(e)));
                }
            };
            answers.shuffle(&mut self.rng);
        }

        self.used.insert(card.id);
        let event = SessionEvent::QuestionPresented {
            flashcard_id: card.id,
            retry_pass: self.is_retry_pass(),
        };
        self.current = Some(Question {
            flashcard: card,
            answers,
        });
        self.emit(event);
        Ok(())
    }

    /// Queue the working set in a fresh random order, keeping `avoid_first` off the front
    /// when another card is available.
    fn refill_queue(&mut self, avoid_first: Option<i64>) {
        let mut order = self.working_set.clone();
        order.shuffle(&mut self.rng);
        if let Some(id) = avoid_first {
            if order.first().is_some_and(|c| c.id == id) {
                if let Some(pos) = order.iter().position(|c| c.id != id) {
                    order.swap(0, pos);
                }
            }
        }
        self.queue = order.into();
    }

    fn require_mode(&self, mode: PracticeMode) -> Result<(), SessionError> {
        match self.mode() {
            None => Err(SessionError::NotStarted),
            Some(m) if m == mode => Ok(()),
            Some(m) => Err(SessionError::WrongMode(m.as_str())),
        }
    }

    fn fail(&mut self, error: SessionError) -> SessionError {
        tracing::warn!(error = %error, "practice step failed");
        self.emit(SessionEvent::Failed {
            message: error.to_string(),
        });
        error
    }

    fn emit(&mut self, event: SessionEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

fn store_error(e: impl Display) -> SessionError {
    SessionError::Store(e.to_string())
}
