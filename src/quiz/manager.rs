use std::fmt;

use log::{debug, info, warn};

use crate::quiz::state::{Phase, QuizState};
use crate::quiz::Question;
use crate::render::Renderer;
use crate::storage::KeyValueStore;

pub const PASS_THRESHOLD: f64 = 0.7;

/// Outcome of a graded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub correct: usize,
    pub total: usize,
}

impl Submission {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    pub fn passed(&self) -> bool {
        self.fraction() >= PASS_THRESHOLD
    }

    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {} / {} ({}%)",
            self.correct,
            self.total,
            self.percent()
        )
    }
}

pub struct QuizManager<S, R> {
    questions: Vec<Question>,
    state: QuizState<S>,
    renderer: R,
}

impl<S: KeyValueStore, R: Renderer> QuizManager<S, R> {
    /// Restores whatever attempt the store holds and draws it.
    pub fn new(questions: Vec<Question>, mut state: QuizState<S>, mut renderer: R) -> Self {
        state.load();
        for question_id in state.attempt().keys() {
            if !questions.iter().any(|q| q.id() == question_id) {
                warn!("Restored answer for unknown question '{}'", question_id);
            }
        }
        info!(
            "Quiz ready with {} question(s), {:?}",
            questions.len(),
            state.phase()
        );
        renderer.render_questions(&questions, state.attempt());
        renderer.present();
        Self {
            questions,
            state,
            renderer,
        }
    }

    /// Selection change coming from the surface. Ignored when the surface
    /// refuses it, e.g. after submission.
    pub fn select(&mut self, question_id: &str, choice_id: &str) -> bool {
        if !self.renderer.select(question_id, choice_id) {
            debug!("Selection {}={} refused", question_id, choice_id);
            return false;
        }
        self.state.set_answer(question_id, choice_id);
        true
    }

    pub fn submit(&mut self) -> Submission {
        let correct = self
            .questions
            .iter()
            .filter(|q| q.is_correct(self.state.answer(q.id())))
            .count();
        let submission = Submission {
            correct,
            total: self.questions.len(),
        };
        info!("{}", submission);

        self.renderer
            .show_results(&submission.to_string(), submission.passed());
        self.show_answers();
        self.state.mark_finished();
        self.renderer.present();
        submission
    }

    fn show_answers(&mut self) {
        for question in &self.questions {
            self.renderer.disable_inputs(question.id());
            for control in self.renderer.controls(question.id()) {
                let correct = question.is_correct(Some(control.choice_id.as_str()));
                if correct {
                    self.renderer.highlight_correct(&control);
                }
                if control.checked && !correct {
                    self.renderer.mark_incorrect(&control);
                }
            }
        }
    }

    pub fn reset(&mut self) {
        debug!("Resetting quiz");
        self.state.reset();
        self.renderer.hide_results();
        self.renderer
            .render_questions(&self.questions, self.state.attempt());
        self.renderer.present();
    }

    pub fn redraw(&mut self) {
        self.renderer.present();
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn state(&self) -> &QuizState<S> {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
