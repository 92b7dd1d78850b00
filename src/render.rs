use std::io::{self, Write};

use log::warn;

use crate::quiz::{state::Attempt, Question};

pub const PASSED_TEXT: &str = "Result: Passed 🎉";
pub const FAILED_TEXT: &str = "Result: Failed — try again";

/// Handle for one selectable answer control, as read back from the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub question_id: String,
    pub choice_id: String,
    pub checked: bool,
}

/// What the quiz needs from a UI toolkit.
///
/// None of these may touch the attempt; they only change what is shown.
pub trait Renderer {
    /// Replaces everything shown with fresh, enabled controls, pre-selecting
    /// the answers recorded in `attempt`.
    fn render_questions(&mut self, questions: &[Question], attempt: &Attempt);
    fn show_results(&mut self, summary: &str, passed: bool);
    fn hide_results(&mut self);
    fn disable_inputs(&mut self, question_id: &str);
    fn highlight_correct(&mut self, control: &Control);
    fn mark_incorrect(&mut self, control: &Control);

    fn controls(&self, question_id: &str) -> Vec<Control>;

    /// The toolkit's own handling of a click: checks the control and
    /// unchecks its siblings. Returns false when the control is unknown or
    /// inert.
    fn select(&mut self, question_id: &str, choice_id: &str) -> bool;

    /// Pushes pending changes to the user. Surfaces that draw immediately
    /// can ignore it.
    fn present(&mut self) {}
}

#[derive(Debug, Clone)]
struct ControlLine {
    choice_id: String,
    text: String,
    checked: bool,
    disabled: bool,
    correct: bool,
    incorrect: bool,
}

#[derive(Debug, Clone)]
struct Card {
    question_id: String,
    text: String,
    controls: Vec<ControlLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Results {
    pub summary: String,
    pub passed: bool,
}

/// Line-based surface: keeps a model of cards and prints it on `present`.
pub struct TerminalRenderer<W> {
    out: W,
    cards: Vec<Card>,
    results: Option<Results>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cards: Vec::new(),
            results: None,
        }
    }

    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn is_disabled(&self, question_id: &str, choice_id: &str) -> bool {
        self.line(question_id, choice_id)
            .is_some_and(|line| line.disabled)
    }

    pub fn is_highlighted(&self, question_id: &str, choice_id: &str) -> bool {
        self.line(question_id, choice_id)
            .is_some_and(|line| line.correct)
    }

    pub fn is_marked_incorrect(&self, question_id: &str, choice_id: &str) -> bool {
        self.line(question_id, choice_id)
            .is_some_and(|line| line.incorrect)
    }

    fn card_mut(&mut self, question_id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.question_id == question_id)
    }

    fn line(&self, question_id: &str, choice_id: &str) -> Option<&ControlLine> {
        self.cards
            .iter()
            .find(|c| c.question_id == question_id)?
            .controls
            .iter()
            .find(|l| l.choice_id == choice_id)
    }

    fn line_mut(&mut self, control: &Control) -> Option<&mut ControlLine> {
        self.card_mut(&control.question_id)?
            .controls
            .iter_mut()
            .find(|l| l.choice_id == control.choice_id)
    }

    fn write_view(&mut self) -> io::Result<()> {
        for card in &self.cards {
            writeln!(self.out, "Q{}: {}", card.question_id, card.text)?;
            for line in &card.controls {
                let mut row = format!(
                    "  ({}) {}. {}",
                    if line.checked { "x" } else { " " },
                    line.choice_id,
                    line.text
                );
                if line.correct {
                    row.push_str("  *");
                }
                if line.incorrect {
                    row.push_str("  ~");
                }
                if line.disabled {
                    row.push_str("  [disabled]");
                }
                writeln!(self.out, "{}", row)?;
            }
            writeln!(self.out)?;
        }
        if let Some(results) = &self.results {
            writeln!(self.out, "{}", results.summary)?;
            let verdict = if results.passed { PASSED_TEXT } else { FAILED_TEXT };
            writeln!(self.out, "{}", verdict)?;
            writeln!(self.out, "Type `retry` to start over.")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_questions(&mut self, questions: &[Question], attempt: &Attempt) {
        self.cards = questions
            .iter()
            .map(|q| {
                let selected = attempt.get(q.id());
                Card {
                    question_id: q.id().to_string(),
                    text: q.text().to_string(),
                    controls: q
                        .choices()
                        .iter()
                        .map(|choice| ControlLine {
                            choice_id: choice.id.clone(),
                            text: choice.text.clone(),
                            checked: selected == Some(&choice.id),
                            disabled: false,
                            correct: false,
                            incorrect: false,
                        })
                        .collect(),
                }
            })
            .collect();
    }

    fn show_results(&mut self, summary: &str, passed: bool) {
        self.results = Some(Results {
            summary: summary.to_string(),
            passed,
        });
    }

    fn hide_results(&mut self) {
        self.results = None;
    }

    fn disable_inputs(&mut self, question_id: &str) {
        if let Some(card) = self.card_mut(question_id) {
            for line in &mut card.controls {
                line.disabled = true;
            }
        }
    }

    fn highlight_correct(&mut self, control: &Control) {
        if let Some(line) = self.line_mut(control) {
            line.correct = true;
        }
    }

    fn mark_incorrect(&mut self, control: &Control) {
        if let Some(line) = self.line_mut(control) {
            line.incorrect = true;
        }
    }

    fn controls(&self, question_id: &str) -> Vec<Control> {
        self.cards
            .iter()
            .filter(|c| c.question_id == question_id)
            .flat_map(|card| {
                card.controls.iter().map(move |line| Control {
                    question_id: card.question_id.clone(),
                    choice_id: line.choice_id.clone(),
                    checked: line.checked,
                })
            })
            .collect()
    }

    fn select(&mut self, question_id: &str, choice_id: &str) -> bool {
        let Some(card) = self.card_mut(question_id) else {
            return false;
        };
        match card.controls.iter().find(|l| l.choice_id == choice_id) {
            Some(line) if !line.disabled => {}
            _ => return false,
        }
        for line in &mut card.controls {
            line.checked = line.choice_id == choice_id;
        }
        true
    }

    fn present(&mut self) {
        if let Err(e) = self.write_view() {
            warn!("Could not draw the quiz: {}", e);
        }
    }
}
