pub mod command;
pub mod manager;
pub mod state;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
}
impl Choice {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A gradable question.
///
/// `correct` is expected to name one of `choices`; that is the caller's
/// responsibility and is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    MultipleChoice(MultipleChoice),
    TrueFalse(TrueFalse),
}

impl Question {
    pub fn multiple_choice(
        id: impl Into<String>,
        text: impl Into<String>,
        choices: Vec<Choice>,
        correct: impl Into<String>,
    ) -> Self {
        Question::MultipleChoice(MultipleChoice {
            id: id.into(),
            text: text.into(),
            choices,
            correct: correct.into(),
        })
    }

    pub fn true_false(id: impl Into<String>, text: impl Into<String>, answer: bool) -> Self {
        Question::TrueFalse(TrueFalse::new(id, text, answer))
    }

    pub fn id(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => &q.id,
            Question::TrueFalse(q) => &q.id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => &q.text,
            Question::TrueFalse(q) => &q.text,
        }
    }

    pub fn choices(&self) -> &[Choice] {
        match self {
            Question::MultipleChoice(q) => &q.choices,
            Question::TrueFalse(q) => &q.choices,
        }
    }

    pub fn correct_answer(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => &q.correct,
            Question::TrueFalse(q) => &q.correct,
        }
    }

    /// An unanswered question (`None`) is never correct.
    pub fn is_correct(&self, choice_id: Option<&str>) -> bool {
        choice_id == Some(self.correct_answer())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct MultipleChoice {
    pub id: String,
    pub text: String,
    pub choices: Vec<Choice>,
    pub correct: String,
}

/// Always offers `true` then `false`; the correct id follows the flag it was
/// built from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(from = "TrueFalseConfig")]
pub struct TrueFalse {
    id: String,
    text: String,
    choices: [Choice; 2],
    correct: String,
}

impl TrueFalse {
    pub fn new(id: impl Into<String>, text: impl Into<String>, answer: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: [Choice::new("true", "True"), Choice::new("false", "False")],
            correct: if answer { "true" } else { "false" }.to_string(),
        }
    }
}

#[derive(serde::Deserialize)]
struct TrueFalseConfig {
    id: String,
    text: String,
    answer: bool,
}

impl From<TrueFalseConfig> for TrueFalse {
    fn from(config: TrueFalseConfig) -> Self {
        TrueFalse::new(config.id, config.text, config.answer)
    }
}

fn languages() -> Vec<Choice> {
    vec![
        Choice::new("a", "Java"),
        Choice::new("b", "C++"),
        Choice::new("c", "JavaScript"),
        Choice::new("d", "Python"),
    ]
}

/// The question set used when no question file is configured.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::multiple_choice(
            "1",
            "Which language runs in a web browser?",
            languages(),
            "c",
        ),
        Question::multiple_choice(
            "2",
            "Which language is the best for Problem Solving?",
            languages(),
            "b",
        ),
        Question::true_false("3", "CSS stands for Cascading Style Sheets.", true),
        Question::multiple_choice(
            "4",
            "Which Data Structure is the best for range query with point updates?",
            vec![
                Choice::new("a", "Segment Tree"),
                Choice::new("b", "Sparse Table"),
                Choice::new("c", "Lazy Segment Tree"),
                Choice::new("d", "Merge Tree"),
            ],
            "a",
        ),
        Question::multiple_choice(
            "5",
            "Which Shortest Path algorithm can give us the shortest path from a source node with negative edge weights?",
            vec![
                Choice::new("a", "Bellman-Ford"),
                Choice::new("b", "Floyd-Warshall"),
                Choice::new("c", "Dijkstra"),
                Choice::new("d", "BFS"),
            ],
            "a",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_correct_choice_is_correct() {
        for question in default_questions() {
            for choice in question.choices() {
                assert_eq!(
                    question.is_correct(Some(choice.id.as_str())),
                    choice.id == question.correct_answer(),
                    "question {} choice {}",
                    question.id(),
                    choice.id
                );
            }
            assert!(!question.is_correct(None));
            assert!(!question.is_correct(Some("zzz")));
        }
    }

    #[test]
    fn true_false_follows_its_flag() {
        let yes = Question::true_false("t", "Sky is blue", true);
        let no = Question::true_false("f", "Sky is green", false);

        assert!(yes.is_correct(Some("true")));
        assert!(!yes.is_correct(Some("false")));
        assert!(no.is_correct(Some("false")));
        assert!(!no.is_correct(Some("true")));

        for q in [&yes, &no] {
            let ids: Vec<&str> = q.choices().iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, ["true", "false"]);
        }
    }

    #[test]
    fn questions_deserialize_by_kind() {
        let json = r#"[
            {"kind": "multiple_choice", "id": "1", "text": "Pick b",
             "choices": [{"id": "a", "text": "A"}, {"id": "b", "text": "B"}],
             "correct": "b"},
            {"kind": "true_false", "id": "2", "text": "False?", "answer": false}
        ]"#;
        let questions: Vec<Question> = serde_json::from_str(json).unwrap();

        assert_eq!(
            questions[0],
            Question::multiple_choice(
                "1",
                "Pick b",
                vec![Choice::new("a", "A"), Choice::new("b", "B")],
                "b"
            )
        );
        assert_eq!(questions[1], Question::true_false("2", "False?", false));
    }

    #[test]
    fn default_set_keeps_answer_key_inside_choices() {
        let questions = default_questions();
        assert_eq!(questions.len(), 5);
        for q in &questions {
            assert!(q.choices().iter().any(|c| c.id == q.correct_answer()));
        }
    }
}
