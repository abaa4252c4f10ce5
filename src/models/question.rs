use serde::{Deserialize, Serialize};

/// One selectable answer: a stable `value` used for grading and a
/// human-readable `label` shown by the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The default binary choice set: is the object still alive, or dead?
    pub fn binary() -> Vec<Choice> {
        vec![Choice::new("alive", "Vivant"), Choice::new("dead", "Mort")]
    }
}

/// A single quiz item. Questions omitting `choices` in JSON get the
/// binary alive/dead pair.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionRecord {
    pub text: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default = "Choice::binary")]
    pub choices: Vec<Choice>,
    #[serde(rename = "correct")]
    pub correct_value: String,
    pub explain_good: String,
    pub explain_bad: String,
}

impl QuestionRecord {
    /// Whether `value` matches this question's correct answer.
    pub fn is_correct(&self, value: &str) -> bool {
        self.correct_value == value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_choices_default_to_binary() {
        let json = r#"{
            "text": "Toujours vivant ?",
            "correct": "alive",
            "explain_good": "Oui.",
            "explain_bad": "Non."
        }"#;
        let q: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(q.choices.len(), 2);
        assert_eq!(q.choices[0].value, "alive");
        assert_eq!(q.choices[1].value, "dead");
        assert!(q.code.is_none());
    }

    #[test]
    fn explicit_choice_set_is_kept() {
        let json = r#"{
            "text": "Durée de vie ?",
            "choices": [
                {"value": "static", "label": "Statique"},
                {"value": "auto", "label": "Automatique"},
                {"value": "dynamic", "label": "Dynamique"}
            ],
            "correct": "auto",
            "explain_good": "Oui.",
            "explain_bad": "Non."
        }"#;
        let q: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(q.choices.len(), 3);
        assert!(q.is_correct("auto"));
        assert!(!q.is_correct("static"));
    }
}
