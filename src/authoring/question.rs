use std::fmt;

pub type QuestionId = u32;

pub const DEFAULT_POINTS: u32 = 10;

const PLACEHOLDER_OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuestionKind {
    #[default]
    MultipleChoice,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "Multiple Choice"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    id: QuestionId,
    points: u32,
    kind: QuestionKind,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
}

/// Partial set of field overrides merged by `QuizDraft::update_question`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub points: Option<u32>,
    pub kind: Option<QuestionKind>,
    pub prompt: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_index: Option<usize>,
}

impl QuestionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    pub fn kind(mut self, kind: QuestionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn correct_index(mut self, index: usize) -> Self {
        self.correct_index = Some(index);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prompt = if self.prompt.is_empty() {
            "(no prompt yet)"
        } else {
            &self.prompt
        };
        writeln!(f, "{} [#{}, {} pts, {}]", prompt, self.id, self.points, self.kind)?;
        for (i, option) in self.options.iter().enumerate() {
            let mark = if i == self.correct_index { 'V' } else { ' ' };
            writeln!(f, "  ({}) {}) {}", mark, i + 1, option)?;
        }
        Ok(())
    }
}

impl QuestionRecord {
    /// A fresh multiple-choice question with placeholder options.
    pub(crate) fn new(id: QuestionId) -> Self {
        Self {
            id,
            points: DEFAULT_POINTS,
            kind: QuestionKind::MultipleChoice,
            prompt: String::new(),
            options: PLACEHOLDER_OPTIONS.iter().map(|o| o.to_string()).collect(),
            correct_index: 0,
        }
    }

    pub(crate) fn with_fields(
        id: QuestionId,
        points: u32,
        prompt: String,
        options: Vec<String>,
        correct_index: usize,
    ) -> Self {
        Self {
            id,
            points,
            kind: QuestionKind::MultipleChoice,
            prompt,
            options,
            correct_index,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    pub(crate) fn set_correct_index(&mut self, index: usize) {
        self.correct_index = index;
    }

    pub(crate) fn set_option(&mut self, index: usize, text: String) {
        self.options[index] = text;
    }

    /// Applies an already validated patch.
    pub(crate) fn apply(&mut self, patch: QuestionPatch) {
        if let Some(points) = patch.points {
            self.points = points;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(prompt) = patch.prompt {
            self.prompt = prompt;
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(correct_index) = patch.correct_index {
            self.correct_index = correct_index;
        }
    }
}
