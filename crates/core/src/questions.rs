//! Question sets handed to the state machine through `Action::Load`.
//!
//! The core never fetches questions itself. A `QuestionSource` produces a
//! set, `validate_questions` checks it, and the caller dispatches the load.
//! `PlaceholderSource` is the offline generator used when no real source is
//! configured: predictable cards with answer A, banded by difficulty.

use std::collections::HashSet;
use std::error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prize::difficulty_for_level;
use crate::types::{CHOICE_COUNT, Difficulty, Question};

pub const CATEGORIES: [&str; 13] = [
    "General Knowledge",
    "Science",
    "Geography",
    "Movies",
    "Sports",
    "History",
    "Music",
    "Technology",
    "Physics",
    "Literature",
    "Mathematics",
    "Chemistry",
    "World History",
];

/// Used when none of the requested categories is known.
pub const FALLBACK_CATEGORY: &str = "General Knowledge";

pub const DEFAULT_QUESTION_COUNT: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionsRequest {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

impl Default for QuestionsRequest {
    fn default() -> Self {
        Self { categories: Vec::new(), count: DEFAULT_QUESTION_COUNT }
    }
}

/// Why a question set cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSetError {
    Empty,
    DuplicateId { id: String },
    CorrectIndexOutOfRange { id: String, correct_index: u8 },
    BlankPrompt { id: String },
    /// A source failed to produce a set at all.
    Unavailable { message: String },
}

impl fmt::Display for QuestionSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "question set is empty"),
            Self::DuplicateId { id } => write!(f, "duplicate question id '{id}'"),
            Self::CorrectIndexOutOfRange { id, correct_index } => {
                write!(f, "question '{id}' has correct index {correct_index}, expected 0-3")
            }
            Self::BlankPrompt { id } => write!(f, "question '{id}' has a blank prompt"),
            Self::Unavailable { message } => write!(f, "question source unavailable: {message}"),
        }
    }
}

impl error::Error for QuestionSetError {}

pub fn validate_questions(questions: &[Question]) -> Result<(), QuestionSetError> {
    if questions.is_empty() {
        return Err(QuestionSetError::Empty);
    }
    let mut ids = HashSet::with_capacity(questions.len());
    for question in questions {
        if !ids.insert(question.id.as_str()) {
            return Err(QuestionSetError::DuplicateId { id: question.id.clone() });
        }
        if question.correct_index >= CHOICE_COUNT {
            return Err(QuestionSetError::CorrectIndexOutOfRange {
                id: question.id.clone(),
                correct_index: question.correct_index,
            });
        }
        if question.prompt.trim().is_empty() {
            return Err(QuestionSetError::BlankPrompt { id: question.id.clone() });
        }
    }
    Ok(())
}

pub trait QuestionSource {
    fn fetch(&mut self, request: &QuestionsRequest) -> Result<Vec<Question>, QuestionSetError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderSource;

impl QuestionSource for PlaceholderSource {
    fn fetch(&mut self, request: &QuestionsRequest) -> Result<Vec<Question>, QuestionSetError> {
        let mut pool: Vec<&str> = CATEGORIES
            .iter()
            .copied()
            .filter(|category| {
                request.categories.is_empty()
                    || request.categories.iter().any(|wanted| wanted == category)
            })
            .collect();
        if pool.is_empty() {
            pool.push(FALLBACK_CATEGORY);
        }
        let total = request.count.max(1);
        log::debug!("generating {total} placeholder questions from {} categories", pool.len());

        Ok((0..total).map(|position| placeholder_question(position, &pool)).collect())
    }
}

fn placeholder_question(position: usize, pool: &[&str]) -> Question {
    let level = u8::try_from(position + 1).unwrap_or(u8::MAX);
    let difficulty = difficulty_for_level(level);
    let label = difficulty.as_str();
    let number = position + 1;
    Question {
        id: format!("api-{label}-{number}"),
        category: pool[(position + label.len()) % pool.len()].to_string(),
        difficulty,
        prompt: format!("Generated {label} question #{number}"),
        choices: ["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
        correct_index: 0,
    }
}

/// Two hand-written cards for demos and smoke runs.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question {
            id: "q1".to_string(),
            category: "General Knowledge".to_string(),
            difficulty: Difficulty::Easy,
            prompt: "Which planet is known as the Red Planet?".to_string(),
            choices: [
                "Mercury".to_string(),
                "Venus".to_string(),
                "Earth".to_string(),
                "Mars".to_string(),
            ],
            correct_index: 3,
        },
        Question {
            id: "q2".to_string(),
            category: "Science".to_string(),
            difficulty: Difficulty::Easy,
            prompt: "What is H2O commonly known as?".to_string(),
            choices: [
                "Salt".to_string(),
                "Water".to_string(),
                "Oxygen".to_string(),
                "Hydrogen".to_string(),
            ],
            correct_index: 1,
        },
    ]
}
