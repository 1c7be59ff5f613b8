use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// Number of answer choices on every question card.
pub const CHOICE_COUNT: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub choices: [String; 4],
    pub correct_index: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifelineUsage {
    pub fifty_fifty: bool,
    pub audience: bool,
    pub switch: bool,
}

impl LifelineUsage {
    pub fn is_used(&self, lifeline: Lifeline) -> bool {
        match lifeline {
            Lifeline::FiftyFifty => self.fifty_fifty,
            Lifeline::AudiencePoll => self.audience,
            Lifeline::SwitchQuestion => self.switch,
        }
    }

    pub(crate) fn mark_used(&mut self, lifeline: Lifeline) {
        match lifeline {
            Lifeline::FiftyFifty => self.fifty_fifty = true,
            Lifeline::AudiencePoll => self.audience = true,
            Lifeline::SwitchQuestion => self.switch = true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifeline {
    FiftyFifty,
    AudiencePoll,
    SwitchQuestion,
}

/// Discrete events accepted by the transition function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Load { questions: Vec<Question> },
    Hydrate { snapshot: Box<GameState> },
    SelectChoice { index: u8 },
    LockIn,
    Next,
    UseFiftyFifty,
    UseAudiencePoll,
    UseSwitchQuestion,
    Tick,
    TimeUp,
    WalkAway,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "Load",
            Self::Hydrate { .. } => "Hydrate",
            Self::SelectChoice { .. } => "SelectChoice",
            Self::LockIn => "LockIn",
            Self::Next => "Next",
            Self::UseFiftyFifty => "UseFiftyFifty",
            Self::UseAudiencePoll => "UseAudiencePoll",
            Self::UseSwitchQuestion => "UseSwitchQuestion",
            Self::Tick => "Tick",
            Self::TimeUp => "TimeUp",
            Self::WalkAway => "WalkAway",
            Self::Reset => "Reset",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Cleared the top rung.
    Won,
    /// Wrong lock-in or the countdown ran out; paid at the last checkpoint.
    Lost,
    /// Left with whatever was banked at the last correct answer.
    WalkedAway,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    QuestionsLoaded { count: usize },
    Hydrated { level: u8 },
    AnswerLocked { level: u8, choice: u8, correct: bool },
    CheckpointReached { level: u8 },
    Advanced { level: u8, question_id: String },
    LifelineUsed { lifeline: Lifeline },
    SwitchUnavailable,
    TimeExpired { level: u8 },
    WalkedAway { winnings: u32 },
    GameEnded { outcome: RunOutcome, winnings: u32 },
    Reset,
}

/// What the caller persists and displays once a game is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub winnings: u32,
    pub level: u8,
    pub last_safe_level: u8,
}
