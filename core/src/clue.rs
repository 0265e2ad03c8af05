use alloc::string::String;

/// How much of a clue the player has uncovered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealState {
    #[default]
    Hidden,
    Question,
    Answer,
}

impl RevealState {
    /// Next state in the Hidden → Question → Answer progression, `None` once terminal.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::Question),
            Self::Question => Some(Self::Answer),
            Self::Answer => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Answer)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    ShowedQuestion,
    ShowedAnswer,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            ShowedQuestion => true,
            ShowedAnswer => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clue {
    pub question: String,
    pub answer: String,
    reveal: RevealState,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            reveal: RevealState::default(),
        }
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    /// Moves one step forward; an answered clue stays answered.
    pub fn advance(&mut self) -> RevealOutcome {
        let Some(next) = self.reveal.next() else {
            return RevealOutcome::NoChange;
        };
        self.reveal = next;
        match next {
            RevealState::Question => RevealOutcome::ShowedQuestion,
            RevealState::Answer => RevealOutcome::ShowedAnswer,
            RevealState::Hidden => RevealOutcome::NoChange,
        }
    }

    /// Text the player currently sees, `None` while hidden.
    pub fn visible_text(&self) -> Option<&str> {
        match self.reveal {
            RevealState::Hidden => None,
            RevealState::Question => Some(&self.question),
            RevealState::Answer => Some(&self.answer),
        }
    }
}
