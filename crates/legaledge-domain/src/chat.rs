//! Chat module - conversational turns and the session transcript

use std::fmt;

/// Who produced a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The person asking about their case
    User,

    /// The model (or a substituted failure reply)
    Assistant,
}

impl Role {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Speaker
    pub role: Role,

    /// Message text
    pub content: String,
}

impl ChatTurn {
    /// A turn spoken by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A turn spoken by the assistant
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only record of a session's conversation
///
/// The only way to remove turns is [`Transcript::clear`], which drops all of
/// them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The last `n` turns (fewer if the transcript is shorter), oldest first
    ///
    /// # Examples
    ///
    /// ```
    /// use legaledge_domain::{ChatTurn, Transcript};
    ///
    /// let mut transcript = Transcript::new();
    /// for i in 0..7 {
    ///     transcript.push(ChatTurn::user(format!("q{}", i)));
    /// }
    /// let window = transcript.window(5);
    /// assert_eq!(window.len(), 5);
    /// assert_eq!(window[0].content, "q2");
    /// ```
    pub fn window(&self, n: usize) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True if there are no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop every turn
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
