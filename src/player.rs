//! Players and the identities chips are tagged with

use std::fmt;

/// Identity of a player as far as the grid is concerned
///
/// Two players are never told apart by name or colour, only by the id the
/// session handed out when they were created.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who is in control of a player's moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlayerKind {
    Human,
    /// Moves are chosen by a minimax search looking `max_depth` moves ahead
    Computer { max_depth: usize },
}

#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    /// Games won this session
    pub score: u32,
    kind: PlayerKind,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlayerColor {
    Red,
    Yellow,
    Blue,
    Black,
}

impl Player {
    pub fn human(id: PlayerId, name: &str, color: PlayerColor) -> Self {
        Self {
            id,
            name: name.to_string(),
            color,
            score: 0,
            kind: PlayerKind::Human,
        }
    }

    pub fn computer(id: PlayerId, name: &str, color: PlayerColor, max_depth: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            color,
            score: 0,
            kind: PlayerKind::Computer { max_depth },
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer { .. })
    }

    /// The search depth of a computer player, `None` for humans
    pub fn max_depth(&self) -> Option<usize> {
        match self.kind {
            PlayerKind::Computer { max_depth } => Some(max_depth),
            PlayerKind::Human => None,
        }
    }
}
