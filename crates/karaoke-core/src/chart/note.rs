use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// Kind of a note, selected by the first character of a note line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
pub enum NoteType {
    #[default]
    Normal,
    Golden,
    Freestyle,
    Rap,
    RapGolden,
}

impl NoteType {
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            ':' => Some(Self::Normal),
            '*' => Some(Self::Golden),
            'F' => Some(Self::Freestyle),
            'R' => Some(Self::Rap),
            'G' => Some(Self::RapGolden),
            _ => None,
        }
    }

    pub fn prefix(&self) -> char {
        match self {
            Self::Normal => ':',
            Self::Golden => '*',
            Self::Freestyle => 'F',
            Self::Rap => 'R',
            Self::RapGolden => 'G',
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Whether sung beats of this note count towards the score
    pub fn is_scorable(&self) -> bool {
        matches!(self, Self::Normal | Self::Golden | Self::RapGolden)
    }

    /// Golden notes are weighted twice
    pub fn is_golden(&self) -> bool {
        matches!(self, Self::Golden | Self::RapGolden)
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single sung syllable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub note_type: NoteType,
    pub start_beat: i32,
    pub length: i32,
    /// Target pitch as written in the chart
    pub pitch: i32,
    pub text: String,
}

impl Note {
    pub fn new(
        note_type: NoteType,
        start_beat: i32,
        length: i32,
        pitch: i32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            note_type,
            start_beat,
            length,
            pitch,
            text: text.into(),
        }
    }

    /// First beat after the note (exclusive), clamped to `i32::MAX`
    pub fn end_beat(&self) -> i32 {
        self.start_beat.saturating_add(self.length)
    }

    pub fn contains_beat(&self, beat: i32) -> bool {
        self.start_beat <= beat && beat < self.end_beat()
    }

    pub fn is_scorable(&self) -> bool {
        self.note_type.is_scorable()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_prefix_table_is_bidirectional() {
        for note_type in NoteType::iter() {
            assert_eq!(NoteType::from_prefix(note_type.prefix()), Some(note_type));
        }
        assert_eq!(NoteType::from_prefix('X'), None);
        assert_eq!(NoteType::from_prefix('-'), None);
    }

    #[test]
    fn test_scorable_types() {
        assert!(NoteType::Normal.is_scorable());
        assert!(NoteType::Golden.is_scorable());
        assert!(NoteType::RapGolden.is_scorable());
        assert!(!NoteType::Freestyle.is_scorable());
        assert!(!NoteType::Rap.is_scorable());
    }

    #[test]
    fn test_golden_types() {
        assert!(NoteType::Golden.is_golden());
        assert!(NoteType::RapGolden.is_golden());
        assert!(!NoteType::Normal.is_golden());
    }

    #[test]
    fn test_note_beats() {
        let note = Note::new(NoteType::Normal, 4, 3, 60, "la");
        assert_eq!(note.end_beat(), 7);
        assert!(!note.contains_beat(3));
        assert!(note.contains_beat(4));
        assert!(note.contains_beat(6));
        assert!(!note.contains_beat(7));
    }
}
