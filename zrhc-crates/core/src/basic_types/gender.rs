use std::fmt::Display;
use std::fmt::Formatter;

/// The sex of an individual as it appears in the pedigree files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Gender {
    #[default]
    Unspecified,
    Male,
    Female,
}

impl Gender {
    /// Parses the numeric sex code (`0` unspecified, `1` male, `2` female).
    pub fn from_code(code: &str) -> Option<Gender> {
        match code {
            "0" => Some(Gender::Unspecified),
            "1" => Some(Gender::Male),
            "2" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Gender::Unspecified => 0,
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }

    pub fn is_specified(self) -> bool {
        self != Gender::Unspecified
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Unspecified => write!(f, "unspecified"),
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}
