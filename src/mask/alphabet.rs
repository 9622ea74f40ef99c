//! The fixed token alphabet and the named-pattern table.
//!
//! Both are process-wide constants; every compiled program shares them.

/// Marks editable (token) positions in the marked skeleton. Unit separator,
/// cannot be typed and never appears in pattern text.
pub const SENTINEL: char = '\u{1}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Digit,
    Letter,
    Alphanumeric,
}

impl CharClass {
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Digit => ch.is_ascii_digit(),
            Self::Letter => ch.is_ascii_alphabetic(),
            Self::Alphanumeric => ch.is_ascii_alphanumeric(),
        }
    }

    /// The negated class, used to skip runs of non-matching characters.
    pub fn rejects(self, ch: char) -> bool {
        !self.accepts(ch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseTransform {
    Upper,
    Lower,
}

impl CaseTransform {
    pub fn apply(self, ch: char) -> char {
        match self {
            Self::Upper => ch.to_ascii_uppercase(),
            Self::Lower => ch.to_ascii_lowercase(),
        }
    }
}

/// The seven token kinds. Symbols: `#` digit, `S` letter, `N` alphanumeric,
/// `A`/`a` case-transformed letter, `X`/`x` case-transformed alphanumeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Digit,
    Letter,
    Alphanumeric,
    UpperLetter,
    LowerLetter,
    UpperAlphanumeric,
    LowerAlphanumeric,
}

impl TokenKind {
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Self::Digit),
            'S' => Some(Self::Letter),
            'N' => Some(Self::Alphanumeric),
            'A' => Some(Self::UpperLetter),
            'a' => Some(Self::LowerLetter),
            'X' => Some(Self::UpperAlphanumeric),
            'x' => Some(Self::LowerAlphanumeric),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Digit => '#',
            Self::Letter => 'S',
            Self::Alphanumeric => 'N',
            Self::UpperLetter => 'A',
            Self::LowerLetter => 'a',
            Self::UpperAlphanumeric => 'X',
            Self::LowerAlphanumeric => 'x',
        }
    }

    pub fn class(self) -> CharClass {
        match self {
            Self::Digit => CharClass::Digit,
            Self::Letter | Self::UpperLetter | Self::LowerLetter => CharClass::Letter,
            Self::Alphanumeric | Self::UpperAlphanumeric | Self::LowerAlphanumeric => {
                CharClass::Alphanumeric
            }
        }
    }

    pub fn case(self) -> Option<CaseTransform> {
        match self {
            Self::UpperLetter | Self::UpperAlphanumeric => Some(CaseTransform::Upper),
            Self::LowerLetter | Self::LowerAlphanumeric => Some(CaseTransform::Lower),
            Self::Digit | Self::Letter | Self::Alphanumeric => None,
        }
    }

    pub fn accepts(self, ch: char) -> bool {
        self.class().accepts(ch)
    }

    /// The char as it is emitted into the masked output.
    pub fn transform(self, ch: char) -> char {
        match self.case() {
            Some(case) => case.apply(ch),
            None => ch,
        }
    }
}

/// Built-in named patterns. Lookup is a pure substitution step before
/// compilation; an unknown name is treated as a literal pattern string.
pub fn named_pattern(name: &str) -> Option<&'static str> {
    match name {
        "date" => Some("####/##/##"),
        "datetime" => Some("####/##/## ##:##"),
        "time" => Some("##:##"),
        "fulltime" => Some("##:##:##"),
        "phone" => Some("(###) ### - ####"),
        "card" => Some("#### #### #### ####"),
        _ => None,
    }
}
