use crate::{chars, event::Scalar};

/// One of the three keyword literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    True,
    False,
    Null,
}

/// What happened after feeding one more character into the literal matcher?
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore(LiteralState),
    /// Character matched and was the last one of the literal.
    Done(Scalar),
    /// Character did not match the expected byte.
    Reject,
}

/// Progress through a keyword literal. `matched` counts the characters seen
/// so far, including the first one that selected the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiteralState {
    literal: Literal,
    matched: usize,
}

impl Literal {
    pub(crate) fn from_first(c: char) -> Option<Self> {
        match c {
            chars::LOWER_T => Some(Self::True),
            chars::LOWER_F => Some(Self::False),
            chars::LOWER_N => Some(Self::Null),
            _ => None,
        }
    }

    pub(crate) fn text(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        }
    }

    fn scalar(self) -> Scalar {
        match self {
            Self::True => Scalar::Boolean(true),
            Self::False => Scalar::Boolean(false),
            Self::Null => Scalar::Null,
        }
    }
}

impl LiteralState {
    /// Start matching after the first character.
    pub(crate) fn new(literal: Literal) -> Self {
        Self { literal, matched: 1 }
    }

    pub(crate) fn literal(self) -> Literal {
        self.literal
    }

    pub(crate) fn step(self, c: char) -> Step {
        let bytes = self.literal.text().as_bytes();
        match bytes.get(self.matched) {
            Some(&b) if char::from(b) == c => {
                let matched = self.matched + 1;
                if matched == bytes.len() {
                    Step::Done(self.literal.scalar())
                } else {
                    Step::NeedMore(Self { matched, ..self })
                }
            }
            _ => Step::Reject,
        }
    }

    /// `TRUE`, `TRUE2`, `TRUE3`, `FALSE` .. `FALSE4`, `NULL` .. `NULL3`.
    pub(crate) fn state_name(self) -> &'static str {
        const TRUE: [&str; 3] = ["TRUE", "TRUE2", "TRUE3"];
        const FALSE: [&str; 4] = ["FALSE", "FALSE2", "FALSE3", "FALSE4"];
        const NULL: [&str; 3] = ["NULL", "NULL2", "NULL3"];
        let names: &[&'static str] = match self.literal {
            Literal::True => &TRUE,
            Literal::False => &FALSE,
            Literal::Null => &NULL,
        };
        names[self.matched - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::{Literal, LiteralState, Step};
    use crate::{chars, event::Scalar};

    fn run(literal: Literal, rest: &str) -> Option<Scalar> {
        let mut state = LiteralState::new(literal);
        for c in rest.chars() {
            match state.step(c) {
                Step::NeedMore(next) => state = next,
                Step::Done(scalar) => return Some(scalar),
                Step::Reject => return None,
            }
        }
        None
    }

    #[test]
    fn matches_keywords() {
        assert_eq!(run(Literal::True, "rue"), Some(Scalar::Boolean(true)));
        assert_eq!(run(Literal::False, "alse"), Some(Scalar::Boolean(false)));
        assert_eq!(run(Literal::Null, "ull"), Some(Scalar::Null));
    }

    #[test]
    fn rejects_misspelling() {
        assert_eq!(run(Literal::True, "ru3"), None);
        assert_eq!(run(Literal::Null, "ul"), None);
    }

    #[test]
    fn state_names_follow_progress() {
        let mut state = LiteralState::new(Literal::False);
        assert_eq!(state.state_name(), "FALSE");
        for (c, name) in [('a', "FALSE2"), ('l', "FALSE3"), ('s', "FALSE4")] {
            let Step::NeedMore(next) = state.step(c) else {
                panic!("expected more input after {c}");
            };
            state = next;
            assert_eq!(state.state_name(), name);
        }
        assert_eq!(Literal::from_first('x'), None);
    }
}
