// Slash path syntax: separator, reserved step tokens, splitting and joining.
//
// Splitting never collapses empty tokens. `"a//b"` is `a`, root, `b`, and a
// leading `/` therefore means "start from the root".

pub const SEPARATOR: char = '/';

pub const STEP_ROOT: &str = "";
pub const STEP_CURRENT: &str = ".";
pub const STEP_UP: &str = "..";
pub const STEP_ANY: &str = "*";
pub const STEP_MANY_ANY: &str = "**";

/// One parsed path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Root,
    Current,
    Parent,
    /// `*`: exactly one child, any name.
    Any,
    /// `**`: zero or more levels.
    AnyDepth,
    Name(&'a str),
}

impl<'a> Step<'a> {
    pub fn parse(token: &'a str) -> Self {
        match token {
            STEP_ROOT => Step::Root,
            STEP_CURRENT => Step::Current,
            STEP_UP => Step::Parent,
            STEP_ANY => Step::Any,
            STEP_MANY_ANY => Step::AnyDepth,
            name => Step::Name(name),
        }
    }

    pub fn is_wildcard(self) -> bool {
        matches!(self, Step::Any | Step::AnyDepth)
    }

    pub fn as_str(self) -> &'a str {
        match self {
            Step::Root => STEP_ROOT,
            Step::Current => STEP_CURRENT,
            Step::Parent => STEP_UP,
            Step::Any => STEP_ANY,
            Step::AnyDepth => STEP_MANY_ANY,
            Step::Name(name) => name,
        }
    }
}

/// Reserved tokens can never name a child in a stored steps list.
pub fn is_reserved(token: &str) -> bool {
    !matches!(Step::parse(token), Step::Name(_))
}

pub fn tokens(path: &str) -> impl Iterator<Item = &str> + '_ {
    path.split(SEPARATOR)
}

pub fn steps(path: &str) -> impl Iterator<Item = Step<'_>> + '_ {
    tokens(path).map(Step::parse)
}

pub fn is_simple(path: &str) -> bool {
    !steps(path).any(Step::is_wildcard)
}

/// Split at the first wildcard token: the literal prefix tokens and whether a
/// wildcard was found at all.
pub fn split_prefix(path: &str) -> (Vec<&str>, bool) {
    let mut prefix = Vec::new();
    for tok in tokens(path) {
        if Step::parse(tok).is_wildcard() {
            return (prefix, true);
        }
        prefix.push(tok);
    }
    (prefix, false)
}

/// Join steps back into a path. No steps renders as `.` so the result can be
/// followed again without jumping to the root.
pub fn join<S: AsRef<str>>(steps: &[S]) -> String {
    if steps.is_empty() {
        return STEP_CURRENT.to_string();
    }
    let mut out = String::new();
    for (i, s) in steps.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(s.as_ref());
    }
    out
}
