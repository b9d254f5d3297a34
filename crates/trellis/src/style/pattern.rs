//! Structural predicates over the box tree.
//!
//! A pattern is a sequence of selectors joined by `And` (same box) or
//! `Descendant` (an ancestor relationship). Consecutive `And`-joined
//! selectors form a group. Matching runs over the chain of boxes from the
//! rule's owner down to the target: the last group must match the target,
//! and each earlier group must match a strictly higher box in the chain,
//! searched nearest-first.

use bitflags::bitflags;

use crate::{error::ParseError, ui::BoxKey};

bitflags! {
    /// Interaction status bits a selector can test.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Status: u8 {
        /// The pointer is over the box.
        const HOVER = 1 << 0;
        /// The box is hot.
        const HOT = 1 << 1;
        /// The box is active.
        const ACTIVE = 1 << 2;
        /// The box is being dragged.
        const DRAGGING = 1 << 3;
        /// The box has keyboard focus.
        const FOCUSED = 1 << 4;
    }
}

/// A single test against one box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Always matches.
    Any,
    /// Matches the box that owns the rule.
    Owner,
    /// Matches boxes whose display text equals the string.
    Text(String),
    /// Matches boxes carrying the tag.
    Tag(String),
    /// Matches boxes with every given status bit set.
    Status(Status),
    /// Matches the box with this key.
    Key(BoxKey),
}

/// How a selector relates to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Same box as the previous selector.
    And,
    /// A descendant of the box matched by the previous selector.
    Descendant,
}

/// What a selector can observe about a box.
pub trait SelectorTarget {
    /// The box key.
    fn key(&self) -> BoxKey;
    /// The display text.
    fn text(&self) -> &str;
    /// Does the box carry this tag?
    fn has_tag(&self, tag: &str) -> bool;
    /// Interaction status.
    fn status(&self) -> Status;
}

/// A sequence of selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    /// Selectors with the operator joining each to its predecessor. The
    /// first operator is ignored.
    items: Vec<(Op, Selector)>,
}

impl Pattern {
    /// An empty pattern. Empty patterns never match.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pattern of one selector.
    pub fn of(sel: Selector) -> Self {
        Self::new().sel(sel)
    }

    /// Matches boxes carrying `tag`.
    pub fn tag(tag: &str) -> Self {
        Self::of(Selector::Tag(tag.into()))
    }

    /// Matches the box with key `key`.
    pub fn key(key: BoxKey) -> Self {
        Self::of(Selector::Key(key))
    }

    /// Matches the rule owner.
    pub fn owner() -> Self {
        Self::of(Selector::Owner)
    }

    /// Matches every box.
    pub fn any() -> Self {
        Self::of(Selector::Any)
    }

    /// Start a new group. Equivalent to [`Pattern::descendant`].
    pub fn sel(self, sel: Selector) -> Self {
        self.descendant(sel)
    }

    /// Add a selector that must match the same box as the previous one.
    pub fn and(mut self, sel: Selector) -> Self {
        self.items.push((Op::And, sel));
        self
    }

    /// Add a selector that must match a descendant of the previous group's
    /// box.
    pub fn descendant(mut self, sel: Selector) -> Self {
        self.items.push((Op::Descendant, sel));
        self
    }

    /// This pattern, required to sit below a box matching `ancestor`.
    pub fn within(self, ancestor: &Self) -> Self {
        let mut items = ancestor.items.clone();
        let mut own = self.items.into_iter();
        if let Some((_, first)) = own.next() {
            items.push((Op::Descendant, first));
        }
        items.extend(own);
        Self { items }
    }

    /// Is the pattern empty?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The selectors split into `And` groups, outermost first.
    fn groups(&self) -> Vec<&[(Op, Selector)]> {
        let mut groups = Vec::new();
        let mut start = 0;
        for (i, (op, _)) in self.items.iter().enumerate() {
            if i > 0 && *op == Op::Descendant {
                groups.push(&self.items[start..i]);
                start = i;
            }
        }
        if start < self.items.len() {
            groups.push(&self.items[start..]);
        }
        groups
    }

    /// Match against `chain`, which runs from the rule owner (first) to the
    /// target box (last).
    pub fn matches<T: SelectorTarget>(&self, chain: &[T]) -> bool {
        let groups = self.groups();
        let Some((last, rest)) = groups.split_last() else {
            return false;
        };
        let Some(target) = chain.len().checked_sub(1) else {
            return false;
        };
        if !group_matches(last, chain, target) {
            return false;
        }
        let mut pos = target;
        for group in rest.iter().rev() {
            let found = (0..pos).rev().find(|&i| group_matches(group, chain, i));
            match found {
                Some(i) => pos = i,
                None => return false,
            }
        }
        true
    }

    /// Parse the textual pattern form.
    ///
    /// Whitespace separates descendant groups. Within a group, `.tag` tests a
    /// tag, `"text"` tests display text, `:hover`, `:hot`, `:active`,
    /// `:dragging` and `:focused` test status, `*` matches anything and `&`
    /// matches the rule owner.
    ///
    /// ```
    /// use trellis::style::Pattern;
    ///
    /// let p = Pattern::parse("& .menu .item:hot").unwrap();
    /// assert!(!p.is_empty());
    /// ```
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        Parser::new(src).parse()
    }
}

/// Does every selector in `group` match `chain[idx]`?
fn group_matches<T: SelectorTarget>(group: &[(Op, Selector)], chain: &[T], idx: usize) -> bool {
    let b = &chain[idx];
    group.iter().all(|(_, sel)| match sel {
        Selector::Any => true,
        Selector::Owner => idx == 0,
        Selector::Text(t) => b.text() == t,
        Selector::Tag(t) => b.has_tag(t),
        Selector::Status(s) => b.status().contains(*s),
        Selector::Key(k) => b.key() == *k,
    })
}

/// Cursor over a pattern source string.
struct Parser<'a> {
    /// Source text.
    src: &'a str,
    /// Byte offset of the next character.
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Start at the beginning of `src`.
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Consume one character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// An error at the current offset.
    fn err(&self, msg: &str) -> ParseError {
        ParseError::with_position(msg, None, Some(self.pos))
    }

    /// Consume an identifier of alphanumerics, `-` and `_`.
    fn ident(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.err("expected identifier"));
        }
        Ok(&self.src[start..self.pos])
    }

    /// Consume a double-quoted string. The opening quote is already
    /// consumed. `\"` and `\\` are the only escapes.
    fn quoted(&mut self) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some(c @ ('"' | '\\')) => out.push(c),
                    _ => return Err(self.err("invalid escape")),
                },
                Some(c) => out.push(c),
                None => return Err(self.err("unterminated string")),
            }
        }
    }

    /// Parse one selector.
    fn selector(&mut self) -> Result<Selector, ParseError> {
        match self.bump() {
            Some('.') => Ok(Selector::Tag(self.ident()?.to_string())),
            Some('"') => Ok(Selector::Text(self.quoted()?)),
            Some(':') => {
                let at = self.pos;
                let status = match self.ident()? {
                    "hover" => Status::HOVER,
                    "hot" => Status::HOT,
                    "active" => Status::ACTIVE,
                    "dragging" => Status::DRAGGING,
                    "focused" => Status::FOCUSED,
                    other => {
                        return Err(ParseError::with_position(
                            format!("unknown status {other:?}"),
                            None,
                            Some(at),
                        ));
                    }
                };
                Ok(Selector::Status(status))
            }
            Some('*') => Ok(Selector::Any),
            Some('&') => Ok(Selector::Owner),
            Some(c) => Err(ParseError::with_position(
                format!("unexpected character {c:?}"),
                None,
                Some(self.pos - c.len_utf8()),
            )),
            None => Err(self.err("unexpected end of pattern")),
        }
    }

    /// Parse the whole source.
    fn parse(mut self) -> Result<Pattern, ParseError> {
        let mut pattern = Pattern::new();
        let mut op = Op::Descendant;
        loop {
            match self.peek() {
                None => break,
                Some(c) if c.is_whitespace() => {
                    self.bump();
                    op = Op::Descendant;
                }
                Some(_) => {
                    let sel = self.selector()?;
                    pattern.items.push((op, sel));
                    op = Op::And;
                }
            }
        }
        if pattern.is_empty() {
            return Err(self.err("empty pattern"));
        }
        Ok(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A stand-in box for matching tests.
    struct Fake {
        key: u64,
        text: &'static str,
        tags: &'static [&'static str],
        status: Status,
    }

    impl SelectorTarget for Fake {
        fn key(&self) -> BoxKey {
            BoxKey::from_raw(self.key)
        }
        fn text(&self) -> &str {
            self.text
        }
        fn has_tag(&self, tag: &str) -> bool {
            self.tags.contains(&tag)
        }
        fn status(&self) -> Status {
            self.status
        }
    }

    fn fake(key: u64, text: &'static str, tags: &'static [&'static str]) -> Fake {
        Fake {
            key,
            text,
            tags,
            status: Status::empty(),
        }
    }

    fn chain() -> Vec<Fake> {
        vec![
            fake(1, "owner", &["root"]),
            fake(2, "File", &["menu"]),
            fake(3, "", &["panel"]),
            Fake {
                status: Status::HOT | Status::HOVER,
                ..fake(4, "Open", &["item"])
            },
        ]
    }

    #[test]
    fn single_group() {
        let c = chain();
        assert!(Pattern::tag("item").matches(&c));
        assert!(!Pattern::tag("menu").matches(&c));
        assert!(Pattern::key(BoxKey::from_raw(4)).matches(&c));
        assert!(Pattern::any().matches(&c));
        assert!(!Pattern::owner().matches(&c));
        assert!(Pattern::owner().matches(&c[..1]));
        assert!(!Pattern::new().matches(&c));
    }

    #[test]
    fn and_groups() {
        let c = chain();
        let p = Pattern::tag("item").and(Selector::Status(Status::HOT));
        assert!(p.matches(&c));
        let p = Pattern::tag("item").and(Selector::Status(Status::ACTIVE));
        assert!(!p.matches(&c));
    }

    #[test]
    fn descendant_groups() {
        let c = chain();
        assert!(Pattern::tag("menu").descendant(Selector::Tag("item".into())).matches(&c));
        assert!(
            Pattern::owner()
                .descendant(Selector::Tag("menu".into()))
                .descendant(Selector::Tag("item".into()))
                .matches(&c)
        );
        // Order matters: panel is below menu, not above it.
        assert!(
            !Pattern::tag("panel")
                .descendant(Selector::Tag("menu".into()))
                .descendant(Selector::Tag("item".into()))
                .matches(&c)
        );
        // The target cannot be its own ancestor.
        assert!(!Pattern::tag("item").descendant(Selector::Tag("item".into())).matches(&c));
    }

    #[test]
    fn parse_forms() -> Result<(), ParseError> {
        let c = chain();
        assert!(Pattern::parse(".menu .item:hot")?.matches(&c));
        assert!(Pattern::parse("& \"File\" *")?.matches(&c));
        assert!(!Pattern::parse(".menu .item:active")?.matches(&c));
        assert_eq!(
            Pattern::parse(".item:hover")?,
            Pattern::tag("item").and(Selector::Status(Status::HOVER))
        );
        assert_eq!(
            Pattern::parse("  .a   .b ")?,
            Pattern::tag("a").descendant(Selector::Tag("b".into()))
        );
        Ok(())
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Pattern::parse(".a :bogus").map_err(|e| e.to_string()),
            Err("unknown status \"bogus\" (offset 4)".to_string())
        );
        assert!(Pattern::parse("\"open").is_err());
        assert!(Pattern::parse("   ").is_err());
        assert!(Pattern::parse("a").is_err());
        assert!(Pattern::parse(".").is_err());
    }
}
