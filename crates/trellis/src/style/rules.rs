use std::{result::Result as StdResult, vec};

use super::{PartialStyle, Pattern};
use crate::error::{ParseError, Result};

/// A pattern and the partial style applied to boxes it matches.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// Which boxes the rule targets.
    pub pattern: Pattern,
    /// Fields to apply, and their values.
    pub style: PartialStyle,
}

impl StyleRule {
    /// Construct a rule.
    pub fn new(pattern: Pattern, style: PartialStyle) -> Self {
        Self { pattern, style }
    }

    /// Construct a rule from a textual pattern.
    pub fn parse(pattern: &str, style: PartialStyle) -> StdResult<Self, ParseError> {
        Ok(Self::new(Pattern::parse(pattern)?, style))
    }
}

/// An ordered list of style rules. Order is registration order, which is
/// also application order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    /// Rules in registration order.
    rules: Vec<StyleRule>,
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn push(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// The rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Begin a fluent rule-building chain.
    ///
    /// ```
    /// use trellis::style::{Color, PartialStyle, RuleSet};
    ///
    /// let mut set = RuleSet::new();
    /// set.rules()
    ///     .prefix(".menu")
    ///     .style(".item", PartialStyle::new().bg(Color::BLACK))
    ///     .style(".item:hot", PartialStyle::new().bg(Color::WHITE))
    ///     .apply()
    ///     .unwrap();
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn rules(&mut self) -> RuleBuilder<'_> {
        RuleBuilder {
            set: self,
            prefix: None,
            pending: Vec::new(),
            error: None,
        }
    }
}

impl IntoIterator for RuleSet {
    type Item = StyleRule;
    type IntoIter = vec::IntoIter<StyleRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

/// A fluent builder for adding rules to a [`RuleSet`].
///
/// Created via [`RuleSet::rules`]. Collects rules and commits them on
/// [`apply`](RuleBuilder::apply). The first pattern error is kept and
/// reported by `apply`, which then commits nothing.
#[must_use = "call .apply() to commit rules"]
pub struct RuleBuilder<'a> {
    /// The target set.
    set: &'a mut RuleSet,
    /// Ancestor pattern for subsequent rules.
    prefix: Option<Pattern>,
    /// Rules to be committed.
    pending: Vec<StyleRule>,
    /// First parse failure.
    error: Option<ParseError>,
}

impl RuleBuilder<'_> {
    /// Require subsequent rules to match below boxes matching `pattern`.
    pub fn prefix(mut self, pattern: &str) -> Self {
        match Pattern::parse(pattern) {
            Ok(p) => self.prefix = Some(p),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Clear the prefix.
    pub fn no_prefix(mut self) -> Self {
        self.prefix = None;
        self
    }

    /// Add a rule from a textual pattern.
    pub fn style(self, pattern: &str, style: PartialStyle) -> Self {
        match Pattern::parse(pattern) {
            Ok(p) => self.pattern(p, style),
            Err(e) => {
                let mut s = self;
                s.error.get_or_insert(e);
                s
            }
        }
    }

    /// Add a rule from a built pattern.
    pub fn pattern(mut self, pattern: Pattern, style: PartialStyle) -> Self {
        let pattern = match &self.prefix {
            Some(prefix) => pattern.within(prefix),
            None => pattern,
        };
        self.pending.push(StyleRule::new(pattern, style));
        self
    }

    /// Commit the collected rules.
    pub fn apply(self) -> Result<()> {
        if let Some(e) = self.error {
            return Err(e.into());
        }
        self.set.rules.extend(self.pending);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        style::{Color, Selector},
    };

    #[test]
    fn builder_prefixes() -> Result<()> {
        let mut set = RuleSet::new();
        set.rules()
            .prefix(".menu")
            .style(".item", PartialStyle::new().bg(Color::BLACK))
            .no_prefix()
            .style(".item", PartialStyle::new().bg(Color::WHITE))
            .apply()?;
        let rules: Vec<_> = set.iter().collect();
        assert_eq!(
            rules[0].pattern,
            Pattern::tag("menu").descendant(Selector::Tag("item".into()))
        );
        assert_eq!(rules[1].pattern, Pattern::tag("item"));
        Ok(())
    }

    #[test]
    fn builder_reports_errors() {
        let mut set = RuleSet::new();
        let r = set
            .rules()
            .style(".ok", PartialStyle::new())
            .style(":nope", PartialStyle::new())
            .apply();
        assert!(matches!(r, Err(Error::Parse(_))));
        assert!(set.is_empty());
    }
}
