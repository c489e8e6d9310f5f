//! CSS selector parsing and matching
//!
//! Supports the subset element lookups need:
//!
//! - type (`div`), universal (`*`), `#id` and `.class` selectors
//! - attribute selectors: `[attr]`, `=`, `~=`, `|=`, `^=`, `$=`, `*=`
//! - compound selectors (`input.search[type="text"]`)
//! - descendant (` `) and child (`>`) combinators
//! - comma separated selector lists
//!
//! Pseudo-classes and sibling combinators are rejected with a
//! [`SelectorError`].

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{cut, opt, value},
    error::{context, ErrorKind, ParseError as NomParseError, VerboseError, VerboseErrorKind},
    sequence::delimited,
    Finish, IResult,
};
use smallvec::SmallVec;
use tracing::trace;

use crate::error::SelectorError;
use crate::tree::{Document, NodeId};

/// Parser result type using VerboseError for diagnostics
type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

// ============================================================================
// Selector AST
// ============================================================================

/// Attribute comparison operator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrOperator {
    /// `[attr]`
    Exists,
    /// `[attr=value]`
    Equals,
    /// `[attr~=value]` whitespace separated word
    Includes,
    /// `[attr|=value]` exact or followed by `-`
    DashMatch,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

impl AttrOperator {
    fn test(self, actual: &str, expected: &str) -> bool {
        match self {
            AttrOperator::Exists => true,
            AttrOperator::Equals => actual == expected,
            AttrOperator::Includes => {
                !expected.is_empty() && actual.split_whitespace().any(|word| word == expected)
            }
            AttrOperator::DashMatch => actual
                .strip_prefix(expected)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('-')),
            AttrOperator::Prefix => !expected.is_empty() && actual.starts_with(expected),
            AttrOperator::Suffix => !expected.is_empty() && actual.ends_with(expected),
            AttrOperator::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

/// A single simple selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorPart {
    Universal,
    /// Lowercased tag name
    Type(String),
    Id(String),
    Class(String),
    Attribute {
        name: String,
        op: AttrOperator,
        value: String,
    },
}

impl SelectorPart {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        match self {
            SelectorPart::Universal => doc.exists(node),
            SelectorPart::Type(tag) => doc.tag_name(node) == tag,
            SelectorPart::Id(id) => doc.attribute(node, "id") == Some(id.as_str()),
            SelectorPart::Class(class) => doc.has_class(node, class),
            SelectorPart::Attribute { name, op, value } => doc
                .attribute_value(node, name)
                .is_some_and(|actual| op.test(&actual, value)),
        }
    }
}

/// Simple selectors that must all match the same element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub parts: SmallVec<[SelectorPart; 2]>,
}

impl CompoundSelector {
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.parts.iter().all(|part| part.matches(doc, node))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// `A B`: B anywhere under A
    Descendant,
    /// `A > B`: B directly under A
    Child,
}

/// Compound selectors joined by combinators, written left to right
///
/// Each segment's combinator relates it to the segment after it; the last
/// segment has none and is the element being matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub segments: Vec<(CompoundSelector, Option<Combinator>)>,
}

impl ComplexSelector {
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        !self.segments.is_empty() && self.matches_segment(doc, node, self.segments.len() - 1)
    }

    fn matches_segment(&self, doc: &Document, node: NodeId, index: usize) -> bool {
        let (compound, _) = &self.segments[index];
        if !compound.matches(doc, node) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.segments[index - 1].1 {
            Some(Combinator::Child) => doc
                .parent(node)
                .is_some_and(|parent| self.matches_segment(doc, parent, index - 1)),
            _ => doc
                .ancestors(node)
                .any(|ancestor| self.matches_segment(doc, ancestor, index - 1)),
        }
    }
}

/// A parsed comma separated selector list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
    source: String,
}

impl SelectorList {
    /// Parse a selector list such as `.a > .b, [data-role="x"]`
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        match selector_list(source).finish() {
            Ok((rest, selectors)) if rest.is_empty() => {
                trace!(source, count = selectors.len(), "parsed selector list");
                Ok(Self {
                    selectors,
                    source: source.to_string(),
                })
            }
            Ok((rest, _)) => Err(SelectorError {
                selector: source.to_string(),
                offset: source.len() - rest.len(),
                message: "unexpected trailing input".to_string(),
            }),
            Err(err) => {
                let offset = err
                    .errors
                    .first()
                    .map(|(fragment, _)| source.len().saturating_sub(fragment.len()))
                    .unwrap_or(0);
                Err(SelectorError {
                    selector: source.to_string(),
                    offset,
                    message: format_verbose_error(&err),
                })
            }
        }
    }

    pub fn selectors(&self) -> &[ComplexSelector] {
        &self.selectors
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Whether any selector in the list matches `node`
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        doc.exists(node) && self.selectors.iter().any(|s| s.matches(doc, node))
    }
}

// ============================================================================
// Document queries
// ============================================================================

impl Document {
    pub fn matches(&self, node: NodeId, selectors: &SelectorList) -> bool {
        selectors.matches(self, node)
    }

    /// Descendants of `root` (not `root` itself) matching `selectors`, in document order
    pub fn query_selector_all(&self, root: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if selectors.matches(self, node) {
                found.push(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        found
    }

    /// Nearest inclusive ancestor of `node` matching `selectors`
    pub fn closest(&self, node: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        self.inclusive_ancestors(node)
            .find(|id| selectors.matches(self, *id))
    }
}

// ============================================================================
// Nom parsers
// ============================================================================

/// Format a VerboseError into a human-readable message
fn format_verbose_error(err: &VerboseError<&str>) -> String {
    let mut parts = Vec::new();

    for (input, kind) in &err.errors {
        match kind {
            VerboseErrorKind::Context(ctx) => {
                parts.push(format!("in {}", ctx));
            }
            VerboseErrorKind::Char(c) => {
                let preview: String = input.chars().take(20).collect();
                parts.push(format!("expected '{}' near \"{}\"", c, preview));
            }
            VerboseErrorKind::Nom(ek) => {
                parts.push(ek.description().to_string());
            }
        }
    }

    if parts.is_empty() {
        "unknown parse error".to_string()
    } else {
        parts.join(", ")
    }
}

/// Typed single-character parser
fn symbol<'a>(c: char) -> impl Fn(&'a str) -> ParseResult<'a, char> {
    char(c)
}

fn ws(input: &str) -> ParseResult<()> {
    value((), multispace0)(input)
}

/// Parse an identifier (alphanumeric, hyphen, underscore)
fn identifier(input: &str) -> ParseResult<&str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn attr_operator(input: &str) -> ParseResult<AttrOperator> {
    alt((
        value(AttrOperator::Includes, tag("~=")),
        value(AttrOperator::DashMatch, tag("|=")),
        value(AttrOperator::Prefix, tag("^=")),
        value(AttrOperator::Suffix, tag("$=")),
        value(AttrOperator::Substring, tag("*=")),
        value(AttrOperator::Equals, tag("=")),
    ))(input)
}

/// Quoted string or bare identifier
fn attr_value(input: &str) -> ParseResult<&str> {
    alt((
        delimited(symbol('"'), take_while(|c: char| c != '"'), symbol('"')),
        delimited(symbol('\''), take_while(|c: char| c != '\''), symbol('\'')),
        identifier,
    ))(input)
}

/// Parse an attribute selector: `[name]` or `[name op value]`
fn attribute_selector(input: &str) -> ParseResult<SelectorPart> {
    context("attribute selector", |input| {
        let (input, _) = symbol('[')(input)?;
        let (input, _) = ws(input)?;
        let (input, name) = cut(identifier)(input)?;
        let (input, _) = ws(input)?;
        let (input, matcher) = opt(|i| {
            let (i, op) = attr_operator(i)?;
            let (i, _) = ws(i)?;
            let (i, val) = cut(attr_value)(i)?;
            Ok((i, (op, val)))
        })(input)?;
        let (input, _) = ws(input)?;
        let (input, _) = cut(symbol(']'))(input)?;

        let (op, val) = matcher.unwrap_or((AttrOperator::Exists, ""));
        Ok((
            input,
            SelectorPart::Attribute {
                name: name.to_ascii_lowercase(),
                op,
                value: val.to_string(),
            },
        ))
    })(input)
}

/// Parse a compound selector: optional type, then `#id`, `.class` and `[attr]` parts
fn compound_selector(input: &str) -> ParseResult<CompoundSelector> {
    let mut parts = SmallVec::new();
    let mut remaining = input;

    if let Some(rest) = remaining.strip_prefix('*') {
        parts.push(SelectorPart::Universal);
        remaining = rest;
    } else if let Ok((rest, name)) = identifier(remaining) {
        parts.push(SelectorPart::Type(name.to_ascii_lowercase()));
        remaining = rest;
    }

    loop {
        if remaining.starts_with('#') {
            let (rest, _) = symbol('#')(remaining)?;
            let (rest, id) = cut(identifier)(rest)?;
            parts.push(SelectorPart::Id(id.to_string()));
            remaining = rest;
        } else if remaining.starts_with('.') {
            let (rest, _) = symbol('.')(remaining)?;
            let (rest, class) = cut(identifier)(rest)?;
            parts.push(SelectorPart::Class(class.to_string()));
            remaining = rest;
        } else if remaining.starts_with('[') {
            let (rest, part) = attribute_selector(remaining)?;
            parts.push(part);
            remaining = rest;
        } else if remaining.starts_with(':') {
            return Err(nom::Err::Failure(VerboseError {
                errors: vec![(
                    remaining,
                    VerboseErrorKind::Context("pseudo-classes are not supported"),
                )],
            }));
        } else {
            break;
        }
    }

    if parts.is_empty() {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            remaining,
            ErrorKind::Many1,
        )));
    }

    Ok((remaining, CompoundSelector { parts }))
}

/// Parse a complex selector: compounds joined by descendant or child combinators
fn complex_selector(input: &str) -> ParseResult<ComplexSelector> {
    let mut segments = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, compound) = compound_selector(remaining)?;
        remaining = rest;

        let trimmed = remaining.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(',') {
            segments.push((compound, None));
            break;
        }

        if let Some(after_gt) = trimmed.strip_prefix('>') {
            remaining = after_gt.trim_start();
            segments.push((compound, Some(Combinator::Child)));
        } else if trimmed.len() < remaining.len() {
            remaining = trimmed;
            segments.push((compound, Some(Combinator::Descendant)));
        } else {
            return Err(nom::Err::Failure(VerboseError {
                errors: vec![(remaining, VerboseErrorKind::Context("unsupported combinator"))],
            }));
        }
    }

    Ok((remaining, ComplexSelector { segments }))
}

fn selector_list(input: &str) -> ParseResult<Vec<ComplexSelector>> {
    let mut selectors = Vec::new();
    let (mut remaining, _) = ws(input)?;

    loop {
        let (rest, selector) = complex_selector(remaining)?;
        selectors.push(selector);
        let (rest, _) = ws(rest)?;
        match rest.strip_prefix(',') {
            Some(after_comma) => {
                let (after_comma, _) = ws(after_comma)?;
                remaining = after_comma;
            }
            None => {
                remaining = rest;
                break;
            }
        }
    }

    Ok((remaining, selectors))
}
