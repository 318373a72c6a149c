//! Element selectors
//!
//! Compound selectors (tag, `#id`, `.class`, `[attr]`, `[attr="v"]`,
//! `[attr*="v"]`) and comma-separated selector lists. No combinators: every
//! structural query in the engine is a single compound, matched per element.

use crate::node::ElementData;

/// Attribute match operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr]` - attribute exists
    Present,
    /// `[attr="v"]` - exact value
    Equals,
    /// `[attr*="v"]` - value contains substring
    Contains,
}

/// One attribute condition
#[derive(Debug, Clone)]
pub struct AttrMatcher {
    pub name: String,
    pub op: AttrOp,
    pub value: String,
}

impl AttrMatcher {
    fn matches(&self, elem: &ElementData) -> bool {
        match (self.op, elem.get_attr(&self.name)) {
            (AttrOp::Present, found) => found.is_some(),
            (AttrOp::Equals, Some(v)) => v == self.value,
            (AttrOp::Contains, Some(v)) => v.contains(&self.value),
            _ => false,
        }
    }
}

/// Compound selector: all conditions must hold on one element
#[derive(Debug, Clone, Default)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatcher>,
}

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character `{0}` in selector")]
    UnexpectedChar(char),
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
}

fn ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len()
        && (chars[*i].is_ascii_alphanumeric() || chars[*i] == '-' || chars[*i] == '_')
    {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

impl CompoundSelector {
    /// Parse a single compound selector
    pub fn parse(s: &str) -> Result<Self, SelectorError> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut sel = Self::default();
        let mut i = 0;

        if chars[0] == '*' {
            i = 1;
        } else if chars[0].is_ascii_alphanumeric() {
            sel.tag = Some(ident(&chars, &mut i).to_ascii_lowercase());
        }

        while i < chars.len() {
            match chars[i] {
                '.' => {
                    i += 1;
                    let class = ident(&chars, &mut i);
                    if class.is_empty() {
                        return Err(SelectorError::UnexpectedChar('.'));
                    }
                    sel.classes.push(class);
                }
                '#' => {
                    i += 1;
                    let id = ident(&chars, &mut i);
                    if id.is_empty() {
                        return Err(SelectorError::UnexpectedChar('#'));
                    }
                    sel.id = Some(id);
                }
                '[' => {
                    i += 1;
                    let name = ident(&chars, &mut i);
                    if name.is_empty() {
                        return Err(SelectorError::UnexpectedChar('['));
                    }
                    let matcher = Self::parse_attr_tail(&chars, &mut i, name)?;
                    sel.attrs.push(matcher);
                }
                c => return Err(SelectorError::UnexpectedChar(c)),
            }
        }

        Ok(sel)
    }

    fn parse_attr_tail(
        chars: &[char],
        i: &mut usize,
        name: String,
    ) -> Result<AttrMatcher, SelectorError> {
        let op = match chars.get(*i) {
            Some(']') => {
                *i += 1;
                return Ok(AttrMatcher {
                    name,
                    op: AttrOp::Present,
                    value: String::new(),
                });
            }
            Some('*') if chars.get(*i + 1) == Some(&'=') => {
                *i += 2;
                AttrOp::Contains
            }
            Some('=') => {
                *i += 1;
                AttrOp::Equals
            }
            Some(&c) => return Err(SelectorError::UnexpectedChar(c)),
            None => return Err(SelectorError::UnterminatedAttribute),
        };

        let value = match chars.get(*i) {
            Some(&q) if q == '"' || q == '\'' => {
                *i += 1;
                let start = *i;
                while *i < chars.len() && chars[*i] != q {
                    *i += 1;
                }
                if *i == chars.len() {
                    return Err(SelectorError::UnterminatedAttribute);
                }
                let value: String = chars[start..*i].iter().collect();
                *i += 1;
                value
            }
            _ => ident(chars, i),
        };

        match chars.get(*i) {
            Some(']') => {
                *i += 1;
                Ok(AttrMatcher { name, op, value })
            }
            _ => Err(SelectorError::UnterminatedAttribute),
        }
    }

    /// Check whether an element satisfies every condition
    pub fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if &elem.name != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.get_attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| elem.has_class(c))
            && self.attrs.iter().all(|m| m.matches(elem))
    }
}

/// Comma-separated list of compound selectors
#[derive(Debug, Clone, Default)]
pub struct SelectorList {
    selectors: Vec<CompoundSelector>,
}

impl SelectorList {
    /// Parse a comma-separated selector list
    pub fn parse(s: &str) -> Result<Self, SelectorError> {
        let selectors = s
            .split(',')
            .map(CompoundSelector::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if selectors.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { selectors })
    }

    /// List that matches nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether any compound in the list matches
    pub fn matches(&self, elem: &ElementData) -> bool {
        self.selectors.iter().any(|sel| sel.matches(elem))
    }
}
