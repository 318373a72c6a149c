//! Inline style store
//!
//! Insertion-ordered property list mirroring `element.style`. Writes report
//! whether they changed anything; clearing a property restores the inherited
//! default (absence), never a hardcoded value.

/// Inline style declaration block
#[derive(Debug, Clone, Default)]
pub struct InlineStyle {
    props: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a `style="..."` attribute value
    pub fn parse(css: &str) -> Self {
        let mut style = Self::new();
        for decl in css.split(';') {
            if let Some((prop, value)) = decl.split_once(':') {
                let prop = prop.trim();
                let value = value.trim();
                if !prop.is_empty() && !value.is_empty() {
                    style.set(prop, value);
                }
            }
        }
        style
    }

    /// Get a property value
    pub fn get(&self, prop: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; returns true when the stored value actually changed
    pub fn set(&mut self, prop: &str, value: &str) -> bool {
        match self.props.iter_mut().find(|(p, _)| p == prop) {
            Some((_, v)) => {
                if v == value {
                    false
                } else {
                    *v = value.to_string();
                    true
                }
            }
            None => {
                self.props.push((prop.to_string(), value.to_string()));
                true
            }
        }
    }

    /// Remove a property; returns true when it was present
    pub fn remove(&mut self, prop: &str) -> bool {
        let before = self.props.len();
        self.props.retain(|(p, _)| p != prop);
        self.props.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Serialize back to `prop: value; ...` form
    pub fn css_text(&self) -> String {
        self.props
            .iter()
            .map(|(p, v)| format!("{}: {}", p, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
