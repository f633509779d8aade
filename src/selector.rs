use select::node::Node;
use select::predicate::Predicate;
use serde::{Deserialize, Serialize};

/// Structured CSS selector usable as a `select` predicate.
///
/// Site adapters describe the article container and the blocks to skip with
/// these, so the same rules can be logged, serialized, and matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CssSelector {
    /// Element name, e.g. `aside`
    Tag(String),

    /// One entry of the `class` attribute
    Class(String),

    Id(String),

    And(Vec<CssSelector>),

    Or(Vec<CssSelector>),

    Descendant {
        ancestor: Box<CssSelector>,
        descendant: Box<CssSelector>,
    },

    Child {
        parent: Box<CssSelector>,
        child: Box<CssSelector>,
    },
}

impl CssSelector {
    /// Parses the small CSS subset adapters need: compound selectors such as
    /// `div.layout-article` or `#main`, whitespace descendants, `>` children,
    /// and `,` alternatives.
    pub fn parse(input: &str) -> Option<Self> {
        let alternatives: Vec<_> = input
            .split(',')
            .map(Self::parse_chain)
            .collect::<Option<_>>()?;

        match alternatives.len() {
            0 => None,
            1 => alternatives.into_iter().next(),
            _ => Some(CssSelector::Or(alternatives)),
        }
    }

    fn parse_chain(input: &str) -> Option<Self> {
        let spaced = input.replace('>', " > ");
        let mut tokens = spaced.split_whitespace();
        let mut current = Self::parse_compound(tokens.next()?)?;

        while let Some(token) = tokens.next() {
            current = if token == ">" {
                CssSelector::Child {
                    parent: Box::new(current),
                    child: Box::new(Self::parse_compound(tokens.next()?)?),
                }
            } else {
                CssSelector::Descendant {
                    ancestor: Box::new(current),
                    descendant: Box::new(Self::parse_compound(token)?),
                }
            };
        }
        Some(current)
    }

    fn parse_compound(token: &str) -> Option<Self> {
        let mut parts = Vec::new();
        let mut rest = token;

        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            parts.push(CssSelector::Tag(rest[..tag_end].to_lowercase()));
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            parts.push(match marker {
                '.' => CssSelector::Class(name.to_string()),
                _ => CssSelector::Id(name.to_string()),
            });
            rest = &body[end..];
        }

        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(CssSelector::And(parts)),
        }
    }

    /// Renders the selector back as CSS text.
    pub fn to_css_string(&self) -> String {
        match self {
            CssSelector::Tag(tag) => tag.clone(),
            CssSelector::Class(cls) => format!(".{}", cls),
            CssSelector::Id(id) => format!("#{}", id),
            CssSelector::And(selectors) => selectors
                .iter()
                .map(|s| s.to_css_string())
                .collect::<Vec<_>>()
                .join(""),
            CssSelector::Or(selectors) => selectors
                .iter()
                .map(|s| s.to_css_string())
                .collect::<Vec<_>>()
                .join(", "),
            CssSelector::Descendant {
                ancestor,
                descendant,
            } => format!(
                "{} {}",
                ancestor.to_css_string(),
                descendant.to_css_string()
            ),
            CssSelector::Child { parent, child } => {
                format!("{} > {}", parent.to_css_string(), child.to_css_string())
            }
        }
    }
}

impl Predicate for CssSelector {
    fn matches(&self, node: &Node) -> bool {
        match self {
            CssSelector::Tag(tag) => node.name() == Some(tag.as_str()),
            CssSelector::Class(cls) => node
                .attr("class")
                .map(|classes| classes.split_whitespace().any(|c| c == cls))
                .unwrap_or(false),
            CssSelector::Id(id) => node.attr("id") == Some(id.as_str()),
            CssSelector::And(selectors) => selectors.iter().all(|s| s.matches(node)),
            CssSelector::Or(selectors) => selectors.iter().any(|s| s.matches(node)),
            CssSelector::Descendant {
                ancestor,
                descendant,
            } => {
                if !descendant.matches(node) {
                    return false;
                }
                let mut current = node.parent();
                while let Some(parent) = current {
                    if ancestor.matches(&parent) {
                        return true;
                    }
                    current = parent.parent();
                }
                false
            }
            CssSelector::Child { parent, child } => {
                child.matches(node) && node.parent().map(|p| parent.matches(&p)).unwrap_or(false)
            }
        }
    }
}

impl<'a> Predicate for &'a CssSelector {
    fn matches(&self, node: &Node) -> bool {
        (*self).matches(node)
    }
}
