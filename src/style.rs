// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Presentation attributes resolving.

use crate::svgtree::{AId, EnumFromStr, SvgNode};

/// A fill rule.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl_enum_default!(FillRule, EvenOdd);

impl_enum_from_str!(FillRule,
    "nonzero" => FillRule::NonZero,
    "evenodd" => FillRule::EvenOdd
);

impl FillRule {
    /// Parses a resolved `fill-rule` value.
    ///
    /// Anything that is not `evenodd` is `nonzero`. A missing value is `evenodd`.
    pub fn from_value(value: Option<&str>) -> FillRule {
        match value {
            Some(v) => FillRule::enum_from_str(v).unwrap_or(FillRule::NonZero),
            None => FillRule::default(),
        }
    }
}

/// A stroke line cap.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl_enum_default!(LineCap, Butt);

impl_enum_from_str!(LineCap,
    "butt" => LineCap::Butt,
    "round" => LineCap::Round,
    "square" => LineCap::Square
);

/// A stroke line join.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl_enum_default!(LineJoin, Miter);

impl_enum_from_str!(LineJoin,
    "miter" => LineJoin::Miter,
    "round" => LineJoin::Round,
    "bevel" => LineJoin::Bevel
);

/// Read access to a node and its ancestors.
///
/// Implemented by [`SvgNode`], but resolving doesn't depend on it.
pub trait StyleNode<'a>: Copy {
    /// Returns the parent node.
    fn parent_node(&self) -> Option<Self>;

    /// Returns the value of an element attribute.
    fn declared_attribute(&self, aid: AId) -> Option<&'a str>;

    /// Returns the value of a `style` declaration.
    fn declared_style(&self, aid: AId) -> Option<&'a str>;

    /// Returns the node's own value. A `style` declaration wins over an attribute.
    fn own_value(&self, aid: AId) -> Option<&'a str> {
        self.declared_style(aid)
            .or_else(|| self.declared_attribute(aid))
            .map(str::trim)
    }
}

impl<'a, 'input: 'a> StyleNode<'a> for SvgNode<'a, 'input> {
    #[inline]
    fn parent_node(&self) -> Option<Self> {
        self.parent_element()
    }

    #[inline]
    fn declared_attribute(&self, aid: AId) -> Option<&'a str> {
        self.attribute(aid)
    }

    #[inline]
    fn declared_style(&self, aid: AId) -> Option<&'a str> {
        self.style_value(aid)
    }
}

const CURRENT_COLOR: &str = "currentColor";
const DEFAULT_COLOR: &str = "black";

fn supports_current_color(aid: AId) -> bool {
    matches!(
        aid,
        AId::Fill | AId::FillRule | AId::SolidColor | AId::StopColor | AId::Stroke
    )
}

/// Resolves an inheritable property.
///
/// Returns the node's own value or the value of the nearest ancestor,
/// skipping `inherit`. Returns `None` when nobody has it.
///
/// `currentColor` is replaced with the `color` visible from `node`.
pub fn resolve<'a, N: StyleNode<'a>>(node: N, aid: AId) -> Option<&'a str> {
    let mut curr = Some(node);
    while let Some(n) = curr {
        match n.own_value(aid) {
            Some("inherit") | None => curr = n.parent_node(),
            Some(CURRENT_COLOR) if supports_current_color(aid) => {
                return Some(resolve_current_color(node));
            }
            Some(value) => return Some(value),
        }
    }

    None
}

/// Resolves a non-inheritable color property, like `stop-color`.
///
/// Only an explicit `inherit` is looked up in the parent.
/// Defaults to black.
pub fn resolve_own_color<'a, N: StyleNode<'a>>(node: N, aid: AId) -> &'a str {
    let mut curr = node;
    loop {
        match curr.own_value(aid) {
            Some("inherit") => match curr.parent_node() {
                Some(parent) => curr = parent,
                None => return DEFAULT_COLOR,
            },
            Some(CURRENT_COLOR) => return resolve_current_color(node),
            Some(value) => return value,
            None => return DEFAULT_COLOR,
        }
    }
}

fn resolve_current_color<'a, N: StyleNode<'a>>(node: N) -> &'a str {
    resolve(node, AId::Color).unwrap_or(DEFAULT_COLOR)
}

/// Resolved presentation attributes of a drawable element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct AttributeSet<'a> {
    /// Defaults to `black`.
    pub fill: &'a str,
    pub fill_rule: Option<&'a str>,
    /// `None` means no stroke.
    pub stroke: Option<&'a str>,
    pub stroke_width: Option<&'a str>,
    pub stroke_linecap: Option<&'a str>,
    pub stroke_linejoin: Option<&'a str>,
    pub stroke_miterlimit: Option<&'a str>,
    pub stroke_dasharray: Option<&'a str>,
    pub stroke_dashoffset: Option<&'a str>,
    /// Transform lists of all ancestors and the node itself, outer to inner.
    pub transform: Vec<&'a str>,
}

impl<'a> AttributeSet<'a> {
    /// Resolves all attributes of a node.
    pub fn resolve<N: StyleNode<'a>>(node: N) -> Self {
        let mut transform = Vec::new();
        let mut curr = Some(node);
        while let Some(n) = curr {
            if let Some(ts) = n.declared_attribute(AId::Transform) {
                transform.push(ts);
            }
            curr = n.parent_node();
        }
        transform.reverse();

        AttributeSet {
            fill: resolve(node, AId::Fill).unwrap_or(DEFAULT_COLOR),
            fill_rule: resolve(node, AId::FillRule),
            stroke: resolve(node, AId::Stroke),
            stroke_width: resolve(node, AId::StrokeWidth),
            stroke_linecap: resolve(node, AId::StrokeLinecap),
            stroke_linejoin: resolve(node, AId::StrokeLinejoin),
            stroke_miterlimit: resolve(node, AId::StrokeMiterlimit),
            stroke_dasharray: resolve(node, AId::StrokeDasharray),
            stroke_dashoffset: resolve(node, AId::StrokeDashoffset),
            transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockData {
        parent: Option<usize>,
        attrs: Vec<(AId, &'static str)>,
        style: Vec<(AId, &'static str)>,
    }

    #[derive(Clone, Copy)]
    struct MockNode<'a> {
        tree: &'a [MockData],
        idx: usize,
    }

    impl<'a> StyleNode<'a> for MockNode<'a> {
        fn parent_node(&self) -> Option<Self> {
            self.tree[self.idx].parent.map(|idx| MockNode {
                tree: self.tree,
                idx,
            })
        }

        fn declared_attribute(&self, aid: AId) -> Option<&'a str> {
            self.tree[self.idx]
                .attrs
                .iter()
                .find(|(a, _)| *a == aid)
                .map(|(_, v)| *v)
        }

        fn declared_style(&self, aid: AId) -> Option<&'a str> {
            self.tree[self.idx]
                .style
                .iter()
                .find(|(a, _)| *a == aid)
                .map(|(_, v)| *v)
        }
    }

    // Builds a chain where each node is the parent of the next one.
    fn chain(nodes: Vec<Vec<(AId, &'static str)>>) -> Vec<MockData> {
        nodes
            .into_iter()
            .enumerate()
            .map(|(i, attrs)| MockData {
                parent: if i == 0 { None } else { Some(i - 1) },
                attrs,
                style: Vec::new(),
            })
            .collect()
    }

    fn leaf(tree: &[MockData]) -> MockNode {
        MockNode {
            tree,
            idx: tree.len() - 1,
        }
    }

    #[test]
    fn inherited_from_ancestor() {
        let tree = chain(vec![vec![(AId::Fill, "red")], vec![], vec![]]);
        assert_eq!(resolve(leaf(&tree), AId::Fill), Some("red"));
    }

    #[test]
    fn explicit_inherit_is_skipped() {
        let tree = chain(vec![
            vec![(AId::Fill, "blue")],
            vec![(AId::Fill, "inherit")],
            vec![],
        ]);
        assert_eq!(resolve(leaf(&tree), AId::Fill), Some("blue"));
    }

    #[test]
    fn missing_everywhere() {
        let tree = chain(vec![vec![], vec![(AId::Fill, "inherit")]]);
        assert_eq!(resolve(leaf(&tree), AId::Fill), None);
        assert_eq!(resolve(leaf(&tree), AId::Stroke), None);
    }

    #[test]
    fn current_color() {
        let tree = chain(vec![
            vec![(AId::Color, "green")],
            vec![(AId::Fill, "currentColor")],
        ]);
        assert_eq!(resolve(leaf(&tree), AId::Fill), Some("green"));
    }

    #[test]
    fn inherited_current_color_uses_node_color() {
        let tree = chain(vec![
            vec![(AId::Color, "green"), (AId::Stroke, "currentColor")],
            vec![(AId::Color, "blue")],
        ]);
        assert_eq!(resolve(leaf(&tree), AId::Stroke), Some("blue"));
    }

    #[test]
    fn current_color_without_color() {
        let tree = chain(vec![vec![(AId::Stroke, "currentColor")]]);
        assert_eq!(resolve(leaf(&tree), AId::Stroke), Some("black"));
    }

    #[test]
    fn current_color_is_kept_for_other_properties() {
        let tree = chain(vec![vec![(AId::StrokeWidth, "currentColor")]]);
        assert_eq!(resolve(leaf(&tree), AId::StrokeWidth), Some("currentColor"));
    }

    #[test]
    fn style_wins() {
        let tree = vec![MockData {
            parent: None,
            attrs: vec![(AId::Fill, "red")],
            style: vec![(AId::Fill, " blue ")],
        }];
        assert_eq!(resolve(leaf(&tree), AId::Fill), Some("blue"));
    }

    #[test]
    fn stop_color_is_not_inherited() {
        let tree = chain(vec![vec![(AId::StopColor, "red")], vec![]]);
        assert_eq!(resolve_own_color(leaf(&tree), AId::StopColor), "black");

        let tree = chain(vec![
            vec![(AId::StopColor, "red")],
            vec![(AId::StopColor, "inherit")],
        ]);
        assert_eq!(resolve_own_color(leaf(&tree), AId::StopColor), "red");
    }

    #[test]
    fn attribute_set_defaults() {
        let tree = chain(vec![vec![]]);
        let attrs = AttributeSet::resolve(leaf(&tree));
        assert_eq!(attrs.fill, "black");
        assert_eq!(attrs.stroke, None);
        assert_eq!(attrs.fill_rule, None);
        assert!(attrs.transform.is_empty());
    }

    #[test]
    fn transforms_are_outer_to_inner() {
        let tree = chain(vec![
            vec![(AId::Transform, "translate(10)")],
            vec![],
            vec![(AId::Transform, "scale(2)")],
        ]);
        let attrs = AttributeSet::resolve(leaf(&tree));
        assert_eq!(attrs.transform, vec!["translate(10)", "scale(2)"]);
    }

    #[test]
    fn fill_rule() {
        assert_eq!(FillRule::from_value(None), FillRule::EvenOdd);
        assert_eq!(FillRule::from_value(Some("evenodd")), FillRule::EvenOdd);
        assert_eq!(FillRule::from_value(Some("nonzero")), FillRule::NonZero);
        assert_eq!(FillRule::from_value(Some("red")), FillRule::NonZero);
    }
}
