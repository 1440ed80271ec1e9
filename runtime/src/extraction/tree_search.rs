//! First-match depth-first search over document trees.
//!
//! The search is generic over anything that can hand out its first child and
//! next sibling, so it works on `ego_tree` nodes (what `scraper` produces) as
//! well as on any other sibling-linked tree. Traversal uses an explicit stack,
//! so deeply nested documents cannot overflow the call stack.

use ego_tree::NodeRef;
use scraper::Node;

/// A node in a first-child / next-sibling linked tree.
pub trait TreeNode: Copy {
    fn first_child(&self) -> Option<Self>;
    fn next_sibling(&self) -> Option<Self>;
}

impl<'a, T: 'a> TreeNode for NodeRef<'a, T> {
    fn first_child(&self) -> Option<Self> {
        NodeRef::first_child(self)
    }

    fn next_sibling(&self) -> Option<Self> {
        NodeRef::next_sibling(self)
    }
}

/// Find the first descendant of `root` in preorder for which `predicate` holds.
///
/// Children are visited before the next sibling, siblings left to right.
/// `root` itself is not tested. A `None` root is an empty tree and yields `None`.
pub fn find_first<N, P>(root: Option<N>, mut predicate: P) -> Option<N>
where
    N: TreeNode,
    P: FnMut(&N) -> bool,
{
    let mut stack: Vec<N> = root.and_then(|r| r.first_child()).into_iter().collect();

    while let Some(node) = stack.pop() {
        if predicate(&node) {
            return Some(node);
        }
        // Sibling goes under the child so the child's subtree is drained first.
        if let Some(next) = node.next_sibling() {
            stack.push(next);
        }
        if let Some(child) = node.first_child() {
            stack.push(child);
        }
    }

    None
}

/// Element named `tag` whose `class` attribute contains `class` as a substring.
pub fn is_element_with_class(node: &NodeRef<'_, Node>, tag: &str, class: &str) -> bool {
    node.value().as_element().is_some_and(|el| {
        el.name() == tag && el.attr("class").is_some_and(|value| value.contains(class))
    })
}

/// Any text node.
pub fn is_text(node: &NodeRef<'_, Node>) -> bool {
    node.value().is_text()
}

pub fn find_element_by_class<'a>(
    root: Option<NodeRef<'a, Node>>,
    tag: &str,
    class: &str,
) -> Option<NodeRef<'a, Node>> {
    find_first(root, |node| is_element_with_class(node, tag, class))
}

pub fn find_text<'a>(root: Option<NodeRef<'a, Node>>) -> Option<NodeRef<'a, Node>> {
    find_first(root, is_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ego_tree::{tree, Tree};
    use scraper::Html;

    fn text_of(node: NodeRef<'_, Node>) -> String {
        node.value().as_text().map(|t| String::from(&**t)).unwrap_or_default()
    }

    #[test]
    fn test_preorder_visits_children_before_siblings() {
        let t = tree!("root" => { "a" => { "a1", "a2" }, "b" => { "b1" } });
        let mut visited = Vec::new();
        let found = find_first(Some(t.root()), |n| {
            visited.push(*n.value());
            false
        });
        assert!(found.is_none());
        assert_eq!(visited, vec!["a", "a1", "a2", "b", "b1"]);
    }

    #[test]
    fn test_first_match_wins() {
        let t = tree!("root" => { "x" => { "hit-deep" }, "hit-shallow" });
        let found = find_first(Some(t.root()), |n| n.value().starts_with("hit"));
        assert_eq!(found.map(|n| *n.value()), Some("hit-deep"));
    }

    #[test]
    fn test_root_is_not_tested() {
        let t = tree!("hit" => { "miss" });
        let found = find_first(Some(t.root()), |n| *n.value() == "hit");
        assert!(found.is_none());
    }

    #[test]
    fn test_none_root_yields_none() {
        let found = find_first(None::<NodeRef<'static, &str>>, |_| true);
        assert!(found.is_none());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut t: Tree<u32> = Tree::new(0);
        let mut id = t.root().id();
        for depth in 1..=200_000u32 {
            id = t.get_mut(id).unwrap().append(depth).id();
        }
        let found = find_first(Some(t.root()), |n| *n.value() == 200_000);
        assert_eq!(found.map(|n| *n.value()), Some(200_000));
    }

    #[test]
    fn test_element_with_class_uses_substring_match() {
        let html = Html::parse_document(
            r#"<html><body>
                <div class="mw-page-title-main">not a span</div>
                <span class="lead mw-page-title-main-extra">First</span>
                <span class="mw-page-title-main">Second</span>
            </body></html>"#,
        );
        let node = find_element_by_class(Some(html.tree.root()), "span", "mw-page-title-main")
            .expect("span should match");
        assert_eq!(find_text(Some(node)).map(text_of).as_deref(), Some("First"));
    }

    #[test]
    fn test_element_without_class_attribute_does_not_match() {
        let html = Html::parse_document("<span>bare</span><span id='mw-page-title-main'>id</span>");
        assert!(find_element_by_class(Some(html.tree.root()), "span", "mw-page-title-main").is_none());
    }

    #[test]
    fn test_find_text_descends_into_children() {
        let html = Html::parse_document(
            r#"<p class="t"><b><i>nested</i></b> tail</p>"#,
        );
        let p = find_element_by_class(Some(html.tree.root()), "p", "t").unwrap();
        assert_eq!(find_text(Some(p)).map(text_of).as_deref(), Some("nested"));
    }

    #[test]
    fn test_find_text_none_for_empty_element() {
        let html = Html::parse_document(r#"<span class="t"><img src="x.png"></span>"#);
        let span = find_element_by_class(Some(html.tree.root()), "span", "t").unwrap();
        assert!(find_text(Some(span)).is_none());
    }
}
