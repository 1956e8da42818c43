//! Node identity: ids, minimum child ids, depth, parents and `in_tree`.

mod common;

use common::{subtree, Formula};
use fx_ir::{BinaryOp, Span, Token, TokenKind, UnaryOp};
use fx_syntax::{NodeId, NodeTag, SourceItem, SourceList, SyntaxTree};
use pretty_assertions::assert_eq;

/// `If(a + 1 > 2, [x, y], {v: Parent.w})`
fn sample() -> (Formula, NodeId) {
    let mut f = Formula::new();
    let root = f.call("If", 3, |f, i| match i {
        0 => {
            let a = f.name("a");
            let sum = f.binary(a, BinaryOp::Add, |f| f.num(1.0));
            f.binary(sum, BinaryOp::Greater, |f| f.num(2.0))
        }
        1 => f.table(2, |f, j| f.name(if j == 0 { "x" } else { "y" })),
        _ => f.record(&["v"], |f, _| {
            let parent = f.parent();
            f.dotted(parent, "w")
        }),
    });
    (f, root)
}

fn assert_identity_invariants(tree: &SyntaxTree) {
    for (index, node) in tree.nodes().iter().enumerate() {
        assert_eq!(node.id().index(), index);
        assert!(node.min_child_id() <= node.id());

        let children = node.children();
        match children.iter().map(|&c| tree.node(c).depth()).max() {
            None => assert_eq!(node.depth(), 1, "leaf {:?}", node.id()),
            Some(deepest) => assert_eq!(node.depth(), deepest + 1, "{:?}", node.id()),
        }
        for &child in &children {
            assert!(child < node.id(), "child {child:?} allocated after {:?}", node.id());
            assert_eq!(tree.parent(child), Some(node.id()));
        }
    }
}

#[test]
fn ids_are_dense_and_increasing() {
    let (f, root) = sample();
    assert_identity_invariants(&f.tree);
    assert_eq!(root.index(), f.tree.len() - 1);
}

#[test]
fn min_child_id_bounds_every_descendant() {
    let (f, root) = sample();
    for id in subtree(&f.tree, root) {
        let node = f.tree.node(id);
        for descendant in subtree(&f.tree, id) {
            assert!(node.min_child_id() <= descendant && descendant <= node.id());
            assert!(f.tree.in_tree(descendant, id));
        }
    }
}

#[test]
fn in_tree_separates_siblings() {
    let (f, root) = sample();
    let args = f.tree.node(root).cast_call().args;
    assert_eq!(f.tree.node(args).cast_list().delimiters.len(), 2);

    let children = f.tree.node(args).children();
    let (condition, table, record) = (children[0], children[1], children[2]);
    for (a, b) in [(condition, table), (table, record), (condition, record)] {
        assert!(!f.tree.in_tree(a, b));
        assert!(!f.tree.in_tree(b, a));
    }
    for id in [condition, table, record] {
        assert!(f.tree.in_tree(id, id));
        assert!(f.tree.in_tree(id, root));
        assert!(!f.tree.in_tree(root, id));
    }
}

#[test]
fn depth_counts_levels() {
    let mut f = Formula::new();
    let one = f.num(1.0);
    assert_eq!(f.tree.node(one).depth(), 1);

    let sum = f.binary(one, BinaryOp::Add, |f| {
        let two = f.num(2.0);
        f.percent(two)
    });
    // sum -> percent -> 2
    assert_eq!(f.tree.node(sum).depth(), 3);
}

#[test]
fn root_has_no_parent() {
    let (f, root) = sample();
    assert_eq!(f.tree.parent(root), None);
    let orphans: Vec<_> = f
        .tree
        .nodes()
        .iter()
        .filter(|n| n.parent().is_none())
        .map(|n| n.id())
        .collect();
    assert_eq!(orphans, vec![root]);
}

#[test]
fn top_most_dotted_parent() {
    let mut f = Formula::new();
    let a = f.name("A");
    let ab = f.dotted(a, "B");
    let abc = f.dotted(ab, "C");
    let sum = f.binary(abc, BinaryOp::Add, |f| f.num(1.0));

    assert_eq!(f.tree.find_top_most_dotted_parent_or_self(a), abc);
    assert_eq!(f.tree.find_top_most_dotted_parent_or_self(ab), abc);
    assert_eq!(f.tree.find_top_most_dotted_parent_or_self(abc), abc);
    assert_eq!(f.tree.find_top_most_dotted_parent_or_self(sum), sum);
    assert_eq!(f.tree.node(abc).tag(), NodeTag::DottedName);
}

#[test]
#[should_panic(expected = "already belongs to")]
fn child_cannot_have_two_parents() {
    let mut f = Formula::new();
    let shared = f.num(1.0);
    let _first = f.percent(shared);
    let _second = f.percent(shared);
}

#[test]
#[should_panic(expected = "already belongs to")]
fn child_cannot_appear_twice_in_one_node() {
    let mut f = Formula::new();
    let a = f.name("a");
    let plus = Token::new(TokenKind::Add, Span::new(1, 2));
    f.tree.binary_op(BinaryOp::Add, a, a, plus, SourceList::empty());
}

#[test]
#[should_panic(expected = "which is not one of its children")]
fn source_list_cannot_refer_to_a_sibling() {
    let mut f = Formula::new();
    let a = f.name("a");
    let b = f.name("b");
    let minus = Token::new(TokenKind::Sub, Span::new(0, 1));
    let source = SourceList::new(vec![SourceItem::Token(minus.clone()), SourceItem::Node(b)]);
    f.tree.unary_op(UnaryOp::Minus, a, minus, source);
}

#[test]
#[should_panic(expected = "which is not one of its children")]
fn source_list_cannot_refer_to_its_own_node() {
    let mut f = Formula::new();
    let a = f.name("a");
    let next = NodeId::new(u32::try_from(f.tree.len()).unwrap_or(u32::MAX));
    let minus = Token::new(TokenKind::Sub, Span::new(0, 1));
    let source = SourceList::new(vec![SourceItem::Node(next), SourceItem::Node(a)]);
    f.tree.unary_op(UnaryOp::Minus, a, minus, source);
}

#[test]
fn uses_chains_is_cached_per_node() {
    let mut f = Formula::new();
    let chain = f.chain(2, |f, i| f.num(i as f64));
    let wrapped = f.call("Set", 1, |_, _| chain);
    let plain = f.num(3.0);

    assert!(f.tree.uses_chains(chain));
    assert!(f.tree.uses_chains(wrapped));
    assert!(!f.tree.uses_chains(plain));
    // Second read hits the cache.
    assert!(f.tree.uses_chains(wrapped));
}

#[test]
fn tracing_setup_is_repeatable() {
    fx_syntax::init_tracing();
    fx_syntax::init_tracing();
    let mut f = Formula::new();
    let one = f.num(1.0);
    let copy = f.tree.clone_subtree(one, Span::new(0, 1));
    assert_eq!(f.tree.node(copy).depth(), 1);
}
