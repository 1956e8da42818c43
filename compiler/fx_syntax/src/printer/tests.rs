use super::*;
use crate::{RecordParts, SourceList};
use fx_ir::{DName, Span, Token, VariadicOp};
use pretty_assertions::assert_eq;

fn tok(kind: TokenKind) -> Token {
    Token::new(kind, Span::new(0, 0))
}

fn ident(text: &str) -> Identifier {
    Identifier::new(DName::new(text), tok(TokenKind::Ident(DName::new(text))))
}

fn name(tree: &mut SyntaxTree, text: &str) -> NodeId {
    tree.first_name(ident(text), SourceList::empty())
}

fn num(tree: &mut SyntaxTree, value: f64) -> NodeId {
    tree.num_lit(tok(TokenKind::num(value)), SourceList::empty())
}

fn binary(tree: &mut SyntaxTree, op: BinaryOp, kind: TokenKind, left: NodeId, right: NodeId) -> NodeId {
    tree.binary_op(op, left, right, tok(kind), SourceList::empty())
}

fn call(tree: &mut SyntaxTree, head: &str, args: Vec<NodeId>) -> NodeId {
    let args = tree.list(tok(TokenKind::ParenOpen), args, Vec::new(), SourceList::empty());
    let head = ident(head);
    tree.call(
        head.token.clone(),
        head,
        None,
        args,
        Some(tok(TokenKind::ParenClose)),
        SourceList::empty(),
    )
}

#[test]
fn test_parentheses_follow_precedence() {
    let mut tree = SyntaxTree::new();
    let (a, b, c) = (name(&mut tree, "a"), name(&mut tree, "b"), name(&mut tree, "c"));
    let sum = binary(&mut tree, BinaryOp::Add, TokenKind::Add, a, b);
    let product = binary(&mut tree, BinaryOp::Mul, TokenKind::Mul, sum, c);
    assert_eq!(print_node(&tree, product), "(a + b) * c");

    let (d, e, f) = (name(&mut tree, "d"), name(&mut tree, "e"), name(&mut tree, "f"));
    let inner = binary(&mut tree, BinaryOp::Mul, TokenKind::Mul, e, f);
    let outer = binary(&mut tree, BinaryOp::Add, TokenKind::Add, d, inner);
    assert_eq!(print_node(&tree, outer), "d + e * f");
}

#[test]
fn test_right_nested_same_precedence_keeps_parentheses() {
    let mut tree = SyntaxTree::new();
    let (a, b, c) = (name(&mut tree, "a"), name(&mut tree, "b"), name(&mut tree, "c"));
    let right = binary(&mut tree, BinaryOp::Add, TokenKind::Add, b, c);
    let sum = binary(&mut tree, BinaryOp::Add, TokenKind::Add, a, right);
    assert_eq!(tree.display(sum).to_string(), "a + (b + c)");
}

#[test]
fn test_subtraction_is_printed_as_written() {
    // The parser produces `a + (-b)` over the `-` token.
    let mut tree = SyntaxTree::new();
    let a = name(&mut tree, "a");
    let b = name(&mut tree, "b");
    let negated = tree.unary_op(UnaryOp::Minus, b, tok(TokenKind::Sub), SourceList::empty());
    let difference = binary(&mut tree, BinaryOp::Add, TokenKind::Sub, a, negated);
    assert_eq!(print_node(&tree, difference), "a - b");

    let c = name(&mut tree, "c");
    let d = name(&mut tree, "d");
    let negated = tree.unary_op(UnaryOp::Minus, d, tok(TokenKind::Sub), SourceList::empty());
    let plain = binary(&mut tree, BinaryOp::Add, TokenKind::Add, c, negated);
    assert_eq!(print_node(&tree, plain), "c + -d");
}

#[test]
fn test_keyword_operators_use_their_spelling() {
    let mut tree = SyntaxTree::new();
    let x = name(&mut tree, "x");
    let y = name(&mut tree, "y");
    let both = binary(&mut tree, BinaryOp::And, TokenKind::And, x, y);
    let negated = tree.unary_op(UnaryOp::Not, both, tok(TokenKind::Not), SourceList::empty());
    assert_eq!(print_node(&tree, negated), "Not (x And y)");

    let z = name(&mut tree, "z");
    let bang = tree.unary_op(UnaryOp::Not, z, tok(TokenKind::Bang), SourceList::empty());
    assert_eq!(print_node(&tree, bang), "!z");
}

#[test]
fn test_percent_is_postfix() {
    let mut tree = SyntaxTree::new();
    let fifty = num(&mut tree, 50.0);
    let percent = tree.unary_op(UnaryOp::Percent, fifty, tok(TokenKind::PercentSign), SourceList::empty());
    assert_eq!(print_node(&tree, percent), "50%");
}

#[test]
fn test_names_are_quoted_when_needed() {
    let mut tree = SyntaxTree::new();
    let spaced = name(&mut tree, "Due Date");
    let apostrophe = name(&mut tree, "it's");
    let at = tree.first_name(
        ident("Col").with_at_token(tok(TokenKind::At)),
        SourceList::empty(),
    );

    assert_eq!(print_node(&tree, spaced), "'Due Date'");
    assert_eq!(print_node(&tree, apostrophe), "'it''s'");
    assert_eq!(print_node(&tree, at), "@Col");
}

#[test]
fn test_literals() {
    let mut tree = SyntaxTree::new();
    let quoted = tree.str_lit(tok(TokenKind::StrLit("say \"hi\"".into())), SourceList::empty());
    let blank = tree.blank(tok(TokenKind::Ident(DName::new("Blank"))), SourceList::empty());
    let yes = tree.bool_lit(tok(TokenKind::True), SourceList::empty());
    let units = tree.units_lit(tok(TokenKind::num(5.0)), 5.0, DName::new("cm"), SourceList::empty());

    assert_eq!(print_node(&tree, quoted), "\"say \"\"hi\"\"\"");
    assert_eq!(print_node(&tree, blank), "Blank()");
    assert_eq!(print_node(&tree, yes), "true");
    assert_eq!(print_node(&tree, units), "5 cm");
}

#[test]
fn test_chain_inside_arguments_is_parenthesized() {
    let mut tree = SyntaxTree::new();
    let a = name(&mut tree, "a");
    let b = name(&mut tree, "b");
    let semi = tok(TokenKind::Semicolon);
    let chain = tree.variadic_op(VariadicOp::Chain, vec![a, b], vec![semi.clone()], semi, SourceList::empty());
    let one = num(&mut tree, 1.0);
    let call = call(&mut tree, "If", vec![one, chain]);

    assert_eq!(print_node(&tree, chain), "a; b");
    assert_eq!(print_node(&tree, call), "If(1, (a; b))");
}

#[test]
fn test_record_and_table() {
    let mut tree = SyntaxTree::new();
    let restriction = name(&mut tree, "Accounts");
    let one = num(&mut tree, 1.0);
    let record = tree.record(
        tok(TokenKind::CurlyOpen),
        RecordParts {
            fields: vec![(ident("a"), one)],
            source_restriction: Some(restriction),
            curly_close: Some(tok(TokenKind::CurlyClose)),
            ..RecordParts::default()
        },
        SourceList::empty(),
    );
    let two = num(&mut tree, 2.0);
    let table = tree.table(
        tok(TokenKind::BracketOpen),
        vec![record, two],
        vec![tok(TokenKind::Comma)],
        Some(tok(TokenKind::BracketClose)),
        SourceList::empty(),
    );

    assert_eq!(print_node(&tree, table), "[Accounts {a: 1}, 2]");
}

#[test]
fn test_interpolation_escapes_text() {
    let mut tree = SyntaxTree::new();
    let text = tree.str_lit(tok(TokenKind::StrLit("a{".into())), SourceList::empty());
    let x = name(&mut tree, "x");
    let interp = tree.str_interp(
        tok(TokenKind::StrInterpStart),
        vec![text, x],
        Some(tok(TokenKind::StrInterpEnd)),
        SourceList::empty(),
    );
    assert_eq!(print_node(&tree, interp), "$\"a{{{x}\"");
}

#[test]
fn test_type_forms() {
    let mut tree = SyntaxTree::new();
    let number = name(&mut tree, "Number");
    let literal = tree.type_literal(tok(TokenKind::Ident(DName::new("Type"))), number, SourceList::empty());
    let accounts = name(&mut tree, "Accounts");
    let record_of = tree.record_of(tok(TokenKind::Ident(DName::new("RecordOf"))), accounts, SourceList::empty());
    let orders = name(&mut tree, "Orders");
    let as_node = tree.as_node(orders, ident("o"), tok(TokenKind::As), SourceList::empty());

    assert_eq!(print_node(&tree, literal), "Type(Number)");
    assert_eq!(print_node(&tree, record_of), "RecordOf(Accounts)");
    assert_eq!(print_node(&tree, as_node), "Orders As o");
}
