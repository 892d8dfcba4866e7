use tinyc::lang::{ast::*, parse_str, ErrorCode};

fn var(col: std::ops::Range<usize>, name: &str) -> Box<Node> {
    Box::new(Node::Var(col, name.into()))
}

fn int(col: std::ops::Range<usize>, n: i64) -> Box<Node> {
    Box::new(Node::Const(col, Literal::Integer(n)))
}

#[test]
fn test_assignment() {
    let answer = Node::Main(Box::new(Node::Expr(
        0..1,
        Box::new(Node::Set(0..1, "x".into(), int(4..5, 1))),
    )));
    assert_eq!(parse_str("x = 1;"), Ok(answer));
}

#[test]
fn test_if_else() {
    let answer = Node::Main(Box::new(Node::If2(
        0..2,
        var(4..5, "a"),
        Box::new(Node::Empty(7..8)),
        Box::new(Node::Empty(14..15)),
    )));
    assert_eq!(parse_str("if (a) ; else ;"), Ok(answer));
}

#[test]
fn test_left_associative() {
    let answer = Node::Main(Box::new(Node::Stdout(
        0..4,
        Box::new(Node::Sub(
            11..12,
            Box::new(Node::Sub(7..8, int(5..6, 1), int(9..10, 2))),
            int(13..14, 3),
        )),
    )));
    assert_eq!(parse_str("puts 1 - 2 - 3;"), Ok(answer));
}

#[test]
fn test_labels() {
    let answer = Node::Main(Box::new(Node::Seq(
        0..14,
        vec![
            Node::Mark(0..3, "top".into()),
            Node::Goto(5..9, "top".into()),
        ],
    )));
    assert_eq!(parse_str("top: goto top;"), Ok(answer));
}

#[test]
fn test_empty_program() {
    assert_eq!(
        parse_str(""),
        Ok(Node::Main(Box::new(Node::Empty(0..0))))
    );
}

#[test]
fn test_array_get() {
    let answer = Node::Main(Box::new(Node::Stdout(
        0..4,
        Box::new(Node::ArrayGet(
            6..7,
            var(5..6, "a"),
            int(7..8, 0),
        )),
    )));
    assert_eq!(parse_str("puts a[0];"), Ok(answer));
}

#[test]
fn test_syntax_errors() {
    let err = parse_str("puts 1").unwrap_err();
    assert!(err.is(ErrorCode::SyntaxError));
    assert_eq!(err.text(), "EXPECTED SEMICOLON");
    let err = parse_str("{ puts 1;").unwrap_err();
    assert_eq!(err.text(), "EXPECTED RIGHT BRACE");
    let err = parse_str("x = ;").unwrap_err();
    assert_eq!(err.text(), "EXPECTED EXPRESSION");
    let err = parse_str("goto 5;").unwrap_err();
    assert_eq!(err.text(), "EXPECTED IDENTIFIER");
    let err = parse_str("puts 99999999999999999999;").unwrap_err();
    assert!(err.is(ErrorCode::Overflow));
}

#[test]
fn test_unterminated_string() {
    let err = parse_str(r#"puts "abc;"#).unwrap_err();
    assert!(err.is(ErrorCode::SyntaxError));
    assert_eq!(err.text(), "EXPECTED EXPRESSION");
}
