use super::*;
use crate::context::value::Type;
use crate::diagnostics::CaptureSink;
use crate::lexer::Lexer;
use super::postfix::{render, InstrKind};

fn translate(input: &str) -> ParseResult<Translation> {
    let context = Lexer::analyze(input.lines()).unwrap();
    let mut sink = CaptureSink::new();
    Parser::new(context, &mut sink).parse()
}

fn postfix_of(input: &str) -> String {
    render(&translate(input).unwrap().postfix)
}

fn error_of(input: &str) -> ParseError {
    match translate(input) {
        Err(err) => err,
        Ok(t) => panic!("expected parse error, got postfix `{}`", render(&t.postfix)),
    }
}

fn wrap(statements: &str) -> String {
    format!("program p {{ int a, b; float f; boolean ok; {{ {} }} }}", statements)
}

#[test]
fn test_end_to_end_postfix() {
    let translation = translate("program p { int x; { x = 2; print(x); } }").unwrap();
    assert_eq!(render(&translation.postfix), "x 2 = x print");
    assert_eq!(
        translation.context.ident("x").unwrap().declared_type,
        Some(Type::Int)
    );
}

#[test]
fn test_declarations_fill_types() {
    let translation =
        translate("program p { int a, b; float f; boolean ok; { } }").unwrap();
    let ctx = &translation.context;
    assert_eq!(ctx.ident("a").unwrap().declared_type, Some(Type::Int));
    assert_eq!(ctx.ident("b").unwrap().declared_type, Some(Type::Int));
    assert_eq!(ctx.ident("f").unwrap().declared_type, Some(Type::Float));
    assert_eq!(ctx.ident("ok").unwrap().declared_type, Some(Type::Bool));
    assert_eq!(ctx.ident("p").unwrap().declared_type, None);
    assert!(translation.postfix.is_empty());
}

#[test]
fn test_precedence() {
    assert_eq!(postfix_of(&wrap("a = 1 + 2 * 3;")), "a 1 2 3 * + =");
    assert_eq!(postfix_of(&wrap("a = (1 + 2) * 3;")), "a 1 2 + 3 * =");
    assert_eq!(postfix_of(&wrap("a = 1 - 2 - 3;")), "a 1 2 - 3 - =");
    assert_eq!(postfix_of(&wrap("f = a * b ^ 2 / 4;")), "f a b 2 ^ * 4 / =");
    assert_eq!(postfix_of(&wrap("f = 2 ^ 3 ^ 2;")), "f 2 3 ^ 2 ^ =");
}

#[test]
fn test_unary_sign() {
    assert_eq!(postfix_of(&wrap("a = -b + 1;")), "a 0 b - 1 + =");
    assert_eq!(postfix_of(&wrap("a = +b;")), "a b =");
}

#[test]
fn test_boolean_expressions() {
    assert_eq!(postfix_of(&wrap("ok = true;")), "ok true =");
    assert_eq!(postfix_of(&wrap("ok = a + 1 < b * 2;")), "ok a 1 + b 2 * < =");
    assert_eq!(postfix_of(&wrap("ok = (a != b);")), "ok a b != =");
    assert_eq!(postfix_of(&wrap("ok = (a) >= 1;")), "ok a 1 >= =");
}

#[test]
fn test_backtracking_discards_partial_output() {
    let translation = translate(&wrap("a = (a + 1) * 2;")).unwrap();
    assert_eq!(render(&translation.postfix), "a a 1 + 2 * =");
    assert_eq!(translation.postfix.len(), 7);
}

#[test]
fn test_io_statements() {
    assert_eq!(
        postfix_of(&wrap("input(a, b); print(a, b);")),
        "a input b input a print b print"
    );
}

#[test]
fn test_control_flow_markers() {
    assert_eq!(
        postfix_of(&wrap("if (a < b) { a = b; }")),
        "a b < a b = IF"
    );
    assert_eq!(
        postfix_of(&wrap("do { a = a + 1; } while (a < 10)")),
        "WHILE a a 1 + = a 10 < DO"
    );
    let translation = translate(&wrap("if (true) { }")).unwrap();
    assert_eq!(translation.postfix.last().unwrap().kind, InstrKind::Marker);
}

#[test]
fn test_duplicate_declaration() {
    let err = error_of("program p { int x, x; { } }");
    assert_eq!(err.error, ParseErrorType::DuplicateDeclaration("x".to_string()));

    let err = error_of("program p { int x; float x; { } }");
    assert_eq!(err.error, ParseErrorType::DuplicateDeclaration("x".to_string()));
}

#[test]
fn test_unclosed_program() {
    let err = error_of("program p { int x; { x = 1; }");
    assert_eq!(
        err.error,
        ParseErrorType::Bracket(BracketError::Unclosed(vec!['{']))
    );
}

#[test]
fn test_mismatched_bracket() {
    let err = error_of(&wrap("print(a};"));
    assert!(matches!(err.error, ParseErrorType::Bracket(BracketError::Unexpected { .. })));
}

#[test]
fn test_unexpected_elements() {
    let err = error_of("prog p { }");
    assert_eq!(err.line, 1);
    assert_eq!(
        err.error,
        ParseErrorType::UnexpectedElements {
            got: "prog".to_string(),
            got_kind: TokenKind::Ident,
            exp: "program",
            exp_kind: TokenKind::Keyword,
        }
    );
    assert!(err.to_string().starts_with("Parser Error:\n\tLine 1"));
}

#[test]
fn test_expected_assign() {
    let err = error_of(&wrap("a 1;"));
    assert_eq!(err.error, ParseErrorType::ExpectedAssign);
}

#[test]
fn test_no_valid_expression() {
    let err = error_of(&wrap("a = ;"));
    assert_eq!(err.error, ParseErrorType::NoValidExpression);

    let err = error_of(&wrap("a = * 2;"));
    assert_eq!(err.error, ParseErrorType::NoValidExpression);
}

#[test]
fn test_unexpected_statement() {
    let err = error_of(&wrap("int c;"));
    assert_eq!(err.error, ParseErrorType::UnexpectedStatement("int".to_string()));
}

#[test]
fn test_trailing_tokens() {
    let err = error_of("program p { { } } x");
    assert!(matches!(err.error, ParseErrorType::UnexpectedToken { .. }));
}

#[test]
fn test_unexpected_eof() {
    let err = error_of("program");
    assert_eq!(err.error, ParseErrorType::UnexpectedEof);
}

#[test]
fn test_errors_report_line() {
    let err = error_of("program p {\n int a;\n {\n a = 1\n }\n}");
    assert_eq!(err.line, 5);
}

#[test]
fn test_trace_lines() {
    let context = Lexer::analyze("program p { { } }".lines()).unwrap();
    let mut sink = CaptureSink::new();
    Parser::new(context, &mut sink).parse().unwrap();
    assert!(sink.contains("ParseToken: in row 1 lexeme - 'program'|token - 'keyword'"));
    assert_eq!(sink.diagnostics.len(), 6);
}

#[test]
fn test_rolled_back_tokens_are_traced_once() {
    let context = Lexer::analyze(wrap("a = a + b;").lines()).unwrap();
    let mut sink = CaptureSink::new();
    Parser::new(context, &mut sink).parse().unwrap();

    let plus = "ParseToken: in row 1 lexeme - '+'|token - 'add_op'";
    let traced: Vec<_> = sink
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::Trace(_)))
        .map(|d| d.text())
        .collect();
    assert_eq!(traced.iter().filter(|t| **t == plus).count(), 1);

    let tail = &traced[traced.len() - 5..];
    assert_eq!(
        tail,
        [
            "ParseToken: in row 1 lexeme - '+'|token - 'add_op'",
            "ParseToken: in row 1 lexeme - 'b'|token - 'ident'",
            "ParseToken: in row 1 lexeme - ';'|token - 'punct'",
            "ParseToken: in row 1 lexeme - '}'|token - 'par_op'",
            "ParseToken: in row 1 lexeme - '}'|token - 'par_op'",
        ]
    );
}
