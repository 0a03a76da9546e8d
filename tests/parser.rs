//! End-to-end parsing tests going through [`z80asm::parse_source`].

use z80asm::diagnostics::{ErrorCode, ParseErrorMessage};
use z80asm::syntax::ast::{AssemblyLine, ExpressionKind, LineBody, OperandType, Program};

fn parse(source: &str) -> (Program, Vec<ParseErrorMessage>) {
    z80asm::parse_source(source, 0)
}

/// Parses a source expected to contain exactly one line and no errors.
fn single_line(source: &str) -> AssemblyLine {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        program.assembly_lines.len(),
        1,
        "expected a single line in {source:?}"
    );
    program.assembly_lines.into_iter().next().unwrap()
}

/// The codes of all recorded errors, in order.
fn error_codes(source: &str) -> Vec<ErrorCode> {
    let (_, errors) = parse(source);
    errors.into_iter().map(|error| error.code).collect()
}

/// Extracts the value expression of an `.equ` line.
fn equ_value(literal: &str) -> ExpressionKind {
    let line = single_line(&format!(".equ {literal}"));
    match line.body {
        LineBody::EquPragma { value } => value.kind,
        other => panic!("expected an EquPragma, got {other:?}"),
    }
}

#[test]
fn simple_instruction() {
    let line = single_line("nop");
    assert_eq!(
        line.body,
        LineBody::SimpleZ80Instruction {
            mnemonic: "NOP".into()
        }
    );
    assert_eq!(line.type_name(), "SimpleZ80Instruction");
    assert_eq!(line.line, 1);
    assert_eq!(line.start_position, 0);
    assert_eq!(line.end_position, 3);
}

#[test]
fn jr_with_condition_and_target() {
    let line = single_line("jr z,#4000");
    let LineBody::JrInstruction { operand1, operand2 } = line.body else {
        panic!("expected a JrInstruction, got {:?}", line.body);
    };
    assert_eq!(operand1.operand_type, OperandType::Condition);
    assert_eq!(operand1.register.as_deref(), Some("z"));

    let target = operand2.expect("the branch target is present");
    assert_eq!(target.operand_type, OperandType::Expression);
    let expr = target.expr.expect("an expression operand carries its tree");
    assert_eq!(expr.kind, ExpressionKind::IntegerLiteral { value: 0x4000 });
    assert_eq!(expr.source_text, "#4000");
}

#[test]
fn jr_with_single_target() {
    // The first operand is mandatory, only the second one may be absent.
    let line = single_line("jr #4000");
    let LineBody::JrInstruction { operand1, operand2 } = line.body else {
        panic!("expected a JrInstruction, got {:?}", line.body);
    };
    assert_eq!(operand1.operand_type, OperandType::Expression);
    assert!(operand2.is_none());
}

#[test]
fn condition_keeps_its_spelling() {
    let line = single_line("ret NZ");
    let LineBody::RetInstruction { condition } = line.body else {
        panic!("expected a RetInstruction, got {:?}", line.body);
    };
    let condition = condition.expect("the condition is present");
    assert_eq!(condition.register.as_deref(), Some("NZ"));
}

#[test]
fn labelled_instruction() {
    let line = single_line("Start: ld a,b");
    let label = line.label.expect("the line is labelled");
    assert_eq!(label.name, "Start");
    assert_eq!(label.start_position, 0);
    let LineBody::LdInstruction { operand1, operand2 } = line.body else {
        panic!("expected an LdInstruction, got {:?}", line.body);
    };
    assert_eq!(operand1.register.as_deref(), Some("a"));
    assert_eq!(operand2.register.as_deref(), Some("b"));
}

#[test]
fn line_span_ends_at_next_token() {
    // "nop" sits at 2..5; the newline token starts at 8, past the padding.
    let (program, errors) = parse("  nop   \nret");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(program.assembly_lines.len(), 2);
    let nop = &program.assembly_lines[0];
    assert_eq!(nop.start_position, 2);
    assert_eq!(nop.end_position, 8);
    assert_eq!(nop.start_column, 2);
    assert_eq!(nop.end_column, 8);
}

#[test]
fn binary_literal_with_separators() {
    assert_eq!(
        equ_value("%1111_0000"),
        ExpressionKind::IntegerLiteral { value: 240 }
    );
}

#[test]
fn octal_literal() {
    assert_eq!(
        equ_value("765432q"),
        ExpressionKind::IntegerLiteral { value: 0o765432 }
    );
}

#[test]
fn hexadecimal_literal_with_suffix() {
    assert_eq!(
        equ_value("12ach"),
        ExpressionKind::IntegerLiteral { value: 0x12ac }
    );
}

#[test]
fn real_literal_without_integer_part() {
    assert_eq!(equ_value(".1e+0"), ExpressionKind::RealLiteral { value: 0.1 });
}

#[test]
fn skip_pragma_with_fill() {
    let line = single_line(".skip #10, #20");
    let LineBody::SkipPragma { skip, fill } = line.body else {
        panic!("expected a SkipPragma, got {:?}", line.body);
    };
    assert_eq!(skip.kind, ExpressionKind::IntegerLiteral { value: 0x10 });
    let fill = fill.expect("the fill value is present");
    assert_eq!(fill.kind, ExpressionKind::IntegerLiteral { value: 0x20 });
}

#[test]
fn missing_operand_is_reported() {
    assert_eq!(error_codes("jr"), [ErrorCode::OperandExpected]);
}

#[test]
fn missing_comma_is_reported() {
    assert_eq!(error_codes("ld #4000"), [ErrorCode::CommaExpected]);
}

#[test]
fn for_without_assignment_is_reported() {
    assert_eq!(error_codes(".for x"), [ErrorCode::AssignExpected]);
}

#[test]
fn recovery_keeps_one_diagnostic_per_bad_line() {
    let (program, errors) = parse("jr\nnop\nld #4000\nret\n");
    let codes: Vec<_> = errors.iter().map(|error| error.code).collect();
    assert_eq!(codes, [ErrorCode::OperandExpected, ErrorCode::CommaExpected]);
    // The well-formed lines still make it into the tree.
    let kept: Vec<_> = program
        .assembly_lines
        .iter()
        .map(AssemblyLine::type_name)
        .collect();
    assert_eq!(kept, ["SimpleZ80Instruction", "RetInstruction"]);
}

#[test]
fn error_position_points_at_unconsumed_token() {
    let (_, errors) = parse("ld #4000");
    assert_eq!(errors.len(), 1);
    // The comma was expected where the line ends, at the newline slot.
    assert_eq!(errors[0].position, 8);
    assert_eq!(errors[0].line, 1);
}

#[test]
fn comment_only_line() {
    let (program, errors) = parse("; just a note\nnop");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(program.assembly_lines.len(), 2);
    let comment_line = &program.assembly_lines[0];
    assert_eq!(comment_line.body, LineBody::CommentOnlyLine);
    assert_eq!(comment_line.comment.as_deref(), Some("; just a note"));
    assert_eq!(comment_line.line, 1);
}

#[test]
fn trailing_comment_is_attached_to_the_line() {
    let line = single_line("nop ; delay");
    assert_eq!(line.comment.as_deref(), Some("; delay"));
}

#[test]
fn macro_parameter_operand_is_collected() {
    let line = single_line("ld a,{{first}}");
    assert_eq!(line.macro_params.len(), 1);
    let LineBody::LdInstruction { operand2, .. } = line.body else {
        panic!("expected an LdInstruction, got {:?}", line.body);
    };
    let expr = operand2.expr.expect("the placeholder parses as an expression");
    let ExpressionKind::MacroParameter { identifier } = expr.kind else {
        panic!("expected a MacroParameter, got {:?}", expr.kind);
    };
    assert_eq!(identifier.name, "first");
}

#[test]
fn macro_invocation_with_arguments() {
    let line = single_line("MyMacro(1, b)");
    let LineBody::MacroOrStructInvocation {
        identifier,
        operands,
    } = line.body
    else {
        panic!("expected an invocation, got {:?}", line.body);
    };
    assert_eq!(identifier.name, "MyMacro");
    assert_eq!(operands.len(), 2);
    assert_eq!(operands[0].operand_type, OperandType::Expression);
    assert_eq!(operands[1].operand_type, OperandType::Reg8);
}

#[test]
fn indexed_indirect_operand() {
    let line = single_line("ld a,(ix+2)");
    let LineBody::LdInstruction { operand2, .. } = line.body else {
        panic!("expected an LdInstruction, got {:?}", line.body);
    };
    assert_eq!(operand2.operand_type, OperandType::IndexedIndirect);
    assert_eq!(operand2.register.as_deref(), Some("ix"));
    assert_eq!(operand2.offset_sign.as_deref(), Some("+"));
    let offset = operand2.expr.expect("the displacement is present");
    assert_eq!(offset.kind, ExpressionKind::IntegerLiteral { value: 2 });
}

#[test]
fn binary_expression_spans_start_at_the_right_operand() {
    let line = single_line(".equ 2+3");
    let LineBody::EquPragma { value } = line.body else {
        panic!("expected an EquPragma, got {:?}", line.body);
    };
    let ExpressionKind::BinaryExpression {
        operator,
        left,
        right,
    } = value.kind
    else {
        panic!("expected a BinaryExpression, got {:?}", value.kind);
    };
    assert_eq!(operator, "+");
    assert_eq!(left.kind, ExpressionKind::IntegerLiteral { value: 2 });
    assert_eq!(right.kind, ExpressionKind::IntegerLiteral { value: 3 });
    // The combined node's recorded span begins at its right operand.
    assert_eq!(value.start_position, right.start_position);
}

#[test]
fn statement_block_sequence() {
    let source = "\
.loop 3
  nop
.endl
";
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    let kinds: Vec<_> = program
        .assembly_lines
        .iter()
        .map(AssemblyLine::type_name)
        .collect();
    assert_eq!(
        kinds,
        ["LoopStatement", "SimpleZ80Instruction", "LoopEndStatement"]
    );
    assert!(program.assembly_lines[0].body.is_block());
}

#[test]
fn contextual_keywords_are_not_labels() {
    let (program, errors) = parse("proc\n  ret\npend");
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    let kinds: Vec<_> = program
        .assembly_lines
        .iter()
        .map(AssemblyLine::type_name)
        .collect();
    assert_eq!(
        kinds,
        ["ProcStatement", "RetInstruction", "ProcEndStatement"]
    );
    assert!(program.assembly_lines[0].label.is_none());
}

#[test]
fn field_assignment() {
    let line = single_line("-> .defb 1, 2");
    let LineBody::FieldAssignment { assignment } = line.body else {
        panic!("expected a FieldAssignment, got {:?}", line.body);
    };
    let LineBody::DefBPragma { values } = *assignment else {
        panic!("expected a DefBPragma, got {assignment:?}");
    };
    assert_eq!(values.len(), 2);
}

#[test]
fn unrecognized_line_is_reported_once() {
    assert_eq!(error_codes(",,,"), [ErrorCode::UnrecognizedLine]);
}
