//! Line-node trees produced by the parser.
//!
//! Each source line yields one [`AssemblyLine`]; its [`LineBody`] variant name
//! doubles as the node's wire type name (the string consumers dispatch on),
//! which is why the variants keep their full `...Pragma` / `...Statement` /
//! `...Instruction` spellings.

use compact_str::CompactString;
use strum_macros::IntoStaticStr;

/// The root node of a parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub assembly_lines: Vec<AssemblyLine>,
}

/// A single parsed source line.
///
/// `end_position`/`end_column` point at the start of the first token *after*
/// the line, so a line's span excludes its terminating newline token.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyLine {
    pub body: LineBody,
    pub label: Option<IdentifierNode>,
    pub file_index: usize,
    /// 1-based line number of the line's first token.
    pub line: usize,
    pub start_position: usize,
    pub start_column: usize,
    pub end_position: usize,
    pub end_column: usize,
    /// The last comment seen while fetching this line's tokens.
    pub comment: Option<CompactString>,
    /// Macro parameter placeholders collected anywhere within the line.
    pub macro_params: Vec<Expression>,
}

impl AssemblyLine {
    /// The wire type name of this line's body.
    pub fn type_name(&self) -> &'static str {
        (&self.body).into()
    }
}

/// An identifier with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierNode {
    pub name: CompactString,
    pub line: usize,
    pub start_position: usize,
    pub end_position: usize,
    pub start_column: usize,
    pub end_column: usize,
}

/// The body of an assembly line.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum LineBody {
    // --- Special lines
    CommentOnlyLine,
    LabelOnlyLine,

    // --- Pragmas
    OrgPragma {
        address: Expression,
    },
    BankPragma {
        bank_id: Expression,
        offset: Option<Expression>,
        noexport: bool,
    },
    XorgPragma {
        address: Expression,
    },
    EntPragma {
        address: Expression,
    },
    XentPragma {
        address: Expression,
    },
    EquPragma {
        value: Expression,
    },
    VarPragma {
        value: Expression,
    },
    DispPragma {
        offset: Expression,
    },
    DefBPragma {
        values: Vec<Expression>,
    },
    DefWPragma {
        values: Vec<Expression>,
    },
    DefMPragma {
        value: Expression,
    },
    DefNPragma {
        value: Expression,
    },
    DefHPragma {
        value: Expression,
    },
    DefCPragma {
        value: Expression,
    },
    DefGxPragma {
        pattern: Expression,
    },
    /// `.defg` keeps its raw pattern text; it is not an expression.
    DefGPragma {
        pattern: CompactString,
    },
    DefSPragma {
        count: Expression,
        fill: Option<Expression>,
    },
    SkipPragma {
        skip: Expression,
        fill: Option<Expression>,
    },
    ExternPragma,
    FillbPragma {
        count: Expression,
        fill: Expression,
    },
    FillwPragma {
        count: Expression,
        fill: Expression,
    },
    ModelPragma {
        model_id: CompactString,
    },
    AlignPragma {
        align_expr: Option<Expression>,
    },
    TracePragma {
        is_hex: bool,
        values: Vec<Expression>,
    },
    RndSeedPragma {
        seed_expr: Option<Expression>,
    },
    ErrorPragma {
        message: Expression,
    },
    IncBinPragma {
        filename: Expression,
        offset: Option<Expression>,
        length: Option<Expression>,
    },
    CompareBinPragma {
        filename: Expression,
        offset: Option<Expression>,
        length: Option<Expression>,
    },
    InjectOptPragma {
        identifiers: Vec<IdentifierNode>,
    },
    OnSuccessPragma {
        command: CompactString,
    },

    // --- Directives
    IfDefDirective {
        identifier: IdentifierNode,
    },
    IfNDefDirective {
        identifier: IdentifierNode,
    },
    DefineDirective {
        identifier: IdentifierNode,
    },
    UndefDirective {
        identifier: IdentifierNode,
    },
    IfModDirective {
        identifier: IdentifierNode,
    },
    IfNModDirective {
        identifier: IdentifierNode,
    },
    EndIfDirective,
    ElseDirective,
    IfDirective {
        condition: Expression,
    },
    IncludeDirective {
        filename: CompactString,
    },
    LineDirective {
        line_number: Expression,
        filename: Option<CompactString>,
    },

    // --- Statements
    MacroStatement {
        parameters: Vec<IdentifierNode>,
    },
    MacroEndStatement,
    LoopStatement {
        expr: Expression,
    },
    LoopEndStatement,
    WhileStatement {
        expr: Expression,
    },
    WhileEndStatement,
    RepeatStatement,
    UntilStatement {
        expr: Expression,
    },
    ProcStatement,
    ProcEndStatement,
    IfStatement {
        expr: Expression,
    },
    IfUsedStatement {
        symbol: Expression,
    },
    IfNUsedStatement {
        symbol: Expression,
    },
    ElseStatement,
    ElseIfStatement {
        expr: Expression,
    },
    EndIfStatement,
    BreakStatement,
    ContinueStatement,
    ModuleStatement {
        identifier: Option<IdentifierNode>,
    },
    ModuleEndStatement,
    StructStatement,
    StructEndStatement,
    ForStatement {
        identifier: IdentifierNode,
        start_expr: Expression,
        to_expr: Expression,
        step_expr: Option<Expression>,
    },
    NextStatement,

    // --- Instructions
    SimpleZ80Instruction {
        mnemonic: CompactString,
    },
    LdInstruction {
        operand1: Operand,
        operand2: Operand,
    },
    IncInstruction {
        operand: Operand,
    },
    DecInstruction {
        operand: Operand,
    },
    ExInstruction {
        operand1: Operand,
        operand2: Operand,
    },
    AddInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    AdcInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    SubInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    SbcInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    AndInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    XorInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    OrInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    CpInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    DjnzInstruction {
        target: Operand,
    },
    JrInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    JpInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    CallInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    RetInstruction {
        condition: Option<Operand>,
    },
    RstInstruction {
        target: Operand,
    },
    PushInstruction {
        operand: Operand,
    },
    PopInstruction {
        operand: Operand,
    },
    InInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    OutInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    ImInstruction {
        mode: Operand,
    },
    RlcInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    RrcInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    RlInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    RrInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    SlaInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    SraInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    SllInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    SrlInstruction {
        operand1: Operand,
        operand2: Option<Operand>,
    },
    BitInstruction {
        operand1: Operand,
        operand2: Operand,
    },
    ResInstruction {
        operand1: Operand,
        operand2: Operand,
        operand3: Option<Operand>,
    },
    SetInstruction {
        operand1: Operand,
        operand2: Operand,
        operand3: Option<Operand>,
    },
    NextRegInstruction {
        operand1: Operand,
        operand2: Operand,
    },
    TestInstruction {
        expr: Expression,
    },

    // --- Macro plumbing
    MacroOrStructInvocation {
        identifier: IdentifierNode,
        operands: Vec<Operand>,
    },
    FieldAssignment {
        assignment: Box<LineBody>,
    },
    /// A `{{param}}` placeholder standing alone as a line body.
    MacroParameter(Expression),
}

impl LineBody {
    /// True for statements that open a block scope.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::MacroStatement { .. }
                | Self::LoopStatement { .. }
                | Self::WhileStatement { .. }
                | Self::RepeatStatement
                | Self::ProcStatement
                | Self::IfStatement { .. }
                | Self::IfUsedStatement { .. }
                | Self::IfNUsedStatement { .. }
                | Self::ModuleStatement { .. }
                | Self::StructStatement
                | Self::ForStatement { .. }
        )
    }
}

/// How an instruction operand addresses its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    Reg8,
    Reg8Spec,
    Reg8Idx,
    Reg16,
    Reg16Idx,
    Reg16Spec,
    RegIndirect,
    IndexedIndirect,
    MemIndirect,
    CPort,
    Expression,
    Condition,
    NoneArg,
}

/// One instruction operand.
///
/// Which fields are populated depends on `operand_type`: registers and
/// conditions fill `register`, indexed indirections add `offset_sign` and
/// `expr`, and expression operands fill `expr` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    pub operand_type: OperandType,
    pub register: Option<CompactString>,
    pub offset_sign: Option<CompactString>,
    pub expr: Option<Expression>,
}

impl Operand {
    pub fn none_arg() -> Self {
        Self {
            operand_type: OperandType::NoneArg,
            register: None,
            offset_sign: None,
            expr: None,
        }
    }
}

/// An expression node with its source span.
///
/// `end_position`/`end_column` follow the same exclusive rule as line spans:
/// they point at the start of the first token after the expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub line: usize,
    pub start_position: usize,
    pub start_column: usize,
    pub end_position: usize,
    pub end_column: usize,
    /// Verbatim source text covered by the span.
    pub source_text: CompactString,
}

impl Expression {
    /// The wire type name of this expression.
    pub fn type_name(&self) -> &'static str {
        (&self.kind).into()
    }
}

/// The shape of an expression; variant names are the wire type names.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum ExpressionKind {
    ConditionalExpression {
        condition: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
    },
    BinaryExpression {
        operator: CompactString,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    UnaryExpression {
        operator: CompactString,
        operand: Box<Expression>,
    },
    Symbol {
        starts_from_global: bool,
        identifier: IdentifierNode,
    },
    FunctionInvocation {
        function_name: IdentifierNode,
        args: Vec<Expression>,
    },
    MacroTimeFunctionInvocation {
        function_name: CompactString,
        operand: Option<Box<Operand>>,
    },
    MacroParameter {
        identifier: IdentifierNode,
    },
    IntegerLiteral {
        value: i64,
    },
    RealLiteral {
        value: f64,
    },
    StringLiteral {
        value: CompactString,
    },
    BooleanLiteral {
        value: bool,
    },
    CurrentAddressLiteral,
    CurrentCounterLiteral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_are_wire_type_names() {
        let body = LineBody::SimpleZ80Instruction {
            mnemonic: "NOP".into(),
        };
        assert_eq!(<&'static str>::from(&body), "SimpleZ80Instruction");
        assert_eq!(<&'static str>::from(&LineBody::CommentOnlyLine), "CommentOnlyLine");
        assert_eq!(
            <&'static str>::from(&LineBody::DefBPragma { values: vec![] }),
            "DefBPragma"
        );
    }

    #[test]
    fn block_statements() {
        assert!(LineBody::RepeatStatement.is_block());
        assert!(LineBody::StructStatement.is_block());
        assert!(!LineBody::UntilStatement {
            expr: Expression {
                kind: ExpressionKind::BooleanLiteral { value: true },
                line: 1,
                start_position: 0,
                start_column: 0,
                end_position: 0,
                end_column: 0,
                source_text: "".into(),
            }
        }
        .is_block());
        assert!(!LineBody::EndIfStatement.is_block());
    }
}
