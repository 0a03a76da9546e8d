//! The token set of the assembly language.
//!
//! One flat [`TokenKind`] covers the common token set (operators, pragmas,
//! statements, directives, literals) and the Z80-specific tokens (registers,
//! conditions, mnemonics, the ZX Next extensions and macro-time predicates).
//! Keyword spellings resolve through a static [`phf`] map with exact
//! dual-case keys: the all-lowercase and all-uppercase forms are keywords,
//! any mixed-case form scans as an identifier. The handful of mixed-case
//! entries (`IXl` and friends) are historical aliases.

use compact_str::CompactString;

/// Discriminates every token the tokenizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof, Ws, InlineComment, EolComment, Unknown, Divide,
    NewLine, Colon, DoubleColon, Comma, Assign, Equal,
    CiEqual, LPar, RPar, LSBrac, RSBrac, QuestionMark,
    Plus, Minus, GoesTo, VerticalBar, UpArrow, Ampersand,
    Exclamation, NotEqual, CiNotEqual, LessThan, LessThanOrEqual, LeftShift,
    MinOp, GreaterThan, GreaterThanOrEqual, RightShift, MaxOp, Multiplication,
    Modulo, BinaryNot, LDBrac, RDBrac, Dot, Identifier,
    OrgPragma, BankPragma, XorgPragma, EntPragma, XentPragma, EquPragma,
    VarPragma, DispPragma, DefbPragma, DefwPragma, DefmPragma, DefnPragma,
    DefhPragma, DefgxPragma, DefgPragma, DefcPragma, SkipPragma, ExternPragma,
    DefsPragma, FillbPragma, FillwPragma, ModelPragma, AlignPragma, TracePragma,
    TraceHexPragma, RndSeedPragma, ErrorPragma, IncludeBinPragma, CompareBinPragma, InjectOptPragma,
    OnSuccessPragma, Macro, Endm, Proc, Endp, Loop,
    Endl, Repeat, Until, While, Endw, If,
    IfUsed, IfNUsed, Elif, Else, Endif, For,
    To, Step, Next, Break, Continue, Module,
    EndModule, Struct, Ends, TextOf, LTextOf, Def,
    IsIndexedAddr, IsExpr, True, False, CurCnt, IfDefDir,
    IfNDefDir, EndIfDir, ElseDir, DefineDir, UndefDir, IncludeDir,
    IfDir, IfModDir, IfNModDir, LineDir, CurAddress, NoneArg,
    BinaryLiteral, OctalLiteral, DecimalLiteral, HexadecimalLiteral, RealLiteral, CharLiteral,
    StringLiteral, A, B, C, D, E,
    H, L, I, R, XL, XH,
    YL, YH, BC, DE, HL, SP,
    IX, IY, AF, AF_, Z, NZ,
    NC, PO, PE, P, M, Nop,
    Rlca, Rrca, Rla, Rra, Daa, Cpl,
    Scf, Ccf, Halt, Ret, Exx, Di,
    Ei, Neg, Retn, Reti, Rld, Rrd,
    Ldi, Cpi, Ini, Outi, Ldd, Cpd,
    Ind, Outd, Ldir, Cpir, Inir, Otir,
    Lddr, Cpdr, Indr, Otdr, Ld, Inc,
    Dec, Ex, Add, Adc, Sub, Sbc,
    And, Xor, Or, Cp, Djnz, Jr,
    Jp, Call, Rst, Push, Pop, In,
    Out, Im, Rlc, Rrc, Rl, Rr,
    Sla, Sra, Sll, Srl, Bit, Res,
    Set, Swapnib, Mirror, Test, Bsla, Bsra,
    Bsrl, Bsrf, Brlc, Mul, OutInB, NextReg,
    PixelDn, PixelAd, SetAE, Ldix, Ldws, Lddx,
    Ldirx, Ldpirx, Lddrx, HReg, LReg, IsReg8,
    IsReg8Std, IsReg8Spec, IsReg8Idx, IsReg16, IsReg16Std, IsReg16Idx,
    IsRegIndirect, IsCPort, IsCondition, IsRegA, IsRegAf, IsRegB,
    IsRegC, IsRegBc, IsRegD, IsRegE, IsRegDe, IsRegH,
    IsRegL, IsRegHl, IsRegI, IsRegR, IsRegXh, IsRegXl,
    IsRegIx, IsRegYh, IsRegYl, IsRegIy, IsRegSp,
}

impl TokenKind {
    /// Whitespace-class tokens, skipped when the stream is read with
    /// whitespace filtering on. `NewLine` and `Eof` are not whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Ws | Self::InlineComment | Self::EolComment)
    }

    /// Resolves a scanned word against the keyword table.
    pub fn resolve_keyword(text: &str) -> Option<Self> {
        KEYWORDS.get(text).copied()
    }

    pub fn traits(self) -> TokenTraits {
        use TokenKind::*;
        match self {
            M | P | PE | PO => TokenTraits {
                condition: true,
                ..TokenTraits::NONE
            },
            DefineDir | ElseDir | EndIfDir | IfDefDir | IfDir | IfModDir | IfNDefDir |
            IfNModDir | IncludeDir | LineDir => TokenTraits {
                directive: true,
                ..TokenTraits::NONE
            },
            BinaryNot | DoubleColon | Exclamation | HReg | Identifier | LDBrac | LPar | LReg |
            LSBrac | Minus | Plus => TokenTraits {
                expression_start: true,
                ..TokenTraits::NONE
            },
            Adc | Add | And | Bit | Call | Cp | Dec | Djnz | Ex | Im | In | Inc | Jp | Jr |
            Ld | Or | Out | Pop | Push | Res | Ret | Rl | Rlc | Rr | Rrc | Rst | Sbc | Set |
            Sla | Sll | Sra | Srl | Sub | Xor => TokenTraits {
                instruction: true,
                ..TokenTraits::NONE
            },
            AlignPragma | Assign | BankPragma | CompareBinPragma | DefbPragma | DefcPragma |
            DefgPragma | DefgxPragma | DefhPragma | DefmPragma | DefnPragma | DefsPragma |
            DefwPragma | DispPragma | EntPragma | EquPragma | ErrorPragma | ExternPragma |
            FillbPragma | FillwPragma | IncludeBinPragma | InjectOptPragma | ModelPragma |
            OnSuccessPragma | OrgPragma | RndSeedPragma | SkipPragma | TraceHexPragma |
            TracePragma | VarPragma | XentPragma | XorgPragma => TokenTraits {
                pragma: true,
                ..TokenTraits::NONE
            },
            Break | Continue | Elif | Else | EndModule | Endif | Endl | Endm | Endp | Ends |
            Endw | For | If | IfNUsed | IfUsed | Loop | Macro | Module | Next | Proc | Repeat |
            Struct | Until | While => TokenTraits {
                statement: true,
                ..TokenTraits::NONE
            },
            NC | NZ | Z => TokenTraits {
                condition: true,
                rel_condition: true,
                ..TokenTraits::NONE
            },
            BinaryLiteral | CharLiteral | CurAddress | CurCnt | DecimalLiteral | Dot | False |
            HexadecimalLiteral | Multiplication | OctalLiteral | RealLiteral | StringLiteral |
            True => TokenTraits {
                expression_start: true,
                literal: true,
                ..TokenTraits::NONE
            },
            Def | IsCPort | IsCondition | IsExpr | IsIndexedAddr | IsReg16 | IsReg16Idx |
            IsReg16Std | IsReg8 | IsReg8Idx | IsReg8Spec | IsReg8Std | IsRegA | IsRegAf |
            IsRegB | IsRegBc | IsRegC | IsRegD | IsRegDe | IsRegE | IsRegH | IsRegHl | IsRegI |
            IsRegIndirect | IsRegIx | IsRegIy | IsRegL | IsRegR | IsRegSp | IsRegXh | IsRegXl |
            IsRegYh | IsRegYl => TokenTraits {
                expression_start: true,
                macro_time_function: true,
                ..TokenTraits::NONE
            },
            LTextOf | TextOf => TokenTraits {
                expression_start: true,
                parse_time_function: true,
                ..TokenTraits::NONE
            },
            Brlc | Bsla | Bsra | Bsrf | Bsrl | Mirror | Mul | NextReg | Test => TokenTraits {
                instruction: true,
                next: true,
                ..TokenTraits::NONE
            },
            Ccf | Cpd | Cpdr | Cpi | Cpir | Cpl | Daa | Di | Ei | Exx | Halt | Ind | Indr |
            Ini | Inir | Ldd | Lddr | Ldi | Ldir | Neg | Nop | Otdr | Otir | Outd | Outi |
            Reti | Retn | Rla | Rlca | Rld | Rra | Rrca | Rrd | Scf => TokenTraits {
                instruction: true,
                simple: true,
                ..TokenTraits::NONE
            },
            BC | DE | HL | SP => TokenTraits {
                reg: true,
                reg16: true,
                ..TokenTraits::NONE
            },
            IX | IY => TokenTraits {
                reg: true,
                reg16_idx: true,
                ..TokenTraits::NONE
            },
            AF | AF_ => TokenTraits {
                reg: true,
                reg16_spec: true,
                ..TokenTraits::NONE
            },
            A | B | D | E | H | L => TokenTraits {
                reg: true,
                reg8: true,
                ..TokenTraits::NONE
            },
            XH | XL | YH | YL => TokenTraits {
                reg: true,
                reg8_idx: true,
                ..TokenTraits::NONE
            },
            I | R => TokenTraits {
                reg: true,
                reg8_spec: true,
                ..TokenTraits::NONE
            },
            Lddrx | Lddx | Ldirx | Ldix | Ldpirx | Ldws | OutInB | PixelAd | PixelDn | SetAE |
            Swapnib => TokenTraits {
                instruction: true,
                next: true,
                simple: true,
                ..TokenTraits::NONE
            },
            C => TokenTraits {
                condition: true,
                reg: true,
                reg8: true,
                rel_condition: true,
                ..TokenTraits::NONE
            },
            _ => TokenTraits::NONE,
        }
    }
}

/// Character range of a token, in char offsets.
///
/// `end_position` is one past the last character of the token, so adjacent
/// tokens tile the input when whitespace tokens are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub start_position: usize,
    pub end_position: usize,
    /// 1-based.
    pub start_line: usize,
    /// 1-based.
    pub end_line: usize,
    /// 0-based.
    pub start_column: usize,
    /// 0-based.
    pub end_column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: CompactString,
    pub location: SourceLocation,
}

/// Static classification flags of a token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTraits {
    pub instruction: bool,
    pub simple: bool,
    /// ZX Spectrum Next extended instruction.
    pub next: bool,
    pub pragma: bool,
    pub statement: bool,
    pub directive: bool,
    pub reg: bool,
    pub reg8: bool,
    pub reg8_spec: bool,
    pub reg8_idx: bool,
    pub reg16: bool,
    pub reg16_idx: bool,
    pub reg16_spec: bool,
    pub condition: bool,
    pub rel_condition: bool,
    pub expression_start: bool,
    pub literal: bool,
    pub parse_time_function: bool,
    pub macro_time_function: bool,
}

impl TokenTraits {
    pub const NONE: Self = Self {
        instruction: false,
        simple: false,
        next: false,
        pragma: false,
        statement: false,
        directive: false,
        reg: false,
        reg8: false,
        reg8_spec: false,
        reg8_idx: false,
        reg16: false,
        reg16_idx: false,
        reg16_spec: false,
        condition: false,
        rel_condition: false,
        expression_start: false,
        literal: false,
        parse_time_function: false,
        macro_time_function: false,
    };
}

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    ".org" => TokenKind::OrgPragma,
    ".ORG" => TokenKind::OrgPragma,
    "org" => TokenKind::OrgPragma,
    "ORG" => TokenKind::OrgPragma,
    ".bank" => TokenKind::BankPragma,
    ".BANK" => TokenKind::BankPragma,
    "bank" => TokenKind::BankPragma,
    "BANK" => TokenKind::BankPragma,
    ".xorg" => TokenKind::XorgPragma,
    ".XORG" => TokenKind::XorgPragma,
    "xorg" => TokenKind::XorgPragma,
    "XORG" => TokenKind::XorgPragma,
    ".ent" => TokenKind::EntPragma,
    ".ENT" => TokenKind::EntPragma,
    "ent" => TokenKind::EntPragma,
    "ENT" => TokenKind::EntPragma,
    ".xent" => TokenKind::XentPragma,
    ".XENT" => TokenKind::XentPragma,
    "xent" => TokenKind::XentPragma,
    "XENT" => TokenKind::XentPragma,
    ".equ" => TokenKind::EquPragma,
    ".EQU" => TokenKind::EquPragma,
    "equ" => TokenKind::EquPragma,
    "EQU" => TokenKind::EquPragma,
    ".var" => TokenKind::VarPragma,
    ".VAR" => TokenKind::VarPragma,
    "var" => TokenKind::VarPragma,
    "VAR" => TokenKind::VarPragma,
    ".disp" => TokenKind::DispPragma,
    ".DISP" => TokenKind::DispPragma,
    "disp" => TokenKind::DispPragma,
    "DISP" => TokenKind::DispPragma,
    ".defb" => TokenKind::DefbPragma,
    ".DEFB" => TokenKind::DefbPragma,
    "defb" => TokenKind::DefbPragma,
    "DEFB" => TokenKind::DefbPragma,
    ".db" => TokenKind::DefbPragma,
    ".DB" => TokenKind::DefbPragma,
    "db" => TokenKind::DefbPragma,
    "DB" => TokenKind::DefbPragma,
    ".defw" => TokenKind::DefwPragma,
    ".DEFW" => TokenKind::DefwPragma,
    "defw" => TokenKind::DefwPragma,
    "DEFW" => TokenKind::DefwPragma,
    ".dw" => TokenKind::DefwPragma,
    ".DW" => TokenKind::DefwPragma,
    "dw" => TokenKind::DefwPragma,
    "DW" => TokenKind::DefwPragma,
    ".defm" => TokenKind::DefmPragma,
    ".DEFM" => TokenKind::DefmPragma,
    "defm" => TokenKind::DefmPragma,
    "DEFM" => TokenKind::DefmPragma,
    ".dm" => TokenKind::DefmPragma,
    ".DM" => TokenKind::DefmPragma,
    "dm" => TokenKind::DefmPragma,
    "DM" => TokenKind::DefmPragma,
    ".defn" => TokenKind::DefnPragma,
    ".DEFN" => TokenKind::DefnPragma,
    "defn" => TokenKind::DefnPragma,
    "DEFN" => TokenKind::DefnPragma,
    ".dn" => TokenKind::DefnPragma,
    ".DN" => TokenKind::DefnPragma,
    "dn" => TokenKind::DefnPragma,
    "DN" => TokenKind::DefnPragma,
    ".defh" => TokenKind::DefhPragma,
    ".DEFH" => TokenKind::DefhPragma,
    "defh" => TokenKind::DefhPragma,
    "DEFH" => TokenKind::DefhPragma,
    ".dh" => TokenKind::DefhPragma,
    ".DH" => TokenKind::DefhPragma,
    "dh" => TokenKind::DefhPragma,
    "DH" => TokenKind::DefhPragma,
    ".defgx" => TokenKind::DefgxPragma,
    ".DEFGX" => TokenKind::DefgxPragma,
    "defgx" => TokenKind::DefgxPragma,
    "DEFGX" => TokenKind::DefgxPragma,
    ".dgx" => TokenKind::DefgxPragma,
    ".DGX" => TokenKind::DefgxPragma,
    "dgx" => TokenKind::DefgxPragma,
    "DGX" => TokenKind::DefgxPragma,
    ".defg" => TokenKind::DefgPragma,
    ".DEFG" => TokenKind::DefgPragma,
    "defg" => TokenKind::DefgPragma,
    "DEFG" => TokenKind::DefgPragma,
    ".dg" => TokenKind::DefgPragma,
    ".DG" => TokenKind::DefgPragma,
    "dg" => TokenKind::DefgPragma,
    "DG" => TokenKind::DefgPragma,
    ".defc" => TokenKind::DefcPragma,
    ".DEFC" => TokenKind::DefcPragma,
    "defc" => TokenKind::DefcPragma,
    "DEFC" => TokenKind::DefcPragma,
    ".dc" => TokenKind::DefcPragma,
    ".DC" => TokenKind::DefcPragma,
    "dc" => TokenKind::DefcPragma,
    "DC" => TokenKind::DefcPragma,
    ".skip" => TokenKind::SkipPragma,
    ".SKIP" => TokenKind::SkipPragma,
    "skip" => TokenKind::SkipPragma,
    "SKIP" => TokenKind::SkipPragma,
    ".extern" => TokenKind::ExternPragma,
    ".EXTERN" => TokenKind::ExternPragma,
    "extern" => TokenKind::ExternPragma,
    "EXTERN" => TokenKind::ExternPragma,
    ".defs" => TokenKind::DefsPragma,
    ".DEFS" => TokenKind::DefsPragma,
    "defs" => TokenKind::DefsPragma,
    "DEFS" => TokenKind::DefsPragma,
    ".ds" => TokenKind::DefsPragma,
    ".DS" => TokenKind::DefsPragma,
    "ds" => TokenKind::DefsPragma,
    "DS" => TokenKind::DefsPragma,
    ".fillb" => TokenKind::FillbPragma,
    ".FILLB" => TokenKind::FillbPragma,
    "fillb" => TokenKind::FillbPragma,
    "FILLB" => TokenKind::FillbPragma,
    ".fillw" => TokenKind::FillwPragma,
    ".FILLW" => TokenKind::FillwPragma,
    "fillw" => TokenKind::FillwPragma,
    "FILLW" => TokenKind::FillwPragma,
    ".model" => TokenKind::ModelPragma,
    ".MODEL" => TokenKind::ModelPragma,
    "model" => TokenKind::ModelPragma,
    "MODEL" => TokenKind::ModelPragma,
    ".align" => TokenKind::AlignPragma,
    ".ALIGN" => TokenKind::AlignPragma,
    "align" => TokenKind::AlignPragma,
    "ALIGN" => TokenKind::AlignPragma,
    ".trace" => TokenKind::TracePragma,
    ".TRACE" => TokenKind::TracePragma,
    "trace" => TokenKind::TracePragma,
    "TRACE" => TokenKind::TracePragma,
    ".tracehex" => TokenKind::TraceHexPragma,
    ".TRACEHEX" => TokenKind::TraceHexPragma,
    "tracehex" => TokenKind::TraceHexPragma,
    "TRACEHEX" => TokenKind::TraceHexPragma,
    ".rndseed" => TokenKind::RndSeedPragma,
    ".RNDSEED" => TokenKind::RndSeedPragma,
    "rndseed" => TokenKind::RndSeedPragma,
    "RNDSEED" => TokenKind::RndSeedPragma,
    ".error" => TokenKind::ErrorPragma,
    ".ERROR" => TokenKind::ErrorPragma,
    "error" => TokenKind::ErrorPragma,
    "ERROR" => TokenKind::ErrorPragma,
    ".includebin" => TokenKind::IncludeBinPragma,
    ".INCLUDEBIN" => TokenKind::IncludeBinPragma,
    ".include_bin" => TokenKind::IncludeBinPragma,
    ".INCLUDE_BIN" => TokenKind::IncludeBinPragma,
    "includebin" => TokenKind::IncludeBinPragma,
    "INCLUDEBIN" => TokenKind::IncludeBinPragma,
    "include_bin" => TokenKind::IncludeBinPragma,
    "INCLUDE_BIN" => TokenKind::IncludeBinPragma,
    ".comparebin" => TokenKind::CompareBinPragma,
    ".COMPAREBIN" => TokenKind::CompareBinPragma,
    "comparebin" => TokenKind::CompareBinPragma,
    "COMPAREBIN" => TokenKind::CompareBinPragma,
    ".injectopt" => TokenKind::InjectOptPragma,
    ".INJECTOPT" => TokenKind::InjectOptPragma,
    "injectopt" => TokenKind::InjectOptPragma,
    "INJECTOPT" => TokenKind::InjectOptPragma,
    ".onsuccess" => TokenKind::OnSuccessPragma,
    ".ONSUCCESS" => TokenKind::OnSuccessPragma,
    "onsuccess" => TokenKind::OnSuccessPragma,
    "ONSUCCESS" => TokenKind::OnSuccessPragma,
    ".macro" => TokenKind::Macro,
    ".MACRO" => TokenKind::Macro,
    "macro" => TokenKind::Macro,
    "MACRO" => TokenKind::Macro,
    ".endm" => TokenKind::Endm,
    ".ENDM" => TokenKind::Endm,
    ".mend" => TokenKind::Endm,
    ".MEND" => TokenKind::Endm,
    ".proc" => TokenKind::Proc,
    ".PROC" => TokenKind::Proc,
    ".endp" => TokenKind::Endp,
    ".ENDP" => TokenKind::Endp,
    ".pend" => TokenKind::Endp,
    ".PEND" => TokenKind::Endp,
    ".loop" => TokenKind::Loop,
    ".LOOP" => TokenKind::Loop,
    ".endl" => TokenKind::Endl,
    ".ENDL" => TokenKind::Endl,
    ".lend" => TokenKind::Endl,
    ".LEND" => TokenKind::Endl,
    ".repeat" => TokenKind::Repeat,
    ".REPEAT" => TokenKind::Repeat,
    ".until" => TokenKind::Until,
    ".UNTIL" => TokenKind::Until,
    ".while" => TokenKind::While,
    ".WHILE" => TokenKind::While,
    ".endw" => TokenKind::Endw,
    ".ENDW" => TokenKind::Endw,
    ".wend" => TokenKind::Endw,
    ".WEND" => TokenKind::Endw,
    ".if" => TokenKind::If,
    ".IF" => TokenKind::If,
    "if" => TokenKind::If,
    "IF" => TokenKind::If,
    ".ifused" => TokenKind::IfUsed,
    ".IFUSED" => TokenKind::IfUsed,
    "ifused" => TokenKind::IfUsed,
    "IFUSED" => TokenKind::IfUsed,
    ".ifnused" => TokenKind::IfNUsed,
    ".IFNUSED" => TokenKind::IfNUsed,
    "ifnused" => TokenKind::IfNUsed,
    "IFNUSED" => TokenKind::IfNUsed,
    ".elif" => TokenKind::Elif,
    ".ELIF" => TokenKind::Elif,
    ".else" => TokenKind::Else,
    ".ELSE" => TokenKind::Else,
    ".endif" => TokenKind::Endif,
    ".ENDIF" => TokenKind::Endif,
    ".for" => TokenKind::For,
    ".FOR" => TokenKind::For,
    "for" => TokenKind::For,
    "FOR" => TokenKind::For,
    ".to" => TokenKind::To,
    ".TO" => TokenKind::To,
    "to" => TokenKind::To,
    "TO" => TokenKind::To,
    ".step" => TokenKind::Step,
    ".STEP" => TokenKind::Step,
    "step" => TokenKind::Step,
    "STEP" => TokenKind::Step,
    ".next" => TokenKind::Next,
    ".NEXT" => TokenKind::Next,
    ".break" => TokenKind::Break,
    ".BREAK" => TokenKind::Break,
    ".continue" => TokenKind::Continue,
    ".CONTINUE" => TokenKind::Continue,
    ".module" => TokenKind::Module,
    ".MODULE" => TokenKind::Module,
    "module" => TokenKind::Module,
    "MODULE" => TokenKind::Module,
    ".scope" => TokenKind::Module,
    ".SCOPE" => TokenKind::Module,
    "scope" => TokenKind::Module,
    "SCOPE" => TokenKind::Module,
    ".endmodule" => TokenKind::EndModule,
    ".ENDMODULE" => TokenKind::EndModule,
    "endmodule" => TokenKind::EndModule,
    "ENDMODULE" => TokenKind::EndModule,
    ".endscope" => TokenKind::EndModule,
    ".ENDSCOPE" => TokenKind::EndModule,
    "endscope" => TokenKind::EndModule,
    "ENDSCOPE" => TokenKind::EndModule,
    ".moduleend" => TokenKind::EndModule,
    ".MODULEEND" => TokenKind::EndModule,
    "moduleend" => TokenKind::EndModule,
    "MODULEEND" => TokenKind::EndModule,
    ".scopeend" => TokenKind::EndModule,
    ".SCOPEEND" => TokenKind::EndModule,
    "scopeend" => TokenKind::EndModule,
    "SCOPEEND" => TokenKind::EndModule,
    ".struct" => TokenKind::Struct,
    ".STRUCT" => TokenKind::Struct,
    "struct" => TokenKind::Struct,
    "STRUCT" => TokenKind::Struct,
    ".ends" => TokenKind::Ends,
    ".ENDS" => TokenKind::Ends,
    "textof" => TokenKind::TextOf,
    "TEXTOF" => TokenKind::TextOf,
    "ltextof" => TokenKind::LTextOf,
    "LTEXTOF" => TokenKind::LTextOf,
    "def" => TokenKind::Def,
    "DEF" => TokenKind::Def,
    "isindexedaddr" => TokenKind::IsIndexedAddr,
    "ISINDEXEDADDR" => TokenKind::IsIndexedAddr,
    "isexpr" => TokenKind::IsExpr,
    "ISEXPR" => TokenKind::IsExpr,
    ".true" => TokenKind::True,
    ".TRUE" => TokenKind::True,
    "true" => TokenKind::True,
    "TRUE" => TokenKind::True,
    ".false" => TokenKind::False,
    ".FALSE" => TokenKind::False,
    "false" => TokenKind::False,
    "FALSE" => TokenKind::False,
    ".cnt" => TokenKind::CurCnt,
    ".CNT" => TokenKind::CurCnt,
    "$cnt" => TokenKind::CurCnt,
    "$CNT" => TokenKind::CurCnt,
    "#ifdef" => TokenKind::IfDefDir,
    "#ifndef" => TokenKind::IfNDefDir,
    "#endif" => TokenKind::EndIfDir,
    "#else" => TokenKind::ElseDir,
    "#define" => TokenKind::DefineDir,
    "#undef" => TokenKind::UndefDir,
    "#include" => TokenKind::IncludeDir,
    "#if" => TokenKind::IfDir,
    "#ifmod" => TokenKind::IfModDir,
    "#ifnmod" => TokenKind::IfNModDir,
    "#line" => TokenKind::LineDir,
    "$" => TokenKind::CurAddress,
    "a" => TokenKind::A,
    "A" => TokenKind::A,
    "b" => TokenKind::B,
    "B" => TokenKind::B,
    "c" => TokenKind::C,
    "C" => TokenKind::C,
    "d" => TokenKind::D,
    "D" => TokenKind::D,
    "e" => TokenKind::E,
    "E" => TokenKind::E,
    "h" => TokenKind::H,
    "H" => TokenKind::H,
    "l" => TokenKind::L,
    "L" => TokenKind::L,
    "i" => TokenKind::I,
    "I" => TokenKind::I,
    "r" => TokenKind::R,
    "R" => TokenKind::R,
    "xl" => TokenKind::XL,
    "XL" => TokenKind::XL,
    "ixl" => TokenKind::XL,
    "IXL" => TokenKind::XL,
    "IXl" => TokenKind::XL,
    "yl" => TokenKind::YL,
    "YL" => TokenKind::YL,
    "iyl" => TokenKind::YL,
    "IYL" => TokenKind::YL,
    "IYl" => TokenKind::YL,
    "xh" => TokenKind::XH,
    "XH" => TokenKind::XH,
    "ixh" => TokenKind::XH,
    "IXH" => TokenKind::XH,
    "IXh" => TokenKind::XH,
    "yh" => TokenKind::YH,
    "YH" => TokenKind::YH,
    "iyh" => TokenKind::YH,
    "IYH" => TokenKind::YH,
    "IYh" => TokenKind::YH,
    "bc" => TokenKind::BC,
    "BC" => TokenKind::BC,
    "de" => TokenKind::DE,
    "DE" => TokenKind::DE,
    "hl" => TokenKind::HL,
    "HL" => TokenKind::HL,
    "sp" => TokenKind::SP,
    "SP" => TokenKind::SP,
    "ix" => TokenKind::IX,
    "IX" => TokenKind::IX,
    "iy" => TokenKind::IY,
    "IY" => TokenKind::IY,
    "af" => TokenKind::AF,
    "AF" => TokenKind::AF,
    "af'" => TokenKind::AF_,
    "AF'" => TokenKind::AF_,
    "z" => TokenKind::Z,
    "Z" => TokenKind::Z,
    "nz" => TokenKind::NZ,
    "NZ" => TokenKind::NZ,
    "nc" => TokenKind::NC,
    "NC" => TokenKind::NC,
    "po" => TokenKind::PO,
    "PO" => TokenKind::PO,
    "pe" => TokenKind::PE,
    "PE" => TokenKind::PE,
    "p" => TokenKind::P,
    "P" => TokenKind::P,
    "m" => TokenKind::M,
    "M" => TokenKind::M,
    "nop" => TokenKind::Nop,
    "NOP" => TokenKind::Nop,
    "rlca" => TokenKind::Rlca,
    "RLCA" => TokenKind::Rlca,
    "rrca" => TokenKind::Rrca,
    "RRCA" => TokenKind::Rrca,
    "rla" => TokenKind::Rla,
    "RLA" => TokenKind::Rla,
    "rra" => TokenKind::Rra,
    "RRA" => TokenKind::Rra,
    "daa" => TokenKind::Daa,
    "DAA" => TokenKind::Daa,
    "cpl" => TokenKind::Cpl,
    "CPL" => TokenKind::Cpl,
    "scf" => TokenKind::Scf,
    "SCF" => TokenKind::Scf,
    "ccf" => TokenKind::Ccf,
    "CCF" => TokenKind::Ccf,
    "halt" => TokenKind::Halt,
    "HALT" => TokenKind::Halt,
    "ret" => TokenKind::Ret,
    "RET" => TokenKind::Ret,
    "exx" => TokenKind::Exx,
    "EXX" => TokenKind::Exx,
    "di" => TokenKind::Di,
    "DI" => TokenKind::Di,
    "ei" => TokenKind::Ei,
    "EI" => TokenKind::Ei,
    "neg" => TokenKind::Neg,
    "NEG" => TokenKind::Neg,
    "retn" => TokenKind::Retn,
    "RETN" => TokenKind::Retn,
    "reti" => TokenKind::Reti,
    "RETI" => TokenKind::Reti,
    "rld" => TokenKind::Rld,
    "RLD" => TokenKind::Rld,
    "rrd" => TokenKind::Rrd,
    "RRD" => TokenKind::Rrd,
    "ldi" => TokenKind::Ldi,
    "LDI" => TokenKind::Ldi,
    "cpi" => TokenKind::Cpi,
    "CPI" => TokenKind::Cpi,
    "ini" => TokenKind::Ini,
    "INI" => TokenKind::Ini,
    "outi" => TokenKind::Outi,
    "OUTI" => TokenKind::Outi,
    "ldd" => TokenKind::Ldd,
    "LDD" => TokenKind::Ldd,
    "cpd" => TokenKind::Cpd,
    "CPD" => TokenKind::Cpd,
    "ind" => TokenKind::Ind,
    "IND" => TokenKind::Ind,
    "outd" => TokenKind::Outd,
    "OUTD" => TokenKind::Outd,
    "ldir" => TokenKind::Ldir,
    "LDIR" => TokenKind::Ldir,
    "cpir" => TokenKind::Cpir,
    "CPIR" => TokenKind::Cpir,
    "inir" => TokenKind::Inir,
    "INIR" => TokenKind::Inir,
    "otir" => TokenKind::Otir,
    "OTIR" => TokenKind::Otir,
    "lddr" => TokenKind::Lddr,
    "LDDR" => TokenKind::Lddr,
    "cpdr" => TokenKind::Cpdr,
    "CPDR" => TokenKind::Cpdr,
    "indr" => TokenKind::Indr,
    "INDR" => TokenKind::Indr,
    "otdr" => TokenKind::Otdr,
    "OTDR" => TokenKind::Otdr,
    "ld" => TokenKind::Ld,
    "LD" => TokenKind::Ld,
    "inc" => TokenKind::Inc,
    "INC" => TokenKind::Inc,
    "dec" => TokenKind::Dec,
    "DEC" => TokenKind::Dec,
    "ex" => TokenKind::Ex,
    "EX" => TokenKind::Ex,
    "add" => TokenKind::Add,
    "ADD" => TokenKind::Add,
    "adc" => TokenKind::Adc,
    "ADC" => TokenKind::Adc,
    "sub" => TokenKind::Sub,
    "SUB" => TokenKind::Sub,
    "sbc" => TokenKind::Sbc,
    "SBC" => TokenKind::Sbc,
    "and" => TokenKind::And,
    "AND" => TokenKind::And,
    "xor" => TokenKind::Xor,
    "XOR" => TokenKind::Xor,
    "or" => TokenKind::Or,
    "OR" => TokenKind::Or,
    "cp" => TokenKind::Cp,
    "CP" => TokenKind::Cp,
    "djnz" => TokenKind::Djnz,
    "DJNZ" => TokenKind::Djnz,
    "jr" => TokenKind::Jr,
    "JR" => TokenKind::Jr,
    "jp" => TokenKind::Jp,
    "JP" => TokenKind::Jp,
    "call" => TokenKind::Call,
    "CALL" => TokenKind::Call,
    "rst" => TokenKind::Rst,
    "RST" => TokenKind::Rst,
    "push" => TokenKind::Push,
    "PUSH" => TokenKind::Push,
    "pop" => TokenKind::Pop,
    "POP" => TokenKind::Pop,
    "in" => TokenKind::In,
    "IN" => TokenKind::In,
    "out" => TokenKind::Out,
    "OUT" => TokenKind::Out,
    "im" => TokenKind::Im,
    "IM" => TokenKind::Im,
    "rlc" => TokenKind::Rlc,
    "RLC" => TokenKind::Rlc,
    "rrc" => TokenKind::Rrc,
    "RRC" => TokenKind::Rrc,
    "rl" => TokenKind::Rl,
    "RL" => TokenKind::Rl,
    "rr" => TokenKind::Rr,
    "RR" => TokenKind::Rr,
    "sla" => TokenKind::Sla,
    "SLA" => TokenKind::Sla,
    "sra" => TokenKind::Sra,
    "SRA" => TokenKind::Sra,
    "sll" => TokenKind::Sll,
    "SLL" => TokenKind::Sll,
    "srl" => TokenKind::Srl,
    "SRL" => TokenKind::Srl,
    "bit" => TokenKind::Bit,
    "BIT" => TokenKind::Bit,
    "set" => TokenKind::Set,
    "SET" => TokenKind::Set,
    "res" => TokenKind::Res,
    "RES" => TokenKind::Res,
    "swapnib" => TokenKind::Swapnib,
    "SWAPNIB" => TokenKind::Swapnib,
    "swap" => TokenKind::Swapnib,
    "SWAP" => TokenKind::Swapnib,
    "mirror" => TokenKind::Mirror,
    "MIRROR" => TokenKind::Mirror,
    "mirr" => TokenKind::Mirror,
    "MIRR" => TokenKind::Mirror,
    "test" => TokenKind::Test,
    "TEST" => TokenKind::Test,
    "bsla" => TokenKind::Bsla,
    "BSLA" => TokenKind::Bsla,
    "bsra" => TokenKind::Bsra,
    "BSRA" => TokenKind::Bsra,
    "bsrl" => TokenKind::Bsrl,
    "BSRL" => TokenKind::Bsrl,
    "bsrf" => TokenKind::Bsrf,
    "BSRF" => TokenKind::Bsrf,
    "brlc" => TokenKind::Brlc,
    "BRLC" => TokenKind::Brlc,
    "mul" => TokenKind::Mul,
    "MUL" => TokenKind::Mul,
    "outinb" => TokenKind::OutInB,
    "OUTINB" => TokenKind::OutInB,
    "otib" => TokenKind::OutInB,
    "OTIB" => TokenKind::OutInB,
    "nextreg" => TokenKind::NextReg,
    "NEXTREG" => TokenKind::NextReg,
    "nreg" => TokenKind::NextReg,
    "NREG" => TokenKind::NextReg,
    "pixeldn" => TokenKind::PixelDn,
    "PIXELDN" => TokenKind::PixelDn,
    "pxdn" => TokenKind::PixelDn,
    "PXDN" => TokenKind::PixelDn,
    "pixelad" => TokenKind::PixelAd,
    "PIXELAD" => TokenKind::PixelAd,
    "pxad" => TokenKind::PixelAd,
    "PXAD" => TokenKind::PixelAd,
    "setae" => TokenKind::SetAE,
    "SETAE" => TokenKind::SetAE,
    "stae" => TokenKind::SetAE,
    "STAE" => TokenKind::SetAE,
    "ldix" => TokenKind::Ldix,
    "LDIX" => TokenKind::Ldix,
    "ldws" => TokenKind::Ldws,
    "LDWS" => TokenKind::Ldws,
    "lddx" => TokenKind::Lddx,
    "LDDX" => TokenKind::Lddx,
    "ldirx" => TokenKind::Ldirx,
    "LDIRX" => TokenKind::Ldirx,
    "lirx" => TokenKind::Ldirx,
    "LIRX" => TokenKind::Ldirx,
    "ldpirx" => TokenKind::Ldpirx,
    "LDPIRX" => TokenKind::Ldpirx,
    "lprx" => TokenKind::Ldpirx,
    "LPRX" => TokenKind::Ldpirx,
    "lddrx" => TokenKind::Lddrx,
    "LDDRX" => TokenKind::Lddrx,
    "ldrx" => TokenKind::Lddrx,
    "LDRX" => TokenKind::Lddrx,
    "hreg" => TokenKind::HReg,
    "HREG" => TokenKind::HReg,
    "lreg" => TokenKind::LReg,
    "LREG" => TokenKind::LReg,
    "isreg8" => TokenKind::IsReg8,
    "ISREG8" => TokenKind::IsReg8,
    "isreg8std" => TokenKind::IsReg8Std,
    "ISREG8STD" => TokenKind::IsReg8Std,
    "isreg8spec" => TokenKind::IsReg8Spec,
    "ISREG8SPEC" => TokenKind::IsReg8Spec,
    "isreg8idx" => TokenKind::IsReg8Idx,
    "ISREG8IDX" => TokenKind::IsReg8Idx,
    "isreg16" => TokenKind::IsReg16,
    "ISREG16" => TokenKind::IsReg16,
    "isreg16std" => TokenKind::IsReg16Std,
    "ISREG16STD" => TokenKind::IsReg16Std,
    "isreg16idx" => TokenKind::IsReg16Idx,
    "ISREG16IDX" => TokenKind::IsReg16Idx,
    "isregindirect" => TokenKind::IsRegIndirect,
    "ISREGINDIRECT" => TokenKind::IsRegIndirect,
    "iscport" => TokenKind::IsCPort,
    "ISCPORT" => TokenKind::IsCPort,
    "iscondition" => TokenKind::IsCondition,
    "ISCONDITION" => TokenKind::IsCondition,
    "isrega" => TokenKind::IsRegA,
    "ISREGA" => TokenKind::IsRegA,
    "isregaf" => TokenKind::IsRegAf,
    "ISREGAF" => TokenKind::IsRegAf,
    "isregb" => TokenKind::IsRegB,
    "ISREGB" => TokenKind::IsRegB,
    "isregc" => TokenKind::IsRegC,
    "ISREGC" => TokenKind::IsRegC,
    "isregbc" => TokenKind::IsRegBc,
    "ISREGBC" => TokenKind::IsRegBc,
    "isregd" => TokenKind::IsRegD,
    "ISREGD" => TokenKind::IsRegD,
    "isrege" => TokenKind::IsRegE,
    "ISREGE" => TokenKind::IsRegE,
    "isregde" => TokenKind::IsRegDe,
    "ISREGDE" => TokenKind::IsRegDe,
    "isregh" => TokenKind::IsRegH,
    "ISREGH" => TokenKind::IsRegH,
    "isregl" => TokenKind::IsRegL,
    "ISREGL" => TokenKind::IsRegL,
    "isreghl" => TokenKind::IsRegHl,
    "ISREGHL" => TokenKind::IsRegHl,
    "isregi" => TokenKind::IsRegI,
    "ISREGI" => TokenKind::IsRegI,
    "isregr" => TokenKind::IsRegR,
    "ISREGR" => TokenKind::IsRegR,
    "isregxh" => TokenKind::IsRegXh,
    "ISREGXH" => TokenKind::IsRegXh,
    "isregxl" => TokenKind::IsRegXl,
    "ISREGXL" => TokenKind::IsRegXl,
    "isregix" => TokenKind::IsRegIx,
    "ISREGIX" => TokenKind::IsRegIx,
    "isregyh" => TokenKind::IsRegYh,
    "ISREGYH" => TokenKind::IsRegYh,
    "isregyl" => TokenKind::IsRegYl,
    "ISREGYL" => TokenKind::IsRegYl,
    "isregiy" => TokenKind::IsRegIy,
    "ISREGIY" => TokenKind::IsRegIy,
    "isregsp" => TokenKind::IsRegSp,
    "ISREGSP" => TokenKind::IsRegSp,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_exact_dual_case() {
        assert_eq!(TokenKind::resolve_keyword("nop"), Some(TokenKind::Nop));
        assert_eq!(TokenKind::resolve_keyword("NOP"), Some(TokenKind::Nop));
        assert_eq!(TokenKind::resolve_keyword("Nop"), None);
        assert_eq!(TokenKind::resolve_keyword("ldIrx"), None);
    }

    #[test]
    fn historical_mixed_case_aliases() {
        assert_eq!(TokenKind::resolve_keyword("IXl"), Some(TokenKind::XL));
        assert_eq!(TokenKind::resolve_keyword("IXh"), Some(TokenKind::XH));
        assert_eq!(TokenKind::resolve_keyword("IYl"), Some(TokenKind::YL));
        assert_eq!(TokenKind::resolve_keyword("IYh"), Some(TokenKind::YH));
    }

    #[test]
    fn special_spellings() {
        assert_eq!(TokenKind::resolve_keyword("$"), Some(TokenKind::CurAddress));
        assert_eq!(TokenKind::resolve_keyword("$cnt"), Some(TokenKind::CurCnt));
        assert_eq!(TokenKind::resolve_keyword("af'"), Some(TokenKind::AF_));
        assert_eq!(TokenKind::resolve_keyword("#ifdef"), Some(TokenKind::IfDefDir));
        assert_eq!(TokenKind::resolve_keyword("#IFDEF"), None);
        assert_eq!(TokenKind::resolve_keyword(".org"), Some(TokenKind::OrgPragma));
        assert_eq!(TokenKind::resolve_keyword("swap"), Some(TokenKind::Swapnib));
    }

    #[test]
    fn traits_classify_registers_and_conditions() {
        let c = TokenKind::C.traits();
        assert!(c.reg && c.reg8 && c.condition && c.rel_condition);
        let m = TokenKind::M.traits();
        assert!(m.condition && !m.rel_condition && !m.reg);
        assert!(TokenKind::IX.traits().reg16_idx);
        assert!(TokenKind::AF_.traits().reg16_spec);
        assert!(TokenKind::Swapnib.traits().simple);
        assert!(TokenKind::Mul.traits().instruction && !TokenKind::Mul.traits().simple);
        assert!(TokenKind::Multiplication.traits().literal);
        assert!(TokenKind::Comma.traits() == TokenTraits::NONE);
    }
}
