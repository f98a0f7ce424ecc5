//! ARM Cortex-A57 instruction costs.
//!
//! Latencies from the ARM Cortex-A57 Software Optimization Guide (UAN 0015B).

use crate::Category::{Arithmetic, Branch, FloatingPoint, Load, Other, Store};
use crate::RuleSpec;

pub const RULES: &[RuleSpec] = &[
    // Misc
    RuleSpec::new("NOP", Other, 1),
    RuleSpec::new("CAS(A|L|AL)?(B|H|P)?", Other, 1),
    RuleSpec::new("SWP(A|L|AL)?(B|H)?", Other, 1),
    // Branches: conditional forms before the bare `B`.
    RuleSpec::new(
        r"B\.(EQ|NE|CS|HS|CC|LO|MI|PL|VS|VC|HI|LS|GE|LT|GT|LE|AL|NV)",
        Branch,
        1,
    ),
    RuleSpec::new("CBN?Z", Branch, 1),
    RuleSpec::new("TBN?Z", Branch, 1),
    RuleSpec::new("B", Branch, 1),
    RuleSpec::new("BL", Branch, 1),
    RuleSpec::new("BLR", Branch, 2),
    RuleSpec::new("BR", Branch, 1),
    RuleSpec::new("RET", Branch, 1),
    // Loads
    RuleSpec::new("LDR(B|SB|H|SH|SW)?", Load, 4),
    RuleSpec::new("LDUR(B|SB|H|SH|SW)?", Load, 4),
    RuleSpec::new("LDP(SW)?", Load, 4),
    RuleSpec::new("LDNP", Load, 4),
    RuleSpec::new("LDTR(B|SB|H|SH|SW)?", Load, 4),
    RuleSpec::new("LDXR(B|H)?", Load, 4),
    RuleSpec::new("LDXP", Load, 4),
    RuleSpec::new("LDAPR(B|H)?", Load, 4),
    RuleSpec::new("LDAR(B|H)?", Load, 4),
    RuleSpec::new("LDAXR(B|H)?", Load, 4),
    RuleSpec::new("LDAXP", Load, 4),
    RuleSpec::new("LDLAR(B|H)?", Load, 4),
    // Stores
    RuleSpec::new("STR(B|H)?", Store, 1),
    RuleSpec::new("STUR(B|H)?", Store, 1),
    RuleSpec::new("STP", Store, 2),
    RuleSpec::new("STNP", Store, 2),
    RuleSpec::new("STTR(B|H)?", Store, 1),
    RuleSpec::new("STXR(B|H)?", Store, 1),
    RuleSpec::new("STXP", Store, 1),
    RuleSpec::new("STLR(B|H)?", Store, 1),
    RuleSpec::new("STLXR(B|H)?", Store, 1),
    RuleSpec::new("STLXP", Store, 1),
    RuleSpec::new("STLLR(B|H)?", Store, 1),
    // Integer ALU
    RuleSpec::new("ADDS?", Arithmetic, 1),
    RuleSpec::new("SUBS?", Arithmetic, 1),
    RuleSpec::new("CMP", Arithmetic, 1),
    RuleSpec::new("CMN", Arithmetic, 1),
    RuleSpec::new("ANDS?", Arithmetic, 1),
    RuleSpec::new("EOR", Arithmetic, 1),
    RuleSpec::new("ORR", Arithmetic, 1),
    RuleSpec::new("TST", Arithmetic, 1),
    RuleSpec::new("MOV(Z|N|K)?", Arithmetic, 1),
    RuleSpec::new("ADRP?", Arithmetic, 1),
    RuleSpec::new("BFM", Arithmetic, 2),
    RuleSpec::new("SBFM", Arithmetic, 2),
    RuleSpec::new("UBFM", Arithmetic, 2),
    RuleSpec::new("BFC", Arithmetic, 2),
    RuleSpec::new("BFI", Arithmetic, 2),
    RuleSpec::new("BFXIL", Arithmetic, 1),
    RuleSpec::new("SBFIZ", Arithmetic, 2),
    RuleSpec::new("SBFX", Arithmetic, 1),
    RuleSpec::new("UBFIZ", Arithmetic, 2),
    RuleSpec::new("UBFX", Arithmetic, 1),
    RuleSpec::new("EXTR", Arithmetic, 1),
    RuleSpec::new("ASRV?", Arithmetic, 1),
    RuleSpec::new("LSLV?", Arithmetic, 1),
    RuleSpec::new("LSRV?", Arithmetic, 1),
    RuleSpec::new("RORV?", Arithmetic, 1),
    RuleSpec::new("SXT(B|H|W)", Arithmetic, 2),
    RuleSpec::new("UXT(B|H)", Arithmetic, 2),
    RuleSpec::new("NEGS?", Arithmetic, 1),
    RuleSpec::new("ADCS?", Arithmetic, 1),
    RuleSpec::new("SBCS?", Arithmetic, 1),
    RuleSpec::new("NGCS?", Arithmetic, 1),
    RuleSpec::new("BICS?", Arithmetic, 1),
    RuleSpec::new("EON", Arithmetic, 1),
    RuleSpec::new("MVN", Arithmetic, 1),
    RuleSpec::new("ORN", Arithmetic, 1),
    // Multiply / divide
    RuleSpec::new("MADD", Arithmetic, 3),
    RuleSpec::new("MSUB", Arithmetic, 3),
    RuleSpec::new("MNEG", Arithmetic, 3),
    RuleSpec::new("MUL", Arithmetic, 3),
    RuleSpec::new("SMADDL", Arithmetic, 3),
    RuleSpec::new("SMSUBL", Arithmetic, 3),
    RuleSpec::new("SMNEGL", Arithmetic, 3),
    RuleSpec::new("SMULL", Arithmetic, 3),
    RuleSpec::new("SMULH", Arithmetic, 6),
    RuleSpec::new("UMADDL", Arithmetic, 3),
    RuleSpec::new("UMSUBL", Arithmetic, 3),
    RuleSpec::new("UMNEGL", Arithmetic, 3),
    RuleSpec::new("UMULL", Arithmetic, 3),
    RuleSpec::new("UMULH", Arithmetic, 6),
    RuleSpec::new("SDIV", Arithmetic, 20),
    RuleSpec::new("UDIV", Arithmetic, 20),
    // Bit manipulation / conditional select
    RuleSpec::new("CLS", Arithmetic, 1),
    RuleSpec::new("CLZ", Arithmetic, 1),
    RuleSpec::new("RBIT", Arithmetic, 1),
    RuleSpec::new("REV(16|32|64)?", Arithmetic, 1),
    RuleSpec::new("CSEL", Arithmetic, 1),
    RuleSpec::new("CSINC", Arithmetic, 1),
    RuleSpec::new("CSINV", Arithmetic, 1),
    RuleSpec::new("CSNEG", Arithmetic, 1),
    RuleSpec::new("CSETM?", Arithmetic, 1),
    RuleSpec::new("CINC", Arithmetic, 1),
    RuleSpec::new("CINV", Arithmetic, 1),
    RuleSpec::new("CNEG", Arithmetic, 1),
    RuleSpec::new("CCMN", Arithmetic, 1),
    RuleSpec::new("CCMP", Arithmetic, 1),
    // Floating point
    RuleSpec::new("FMOV", FloatingPoint, 5),
    RuleSpec::new("FCVT(AS|AU|MS|MU|NS|NU|PS|PU|ZS|ZU)", FloatingPoint, 10),
    RuleSpec::new("FCVTX?N?", FloatingPoint, 5),
    RuleSpec::new("FJCVTZS", FloatingPoint, 1),
    RuleSpec::new("SCVTF", FloatingPoint, 10),
    RuleSpec::new("UCVTF", FloatingPoint, 10),
    RuleSpec::new("FRINT(A|I|M|N|P|X|Z)?", FloatingPoint, 5),
    RuleSpec::new("FMADD", FloatingPoint, 9),
    RuleSpec::new("FMSUB", FloatingPoint, 9),
    RuleSpec::new("FNMADD", FloatingPoint, 9),
    RuleSpec::new("FNMSUB", FloatingPoint, 9),
    RuleSpec::new("FABS", FloatingPoint, 3),
    RuleSpec::new("FNEG", FloatingPoint, 3),
    RuleSpec::new("FSQRT", FloatingPoint, 20),
    RuleSpec::new("FADD", FloatingPoint, 5),
    RuleSpec::new("FDIV", FloatingPoint, 20),
    RuleSpec::new("FMUL", FloatingPoint, 6),
    RuleSpec::new("FNMUL", FloatingPoint, 6),
    RuleSpec::new("FSUB", FloatingPoint, 5),
    RuleSpec::new("FMAXNM", FloatingPoint, 5),
    RuleSpec::new("FMAX", FloatingPoint, 5),
    RuleSpec::new("FMINNM", FloatingPoint, 5),
    RuleSpec::new("FMIN", FloatingPoint, 5),
    RuleSpec::new("FCMP(E|P|PE)?", FloatingPoint, 3),
    RuleSpec::new("FCSEL", FloatingPoint, 3),
];
