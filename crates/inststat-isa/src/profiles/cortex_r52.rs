//! ARM Cortex-R52 instruction costs.
//!
//! Latencies from the ARM Cortex-R52 Technical Reference Manual
//! (100026-0102-00). Mnemonics use unified assembler syntax, so most patterns
//! accept a condition code and a `.w`/`.n` width qualifier.

use crate::Category::{Arithmetic, Branch, FloatingPoint, Load, Other, Store};
use crate::RuleSpec;

/// Append the optional condition code and width qualifier.
macro_rules! cond {
    ($op:literal) => {
        concat!(
            $op,
            r"(EQ|NE|CS|HS|CC|LO|MI|PL|VS|VC|HI|LS|GE|LT|GT|LE|AL)?(\.W|\.N)?"
        )
    };
}

/// Append the optional VFP data type suffix (e.g. `vadd.f32`).
macro_rules! vfp {
    ($op:literal) => {
        concat!(
            $op,
            r"(EQ|NE|CS|HS|CC|LO|MI|PL|VS|VC|HI|LS|GE|LT|GT|LE|AL)?(\.(F16|F32|F64|S32|U32|32|64))*"
        )
    };
}

pub const RULES: &[RuleSpec] = &[
    // Branches: `B<cond>` first so that BLT/BLE/BLS resolve as conditional B.
    RuleSpec::new(cond!("B"), Branch, 1),
    RuleSpec::new(cond!("BL"), Branch, 1),
    RuleSpec::new(cond!("BLX"), Branch, 2),
    RuleSpec::new(cond!("BX"), Branch, 1),
    RuleSpec::new("CBN?Z", Branch, 1),
    RuleSpec::new(cond!("TB(B|H)"), Branch, 3),
    // Loads
    RuleSpec::new(cond!("LDR(B|SB|H|SH|D|EX|EXB|EXH|EXD)?"), Load, 2),
    RuleSpec::new(cond!("LDA(B|H|EX|EXB|EXH|EXD)?"), Load, 2),
    RuleSpec::new(cond!("LDM(IA|IB|DA|DB|FD|FA|ED|EA)?"), Load, 3),
    RuleSpec::new(cond!("POP"), Load, 3),
    // Stores
    RuleSpec::new(cond!("STR(B|H|D|EX|EXB|EXH|EXD)?"), Store, 1),
    RuleSpec::new(cond!("STL(B|H|EX|EXB|EXH|EXD)?"), Store, 1),
    RuleSpec::new(cond!("STM(IA|IB|DA|DB|FD|FA|ED|EA)?"), Store, 2),
    RuleSpec::new(cond!("PUSH"), Store, 2),
    // Integer ALU
    RuleSpec::new(cond!("ADDS?"), Arithmetic, 1),
    RuleSpec::new(cond!("ADCS?"), Arithmetic, 1),
    RuleSpec::new(cond!("ADR"), Arithmetic, 1),
    RuleSpec::new(cond!("SUBS?"), Arithmetic, 1),
    RuleSpec::new(cond!("SBCS?"), Arithmetic, 1),
    RuleSpec::new(cond!("RSBS?"), Arithmetic, 1),
    RuleSpec::new(cond!("RSCS?"), Arithmetic, 1),
    RuleSpec::new(cond!("ANDS?"), Arithmetic, 1),
    RuleSpec::new(cond!("ORRS?"), Arithmetic, 1),
    RuleSpec::new(cond!("ORNS?"), Arithmetic, 1),
    RuleSpec::new(cond!("EORS?"), Arithmetic, 1),
    RuleSpec::new(cond!("BICS?"), Arithmetic, 1),
    RuleSpec::new(cond!("MVNS?"), Arithmetic, 1),
    RuleSpec::new(cond!("MOV(S|W|T)?"), Arithmetic, 1),
    RuleSpec::new(cond!("CMP"), Arithmetic, 1),
    RuleSpec::new(cond!("CMN"), Arithmetic, 1),
    RuleSpec::new(cond!("TST"), Arithmetic, 1),
    RuleSpec::new(cond!("TEQ"), Arithmetic, 1),
    RuleSpec::new(cond!("LSLS?"), Arithmetic, 1),
    RuleSpec::new(cond!("LSRS?"), Arithmetic, 1),
    RuleSpec::new(cond!("ASRS?"), Arithmetic, 1),
    RuleSpec::new(cond!("RORS?"), Arithmetic, 1),
    RuleSpec::new(cond!("RRXS?"), Arithmetic, 1),
    RuleSpec::new(cond!("SXTA?(B|H|B16)"), Arithmetic, 1),
    RuleSpec::new(cond!("UXTA?(B|H|B16)"), Arithmetic, 1),
    RuleSpec::new(cond!("SBFX"), Arithmetic, 1),
    RuleSpec::new(cond!("UBFX"), Arithmetic, 1),
    RuleSpec::new(cond!("BF(C|I)"), Arithmetic, 1),
    RuleSpec::new(cond!("CLZ"), Arithmetic, 1),
    RuleSpec::new(cond!("RBIT"), Arithmetic, 1),
    RuleSpec::new(cond!("REV(16|SH)?"), Arithmetic, 1),
    RuleSpec::new("IT(T|E){0,3}", Other, 1),
    // Multiply / divide
    RuleSpec::new(cond!("MULS?"), Arithmetic, 2),
    RuleSpec::new(cond!("ML(A|S)"), Arithmetic, 2),
    RuleSpec::new(cond!("S(MULL|MLAL)S?"), Arithmetic, 2),
    RuleSpec::new(cond!("U(MULL|MLAL)S?"), Arithmetic, 2),
    RuleSpec::new(cond!("SMUL(BB|BT|TB|TT|WB|WT)"), Arithmetic, 2),
    RuleSpec::new(cond!("SMLA(BB|BT|TB|TT|WB|WT|LBB|LBT|LTB|LTT|D|DX|LD|LDX)"), Arithmetic, 2),
    RuleSpec::new(cond!("SMMULR?"), Arithmetic, 2),
    RuleSpec::new(cond!("SDIV"), Arithmetic, 10),
    RuleSpec::new(cond!("UDIV"), Arithmetic, 10),
    // Floating point (VFP)
    RuleSpec::new(vfp!("VLDR"), Load, 2),
    RuleSpec::new(vfp!("VLDM(IA|DB)?"), Load, 3),
    RuleSpec::new(vfp!("VPOP"), Load, 3),
    RuleSpec::new(vfp!("VSTR"), Store, 1),
    RuleSpec::new(vfp!("VSTM(IA|DB)?"), Store, 2),
    RuleSpec::new(vfp!("VPUSH"), Store, 2),
    RuleSpec::new(vfp!("VMOV"), FloatingPoint, 2),
    RuleSpec::new(vfp!("VMRS"), Other, 1),
    RuleSpec::new(vfp!("VMSR"), Other, 1),
    RuleSpec::new(vfp!("VADD"), FloatingPoint, 3),
    RuleSpec::new(vfp!("VSUB"), FloatingPoint, 3),
    RuleSpec::new(vfp!("VMUL"), FloatingPoint, 4),
    RuleSpec::new(vfp!("VNMUL"), FloatingPoint, 4),
    RuleSpec::new(vfp!("VN?ML(A|S)"), FloatingPoint, 6),
    RuleSpec::new(vfp!("VFN?M(A|S)"), FloatingPoint, 6),
    RuleSpec::new(vfp!("VDIV"), FloatingPoint, 14),
    RuleSpec::new(vfp!("VSQRT"), FloatingPoint, 14),
    RuleSpec::new(vfp!("VABS"), FloatingPoint, 2),
    RuleSpec::new(vfp!("VNEG"), FloatingPoint, 2),
    RuleSpec::new(vfp!("VCMPE?"), FloatingPoint, 2),
    RuleSpec::new(vfp!("VCVT(R|A|N|P|M|B|T)?"), FloatingPoint, 3),
    RuleSpec::new(vfp!("VSEL(EQ|GE|GT|VS)"), FloatingPoint, 2),
    RuleSpec::new(vfp!("VMAXNM"), FloatingPoint, 3),
    RuleSpec::new(vfp!("VMINNM"), FloatingPoint, 3),
    RuleSpec::new(vfp!("VRINT(A|N|P|M|R|X|Z)"), FloatingPoint, 3),
    // Misc
    RuleSpec::new(cond!("NOP"), Other, 1),
    RuleSpec::new(cond!("D(MB|SB)"), Other, 1),
    RuleSpec::new(cond!("ISB"), Other, 1),
    RuleSpec::new(cond!("M(RS|SR|RC|CR)"), Other, 1),
    RuleSpec::new(cond!("SVC"), Other, 1),
    RuleSpec::new(cond!("BKPT"), Other, 1),
    RuleSpec::new(cond!("UDF"), Other, 1),
    RuleSpec::new(cond!("WF(I|E)"), Other, 1),
    RuleSpec::new(cond!("SEV"), Other, 1),
    RuleSpec::new(cond!("CPSI(E|D)"), Other, 1),
];
