//! The TAC instruction set (§6) and an append-only, concatenable instruction list.
//!
//! The original implementation builds instruction lists bottom-up with an
//! overloaded `||` concatenation operator; Rust has no such overload for
//! value types, so `InstructionList` implements `std::ops::Add` instead,
//! letting `passes::codegen` write `code1 + code2 + instr` in the same shape.
//! Labels here are symbolic strings resolved by the downstream assembler, so
//! — unlike the teacher's `BarracudaProgramCodeBuilder`, which patches
//! numeric jump offsets in a `finalize` pass — no deferred-resolution pass is
//! needed here; `LABEL`/`UJUMP`/`FJUMP` are emitted as plain instructions.

use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Load { dst: String, src: String },
    ILoad { dst: String, lit: String },
    FLoad { dst: String, lit: String },
    ChLoad { dst: String, lit: String },
    LoadX { dst: String, base: String, index: String },
    XLoad { base: String, index: String, src: String },
    ALoad { dst: String, base: String },
    Add { dst: String, a: String, b: String },
    Sub { dst: String, a: String, b: String },
    Mul { dst: String, a: String, b: String },
    Div { dst: String, a: String, b: String },
    FAdd { dst: String, a: String, b: String },
    FSub { dst: String, a: String, b: String },
    FMul { dst: String, a: String, b: String },
    FDiv { dst: String, a: String, b: String },
    Neg { dst: String, a: String },
    FNeg { dst: String, a: String },
    And { dst: String, a: String, b: String },
    Or { dst: String, a: String, b: String },
    Not { dst: String, a: String },
    Eq { dst: String, a: String, b: String },
    Lt { dst: String, a: String, b: String },
    Le { dst: String, a: String, b: String },
    FEq { dst: String, a: String, b: String },
    FLt { dst: String, a: String, b: String },
    FLe { dst: String, a: String, b: String },
    Float { dst: String, src: String },
    ReadI { dst: String },
    ReadF { dst: String },
    ReadC { dst: String },
    WriteI { src: String },
    WriteF { src: String },
    WriteC { src: String },
    WriteLn,
    Label(String),
    UJump(String),
    FJump { cond: String, label: String },
    Push(Option<String>),
    Pop(Option<String>),
    Call(String),
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Load { dst, src } => write!(f, "LOAD {}, {}", dst, src),
            Instruction::ILoad { dst, lit } => write!(f, "ILOAD {}, {}", dst, lit),
            Instruction::FLoad { dst, lit } => write!(f, "FLOAD {}, {}", dst, lit),
            Instruction::ChLoad { dst, lit } => write!(f, "CHLOAD {}, {}", dst, lit),
            Instruction::LoadX { dst, base, index } => write!(f, "LOADX {}, {}, {}", dst, base, index),
            Instruction::XLoad { base, index, src } => write!(f, "XLOAD {}, {}, {}", base, index, src),
            Instruction::ALoad { dst, base } => write!(f, "ALOAD {}, {}", dst, base),
            Instruction::Add { dst, a, b } => write!(f, "ADD {}, {}, {}", dst, a, b),
            Instruction::Sub { dst, a, b } => write!(f, "SUB {}, {}, {}", dst, a, b),
            Instruction::Mul { dst, a, b } => write!(f, "MUL {}, {}, {}", dst, a, b),
            Instruction::Div { dst, a, b } => write!(f, "DIV {}, {}, {}", dst, a, b),
            Instruction::FAdd { dst, a, b } => write!(f, "FADD {}, {}, {}", dst, a, b),
            Instruction::FSub { dst, a, b } => write!(f, "FSUB {}, {}, {}", dst, a, b),
            Instruction::FMul { dst, a, b } => write!(f, "FMUL {}, {}, {}", dst, a, b),
            Instruction::FDiv { dst, a, b } => write!(f, "FDIV {}, {}, {}", dst, a, b),
            Instruction::Neg { dst, a } => write!(f, "NEG {}, {}", dst, a),
            Instruction::FNeg { dst, a } => write!(f, "FNEG {}, {}", dst, a),
            Instruction::And { dst, a, b } => write!(f, "AND {}, {}, {}", dst, a, b),
            Instruction::Or { dst, a, b } => write!(f, "OR {}, {}, {}", dst, a, b),
            Instruction::Not { dst, a } => write!(f, "NOT {}, {}", dst, a),
            Instruction::Eq { dst, a, b } => write!(f, "EQ {}, {}, {}", dst, a, b),
            Instruction::Lt { dst, a, b } => write!(f, "LT {}, {}, {}", dst, a, b),
            Instruction::Le { dst, a, b } => write!(f, "LE {}, {}, {}", dst, a, b),
            Instruction::FEq { dst, a, b } => write!(f, "FEQ {}, {}, {}", dst, a, b),
            Instruction::FLt { dst, a, b } => write!(f, "FLT {}, {}, {}", dst, a, b),
            Instruction::FLe { dst, a, b } => write!(f, "FLE {}, {}, {}", dst, a, b),
            Instruction::Float { dst, src } => write!(f, "FLOAT {}, {}", dst, src),
            Instruction::ReadI { dst } => write!(f, "READI {}", dst),
            Instruction::ReadF { dst } => write!(f, "READF {}", dst),
            Instruction::ReadC { dst } => write!(f, "READC {}", dst),
            Instruction::WriteI { src } => write!(f, "WRITEI {}", src),
            Instruction::WriteF { src } => write!(f, "WRITEF {}", src),
            Instruction::WriteC { src } => write!(f, "WRITEC {}", src),
            Instruction::WriteLn => write!(f, "WRITELN"),
            Instruction::Label(label) => write!(f, "LABEL {}", label),
            Instruction::UJump(label) => write!(f, "UJUMP {}", label),
            Instruction::FJump { cond, label } => write!(f, "FJUMP {}, {}", cond, label),
            Instruction::Push(Some(src)) => write!(f, "PUSH {}", src),
            Instruction::Push(None) => write!(f, "PUSH"),
            Instruction::Pop(Some(dst)) => write!(f, "POP {}", dst),
            Instruction::Pop(None) => write!(f, "POP"),
            Instruction::Call(name) => write!(f, "CALL {}", name),
            Instruction::Return => write!(f, "RETURN"),
        }
    }
}

/// An append-only ordered sequence of instructions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionList(Vec<Instruction>);

impl InstructionList {
    pub fn new() -> Self {
        InstructionList::default()
    }

    pub fn single(instr: Instruction) -> Self {
        InstructionList(vec![instr])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Instruction> for InstructionList {
    fn from(instr: Instruction) -> Self {
        InstructionList::single(instr)
    }
}

impl Add for InstructionList {
    type Output = InstructionList;
    fn add(mut self, mut rhs: InstructionList) -> InstructionList {
        self.0.append(&mut rhs.0);
        self
    }
}

impl Add<Instruction> for InstructionList {
    type Output = InstructionList;
    fn add(mut self, rhs: Instruction) -> InstructionList {
        self.0.push(rhs);
        self
    }
}

impl fmt::Display for InstructionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.0 {
            writeln!(f, "{}", instr)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation_preserves_order() {
        let a = InstructionList::single(Instruction::Label("l0".to_string()));
        let b = InstructionList::single(Instruction::Return);
        let joined = a + b;
        let rendered: Vec<String> = joined.iter().map(|i| i.to_string()).collect();
        assert_eq!(rendered, vec!["LABEL l0".to_string(), "RETURN".to_string()]);
    }

    #[test]
    fn display_matches_opcode_table() {
        let instr = Instruction::Add {
            dst: "%t2".into(),
            a: "%t0".into(),
            b: "%t1".into(),
        };
        assert_eq!(instr.to_string(), "ADD %t2, %t0, %t1");
    }
}
