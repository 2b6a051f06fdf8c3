//! CodeGenPass — lowers a type-checked AST to three-address code.
//!
//! Grounded in `original_source/asl/CodeGenListener.cpp`: the `_result`
//! synthetic parameter convention, the call protocol's PUSH/POP symmetry
//! (one leading bare `PUSH` plus one `PUSH` per argument, balanced by one
//! `POP` per argument plus a final `POP` after `CALL`), array-by-reference
//! argument passing via `ALOAD`, `FLOAT` coercion wherever an `Integer` value
//! flows into a `Float`-typed slot, and the write-string escape state
//! machine. `%`-modulo is lowered as `DIV; MUL; SUB` with no coercion,
//! since `TypeCheckPass` only accepts `%` between two `Integer` operands. This
//! pass re-enters the scopes `SymbolsPass` built (the same `push_this_scope`
//! dance `TypeCheckPass` does) because it needs `SymTable::is_parameter_class`
//! to tell an array parameter's slot (a handle, load it) from a plain array
//! local (already the base address).

pub mod builder;
pub mod instr;

use builder::CodeCounters;
pub use instr::{Instruction, InstructionList};

use crate::ast::{ArithOp, Expr, Function, Ident, LeftExpr, LeftExprKind, Literal, LogicalOp, Program, RelOp, Statement, UnaryOp};
use crate::decoration::TreeDecoration;
use crate::symtab::SymTable;
use crate::types::{TypeId, TypesMgr};

/// One function's lowered body: its calling convention and its code.
#[derive(Debug, Clone)]
pub struct Subroutine {
    pub name: String,
    pub params: Vec<String>,
    pub locals: Vec<(String, usize)>,
    pub body: InstructionList,
}

pub struct CodeGenPass<'a> {
    pub types: &'a TypesMgr,
    pub symbols: &'a mut SymTable,
    pub decorations: &'a mut TreeDecoration,
    counters: CodeCounters,
    current_ret_ty: Option<TypeId>,
}

impl<'a> CodeGenPass<'a> {
    pub fn new(types: &'a TypesMgr, symbols: &'a mut SymTable, decorations: &'a mut TreeDecoration) -> Self {
        CodeGenPass {
            types,
            symbols,
            decorations,
            counters: CodeCounters::new(),
            current_ret_ty: None,
        }
    }

    pub fn run(&mut self, program: &Program) -> Vec<Subroutine> {
        let sc = self.decorations.get_scope(program.id);
        self.symbols.push_this_scope(sc);
        let subs = program.functions.iter().map(|f| self.gen_function(f)).collect();
        self.symbols.pop_scope();
        subs
    }

    fn gen_function(&mut self, function: &Function) -> Subroutine {
        self.counters.reset();
        let func_ty = self.decorations.get_type(function.id);
        self.current_ret_ty = Some(self.types.get_func_return_type(func_ty));

        let sc = self.decorations.get_scope(function.id);
        self.symbols.push_this_scope(sc);

        let mut params = Vec::new();
        if function.name != "main" {
            params.push("_result".to_string());
        }
        params.extend(function.parameters.iter().map(|p| p.name.clone()));

        let mut locals = Vec::new();
        for decl in &function.declarations {
            let ty = self.decorations.get_type(decl.data.id());
            let size = self.types.get_size_of_type(ty);
            for name in &decl.names {
                locals.push((name.clone(), size));
            }
        }

        let mut body = InstructionList::new();
        for statement in &function.statements {
            body = body + self.gen_statement(statement);
        }
        if !matches!(body.iter().last(), Some(Instruction::Return)) {
            body = body + Instruction::Return;
        }

        self.symbols.pop_scope();

        Subroutine {
            name: function.name.clone(),
            params,
            locals,
            body,
        }
    }

    fn gen_statement(&mut self, statement: &Statement) -> InstructionList {
        let code = match statement {
            Statement::Assign { target, value, .. } => self.gen_assign(target, value),
            Statement::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => self.gen_if(cond, then_branch, else_branch.as_deref()),
            Statement::While { cond, body, .. } => self.gen_while(cond, body),
            Statement::Call { callee, args, .. } => {
                let mut code = self.gen_call_common(callee, args);
                code = code + Instruction::Pop(None);
                code
            }
            Statement::Read { target, .. } => self.gen_read(target),
            Statement::WriteExpr { value, .. } => self.gen_write_expr(value),
            Statement::WriteString { text, .. } => self.gen_write_string(text),
            Statement::Return {
                value, return_span, ..
            } => self.gen_return(value.as_ref(), *return_span),
        };
        self.decorations.put_code(statement.id(), code.clone());
        code
    }

    fn gen_assign(&mut self, target: &LeftExpr, value: &Expr) -> InstructionList {
        let (vsrc, vcode) = self.gen_expr(value);
        let target_ty = self.decorations.get_type(target.id);
        let value_ty = self.decorations.get_type(value.id());
        let (vsrc, vcode) = self.coerce_to(vsrc, vcode, value_ty, target_ty);
        self.store_left_expr(target, vsrc, vcode)
    }

    fn store_left_expr(&mut self, target: &LeftExpr, vsrc: String, vcode: InstructionList) -> InstructionList {
        match &target.kind {
            LeftExprKind::Ident(ident) => {
                vcode
                    + Instruction::Load {
                        dst: ident.name.clone(),
                        src: vsrc,
                    }
            }
            LeftExprKind::ArrayAccess { base, index, .. } => {
                let (isrc, icode) = self.gen_expr(index);
                vcode
                    + icode
                    + Instruction::XLoad {
                        base: base.name.clone(),
                        index: isrc,
                        src: vsrc,
                    }
            }
        }
    }

    fn gen_if(&mut self, cond: &Expr, then_branch: &[Statement], else_branch: Option<&[Statement]>) -> InstructionList {
        let (csrc, ccode) = self.gen_expr(cond);
        let n = self.counters.new_if_label();
        let mut code = ccode;
        let mut then_code = InstructionList::new();
        for s in then_branch {
            then_code = then_code + self.gen_statement(s);
        }
        match else_branch {
            None => {
                let end_label = format!("endif{}", n);
                code = code
                    + Instruction::FJump {
                        cond: csrc,
                        label: end_label.clone(),
                    }
                    + then_code
                    + Instruction::Label(end_label);
            }
            Some(else_branch) => {
                let else_label = format!("else{}", n);
                let end_label = format!("endif{}", n);
                let mut else_code = InstructionList::new();
                for s in else_branch {
                    else_code = else_code + self.gen_statement(s);
                }
                code = code
                    + Instruction::FJump {
                        cond: csrc,
                        label: else_label.clone(),
                    }
                    + then_code
                    + Instruction::UJump(end_label.clone())
                    + Instruction::Label(else_label)
                    + else_code
                    + Instruction::Label(end_label);
            }
        }
        code
    }

    fn gen_while(&mut self, cond: &Expr, body: &[Statement]) -> InstructionList {
        let n = self.counters.new_while_label();
        let start_label = format!("while{}", n);
        let end_label = format!("endwhile{}", n);
        let (csrc, ccode) = self.gen_expr(cond);
        let mut body_code = InstructionList::new();
        for s in body {
            body_code = body_code + self.gen_statement(s);
        }
        InstructionList::single(Instruction::Label(start_label.clone()))
            + ccode
            + Instruction::FJump {
                cond: csrc,
                label: end_label.clone(),
            }
            + body_code
            + Instruction::UJump(start_label)
            + Instruction::Label(end_label)
    }

    fn gen_read(&mut self, target: &LeftExpr) -> InstructionList {
        let ty = self.decorations.get_type(target.id);
        let tmp = self.counters.new_temp();
        let read_instr = if self.types.is_character_ty(ty) {
            Instruction::ReadC { dst: tmp.clone() }
        } else if self.types.is_float_ty(ty) {
            Instruction::ReadF { dst: tmp.clone() }
        } else {
            Instruction::ReadI { dst: tmp.clone() }
        };
        let code = InstructionList::single(read_instr);
        self.store_left_expr(target, tmp, code)
    }

    fn gen_write_expr(&mut self, value: &Expr) -> InstructionList {
        let (vsrc, vcode) = self.gen_expr(value);
        let ty = self.decorations.get_type(value.id());
        let write_instr = if self.types.is_character_ty(ty) {
            Instruction::WriteC { src: vsrc }
        } else if self.types.is_float_ty(ty) {
            Instruction::WriteF { src: vsrc }
        } else {
            Instruction::WriteI { src: vsrc }
        };
        vcode + write_instr
    }

    /// `\n` lowers to a bare `WRITELN`; `\t`, `\"` and `\\` lower to a
    /// `CHLOAD`+`WRITEC` pair for the escaped character; every other
    /// character lowers to the same pair for itself.
    fn gen_write_string(&mut self, text: &str) -> InstructionList {
        let mut code = InstructionList::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.peek().copied() {
                    Some('n') => {
                        chars.next();
                        code = code + Instruction::WriteLn;
                        continue;
                    }
                    Some('t') => {
                        chars.next();
                        code = code + self.chload_writec('\t');
                        continue;
                    }
                    Some('"') => {
                        chars.next();
                        code = code + self.chload_writec('"');
                        continue;
                    }
                    Some('\\') => {
                        chars.next();
                        code = code + self.chload_writec('\\');
                        continue;
                    }
                    _ => {
                        code = code + self.chload_writec('\\');
                        continue;
                    }
                }
            }
            code = code + self.chload_writec(c);
        }
        code
    }

    fn chload_writec(&mut self, c: char) -> InstructionList {
        let tmp = self.counters.new_temp();
        InstructionList::single(Instruction::ChLoad {
            dst: tmp.clone(),
            lit: format!("{:?}", c),
        }) + Instruction::WriteC { src: tmp }
    }

    fn gen_return(&mut self, value: Option<&Expr>, return_span: crate::span::SourceSpan) -> InstructionList {
        let _ = return_span;
        let ret_ty = self.current_ret_ty.expect("gen_return called outside a function body");
        match value {
            Some(expr) => {
                let (vsrc, vcode) = self.gen_expr(expr);
                let value_ty = self.decorations.get_type(expr.id());
                let (vsrc, vcode) = self.coerce_to(vsrc, vcode, value_ty, ret_ty);
                vcode
                    + Instruction::Load {
                        dst: "_result".to_string(),
                        src: vsrc,
                    }
                    + Instruction::Return
            }
            None => InstructionList::single(Instruction::Return),
        }
    }

    fn gen_expr(&mut self, expr: &Expr) -> (String, InstructionList) {
        let (dst, code) = match expr {
            Expr::Ident(ident) => self.gen_ident(ident),
            Expr::ArrayAccess { base, index, .. } => self.gen_array_access(base, index),
            Expr::Literal { value, .. } => self.gen_literal(*value),
            Expr::Unary { op, operand, .. } => self.gen_unary(*op, operand),
            Expr::Parenthesis { inner, .. } => self.gen_expr(inner),
            Expr::Arithmetic { op, lhs, rhs, .. } => self.gen_arithmetic(*op, lhs, rhs, expr.id()),
            Expr::Relational { op, lhs, rhs, .. } => self.gen_relational(*op, lhs, rhs),
            Expr::Logical { op, lhs, rhs, .. } => self.gen_logical(*op, lhs, rhs),
            Expr::Call { callee, args, .. } => {
                let mut code = self.gen_call_common(callee, args);
                let dst = self.counters.new_temp();
                code = code + Instruction::Pop(Some(dst.clone()));
                (dst, code)
            }
        };
        self.decorations.put_addr(expr.id(), dst.clone());
        self.decorations.put_code(expr.id(), code.clone());
        (dst, code)
    }

    /// An identifier's address is its own name, with no instruction emitted,
    /// except an array parameter: its slot holds a handle that must be
    /// loaded before it can be indexed or forwarded.
    fn gen_ident(&mut self, ident: &Ident) -> (String, InstructionList) {
        let ty = self.decorations.get_type(ident.id);
        if self.types.is_array_ty(ty) && self.symbols.is_parameter_class(&ident.name) {
            let dst = self.counters.new_temp();
            let code = InstructionList::single(Instruction::Load {
                dst: dst.clone(),
                src: ident.name.clone(),
            });
            (dst, code)
        } else {
            (ident.name.clone(), InstructionList::new())
        }
    }

    fn gen_array_access(&mut self, base: &Ident, index: &Expr) -> (String, InstructionList) {
        let (isrc, icode) = self.gen_expr(index);
        let dst = self.counters.new_temp();
        let code = icode
            + Instruction::LoadX {
                dst: dst.clone(),
                base: base.name.clone(),
                index: isrc,
            };
        (dst, code)
    }

    fn gen_literal(&mut self, value: Literal) -> (String, InstructionList) {
        let dst = self.counters.new_temp();
        let instr = match value {
            Literal::Integer(n) => Instruction::ILoad {
                dst: dst.clone(),
                lit: n.to_string(),
            },
            Literal::Float(f) => Instruction::FLoad {
                dst: dst.clone(),
                lit: f.to_string(),
            },
            Literal::Boolean(b) => Instruction::ILoad {
                dst: dst.clone(),
                lit: if b { "1".to_string() } else { "0".to_string() },
            },
            Literal::Character(c) => Instruction::ChLoad {
                dst: dst.clone(),
                lit: format!("{:?}", c),
            },
        };
        (dst, InstructionList::single(instr))
    }

    fn gen_unary(&mut self, op: UnaryOp, operand: &Expr) -> (String, InstructionList) {
        let (src, code) = self.gen_expr(operand);
        match op {
            UnaryOp::Plus => (src, code),
            UnaryOp::Neg => {
                let ty = self.decorations.get_type(operand.id());
                let dst = self.counters.new_temp();
                let instr = if self.types.is_float_ty(ty) {
                    Instruction::FNeg { dst: dst.clone(), a: src }
                } else {
                    Instruction::Neg { dst: dst.clone(), a: src }
                };
                (dst, code + instr)
            }
            UnaryOp::Not => {
                let dst = self.counters.new_temp();
                let code = code + Instruction::Not { dst: dst.clone(), a: src };
                (dst, code)
            }
        }
    }

    fn coerce_to(
        &mut self,
        src: String,
        code: InstructionList,
        src_ty: TypeId,
        dst_ty: TypeId,
    ) -> (String, InstructionList) {
        if self.types.is_float_ty(dst_ty) && self.types.is_integer_ty(src_ty) {
            let coerced = self.counters.new_temp();
            let code = code
                + Instruction::Float {
                    dst: coerced.clone(),
                    src,
                };
            (coerced, code)
        } else {
            (src, code)
        }
    }

    fn gen_arithmetic(
        &mut self,
        op: ArithOp,
        lhs: &Expr,
        rhs: &Expr,
        result_node: crate::decoration::NodeId,
    ) -> (String, InstructionList) {
        let (lsrc, lcode) = self.gen_expr(lhs);
        let (rsrc, rcode) = self.gen_expr(rhs);
        let mut code = lcode + rcode;

        if op == ArithOp::Mod {
            let t1 = self.counters.new_temp();
            let t2 = self.counters.new_temp();
            let dst = self.counters.new_temp();
            code = code
                + Instruction::Div {
                    dst: t1.clone(),
                    a: lsrc.clone(),
                    b: rsrc.clone(),
                }
                + Instruction::Mul {
                    dst: t2.clone(),
                    a: t1,
                    b: rsrc,
                }
                + Instruction::Sub { dst: dst.clone(), a: lsrc, b: t2 };
            return (dst, code);
        }

        let result_ty = self.decorations.get_type(result_node);
        let lty = self.decorations.get_type(lhs.id());
        let rty = self.decorations.get_type(rhs.id());
        let (lsrc, code2) = self.coerce_to(lsrc, InstructionList::new(), lty, result_ty);
        code = code + code2;
        let (rsrc, code3) = self.coerce_to(rsrc, InstructionList::new(), rty, result_ty);
        code = code + code3;

        let is_float = self.types.is_float_ty(result_ty);
        let dst = self.counters.new_temp();
        let instr = match (op, is_float) {
            (ArithOp::Mul, false) => Instruction::Mul { dst: dst.clone(), a: lsrc, b: rsrc },
            (ArithOp::Mul, true) => Instruction::FMul { dst: dst.clone(), a: lsrc, b: rsrc },
            (ArithOp::Div, false) => Instruction::Div { dst: dst.clone(), a: lsrc, b: rsrc },
            (ArithOp::Div, true) => Instruction::FDiv { dst: dst.clone(), a: lsrc, b: rsrc },
            (ArithOp::Add, false) => Instruction::Add { dst: dst.clone(), a: lsrc, b: rsrc },
            (ArithOp::Add, true) => Instruction::FAdd { dst: dst.clone(), a: lsrc, b: rsrc },
            (ArithOp::Sub, false) => Instruction::Sub { dst: dst.clone(), a: lsrc, b: rsrc },
            (ArithOp::Sub, true) => Instruction::FSub { dst: dst.clone(), a: lsrc, b: rsrc },
            (ArithOp::Mod, _) => unreachable!("ArithOp::Mod handled above"),
        };
        code = code + instr;
        (dst, code)
    }

    fn gen_relational(&mut self, op: RelOp, lhs: &Expr, rhs: &Expr) -> (String, InstructionList) {
        let (lsrc, lcode) = self.gen_expr(lhs);
        let (rsrc, rcode) = self.gen_expr(rhs);
        let lty = self.decorations.get_type(lhs.id());
        let rty = self.decorations.get_type(rhs.id());
        let is_float = self.types.is_float_ty(lty) || self.types.is_float_ty(rty);

        let mut code = lcode + rcode;
        let (lsrc, code2) = self.coerce_if_int_to_float(lsrc, lty, is_float);
        code = code + code2;
        let (rsrc, code3) = self.coerce_if_int_to_float(rsrc, rty, is_float);
        code = code + code3;

        let dst = self.counters.new_temp();
        // `>`/`>=` have no dedicated opcode; swap operands and reuse `</`<=`.
        let (a, b) = match op {
            RelOp::Gt | RelOp::Ge => (rsrc, lsrc),
            _ => (lsrc, rsrc),
        };
        let instr = match op {
            RelOp::Eq => {
                if is_float {
                    Instruction::FEq { dst: dst.clone(), a, b }
                } else {
                    Instruction::Eq { dst: dst.clone(), a, b }
                }
            }
            RelOp::Neq => {
                let eq_dst = self.counters.new_temp();
                let eq_instr = if is_float {
                    Instruction::FEq { dst: eq_dst.clone(), a, b }
                } else {
                    Instruction::Eq { dst: eq_dst.clone(), a, b }
                };
                code = code + eq_instr;
                Instruction::Not { dst: dst.clone(), a: eq_dst }
            }
            RelOp::Lt | RelOp::Gt => {
                if is_float {
                    Instruction::FLt { dst: dst.clone(), a, b }
                } else {
                    Instruction::Lt { dst: dst.clone(), a, b }
                }
            }
            RelOp::Le | RelOp::Ge => {
                if is_float {
                    Instruction::FLe { dst: dst.clone(), a, b }
                } else {
                    Instruction::Le { dst: dst.clone(), a, b }
                }
            }
        };
        code = code + instr;
        (dst, code)
    }

    /// Relational lowering's destination is always Boolean, so coercion here
    /// is driven directly by whether either operand is Float rather than by
    /// `coerce_to`'s dst-type check.
    fn coerce_if_int_to_float(
        &mut self,
        src: String,
        src_ty: TypeId,
        need_float: bool,
    ) -> (String, InstructionList) {
        if need_float && self.types.is_integer_ty(src_ty) {
            let coerced = self.counters.new_temp();
            let code = InstructionList::single(Instruction::Float {
                dst: coerced.clone(),
                src,
            });
            (coerced, code)
        } else {
            (src, InstructionList::new())
        }
    }

    fn gen_logical(&mut self, op: LogicalOp, lhs: &Expr, rhs: &Expr) -> (String, InstructionList) {
        let (lsrc, lcode) = self.gen_expr(lhs);
        let (rsrc, rcode) = self.gen_expr(rhs);
        let dst = self.counters.new_temp();
        let instr = match op {
            LogicalOp::And => Instruction::And { dst: dst.clone(), a: lsrc, b: rsrc },
            LogicalOp::Or => Instruction::Or { dst: dst.clone(), a: lsrc, b: rsrc },
        };
        (dst, lcode + rcode + instr)
    }

    fn gen_call_common(&mut self, callee: &Ident, args: &[Expr]) -> InstructionList {
        let callee_func_ty = self.decorations.get_type(callee.id);
        let param_types = self.types.get_func_params_types(callee_func_ty);

        let mut code = InstructionList::single(Instruction::Push(None));
        for (i, arg) in args.iter().enumerate() {
            let (asrc, acode) = self.gen_expr(arg);
            code = code + acode;
            let arg_ty = self.decorations.get_type(arg.id());
            let pushed = if self.types.is_array_ty(arg_ty) {
                let addr = self.counters.new_temp();
                code = code
                    + Instruction::ALoad {
                        dst: addr.clone(),
                        base: asrc,
                    };
                addr
            } else if i < param_types.len()
                && self.types.is_float_ty(param_types[i])
                && self.types.is_integer_ty(arg_ty)
            {
                let coerced = self.counters.new_temp();
                code = code
                    + Instruction::Float {
                        dst: coerced.clone(),
                        src: asrc,
                    };
                coerced
            } else {
                asrc
            };
            code = code + Instruction::Push(Some(pushed));
        }
        code = code + Instruction::Call(callee.name.clone());
        for _ in 0..args.len() {
            code = code + Instruction::Pop(None);
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Function, Program};
    use crate::passes::symbols::SymbolsPass;
    use crate::passes::typecheck::TypeCheckPass;
    use crate::symtab::SymTable;
    use crate::errors::SemErrors;
    use crate::span::SourceSpan;

    fn dummy_span() -> SourceSpan {
        SourceSpan::synthetic()
    }

    fn analyze(program: &Program) -> (TypesMgr, SymTable, TreeDecoration) {
        let mut types = TypesMgr::new();
        let mut symbols = SymTable::new();
        let mut decorations = TreeDecoration::new();
        let mut errors = SemErrors::new();
        SymbolsPass::new(&mut types, &mut symbols, &mut decorations, &mut errors).run(program);
        TypeCheckPass::new(&mut types, &mut symbols, &mut decorations, &mut errors).run(program);
        assert!(errors.is_empty(), "unexpected errors: {}", errors);
        (types, symbols, decorations)
    }

    #[test]
    fn write_string_newline_lowers_to_bare_writeln() {
        let stmt = Statement::write_string("hi\\n", dummy_span());
        let func = Function::new("main", dummy_span(), vec![], None, vec![], vec![stmt], dummy_span());
        let program = Program::new(vec![func], dummy_span());
        let (types, mut symbols, mut decorations) = analyze(&program);
        let mut gen = CodeGenPass::new(&types, &mut symbols, &mut decorations);
        let subs = gen.run(&program);
        let rendered = subs[0].body.to_string();
        assert!(rendered.contains("WRITELN"));
    }

    #[test]
    fn return_value_is_stored_into_result_slot() {
        use crate::ast::{PrimitiveType, Type};
        let stmt = Statement::return_stmt(
            Some(Expr::literal(Literal::Integer(1), dummy_span())),
            dummy_span(),
            dummy_span(),
        );
        let func = Function::new(
            "f",
            dummy_span(),
            vec![],
            Some(Type::new(PrimitiveType::Int, dummy_span())),
            vec![],
            vec![stmt],
            dummy_span(),
        );
        let main = Function::new("main", dummy_span(), vec![], None, vec![], vec![], dummy_span());
        let program = Program::new(vec![func, main], dummy_span());
        let (types, mut symbols, mut decorations) = analyze(&program);
        let mut gen = CodeGenPass::new(&types, &mut symbols, &mut decorations);
        let subs = gen.run(&program);
        assert_eq!(subs[0].params, vec!["_result".to_string()]);
        let rendered = subs[0].body.to_string();
        assert!(rendered.contains("LOAD _result"));
        assert!(rendered.contains("RETURN"));
    }

    #[test]
    fn call_protocol_balances_push_and_pop() {
        use crate::ast::{Data, PrimitiveType, Type, Parameter as AstParameter};
        let callee = Function::new(
            "g",
            dummy_span(),
            vec![AstParameter::new("x", Data::scalar(Type::new(PrimitiveType::Int, dummy_span()), dummy_span()), dummy_span())],
            Some(Type::new(PrimitiveType::Int, dummy_span())),
            vec![],
            vec![Statement::return_stmt(
                Some(Expr::ident("x", dummy_span())),
                dummy_span(),
                dummy_span(),
            )],
            dummy_span(),
        );
        let call_stmt = Statement::write_expr(
            Expr::call(Ident::new("g", dummy_span()), vec![Expr::literal(Literal::Integer(1), dummy_span())], dummy_span()),
            dummy_span(),
        );
        let main = Function::new("main", dummy_span(), vec![], None, vec![], vec![call_stmt], dummy_span());
        let program = Program::new(vec![callee, main], dummy_span());
        let (types, mut symbols, mut decorations) = analyze(&program);
        let mut gen = CodeGenPass::new(&types, &mut symbols, &mut decorations);
        let subs = gen.run(&program);
        let main_sub = subs.iter().find(|s| s.name == "main").unwrap();
        let pushes = main_sub.body.iter().filter(|i| matches!(i, Instruction::Push(_))).count();
        let pops = main_sub.body.iter().filter(|i| matches!(i, Instruction::Pop(_))).count();
        assert_eq!(pushes, pops);
    }

    #[test]
    fn reading_a_scalar_ident_emits_no_load() {
        let stmt = Statement::write_expr(Expr::ident("x", dummy_span()), dummy_span());
        let func = Function::new(
            "f",
            dummy_span(),
            vec![crate::ast::Parameter::new(
                "x",
                crate::ast::Data::scalar(crate::ast::Type::new(crate::ast::PrimitiveType::Int, dummy_span()), dummy_span()),
                dummy_span(),
            )],
            None,
            vec![],
            vec![stmt],
            dummy_span(),
        );
        let main = Function::new("main", dummy_span(), vec![], None, vec![], vec![], dummy_span());
        let program = Program::new(vec![func, main], dummy_span());
        let (types, mut symbols, mut decorations) = analyze(&program);
        let mut gen = CodeGenPass::new(&types, &mut symbols, &mut decorations);
        let subs = gen.run(&program);
        let f_sub = subs.iter().find(|s| s.name == "f").unwrap();
        assert!(!f_sub.body.to_string().contains("LOAD"));
        assert!(f_sub.body.to_string().contains("WRITEI x"));
    }

    #[test]
    fn forwarding_an_array_parameter_loads_its_handle_before_aload() {
        use crate::ast::{Data, Parameter as AstParameter, PrimitiveType, Type};
        let array_data = || Data::array(4, Type::new(PrimitiveType::Int, dummy_span()), dummy_span());
        let g = Function::new(
            "g",
            dummy_span(),
            vec![AstParameter::new("a", array_data(), dummy_span())],
            Some(Type::new(PrimitiveType::Int, dummy_span())),
            vec![],
            vec![Statement::return_stmt(
                Some(Expr::literal(Literal::Integer(0), dummy_span())),
                dummy_span(),
                dummy_span(),
            )],
            dummy_span(),
        );
        let forward = Statement::write_expr(
            Expr::call(Ident::new("g", dummy_span()), vec![Expr::ident("a", dummy_span())], dummy_span()),
            dummy_span(),
        );
        let f = Function::new(
            "f",
            dummy_span(),
            vec![AstParameter::new("a", array_data(), dummy_span())],
            None,
            vec![],
            vec![forward],
            dummy_span(),
        );
        let main = Function::new("main", dummy_span(), vec![], None, vec![], vec![], dummy_span());
        let program = Program::new(vec![g, f, main], dummy_span());
        let (types, mut symbols, mut decorations) = analyze(&program);
        let mut gen = CodeGenPass::new(&types, &mut symbols, &mut decorations);
        let subs = gen.run(&program);
        let f_sub = subs.iter().find(|s| s.name == "f").unwrap();
        let rendered = f_sub.body.to_string();
        assert!(rendered.contains("LOAD "));
        assert!(rendered.contains("ALOAD"));
    }
}
