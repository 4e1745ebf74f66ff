//! Construction of program trees.
//!
//! The builder interns every name into the given `StringTable` and numbers
//! annotatable nodes (expressions and identifiers) consecutively, starting at
//! zero for every builder.
use crate::{nodes::*, spanned::*};
use strtab::{StringTable, Symbol};

pub struct ProgramBuilder<'s, 't> {
    strtab: &'s mut StringTable<'t>,
    next_id: u32,
}

impl<'s, 't> ProgramBuilder<'s, 't> {
    pub fn new(strtab: &'s mut StringTable<'t>) -> Self {
        Self { strtab, next_id: 0 }
    }

    pub fn sym(&mut self, name: &'t str) -> Symbol<'t> {
        self.strtab.intern(name)
    }

    /// Number of ids handed out so far.
    pub fn node_count(&self) -> u32 {
        self.next_id
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn spanned_sym(&mut self, line: usize, name: &'t str) -> Spanned<Symbol<'t>> {
        Spanned::new(Span::new(line), self.sym(name))
    }

    fn expr(&mut self, line: usize, kind: ExprKind<'t>) -> Spanned<Expr<'t>> {
        let id = self.next_id();
        Spanned::new(Span::new(line), Expr { id, kind })
    }

    pub fn ident(&mut self, line: usize, name: &'t str) -> Spanned<Ident<'t>> {
        let id = self.next_id();
        let name = self.sym(name);
        Spanned::new(Span::new(line), Ident { id, name })
    }

    // types

    pub fn class_type(&mut self, name: &'t str) -> Type<'t> {
        Type::Class(self.sym(name))
    }

    // expressions

    pub fn int(&mut self, line: usize, value: i32) -> Spanned<Expr<'t>> {
        self.expr(line, ExprKind::Int(value))
    }

    pub fn boolean(&mut self, line: usize, value: bool) -> Spanned<Expr<'t>> {
        self.expr(line, ExprKind::Boolean(value))
    }

    pub fn var(&mut self, line: usize, name: &'t str) -> Spanned<Expr<'t>> {
        let ident = self.ident(line, name);
        self.expr(line, ExprKind::Var(ident.data))
    }

    pub fn this(&mut self, line: usize) -> Spanned<Expr<'t>> {
        self.expr(line, ExprKind::This)
    }

    pub fn binary(
        &mut self,
        line: usize,
        op: BinaryOp,
        lhs: Spanned<Expr<'t>>,
        rhs: Spanned<Expr<'t>>,
    ) -> Spanned<Expr<'t>> {
        self.expr(line, ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)))
    }

    pub fn not(&mut self, line: usize, operand: Spanned<Expr<'t>>) -> Spanned<Expr<'t>> {
        self.expr(line, ExprKind::Not(Box::new(operand)))
    }

    pub fn array_access(
        &mut self,
        line: usize,
        array: Spanned<Expr<'t>>,
        index: Spanned<Expr<'t>>,
    ) -> Spanned<Expr<'t>> {
        self.expr(
            line,
            ExprKind::ArrayAccess(Box::new(array), Box::new(index)),
        )
    }

    pub fn array_length(&mut self, line: usize, array: Spanned<Expr<'t>>) -> Spanned<Expr<'t>> {
        self.expr(line, ExprKind::ArrayLength(Box::new(array)))
    }

    pub fn call(
        &mut self,
        line: usize,
        target: Spanned<Expr<'t>>,
        method: &'t str,
        args: Vec<Spanned<Expr<'t>>>,
    ) -> Spanned<Expr<'t>> {
        let method = self.spanned_sym(line, method);
        self.expr(
            line,
            ExprKind::MethodInvocation(Box::new(target), method, args),
        )
    }

    pub fn new_object(&mut self, line: usize, class: &'t str) -> Spanned<Expr<'t>> {
        let class = self.spanned_sym(line, class);
        self.expr(line, ExprKind::NewObject(class))
    }

    pub fn new_int_array(&mut self, line: usize, size: Spanned<Expr<'t>>) -> Spanned<Expr<'t>> {
        self.expr(line, ExprKind::NewIntArray(Box::new(size)))
    }

    // statements

    pub fn assign(
        &mut self,
        line: usize,
        target: &'t str,
        value: Spanned<Expr<'t>>,
    ) -> Spanned<Stmt<'t>> {
        let target = self.ident(line, target);
        Spanned::new(Span::new(line), Stmt::Assign(target, Box::new(value)))
    }

    pub fn array_assign(
        &mut self,
        line: usize,
        target: &'t str,
        index: Spanned<Expr<'t>>,
        value: Spanned<Expr<'t>>,
    ) -> Spanned<Stmt<'t>> {
        let target = self.ident(line, target);
        Spanned::new(
            Span::new(line),
            Stmt::ArrayAssign(target, Box::new(index), Box::new(value)),
        )
    }

    pub fn print(&mut self, line: usize, value: Spanned<Expr<'t>>) -> Spanned<Stmt<'t>> {
        Spanned::new(Span::new(line), Stmt::Print(Box::new(value)))
    }

    pub fn if_else(
        &mut self,
        line: usize,
        cond: Spanned<Expr<'t>>,
        then: Spanned<Stmt<'t>>,
        els: Spanned<Stmt<'t>>,
    ) -> Spanned<Stmt<'t>> {
        Spanned::new(
            Span::new(line),
            Stmt::If(Box::new(cond), Box::new(then), Box::new(els)),
        )
    }

    pub fn while_loop(
        &mut self,
        line: usize,
        cond: Spanned<Expr<'t>>,
        body: Spanned<Stmt<'t>>,
    ) -> Spanned<Stmt<'t>> {
        Spanned::new(Span::new(line), Stmt::While(Box::new(cond), Box::new(body)))
    }

    pub fn block(&mut self, line: usize, stmts: Vec<Spanned<Stmt<'t>>>) -> Spanned<Stmt<'t>> {
        Spanned::new(Span::new(line), Stmt::Block(stmts))
    }

    // declarations

    pub fn var_decl(&mut self, line: usize, ty: Type<'t>, name: &'t str) -> Spanned<VarDecl<'t>> {
        let name = self.sym(name);
        Spanned::new(
            Span::new(line),
            VarDecl {
                ty: Spanned::new(Span::new(line), ty),
                name,
            },
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn method(
        &mut self,
        line: usize,
        return_ty: Type<'t>,
        name: &'t str,
        params: Vec<Spanned<VarDecl<'t>>>,
        locals: Vec<Spanned<VarDecl<'t>>>,
        body: Vec<Spanned<Stmt<'t>>>,
        return_expr: Spanned<Expr<'t>>,
    ) -> Spanned<MethodDeclaration<'t>> {
        let name = self.spanned_sym(line, name);
        Spanned::new(
            Span::new(line),
            MethodDeclaration {
                name,
                return_ty: Spanned::new(Span::new(line), return_ty),
                params,
                locals,
                body,
                return_expr: Box::new(return_expr),
            },
        )
    }

    pub fn class(
        &mut self,
        line: usize,
        name: &'t str,
        superclass: Option<&'t str>,
        fields: Vec<Spanned<VarDecl<'t>>>,
        methods: Vec<Spanned<MethodDeclaration<'t>>>,
    ) -> Spanned<ClassDeclaration<'t>> {
        let name = self.spanned_sym(line, name);
        let superclass = superclass.map(|superclass| self.spanned_sym(line, superclass));
        Spanned::new(
            Span::new(line),
            ClassDeclaration {
                name,
                superclass,
                fields,
                methods,
            },
        )
    }

    pub fn main_class(
        &mut self,
        line: usize,
        name: &'t str,
        arg_name: &'t str,
        body: Spanned<Stmt<'t>>,
    ) -> Spanned<MainClass<'t>> {
        let name = self.spanned_sym(line, name);
        let arg_name = self.sym(arg_name);
        Spanned::new(
            Span::new(line),
            MainClass {
                name,
                arg_name,
                body,
            },
        )
    }

    pub fn program(
        &mut self,
        main_class: Spanned<MainClass<'t>>,
        classes: Vec<Spanned<ClassDeclaration<'t>>>,
    ) -> Program<'t> {
        Program {
            main_class,
            classes,
        }
    }
}
