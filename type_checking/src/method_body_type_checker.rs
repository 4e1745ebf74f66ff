use crate::{
    checker::SemanticContext,
    semantic_error::{SemanticError, Site, Suggestion},
    type_analysis::{CallInfo, TypeAnalysis, VarInfo},
    type_system::{CheckedType, ClassTable},
    unused::{UnusedVariableReport, UnusedVariableTracker},
};
use ast::{BinaryOp, Span, Spanned};
use strtab::Symbol;
use symtab::MethodScope;

/// The type of an expression could not be determined because it, or one of
/// its operands, is erroneous. The error was already reported, so checks
/// that would compare against this expression are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouldNotDetermineType;

pub struct MethodBodyTypeChecker<'ctx, 'src, 'ts, 'ana> {
    pub context: &'ctx SemanticContext<'ctx>,
    pub class_table: &'ts ClassTable<'src>,
    pub current_class: Symbol<'src>,
    pub type_analysis: &'ana mut TypeAnalysis<'src>,
    pub local_scope: MethodScope<Symbol<'src>, CheckedType<'src>>,
    pub unused: Option<UnusedVariableTracker<'src>>,
}

impl<'ctx, 'src, 'ts, 'ana> MethodBodyTypeChecker<'ctx, 'src, 'ts, 'ana> {
    fn new(
        context: &'ctx SemanticContext<'ctx>,
        class_table: &'ts ClassTable<'src>,
        current_class: Symbol<'src>,
        type_analysis: &'ana mut TypeAnalysis<'src>,
    ) -> Self {
        MethodBodyTypeChecker {
            context,
            class_table,
            current_class,
            type_analysis,
            local_scope: MethodScope::new(),
            unused: None,
        }
    }

    /// The main class has no formals, locals or fields. `this` refers to
    /// the main class itself.
    pub fn check_main_class(
        main_class: &ast::MainClass<'src>,
        class_table: &'ts ClassTable<'src>,
        type_analysis: &'ana mut TypeAnalysis<'src>,
        context: &'ctx SemanticContext<'ctx>,
    ) {
        log::debug!("checking main class {}", main_class.name.data);
        let mut checker =
            MethodBodyTypeChecker::new(context, class_table, main_class.name.data, type_analysis);
        checker.check_type_stmt(&main_class.body);
    }

    pub fn check_methods(
        class_decl: &ast::ClassDeclaration<'src>,
        class_table: &'ts ClassTable<'src>,
        type_analysis: &'ana mut TypeAnalysis<'src>,
        unused: &mut UnusedVariableReport<'src>,
        context: &'ctx SemanticContext<'ctx>,
    ) {
        let current_class = class_decl.name.data;

        for method in &class_decl.methods {
            log::debug!("checking method {}.{}", current_class, method.name.data);

            let mut checker =
                MethodBodyTypeChecker::new(context, class_table, current_class, &mut *type_analysis);

            let declared = |decl: &Spanned<ast::VarDecl<'src>>| {
                (decl.name, CheckedType::from(decl.ty.data))
            };
            checker.local_scope.enter_method(
                method.params.iter().map(declared),
                method.locals.iter().map(declared),
            );
            if context.options.dump_method_tables {
                log::info!(
                    "method table of {}.{}:\n{}",
                    current_class,
                    method.name.data,
                    checker.dump_scope()
                );
            }
            if context.options.report_unused {
                checker.unused = Some(UnusedVariableTracker::seed(
                    current_class,
                    method.name.data,
                    &method.params,
                    &method.locals,
                ));
            }

            for stmt in &method.body {
                checker.check_type_stmt(stmt);
            }

            let return_ty = checker.type_expr(&method.return_expr);
            if context.options.strict.return_type {
                let declared_ty = CheckedType::from(method.return_ty.data);
                if let Ok(return_ty) = return_ty {
                    if !declared_ty.is_assignable_from(&return_ty) {
                        context.report_error(
                            method.return_expr.span,
                            SemanticError::mismatch(
                                Site::Return(method.name.data.to_string()),
                                declared_ty,
                                return_ty,
                            ),
                        );
                    }
                }
            }

            if let Some(tracker) = checker.unused.take() {
                unused.extend(tracker.finish());
            }
        }
    }

    fn dump_scope(&self) -> String {
        self.local_scope
            .iter()
            .map(|(name, ty)| format!("    {} {}\n", ty, name))
            .collect()
    }

    fn check_type_stmt(&mut self, stmt: &Spanned<ast::Stmt<'src>>) {
        use ast::Stmt::*;
        match &stmt.data {
            Block(stmts) => {
                for stmt in stmts {
                    self.check_type_stmt(stmt);
                }
            }
            If(cond, then_stmt, else_stmt) => {
                self.check_type_at(stmt.span, cond, CheckedType::Boolean, Site::IfCondition);
                self.check_type_stmt(then_stmt);
                self.check_type_stmt(else_stmt);
            }
            While(cond, body) => {
                self.check_type_at(stmt.span, cond, CheckedType::Boolean, Site::WhileCondition);
                self.check_type_stmt(body);
            }
            Print(expr) => self.check_type_at(stmt.span, expr, CheckedType::Int, Site::Print),
            Assign(target, value) => {
                let target_ty = self.resolve_var(target);
                let value_ty = self.type_expr(value);
                if let (Ok(target_ty), Ok(value_ty)) = (target_ty, value_ty) {
                    if !target_ty.is_assignable_from(&value_ty) {
                        self.context.report_error(
                            stmt.span,
                            SemanticError::mismatch(Site::Assign, target_ty, value_ty),
                        );
                    }
                }
            }
            ArrayAssign(target, index, value) => {
                if let Ok(target_ty) = self.resolve_var(target) {
                    if target_ty != CheckedType::IntArray {
                        self.context.report_error(
                            target.span,
                            SemanticError::mismatch(
                                Site::ArrayTarget,
                                CheckedType::IntArray,
                                target_ty,
                            ),
                        );
                    }
                }
                self.check_type(index, CheckedType::Int, Site::ArrayIndex);
                self.check_type(value, CheckedType::Int, Site::ArrayElement);
            }
        }
    }

    fn type_expr(
        &mut self,
        expr: &Spanned<ast::Expr<'src>>,
    ) -> Result<CheckedType<'src>, CouldNotDetermineType> {
        let t = self.type_expr_internal(expr);

        if let Ok(ty) = t {
            self.type_analysis.set_expr_type(expr.id, ty);
        }
        t
    }

    fn type_expr_internal(
        &mut self,
        expr: &Spanned<ast::Expr<'src>>,
    ) -> Result<CheckedType<'src>, CouldNotDetermineType> {
        use ast::ExprKind::*;
        match &expr.kind {
            Binary(op, lhs, rhs) => Ok(self.check_binary_expr(expr.span, *op, lhs, rhs)),
            Not(operand) => {
                let operand_ty = self.type_expr(operand);
                if self.context.options.strict.not_operand {
                    if let Ok(operand_ty) = operand_ty {
                        if operand_ty != CheckedType::Boolean {
                            self.context.report_error(
                                expr.span,
                                SemanticError::mismatch(
                                    Site::Not,
                                    CheckedType::Boolean,
                                    operand_ty,
                                ),
                            );
                        }
                    }
                }
                Ok(CheckedType::Boolean)
            }
            ArrayAccess(array, index) => {
                self.check_type(array, CheckedType::IntArray, Site::ArrayBase);
                self.check_type(index, CheckedType::Int, Site::ArrayIndex);
                Ok(CheckedType::Int)
            }
            ArrayLength(array) => {
                self.check_type(array, CheckedType::IntArray, Site::ArrayLength);
                Ok(CheckedType::Int)
            }
            MethodInvocation(target, name, args) => {
                self.check_method_invocation(expr, target, name, args)
            }
            Int(_) => Ok(CheckedType::Int),
            Boolean(_) => Ok(CheckedType::Boolean),
            Var(ident) => {
                let ty = self.resolve_var(&Spanned::new(expr.span, *ident));
                if let Some(unused) = &mut self.unused {
                    unused.mark_used(ident.name);
                }
                ty
            }
            This => Ok(CheckedType::TypeRef(self.current_class)),
            NewObject(class) => {
                if self.context.options.strict.new_object_class
                    && !self.class_table.contains(class.data)
                {
                    self.context.report_error(
                        class.span,
                        SemanticError::ClassDoesNotExist {
                            class: class.data.to_string(),
                        },
                    );
                    return Err(CouldNotDetermineType);
                }
                Ok(CheckedType::TypeRef(class.data))
            }
            NewIntArray(size) => {
                self.check_type(size, CheckedType::Int, Site::ArraySize);
                Ok(CheckedType::IntArray)
            }
        }
    }

    /// Both operands must have the same type. The result type only depends
    /// on the operator, so it is known even if an operand is erroneous.
    fn check_binary_expr(
        &mut self,
        span: Span,
        op: BinaryOp,
        lhs: &Spanned<ast::Expr<'src>>,
        rhs: &Spanned<ast::Expr<'src>>,
    ) -> CheckedType<'src> {
        let lhs_ty = self.type_expr(lhs);
        let rhs_ty = self.type_expr(rhs);

        if let (Ok(lhs_ty), Ok(rhs_ty)) = (lhs_ty, rhs_ty) {
            if !lhs_ty.is_assignable_from(&rhs_ty) {
                self.context.report_error(
                    span,
                    SemanticError::mismatch(Site::Binary(op), lhs_ty, rhs_ty),
                );
            }
        }

        match op {
            BinaryOp::LessThan => CheckedType::Boolean,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::LogicalAnd => {
                CheckedType::Int
            }
        }
    }

    fn check_type(
        &mut self,
        expr: &Spanned<ast::Expr<'src>>,
        expected_ty: CheckedType<'src>,
        site: Site,
    ) {
        self.check_type_at(expr.span, expr, expected_ty, site)
    }

    /// Like `check_type`, but a mismatch is reported at `span`. Conditions
    /// and printed values are reported at their statement.
    fn check_type_at(
        &mut self,
        span: Span,
        expr: &Spanned<ast::Expr<'src>>,
        expected_ty: CheckedType<'src>,
        site: Site,
    ) {
        if let Ok(ty) = self.type_expr(expr) {
            if !expected_ty.is_assignable_from(&ty) {
                self.context
                    .report_error(span, SemanticError::mismatch(site, expected_ty, ty));
            }
        }
    }

    fn check_method_invocation(
        &mut self,
        call: &Spanned<ast::Expr<'src>>,
        target: &Spanned<ast::Expr<'src>>,
        method_name: &Spanned<Symbol<'src>>,
        args: &[Spanned<ast::Expr<'src>>],
    ) -> Result<CheckedType<'src>, CouldNotDetermineType> {
        let class_table = self.class_table;
        let context = self.context;

        let class = match self.type_expr(target) {
            Ok(CheckedType::TypeRef(class)) => Ok(class),
            Ok(ty) => {
                self.context.report_error(
                    call.span,
                    SemanticError::NotAClass {
                        method: method_name.data.to_string(),
                        ty: ty.to_string(),
                    },
                );
                Err(CouldNotDetermineType)
            }
            Err(e) => Err(e),
        };

        let method = class.and_then(|class| match class_table.lookup_method(class, method_name.data) {
            Some(method) => Ok((class, method)),
            None => {
                context.report_error(
                    method_name.span,
                    SemanticError::UnknownMember {
                        method: method_name.data.to_string(),
                        class: class.to_string(),
                    },
                );
                Err(CouldNotDetermineType)
            }
        });

        // arguments are checked even if the method is unknown
        let arg_types: Vec<_> = args.iter().map(|arg| self.type_expr(arg)).collect();

        let (class, method) = method?;

        if method.params.len() != args.len() {
            self.context.report_error(
                call.span,
                SemanticError::ArityMismatch {
                    method: method_name.data.to_string(),
                    expected: method.params.len(),
                    actual: args.len(),
                },
            );
        }

        for ((arg, arg_ty), param) in args.iter().zip(&arg_types).zip(&method.params) {
            if let Ok(arg_ty) = arg_ty {
                if !param.ty.is_assignable_from(arg_ty) {
                    self.context.report_error(
                        arg.span,
                        SemanticError::mismatch(
                            Site::Argument(param.name.to_string(), method.name.to_string()),
                            param.ty,
                            *arg_ty,
                        ),
                    );
                }
            }
        }

        if let Ok(arg_types) = arg_types.into_iter().collect::<Result<Vec<_>, _>>() {
            self.type_analysis.set_call_info(
                call.id,
                CallInfo {
                    class,
                    arg_types,
                    return_ty: method.return_ty,
                },
            );
        }

        Ok(method.return_ty)
    }

    /// Formals and locals shadow fields. Fields are looked up along the
    /// superclass chain of the current class.
    fn resolve_var(
        &mut self,
        ident: &Spanned<ast::Ident<'src>>,
    ) -> Result<CheckedType<'src>, CouldNotDetermineType> {
        let name = ident.name;
        let info = if let Some(ty) = self.local_scope.lookup(name).cloned() {
            VarInfo {
                ty,
                is_field: false,
            }
        } else if let Some(ty) = self.class_table.lookup_field(self.current_class, name) {
            VarInfo { ty, is_field: true }
        } else {
            let candidates = self
                .local_scope
                .symbols()
                .chain(self.class_table.visible_fields(self.current_class));
            let suggestion = name.closest(candidates).map(|sym| sym.to_string());
            self.context.report_error(
                ident.span,
                SemanticError::UnknownIdentifier {
                    name: name.to_string(),
                    suggestion: Suggestion(suggestion),
                },
            );
            return Err(CouldNotDetermineType);
        };

        log::trace!("{} resolved to {}", ident.data.name, info.ty);
        self.type_analysis.set_var_info(ident.id, info);
        Ok(info.ty)
    }
}
