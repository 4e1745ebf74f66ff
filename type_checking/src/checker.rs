use crate::{
    method_body_type_checker::MethodBodyTypeChecker,
    options::ElaborationOptions,
    semantic_error::SemanticError,
    type_analysis::TypeAnalysis,
    type_system::{CheckedType, ClassMethodDef, ClassNotRegistered, ClassTable},
    unused::UnusedVariableReport,
};
use ast::{Span, Spanned};
use compiler_shared::{context::Context, timed_scope};

/// Everything the elaborator learned about a program. Diagnostics are not
/// part of it, they are accumulated in the `Context` passed to `check`.
#[derive(Debug)]
pub struct Elaboration<'src> {
    pub class_table: ClassTable<'src>,
    pub analysis: TypeAnalysis<'src>,
    pub unused: UnusedVariableReport<'src>,
}

/// Elaborates `program` in two passes: the first one collects all classes
/// with their fields and method signatures, the second one checks the
/// statements and expressions of every method body against them.
///
/// Elaboration always runs to completion. Erroneous expressions are left
/// unannotated and do not cause follow-up errors.
pub fn check<'src>(
    program: &ast::Program<'src>,
    context: &Context,
    options: &ElaborationOptions,
) -> Elaboration<'src> {
    timed_scope!(context.timings, "elaboration");
    let sem_context = SemanticContext::new(context, options);

    let class_table = build_class_table(program, &sem_context);
    if options.dump_class_table {
        log::info!("class table:\n{}", class_table);
    }

    let mut analysis = TypeAnalysis::new();
    let mut unused = UnusedVariableReport::new();
    {
        timed_scope!(context.timings, "elaboration: method bodies");
        MethodBodyTypeChecker::check_main_class(
            &program.main_class,
            &class_table,
            &mut analysis,
            &sem_context,
        );
        for class_decl in &program.classes {
            MethodBodyTypeChecker::check_methods(
                class_decl,
                &class_table,
                &mut analysis,
                &mut unused,
                &sem_context,
            );
        }
    }

    log::debug!(
        "elaboration finished: {} typed expressions, {} unused variables",
        analysis.typed_expr_count(),
        unused.len()
    );

    Elaboration {
        class_table,
        analysis,
        unused,
    }
}

pub struct SemanticContext<'ctx> {
    pub context: &'ctx Context,
    pub options: &'ctx ElaborationOptions,
}

impl<'ctx> SemanticContext<'ctx> {
    pub fn new(context: &'ctx Context, options: &'ctx ElaborationOptions) -> SemanticContext<'ctx> {
        SemanticContext { context, options }
    }

    pub fn report_error(&self, span: Span, error: SemanticError) {
        self.context.diagnostics.error(Spanned::new(span, error))
    }
}

fn build_class_table<'src>(
    program: &ast::Program<'src>,
    context: &SemanticContext<'_>,
) -> ClassTable<'src> {
    timed_scope!(context.context.timings, "elaboration: class table");
    let mut class_table = ClassTable::new();

    class_table.register_class(program.main_class.name.data, None);

    for class_decl in &program.classes {
        let superclass = class_decl.superclass.as_ref().map(|name| name.data);
        class_table.register_class(class_decl.name.data, superclass);
        // the class was registered right above
        declare_members(&mut class_table, class_decl)
            .expect("members are declared after their class");

        log::debug!(
            "registered class {} with {} fields and {} methods",
            class_decl.name.data,
            class_decl.fields.len(),
            class_decl.methods.len()
        );
    }

    // lookups stay finite on cycles, but the programmer should know
    for class_decl in &program.classes {
        if class_table.is_on_cycle(class_decl.name.data) {
            context.report_error(
                class_decl.name.span,
                SemanticError::CyclicInheritance {
                    class: class_decl.name.data.to_string(),
                },
            );
        }
    }

    class_table
}

fn declare_members<'src>(
    class_table: &mut ClassTable<'src>,
    class_decl: &ast::ClassDeclaration<'src>,
) -> Result<(), ClassNotRegistered> {
    let class = class_decl.name.data;
    for field in &class_decl.fields {
        class_table.add_field(class, field.name, CheckedType::from(field.ty.data))?;
    }
    for method in &class_decl.methods {
        class_table.add_method(class, ClassMethodDef::from(&method.data))?;
    }
    Ok(())
}
