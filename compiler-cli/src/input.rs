//! JSON representation of an already-parsed program.
//!
//! Every node carries the source line it was parsed from. Types are written
//! as in the source (`int`, `boolean`, `int[]` or a class name). Statements
//! and expressions are objects tagged by `kind`:
//!
//! ```json
//! { "kind": "print", "line": 3,
//!   "value": { "kind": "binary", "line": 3, "op": "add",
//!              "lhs": { "kind": "int", "line": 3, "value": 1 },
//!              "rhs": { "kind": "var", "line": 3, "name": "x" } } }
//! ```
use ast::{BinaryOp, Expr, Program, ProgramBuilder, Spanned, Stmt, Type, VarDecl};
use serde_derive::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProgramInput {
    pub main_class: MainClassInput,
    #[serde(default)]
    pub classes: Vec<ClassInput>,
}

#[derive(Debug, Deserialize)]
pub struct MainClassInput {
    pub name: String,
    pub line: usize,
    #[serde(default)]
    pub arg: String,
    pub body: StmtInput,
}

#[derive(Debug, Deserialize)]
pub struct ClassInput {
    pub name: String,
    pub line: usize,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub fields: Vec<VarInput>,
    #[serde(default)]
    pub methods: Vec<MethodInput>,
}

#[derive(Debug, Deserialize)]
pub struct VarInput {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Deserialize)]
pub struct MethodInput {
    pub name: String,
    pub line: usize,
    pub returns: String,
    #[serde(default)]
    pub params: Vec<VarInput>,
    #[serde(default)]
    pub locals: Vec<VarInput>,
    #[serde(default)]
    pub body: Vec<StmtInput>,
    #[serde(rename = "return")]
    pub return_expr: ExprInput,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StmtInput {
    Block {
        line: usize,
        #[serde(default)]
        stmts: Vec<StmtInput>,
    },
    If {
        line: usize,
        cond: ExprInput,
        then: Box<StmtInput>,
        #[serde(rename = "else")]
        otherwise: Box<StmtInput>,
    },
    While {
        line: usize,
        cond: ExprInput,
        body: Box<StmtInput>,
    },
    Print {
        line: usize,
        value: ExprInput,
    },
    Assign {
        line: usize,
        target: String,
        value: ExprInput,
    },
    ArrayAssign {
        line: usize,
        target: String,
        index: ExprInput,
        value: ExprInput,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprInput {
    Binary {
        line: usize,
        op: OpInput,
        lhs: Box<ExprInput>,
        rhs: Box<ExprInput>,
    },
    Not {
        line: usize,
        operand: Box<ExprInput>,
    },
    ArrayAccess {
        line: usize,
        array: Box<ExprInput>,
        index: Box<ExprInput>,
    },
    ArrayLength {
        line: usize,
        array: Box<ExprInput>,
    },
    Call {
        line: usize,
        target: Box<ExprInput>,
        method: String,
        #[serde(default)]
        args: Vec<ExprInput>,
    },
    Int {
        line: usize,
        value: i32,
    },
    Boolean {
        line: usize,
        value: bool,
    },
    Var {
        line: usize,
        name: String,
    },
    This {
        line: usize,
    },
    NewObject {
        line: usize,
        class: String,
    },
    NewIntArray {
        line: usize,
        size: Box<ExprInput>,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum OpInput {
    #[serde(rename = "add")]
    Add,
    #[serde(rename = "sub")]
    Sub,
    #[serde(rename = "times")]
    Mul,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "lt")]
    LessThan,
}

impl From<OpInput> for BinaryOp {
    fn from(op: OpInput) -> Self {
        match op {
            OpInput::Add => BinaryOp::Add,
            OpInput::Sub => BinaryOp::Sub,
            OpInput::Mul => BinaryOp::Mul,
            OpInput::And => BinaryOp::LogicalAnd,
            OpInput::LessThan => BinaryOp::LessThan,
        }
    }
}

impl ProgramInput {
    /// The returned tree borrows all names from `self`.
    pub fn build<'t>(&'t self, b: &mut ProgramBuilder<'_, 't>) -> Program<'t> {
        let body = self.main_class.body.build(b);
        let main_class = b.main_class(
            self.main_class.line,
            &self.main_class.name,
            &self.main_class.arg,
            body,
        );
        let classes = self.classes.iter().map(|class| class.build(b)).collect();
        b.program(main_class, classes)
    }
}

impl ClassInput {
    fn build<'t>(&'t self, b: &mut ProgramBuilder<'_, 't>) -> Spanned<ast::ClassDeclaration<'t>> {
        let fields = self.fields.iter().map(|field| field.build(b)).collect();
        let methods = self.methods.iter().map(|method| method.build(b)).collect();
        b.class(
            self.line,
            &self.name,
            self.extends.as_ref().map(String::as_str),
            fields,
            methods,
        )
    }
}

impl VarInput {
    fn build<'t>(&'t self, b: &mut ProgramBuilder<'_, 't>) -> Spanned<VarDecl<'t>> {
        let ty = build_type(b, &self.ty);
        b.var_decl(self.line, ty, &self.name)
    }
}

fn build_type<'t>(b: &mut ProgramBuilder<'_, 't>, ty: &'t str) -> Type<'t> {
    match ty {
        "int" => Type::Int,
        "boolean" => Type::Boolean,
        "int[]" => Type::IntArray,
        class => b.class_type(class),
    }
}

impl MethodInput {
    fn build<'t>(
        &'t self,
        b: &mut ProgramBuilder<'_, 't>,
    ) -> Spanned<ast::MethodDeclaration<'t>> {
        let return_ty = build_type(b, &self.returns);
        let params = self.params.iter().map(|param| param.build(b)).collect();
        let locals = self.locals.iter().map(|local| local.build(b)).collect();
        let body = self.body.iter().map(|stmt| stmt.build(b)).collect();
        let return_expr = self.return_expr.build(b);
        b.method(
            self.line,
            return_ty,
            &self.name,
            params,
            locals,
            body,
            return_expr,
        )
    }
}

impl StmtInput {
    fn build<'t>(&'t self, b: &mut ProgramBuilder<'_, 't>) -> Spanned<Stmt<'t>> {
        use self::StmtInput::*;
        match self {
            Block { line, stmts } => {
                let stmts = stmts.iter().map(|stmt| stmt.build(b)).collect();
                b.block(*line, stmts)
            }
            If {
                line,
                cond,
                then,
                otherwise,
            } => {
                let cond = cond.build(b);
                let then = then.build(b);
                let otherwise = otherwise.build(b);
                b.if_else(*line, cond, then, otherwise)
            }
            While { line, cond, body } => {
                let cond = cond.build(b);
                let body = body.build(b);
                b.while_loop(*line, cond, body)
            }
            Print { line, value } => {
                let value = value.build(b);
                b.print(*line, value)
            }
            Assign {
                line,
                target,
                value,
            } => {
                let value = value.build(b);
                b.assign(*line, target, value)
            }
            ArrayAssign {
                line,
                target,
                index,
                value,
            } => {
                let index = index.build(b);
                let value = value.build(b);
                b.array_assign(*line, target, index, value)
            }
        }
    }
}

impl ExprInput {
    fn build<'t>(&'t self, b: &mut ProgramBuilder<'_, 't>) -> Spanned<Expr<'t>> {
        use self::ExprInput::*;
        match self {
            Binary { line, op, lhs, rhs } => {
                let lhs = lhs.build(b);
                let rhs = rhs.build(b);
                b.binary(*line, BinaryOp::from(*op), lhs, rhs)
            }
            Not { line, operand } => {
                let operand = operand.build(b);
                b.not(*line, operand)
            }
            ArrayAccess { line, array, index } => {
                let array = array.build(b);
                let index = index.build(b);
                b.array_access(*line, array, index)
            }
            ArrayLength { line, array } => {
                let array = array.build(b);
                b.array_length(*line, array)
            }
            Call {
                line,
                target,
                method,
                args,
            } => {
                let target = target.build(b);
                let args = args.iter().map(|arg| arg.build(b)).collect();
                b.call(*line, target, method, args)
            }
            Int { line, value } => b.int(*line, *value),
            Boolean { line, value } => b.boolean(*line, *value),
            Var { line, name } => b.var(*line, name),
            This { line } => b.this(*line),
            NewObject { line, class } => b.new_object(*line, class),
            NewIntArray { line, size } => {
                let size = size.build(b);
                b.new_int_array(*line, size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strtab::StringTable;

    const GETTER: &str = r#"{
        "main_class": {
            "name": "Main", "line": 1, "arg": "args",
            "body": { "kind": "print", "line": 2, "value": {
                "kind": "call", "line": 2, "method": "get",
                "target": { "kind": "new_object", "line": 2, "class": "A" } } }
        },
        "classes": [ {
            "name": "A", "line": 3,
            "fields": [ { "type": "int", "name": "x", "line": 4 } ],
            "methods": [ {
                "name": "get", "line": 5, "returns": "int",
                "return": { "kind": "var", "line": 5, "name": "x" }
            } ]
        } ]
    }"#;

    #[test]
    fn json_tree_equals_built_tree() {
        let input: ProgramInput = serde_json::from_str(GETTER).expect("valid program");

        let mut strtab = StringTable::new();
        let from_json = input.build(&mut ProgramBuilder::new(&mut strtab));

        let expected = {
            let mut b = ProgramBuilder::new(&mut strtab);
            let receiver = b.new_object(2, "A");
            let call = b.call(2, receiver, "get", vec![]);
            let body = b.print(2, call);
            let main = b.main_class(1, "Main", "args", body);
            let x = b.var_decl(4, Type::Int, "x");
            let x_ref = b.var(5, "x");
            let get = b.method(5, Type::Int, "get", vec![], vec![], vec![], x_ref);
            let a = b.class(3, "A", None, vec![x], vec![get]);
            b.program(main, vec![a])
        };

        assert_eq!(from_json, expected);
        assert_eq!(from_json.classes[0].name.span.line(), 3);
    }

    #[test]
    fn types_are_written_as_in_source() {
        let mut strtab = StringTable::new();
        let mut b = ProgramBuilder::new(&mut strtab);
        assert_eq!(build_type(&mut b, "int[]"), Type::IntArray);
        assert_eq!(build_type(&mut b, "boolean"), Type::Boolean);
        let class = build_type(&mut b, "Foo");
        assert_eq!(class, b.class_type("Foo"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json = r#"{ "kind": "modulo", "line": 1 }"#;
        assert!(serde_json::from_str::<ExprInput>(json).is_err());

        let json = r#"{ "kind": "binary", "line": 1, "op": "div",
                        "lhs": { "kind": "int", "line": 1, "value": 1 },
                        "rhs": { "kind": "int", "line": 1, "value": 2 } }"#;
        assert!(serde_json::from_str::<ExprInput>(json).is_err());
    }
}
