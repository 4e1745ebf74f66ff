use crate::spanned::Spanned;
use strtab::Symbol;

/// Identity of an annotatable node. Unique within one tree; two trees built
/// the same way receive the same ids, so annotations of structurally
/// identical trees can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "#{}", _0)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(raw: u32) -> Self {
        NodeId(raw)
    }
}

/// This is the top-level AST node. It stores the main class and all other
/// class declarations of the program, in source order.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Program<'t> {
    pub main_class: Spanned<MainClass<'t>>,
    pub classes: Vec<Spanned<ClassDeclaration<'t>>>,
}

/// The class holding `public static void main(String[] arg)`. Its body is a
/// single statement; it has neither fields nor further methods, and the
/// `arg` parameter cannot be referenced.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MainClass<'t> {
    pub name: Spanned<Symbol<'t>>,
    pub arg_name: Symbol<'t>,
    pub body: Spanned<Stmt<'t>>,
}

/// An ordinary class with an optional superclass.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClassDeclaration<'t> {
    pub name: Spanned<Symbol<'t>>,
    pub superclass: Option<Spanned<Symbol<'t>>>,
    pub fields: Vec<Spanned<VarDecl<'t>>>,
    pub methods: Vec<Spanned<MethodDeclaration<'t>>>,
}

/// A typed name: used for fields, formal parameters and locals alike.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct VarDecl<'t> {
    pub ty: Spanned<Type<'t>>,
    pub name: Symbol<'t>,
}

/// All locals are declared up front, the body is a flat statement list and
/// every method ends in exactly one `return` expression.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MethodDeclaration<'t> {
    pub name: Spanned<Symbol<'t>>,
    pub return_ty: Spanned<Type<'t>>,
    pub params: Vec<Spanned<VarDecl<'t>>>,
    pub locals: Vec<Spanned<VarDecl<'t>>>,
    pub body: Vec<Spanned<Stmt<'t>>>,
    pub return_expr: Box<Spanned<Expr<'t>>>,
}

/// Declared types as written in the source.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum Type<'t> {
    #[display(fmt = "int")]
    Int,
    #[display(fmt = "boolean")]
    Boolean,
    #[display(fmt = "int[]")]
    IntArray,
    #[display(fmt = "{}", _0)]
    Class(Symbol<'t>),
}

/// A use of a variable or field name. Identifiers carry their own `NodeId`
/// because assignment targets are annotated like identifier expressions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Ident<'t> {
    pub id: NodeId,
    pub name: Symbol<'t>,
}

/// A statement can have one of the kinds:
/// * `Block`: a sequence of statements in braces
/// * `If`: condition, then branch and the mandatory else branch
/// * `While`: condition and body
/// * `Print`: `System.out.println(expr)`
/// * `Assign`: `target = value`
/// * `ArrayAssign`: `target[index] = value`
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Stmt<'t> {
    Block(Vec<Spanned<Stmt<'t>>>),
    If(
        Box<Spanned<Expr<'t>>>,
        Box<Spanned<Stmt<'t>>>,
        Box<Spanned<Stmt<'t>>>,
    ),
    While(Box<Spanned<Expr<'t>>>, Box<Spanned<Stmt<'t>>>),
    Print(Box<Spanned<Expr<'t>>>),
    Assign(Spanned<Ident<'t>>, Box<Spanned<Expr<'t>>>),
    ArrayAssign(
        Spanned<Ident<'t>>,
        Box<Spanned<Expr<'t>>>,
        Box<Spanned<Expr<'t>>>,
    ),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Expr<'t> {
    pub id: NodeId,
    pub kind: ExprKind<'t>,
}

/// An expression is either one of
/// * `Binary`: one of the operations defined in `BinaryOp`
/// * `Not`: logical negation
/// * `ArrayAccess`: `array[index]`
/// * `ArrayLength`: `array.length`
/// * `MethodInvocation`: `target.method(args)`
/// * `Int`, `Boolean`: literals
/// * `Var`: use of a local, formal or field
/// * `This`: the `this` keyword
/// * `NewObject`: `new Foo()`
/// * `NewIntArray`: `new int[size]`
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ExprKind<'t> {
    Binary(BinaryOp, Box<Spanned<Expr<'t>>>, Box<Spanned<Expr<'t>>>),
    Not(Box<Spanned<Expr<'t>>>),
    ArrayAccess(Box<Spanned<Expr<'t>>>, Box<Spanned<Expr<'t>>>),
    ArrayLength(Box<Spanned<Expr<'t>>>),
    MethodInvocation(
        Box<Spanned<Expr<'t>>>,
        Spanned<Symbol<'t>>,
        Vec<Spanned<Expr<'t>>>,
    ),
    Int(i32),
    Boolean(bool),
    Var(Ident<'t>),
    This,
    NewObject(Spanned<Symbol<'t>>),
    NewIntArray(Box<Spanned<Expr<'t>>>),
}

/// Arithmetic (`+`, `-`, `*`), logical `&&` and the comparison `<`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display)]
pub enum BinaryOp {
    #[display(fmt = "add")]
    Add,
    #[display(fmt = "sub")]
    Sub,
    #[display(fmt = "times")]
    Mul,
    #[display(fmt = "and")]
    LogicalAnd,
    #[display(fmt = "lt")]
    LessThan,
}
