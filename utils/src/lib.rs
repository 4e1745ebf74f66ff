pub mod color;

/// Assert that an expression matches one of the given patterns, printing
/// the expression with `Debug` if it does not.
#[macro_export]
macro_rules! assert_matches {
    ($expression: expr, $( $pattern: pat )|*) => {{
        match $expression {
            $( $pattern )|* => (),
            expression => panic!(
                r#"assertion failed: `(if let pattern = expression), {}:{}:{}`
pattern: `{}`,
expression: `{:?}`"#,
                file!(),
                line!(),
                column!(),
                stringify!($( $pattern )|*),
                expression
            ),
        }
    }};
}
