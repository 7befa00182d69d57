/// The built-in function table.
///
/// One place knows the names, arities and numeric semantics of the built-in
/// functions, so the parser (arity checks), the simplifier (constant
/// folding) and the evaluator (dispatch) cannot drift apart.
///
/// # Example
/// ```
/// use symplify::interpreter::builtins::builtin_arity;
///
/// assert_eq!(builtin_arity("sin"), Some(1));
/// assert_eq!(builtin_arity("atan2"), Some(2));
/// assert_eq!(builtin_arity("foo"), None);
/// ```
#[must_use]
pub fn builtin_arity(name: &str) -> Option<usize> {
    match name {
        "sin" | "cos" | "tan" | "log" | "ln" | "sqrt" | "abs" => Some(1),
        "atan2" => Some(2),
        _ => None,
    }
}

/// Applies a built-in function to numeric arguments.
///
/// Returns `None` for unknown names and for argument counts that do not
/// match the function's arity. Domain violations (for example `sqrt` of a
/// negative value) surface as `NaN` in the returned value; callers decide
/// whether that is an error.
#[must_use]
pub fn apply_builtin(name: &str, args: &[f64]) -> Option<f64> {
    match (name, args) {
        ("sin", [x]) => Some(x.sin()),
        ("cos", [x]) => Some(x.cos()),
        ("tan", [x]) => Some(x.tan()),
        ("log", [x]) => Some(x.log10()),
        ("ln", [x]) => Some(x.ln()),
        ("sqrt", [x]) => Some(x.sqrt()),
        ("abs", [x]) => Some(x.abs()),
        ("atan2", [y, x]) => Some(y.atan2(*x)),
        _ => None,
    }
}
