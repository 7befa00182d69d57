/// Numeric helpers shared by the simplifier and the evaluator.
///
/// This module hosts the floating-point routines that do not belong to any
/// single interpretation phase: the factorial over doubles, the Lanczos
/// gamma function backing it for fractional input, and the textual rendering
/// of numeric values stored in `Number` nodes.
pub mod num;
