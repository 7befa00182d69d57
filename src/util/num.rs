/// Computes the factorial of a number, generalized to doubles.
///
/// Non-negative integers up to 170 are computed by an exact iterative
/// product. Fractional positive inputs go through the gamma function
/// (`x! = Γ(x + 1)`). Negative inputs yield `NaN`; inputs above 170 overflow
/// `f64` and yield `inf`.
///
/// # Example
/// ```
/// use symplify::util::num::factorial;
///
/// assert_eq!(factorial(5.0), 120.0);
/// assert!(factorial(-1.0).is_nan());
/// assert!(factorial(200.0).is_infinite());
/// ```
#[must_use]
pub fn factorial(n: f64) -> f64 {
    if n < 0.0 {
        return f64::NAN;
    }
    if n > 170.0 {
        return f64::INFINITY;
    }
    if n.fract() == 0.0 {
        let mut result = 1.0;
        let mut current = n;
        while current > 1.0 {
            result *= current;
            current -= 1.0;
        }
        return result;
    }
    euler_gamma(n + 1.0)
}

/// Computes the gamma function Γ(z) using the Lanczos approximation.
///
/// Standard 9-term Lanczos coefficients with `g = 7`. For `z < 0.5` the
/// reflection formula `Γ(z) = π / (sin(πz) * Γ(1 − z))` is applied, so poles
/// at non-positive integers surface as `inf`/`NaN` through the division.
#[must_use]
pub fn euler_gamma(z: f64) -> f64 {
    // Lanczos coefficients, g = 7, n = 9. Standard values from Numerical
    // Recipes.
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z < 0.5 {
        std::f64::consts::PI / ((std::f64::consts::PI * z).sin() * euler_gamma(1.0 - z))
    } else {
        let z_minus_1 = z - 1.0;
        let mut x = COEFFS[0];

        for (i, &c) in COEFFS.iter().enumerate().skip(1) {
            #[allow(clippy::cast_precision_loss)]
            {
                x += c / (z_minus_1 + i as f64);
            }
        }

        let t = z_minus_1 + G + 0.5;

        std::f64::consts::TAU.sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x
    }
}

/// Renders a numeric value in the textual form stored in `Number` nodes.
///
/// Integer-valued doubles print without a fractional part so that folded
/// constants read like source literals; everything else uses the shortest
/// round-trip representation.
#[must_use]
pub fn format_number(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}
