use std::fmt;

/// Arithmetic operation a calculation performs. Stored and sent as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationType {
    Add,
    Sub,
    Multiply,
    Divide,
}

impl CalculationType {
    pub const ALL: [CalculationType; 4] = [
        CalculationType::Add,
        CalculationType::Sub,
        CalculationType::Multiply,
        CalculationType::Divide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationType::Add => "Add",
            CalculationType::Sub => "Sub",
            CalculationType::Multiply => "Multiply",
            CalculationType::Divide => "Divide",
        }
    }

    /// Case-sensitive; anything but the four tags is `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// `None` when the operation is undefined for the operands (zero divisor)
    /// or the outcome is not a finite number.
    pub fn apply(&self, a: f64, b: f64) -> Option<f64> {
        let value = match self {
            CalculationType::Add => a + b,
            CalculationType::Sub => a - b,
            CalculationType::Multiply => a * b,
            CalculationType::Divide => {
                if b == 0.0 {
                    return None;
                }
                a / b
            }
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a stored calculation. Never fails: unknown tags and faults give `None`.
pub fn compute_result(a: f64, b: f64, tag: &str) -> Option<f64> {
    CalculationType::parse(tag)?.apply(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_tag_dispatches_to_its_operation() {
        assert_eq!(compute_result(6.0, 3.0, "Add"), Some(9.0));
        assert_eq!(compute_result(6.0, 3.0, "Sub"), Some(3.0));
        assert_eq!(compute_result(6.0, 3.0, "Multiply"), Some(18.0));
        assert_eq!(compute_result(6.0, 3.0, "Divide"), Some(2.0));
        assert_eq!(compute_result(-1.5, 0.25, "Add"), Some(-1.25));
        assert_eq!(compute_result(1.0, 4.0, "Divide"), Some(0.25));
    }

    #[test]
    fn divide_by_zero_is_absent() {
        assert_eq!(compute_result(4.0, 0.0, "Divide"), None);
        assert_eq!(compute_result(4.0, -0.0, "Divide"), None);
        assert_eq!(compute_result(0.0, 0.0, "Divide"), None);
    }

    #[test]
    fn unknown_tags_are_absent() {
        assert_eq!(compute_result(4.0, 2.0, "Modulo"), None);
        assert_eq!(compute_result(4.0, 2.0, "add"), None);
        assert_eq!(compute_result(4.0, 2.0, ""), None);
    }

    #[test]
    fn non_finite_outcomes_are_absent() {
        assert_eq!(compute_result(f64::MAX, f64::MAX, "Add"), None);
        assert_eq!(compute_result(f64::MAX, 2.0, "Multiply"), None);
        assert_eq!(compute_result(f64::MAX, 1e-300, "Divide"), None);
        assert_eq!(compute_result(f64::NAN, 1.0, "Sub"), None);
    }

    #[test]
    fn repeated_calls_agree() {
        let first = compute_result(7.0, 3.0, "Divide");
        for _ in 0..10 {
            assert_eq!(compute_result(7.0, 3.0, "Divide"), first);
        }
    }

    #[test]
    fn parse_roundtrips_every_tag() {
        for t in CalculationType::ALL {
            assert_eq!(CalculationType::parse(t.as_str()), Some(t));
            assert_eq!(t.to_string(), t.as_str());
        }
    }
}
