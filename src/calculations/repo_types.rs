use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::CalculationCreate;
use super::operation::compute_result;

/// Calculation record in the database. `result` is not a column.
#[derive(Debug, Clone, FromRow)]
pub struct Calculation {
    pub id: Uuid,
    pub a: f64,
    pub b: f64,
    #[sqlx(rename = "type")]
    pub kind: String, // raw tag; rows written elsewhere may hold unknown values
    pub user_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

impl Calculation {
    /// Recomputed from the operands on every call.
    pub fn result(&self) -> Option<f64> {
        compute_result(self.a, self.b, &self.kind)
    }
}

/// Row about to be inserted; the id is fixed here, before the database sees it.
#[derive(Debug, Clone)]
pub struct NewCalculation {
    pub id: Uuid,
    pub a: f64,
    pub b: f64,
    pub kind: String,
    pub user_id: Option<Uuid>,
}

impl NewCalculation {
    pub fn new(input: CalculationCreate, user_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            a: input.a,
            b: input.b,
            kind: input.kind.as_str().to_string(),
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::operation::CalculationType;

    fn stored(a: f64, b: f64, kind: &str) -> Calculation {
        Calculation {
            id: Uuid::new_v4(),
            a,
            b,
            kind: kind.into(),
            user_id: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn result_follows_operands() {
        let mut calc = stored(6.0, 3.0, "Add");
        assert_eq!(calc.result(), Some(9.0));
        calc.b = 4.0;
        assert_eq!(calc.result(), Some(10.0));
        calc.kind = "Multiply".into();
        assert_eq!(calc.result(), Some(24.0));
    }

    #[test]
    fn rows_that_bypassed_validation_degrade_to_none() {
        assert_eq!(stored(4.0, 0.0, "Divide").result(), None);
        assert_eq!(stored(4.0, 2.0, "Modulo").result(), None);
    }

    #[test]
    fn new_calculation_assigns_fresh_ids() {
        let input = CalculationCreate {
            a: 1.0,
            b: 2.0,
            kind: CalculationType::Sub,
        };
        let owner = Uuid::new_v4();
        let first = NewCalculation::new(input.clone(), Some(owner));
        let second = NewCalculation::new(input, None);
        assert_ne!(first.id, second.id);
        assert_eq!(first.kind, "Sub");
        assert_eq!(first.user_id, Some(owner));
        assert_eq!(second.user_id, None);
    }
}
