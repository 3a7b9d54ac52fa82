use crate::error::{DrillError, Result};
use crate::filter::filter;

pub const MAX_GRADE: f64 = 5.0;

/// Students whose grade reaches `minimum`, in input order.
pub fn passing(grades: &[(String, f64)], minimum: f64) -> Result<Vec<(String, f64)>> {
    if !(0.0..=MAX_GRADE).contains(&minimum) {
        return Err(DrillError::Validation(format!(
            "minimum grade must be within [0, {}]",
            MAX_GRADE
        )));
    }
    Ok(filter(grades, |(_, grade)| *grade >= minimum))
}
