use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::EnrollmentId;

/// one student's admission into one course, carrying its fee schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeableEnrollment {
    pub enrollment_id: EnrollmentId,
    pub student_id: String,
    pub course_name: String,
    pub course_fees: Money,
    pub admission_discount: Money,
    pub enrolled_on: Option<NaiveDate>,
    /// date after which payments may attract a late fee
    pub fee_due_date: Option<NaiveDate>,
}

impl ChargeableEnrollment {
    /// create an enrollment with only the fee schedule filled in
    pub fn new(course_fees: Money, admission_discount: Money) -> Self {
        Self {
            enrollment_id: Uuid::new_v4(),
            student_id: String::new(),
            course_name: String::new(),
            course_fees,
            admission_discount,
            enrolled_on: None,
            fee_due_date: None,
        }
    }

    pub fn builder() -> EnrollmentBuilder {
        EnrollmentBuilder::new()
    }

    /// resolve the amount due for this enrollment
    pub fn total_due(&self) -> Result<Money> {
        resolve_total_due(self)
    }
}

/// resolve total due as course fees minus admission discount
///
/// Fails when either value is negative or the discount exceeds the fee;
/// a successful result is never negative.
pub fn resolve_total_due(enrollment: &ChargeableEnrollment) -> Result<Money> {
    let course_fees = enrollment.course_fees;
    let admission_discount = enrollment.admission_discount;

    if course_fees.is_negative()
        || admission_discount.is_negative()
        || admission_discount > course_fees
    {
        return Err(LedgerError::InvalidSchedule {
            course_fees,
            admission_discount,
        });
    }

    Ok(course_fees - admission_discount)
}

/// builder for enrollments; `build` rejects schedules the resolver would reject
#[derive(Debug, Default)]
pub struct EnrollmentBuilder {
    enrollment_id: Option<EnrollmentId>,
    student_id: Option<String>,
    course_name: Option<String>,
    course_fees: Option<Money>,
    admission_discount: Option<Money>,
    enrolled_on: Option<NaiveDate>,
    fee_due_date: Option<NaiveDate>,
}

impl EnrollmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enrollment_id(mut self, id: EnrollmentId) -> Self {
        self.enrollment_id = Some(id);
        self
    }

    pub fn student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = Some(student_id.into());
        self
    }

    pub fn course_name(mut self, course_name: impl Into<String>) -> Self {
        self.course_name = Some(course_name.into());
        self
    }

    pub fn course_fees(mut self, fees: Money) -> Self {
        self.course_fees = Some(fees);
        self
    }

    pub fn admission_discount(mut self, discount: Money) -> Self {
        self.admission_discount = Some(discount);
        self
    }

    pub fn enrolled_on(mut self, date: NaiveDate) -> Self {
        self.enrolled_on = Some(date);
        self
    }

    pub fn fee_due_date(mut self, date: NaiveDate) -> Self {
        self.fee_due_date = Some(date);
        self
    }

    pub fn build(self) -> Result<ChargeableEnrollment> {
        let course_fees = self.course_fees.ok_or(LedgerError::InvalidConfiguration {
            message: "course fees must be set".to_string(),
        })?;

        let enrollment = ChargeableEnrollment {
            enrollment_id: self.enrollment_id.unwrap_or_else(Uuid::new_v4),
            student_id: self.student_id.unwrap_or_default(),
            course_name: self.course_name.unwrap_or_default(),
            course_fees,
            admission_discount: self.admission_discount.unwrap_or(Money::ZERO),
            enrolled_on: self.enrolled_on,
            fee_due_date: self.fee_due_date,
        };

        resolve_total_due(&enrollment)?;
        Ok(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(fees: i64, discount: i64) -> ChargeableEnrollment {
        ChargeableEnrollment::new(Money::from_major(fees), Money::from_major(discount))
    }

    #[test]
    fn test_total_due_subtracts_admission_discount() {
        let enrollment = schedule(12_000, 2_000);
        assert_eq!(resolve_total_due(&enrollment).unwrap(), Money::from_major(10_000));
    }

    #[test]
    fn test_discount_equal_to_fees_resolves_to_zero() {
        let enrollment = schedule(5_000, 5_000);
        assert_eq!(enrollment.total_due().unwrap(), Money::ZERO);
    }

    #[test]
    fn test_no_discount() {
        let enrollment = ChargeableEnrollment::new(Money::from_major(8_000), Money::ZERO);
        assert_eq!(enrollment.total_due().unwrap(), Money::from_major(8_000));
    }

    #[test]
    fn test_discount_above_fees_is_invalid() {
        let enrollment = schedule(5_000, 5_001);
        assert_eq!(
            resolve_total_due(&enrollment),
            Err(LedgerError::InvalidSchedule {
                course_fees: Money::from_major(5_000),
                admission_discount: Money::from_major(5_001),
            })
        );
    }

    #[test]
    fn test_negative_values_are_invalid() {
        let negative_fees = schedule(-1, 0);
        assert!(matches!(
            resolve_total_due(&negative_fees),
            Err(LedgerError::InvalidSchedule { .. })
        ));

        let negative_discount = schedule(100, -10);
        assert!(matches!(
            resolve_total_due(&negative_discount),
            Err(LedgerError::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn test_resolution_holds_across_range() {
        for fees in [0_i64, 1, 999, 15_000] {
            for discount in [0_i64, 1, 500, 15_000, 15_001] {
                let enrollment = schedule(fees, discount);
                match resolve_total_due(&enrollment) {
                    Ok(due) => {
                        assert!(discount <= fees);
                        assert_eq!(due, Money::from_major(fees - discount));
                        assert!(!due.is_negative());
                    }
                    Err(LedgerError::InvalidSchedule { .. }) => assert!(discount > fees),
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
        }
    }

    #[test]
    fn test_builder() {
        let due = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();
        let enrollment = EnrollmentBuilder::new()
            .student_id("STU-0042")
            .course_name("JEE Foundation")
            .course_fees(Money::from_major(45_000))
            .admission_discount(Money::from_major(5_000))
            .fee_due_date(due)
            .build()
            .unwrap();

        assert_eq!(enrollment.student_id, "STU-0042");
        assert_eq!(enrollment.fee_due_date, Some(due));
        assert_eq!(enrollment.total_due().unwrap(), Money::from_major(40_000));
    }

    #[test]
    fn test_builder_rejects_bad_schedule() {
        let result = ChargeableEnrollment::builder()
            .course_fees(Money::from_major(1_000))
            .admission_discount(Money::from_major(2_000))
            .build();
        assert!(matches!(result, Err(LedgerError::InvalidSchedule { .. })));

        let missing_fees = ChargeableEnrollment::builder().student_id("STU-1").build();
        assert!(matches!(missing_fees, Err(LedgerError::InvalidConfiguration { .. })));
    }
}
