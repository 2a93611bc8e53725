//! Reference-range selection by subject demographics.

use patho_model::{
    ClassifierOptions, ClassifyError, Range, RangeBucket, ReferenceRanges, Result, Subject,
};

/// Picks the demographic bucket for a subject.
///
/// First match wins:
/// 1. age below the child cutoff: `child`
/// 2. gender `"male"`: `male`
/// 3. gender `"female"`: `female`
/// 4. anything else: the configured fallback bucket
///
/// Gender is compared case-sensitively. The result never depends on the
/// lab value.
pub fn select_bucket(subject: &Subject, options: &ClassifierOptions) -> Result<RangeBucket> {
    let age = subject.age;
    if !age.is_finite() || age < 0.0 {
        return Err(ClassifyError::InvalidAge { age });
    }
    if age < options.child_age_cutoff {
        return Ok(RangeBucket::Child);
    }
    Ok(match subject.gender.as_deref() {
        Some("male") => RangeBucket::Male,
        Some("female") => RangeBucket::Female,
        _ => options.fallback_bucket,
    })
}

/// Selects the bucket and its configured range.
///
/// # Errors
///
/// [`ClassifyError::RangeNotConfigured`] when the selected bucket has no
/// range at all, [`ClassifyError::InvalidAge`] for a negative or
/// non-finite age.
pub fn select_range<'a>(
    ranges: &'a ReferenceRanges,
    subject: &Subject,
    options: &ClassifierOptions,
) -> Result<(RangeBucket, &'a Range)> {
    let bucket = select_bucket(subject, options)?;
    ranges
        .get(bucket)
        .map(|range| (bucket, range))
        .ok_or(ClassifyError::RangeNotConfigured { bucket })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(gender: Option<&str>, age: f64) -> Result<RangeBucket> {
        select_bucket(&Subject::new(gender, age), &ClassifierOptions::default())
    }

    #[test]
    fn test_child_wins_over_gender() {
        assert_eq!(bucket(Some("female"), 12.0), Ok(RangeBucket::Child));
        assert_eq!(bucket(Some("male"), 0.0), Ok(RangeBucket::Child));
        assert_eq!(bucket(None, 17.9), Ok(RangeBucket::Child));
    }

    #[test]
    fn test_age_cutoff_is_exclusive() {
        assert_eq!(bucket(Some("female"), 18.0), Ok(RangeBucket::Female));
        assert_eq!(bucket(Some("male"), 18.0), Ok(RangeBucket::Male));
    }

    #[test]
    fn test_unknown_gender_uses_fallback() {
        assert_eq!(bucket(None, 40.0), Ok(RangeBucket::Male));
        assert_eq!(bucket(Some("other"), 40.0), Ok(RangeBucket::Male));
        // Case-sensitive: callers normalize.
        assert_eq!(bucket(Some("Female"), 40.0), Ok(RangeBucket::Male));

        let options = ClassifierOptions::default().with_fallback_bucket(RangeBucket::Female);
        assert_eq!(
            select_bucket(&Subject::new(Some("other"), 40.0), &options),
            Ok(RangeBucket::Female)
        );
    }

    #[test]
    fn test_invalid_age() {
        assert_eq!(bucket(Some("male"), -1.0), Err(ClassifyError::InvalidAge { age: -1.0 }));
        assert!(matches!(
            bucket(Some("male"), f64::NAN),
            Err(ClassifyError::InvalidAge { .. })
        ));
        assert!(matches!(
            bucket(Some("male"), f64::INFINITY),
            Err(ClassifyError::InvalidAge { .. })
        ));
    }

    #[test]
    fn test_select_range_not_configured() {
        let ranges = ReferenceRanges::default().with(RangeBucket::Male, Range::new(13.5, 17.5));
        let subject = Subject::new(Some("female"), 30.0);
        assert_eq!(
            select_range(&ranges, &subject, &ClassifierOptions::default()),
            Err(ClassifyError::RangeNotConfigured {
                bucket: RangeBucket::Female
            })
        );

        let subject = Subject::new(Some("male"), 30.0);
        let (selected, range) =
            select_range(&ranges, &subject, &ClassifierOptions::default()).unwrap();
        assert_eq!(selected, RangeBucket::Male);
        assert_eq!(range, &Range::new(13.5, 17.5));
    }
}
