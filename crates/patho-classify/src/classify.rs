//! Normal/abnormal classification of a single lab value.

use patho_model::{
    Classification, ClassifierOptions, IndeterminateReason, LabResult, Range, RawValue, Result,
    Verdict,
};
use tracing::debug;

use crate::select::select_range;

/// Classifies a value against one `[lower, upper]` range.
///
/// Bounds are inclusive. If the value or either bound is missing or not
/// numeric the verdict is [`Verdict::Indeterminate`], with the first
/// failing input (value, then lower, then upper) as the reason.
pub fn classify_value(
    value: Option<&RawValue>,
    range: &Range,
) -> (Verdict, Option<IndeterminateReason>) {
    let parsed = parse_inputs(value, range);
    match parsed {
        Ok((value, lower, upper)) => (verdict_for(value, lower, upper), None),
        Err(reason) => (Verdict::Indeterminate, Some(reason)),
    }
}

/// Selects the range for the result's subject and classifies its value.
///
/// # Errors
///
/// Propagates range-selection errors; an unparseable value or bound is
/// not an error but an indeterminate verdict.
pub fn classify(result: &LabResult, options: &ClassifierOptions) -> Result<Classification> {
    let (bucket, range) = select_range(&result.ranges, &result.subject, options)?;
    let value = result.value.as_ref();
    let (verdict, reason) = classify_value(value, range);
    let classification = Classification {
        verdict,
        reason,
        bucket,
        value: value.and_then(RawValue::as_f64),
        lower: range.lower.as_ref().and_then(RawValue::as_f64),
        upper: range.upper.as_ref().and_then(RawValue::as_f64),
    };
    debug!(
        result_id = result.id.as_deref().unwrap_or("-"),
        bucket = %bucket,
        verdict = %verdict,
        "classified result"
    );
    Ok(classification)
}

fn verdict_for(value: f64, lower: f64, upper: f64) -> Verdict {
    if lower <= value && value <= upper {
        Verdict::Normal
    } else {
        Verdict::Abnormal
    }
}

fn parse_inputs(
    value: Option<&RawValue>,
    range: &Range,
) -> std::result::Result<(f64, f64, f64), IndeterminateReason> {
    let value = parse_one(
        value,
        IndeterminateReason::MissingValue,
        IndeterminateReason::InvalidValue,
    )?;
    let lower = parse_one(
        range.lower.as_ref(),
        IndeterminateReason::MissingLower,
        IndeterminateReason::InvalidLower,
    )?;
    let upper = parse_one(
        range.upper.as_ref(),
        IndeterminateReason::MissingUpper,
        IndeterminateReason::InvalidUpper,
    )?;
    Ok((value, lower, upper))
}

fn parse_one(
    raw: Option<&RawValue>,
    missing: IndeterminateReason,
    invalid: IndeterminateReason,
) -> std::result::Result<f64, IndeterminateReason> {
    let raw = raw.ok_or(missing)?;
    if let RawValue::Text(text) = raw
        && text.trim().is_empty()
    {
        return Err(missing);
    }
    raw.as_f64().ok_or(invalid)
}
