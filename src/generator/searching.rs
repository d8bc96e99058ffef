//! Searching trace generators
//!
//! Linear search examines indices left to right. Binary search works on a
//! sorted copy of its input and narrows a window `[low, high]`, probing
//! `mid = floor((low + high) / 2)`; indices outside the window carry the
//! `eliminated` role. Only a successful match ever sets the `found` role.

use super::errors::GenerateError;
use super::StepSink;
use crate::step::{
    AlgorithmId, HighlightRoles, Role, SearchStep, Step, StepAction, StepState, Trace,
};

pub fn generate(algorithm: AlgorithmId, values: &[i64], target: i64) -> Result<Trace, GenerateError> {
    if values.is_empty() {
        return Err(GenerateError::empty(algorithm));
    }

    let mut sink = StepSink::new();
    match algorithm {
        AlgorithmId::LinearSearch => linear_search(values, target, &mut sink),
        AlgorithmId::BinarySearch => binary_search(values, target, &mut sink),
        other => {
            return Err(GenerateError::WrongFamily {
                algorithm: other.title(),
                family: "searching",
            })
        }
    }
    Ok(sink.into_trace(algorithm))
}

/// Search state with no window scalars
fn plain(array: &[i64], target: i64) -> StepState {
    window(array, target, None, None, None)
}

fn window(
    array: &[i64],
    target: i64,
    low: Option<usize>,
    high: Option<usize>,
    mid: Option<usize>,
) -> StepState {
    StepState::Search(SearchStep {
        array: array.to_vec(),
        target: Some(target),
        low,
        high,
        mid,
    })
}

fn linear_search(array: &[i64], target: i64, sink: &mut StepSink) {
    sink.push(Step::new(
        format!("Starting linear search for value {} in the array.", target),
        StepAction::Start,
        HighlightRoles::new(),
        plain(array, target),
    ));

    for (index, &value) in array.iter().enumerate() {
        sink.push(Step::new(
            format!("Checking element at index {}: {}", index, value),
            StepAction::Probe { index },
            HighlightRoles::new()
                .with(Role::Eliminated, 0..index)
                .with(Role::Current, [index]),
            window(array, target, None, None, Some(index)),
        ));

        if value == target {
            sink.push(Step::new(
                format!("Found target value {} at index {}!", target, index),
                StepAction::Found { index },
                HighlightRoles::new()
                    .with(Role::Eliminated, 0..index)
                    .with(Role::Found, [index]),
                window(array, target, None, None, Some(index)),
            ));
            return;
        }
    }

    sink.push(Step::new(
        format!("Target value {} not found in the array.", target),
        StepAction::NotFound,
        HighlightRoles::new().with(Role::Eliminated, 0..array.len()),
        plain(array, target),
    ));
}

fn binary_search(values: &[i64], target: i64, sink: &mut StepSink) {
    let mut array = values.to_vec();
    let already_sorted = array.windows(2).all(|w| w[0] <= w[1]);
    array.sort();
    let n = array.len();

    let start = if already_sorted {
        format!(
            "Starting binary search for value {} in the sorted array.",
            target
        )
    } else {
        format!(
            "Binary search needs sorted input, so the array was sorted first. Starting binary search for value {}.",
            target
        )
    };
    sink.push(Step::new(
        start,
        StepAction::Start,
        HighlightRoles::new(),
        plain(&array, target),
    ));

    // Window is the half-open range [low, end); high = end - 1
    let mut low = 0;
    let mut end = n;
    let eliminated = |low: usize, end: usize| (0..low).chain(end..n);

    while low < end {
        let high = end - 1;
        let mid = (low + high) / 2;
        let value = array[mid];

        sink.push(Step::new(
            format!(
                "Checking middle element at index {}: {} (search range {} to {})",
                mid, value, low, high
            ),
            StepAction::Probe { index: mid },
            HighlightRoles::new()
                .with(Role::Eliminated, eliminated(low, end))
                .with(Role::Range, low..=high)
                .with(Role::Current, [mid]),
            window(&array, target, Some(low), Some(high), Some(mid)),
        ));

        if value == target {
            sink.push(Step::new(
                format!("Found target value {} at index {}!", target, mid),
                StepAction::Found { index: mid },
                HighlightRoles::new()
                    .with(Role::Eliminated, eliminated(low, end))
                    .with(Role::Found, [mid]),
                window(&array, target, Some(low), Some(high), Some(mid)),
            ));
            return;
        }

        let message = if value < target {
            low = mid + 1;
            format!(
                "{} < {}, so the target must be in the right half.",
                value, target
            )
        } else {
            end = mid;
            format!(
                "{} > {}, so the target must be in the left half.",
                value, target
            )
        };

        let (next_low, next_high) = if low < end {
            (Some(low), Some(end - 1))
        } else {
            (None, None)
        };
        sink.push(Step::new(
            message,
            StepAction::Narrow,
            HighlightRoles::new()
                .with(Role::Eliminated, eliminated(low, end))
                .with(Role::Range, low..end),
            window(&array, target, next_low, next_high, Some(mid)),
        ));
    }

    sink.push(Step::new(
        format!("Target value {} not found in the array.", target),
        StepAction::NotFound,
        HighlightRoles::new().with(Role::Eliminated, 0..n),
        plain(&array, target),
    ));
}
