//! Sorting trace generators
//!
//! All five sorts work on a private copy of the input and record one step per
//! comparison and one per executed swap or assignment. Mutating steps carry
//! the mutation in their [`StepAction`], so replaying the `Swap` / `Assign`
//! actions over the original input reproduces the final array.
//!
//! Comparison sorts treat `a <= b` as "already in order": equal elements are
//! never exchanged. Merge sort takes from the left half on ties.

use super::errors::GenerateError;
use super::{join_values, StepSink};
use crate::step::{
    AlgorithmId, HighlightRoles, Role, SortStep, Step, StepAction, StepState, Trace,
};
use std::collections::BTreeSet;

/// Recorder for one sorting run: the sink plus the indices known to be final
struct SortRun<'a> {
    sink: &'a mut StepSink,
    sorted: BTreeSet<usize>,
    /// Pre-merge copy shown while a merge is in progress
    auxiliary: Option<Vec<i64>>,
}

impl SortRun<'_> {
    fn emit(&mut self, array: &[i64], action: StepAction, roles: HighlightRoles, message: String) {
        let roles = roles.with(Role::Sorted, self.sorted.iter().copied());
        self.sink.push(Step::new(
            message,
            action,
            roles,
            StepState::Sort(SortStep {
                array: array.to_vec(),
                auxiliary: self.auxiliary.clone(),
            }),
        ));
    }
}

pub fn generate(algorithm: AlgorithmId, values: &[i64]) -> Result<Trace, GenerateError> {
    if values.is_empty() {
        return Err(GenerateError::empty(algorithm));
    }

    let mut sink = StepSink::new();
    let mut array = values.to_vec();
    let mut run = SortRun {
        sink: &mut sink,
        sorted: BTreeSet::new(),
        auxiliary: None,
    };

    run.emit(
        &array,
        StepAction::Start,
        HighlightRoles::new(),
        start_message(algorithm).to_string(),
    );

    let last = array.len() - 1;
    match algorithm {
        AlgorithmId::BubbleSort => bubble_sort(&mut array, &mut run),
        AlgorithmId::InsertionSort => insertion_sort(&mut array, &mut run),
        AlgorithmId::SelectionSort => selection_sort(&mut array, &mut run),
        AlgorithmId::MergeSort => merge_sort(&mut array, 0, last, &mut run),
        AlgorithmId::QuickSort => quick_sort(&mut array, 0, last, &mut run),
        other => {
            return Err(GenerateError::WrongFamily {
                algorithm: other.title(),
                family: "sorting",
            })
        }
    }

    run.sorted.extend(0..array.len());
    run.emit(
        &array,
        StepAction::Complete,
        HighlightRoles::new(),
        format!(
            "{} complete! The array is now sorted: {}",
            algorithm.title(),
            join_values(&array)
        ),
    );

    Ok(sink.into_trace(algorithm))
}

fn start_message(algorithm: AlgorithmId) -> &'static str {
    match algorithm {
        AlgorithmId::BubbleSort => {
            "Starting bubble sort. We'll compare adjacent elements and swap them if they're in the wrong order."
        }
        AlgorithmId::InsertionSort => {
            "Starting insertion sort. Each element is taken as a key and inserted into the sorted prefix to its left."
        }
        AlgorithmId::SelectionSort => {
            "Starting selection sort. Each pass selects the minimum of the unsorted part and moves it to the front."
        }
        AlgorithmId::MergeSort => {
            "Starting merge sort. This algorithm uses a divide-and-conquer approach."
        }
        AlgorithmId::QuickSort => {
            "Starting quick sort. This algorithm uses a divide-and-conquer approach with a pivot element."
        }
        _ => "Starting sort.",
    }
}

fn bubble_sort(array: &mut [i64], run: &mut SortRun) {
    let n = array.len();

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;

        for j in 0..n - pass - 1 {
            let (a, b) = (array[j], array[j + 1]);
            let verdict = if a <= b {
                format!("{} <= {}, no swap needed", a, b)
            } else {
                format!("{} > {}, swapping", a, b)
            };
            run.emit(
                array,
                StepAction::Compare {
                    left: j,
                    right: j + 1,
                },
                HighlightRoles::new().with(Role::Comparing, [j, j + 1]),
                format!("Comparing elements at indices {} and {}: {}", j, j + 1, verdict),
            );

            if a > b {
                array.swap(j, j + 1);
                swapped = true;
                run.emit(
                    array,
                    StepAction::Swap { i: j, j: j + 1 },
                    HighlightRoles::new().with(Role::Swapping, [j, j + 1]),
                    format!("After swap: {}", join_values(array)),
                );
            }
        }

        let settled = n - pass - 1;
        run.sorted.insert(settled);
        run.emit(
            array,
            StepAction::MarkSorted,
            HighlightRoles::new(),
            format!(
                "Element at index {} (value {}) is now in its correct position",
                settled, array[settled]
            ),
        );

        if !swapped {
            run.sorted.extend(0..settled);
            run.emit(
                array,
                StepAction::MarkSorted,
                HighlightRoles::new(),
                "No swaps in this pass, the array is sorted".to_string(),
            );
            break;
        }
    }
}

fn insertion_sort(array: &mut [i64], run: &mut SortRun) {
    for i in 1..array.len() {
        let key = array[i];
        let mut j = i;

        while j > 0 {
            let left = array[j - 1];
            let compare = StepAction::Compare {
                left: j - 1,
                right: j,
            };
            let comparing = HighlightRoles::new().with(Role::Comparing, [j - 1, j]);

            if left <= key {
                run.emit(
                    array,
                    compare,
                    comparing,
                    format!(
                        "Comparing {} with key {}: {} <= {}, key stays at index {}",
                        left, key, left, key, j
                    ),
                );
                break;
            }

            run.emit(
                array,
                compare,
                comparing,
                format!(
                    "Comparing {} with key {}: {} > {}, shifting {} right",
                    left, key, left, key, left
                ),
            );
            array[j] = left;
            run.emit(
                array,
                StepAction::Assign {
                    index: j,
                    value: left,
                },
                HighlightRoles::new().with(Role::Swapping, [j]),
                format!("Shifted {} from index {} to {}", left, j - 1, j),
            );
            j -= 1;
        }

        if j != i {
            array[j] = key;
            run.emit(
                array,
                StepAction::Assign {
                    index: j,
                    value: key,
                },
                HighlightRoles::new().with(Role::Swapping, [j]),
                format!("Inserted key {} at index {}", key, j),
            );
        }
    }
}

fn selection_sort(array: &mut [i64], run: &mut SortRun) {
    let n = array.len();

    for i in 0..n.saturating_sub(1) {
        let mut min = i;

        for j in i + 1..n {
            let (current, candidate) = (array[min], array[j]);
            let verdict = if candidate < current {
                format!("{} < {}, new minimum", candidate, current)
            } else {
                format!("{} >= {}, minimum stays {}", candidate, current, current)
            };
            run.emit(
                array,
                StepAction::Compare {
                    left: min,
                    right: j,
                },
                HighlightRoles::new().with(Role::Comparing, [min, j]),
                format!("Comparing index {} with current minimum at {}: {}", j, min, verdict),
            );
            if candidate < current {
                min = j;
            }
        }

        if min != i {
            let (a, b) = (array[i], array[min]);
            array.swap(i, min);
            run.emit(
                array,
                StepAction::Swap { i, j: min },
                HighlightRoles::new().with(Role::Swapping, [i, min]),
                format!("Swapped {} and {}, moving the minimum to index {}", a, b, i),
            );
        }

        run.sorted.insert(i);
        run.emit(
            array,
            StepAction::MarkSorted,
            HighlightRoles::new(),
            format!(
                "Element at index {} (value {}) is now in its correct position",
                i, array[i]
            ),
        );
    }
}

/// Sort `array[start..=end]`
fn merge_sort(array: &mut [i64], start: usize, end: usize, run: &mut SortRun) {
    if start >= end {
        return;
    }

    let mid = (start + end) / 2;
    run.emit(
        array,
        StepAction::Split { start, mid, end },
        HighlightRoles::new()
            .with(Role::Comparing, start..=mid)
            .with(Role::Pivot, mid + 1..=end),
        format!(
            "Dividing array into two halves: [{}] and [{}]",
            join_values(&array[start..=mid]),
            join_values(&array[mid + 1..=end])
        ),
    );

    merge_sort(array, start, mid, run);
    merge_sort(array, mid + 1, end, run);
    merge(array, start, mid, end, run);
}

/// Merge the sorted runs `array[start..=mid]` and `array[mid+1..=end]`
///
/// While merging, steps carry the pre-merge array as their auxiliary copy.
/// Compare roles index that copy; placements index the working array.
fn merge(array: &mut [i64], start: usize, mid: usize, end: usize, run: &mut SortRun) {
    let before = array.to_vec();
    let left = before[start..=mid].to_vec();
    let right = before[mid + 1..=end].to_vec();
    let (mut i, mut j, mut k) = (0, 0, start);

    run.auxiliary = Some(before);
    run.emit(
        array,
        StepAction::Merging { start, mid, end },
        HighlightRoles::new()
            .with(Role::Range, start..=end)
            .with(Role::Comparing, start..=mid)
            .with(Role::Pivot, mid + 1..=end),
        format!(
            "Merging subarrays [{}] and [{}]",
            join_values(&left),
            join_values(&right)
        ),
    );

    while i < left.len() && j < right.len() {
        let (a, b) = (left[i], right[j]);
        run.emit(
            array,
            StepAction::Compare {
                left: start + i,
                right: mid + 1 + j,
            },
            HighlightRoles::new()
                .with(Role::Range, start..=end)
                .with(Role::Comparing, [start + i, mid + 1 + j]),
            format!("Comparing elements: {} and {}", a, b),
        );

        let (value, message) = if a <= b {
            i += 1;
            (a, format!("{} <= {}, placing {} at position {}", a, b, a, k))
        } else {
            j += 1;
            (b, format!("{} > {}, placing {} at position {}", a, b, b, k))
        };
        place(array, k, value, start, end, message, run);
        k += 1;
    }

    for &value in left[i..].iter().chain(&right[j..]) {
        place(
            array,
            k,
            value,
            start,
            end,
            format!("Copying remaining element {} to position {}", value, k),
            run,
        );
        k += 1;
    }

    run.auxiliary = None;
    run.emit(
        array,
        StepAction::Merged { start, end },
        HighlightRoles::new().with(Role::Range, start..=end),
        format!("Merged subarray: [{}]", join_values(&array[start..=end])),
    );
}

fn place(
    array: &mut [i64],
    index: usize,
    value: i64,
    start: usize,
    end: usize,
    message: String,
    run: &mut SortRun,
) {
    array[index] = value;
    run.emit(
        array,
        StepAction::Assign { index, value },
        HighlightRoles::new()
            .with(Role::Range, start..=end)
            .with(Role::Swapping, [index]),
        message,
    );
}

/// Lomuto quick sort of `array[low..=high]`
fn quick_sort(array: &mut [i64], low: usize, high: usize, run: &mut SortRun) {
    if low == high {
        run.sorted.insert(low);
        run.emit(
            array,
            StepAction::MarkSorted,
            HighlightRoles::new(),
            format!("Subarray with single element [{}] is already sorted.", array[low]),
        );
        return;
    }

    let pivot = array[high];
    let partition = || {
        HighlightRoles::new()
            .with(Role::Range, low..=high)
            .with(Role::Pivot, [high])
    };

    run.emit(
        array,
        StepAction::Partition { low, high },
        partition(),
        format!("Choosing pivot element: {} at index {}", pivot, high),
    );

    let mut store = low;
    for j in low..high {
        let value = array[j];
        let goes_left = value <= pivot;
        run.emit(
            array,
            StepAction::Compare {
                left: j,
                right: high,
            },
            partition().with(Role::Comparing, [j]),
            if goes_left {
                format!("Comparing {} with pivot {}: {} <= {}, it belongs left of the pivot", value, pivot, value, pivot)
            } else {
                format!("Comparing {} with pivot {}: {} > {}, no swap needed", value, pivot, value, pivot)
            },
        );

        if goes_left {
            if store != j {
                let other = array[store];
                array.swap(store, j);
                run.emit(
                    array,
                    StepAction::Swap { i: store, j },
                    partition().with(Role::Swapping, [store, j]),
                    format!("Swapped {} and {}: {}", value, other, join_values(&array[low..=high])),
                );
            }
            store += 1;
        }
    }

    if store != high {
        array.swap(store, high);
        run.emit(
            array,
            StepAction::Swap { i: store, j: high },
            HighlightRoles::new()
                .with(Role::Range, low..=high)
                .with(Role::Swapping, [store, high]),
            format!("Moving pivot {} into place at index {}", pivot, store),
        );
    }

    run.sorted.insert(store);
    run.emit(
        array,
        StepAction::MarkSorted,
        HighlightRoles::new().with(Role::Pivot, [store]),
        format!("Pivot {} is now at its final index {}", pivot, store),
    );

    if store > low {
        quick_sort(array, low, store - 1, run);
    }
    if store < high {
        quick_sort(array, store + 1, high, run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(trace: &Trace, input: &[i64]) -> Vec<i64> {
        let mut array = input.to_vec();
        for step in trace.iter().filter(|s| s.action.is_mutation()) {
            step.action.apply(&mut array);
        }
        array
    }

    fn final_array(trace: &Trace) -> Vec<i64> {
        trace.last().and_then(|s| s.array()).unwrap().to_vec()
    }

    const SORTS: [AlgorithmId; 5] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::InsertionSort,
        AlgorithmId::SelectionSort,
        AlgorithmId::MergeSort,
        AlgorithmId::QuickSort,
    ];

    #[test]
    fn test_bubble_sort_scenario() {
        let trace = generate(AlgorithmId::BubbleSort, &[5, 2, 8, 1]).unwrap();

        assert_eq!(final_array(&trace), vec![1, 2, 5, 8]);
        let sorted = trace.last().unwrap().role(Role::Sorted).unwrap();
        assert_eq!(sorted.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(trace.steps()[0].array(), Some(&[5, 2, 8, 1][..]));
        assert!(trace.steps()[0].roles.is_empty());
    }

    #[test]
    fn test_all_sorts_replay_to_sorted_array() {
        let input = [38, 27, 43, 3, 9, 82, 10, 27];
        let mut expected = input.to_vec();
        expected.sort();

        for algorithm in SORTS {
            let trace = generate(algorithm, &input).unwrap();
            assert_eq!(replay(&trace, &input), expected, "{algorithm} replay");
            assert_eq!(final_array(&trace), expected, "{algorithm} final step");
            assert_eq!(
                trace.last().unwrap().role(Role::Sorted).map(|s| s.len()),
                Some(input.len())
            );
        }
    }

    #[test]
    fn test_single_element() {
        for algorithm in SORTS {
            let trace = generate(algorithm, &[7]).unwrap();
            assert_eq!(final_array(&trace), vec![7]);
            assert!(trace.steps()[0].roles.is_empty());
        }
    }

    #[test]
    fn test_bubble_sort_never_swaps_equal_elements() {
        let trace = generate(AlgorithmId::BubbleSort, &[3, 3, 3]).unwrap();
        assert!(trace.iter().all(|s| !s.action.is_mutation()));
        // One comparison pass with no swaps stops early
        let compares = trace
            .iter()
            .filter(|s| matches!(s.action, StepAction::Compare { .. }))
            .count();
        assert_eq!(compares, 2);
    }

    #[test]
    fn test_insertion_sort_keeps_equal_keys_in_place() {
        let trace = generate(AlgorithmId::InsertionSort, &[1, 2, 2]).unwrap();
        assert!(trace.iter().all(|s| !s.action.is_mutation()));
    }

    #[test]
    fn test_merge_sort_splits_at_floor_midpoint() {
        let trace = generate(AlgorithmId::MergeSort, &[4, 3, 2, 1, 0]).unwrap();
        let splits: Vec<_> = trace
            .iter()
            .filter_map(|s| match s.action {
                StepAction::Split { start, mid, end } => Some((start, mid, end)),
                _ => None,
            })
            .collect();
        assert_eq!(splits, vec![(0, 2, 4), (0, 1, 2), (0, 0, 1), (3, 3, 4)]);

        let merges = trace
            .iter()
            .filter(|s| matches!(s.action, StepAction::Merged { .. }))
            .count();
        assert_eq!(merges, 4);

        // One assignment per element placed in every merge: 2 + 3 + 2 + 5
        let placements = trace
            .iter()
            .filter(|s| matches!(s.action, StepAction::Assign { .. }))
            .count();
        assert_eq!(placements, 12);
    }

    #[test]
    fn test_merge_compares_read_the_pre_merge_copy() {
        let trace = generate(AlgorithmId::MergeSort, &[3, 4, 1, 2]).unwrap();

        let heading = trace
            .iter()
            .find(|s| matches!(s.action, StepAction::Merging { start: 0, mid: 1, end: 3 }))
            .unwrap();
        assert_eq!(heading.message, "Merging subarrays [3, 4] and [1, 2]");

        let mut compares = 0;
        for step in trace.iter() {
            let StepState::Sort(sort) = &step.state else {
                unreachable!()
            };
            let StepAction::Compare { left, right } = step.action else {
                continue;
            };
            let auxiliary = sort.auxiliary.as_ref().unwrap();
            let named = format!("Comparing elements: {} and {}", auxiliary[left], auxiliary[right]);
            assert_eq!(step.message, named);
            assert!(step.roles.contains(Role::Comparing, left));
            compares += 1;
        }
        // [3]+[4], [1]+[2], then 1, 2 against 3
        assert_eq!(compares, 4);

        let last = trace.last().unwrap();
        assert!(matches!(&last.state, StepState::Sort(s) if s.auxiliary.is_none()));
    }

    #[test]
    fn test_quick_sort_marks_pivot_before_recursing() {
        let trace = generate(AlgorithmId::QuickSort, &[3, 1, 2]).unwrap();

        let first_mark = trace
            .iter()
            .position(|s| s.action == StepAction::MarkSorted)
            .unwrap();
        let step = &trace.steps()[first_mark];
        // Pivot 2 lands at index 1
        assert_eq!(step.array(), Some(&[1, 2, 3][..]));
        assert!(step.roles.contains(Role::Sorted, 1));
        assert!(step.roles.contains(Role::Pivot, 1));

        let partitions: Vec<_> = trace
            .iter()
            .filter_map(|s| match s.action {
                StepAction::Partition { low, high } => Some((low, high)),
                _ => None,
            })
            .collect();
        assert_eq!(partitions, vec![(0, 2)]);
    }

    #[test]
    fn test_deterministic() {
        let input = [9, -4, 0, 12, 5, 5];
        for algorithm in SORTS {
            assert_eq!(generate(algorithm, &input), generate(algorithm, &input));
        }
    }
}
