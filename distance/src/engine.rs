use std::time::Instant;

use crate::{
    error::ValidationError,
    model::{CalculationResult, DistancePair, Metadata, ParsedLists},
};

fn sorted(values: &[i64]) -> Vec<i64> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values
}

fn checked_sum(mut distances: impl Iterator<Item = u64>) -> Result<u64, ValidationError> {
    distances.try_fold(0u64, |total, distance| {
        total
            .checked_add(distance)
            .ok_or_else(|| ValidationError::Internal("total distance overflowed u64".into()))
    })
}

/// Sorts both lists, pairs them by index and sums the absolute differences.
///
/// The lists are re-validated here because they may have been built by hand
/// or deserialized from a request rather than produced by the parser.
#[tracing::instrument(skip_all, fields(len = lists.list1.len()))]
pub fn calculate(lists: &ParsedLists) -> Result<CalculationResult, ValidationError> {
    lists.validate()?;

    let started = Instant::now();

    let pairs = sorted(&lists.list1)
        .into_iter()
        .zip(sorted(&lists.list2))
        .enumerate()
        .map(|(position, (value1, value2))| DistancePair::new(position, value1, value2))
        .collect::<Vec<_>>();

    let total_distance = checked_sum(pairs.iter().map(|pair| pair.distance))?;

    let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(total_distance, processing_time_ms, "calculated distance");

    Ok(CalculationResult {
        total_distance,
        pairs,
        metadata: Metadata {
            original_list1_length: lists.list1.len(),
            original_list2_length: lists.list2.len(),
            processing_time_ms,
        },
    })
}

/// Aggregate only, without building the per-pair breakdown.
#[tracing::instrument(skip_all)]
pub fn total_distance(list1: &[i64], list2: &[i64]) -> Result<u64, ValidationError> {
    let lists = ParsedLists::new(list1.to_vec(), list2.to_vec());
    lists.validate()?;

    checked_sum(
        sorted(&lists.list1)
            .into_iter()
            .zip(sorted(&lists.list2))
            .map(|(a, b)| a.abs_diff(b)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_SAFE_INTEGER;
    use rstest::rstest;
    use rstest_reuse::{self, *};

    #[template]
    #[rstest]
    #[case::example(vec![3, 4, 2, 1, 3, 3], vec![4, 3, 5, 3, 9, 3], 11)]
    #[case::reversed(vec![1, 2, 3, 4, 5], vec![5, 4, 3, 2, 1], 0)]
    #[case::single(vec![42], vec![13], 29)]
    #[case::negative(vec![-5, 10], vec![5, -10], 10)]
    #[case::extremes(vec![MAX_SAFE_INTEGER], vec![-MAX_SAFE_INTEGER], 18_014_398_509_481_982)]
    fn scenarios(#[case] list1: Vec<i64>, #[case] list2: Vec<i64>, #[case] expected: u64) {}

    #[apply(scenarios)]
    fn test_calculate_scenarios(
        #[case] list1: Vec<i64>,
        #[case] list2: Vec<i64>,
        #[case] expected: u64,
    ) -> miette::Result<()> {
        let result = calculate(&ParsedLists::new(list1, list2))?;
        assert_eq!(expected, result.total_distance);
        Ok(())
    }

    #[apply(scenarios)]
    fn test_total_distance_scenarios(
        #[case] list1: Vec<i64>,
        #[case] list2: Vec<i64>,
        #[case] expected: u64,
    ) -> miette::Result<()> {
        assert_eq!(expected, total_distance(&list1, &list2)?);
        Ok(())
    }

    #[test_log::test]
    fn test_calculate_breakdown() -> miette::Result<()> {
        let lists = ParsedLists::new(vec![3, 4, 2, 1, 3, 3], vec![4, 3, 5, 3, 9, 3]);
        let result = calculate(&lists)?;

        let expected = [(1, 3), (2, 3), (3, 3), (3, 4), (3, 5), (4, 9)]
            .into_iter()
            .enumerate()
            .map(|(position, (a, b))| DistancePair::new(position, a, b))
            .collect::<Vec<_>>();

        assert_eq!(expected, result.pairs);
        assert_eq!(
            vec![2, 1, 0, 1, 2, 5],
            result.pairs.iter().map(|p| p.distance).collect::<Vec<_>>()
        );
        assert_eq!(6, result.metadata.original_list1_length);
        assert_eq!(6, result.metadata.original_list2_length);
        assert!(result.metadata.processing_time_ms >= 0.0);
        Ok(())
    }

    #[test]
    fn test_calculate_does_not_pair_positionally() -> miette::Result<()> {
        // positional pairing would give 2 + 2 = 4
        let result = calculate(&ParsedLists::new(vec![3, 1], vec![1, 3]))?;
        assert_eq!(0, result.total_distance);
        Ok(())
    }

    #[test]
    fn test_calculate_leaves_input_untouched() -> miette::Result<()> {
        let lists = ParsedLists::new(vec![3, 1, 2], vec![9, 7, 8]);
        calculate(&lists)?;
        assert_eq!(vec![3, 1, 2], lists.list1);
        assert_eq!(vec![9, 7, 8], lists.list2);
        Ok(())
    }

    #[rstest]
    #[case(vec![], vec![], ValidationError::EmptyInput)]
    #[case(vec![1, 2, 3], vec![1], ValidationError::LengthMismatch { list1: 3, list2: 1 })]
    #[case(vec![], vec![4], ValidationError::LengthMismatch { list1: 0, list2: 1 })]
    fn test_calculate_rejects(
        #[case] list1: Vec<i64>,
        #[case] list2: Vec<i64>,
        #[case] expected: ValidationError,
    ) {
        let lists = ParsedLists::new(list1, list2);
        assert_eq!(expected, calculate(&lists).unwrap_err());
        assert_eq!(expected, total_distance(&lists.list1, &lists.list2).unwrap_err());
    }

    #[test]
    fn test_checked_sum_consumes_iterator() -> miette::Result<()> {
        assert_eq!(0, checked_sum(std::iter::empty())?);
        assert_eq!(6, checked_sum([1, 2, 3].into_iter())?);
        Ok(())
    }

    #[test]
    fn test_checked_sum_overflow_is_internal() {
        let err = checked_sum([u64::MAX, 1].into_iter()).unwrap_err();
        assert_eq!("INTERNAL_ERROR", err.kind().code());
    }
}
