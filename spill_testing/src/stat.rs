//! Implements empirical tests of how evenly hash values are spread over buckets.
use ndarray::prelude::*;
use ndarray::{ScalarOperand, Zip};
use num_traits::{Float, NumAssignOps};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// A result of a Chi-square test.
#[derive(Debug)]
pub struct Chi2Statistic<V> {
    pub chi2: V,
    pub dof: usize,
    pub p_value: V,
}

/// Calculates the chi-square statistic.
pub fn chi2<V>(observed: &[V], expected: &[V], dof: Option<usize>) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64>,
{
    debug_assert_eq!(observed.len(), expected.len(), "Dimensions must match");
    let chi2: V = Zip::from(observed)
        .and(expected)
        .fold(0.0.into(), |acc, &obs, &exp| {
            let diff = obs - exp;
            acc + diff.powf(2.0.into()) / exp
        });

    let dof = if let Some(dof) = dof {
        dof
    } else {
        observed.len() - 1
    };
    let dist = ChiSquared::new(dof as f64).unwrap();
    let p_value = (1.0 - dist.cdf(chi2.to_f64().unwrap())).into();

    Chi2Statistic { chi2, dof, p_value }
}

/// Performs a Chi-square uniformity test.
pub fn chi2_uniformity<'a, V, A>(observed: A) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64> + ScalarOperand,
    A: AsArray<'a, V>,
{
    let observed: ArrayView1<V> = observed.into();
    let total_sum = observed.sum();
    let num_cells = observed.len();
    let expected_value = total_sum / (num_cells as f64).into();

    let expected = Array1::<V>::from_elem(observed.dim(), expected_value);

    chi2(
        observed.as_slice().unwrap(),
        expected.as_slice().unwrap(),
        None,
    )
}

/// Tests whether bucket occupancy `counts` could have come from a uniform distribution.
pub fn bucket_uniformity(counts: &[usize]) -> Chi2Statistic<f64> {
    debug_assert!(counts.len() > 1, "Must have at least 2 buckets");

    let observed: Array1<f64> = counts.iter().map(|&count| count as f64).collect();
    chi2_uniformity(&observed)
}
