use crate::{Component, DistanceFunction, KMeans, KMeansConfig, KMeansError, Vector};

#[inline(always)]
pub fn calculate<T, D>(
    kmean: &KMeans<T, D>, k: usize, _config: &KMeansConfig<'_, T>, computed: Vec<Vector<T>>,
) -> Result<Vec<Vector<T>>, KMeansError>
where
    T: Component,
    D: DistanceFunction<T>,
{
    if computed.len() != k {
        return Err(KMeansError::SeedCount { expected: k, actual: computed.len() });
    }
    kmean.validate_centers(&computed)?;
    Ok(computed)
}
