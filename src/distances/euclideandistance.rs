use crate::{Component, DistanceFunction};

pub struct EuclideanDistance;

impl<T: Component> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> f64 {
        a.iter().zip(b.iter())
            .map(|(sv, cv)| sv.to_f64().unwrap_or_default() - cv.to_f64().unwrap_or_default()) // <sample> - <center>
            .map(|v| v * v)                                                                    // <vec_components> ^2
            .sum::<f64>()                                                                      // sum(<vec_components>^2)
            .sqrt()
    }
}
