use crate::{primitive::Component, DistanceFunction, EuclideanDistance, KMeansError};
use num::NumCast;

/// Immutable, fixed-length sample (e.g. one pixel's color channels).
///
/// Two vectors are equal when all their components are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vector<T: Component> {
    coords: Box<[T]>,
}
impl<T: Component> Vector<T> {
    pub fn new(coords: impl Into<Box<[T]>>) -> Self {
        Self { coords: coords.into() }
    }

    /// Amount of components of this vector.
    pub fn dims(&self) -> usize { self.coords.len() }

    pub fn coords(&self) -> &[T] { &self.coords }

    /// Euclidean distance between this vector and **other**.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidDimensionality`] if both vectors differ in length.
    pub fn distance(&self, other: &Vector<T>) -> Result<f64, KMeansError> {
        if self.dims() != other.dims() {
            return Err(KMeansError::InvalidDimensionality { index: 1, expected: self.dims(), actual: other.dims() });
        }
        Ok(EuclideanDistance.distance(&self.coords, &other.coords))
    }

    /// Calculate the centroid of a group of vectors.
    ///
    /// Component `i` of the result is the arithmetic mean of component `i` over all members,
    /// truncated towards zero. The result does not depend on the order of the members.
    ///
    /// ## Errors
    /// - [`KMeansError::EmptyGroup`] if **group** is empty
    /// - [`KMeansError::InvalidDimensionality`] if the members differ in length
    pub fn centroid<'a, I>(group: I) -> Result<Vector<T>, KMeansError>
    where
        I: IntoIterator<Item = &'a Vector<T>>,
    {
        let mut members = group.into_iter();
        let first = members.next().ok_or(KMeansError::EmptyGroup)?;
        let dims = first.dims();

        let mut sums: Vec<u64> = first.coords.iter().map(|c| c.to_u64().unwrap_or_default()).collect();
        let mut count = 1u64;
        for member in members {
            if member.dims() != dims {
                return Err(KMeansError::InvalidDimensionality { index: count as usize, expected: dims, actual: member.dims() });
            }
            sums.iter_mut()
                .zip(member.coords.iter())
                .for_each(|(s, c)| *s += c.to_u64().unwrap_or_default());
            count += 1;
        }

        // the mean of values of type T always fits into T
        let coords: Vec<T> = sums.into_iter()
            .map(|s| <T as NumCast>::from(s / count).unwrap_or_else(T::max_value))
            .collect();
        Ok(Vector::new(coords))
    }
}

impl<T: Component, const N: usize> From<[T; N]> for Vector<T> {
    fn from(coords: [T; N]) -> Self { Self::new(coords) }
}

impl<T: Component> From<Vec<T>> for Vector<T> {
    fn from(coords: Vec<T>) -> Self { Self::new(coords) }
}

impl<T: Component> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] { &self.coords }
}
