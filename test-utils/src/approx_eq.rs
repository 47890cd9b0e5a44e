use ndarray::{ArrayBase, Data, Dimension, IntoDimension, Ix};

/// Compares two "things" with approximate equality.
///
/// # Examples
///
/// This can be used to compare two floating point numbers:
///
/// ```
/// use test_utils::assert_approx_eq;
/// assert_approx_eq!(f64, 0.1 + 0.2, 0.3);
/// ```
///
/// Or containers of such:
///
/// ```
/// use test_utils::assert_approx_eq;
/// assert_approx_eq!(f64, &[[1.0, 2.], [3., 4.]], vec![[1.0, 2.], [3., 4.]])
/// ```
///
/// Or ndarray arrays:
///
/// ```
/// use ndarray::arr2;
/// use test_utils::assert_approx_eq;
/// assert_approx_eq!(
///     f64,
///     arr2(&[[1.0, 2.], [3., 4.]]),
///     arr2(&[[1.0, 2.], [3., 4.]])
/// );
/// ```
///
/// The number of `ulps` defaults to `2` if not specified.
///
/// # NaN Handling
///
/// The assertions treats two NaN values to be "approximately" equal.
///
/// While there are good reasons for two NaN values not to compare as equal in
/// general, they don't really apply for this assertions which tries to check if
/// something has "an expected outcome" instead of "two values being semantically
/// the same".
///
/// # Missing Implementations
///
/// Only `f32` and `f64` leaves are supported, non sequential containers are not.
#[macro_export]
macro_rules! assert_approx_eq {
    ($t:ty, $left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, ulps = $ulps:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = $ulps)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = $epsilon, ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr, ulps = $ulps:expr $(,)?) => {{
        let epsilon = $epsilon;
        let ulps = $ulps;
        let left = $left;
        let right = $right;
        let mut left_iter =
            $crate::ApproxEqIter::<$t>::indexed_iter_logical_order(&left, Vec::new());
        let mut right_iter =
            $crate::ApproxEqIter::<$t>::indexed_iter_logical_order(&right, Vec::new());
        loop {
            match (left_iter.next(), right_iter.next()) {
                (Some((lidx, lv)), Some((ridx, rv))) => {
                    std::assert_eq!(
                        lidx, ridx,
                        "Dimensionality mismatch when iterating in logical order: {:?} != {:?}",
                        lidx, ridx
                    );
                    if !(lv.is_nan() && rv.is_nan()) {
                        std::assert!(
                            $crate::approx_eq!($t, lv, rv, ulps = ulps, epsilon = epsilon),
                            "approximated equal assertion failed (ulps={ulps:?}, epsilon={epsilon:?}) at index {idx:?}: {lv:?} == {rv:?}",
                            ulps=ulps,
                            epsilon=epsilon,
                            lv=lv,
                            rv=rv,
                            idx=lidx,
                        );
                    }
                }
                (Some(pair), None) => {
                    std::panic!("Left input is longer starting with from index {:?}", pair);
                }
                (None, Some(pair)) => {
                    std::panic!("Right input is longer starting with from index {:?}", pair);
                }
                (None, None) => break,
            }
        }
    }};
}

/// Helper trait for the [`assert_approx_eq!`] macro.
///
/// Until we have GAT in rust this is meant to be implemented
/// on a `&`-reference to the thing you want to implement it for.
///
/// This can be implemented for both containers and leaf values (e.g. &f64).
/// The leaf type `L` is a parameter so that float literals are inferred
/// from the type passed to the macro.
///
/// This trait is tuned for testing, and uses trait objects to reduce the
/// amount of code overhead.
///
/// Only use it for [`assert_approx_eq!`].
pub trait ApproxEqIter<'a, L>: Copy {
    /// Flattened iterates over all leaf elements in this instance.
    ///
    /// The passed in `index_prefix` is the "index" at which
    /// this instance is placed.
    ///
    /// Leaf values implementing this should just return a iterator
    /// which yields a single tuple of their value and the
    /// passed in index prefix.
    ///
    /// Sequential containers are supposed to yield a tuple for each
    /// element in them in which the index is created by pushing
    /// the elements index in this container onto the `index_prefix`.
    fn indexed_iter_logical_order(
        self,
        index_prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, L)> + 'a>;
}

macro_rules! impl_leaf {
    ($($leaf:ty),*) => {$(
        impl<'a> ApproxEqIter<'a, $leaf> for &'a $leaf {
            fn indexed_iter_logical_order(
                self,
                prefix: Vec<Ix>,
            ) -> Box<dyn Iterator<Item = (Vec<Ix>, $leaf)> + 'a> {
                Box::new(std::iter::once((prefix, *self)))
            }
        }
    )*};
}

impl_leaf!(f32, f64);

impl<'a, T, L> ApproxEqIter<'a, L> for &'a &'a T
where
    &'a T: ApproxEqIter<'a, L>,
    T: 'a + ?Sized,
{
    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, L)> + 'a> {
        (*self).indexed_iter_logical_order(prefix)
    }
}

impl<'a, T: 'a, L: 'a> ApproxEqIter<'a, L> for &'a Vec<T>
where
    &'a T: ApproxEqIter<'a, L>,
{
    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, L)> + 'a> {
        self.as_slice().indexed_iter_logical_order(prefix)
    }
}

impl<'a, T, L: 'a, const N: usize> ApproxEqIter<'a, L> for &'a [T; N]
where
    &'a T: ApproxEqIter<'a, L>,
{
    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, L)> + 'a> {
        self.as_ref().indexed_iter_logical_order(prefix)
    }
}

impl<'a, T: 'a, L: 'a> ApproxEqIter<'a, L> for &'a [T]
where
    &'a T: ApproxEqIter<'a, L>,
{
    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, L)> + 'a> {
        let iter = self.iter().enumerate().flat_map(move |(idx, el)| {
            let mut new_prefix = prefix.clone();
            new_prefix.push(idx);
            el.indexed_iter_logical_order(new_prefix)
        });

        Box::new(iter)
    }
}

impl<'a, S, D> ApproxEqIter<'a, S::Elem> for &'a ArrayBase<S, D>
where
    S: Data,
    S::Elem: Copy,
    D: Dimension,
{
    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, S::Elem)> + 'a> {
        let iter = self.indexed_iter().map(move |(idx, elm)| {
            let mut new_prefix = prefix.clone();
            new_prefix.extend(idx.into_dimension().as_array_view().iter());
            (new_prefix, *elm)
        });

        Box::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use std::panic::catch_unwind;

    use ndarray::{arr1, arr2};

    #[test]
    fn test_assert_approx_eq_float() {
        assert_approx_eq!(f64, 0.1 + 0.2, 0.3);
        assert_approx_eq!(f32, 0.15039155, 0.1503916, ulps = 3);
        catch_unwind(|| assert_approx_eq!(f32, 0.15039155, 0.1503916, ulps = 2)).unwrap_err();
    }

    #[test]
    fn test_assert_approx_eq_iterable() {
        assert_approx_eq!(f64, &[0.25, 1.25], &[0.25, 1.25]);
        assert_approx_eq!(f64, vec![0.25, 1.25], arr1(&[0.25, 1.25]));
        assert_approx_eq!(
            f64,
            &[[0.25, 1.25], [0.0, 0.125]],
            arr2(&[[0.25, 1.25], [0.0, 0.125]]),
        );
    }

    #[test]
    #[should_panic(expected = "at index [1, 0]")]
    fn test_assert_approx_eq_fails_at_index() {
        assert_approx_eq!(
            f64,
            &[[0.5, 1.], [0.25, 0.]],
            arr2(&[[0.5, 1.], [0.125, 0.]]),
        );
    }

    #[test]
    fn test_compares_nan_values() {
        assert_approx_eq!(f64, [0.5, f64::NAN, 1.0], [0.5, f64::NAN, 1.0]);
    }

    #[test]
    #[should_panic(expected = "Right input is longer")]
    fn test_panic_at_different_length() {
        assert_approx_eq!(f64, &[1., 2.], &[1., 2., 3.]);
    }

    #[test]
    fn test_equality_using_epsilon() {
        assert_approx_eq!(f64, 0.125, 0.625, epsilon = 0.5);
        catch_unwind(|| assert_approx_eq!(f64, 0.125, 0.625, epsilon = 0.49)).unwrap_err();
    }
}
