use std::{
    fmt::Debug,
    iter::Sum,
    ops::{Add, Sub},
};

use num::{CheckedAdd, ToPrimitive, Zero};

/// Numeric type usable as an edge capacity and as an amount of flow.
///
/// Exact types compare residuals against zero. Floating point types compare
/// each arc's residual against an epsilon scaled by that arc's own declared
/// capacity, so that rounding left behind by repeated augmentation is not
/// mistaken for a usable residual.
pub trait Capacity:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Sum + Zero + ToPrimitive + Debug
{
    /// Largest amount that is still considered zero on an arc whose declared
    /// capacity is `scale`. Unbounded scales fall back to the unit floor.
    fn epsilon(scale: Self, relative_tolerance: f64) -> Self;

    /// `None` when the sum does not fit in the type.
    fn checked_total(self, other: Self) -> Option<Self>;

    /// `true` only for infinite floating point values.
    fn is_unbounded(self) -> bool {
        false
    }

    /// `false` for negative values and for values that do not compare at all (NaN).
    fn is_valid_capacity(self) -> bool {
        self >= Self::zero()
    }
}

macro_rules! impl_exact_capacity {
    ($($t:ty),*) => {
        $(
            impl Capacity for $t {
                fn epsilon(_scale: Self, _relative_tolerance: f64) -> Self {
                    0
                }

                fn checked_total(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }
            }
        )*
    };
}

macro_rules! impl_float_capacity {
    ($($t:ty),*) => {
        $(
            impl Capacity for $t {
                fn epsilon(scale: Self, relative_tolerance: f64) -> Self {
                    let scale = if scale.is_finite() { scale.abs().max(1.0) } else { 1.0 };
                    (relative_tolerance as $t) * scale
                }

                fn checked_total(self, other: Self) -> Option<Self> {
                    Some(self + other)
                }

                fn is_unbounded(self) -> bool {
                    self.is_infinite()
                }
            }
        )*
    };
}

impl_exact_capacity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float_capacity!(f32, f64);

/// Sums `amounts`, or `None` on overflow.
pub(crate) fn checked_sum<C, I>(amounts: I) -> Option<C>
where
    C: Capacity,
    I: IntoIterator<Item = C>,
{
    amounts
        .into_iter()
        .try_fold(C::zero(), |total, amount| total.checked_total(amount))
}
