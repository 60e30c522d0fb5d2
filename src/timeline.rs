//! Time points that can reach back by a lookback span.
//!
//! Purging needs one operation beyond ordering: given an observation time
//! `t` and a lookback `L`, the earliest time `t - L` its features may have
//! read from. [`Instant`] provides exactly that, with subtraction saturating
//! at the type's minimum instead of overflowing.
//!
//! Implemented for the primitive integers (epoch seconds, nanoseconds,
//! bar numbers, ...) and, with the `chrono` feature, for
//! `DateTime<Utc>`, `NaiveDateTime` and `NaiveDate` with `TimeDelta` spans.

/// A totally ordered time point with a subtractable span.
pub trait Instant: Ord + Copy {
    /// Distance type used for lookbacks.
    type Span: Copy;

    /// `self - span`, clamped to the earliest representable instant.
    fn reach_back(self, span: Self::Span) -> Self;

    /// Whether `span` points forward in time.
    fn is_negative_span(span: Self::Span) -> bool;
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl Instant for $t {
            type Span = $t;

            #[inline]
            fn reach_back(self, span: $t) -> $t {
                self.saturating_sub(span)
            }

            #[inline]
            fn is_negative_span(_span: $t) -> bool {
                false
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl Instant for $t {
            type Span = $t;

            #[inline]
            fn reach_back(self, span: $t) -> $t {
                self.saturating_sub(span)
            }

            #[inline]
            fn is_negative_span(span: $t) -> bool {
                span < 0
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_signed!(i8, i16, i32, i64, i128, isize);

#[cfg(feature = "chrono")]
mod chrono_impls {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

    use super::Instant;

    impl Instant for DateTime<Utc> {
        type Span = TimeDelta;

        fn reach_back(self, span: TimeDelta) -> Self {
            self.checked_sub_signed(span).unwrap_or(DateTime::<Utc>::MIN_UTC)
        }

        fn is_negative_span(span: TimeDelta) -> bool {
            span < TimeDelta::zero()
        }
    }

    impl Instant for NaiveDateTime {
        type Span = TimeDelta;

        fn reach_back(self, span: TimeDelta) -> Self {
            self.checked_sub_signed(span).unwrap_or(NaiveDateTime::MIN)
        }

        fn is_negative_span(span: TimeDelta) -> bool {
            span < TimeDelta::zero()
        }
    }

    impl Instant for NaiveDate {
        type Span = TimeDelta;

        fn reach_back(self, span: TimeDelta) -> Self {
            self.checked_sub_signed(span).unwrap_or(NaiveDate::MIN)
        }

        fn is_negative_span(span: TimeDelta) -> bool {
            span < TimeDelta::zero()
        }
    }
}
