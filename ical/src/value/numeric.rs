// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integer coercion for the COUNT and INTERVAL rule parts.

use std::fmt::Display;

/// A value that may be coerced to an integer.
///
/// Text is parsed as a decimal integer, surrounding whitespace ignored.
/// Integers outside the `i64` range do not coerce.
pub trait IntegerValue: Display {
    /// Coerce to an integer, `None` if the value is not representable as one.
    fn to_integer(&self) -> Option<i64>;
}

impl IntegerValue for str {
    fn to_integer(&self) -> Option<i64> {
        let s = self.trim();
        if s.is_empty() {
            return None;
        }
        lexical::parse::<i64, _>(s).ok()
    }
}

impl IntegerValue for String {
    fn to_integer(&self) -> Option<i64> {
        self.as_str().to_integer()
    }
}

impl<T: IntegerValue + ?Sized> IntegerValue for &T {
    fn to_integer(&self) -> Option<i64> {
        (**self).to_integer()
    }
}

macro_rules! impl_integer_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntegerValue for $ty {
                fn to_integer(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }
            }
        )+
    };
}

impl_integer_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
