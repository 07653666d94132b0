#[cfg(all(not(test), not(feature = "debug-checks")))]
pub(crate) const ZRHC_ASSERT_LEVEL_DEFINITION: u8 = ZRHC_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub(crate) const ZRHC_ASSERT_LEVEL_DEFINITION: u8 = ZRHC_ASSERT_ADVANCED;

pub(crate) const ZRHC_ASSERT_SIMPLE: u8 = 1;
pub(crate) const ZRHC_ASSERT_MODERATE: u8 = 2;
pub(crate) const ZRHC_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! zrhc_assert_simple {
    ($($arg:tt)*) => {
        if $crate::zrhc_asserts::ZRHC_ASSERT_LEVEL_DEFINITION >= $crate::zrhc_asserts::ZRHC_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! zrhc_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::zrhc_asserts::ZRHC_ASSERT_LEVEL_DEFINITION >= $crate::zrhc_asserts::ZRHC_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! zrhc_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::zrhc_asserts::ZRHC_ASSERT_LEVEL_DEFINITION >= $crate::zrhc_asserts::ZRHC_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
