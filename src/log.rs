//! Crate-internal logging macros.
//!
//! Call sites stay unconditional; the macros forward to `defmt` when the
//! `defmt` feature is enabled and vanish otherwise.

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($s:literal $(, $arg:expr)* $(,)?) => {
        defmt::debug!($s $(, $arg)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($s:literal $(, $arg:expr)* $(,)?) => {{
        $(let _ = &$arg;)*
    }};
}

pub(crate) use debug;
