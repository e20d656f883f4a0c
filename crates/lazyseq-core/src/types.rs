//! Tagged dynamic values and the downcasting contract behind `of_type`/`cast`.
//!
//! `Scalar` is the closed set the engine ships with. Callers with their own
//! shape enums implement `Downcast<U>` for them; the engine never reflects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
}

impl Scalar {
    /// Stable tag name, used in `TypeMismatch` messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::I32(_) => "i32",
            Scalar::I64(_) => "i64",
            Scalar::F32(_) => "f32",
            Scalar::F64(_) => "f64",
            Scalar::Str(_) => "str",
            Scalar::Bin(_) => "bin",
        }
    }
}

/// Conversion of a tagged value into one of its variants' payload.
///
/// `downcast` hands the value back on failure so filtering operators can
/// drop it and casting operators can report what they found.
pub trait Downcast<U>: Sized {
    /// Name of the target shape.
    fn target() -> &'static str;

    /// Name of this value's own shape.
    fn shape(&self) -> &'static str;

    fn downcast(self) -> Result<U, Self>;
}

macro_rules! scalar_downcast {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl Downcast<$ty> for Scalar {
            fn target() -> &'static str {
                $name
            }

            fn shape(&self) -> &'static str {
                self.kind()
            }

            fn downcast(self) -> Result<$ty, Self> {
                match self {
                    Scalar::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }

        impl From<$ty> for Scalar {
            fn from(v: $ty) -> Self {
                Scalar::$variant(v)
            }
        }
    };
}

scalar_downcast!(bool, Bool, "bool");
scalar_downcast!(i32, I32, "i32");
scalar_downcast!(i64, I64, "i64");
scalar_downcast!(f32, F32, "f32");
scalar_downcast!(f64, F64, "f64");
scalar_downcast!(String, Str, "str");
scalar_downcast!(Vec<u8>, Bin, "bin");

// Every scalar is a scalar: the "common interface" cast never fails.
impl Downcast<Scalar> for Scalar {
    fn target() -> &'static str {
        "scalar"
    }

    fn shape(&self) -> &'static str {
        self.kind()
    }

    fn downcast(self) -> Result<Scalar, Self> {
        Ok(self)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_matches_variant_only() {
        let v = Scalar::I64(42);
        assert_eq!(Downcast::<i64>::downcast(v.clone()), Ok(42));
        assert_eq!(Downcast::<String>::downcast(v.clone()), Err(v));
    }

    #[test]
    fn identity_cast_keeps_value() {
        let v = Scalar::from("x");
        assert_eq!(Downcast::<Scalar>::downcast(v.clone()), Ok(v));
    }
}
