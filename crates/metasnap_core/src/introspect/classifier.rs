//! Accepted-scalar type classification.
//!
//! # Rule
//! A declared type is accepted when it is exactly one of:
//! 1. a primitive (`bool`, `char`, fixed-width integers, floats), bare or
//!    wrapped in `Option`;
//! 2. `String`;
//! 3. `rust_decimal::Decimal`;
//! 4. `num_bigint::BigInt`;
//! 5. `chrono::DateTime<Utc>`;
//! 6. `url::Url`;
//! 7. `TypeRef`.
//!
//! Kinds 2-7 are also accepted in their `Option` form, which is how a Rust
//! type says "nullable". Anything else is rejected, including types that
//! merely deref to or wrap an accepted one (`&'static str`, `Box<String>`).

use crate::model::scalar::{ScalarKind, ScalarValue};
use crate::model::type_ref::TypeRef;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use url::Url;

/// Classification result for one accepted declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedType {
    pub kind: ScalarKind,
    /// Declared as `Option<T>`; `None` reads as `ScalarValue::Null`.
    pub nullable: bool,
}

macro_rules! accepted_scalars {
    ($($kind:ident => $ty:ty),* $(,)?) => {
        static ACCEPTED_TYPES: Lazy<HashMap<TypeId, AcceptedType>> = Lazy::new(|| {
            let mut table = HashMap::new();
            $(
                table.insert(
                    TypeId::of::<$ty>(),
                    AcceptedType { kind: ScalarKind::$kind, nullable: false },
                );
                table.insert(
                    TypeId::of::<Option<$ty>>(),
                    AcceptedType { kind: ScalarKind::$kind, nullable: true },
                );
            )*
            table
        });

        fn downcast_scalar(
            accepted: AcceptedType,
            value: Box<dyn Any>,
        ) -> Option<ScalarValue> {
            match accepted.kind {
                $(
                    ScalarKind::$kind => {
                        if accepted.nullable {
                            let value = value.downcast::<Option<$ty>>().ok()?;
                            Some((*value).map_or(ScalarValue::Null, ScalarValue::$kind))
                        } else {
                            let value = value.downcast::<$ty>().ok()?;
                            Some(ScalarValue::$kind(*value))
                        }
                    }
                )*
            }
        }
    };
}

accepted_scalars! {
    Bool => bool,
    Char => char,
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    I128 => i128,
    Isize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    U128 => u128,
    Usize => usize,
    F32 => f32,
    F64 => f64,
    String => String,
    Decimal => Decimal,
    BigInteger => BigInt,
    Timestamp => DateTime<Utc>,
    Url => Url,
    TypeRef => TypeRef,
}

/// Returns the accepted kind for `property_type`, or `None` when rejected.
pub fn classify(property_type: &TypeRef) -> Option<AcceptedType> {
    ACCEPTED_TYPES.get(&property_type.type_id()).copied()
}

/// Whether a declared type may appear in a metadata snapshot.
///
/// `None` stands for a property whose type is unknown and is rejected.
pub fn is_accepted_scalar(property_type: Option<&TypeRef>) -> bool {
    property_type.and_then(classify).is_some()
}

impl AcceptedType {
    /// Converts a raw accessor result into a snapshot value.
    ///
    /// Returns `None` when `value` is not the classified type.
    pub fn read_scalar(self, value: Box<dyn Any>) -> Option<ScalarValue> {
        downcast_scalar(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, is_accepted_scalar, AcceptedType};
    use crate::model::scalar::{ScalarKind, ScalarValue};
    use crate::model::type_ref::TypeRef;
    use std::any::Any;
    use std::collections::BTreeMap;

    struct Nested {
        _port: i32,
    }

    fn accepts<T: Any>() -> bool {
        is_accepted_scalar(Some(&TypeRef::of::<T>()))
    }

    #[test]
    fn accepts_primitives_in_bare_and_nullable_form() {
        macro_rules! both_forms {
            ($($ty:ty),*) => {
                $(
                    assert!(accepts::<$ty>(), "{} should be accepted", stringify!($ty));
                    assert!(
                        accepts::<Option<$ty>>(),
                        "Option<{}> should be accepted",
                        stringify!($ty)
                    );
                )*
            };
        }
        both_forms!(
            bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
        );
    }

    #[test]
    fn accepts_exact_reference_scalars() {
        assert!(accepts::<String>());
        assert!(accepts::<rust_decimal::Decimal>());
        assert!(accepts::<num_bigint::BigInt>());
        assert!(accepts::<chrono::DateTime<chrono::Utc>>());
        assert!(accepts::<url::Url>());
        assert!(accepts::<TypeRef>());
        assert!(accepts::<Option<String>>());
    }

    #[test]
    fn rejects_complex_collection_and_unknown_types() {
        assert!(!accepts::<Nested>());
        assert!(!accepts::<Vec<String>>());
        assert!(!accepts::<BTreeMap<String, String>>());
        assert!(!is_accepted_scalar(None));
    }

    #[test]
    fn rejects_near_miss_types() {
        assert!(!accepts::<&'static str>());
        assert!(!accepts::<Box<String>>());
        assert!(!accepts::<Option<Option<i32>>>());
        assert!(!accepts::<chrono::DateTime<chrono::FixedOffset>>());
        assert!(!accepts::<num_bigint::BigUint>());
        assert!(!accepts::<()>());
    }

    #[test]
    fn classify_reports_kind_and_nullability() {
        assert_eq!(
            classify(&TypeRef::of::<u16>()),
            Some(AcceptedType {
                kind: ScalarKind::U16,
                nullable: false
            })
        );
        assert_eq!(
            classify(&TypeRef::of::<Option<url::Url>>()),
            Some(AcceptedType {
                kind: ScalarKind::Url,
                nullable: true
            })
        );
    }

    #[test]
    fn read_scalar_converts_matching_values_only() {
        let bare = classify(&TypeRef::of::<i32>()).unwrap();
        assert_eq!(bare.read_scalar(Box::new(8080_i32)), Some(ScalarValue::I32(8080)));
        assert_eq!(bare.read_scalar(Box::new(8080_i64)), None);

        let nullable = classify(&TypeRef::of::<Option<String>>()).unwrap();
        assert_eq!(
            nullable.read_scalar(Box::new(None::<String>)),
            Some(ScalarValue::Null)
        );
        assert_eq!(
            nullable.read_scalar(Box::new(Some("dubbo".to_string()))),
            Some(ScalarValue::from("dubbo"))
        );
    }
}
