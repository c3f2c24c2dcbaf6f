//! Enum storage-type inference and field type translation.

use crate::error::CodegenError;
use fbsgen_schema::NativeType;
use std::fmt;

/// Tokens already in the FlatBuffers vocabulary, passed through unchanged.
const FBS_SCALARS: &[&str] = &[
    "bool", "byte", "ubyte", "short", "ushort", "int", "uint", "long", "ulong", "float",
    "double", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64",
    "float32", "float64", "string",
];

/// Integer storage type of a generated enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    /// Signed 8-bit.
    Byte,
    /// Unsigned 8-bit.
    Ubyte,
    /// Signed 16-bit.
    Short,
    /// Unsigned 16-bit.
    Ushort,
    /// Signed 64-bit.
    Int64,
    /// Unsigned 64-bit.
    Uint64,
}

impl StorageType {
    /// Returns the schema token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Ubyte => "ubyte",
            Self::Short => "short",
            Self::Ushort => "ushort",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the storage type for an enum spanning `min..=max`.
///
/// The byte test looks only at `min` and the short test only at `max`;
/// existing generated schemas depend on these exact thresholds.
#[must_use]
pub const fn infer_storage_type(min: i64, max: i64) -> StorageType {
    let unsigned = min >= 0;
    if min <= 127 {
        if unsigned {
            StorageType::Ubyte
        } else {
            StorageType::Byte
        }
    } else if max <= 32767 {
        if unsigned {
            StorageType::Ushort
        } else {
            StorageType::Short
        }
    } else if unsigned {
        StorageType::Uint64
    } else {
        StorageType::Int64
    }
}

/// Translates a scalar token to its schema token.
fn scalar_token(token: &str, field: &str) -> Result<String, CodegenError> {
    if let Some(native) = NativeType::from_token(token) {
        return Ok(native.fbs_name().to_string());
    }
    if FBS_SCALARS.contains(&token) {
        return Ok(token.to_string());
    }
    Err(CodegenError::unknown_type(token, field))
}

/// Translates a field `type` token into schema syntax.
///
/// `T[N]` and `T[]` become the vector type `[T']`. Only one bracket pair is
/// accepted.
///
/// # Errors
/// Returns `UnknownType` for tokens outside the scalar vocabulary and
/// `InvalidArrayType` for malformed or multi-dimensional arrays.
pub fn translate_field_type(token: &str, field: &str) -> Result<String, CodegenError> {
    let token = token.trim();
    let Some(pos) = token.find('[') else {
        return scalar_token(token, field);
    };

    let (base, dims) = token.split_at(pos);
    if !dims.ends_with(']') || dims[1..dims.len() - 1].contains(['[', ']']) {
        return Err(CodegenError::InvalidArrayType {
            type_name: token.to_string(),
            field: field.to_string(),
        });
    }

    Ok(format!("[{}]", scalar_token(base.trim(), field)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_storage_type_table() {
        assert_eq!(infer_storage_type(0, 100), StorageType::Ubyte);
        assert_eq!(infer_storage_type(-5, 100), StorageType::Byte);
        assert_eq!(infer_storage_type(200, 30000), StorageType::Ushort);
        assert_eq!(infer_storage_type(5_000_000_000, 5_000_000_001), StorageType::Uint64);
    }

    #[test]
    fn test_infer_storage_type_thresholds() {
        assert_eq!(infer_storage_type(127, 127), StorageType::Ubyte);
        assert_eq!(infer_storage_type(128, 128), StorageType::Ushort);
        assert_eq!(infer_storage_type(128, 32767), StorageType::Ushort);
        assert_eq!(infer_storage_type(128, 32768), StorageType::Uint64);
    }

    #[test]
    fn test_infer_storage_type_looks_only_at_min_for_byte() {
        // A small minimum selects a byte type regardless of the maximum.
        assert_eq!(infer_storage_type(0, 30000), StorageType::Ubyte);
        assert_eq!(infer_storage_type(-1, 30000), StorageType::Byte);
        assert_eq!(infer_storage_type(0, 5_000_000_000), StorageType::Ubyte);
        assert_eq!(infer_storage_type(-1, 5_000_000_000), StorageType::Byte);
    }

    #[test]
    fn test_storage_type_display() {
        assert_eq!(StorageType::Ushort.to_string(), "ushort");
        assert_eq!(StorageType::Int64.as_str(), "int64");
    }

    #[test]
    fn test_translate_scalar() {
        assert_eq!(translate_field_type("uint8_t", "f").unwrap(), "ubyte");
        assert_eq!(translate_field_type("int16_t", "f").unwrap(), "short");
        assert_eq!(translate_field_type("float32_t", "f").unwrap(), "float");
        assert_eq!(translate_field_type("float64_t", "f").unwrap(), "float64");
        assert_eq!(translate_field_type("string", "f").unwrap(), "string");
    }

    #[test]
    fn test_translate_array() {
        assert_eq!(translate_field_type("uint8_t[16]", "f").unwrap(), "[ubyte]");
        assert_eq!(translate_field_type("float32_t[]", "f").unwrap(), "[float]");
        assert_eq!(translate_field_type("int32_t [4]", "f").unwrap(), "[int]");
    }

    #[test]
    fn test_translate_unknown_type() {
        let err = translate_field_type("widget_t", "gadget").unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnknownType { ref type_name, ref field }
                if type_name == "widget_t" && field == "gadget"
        ));
    }

    #[test]
    fn test_translate_multi_dimensional_array() {
        let err = translate_field_type("uint8_t[2][3]", "grid").unwrap_err();
        assert!(matches!(err, CodegenError::InvalidArrayType { .. }));

        let err = translate_field_type("uint8_t[2", "grid").unwrap_err();
        assert!(matches!(err, CodegenError::InvalidArrayType { .. }));
    }
}
