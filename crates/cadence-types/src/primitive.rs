//! Primitive type family: booleans, addresses, strings, the numeric tower,
//! and the handful of singleton types (`Void`, `Never`, `Path`).

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Address,
    String,
    Character,
    Void,
    /// The uninhabited bottom type.
    Never,
    Path,
    /// Arbitrary-precision signed integer.
    Int,
    /// Arbitrary-precision unsigned integer.
    UInt,
    /// `Int8`/`Int16`/.../`Int256`, carrying its bit width.
    IntN(u16),
    /// `UInt8`/.../`UInt256`.
    UIntN(u16),
    /// `Word8`/.../`Word256` — wraps modulo 2^n, never errors.
    WordN(u16),
    /// 64-bit signed fixed point, 8 fractional decimal digits.
    Fix64,
    /// 64-bit unsigned fixed point, 8 fractional decimal digits.
    UFix64,
}

/// The fixed widths Cadence actually defines for `IntN`/`UIntN`/`WordN`.
pub const INT_WIDTHS: [u16; 6] = [8, 16, 32, 64, 128, 256];
pub const WORD_WIDTHS: [u16; 6] = [8, 16, 32, 64, 128, 256];

impl Primitive {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Primitive::Int | Primitive::UInt | Primitive::IntN(_) | Primitive::UIntN(_) | Primitive::WordN(_)
        )
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Primitive::Int | Primitive::IntN(_))
    }

    #[must_use]
    pub const fn is_fixed_point(self) -> bool {
        matches!(self, Primitive::Fix64 | Primitive::UFix64)
    }

    /// Whether overflow is a checked error (bounded `Int*`/`UInt*`) or
    /// silent wraparound (`Word*`).
    #[must_use]
    pub const fn wraps_on_overflow(self) -> bool {
        matches!(self, Primitive::WordN(_))
    }

    /// Bit width, for the families that have one (`None` for `Int`/`UInt`,
    /// which are arbitrary precision).
    #[must_use]
    pub const fn bit_width(self) -> Option<u16> {
        match self {
            Primitive::IntN(w) | Primitive::UIntN(w) | Primitive::WordN(w) => Some(w),
            Primitive::Fix64 | Primitive::UFix64 => Some(64),
            _ => None,
        }
    }

    /// Is this type a valid dictionary key type: the hashable primitive
    /// subfamily, excluding `Void`/`Never`.
    #[must_use]
    pub const fn is_hashable_key(self) -> bool {
        !matches!(self, Primitive::Void | Primitive::Never)
    }
}
