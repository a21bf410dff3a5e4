//! The Clarity value model.
//!
//! Every decodable value is one variant of the closed [`ClarityValue`] enum.
//! Composite variants own their children, so a decoded value is a plain tree
//! with no references back into the input buffer.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::DecodeError;

/// One-byte type prefix of every encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Int = 0,
    UInt = 1,
    Buffer = 2,
    BoolTrue = 3,
    BoolFalse = 4,
    PrincipalStandard = 5,
    PrincipalContract = 6,
    ResponseOk = 7,
    ResponseErr = 8,
    OptionalNone = 9,
    OptionalSome = 10,
    List = 11,
    Tuple = 12,
    StringAscii = 13,
    StringUtf8 = 14,
}

impl TypeTag {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Buffer => "buffer",
            Self::BoolTrue => "bool_true",
            Self::BoolFalse => "bool_false",
            Self::PrincipalStandard => "principal_standard",
            Self::PrincipalContract => "principal_contract",
            Self::ResponseOk => "response_ok",
            Self::ResponseErr => "response_err",
            Self::OptionalNone => "optional_none",
            Self::OptionalSome => "optional_some",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::StringAscii => "string_ascii",
            Self::StringUtf8 => "string_utf8",
        }
    }
}

/// Returns the unmapped byte back on failure.
impl TryFrom<u8> for TypeTag {
    type Error = u8;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Ok(match b {
            0 => Self::Int,
            1 => Self::UInt,
            2 => Self::Buffer,
            3 => Self::BoolTrue,
            4 => Self::BoolFalse,
            5 => Self::PrincipalStandard,
            6 => Self::PrincipalContract,
            7 => Self::ResponseOk,
            8 => Self::ResponseErr,
            9 => Self::OptionalNone,
            10 => Self::OptionalSome,
            11 => Self::List,
            12 => Self::Tuple,
            13 => Self::StringAscii,
            14 => Self::StringUtf8,
            other => return Err(other),
        })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Principals ──────────────────────────────────────────────────────────────

/// A plain account principal: address version byte plus hash160.
///
/// The human-readable `S…` address is derived from these two fields by a
/// c32check encoder, which lives outside the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StandardPrincipal {
    version: u8,
    #[serde(serialize_with = "serialize_hex")]
    hash160: [u8; 20],
}

impl StandardPrincipal {
    pub fn new(version: u8, hash160: [u8; 20]) -> Self {
        Self { version, hash160 }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash160(&self) -> &[u8; 20] {
        &self.hash160
    }
}

/// A contract principal: issuing account plus contract name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContractPrincipal {
    issuer: StandardPrincipal,
    name: String,
}

impl ContractPrincipal {
    pub fn new(issuer: StandardPrincipal, name: impl Into<String>) -> Self {
        Self {
            issuer,
            name: name.into(),
        }
    }

    pub fn issuer(&self) -> &StandardPrincipal {
        &self.issuer
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ─── Tuple ───────────────────────────────────────────────────────────────────

/// Ordered key → value mapping with unique keys.
///
/// Iteration yields entries in first-inserted order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TupleData {
    entries: IndexMap<String, ClarityValue>,
}

impl TupleData {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(n),
        }
    }

    /// Build a tuple from entries, rejecting a repeated key.
    pub fn from_entries<K, I>(entries: I) -> Result<Self, DecodeError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ClarityValue)>,
    {
        let mut tuple = Self::new();
        for (k, v) in entries {
            tuple.try_insert(k, v)?;
        }
        Ok(tuple)
    }

    /// Append an entry. Fails with `DuplicateTupleKey` if `key` is already present.
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: ClarityValue,
    ) -> Result<(), DecodeError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(DecodeError::DuplicateTupleKey { key });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ClarityValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClarityValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ─── Value ───────────────────────────────────────────────────────────────────

/// A decoded Clarity value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ClarityValue {
    #[serde(serialize_with = "serialize_display")]
    Int(i128),
    #[serde(rename = "uint", serialize_with = "serialize_display")]
    UInt(u128),
    #[serde(serialize_with = "serialize_hex")]
    Buffer(Vec<u8>),
    BoolTrue,
    BoolFalse,
    PrincipalStandard(StandardPrincipal),
    PrincipalContract(ContractPrincipal),
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
    List(Vec<ClarityValue>),
    Tuple(TupleData),
    StringAscii(String),
    StringUtf8(String),
}

impl ClarityValue {
    pub fn bool(b: bool) -> Self {
        if b {
            Self::BoolTrue
        } else {
            Self::BoolFalse
        }
    }

    pub fn some(inner: ClarityValue) -> Self {
        Self::OptionalSome(Box::new(inner))
    }

    pub fn ok(inner: ClarityValue) -> Self {
        Self::ResponseOk(Box::new(inner))
    }

    pub fn err(inner: ClarityValue) -> Self {
        Self::ResponseErr(Box::new(inner))
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Int(_) => TypeTag::Int,
            Self::UInt(_) => TypeTag::UInt,
            Self::Buffer(_) => TypeTag::Buffer,
            Self::BoolTrue => TypeTag::BoolTrue,
            Self::BoolFalse => TypeTag::BoolFalse,
            Self::PrincipalStandard(_) => TypeTag::PrincipalStandard,
            Self::PrincipalContract(_) => TypeTag::PrincipalContract,
            Self::ResponseOk(_) => TypeTag::ResponseOk,
            Self::ResponseErr(_) => TypeTag::ResponseErr,
            Self::OptionalNone => TypeTag::OptionalNone,
            Self::OptionalSome(_) => TypeTag::OptionalSome,
            Self::List(_) => TypeTag::List,
            Self::Tuple(_) => TypeTag::Tuple,
            Self::StringAscii(_) => TypeTag::StringAscii,
            Self::StringUtf8(_) => TypeTag::StringUtf8,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_tag().name()
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::BoolTrue => Some(true),
            Self::BoolFalse => Some(false),
            _ => None,
        }
    }

    /// Text of either string variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringAscii(s) | Self::StringUtf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ClarityValue]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&TupleData> {
        match self {
            Self::Tuple(t) => Some(t),
            _ => None,
        }
    }

    /// `Some(None)` for `none`, `Some(Some(v))` for `(some v)`, `None` if not an optional.
    pub fn as_optional(&self) -> Option<Option<&ClarityValue>> {
        match self {
            Self::OptionalNone => Some(None),
            Self::OptionalSome(inner) => Some(Some(&**inner)),
            _ => None,
        }
    }

    /// `Ok(v)` for `(ok v)`, `Err(v)` for `(err v)`, `None` if not a response.
    pub fn as_response(&self) -> Option<Result<&ClarityValue, &ClarityValue>> {
        match self {
            Self::ResponseOk(inner) => Some(Ok(&**inner)),
            Self::ResponseErr(inner) => Some(Err(&**inner)),
            _ => None,
        }
    }

    pub fn as_standard_principal(&self) -> Option<&StandardPrincipal> {
        match self {
            Self::PrincipalStandard(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_contract_principal(&self) -> Option<&ContractPrincipal> {
        match self {
            Self::PrincipalContract(p) => Some(p),
            _ => None,
        }
    }
}

// ─── Serde helpers ───────────────────────────────────────────────────────────

/// Integers go out as decimal text so 128-bit values survive JSON consumers.
fn serialize_display<T: fmt::Display, S: Serializer>(v: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

fn serialize_hex<T: AsRef<[u8]>, S: Serializer>(bytes: &T, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("0x{}", hex::encode(bytes.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_roundtrips_through_u8() {
        for b in 0u8..=14 {
            let tag = TypeTag::try_from(b).unwrap();
            assert_eq!(tag.as_u8(), b);
        }
        assert_eq!(TypeTag::try_from(15), Err(15));
        assert_eq!(TypeTag::try_from(0xff), Err(0xff));
    }

    #[test]
    fn tuple_rejects_duplicate_key() {
        let mut t = TupleData::new();
        t.try_insert("a", ClarityValue::UInt(1)).unwrap();
        let err = t.try_insert("a", ClarityValue::UInt(2)).unwrap_err();
        assert_eq!(err, DecodeError::DuplicateTupleKey { key: "a".into() });
        assert_eq!(t.get("a"), Some(&ClarityValue::UInt(1)));
    }

    #[test]
    fn tuple_preserves_insertion_order() {
        let t = TupleData::from_entries([
            ("zeta", ClarityValue::BoolTrue),
            ("alpha", ClarityValue::BoolFalse),
            ("mid", ClarityValue::OptionalNone),
        ])
        .unwrap();
        assert_eq!(t.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn accessors_match_variant() {
        let v = ClarityValue::some(ClarityValue::UInt(5));
        assert_eq!(v.as_optional(), Some(Some(&ClarityValue::UInt(5))));
        assert_eq!(v.as_u128(), None);
        assert_eq!(ClarityValue::OptionalNone.as_optional(), Some(None));
        assert_eq!(ClarityValue::bool(false).as_bool(), Some(false));
        assert_eq!(
            ClarityValue::err(ClarityValue::Int(-1)).as_response(),
            Some(Err(&ClarityValue::Int(-1)))
        );
        assert_eq!(v.type_tag(), TypeTag::OptionalSome);
    }

    #[test]
    fn serializes_as_tagged_json() {
        let v = ClarityValue::Tuple(
            TupleData::from_entries([
                ("amount", ClarityValue::UInt(u128::MAX)),
                ("memo", ClarityValue::Buffer(vec![0xde, 0xad])),
                (
                    "owner",
                    ClarityValue::PrincipalStandard(StandardPrincipal::new(22, [0u8; 20])),
                ),
            ])
            .unwrap(),
        );
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "tuple");
        assert_eq!(json["value"]["amount"]["type"], "uint");
        assert_eq!(
            json["value"]["amount"]["value"],
            "340282366920938463463374607431768211455"
        );
        assert_eq!(json["value"]["memo"]["value"], "0xdead");
        assert_eq!(json["value"]["owner"]["value"]["version"], 22);
        assert_eq!(
            json["value"]["owner"]["value"]["hash160"],
            "0x0000000000000000000000000000000000000000"
        );
        assert_eq!(
            serde_json::to_value(ClarityValue::BoolTrue).unwrap()["type"],
            "bool_true"
        );
    }
}
