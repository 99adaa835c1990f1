//! Raw JSON document wrapper.
//!
//! `Json` stores a document's bytes verbatim and embeds them unchanged when
//! marshaled. Its text behaviour is that of [`Bytes`].

use serde::de::DeserializeOwned;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use super::bytes::{Bytes, serialize_raw};
use crate::error::{NullError, Result};
use crate::literal;
use crate::nullable::Nullable;
use crate::traits::NullableValue;

const TYPE_NAME: &str = "Json";

/// Nullable raw JSON document
///
/// ```
/// use nullify::prelude::*;
/// use nullify::types::Json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     theme: String,
/// }
///
/// let mut doc = Json::default();
/// doc.marshal_str(r#"{"theme":"dark"}"#).unwrap();
/// assert!(doc.is_valid());
///
/// let settings: Settings = doc.unmarshal_any().unwrap();
/// assert_eq!(settings.theme, "dark");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Json {
    inner: Bytes,
}

impl Json {
    pub const fn new(value: Vec<u8>, valid: bool) -> Self {
        Self {
            inner: Bytes::new(value, valid),
        }
    }

    pub const fn from_value(value: Vec<u8>) -> Self {
        Self::new(value, true)
    }

    pub fn from_option(value: Option<Vec<u8>>) -> Self {
        Self {
            inner: Bytes::from_option(value),
        }
    }

    pub fn from_ref(value: Option<&[u8]>) -> Self {
        Self {
            inner: Bytes::from_ref(value),
        }
    }

    /// Stored document, empty when null
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Store a textual document after checking it is well-formed. Empty text
    /// stores null.
    pub fn marshal_str(&mut self, document: &str) -> Result<()> {
        self.marshal_bytes(document.as_bytes())
    }

    /// Store a document after checking it is well-formed. Empty input stores
    /// null.
    pub fn marshal_bytes(&mut self, document: &[u8]) -> Result<()> {
        if document.is_empty() {
            self.nullable_mut().reset();
            return Ok(());
        }
        serde_json::from_slice::<IgnoredAny>(document)
            .map_err(|e| NullError::unmarshal("bytes", TYPE_NAME).with_cause(e))?;
        self.nullable_mut().set_value(document.to_vec());
        Ok(())
    }

    /// Store the JSON encoding of `value`. A value that encodes as `null`
    /// stores null.
    ///
    /// A `&str` is encoded as a JSON string, so `marshal_any("[1]")` stores
    /// `"[1]"`. Use [`Json::marshal_str`] or [`Json::marshal_bytes`] for text
    /// that already is a document.
    pub fn marshal_any<S>(&mut self, value: &S) -> Result<()>
    where
        S: Serialize + ?Sized,
    {
        let encoded = serde_json::to_vec(value).map_err(|e| {
            NullError::unmarshal(std::any::type_name::<S>(), TYPE_NAME).with_cause(e)
        })?;
        if encoded == literal::NULL {
            self.nullable_mut().reset();
        } else {
            self.nullable_mut().set_value(encoded);
        }
        Ok(())
    }

    /// Decode the stored document into `D`. A null document decodes from
    /// `null`.
    pub fn unmarshal_any<D>(&self) -> Result<D>
    where
        D: DeserializeOwned,
    {
        let document = self.marshal_json()?;
        serde_json::from_slice(&document).map_err(|e| {
            NullError::unmarshal(TYPE_NAME, std::any::type_name::<D>()).with_cause(e)
        })
    }
}

impl NullableValue for Json {
    type Base = Vec<u8>;

    fn nullable(&self) -> &Nullable<Vec<u8>> {
        self.inner.nullable()
    }

    fn nullable_mut(&mut self) -> &mut Nullable<Vec<u8>> {
        self.inner.nullable_mut()
    }

    fn marshal_json(&self) -> Result<Vec<u8>> {
        self.inner.marshal_json()
    }

    /// Stores the document verbatim without decoding it
    fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        if literal::is_json_null(data) {
            self.nullable_mut().reset();
        } else {
            self.nullable_mut().set_value(data.to_vec());
        }
        Ok(())
    }

    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        self.inner.unmarshal_text(data)
    }
}

impl From<Vec<u8>> for Json {
    fn from(value: Vec<u8>) -> Self {
        Self::from_value(value)
    }
}

impl From<Json> for Bytes {
    fn from(value: Json) -> Self {
        value.inner
    }
}

impl Serialize for Json {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_raw(self.inner.present(), serializer)
    }
}

impl<'de> Deserialize<'de> for Json {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Box<RawValue>>::deserialize(deserializer)?;
        Ok(Self::from_option(raw.map(|raw| raw.get().as_bytes().to_vec())))
    }
}
