//!
//! # ende
//!
//! (en)Encode and (de)Decode
//!
//! Every `serde` type, `OrderedMap` included, gets a byte codec through the
//! blanket impls below. The codec is picked at build time:
//! `msgpack_codec` (default), then `json_codec`, then `bcs_codec`.
//!

use ruc::*;

#[cfg(feature = "serde_ende")]
use serde::{Serialize, de::DeserializeOwned};

#[cfg(all(
    feature = "serde_ende",
    not(any(feature = "msgpack_codec", feature = "json_codec", feature = "bcs_codec"))
))]
compile_error!("`serde_ende` needs one of `msgpack_codec`, `json_codec`, `bcs_codec`");

/// Encoded form of a value.
pub type RawBytes = Vec<u8>;

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

/// Methods used to encode the VALUE.
pub trait ValueEn: Sized {
    /// Encode original value type to bytes.
    fn try_encode_value(&self) -> Result<RawBytes>;

    fn encode_value(&self) -> RawBytes {
        pnk!(self.try_encode_value())
    }
}

/// Methods used to decode the VALUE.
pub trait ValueDe: Sized {
    /// Decode from bytes to the original value type.
    fn decode_value(bytes: &[u8]) -> Result<Self>;
}

/// Methods used to encode and decode the VALUE.
pub trait ValueEnDe: Sized {
    /// Encode original value type to bytes.
    fn try_encode(&self) -> Result<RawBytes>;

    fn encode(&self) -> RawBytes {
        pnk!(self.try_encode())
    }

    /// Decode from bytes to the original value type.
    fn decode(bytes: &[u8]) -> Result<Self>;
}

#[cfg(feature = "serde_ende")]
impl<T: Serialize> ValueEn for T {
    fn try_encode_value(&self) -> Result<RawBytes> {
        codec::to_bytes(self)
    }
}

#[cfg(feature = "serde_ende")]
impl<T: DeserializeOwned> ValueDe for T {
    fn decode_value(bytes: &[u8]) -> Result<Self> {
        codec::from_slice(bytes)
    }
}

impl<T: ValueEn + ValueDe> ValueEnDe for T {
    fn try_encode(&self) -> Result<RawBytes> {
        <Self as ValueEn>::try_encode_value(self).c(d!())
    }

    fn encode(&self) -> RawBytes {
        <Self as ValueEn>::encode_value(self)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        <Self as ValueDe>::decode_value(bytes).c(d!())
    }
}

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

#[cfg(feature = "msgpack_codec")]
mod codec {
    use super::RawBytes;
    use ruc::*;
    use serde::{Serialize, de::DeserializeOwned};

    #[inline(always)]
    pub(super) fn to_bytes<T: Serialize>(v: &T) -> Result<RawBytes> {
        rmp_serde::to_vec(v).c(d!())
    }

    #[inline(always)]
    pub(super) fn from_slice<T: DeserializeOwned>(b: &[u8]) -> Result<T> {
        rmp_serde::from_slice(b).c(d!())
    }
}

#[cfg(all(feature = "json_codec", not(feature = "msgpack_codec")))]
mod codec {
    use super::RawBytes;
    use ruc::*;
    use serde::{Serialize, de::DeserializeOwned};

    #[inline(always)]
    pub(super) fn to_bytes<T: Serialize>(v: &T) -> Result<RawBytes> {
        serde_json::to_vec(v).c(d!())
    }

    #[inline(always)]
    pub(super) fn from_slice<T: DeserializeOwned>(b: &[u8]) -> Result<T> {
        serde_json::from_slice(b).c(d!())
    }
}

#[cfg(all(
    feature = "bcs_codec",
    not(any(feature = "msgpack_codec", feature = "json_codec"))
))]
mod codec {
    use super::RawBytes;
    use ruc::*;
    use serde::{Serialize, de::DeserializeOwned};

    #[inline(always)]
    pub(super) fn to_bytes<T: Serialize>(v: &T) -> Result<RawBytes> {
        bcs::to_bytes(v).c(d!())
    }

    #[inline(always)]
    pub(super) fn from_slice<T: DeserializeOwned>(b: &[u8]) -> Result<T> {
        bcs::from_bytes(b).c(d!())
    }
}
