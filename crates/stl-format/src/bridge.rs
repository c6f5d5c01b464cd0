//! Lossless conversion between byte buffers and one-byte-per-char text.
//!
//! This is not a text encoding: byte `b` maps to the char whose code point is
//! `b` (U+0000..=U+00FF) and back.

use std::borrow::Cow;

/// Input to the parser: raw bytes or text whose chars stand for bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput<'a> {
    Bytes(Cow<'a, [u8]>),
    Text(Cow<'a, str>),
}

impl RawInput<'_> {
    /// The input as bytes, borrowed when it already is bytes.
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            RawInput::Bytes(bytes) => Cow::Borrowed(bytes.as_ref()),
            RawInput::Text(text) => Cow::Owned(to_bytes(text)),
        }
    }

    /// The input as text, borrowed when it already is text.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawInput::Bytes(bytes) => Cow::Owned(to_text(bytes)),
            RawInput::Text(text) => Cow::Borrowed(text.as_ref()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawInput::Bytes(bytes) => bytes.len(),
            RawInput::Text(text) => text.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawInput::Bytes(bytes) => bytes.is_empty(),
            RawInput::Text(text) => text.is_empty(),
        }
    }
}

impl<'a> From<&'a [u8]> for RawInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        RawInput::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for RawInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        RawInput::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<Vec<u8>> for RawInput<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        RawInput::Bytes(Cow::Owned(bytes))
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(text: &'a str) -> Self {
        RawInput::Text(Cow::Borrowed(text))
    }
}

impl From<String> for RawInput<'static> {
    fn from(text: String) -> Self {
        RawInput::Text(Cow::Owned(text))
    }
}

/// Map every byte to the char with the same code point, preserving order.
pub fn to_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Map every char to the low 8 bits of its code point, preserving order.
pub fn to_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| (u32::from(c) & 0xFF) as u8).collect()
}
