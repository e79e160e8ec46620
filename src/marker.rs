/// Storable type tags. Every encoded value starts with one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Array forthcoming (count, item list)
    Array,
    /// Hash forthcoming (count, value/key pair list)
    Hash,
    /// Reference to a value forthcoming
    Ref,
    /// Undefined scalar. Reserved, never emitted.
    Undef,
    /// Small scalar follows (length, data)
    Scalar,
    /// Small UTF-8 string follows. Reserved, never emitted: all text goes out as `Scalar`.
    Utf8Str,
}

impl Tag {
    /// Construct a tag from a single byte. Returns `None` for bytes this crate doesn't know.
    pub fn from_u8(n: u8) -> Option<Tag> {
        match n {
            0x02 => Some(Tag::Array),
            0x03 => Some(Tag::Hash),
            0x04 => Some(Tag::Ref),
            0x05 => Some(Tag::Undef),
            0x0a => Some(Tag::Scalar),
            0x17 => Some(Tag::Utf8Str),
            _ => None,
        }
    }

    /// Converts a tag into its single-byte representation.
    pub fn into_u8(self) -> u8 {
        match self {
            Tag::Array => 0x02,
            Tag::Hash => 0x03,
            Tag::Ref => 0x04,
            Tag::Undef => 0x05,
            Tag::Scalar => 0x0a,
            Tag::Utf8Str => 0x17,
        }
    }

    /// Whether this encoder ever writes the tag.
    pub fn is_emitted(self) -> bool {
        !matches!(self, Tag::Undef | Tag::Utf8Str)
    }
}

impl From<Tag> for u8 {
    fn from(val: Tag) -> u8 {
        val.into_u8()
    }
}
