//! Marking values as reached through a reference.
//!
//! Serde serializes `Box`, `&`, `Rc` and `Arc` exactly like the value they point to, so the
//! encoder can't see them. Wrap the value in [`Ref`], or annotate an existing pointer field with
//! [`serialize`], and the encoder writes a Storable reference tag in front of it. Perl sees the
//! result as a reference (`{'nested' => {'Name' => 'Kevin'}}`) rather than a flattened value.
//!
//! ```
//! use serde::Serialize;
//! use storable_pack::Ref;
//!
//! #[derive(Serialize)]
//! struct Inner {
//!     name: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Outer {
//!     inner: Ref<Inner>,
//!     #[serde(serialize_with = "storable_pack::reference::serialize")]
//!     boxed: Box<Inner>,
//! }
//! ```

use std::ops::{Deref, DerefMut};

use serde::{Serialize, Serializer};

/// Newtype struct name the encoder treats as a reference marker. Other serializers see an
/// ordinary newtype struct and encode the pointee transparently.
pub(crate) const REF_TOKEN: &str = "$storable_pack::private::Ref";

/// A value that is encoded behind a Storable reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ref<T>(pub T);

impl<T> Ref<T> {
    pub fn new(value: T) -> Self {
        Ref(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Ref<T> {
    fn from(value: T) -> Self {
        Ref(value)
    }
}

impl<T> Deref for Ref<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Ref<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Serialize> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(REF_TOKEN, &self.0)
    }
}

/// `serialize_with` helper marking a pointer field (`Box<T>`, `Rc<T>`, `&T`, ...) as a reference.
pub fn serialize<P, T, S>(value: &P, serializer: S) -> Result<S::Ok, S::Error>
where
    P: Deref<Target = T>,
    T: Serialize + ?Sized,
    S: Serializer,
{
    serializer.serialize_newtype_struct(REF_TOKEN, &**value)
}
