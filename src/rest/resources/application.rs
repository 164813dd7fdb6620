//! Application resource implementation.

use crate::rest::{Listable, Readable};

resource_type!(
    /// An application installed by the user.
    Application, "application"
);

impl Readable for Application {}
impl Listable for Application {}
