//! Person resource implementation.

use crate::rest::{Listable, Readable};

resource_type!(
    /// A person known to the user.
    Person, "person"
);

impl Readable for Person {}
impl Listable for Person {}
