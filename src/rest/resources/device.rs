//! Device resource implementation.

use crate::rest::{Listable, Readable};

resource_type!(
    /// A device registered to the user.
    Device, "device"
);

impl Readable for Device {}
impl Listable for Device {}
