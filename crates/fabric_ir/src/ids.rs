//! Opaque ID newtypes for IR entities.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// Identity of a signal, unique within one [`IrContext`](crate::IrContext).
    SignalId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_roundtrip() {
        assert_eq!(SignalId::from_raw(42).as_raw(), 42);
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(SignalId::from_raw(1));
        set.insert(SignalId::from_raw(2));
        set.insert(SignalId::from_raw(1));
        assert_eq!(set.len(), 2);
    }
}
