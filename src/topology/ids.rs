//! `NodeId`, `EdgeId`, `PortId`: strong, zero-cost handles for graph entities
//!
//! The topology layer identifies nodes, edges and ports purely by dense
//! integer indices. Wrapping each index in its own newtype keeps the three
//! id spaces from being mixed up, and absence is expressed as
//! `Option<NodeId>` rather than a magic sentinel value.
//!
//! All three types are `repr(transparent)` over `usize`, so a slice of ids
//! has the same layout as a slice of integers.

use std::fmt;

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Wraps a raw index.
            #[inline]
            pub const fn new(raw: usize) -> Self {
                $name(raw)
            }

            /// Returns the raw index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(raw: usize) -> Self {
                $name(raw)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> usize {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw index.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_id!(
    /// Index of a node in a [`Topology`](crate::topology::Topology).
    NodeId
);
dense_id!(
    /// Index of an edge in a [`Topology`](crate::topology::Topology).
    EdgeId
);
dense_id!(
    /// Index of a port in a [`LightweightNetwork`](crate::topology::LightweightNetwork).
    PortId
);



#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let e = EdgeId::new(123);
        let s = serde_json::to_string(&e).unwrap();
        assert_eq!(s, "123");
        let e2: EdgeId = serde_json::from_str(&s).unwrap();
        assert_eq!(e2, e);
    }

    #[test]
    fn bincode_roundtrip() {
        let n = Some(NodeId::new(456));
        let bytes = bincode::serialize(&n).unwrap();
        let n2: Option<NodeId> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(n2, n);
    }
}
