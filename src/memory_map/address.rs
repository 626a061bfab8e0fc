//! 24-bit distributed address format `[type:4][id:4][local:16]`.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SimError};

/// Highest node type code or node id that fits in four bits.
pub const MAX_NIBBLE: u8 = 0xF;

/// Bytes addressable inside one node window.
pub const LOCAL_WINDOW: u32 = 1 << 16;

/// A decoded mesh address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MeshAddress {
    pub node_type: u8,
    pub node_id: u8,
    pub local: u16,
}

impl MeshAddress {
    pub fn new(node_type: u8, node_id: u8, local: u16) -> Result<Self> {
        if node_type > MAX_NIBBLE {
            return Err(SimError::invalid_parameter(
                "node type",
                format!("must fit in 4 bits, got {node_type}"),
            ));
        }
        if node_id > MAX_NIBBLE {
            return Err(SimError::invalid_parameter(
                "node id",
                format!("must fit in 4 bits, got {node_id}"),
            ));
        }
        Ok(Self { node_type, node_id, local })
    }

    /// Pack into the low 24 bits of a `u32`.
    pub fn encode(&self) -> u32 {
        (u32::from(self.node_type) << 20) | (u32::from(self.node_id) << 16) | u32::from(self.local)
    }

    /// Unpack a 24-bit address.
    pub fn decode(raw: u32) -> Result<Self> {
        if raw > 0xFF_FFFF {
            return Err(SimError::invalid_parameter(
                "address",
                format!("{raw:#x} exceeds 24 bits"),
            ));
        }
        Ok(Self {
            node_type: ((raw >> 20) & 0xF) as u8,
            node_id: ((raw >> 16) & 0xF) as u8,
            local: (raw & 0xFFFF) as u16,
        })
    }

    /// First and last address of a node's window.
    pub fn window(node_type: u8, node_id: u8) -> Result<(Self, Self)> {
        Ok((
            Self::new(node_type, node_id, 0)?,
            Self::new(node_type, node_id, u16::MAX)?,
        ))
    }
}

impl fmt::Display for MeshAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.encode();
        write!(f, "0x{:02X}_{:04X}", raw >> 16, raw & 0xFFFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let addr = MeshAddress::new(1, 2, 0xBEEF).unwrap();
        assert_eq!(addr.encode(), 0x12_BEEF);
        assert_eq!(addr.to_string(), "0x12_BEEF");
        assert_eq!(MeshAddress::decode(0x12_BEEF).unwrap(), addr);
    }

    #[test]
    fn test_window_bounds() {
        let (start, end) = MeshAddress::window(3, 5).unwrap();
        assert_eq!(start.to_string(), "0x35_0000");
        assert_eq!(end.to_string(), "0x35_FFFF");
        assert_eq!(end.encode() - start.encode() + 1, LOCAL_WINDOW);
    }

    #[test]
    fn test_out_of_range_fields() {
        assert!(MeshAddress::new(16, 0, 0).is_err());
        assert!(MeshAddress::new(0, 16, 0).is_err());
        assert!(MeshAddress::decode(0x100_0000).is_err());
    }
}
