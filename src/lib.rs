//! IPv4 networks in CIDR notation.
//!
//! An [`Ipv4Cidr`] keeps the address exactly as given together with its
//! prefix length; the network and broadcast addresses are derived from it.
//!
//! ```
//! use cidr_block::Ipv4Cidr;
//!
//! let cidr = Ipv4Cidr::parse("10.10.1.44/27").unwrap();
//! assert_eq!(cidr.network().to_string(), "10.10.1.32/27");
//! assert_eq!(cidr.broadcast().to_string(), "10.10.1.63/27");
//! assert_eq!(cidr.address_count(), 32);
//! assert_eq!(cidr.next().unwrap().to_string(), "10.10.1.45/27");
//! ```

pub mod error;
pub mod ipv4;

pub use error::{CidrError, ErrorKind, Result};
pub use ipv4::{prefix_len_of_mask, Ipv4Cidr};
