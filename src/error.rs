use std::net::Ipv4Addr;
use thiserror::Error;

use crate::ipv4::Ipv4Cidr;

/// Errors produced while building or stepping an [`Ipv4Cidr`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Input is not of the form `<ip>/<mask>`
    #[error("Invalid CIDR notation: {0}")]
    InvalidNotation(String),

    /// Address part is not a dotted quad
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    /// Mask part is neither a prefix length in 0-32 nor a dotted quad
    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    /// Dotted mask whose one bits are not a leading run
    #[error("Subnet mask {0} is not contiguous")]
    NonContiguousMask(Ipv4Addr),

    /// Prefix length above 32 passed to a constructor
    #[error("Invalid prefix length: {0} (must be 0-32)")]
    InvalidPrefixLength(u8),

    /// `next` called on the broadcast address
    #[error("No address left after {0} in its network")]
    NoNextAddress(Ipv4Cidr),

    /// `previous` called on the network address
    #[error("No address left before {0} in its network")]
    NoPreviousAddress(Ipv4Cidr),
}

/// Coarse classification of a [`CidrError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input to `parse`
    Parse,
    /// Prefix length out of range in `new`
    Construction,
    /// No neighbouring address inside the network
    RangeExhausted,
}

impl CidrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CidrError::InvalidNotation(_)
            | CidrError::InvalidAddress(_)
            | CidrError::InvalidMask(_)
            | CidrError::NonContiguousMask(_) => ErrorKind::Parse,
            CidrError::InvalidPrefixLength(_) => ErrorKind::Construction,
            CidrError::NoNextAddress(_) | CidrError::NoPreviousAddress(_) => {
                ErrorKind::RangeExhausted
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CidrError>;
