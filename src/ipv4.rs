use lazy_static::lazy_static;
use regex::Captures;
use regex::Regex;
use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{CidrError, Result};

lazy_static! {
    static ref QUAD: Regex = Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$"
    )
    .expect("Not possible");
    static ref PREFIX: Regex = Regex::new(r"^[0-9]+$").expect("Not possible");
    static ref MASK_QUAD: Regex =
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("Not possible");
}

/// An IPv4 address together with the prefix length of its network.
///
/// The address is kept as given, so `1.2.3.4/24` and `1.2.3.0/24` are
/// different values that share the same [`network`](Ipv4Cidr::network).
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug)]
pub struct Ipv4Cidr {
    address: u32,
    prefix_len: u8,
}

impl Ipv4Cidr {
    pub fn new(address: u32, prefix_len: u8) -> Result<Self> {
        if prefix_len > 32 {
            return Err(CidrError::InvalidPrefixLength(prefix_len));
        }
        Ok(Ipv4Cidr {
            address,
            prefix_len,
        })
    }

    pub fn from_addr(address: Ipv4Addr, prefix_len: u8) -> Result<Self> {
        Ipv4Cidr::new(u32::from(address), prefix_len)
    }

    /// Parses `<ip>/<len>` or `<ip>/<dotted mask>`, e.g. `1.2.3.4/23` or
    /// `1.2.3.4/255.255.254.0`.
    pub fn parse(s: &str) -> Result<Self> {
        let (ip, mask) = s
            .split_once('/')
            .ok_or_else(|| CidrError::InvalidNotation(format!("missing mask in {:?}", s)))?;
        let address = parse_quad(ip).ok_or_else(|| CidrError::InvalidAddress(ip.to_owned()))?;
        let prefix_len = if PREFIX.is_match(mask) {
            match mask.parse::<u32>() {
                Ok(len) if len <= 32 => len as u8,
                _ => return Err(CidrError::InvalidMask(mask.to_owned())),
            }
        } else {
            let bits =
                parse_mask_quad(mask).ok_or_else(|| CidrError::InvalidMask(mask.to_owned()))?;
            prefix_len_of_mask(Ipv4Addr::from(bits))?
        };
        Ipv4Cidr::new(address, prefix_len)
    }

    pub fn address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.address)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    fn mask_bits(&self) -> u32 {
        u32::MAX
            .checked_shl(32 - self.prefix_len as u32)
            .unwrap_or(0)
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask_bits())
    }

    pub fn hostmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(!self.mask_bits())
    }

    /// The address with all host bits cleared.
    pub fn network(&self) -> Ipv4Cidr {
        Ipv4Cidr {
            address: self.address & self.mask_bits(),
            prefix_len: self.prefix_len,
        }
    }

    /// The address with all host bits set.
    pub fn broadcast(&self) -> Ipv4Cidr {
        Ipv4Cidr {
            address: self.address | !self.mask_bits(),
            prefix_len: self.prefix_len,
        }
    }

    /// Number of addresses in the network; `2^32` for `/0`.
    pub fn address_count(&self) -> u64 {
        1u64 << (32 - self.prefix_len as u32)
    }

    /// The following address in the same network.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Result<Ipv4Cidr> {
        if *self == self.broadcast() {
            return Err(CidrError::NoNextAddress(*self));
        }
        Ok(Ipv4Cidr {
            address: self.address + 1,
            prefix_len: self.prefix_len,
        })
    }

    /// The preceding address in the same network.
    pub fn previous(&self) -> Result<Ipv4Cidr> {
        if *self == self.network() {
            return Err(CidrError::NoPreviousAddress(*self));
        }
        Ok(Ipv4Cidr {
            address: self.address - 1,
            prefix_len: self.prefix_len,
        })
    }

    /// Checks `other` against this network.
    ///
    /// Both addresses are widened with this block's mask, so the prefix
    /// length of `other` is not taken into account.
    pub fn contains(&self, other: &Ipv4Cidr) -> bool {
        let mask = self.mask_bits();
        let (net, bcast) = (self.address & mask, self.address | !mask);
        let (other_net, other_bcast) = (other.address & mask, other.address | !mask);
        other_bcast >= net && other_net <= bcast
    }

    pub fn contains_addr(&self, ip: Ipv4Addr) -> bool {
        let ip = u32::from(ip);
        self.network().address <= ip && ip <= self.broadcast().address
    }
}

fn parse_quad(s: &str) -> Option<u32> {
    fn octet(ind: usize, v: &Captures<'_>) -> Option<u32> {
        v.get(ind)?.as_str().parse::<u32>().ok()
    }
    let v = QUAD.captures(s)?;
    Some((octet(1, &v)? << 24) | (octet(2, &v)? << 16) | (octet(3, &v)? << 8) | octet(4, &v)?)
}

// Mask octets may carry leading zeros, e.g. `255.255.0254.0`.
fn parse_mask_quad(s: &str) -> Option<u32> {
    let v = MASK_QUAD.captures(s)?;
    (1..=4).try_fold(0u32, |bits, ind| {
        let octet = v.get(ind)?.as_str().parse::<u32>().ok().filter(|o| *o <= 255)?;
        Some((bits << 8) | octet)
    })
}

/// Converts a dotted subnet mask such as `255.255.254.0` to its prefix
/// length. The one bits have to form a single leading run.
pub fn prefix_len_of_mask(mask: Ipv4Addr) -> Result<u8> {
    let bits = u32::from(mask);
    let len = bits.leading_ones();
    if bits.checked_shl(len).unwrap_or(0) != 0 {
        return Err(CidrError::NonContiguousMask(mask));
    }
    Ok(len as u8)
}

impl FromStr for Ipv4Cidr {
    type Err = CidrError;
    fn from_str(s: &str) -> Result<Self> {
        Ipv4Cidr::parse(s)
    }
}

impl Display for Ipv4Cidr {
    fn fmt(&self, f: &mut Formatter) -> std::result::Result<(), Error> {
        if self.prefix_len == 32 {
            write!(f, "{}", self.address())
        } else {
            write!(f, "{}/{}", self.address(), self.prefix_len)
        }
    }
}

impl From<Ipv4Cidr> for Ipv4Addr {
    fn from(cidr: Ipv4Cidr) -> Self {
        cidr.address()
    }
}

impl From<Ipv4Cidr> for u32 {
    fn from(cidr: Ipv4Cidr) -> Self {
        cidr.address
    }
}
