// Copyright 2023 Centrifuge Foundation (centrifuge.io).
//
// This file is part of the Centrifuge chain project.
// Centrifuge is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version (see http://www.gnu.org/licenses).
// Centrifuge is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

use alloc::string::String;
use core::{fmt, str::FromStr};

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Length of an NFT contract address.
pub const CONTRACT_ADDRESS_LEN: usize = 20;

/// Reference to the NFT pledged as collateral: the contract holding the
/// collection and the token inside it.
#[derive(
	Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Encode, Decode, TypeInfo, MaxEncodedLen,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "String", into = "String"))]
pub struct CollateralRef {
	pub contract: [u8; CONTRACT_ADDRESS_LEN],
	pub token_id: u128,
}

impl CollateralRef {
	pub fn new(contract: [u8; CONTRACT_ADDRESS_LEN], token_id: u128) -> Self {
		Self { contract, token_id }
	}

	/// A reference pointing to the zero address can never be locked by the
	/// settlement authority.
	pub fn is_well_formed(&self) -> bool {
		self.contract != [0; CONTRACT_ADDRESS_LEN]
	}
}

impl fmt::Display for CollateralRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x")?;
		for byte in self.contract {
			write!(f, "{byte:02x}")?;
		}
		write!(f, ":{}", self.token_id)
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CollateralRefParseError {
	/// Expected `0x<contract>:<token_id>`.
	MissingSeparator,
	InvalidContract,
	InvalidTokenId,
}

impl fmt::Display for CollateralRefParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MissingSeparator => write!(f, "expected `0x<contract>:<token_id>`"),
			Self::InvalidContract => write!(
				f,
				"contract must be {} hex encoded bytes",
				CONTRACT_ADDRESS_LEN
			),
			Self::InvalidTokenId => write!(f, "token id must be an unsigned integer"),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for CollateralRefParseError {}

impl FromStr for CollateralRef {
	type Err = CollateralRefParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (contract, token_id) = s
			.split_once(':')
			.ok_or(CollateralRefParseError::MissingSeparator)?;

		let contract = contract.strip_prefix("0x").unwrap_or(contract);
		let mut bytes = [0u8; CONTRACT_ADDRESS_LEN];
		hex::decode_to_slice(contract, &mut bytes)
			.map_err(|_| CollateralRefParseError::InvalidContract)?;

		let token_id = token_id
			.parse::<u128>()
			.map_err(|_| CollateralRefParseError::InvalidTokenId)?;

		Ok(Self::new(bytes, token_id))
	}
}

impl TryFrom<String> for CollateralRef {
	type Error = CollateralRefParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<CollateralRef> for String {
	fn from(value: CollateralRef) -> Self {
		use alloc::string::ToString;
		value.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CONTRACT: [u8; CONTRACT_ADDRESS_LEN] = [0xab; CONTRACT_ADDRESS_LEN];

	#[test]
	fn zero_contract_is_malformed() {
		assert!(!CollateralRef::new([0; CONTRACT_ADDRESS_LEN], 1).is_well_formed());
		assert!(CollateralRef::new(CONTRACT, 0).is_well_formed());
	}

	#[test]
	fn parse_display_format() {
		let collateral = CollateralRef::new(CONTRACT, 42);
		let text = collateral.to_string();

		assert_eq!(text, format!("0x{}:42", "ab".repeat(CONTRACT_ADDRESS_LEN)));
		assert_eq!(text.parse::<CollateralRef>(), Ok(collateral));
	}

	#[test]
	fn parse_errors() {
		assert_eq!(
			"0xabcd".parse::<CollateralRef>(),
			Err(CollateralRefParseError::MissingSeparator)
		);
		assert_eq!(
			"0xabcd:1".parse::<CollateralRef>(),
			Err(CollateralRefParseError::InvalidContract)
		);
		assert_eq!(
			format!("0x{}:-1", "ab".repeat(CONTRACT_ADDRESS_LEN)).parse::<CollateralRef>(),
			Err(CollateralRefParseError::InvalidTokenId)
		);
	}

	#[test]
	fn serializes_as_string() {
		let collateral = CollateralRef::new(CONTRACT, 7);
		let json = serde_json::to_string(&collateral).unwrap();

		assert_eq!(json, format!("\"0x{}:7\"", "ab".repeat(CONTRACT_ADDRESS_LEN)));
		assert_eq!(
			serde_json::from_str::<CollateralRef>(&json).unwrap(),
			collateral
		);
	}
}
