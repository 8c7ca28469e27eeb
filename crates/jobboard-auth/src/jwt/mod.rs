//! Session token claim extraction.

pub mod claims;
pub mod decoder;

pub use claims::{TokenClaims, TokenIdentity};
pub use decoder::{ClaimsDecoder, UnverifiedDecoder, VerifyingDecoder, build_decoder, extract_identity};
