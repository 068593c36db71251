//! Single level integer Haar wavelet transform.
//!
//! [`BandLayout`] selects between pairing the flattened grid ([`FlatLayout`])
//! and the separable 2D decomposition into four bands ([`FourBandLayout`]).
//! Both reconstruct every integer grid exactly, odd dimensions are edge padded
//! on the way in and cropped on the way out.

mod bands;
mod layout;
pub mod lifting;

pub use bands::{Band, CoefficientBands, Subband};
pub use layout::{BandLayout, Decompose, FlatLayout, FourBandLayout};
