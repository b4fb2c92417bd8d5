//! Constant-product hop math with explicit rounding.
//!
//! Exact-in (one hop, fee taken from the input):
//!
//! ```text
//! in_after_fee = amount_in * (10_000 - fee_bps) / 10_000         (floor)
//! amount_out   = reserve_out * in_after_fee / (reserve_in + in_after_fee)   (floor)
//! ```
//!
//! Exact-out inverts both steps and rounds up, so a reverse quote never asks
//! for less than the forward formula would need.

use crate::error::{Result, RouteError};
use crate::ids::PoolId;
use alloy_primitives::U256;

/// Basis-point denominator (10 000 = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// `a * b / denominator` with checked multiplication.
///
/// # Errors
///
/// [`RouteError::Overflow`] if the product exceeds 256 bits or the
/// denominator is zero.
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(RouteError::Overflow("mul_div by zero"));
    }
    let product = a
        .checked_mul(b)
        .ok_or(RouteError::Overflow("mul_div product"))?;
    let (quotient, remainder) = product.div_rem(denominator);
    match rounding {
        Rounding::Down => Ok(quotient),
        Rounding::Up if remainder.is_zero() => Ok(quotient),
        Rounding::Up => quotient
            .checked_add(U256::from(1u8))
            .ok_or(RouteError::Overflow("mul_div round up")),
    }
}

/// Reserves of one pool seen from the side of the token being sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopReserves {
    pub pool: PoolId,
    pub reserve_in: U256,
    pub reserve_out: U256,
    pub fee_bps: u32,
}

impl HopReserves {
    fn insufficient(&self) -> RouteError {
        RouteError::InsufficientLiquidity { pool: self.pool }
    }

    fn fee_complement(&self) -> U256 {
        U256::from(BPS_DENOMINATOR.saturating_sub(self.fee_bps))
    }

    /// Input remaining after the pool skims its fee, rounded down.
    pub fn after_fee(&self, amount_in: U256) -> Result<U256> {
        mul_div(
            amount_in,
            self.fee_complement(),
            U256::from(BPS_DENOMINATOR),
            Rounding::Down,
        )
    }

    /// Output of selling `amount_in` into this pool.
    ///
    /// # Errors
    ///
    /// [`RouteError::InsufficientLiquidity`] when the post-fee input reaches
    /// `reserve_in`, when the output would reach `reserve_out`, or when the
    /// output rounds down to nothing.
    pub fn amount_out(&self, amount_in: U256) -> Result<U256> {
        let in_after_fee = self.after_fee(amount_in)?;
        if in_after_fee >= self.reserve_in {
            return Err(self.insufficient());
        }
        let denominator = self
            .reserve_in
            .checked_add(in_after_fee)
            .ok_or(RouteError::Overflow("exact-in denominator"))?;
        let out = mul_div(self.reserve_out, in_after_fee, denominator, Rounding::Down)?;
        if out.is_zero() || out >= self.reserve_out {
            return Err(self.insufficient());
        }
        Ok(out)
    }

    /// Input required to receive exactly `amount_out` from this pool.
    ///
    /// # Errors
    ///
    /// [`RouteError::InsufficientLiquidity`] when `amount_out` reaches
    /// `reserve_out` or the fee is 100%.
    pub fn amount_in(&self, amount_out: U256) -> Result<U256> {
        if amount_out >= self.reserve_out {
            return Err(self.insufficient());
        }
        let complement = self.fee_complement();
        if complement.is_zero() {
            return Err(self.insufficient());
        }
        let in_after_fee = mul_div(
            self.reserve_in,
            amount_out,
            self.reserve_out - amount_out,
            Rounding::Up,
        )?;
        mul_div(
            in_after_fee,
            U256::from(BPS_DENOMINATOR),
            complement,
            Rounding::Up,
        )
    }

    /// Zero-size output: `amount * reserve_out / reserve_in`, no fee.
    pub fn spot_out(&self, amount: U256) -> Result<U256> {
        mul_div(amount, self.reserve_out, self.reserve_in, Rounding::Down)
    }
}

/// Shortfall of `realized` against `spot`, in basis points of `spot`.
pub fn shortfall_bps(spot: U256, realized: U256) -> Result<u32> {
    if spot.is_zero() || realized >= spot {
        return Ok(0);
    }
    let bps = mul_div(
        spot - realized,
        U256::from(BPS_DENOMINATOR),
        spot,
        Rounding::Down,
    )?;
    Ok(bps.saturating_to::<u32>())
}
