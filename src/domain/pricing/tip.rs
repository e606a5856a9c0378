//! Screen-local checkout selections: delivery tip and coupon entry.
//!
//! These are app-owned state containers in the same sense as
//! [`CartState`](crate::domain::cart::CartState) — the SDK provides the
//! update rules, the app owns the instance and discards it on navigation.

use rust_decimal::Decimal;

/// Delivery-partner tip selection.
///
/// A preset chip and a free-typed amount are mutually exclusive: picking one
/// clears the other. Re-selecting the active preset toggles it off.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TipSelection {
    #[default]
    None,
    Preset(Decimal),
    Custom(Decimal),
}

impl TipSelection {
    /// The amount added to the quote; zero when nothing is selected.
    pub fn amount(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::Preset(amount) | Self::Custom(amount) => *amount,
        }
    }

    /// Tap a preset chip. Tapping the active chip deselects it; any other
    /// tap replaces whatever was selected, including a custom amount.
    pub fn toggle_preset(&mut self, amount: Decimal) {
        *self = match self {
            Self::Preset(current) if *current == amount => Self::None,
            _ => Self::Preset(amount),
        };
    }

    /// Type a custom amount. Clears any preset. Negative amounts are
    /// rejected; an explicit zero clears the tip.
    pub fn set_custom(&mut self, amount: Decimal) -> Result<(), String> {
        if amount.is_sign_negative() {
            return Err("tip must not be negative".to_string());
        }
        *self = if amount.is_zero() {
            Self::None
        } else {
            Self::Custom(amount)
        };
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::None;
    }
}

/// Coupon entry state.
///
/// Submitting any non-empty code "applies" it (uppercased) and unlocks the
/// flat discount. There is no server-side validation behind this yet; see
/// DESIGN.md before treating it as real business logic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponEntry {
    applied: Option<String>,
}

impl CouponEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a code. Whitespace-only input is ignored and reports `false`.
    pub fn apply(&mut self, code: &str) -> bool {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.applied = Some(trimmed.to_uppercase());
        true
    }

    pub fn remove(&mut self) {
        self.applied = None;
    }

    pub fn is_applied(&self) -> bool {
        self.applied.is_some()
    }

    pub fn code(&self) -> Option<&str> {
        self.applied.as_deref()
    }
}
