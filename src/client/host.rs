//! Host platform seam
//!
//! Inside Telegram the page runs next to a `Telegram.WebApp` object that
//! knows who the user is and can open the native payment sheet. Outside of
//! it neither exists.

use async_trait::async_trait;
use serde_json::Value;

use super::error::ClientResult;
use crate::model::GUEST_USER_ID;

/// Final status reported by the payment sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Cancelled,
    Failed,
    Pending,
}

impl PaymentStatus {
    /// Map the status string Telegram hands to the invoice callback
    pub fn from_label(label: &str) -> Self {
        match label {
            "paid" => PaymentStatus::Paid,
            "cancelled" => PaymentStatus::Cancelled,
            "pending" => PaymentStatus::Pending,
            _ => PaymentStatus::Failed,
        }
    }
}

/// Capabilities of the platform hosting the page
#[async_trait(?Send)]
pub trait HostPlatform {
    /// Platform-provided user id, if any
    fn user_id(&self) -> Option<i64>;

    /// Ask the host to give the app the full viewport
    fn expand(&self);

    /// Whether a native payment sheet exists
    fn supports_payments(&self) -> bool;

    /// Present `invoice` and wait for the user to finish
    async fn show_invoice(&self, invoice: &Value) -> ClientResult<PaymentStatus>;
}

/// Resolve the session identity once: host id, else the guest id.
pub fn resolve_user_id<H: HostPlatform + ?Sized>(host: &H) -> i64 {
    match host.user_id() {
        Some(id) if id != 0 => id,
        _ => GUEST_USER_ID,
    }
}

/// A plain browser tab or terminal: no identity, no payments
#[derive(Debug, Default, Clone, Copy)]
pub struct Standalone;

#[async_trait(?Send)]
impl HostPlatform for Standalone {
    fn user_id(&self) -> Option<i64> {
        None
    }

    fn expand(&self) {}

    fn supports_payments(&self) -> bool {
        false
    }

    async fn show_invoice(&self, _invoice: &Value) -> ClientResult<PaymentStatus> {
        Err(super::error::ClientError::PaymentUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_falls_back_to_guest() {
        assert_eq!(resolve_user_id(&Standalone), GUEST_USER_ID);
    }

    #[test]
    fn test_payment_status_labels() {
        assert_eq!(PaymentStatus::from_label("paid"), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::from_label("cancelled"), PaymentStatus::Cancelled);
        assert_eq!(PaymentStatus::from_label("something"), PaymentStatus::Failed);
    }
}
