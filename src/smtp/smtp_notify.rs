/// Receipt headers requested from the recipient's mail client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmtpNotify {
    /// Adds `Disposition-Notification-To` with the sender address.
    pub delivery_notification: bool,
    /// Adds `Return-Receipt-To` with the sender address.
    pub return_receipt: bool,
}

impl SmtpNotify {
    pub fn new(delivery_notification: bool, return_receipt: bool) -> Self {
        SmtpNotify {
            delivery_notification,
            return_receipt,
        }
    }
}
