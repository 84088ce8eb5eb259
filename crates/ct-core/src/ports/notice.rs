use crate::form::Notice;

/// Surface for one-shot user notices (toasts, alerts).
pub trait NoticePort: Send + Sync {
    fn notify(&self, notice: Notice);
}
