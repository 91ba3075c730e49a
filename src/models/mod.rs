mod attendance;
mod census;
mod discipleship;
mod finance;
mod inventory;
mod payment;
mod period;
mod tithe;
mod user;

pub use attendance::{AttendanceCell, AttendanceColumn, AttendanceRow, DEFAULT_ATTENDANCE_ROWS};
pub use census::{ChurchRecord, PersonalRecord};
pub use discipleship::{Mark, MarkStatus, MeetingDate, Participant};
pub use finance::{EntryKind, EntryState, FinanceEntry};
pub use inventory::InventoryItem;
pub use payment::{PaymentRow, PaymentTable};
pub use period::{GlobalConfig, Period, PeriodConfig, PeriodStatus};
pub use tithe::Tithe;
pub use user::User;

#[cfg(test)]
mod tests;
