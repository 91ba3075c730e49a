pub(crate) mod attendance;
pub(crate) mod census;
pub(crate) mod dashboard;
pub(crate) mod discipleship;
pub(crate) mod finance;
pub(crate) mod inventory;
pub(crate) mod payments;
pub(crate) mod tithes;
