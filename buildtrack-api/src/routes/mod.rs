pub(crate) mod assistant;
pub(crate) mod calendar;
pub(crate) mod dashboard;
pub(crate) mod error;
pub(crate) mod notifications;
pub(crate) mod pccc;
pub(crate) mod projects;
pub(crate) mod qaqc;

pub(crate) use error::ApiError;
