pub mod period;
pub mod records;
pub mod report;
pub mod sex;
pub mod warning;
