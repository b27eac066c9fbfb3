pub mod alias;
pub mod cause;
pub mod municipality;
