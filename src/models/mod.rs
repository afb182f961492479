pub mod alert;
pub mod enums;
pub mod filters;
pub mod inventory;
pub mod medication;
pub mod prediction;
pub mod region;
pub mod stock;

pub use alert::*;
pub use filters::*;
pub use inventory::*;
pub use medication::*;
pub use prediction::*;
pub use region::*;
pub use stock::*;
