pub mod analyze_result;
pub mod errors;
pub mod menu_item;
pub mod preferences;
pub mod risk_hit;

pub use analyze_result::*;
pub use errors::*;
pub use menu_item::*;
pub use preferences::*;
pub use risk_hit::*;
