#![allow(ambiguous_glob_reexports)]

pub mod claim_rewards;
pub mod deposit_all;
pub mod harvest_all;
pub mod initialize_gauge;
pub mod initialize_pool;
pub mod initialize_route;
pub mod seed_liquidity;
pub mod withdraw_all;

pub use claim_rewards::*;
pub use deposit_all::*;
pub use harvest_all::*;
pub use initialize_gauge::*;
pub use initialize_pool::*;
pub use initialize_route::*;
pub use seed_liquidity::*;
pub use withdraw_all::*;
