pub mod base;
pub mod factory;
pub mod pagination;
pub mod parsers;
pub mod queries;

pub mod bandsintown;
pub mod foopee;
pub mod seatgeek;
pub mod songkick;

pub use bandsintown::BandsInTownAdapter;
pub use factory::{create_adapter, create_adapters};
pub use foopee::FoopeeAdapter;
pub use seatgeek::SeatGeekAdapter;
pub use songkick::SongkickAdapter;
