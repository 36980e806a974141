//! Foundational types of the board, plus re-exports from `indexboard-types`.

mod series;
mod session;
mod table;
mod view;

pub use indexboard_types::{
    BoardConfig, BoardError, CacheConfig, FetchStrategy, Interval, Layout, Lookback,
    MarketConfig, world_indices,
};

pub use series::{PricePoint, PriceSeries, SeriesSource};
pub use session::{Session, SessionSchedule, SessionStatus};
pub use table::{CloseColumn, PriceTable};
pub use view::ViewRecord;
