pub mod constants;
pub mod curves;
pub mod driver;
pub mod error;
pub mod output;
pub mod recorder;
pub mod scheduler;
pub mod series;
pub mod session;
pub mod settings;
pub mod tracking;

pub use constants::*;
pub use curves::*;
pub use driver::*;
pub use error::*;
pub use output::*;
pub use recorder::*;
pub use scheduler::*;
pub use series::*;
pub use session::*;
pub use settings::*;
pub use tracking::*;
