mod input;
mod money;
mod row;
mod sheet;
mod words;

pub use input::*;
pub use money::*;
pub use row::*;
pub use sheet::*;
pub use words::*;
