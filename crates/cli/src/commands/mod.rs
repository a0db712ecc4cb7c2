pub mod grouping;
pub mod matching;
pub mod runs;
pub mod spatial;
pub mod util;
pub mod workspace;

pub use grouping::*;
pub use matching::*;
pub use runs::*;
pub use spatial::*;
pub use util::*;
pub use workspace::*;
