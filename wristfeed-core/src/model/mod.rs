//! Fixed-capacity session data
//!
//! Everything the client holds is bounded at compile time: two title
//! tables, three receive counters and one shared transfer buffer. The
//! message view scroll position lives here too.

pub mod progress;
pub mod scroll;
pub mod titles;
pub mod transfer;

pub use progress::Progress;
pub use scroll::Scroll;
pub use titles::{Title, TitleTable};
pub use transfer::{ImageView, Payload, TransferBuffer};
